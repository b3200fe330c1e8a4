//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// `0xRRGGBB` to an opaque RGBA color
pub const fn hex(rgb: u32) -> [f32; 4] {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Colors for game elements
pub mod colors {
    use super::hex;

    pub const BOARD_EVEN: [f32; 4] = hex(0x0b1222);
    pub const BOARD_ODD: [f32; 4] = hex(0x0c1426);
    pub const OBSTACLE: [f32; 4] = hex(0x374151);
    pub const FOOD: [f32; 4] = hex(0xf59e0b);
    pub const STAR: [f32; 4] = hex(0xfbbf24);
    pub const COFFEE: [f32; 4] = hex(0x10b981);
    pub const SHIELD: [f32; 4] = hex(0x60a5fa);
    /// Drawn on top of power-up tiles
    pub const GLYPH: [f32; 4] = hex(0x0f172a);
    pub const SNAKE_HEAD: [f32; 4] = hex(0x22d3ee);
    pub const SNAKE_HEAD_GHOST: [f32; 4] = hex(0x93c5fd);
    pub const SNAKE_BODY: [f32; 4] = hex(0x10b981);
    pub const BORDER: [f32; 4] = hex(0x1f2937);
    pub const BACKGROUND: [f32; 4] = BOARD_EVEN;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(hex(0xff0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(hex(0x000000), [0.0, 0.0, 0.0, 1.0]);
        let c = hex(0x22d3ee);
        assert!((c[0] - 0x22 as f32 / 255.0).abs() < 1e-6);
        assert!((c[2] - 0xee as f32 / 255.0).abs() < 1e-6);
    }
}
