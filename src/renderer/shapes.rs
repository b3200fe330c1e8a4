//! Shape generation for 2D primitives
//!
//! Everything is emitted as a plain triangle list in canvas pixels
//! (origin top-left, y down).

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use super::vertex::Vertex;

/// Segments used for a quarter-circle corner
const CORNER_SEGMENTS: u32 = 4;

fn push_tri(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

fn polar(center: Vec2, radius: f32, theta: f32) -> Vec2 {
    center + radius * Vec2::new(theta.cos(), theta.sin())
}

/// Axis-aligned filled rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    push_rect(&mut vertices, min, size, color);
    vertices
}

fn push_rect(out: &mut Vec<Vertex>, min: Vec2, size: Vec2, color: [f32; 4]) {
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    let max = min + size;
    let tr = Vec2::new(max.x, min.y);
    let bl = Vec2::new(min.x, max.y);
    push_tri(out, min, tr, bl, color);
    push_tri(out, bl, tr, max, color);
}

/// Pie slice from `start` to `end` (radians)
fn push_sector(
    out: &mut Vec<Vertex>,
    center: Vec2,
    radius: f32,
    start: f32,
    end: f32,
    segments: u32,
    color: [f32; 4],
) {
    let span = end - start;
    for i in 0..segments {
        let theta1 = start + span * i as f32 / segments as f32;
        let theta2 = start + span * (i + 1) as f32 / segments as f32;
        push_tri(
            out,
            center,
            polar(center, radius, theta1),
            polar(center, radius, theta2),
            color,
        );
    }
}

/// Filled rectangle with circular corners
pub fn rounded_rect(min: Vec2, size: Vec2, radius: f32, color: [f32; 4]) -> Vec<Vertex> {
    let r = radius.clamp(0.0, size.x.min(size.y) / 2.0);
    if r == 0.0 {
        return rect(min, size, color);
    }

    let mut vertices = Vec::with_capacity(18 + 12 * CORNER_SEGMENTS as usize);
    // Vertical band, then the two side bands between the corners
    push_rect(
        &mut vertices,
        Vec2::new(min.x + r, min.y),
        Vec2::new(size.x - 2.0 * r, size.y),
        color,
    );
    push_rect(
        &mut vertices,
        Vec2::new(min.x, min.y + r),
        Vec2::new(r, size.y - 2.0 * r),
        color,
    );
    push_rect(
        &mut vertices,
        Vec2::new(min.x + size.x - r, min.y + r),
        Vec2::new(r, size.y - 2.0 * r),
        color,
    );

    let max = min + size;
    let corners = [
        (Vec2::new(min.x + r, min.y + r), PI),
        (Vec2::new(max.x - r, min.y + r), PI + FRAC_PI_2),
        (Vec2::new(max.x - r, max.y - r), 0.0),
        (Vec2::new(min.x + r, max.y - r), FRAC_PI_2),
    ];
    for (center, start) in corners {
        push_sector(
            &mut vertices,
            center,
            r,
            start,
            start + FRAC_PI_2,
            CORNER_SEGMENTS,
            color,
        );
    }
    vertices
}

/// Rectangle outline drawn inside the given bounds
pub fn outline(min: Vec2, size: Vec2, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(size.x / 2.0).min(size.y / 2.0);
    let mut vertices = Vec::with_capacity(24);
    push_rect(&mut vertices, min, Vec2::new(size.x, t), color);
    push_rect(
        &mut vertices,
        Vec2::new(min.x, min.y + size.y - t),
        Vec2::new(size.x, t),
        color,
    );
    push_rect(
        &mut vertices,
        Vec2::new(min.x, min.y + t),
        Vec2::new(t, size.y - 2.0 * t),
        color,
    );
    push_rect(
        &mut vertices,
        Vec2::new(min.x + size.x - t, min.y + t),
        Vec2::new(t, size.y - 2.0 * t),
        color,
    );
    vertices
}

/// Thick arc band between two radii
pub fn arc_band(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    start: f32,
    end: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let span = end - start;
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = start + span * i as f32 / segments as f32;
        let theta2 = start + span * (i + 1) as f32 / segments as f32;

        let inner1 = polar(center, inner_radius, theta1);
        let outer1 = polar(center, outer_radius, theta1);
        let inner2 = polar(center, inner_radius, theta2);
        let outer2 = polar(center, outer_radius, theta2);

        // Two triangles per segment
        push_tri(&mut vertices, inner1, outer1, inner2, color);
        push_tri(&mut vertices, inner2, outer1, outer2, color);
    }

    vertices
}

/// Fan-triangulated polygon; must be star-shaped around `center`
pub fn fan(center: Vec2, points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(points.len() * 3);
    for (i, &p) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        push_tri(&mut vertices, center, p, next, color);
    }
    vertices
}

/// Five-point star, first point straight up
pub fn star(center: Vec2, outer_radius: f32, inner_radius: f32, color: [f32; 4]) -> Vec<Vertex> {
    let points: Vec<Vec2> = (0..10)
        .map(|i| {
            let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
            polar(center, radius, -FRAC_PI_2 + i as f32 * PI / 5.0)
        })
        .collect();
    fan(center, &points, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(vertices: &[Vertex]) -> (Vec2, Vec2) {
        let mut min = Vec2::splat(f32::MAX);
        let mut max = Vec2::splat(f32::MIN);
        for v in vertices {
            let p = Vec2::from(v.position);
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }

    #[test]
    fn test_rect_is_two_triangles() {
        let v = rect(Vec2::new(4.0, 4.0), Vec2::new(16.0, 16.0), [1.0; 4]);
        assert_eq!(v.len(), 6);
        assert_eq!(bounds(&v), (Vec2::new(4.0, 4.0), Vec2::new(20.0, 20.0)));
    }

    #[test]
    fn test_empty_rect() {
        assert!(rect(Vec2::ZERO, Vec2::new(0.0, 5.0), [1.0; 4]).is_empty());
    }

    #[test]
    fn test_rounded_rect_stays_in_bounds() {
        let v = rounded_rect(Vec2::new(3.0, 3.0), Vec2::new(18.0, 18.0), 6.0, [1.0; 4]);
        assert_eq!(v.len() % 3, 0);
        let (min, max) = bounds(&v);
        assert!(min.x >= 3.0 - 1e-4 && min.y >= 3.0 - 1e-4);
        assert!(max.x <= 21.0 + 1e-4 && max.y <= 21.0 + 1e-4);
    }

    #[test]
    fn test_outline_covers_edges() {
        let v = outline(Vec2::ZERO, Vec2::new(100.0, 50.0), 2.0, [1.0; 4]);
        assert_eq!(v.len(), 24);
        assert_eq!(bounds(&v), (Vec2::ZERO, Vec2::new(100.0, 50.0)));
    }

    #[test]
    fn test_star_points() {
        let v = star(Vec2::new(10.0, 10.0), 8.0, 3.0, [1.0; 4]);
        assert_eq!(v.len(), 30);
        let (min, _) = bounds(&v);
        // Top point at (10, 2)
        assert!((min.y - 2.0).abs() < 1e-4);
    }
}
