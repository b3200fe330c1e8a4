//! Scene building: `GameState` to a triangle list in canvas pixels
//!
//! Pure projection of the state; drawing order is board, obstacles, food,
//! power-up, snake (tail first, head last), border.

use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::CELL_SIZE;
use crate::sim::{Cell, GameState, PowerUpKind};

/// Corner radius of rounded tiles
const TILE_RADIUS: f32 = 6.0;
const BORDER_WIDTH: f32 = 2.0;

fn cell_origin(cell: Cell) -> Vec2 {
    Vec2::new(cell.x as f32, cell.y as f32) * CELL_SIZE as f32
}

fn cell_center(cell: Cell) -> Vec2 {
    cell_origin(cell) + Vec2::splat(CELL_SIZE as f32 / 2.0)
}

/// Cell-sized tile inset by `pad` pixels on each side
fn tile(cell: Cell, pad: f32, rounded: bool, color: [f32; 4]) -> Vec<Vertex> {
    let min = cell_origin(cell) + Vec2::splat(pad);
    let size = Vec2::splat(CELL_SIZE as f32 - 2.0 * pad);
    if rounded {
        shapes::rounded_rect(min, size, TILE_RADIUS, color)
    } else {
        shapes::rect(min, size, color)
    }
}

pub fn power_up_color(kind: PowerUpKind) -> [f32; 4] {
    match kind {
        PowerUpKind::Star => colors::STAR,
        PowerUpKind::Coffee => colors::COFFEE,
        PowerUpKind::Shield => colors::SHIELD,
    }
}

fn glyph(kind: PowerUpKind, center: Vec2) -> Vec<Vertex> {
    let c = colors::GLYPH;
    match kind {
        PowerUpKind::Star => shapes::star(center, 7.0, 3.0, c),
        PowerUpKind::Coffee => {
            // Cup, handle, saucer
            let mut v = shapes::rect(center + Vec2::new(-6.0, -4.0), Vec2::new(9.0, 8.0), c);
            v.extend(shapes::arc_band(
                center + Vec2::new(3.0, 0.0),
                1.5,
                3.5,
                -FRAC_PI_2,
                FRAC_PI_2,
                c,
                6,
            ));
            v.extend(shapes::rect(center + Vec2::new(-7.0, 5.0), Vec2::new(13.0, 1.5), c));
            v
        }
        PowerUpKind::Shield => {
            let crest = [
                Vec2::new(-6.0, -7.0),
                Vec2::new(6.0, -7.0),
                Vec2::new(6.0, 0.0),
                Vec2::new(0.0, 7.0),
                Vec2::new(-6.0, 0.0),
            ]
            .map(|p| center + p);
            shapes::fan(center, &crest, c)
        }
    }
}

/// Build the full frame
pub fn build(state: &GameState) -> Vec<Vertex> {
    let grid = state.grid;
    let mut vertices = Vec::with_capacity(grid.cell_count() * 6 + state.snake.len() * 60);

    // Checkerboard
    for x in 0..grid.cols {
        for y in 0..grid.rows {
            let color = if (x + y) % 2 == 0 {
                colors::BOARD_EVEN
            } else {
                colors::BOARD_ODD
            };
            vertices.extend(tile(Cell::new(x, y), 0.0, false, color));
        }
    }

    for &obstacle in &state.obstacles {
        vertices.extend(tile(obstacle, 4.0, false, colors::OBSTACLE));
    }

    vertices.extend(tile(state.food, 4.0, true, colors::FOOD));

    if let Some(power_up) = &state.power_up {
        vertices.extend(tile(power_up.cell, 3.0, true, power_up_color(power_up.kind)));
        vertices.extend(glyph(power_up.kind, cell_center(power_up.cell)));
    }

    for (i, &segment) in state.snake.iter().enumerate().rev() {
        let color = match i {
            0 if state.is_ghost() => colors::SNAKE_HEAD_GHOST,
            0 => colors::SNAKE_HEAD,
            _ => colors::SNAKE_BODY,
        };
        vertices.extend(tile(segment, 3.0, true, color));
    }

    let canvas = Vec2::new(grid.cols as f32, grid.rows as f32) * CELL_SIZE as f32;
    vertices.extend(shapes::outline(Vec2::ZERO, canvas, BORDER_WIDTH, colors::BORDER));

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PowerUp;

    fn with_color(vertices: &[Vertex], color: [f32; 4]) -> usize {
        vertices.iter().filter(|v| v.color == color).count()
    }

    fn quiet_state() -> GameState {
        let mut state = GameState::new(5);
        state.obstacles.clear();
        state.food = Cell::new(0, 0);
        state.power_up = None;
        state
    }

    #[test]
    fn test_checkerboard_covers_grid() {
        let state = quiet_state();
        let v = build(&state);
        let board = with_color(&v, colors::BOARD_EVEN) + with_color(&v, colors::BOARD_ODD);
        assert_eq!(board, state.grid.cell_count() * 6);
    }

    #[test]
    fn test_fits_canvas() {
        let state = GameState::new(8);
        let w = state.grid.cols as f32 * CELL_SIZE as f32;
        let h = state.grid.rows as f32 * CELL_SIZE as f32;
        for v in build(&state) {
            assert!(v.position[0] >= -1e-3 && v.position[0] <= w + 1e-3);
            assert!(v.position[1] >= -1e-3 && v.position[1] <= h + 1e-3);
        }
    }

    #[test]
    fn test_obstacles_drawn() {
        let mut state = quiet_state();
        state.obstacles = vec![Cell::new(1, 1), Cell::new(2, 2)];
        assert_eq!(with_color(&build(&state), colors::OBSTACLE), 12);
    }

    #[test]
    fn test_head_drawn_last() {
        let state = quiet_state();
        let v = build(&state);
        let border_len = 24;
        let head = &v[v.len() - border_len - 1];
        assert_eq!(head.color, colors::SNAKE_HEAD);
        assert_eq!(with_color(&v, colors::SNAKE_HEAD_GHOST), 0);
    }

    #[test]
    fn test_ghost_head_color() {
        let mut state = quiet_state();
        state.ghost = 10;
        let v = build(&state);
        assert_eq!(with_color(&v, colors::SNAKE_HEAD), 0);
        assert!(with_color(&v, colors::SNAKE_HEAD_GHOST) > 0);
    }

    #[test]
    fn test_power_up_has_glyph() {
        for kind in PowerUpKind::ALL {
            let mut state = quiet_state();
            state.power_up = Some(PowerUp {
                cell: Cell::new(20, 3),
                kind,
                lifetime: 100,
            });
            let v = build(&state);
            assert!(with_color(&v, colors::GLYPH) > 0, "{:?}", kind);
            assert!(with_color(&v, power_up_color(kind)) > 0);
        }
    }
}
