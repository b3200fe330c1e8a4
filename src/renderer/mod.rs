//! WebGPU rendering module
//!
//! `scene` turns the game state into colored triangles in canvas pixels;
//! `pipeline` uploads and draws them.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use vertex::Vertex;
