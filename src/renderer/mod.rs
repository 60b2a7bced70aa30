//! Rendering module
//!
//! `shapes` turns sword poses into stroked outline geometry; `pipeline`
//! uploads it to a WebGPU surface each frame.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::{draw_sword, frame_vertices, pivot, sword_outline};
pub use vertex::Vertex;
