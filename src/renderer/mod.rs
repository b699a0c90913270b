//! wgpu rendering module
//!
//! The simulation is turned into a list of `CircleDraw`s each frame, which
//! are triangulated on the CPU and drawn in one pass over a white clear.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{CircleDraw, build_scene};
