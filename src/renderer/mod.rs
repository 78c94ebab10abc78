//! WebGPU rendering module
//!
//! Rasterizes the simulation's draw list as flat-colored quads.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
