//! spinning-cubes
//!
//! A small wgpu demo that opens a window and renders a handful of rotating,
//! coloured cubes. All cubes share one static mesh and are drawn with a single
//! instanced draw call per frame, depth tested against a transient depth
//! buffer.
//!
//! High-level modules
//! - `config`: window, clear colour, frame pacing and scene configuration
//! - `context`: GPU and window context that owns device/queue/surface
//! - `data_structures`: cubes, the cube mesh, the scene and textures
//! - `flow`: frame pacing and the winit event loop
//! - `pipelines`: the instanced cube pipeline and its depth state
//! - `render`: per-frame planning, encoding and presentation
//!

pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod pipelines;
pub mod render;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use config::{Config, FrameRateRange};
pub use flow::run;
