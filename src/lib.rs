//! portal-scene
//!
//! A small baked-lighting scene rendered with wgpu on native and WASM: a
//! glTF model textured with a precomputed lighting map, two emissive pole
//! lamps, a portal whose surface swirls with animated noise, and a cloud of
//! fireflies drifting above the ground. Orbit controls move the camera and
//! an optional egui panel (`debug-ui` feature) tweaks the colours.
//!
//! High-level modules
//! - `camera`: camera, projection, orbit controls and the camera uniform
//! - `config`: every constant of the scene, overridable at startup
//! - `context`: GPU device, surface and pipelines for the window
//! - `data_structures`: colours, transforms, meshes, textures, scene graph, fireflies
//! - `debug_panel`: the values the debug panel edits
//! - `flow`: window and event loop
//! - `frame`: the per-frame loop with its clock and stop signal
//! - `materials`: which node is drawn with which material
//! - `pipelines`: the render pipelines and their uniforms
//! - `render`: GPU resources of the scene and the render pass
//! - `resources`: loading the model and the baked texture
//! - `scene`: CPU-side scene state updated by resize, time and debug edits
//! - `viewport`: logical size and clamped pixel ratio
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod debug_panel;
pub mod error;
pub mod flow;
pub mod frame;
pub mod materials;
#[cfg(feature = "debug-ui")]
pub mod overlay;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;
pub mod viewport;

// Re-exports the math and GPU crates that appear in the public API.
pub use cgmath;
pub use wgpu;
pub use winit;

pub use error::SceneError;
