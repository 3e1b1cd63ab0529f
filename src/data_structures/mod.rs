//! Scene data: colours, transforms, meshes, textures, the scene graph and the
//! firefly particles.
//!
//! - `colour` holds sRGB colours and hex parsing for the debug panel
//! - `fireflies` generates the particle field
//! - `instance` holds node transforms and their GPU layout
//! - `model` contains vertex layouts and GPU meshes
//! - `scene_graph` is the named node tree of the loaded model
//! - `texture` wraps GPU textures

pub mod colour;
pub mod fireflies;
pub mod instance;
pub mod model;
pub mod scene_graph;
pub mod texture;
