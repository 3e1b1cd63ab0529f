//! Error taxonomy for the scene.
//!
//! Library functions return [`anyhow::Result`]. Failures that belong to the
//! scene itself are raised as [`SceneError`] so callers (and tests) can
//! `downcast_ref` and react to the specific case.

use std::fmt;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// An asset could not be fetched or decoded.
    #[error("failed to load asset {asset}: {reason}")]
    AssetLoad { asset: String, reason: String },
    /// A node the material binder relies on is absent from the loaded model.
    #[error("node {0:?} not found in the loaded scene")]
    NodeNotFound(String),
    /// A WGSL program failed validation when the pipeline was created.
    #[error("shader {shader} failed to compile: {reason}")]
    ShaderCompile { shader: String, reason: String },
    /// A debug-panel colour was not a `#rrggbb`, `rrggbb` or `#rgb` hex string.
    #[error("invalid hex colour {0:?}")]
    InvalidColour(String),
    /// Adapter, device or surface creation failed.
    #[error("GPU setup failed: {0}")]
    Gpu(String),
}

impl SceneError {
    pub(crate) fn asset(asset: &str, reason: impl fmt::Display) -> Self {
        SceneError::AssetLoad {
            asset: asset.to_string(),
            reason: reason.to_string(),
        }
    }
}
