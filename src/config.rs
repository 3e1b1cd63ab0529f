//! Scene configuration.
//!
//! Every constant the scene depends on lives in [`SceneConfig`]. The defaults
//! reproduce the portal scene; on native builds the asset directory can be
//! overridden with the `PORTAL_ASSET_DIR` environment variable.

use cgmath::{Deg, Point3};

use crate::data_structures::colour::Colour;

/// Environment variable that overrides [`SceneConfig::asset_dir`] on native builds.
pub const ASSET_DIR_ENV: &str = "PORTAL_ASSET_DIR";

/// Upper bound for the device pixel ratio used by the renderer.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub title: String,
    /// CSS selector of the canvas the scene renders into on the web.
    pub canvas_selector: String,
    pub asset_dir: String,
    pub model_file: String,
    pub baked_texture_file: String,

    pub fov: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub camera_position: Point3<f32>,
    pub camera_target: Point3<f32>,
    pub damping_factor: f32,

    pub firefly_count: usize,
    pub firefly_size: f32,

    pub portal_colour_start: Colour,
    pub portal_colour_end: Colour,
    pub pole_light_colour: Colour,
    pub clear_colour: Colour,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            title: "Portal".to_string(),
            canvas_selector: "canvas.webgl".to_string(),
            asset_dir: "assets".to_string(),
            model_file: "portal.glb".to_string(),
            baked_texture_file: "baked.jpg".to_string(),
            fov: Deg(45.0),
            znear: 0.1,
            zfar: 100.0,
            camera_position: Point3::new(4.0, 2.0, 4.0),
            camera_target: Point3::new(0.0, 0.0, 0.0),
            damping_factor: 0.05,
            firefly_count: 30,
            firefly_size: 50.0,
            portal_colour_start: Colour::from_u32(0xadf3ff),
            portal_colour_end: Colour::from_u32(0xffffff),
            pole_light_colour: Colour::from_u32(0xffe276),
            clear_colour: Colour::from_u32(0x374200),
        }
    }
}

impl SceneConfig {
    /// Defaults with the asset directory taken from `PORTAL_ASSET_DIR` when set.
    pub fn from_env() -> Self {
        #[allow(unused_mut)]
        let mut config = Self::default();
        #[cfg(not(target_arch = "wasm32"))]
        if let Ok(dir) = std::env::var(ASSET_DIR_ENV) {
            log::info!("Loading assets from {dir}");
            config.asset_dir = dir;
        }
        config
    }
}
