//! CPU-side state of the portal scene.
//!
//! [`SceneState`] owns everything that changes while the scene runs: the
//! viewport, camera and orbit controls, the uniform payloads of the portal,
//! pole-light and fireflies shaders, the clear colour and the debug panel
//! values. It never touches the GPU; the renderer uploads whatever it holds
//! once per frame. That keeps resize, animation and debug edits testable
//! without an adapter.

use winit::event::WindowEvent;

use crate::{
    camera::{Camera, CameraUniform, OrbitController, Projection},
    config::SceneConfig,
    data_structures::{colour::Colour, fireflies::FireflyField},
    debug_panel::{DebugChange, DebugControl, DebugState},
    error::SceneError,
    pipelines::{emissive::EmissiveUniform, fireflies::FirefliesUniform, portal::PortalUniform},
    viewport::Viewport,
};

#[derive(Debug)]
pub struct SceneState {
    pub viewport: Viewport,
    pub camera: Camera,
    pub projection: Projection,
    pub controller: OrbitController,
    pub camera_uniform: CameraUniform,
    pub portal: PortalUniform,
    pub pole_light: EmissiveUniform,
    pub fireflies_uniform: FirefliesUniform,
    pub fireflies: FireflyField,
    pub clear_colour: Colour,
    pub debug: DebugState,
    surface_size: (u32, u32),
}

impl SceneState {
    pub fn new(config: &SceneConfig, viewport: Viewport, fireflies: FireflyField) -> Self {
        let camera = Camera::new(config.camera_position, config.camera_target);
        let (width, height) = viewport.size();
        let projection = Projection::new(width, height, config.fov, config.znear, config.zfar);
        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(&camera, &projection);
        let debug = DebugState::new(config);

        Self {
            viewport,
            camera,
            projection,
            controller: OrbitController::new(Some(config.damping_factor)),
            camera_uniform,
            portal: PortalUniform::new(debug.portal_colour_start, debug.portal_colour_end),
            pole_light: EmissiveUniform::new(config.pole_light_colour),
            fireflies_uniform: FirefliesUniform::new(
                debug.firefly_size,
                viewport.pixel_ratio(),
                viewport.backing_size(),
            ),
            fireflies,
            clear_colour: debug.clear_colour,
            debug,
            surface_size: viewport.backing_size(),
        }
    }

    /// Applies a viewport change in logical pixels.
    ///
    /// Returns `false` for a zero-sized viewport, which is ignored.
    pub fn resize(&mut self, width: u32, height: u32, device_pixel_ratio: f64) -> bool {
        if !self.viewport.resize(width, height, device_pixel_ratio) {
            return false;
        }
        self.projection.resize(width, height);
        self.camera_uniform
            .update_view_proj(&self.camera, &self.projection);
        self.fireflies_uniform.pixel_ratio = self.viewport.pixel_ratio();
        let (backing_width, backing_height) = self.viewport.backing_size();
        self.set_surface_size(backing_width, backing_height);
        true
    }

    /// Sets the resolution the fireflies shader converts point sizes with to
    /// the size the surface was actually configured to.
    pub fn set_surface_size(&mut self, width: u32, height: u32) {
        self.surface_size = (width, height);
        self.fireflies_uniform.resolution = [width as f32, height as f32];
    }

    /// Size of the configured surface in physical pixels.
    pub fn surface_size(&self) -> (u32, u32) {
        self.surface_size
    }

    /// Writes `elapsed` seconds into both time uniforms.
    pub fn set_elapsed(&mut self, elapsed: f32) {
        self.portal.time = elapsed;
        self.fireflies_uniform.time = elapsed;
    }

    /// Advances orbit damping and refreshes the camera uniform.
    pub fn update_controls(&mut self) -> bool {
        let moved = self.controller.update(&mut self.camera);
        self.camera_uniform
            .update_view_proj(&self.camera, &self.projection);
        moved
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        // Cursor positions arrive in physical pixels, unaffected by the pixel ratio cap.
        let (_, surface_height) = self.surface_size;
        self.controller.handle_window_events(
            event,
            &self.camera,
            &self.projection,
            surface_height as f32,
        );
    }

    /// Records a debug edit and pushes it into the uniform or clear colour it drives.
    pub fn apply_debug(&mut self, change: DebugChange) {
        match self.debug.record(change) {
            DebugChange::Colour(DebugControl::PortalColourStart, colour) => {
                self.portal.colour_start = colour.to_linear();
            }
            DebugChange::Colour(DebugControl::PortalColourEnd, colour) => {
                self.portal.colour_end = colour.to_linear();
            }
            DebugChange::Colour(DebugControl::ClearColour, colour) => {
                self.clear_colour = colour;
            }
            DebugChange::FireflySize(size) => self.fireflies_uniform.size = size,
        }
    }

    /// Like [`Self::apply_debug`] for a hex string. Invalid input leaves every value unchanged.
    pub fn apply_debug_hex(&mut self, control: DebugControl, hex: &str) -> Result<(), SceneError> {
        let change = DebugChange::from_hex(control, hex)?;
        self.apply_debug(change);
        Ok(())
    }
}
