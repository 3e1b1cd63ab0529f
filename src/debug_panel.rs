//! Debug panel state.
//!
//! The panel edits a handful of values that tune the look of the scene. The
//! values themselves live in [`DebugState`]; edits are expressed as
//! [`DebugChange`]s which [`crate::scene::SceneState::apply_debug`] pushes
//! into the shader uniforms and the clear colour. With the `debug-ui` feature
//! an egui window renders the controls.

use crate::{config::SceneConfig, data_structures::colour::Colour, error::SceneError};

/// Largest value of the fireflies size slider.
pub const MAX_FIREFLY_SIZE: f32 = 500.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DebugControl {
    PortalColourStart,
    PortalColourEnd,
    ClearColour,
}

impl DebugControl {
    pub const ALL: [DebugControl; 3] = [
        DebugControl::PortalColourStart,
        DebugControl::PortalColourEnd,
        DebugControl::ClearColour,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DebugControl::PortalColourStart => "portalColorStart",
            DebugControl::PortalColourEnd => "portalColorEnd",
            DebugControl::ClearColour => "clearColor",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DebugChange {
    Colour(DebugControl, Colour),
    FireflySize(f32),
}

impl DebugChange {
    /// Parses a colour edit coming in as a hex string.
    pub fn from_hex(control: DebugControl, hex: &str) -> Result<Self, SceneError> {
        Colour::from_hex(hex)
            .map(|colour| DebugChange::Colour(control, colour))
            .inspect_err(|_| log::warn!("Rejected {} value {hex:?}", control.label()))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DebugState {
    pub portal_colour_start: Colour,
    pub portal_colour_end: Colour,
    pub clear_colour: Colour,
    pub firefly_size: f32,
}

impl DebugState {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            portal_colour_start: config.portal_colour_start,
            portal_colour_end: config.portal_colour_end,
            clear_colour: config.clear_colour,
            firefly_size: config.firefly_size,
        }
    }

    pub fn colour(&self, control: DebugControl) -> Colour {
        match control {
            DebugControl::PortalColourStart => self.portal_colour_start,
            DebugControl::PortalColourEnd => self.portal_colour_end,
            DebugControl::ClearColour => self.clear_colour,
        }
    }

    /// Records `change` and returns it with the firefly size clamped to the slider range.
    pub fn record(&mut self, change: DebugChange) -> DebugChange {
        match change {
            DebugChange::Colour(control, colour) => {
                match control {
                    DebugControl::PortalColourStart => self.portal_colour_start = colour,
                    DebugControl::PortalColourEnd => self.portal_colour_end = colour,
                    DebugControl::ClearColour => self.clear_colour = colour,
                }
                change
            }
            DebugChange::FireflySize(size) => {
                self.firefly_size = size.clamp(0.0, MAX_FIREFLY_SIZE);
                DebugChange::FireflySize(self.firefly_size)
            }
        }
    }
}

/// Draws the floating panel and returns the edits made this frame.
#[cfg(feature = "debug-ui")]
pub fn show(ctx: &egui::Context, state: &DebugState) -> Vec<DebugChange> {
    let mut changes = Vec::new();
    egui::Window::new("Debug")
        .default_width(240.0)
        .resizable(false)
        .show(ctx, |ui| {
            egui::Grid::new("debug_controls").num_columns(2).show(ui, |ui| {
                for control in DebugControl::ALL {
                    let mut rgb = state.colour(control).to_array();
                    ui.label(control.label());
                    if ui.color_edit_button_srgb(&mut rgb).changed() {
                        changes.push(DebugChange::Colour(control, rgb.into()));
                    }
                    ui.end_row();
                }
                let mut size = state.firefly_size;
                ui.label("firefliesSize");
                if ui
                    .add(egui::Slider::new(&mut size, 0.0..=MAX_FIREFLY_SIZE).step_by(1.0))
                    .changed()
                {
                    changes.push(DebugChange::FireflySize(size));
                }
                ui.end_row();
            });
        });
    changes
}
