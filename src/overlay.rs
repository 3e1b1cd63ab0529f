//! egui rendering of the debug panel.

use winit::{event::WindowEvent, window::Window};

use crate::{
    context::Context,
    debug_panel::{self, DebugChange, DebugState},
    render::Overlay,
};

/// A laid-out panel waiting to be painted.
#[derive(Default)]
pub struct PreparedFrame {
    pub paint_jobs: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

impl PreparedFrame {
    /// Folds a frame that was never painted into `newer`. Shapes are replaced;
    /// texture updates are kept since egui sends each one (the font atlas too) only once.
    pub fn merge_into(mut self, newer: PreparedFrame) -> PreparedFrame {
        self.textures_delta.append(newer.textures_delta);
        PreparedFrame {
            paint_jobs: newer.paint_jobs,
            textures_delta: self.textures_delta,
            pixels_per_point: newer.pixels_per_point,
        }
    }
}

pub struct DebugOverlay {
    egui_ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
    frame: Option<PreparedFrame>,
}

impl DebugOverlay {
    pub fn new(ctx: &Context) -> Self {
        let egui_ctx = egui::Context::default();
        let state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            ctx.window(),
            Some(ctx.window().scale_factor() as f32),
            None,
            Some(ctx.device.limits().max_texture_dimension_2d as usize),
        );
        let renderer = egui_wgpu::Renderer::new(
            &ctx.device,
            ctx.config.format,
            egui_wgpu::RendererOptions {
                msaa_samples: 1,
                depth_stencil_format: None,
                dithering: true,
                ..Default::default()
            },
        );
        Self {
            egui_ctx,
            state,
            renderer,
            frame: None,
        }
    }

    /// Returns `true` when the panel consumed the event (the pointer is over it).
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Lays out the panel for this frame and returns the edits made.
    pub fn run(&mut self, window: &Window, debug: &DebugState) -> Vec<DebugChange> {
        let raw_input = self.state.take_egui_input(window);
        let mut changes = Vec::new();
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            changes = debug_panel::show(ctx, debug);
        });
        self.state
            .handle_platform_output(window, full_output.platform_output);
        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let frame = PreparedFrame {
            paint_jobs,
            textures_delta: full_output.textures_delta,
            pixels_per_point: full_output.pixels_per_point,
        };
        // A failed surface acquire leaves the last frame unpainted.
        self.frame = Some(match self.frame.take() {
            Some(pending) => pending.merge_into(frame),
            None => frame,
        });
        changes
    }
}

impl Overlay for DebugOverlay {
    fn draw(
        &mut self,
        ctx: &Context,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
    ) {
        let Some(frame) = self.frame.take() else {
            return;
        };
        for (id, image_delta) in &frame.textures_delta.set {
            self.renderer
                .update_texture(&ctx.device, &ctx.queue, *id, image_delta);
        }
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [ctx.config.width, ctx.config.height],
            pixels_per_point: frame.pixels_per_point,
        };
        // Only needed for paint callbacks, which the panel doesn't use.
        let _ = self.renderer.update_buffers(
            &ctx.device,
            &ctx.queue,
            encoder,
            &frame.paint_jobs,
            &screen,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Debug Panel Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            let mut render_pass = render_pass.forget_lifetime();
            self.renderer
                .render(&mut render_pass, &frame.paint_jobs, &screen);
        }

        for id in &frame.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}
