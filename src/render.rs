//! GPU side of the scene and the render pass.
//!
//! [`GpuScene`] owns the buffers and bind groups that mirror
//! [`SceneState`]: the camera, the three uniform sets, the baked texture,
//! the uploaded meshes with one instance buffer per drawn node, and the
//! fireflies instance buffer. A frame is drawn in a single pass: the opaque
//! materials first, then the additive fireflies on top.

use std::iter;

use wgpu::util::DeviceExt;

use crate::{
    camera::CameraUniform,
    context::Context,
    data_structures::{model::Mesh, texture::Texture},
    materials::Material,
    pipelines::{
        baked,
        basic::UniformResources,
        emissive::EmissiveUniform,
        fireflies::{FirefliesUniform, QUAD_VERTICES},
        portal::PortalUniform,
    },
    resources::LoadedModel,
    scene::SceneState,
};

/// A node to draw: its meshes, its world transform on the GPU and its material.
#[derive(Debug)]
pub struct DrawItem {
    pub name: String,
    pub material: Material,
    pub meshes: Vec<usize>,
    pub instance: wgpu::Buffer,
}

/// Extra content drawn into the frame after the scene, such as the debug panel.
pub trait Overlay {
    fn draw(
        &mut self,
        ctx: &Context,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
    );
}

#[derive(Debug)]
pub struct GpuScene {
    pub camera: UniformResources<CameraUniform>,
    pub portal: UniformResources<PortalUniform>,
    pub pole_light: UniformResources<EmissiveUniform>,
    pub fireflies: UniformResources<FirefliesUniform>,
    baked_bind_group: wgpu::BindGroup,
    meshes: Vec<Mesh>,
    draws: Vec<DrawItem>,
    firefly_buffer: wgpu::Buffer,
    firefly_count: u32,
}

impl GpuScene {
    pub fn new(ctx: &Context, scene: &SceneState, model: LoadedModel, baked: &Texture) -> Self {
        let device = &ctx.device;
        let layouts = &ctx.layouts;

        let camera = UniformResources::new(device, "camera", &layouts.camera, scene.camera_uniform);
        let portal = UniformResources::new(device, "portal", &layouts.portal, scene.portal);
        let pole_light =
            UniformResources::new(device, "pole_light", &layouts.emissive, scene.pole_light);
        let fireflies = UniformResources::new(
            device,
            "fireflies",
            &layouts.fireflies,
            scene.fireflies_uniform,
        );
        let baked_bind_group = baked::mk_bind_group(device, &layouts.texture, baked);

        let mut draws = Vec::new();
        model.graph.visit(&mut |visited| {
            if visited.node.meshes.is_empty() {
                return;
            }
            // Nodes outside the bound set still carry baked lighting.
            let material = visited.material.unwrap_or(Material::Baked);
            let instance = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Instance Buffer", visited.node.name)),
                contents: bytemuck::cast_slice(&[visited.world.to_raw()]),
                usage: wgpu::BufferUsages::VERTEX,
            });
            draws.push(DrawItem {
                name: visited.node.name.clone(),
                material,
                meshes: visited.node.meshes.clone(),
                instance,
            });
        });

        let firefly_raw = scene.fireflies.to_raw();
        let firefly_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Fireflies Instance Buffer"),
            contents: bytemuck::cast_slice(&firefly_raw),
            usage: wgpu::BufferUsages::VERTEX,
        });

        log::info!(
            "{} draw items, {} fireflies",
            draws.len(),
            firefly_raw.len()
        );

        Self {
            camera,
            portal,
            pole_light,
            fireflies,
            baked_bind_group,
            meshes: model.meshes,
            draws,
            firefly_buffer,
            firefly_count: firefly_raw.len() as u32,
        }
    }

    pub fn draws(&self) -> &[DrawItem] {
        &self.draws
    }

    /// Copies the uniform payloads of `scene` to the GPU.
    pub fn upload(&mut self, queue: &wgpu::Queue, scene: &SceneState) {
        self.camera.write(queue, scene.camera_uniform);
        self.portal.write(queue, scene.portal);
        self.pole_light.write(queue, scene.pole_light);
        self.fireflies.write(queue, scene.fireflies_uniform);
    }

    /// Draws one frame into the window surface.
    pub fn render(
        &self,
        ctx: &Context,
        scene: &SceneState,
        overlay: Option<&mut dyn Overlay>,
    ) -> Result<(), wgpu::SurfaceError> {
        let output = ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        self.encode(ctx, &mut encoder, &view, &ctx.depth_texture.view, scene);
        if let Some(overlay) = overlay {
            overlay.draw(ctx, &mut encoder, &view);
        }

        ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    /// Records the scene pass into `encoder`, targeting `view` and `depth`.
    pub fn encode(
        &self,
        ctx: &Context,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        depth: &wgpu::TextureView,
        scene: &SceneState,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(scene.clear_colour.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        render_pass.set_bind_group(0, &self.camera.bind_group, &[]);
        for material in [Material::Baked, Material::PoleLight, Material::Portal] {
            let (pipeline, group) = match material {
                Material::Baked => (&ctx.pipelines.baked, &self.baked_bind_group),
                Material::PoleLight => (&ctx.pipelines.emissive, &self.pole_light.bind_group),
                Material::Portal => (&ctx.pipelines.portal, &self.portal.bind_group),
            };
            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(1, group, &[]);
            for draw in self.draws.iter().filter(|draw| draw.material == material) {
                render_pass.set_vertex_buffer(1, draw.instance.slice(..));
                for mesh in draw.meshes.iter().filter_map(|idx| self.meshes.get(*idx)) {
                    render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    render_pass
                        .set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    render_pass.draw_indexed(0..mesh.num_elements, 0, 0..1);
                }
            }
        }

        if self.firefly_count > 0 {
            render_pass.set_pipeline(&ctx.pipelines.fireflies);
            render_pass.set_bind_group(1, &self.fireflies.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.firefly_buffer.slice(..));
            render_pass.draw(0..QUAD_VERTICES, 0..self.firefly_count);
        }
    }
}
