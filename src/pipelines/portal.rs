use crate::{
    data_structures::{
        colour::Colour,
        instance::InstanceRaw,
        model::{ModelVertex, Vertex},
    },
    pipelines::basic::{DepthMode, mk_pipeline_layout, mk_render_pipeline},
};

/// Uniforms of the portal shader: elapsed time and the two blended colours
/// (linear RGB).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PortalUniform {
    pub colour_start: [f32; 3],
    pub time: f32,
    pub colour_end: [f32; 3],
    _padding: f32,
}

impl PortalUniform {
    pub fn new(colour_start: Colour, colour_end: Colour) -> Self {
        Self {
            colour_start: colour_start.to_linear(),
            time: 0.0,
            colour_end: colour_end.to_linear(),
            _padding: 0.0,
        }
    }
}

pub fn mk_portal_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
    uniform_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = mk_pipeline_layout(
        device,
        "Portal Pipeline Layout",
        &[camera_bind_group_layout, uniform_bind_group_layout],
    );
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Portal Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("portal.wgsl").into()),
    };
    mk_render_pipeline(
        device,
        &layout,
        color_format,
        Some(wgpu::BlendState::REPLACE),
        DepthMode::Opaque,
        Some(wgpu::Face::Back),
        &[ModelVertex::desc(), InstanceRaw::desc()],
        shader,
    )
}
