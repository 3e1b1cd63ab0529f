use crate::{
    data_structures::{
        colour::Colour,
        instance::InstanceRaw,
        model::{ModelVertex, Vertex},
    },
    pipelines::basic::{DepthMode, mk_pipeline_layout, mk_render_pipeline},
};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct EmissiveUniform {
    pub colour: [f32; 3],
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    _padding: f32,
}

impl EmissiveUniform {
    pub fn new(colour: Colour) -> Self {
        Self {
            colour: colour.to_linear(),
            _padding: 0.0,
        }
    }
}

pub fn mk_emissive_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
    uniform_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = mk_pipeline_layout(
        device,
        "Emissive Pipeline Layout",
        &[camera_bind_group_layout, uniform_bind_group_layout],
    );
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Emissive Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("emissive.wgsl").into()),
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
