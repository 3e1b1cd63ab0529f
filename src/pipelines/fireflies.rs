use crate::{
    data_structures::fireflies::FireflyRaw,
    pipelines::basic::{DepthMode, mk_pipeline_layout, mk_render_pipeline},
};

/// Vertices per particle quad (two triangles, generated in the vertex shader).
pub const QUAD_VERTICES: u32 = 6;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FirefliesUniform {
    pub time: f32,
    pub pixel_ratio: f32,
    /// Point size in pixels at unit view distance, before per-particle scale.
    pub size: f32,
    _padding: f32,
    /// Backing-store size; converts the point size from pixels to NDC.
    pub resolution: [f32; 2],
    _padding2: [f32; 2],
}

impl FirefliesUniform {
    pub fn new(size: f32, pixel_ratio: f32, resolution: (u32, u32)) -> Self {
        Self {
            time: 0.0,
            pixel_ratio,
            size,
            _padding: 0.0,
            resolution: [resolution.0 as f32, resolution.1 as f32],
            _padding2: [0.0; 2],
        }
    }
}

/// Additive (src * alpha + dst) and read-only depth, so overlapping
/// particles brighten each other instead of occluding.
pub fn additive_blending() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

pub fn mk_fireflies_pipeline(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
    camera_bind_group_layout: &wgpu::BindGroupLayout,
    uniform_bind_group_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let layout = mk_pipeline_layout(
        device,
        "Fireflies Pipeline Layout",
        &[camera_bind_group_layout, uniform_bind_group_layout],
    );
    let shader = wgpu::ShaderModuleDescriptor {
        label: Some("Fireflies Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("fireflies.wgsl").into()),
    };
    mk_render_pipeline(
        device,
        &layout,
        color_format,
        Some(additive_blending()),
        DepthMode::ReadOnly,
        None,
        &[FireflyRaw::desc()],
        shader,
    )
}
