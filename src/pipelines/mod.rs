//! Render pipelines of the scene.
//!
//! One pipeline per material plus the fireflies. All of them share the
//! camera bind group at index 0; index 1 is the material's own group
//! (the baked texture or a uniform buffer).

use crate::error::SceneError;

pub mod baked;
pub mod basic;
pub mod emissive;
pub mod fireflies;
pub mod portal;

/// Bind group layouts shared by pipelines and the resources bound to them.
#[derive(Debug)]
pub struct Layouts {
    pub camera: wgpu::BindGroupLayout,
    pub texture: wgpu::BindGroupLayout,
    pub emissive: wgpu::BindGroupLayout,
    pub portal: wgpu::BindGroupLayout,
    pub fireflies: wgpu::BindGroupLayout,
}

impl Layouts {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            camera: basic::mk_uniform_layout(device, "camera_bind_group_layout"),
            texture: baked::mk_texture_layout(device),
            emissive: basic::mk_uniform_layout(device, "emissive_bind_group_layout"),
            portal: basic::mk_uniform_layout(device, "portal_bind_group_layout"),
            fireflies: basic::mk_uniform_layout(device, "fireflies_bind_group_layout"),
        }
    }
}

#[derive(Debug)]
pub struct Pipelines {
    pub baked: wgpu::RenderPipeline,
    pub emissive: wgpu::RenderPipeline,
    pub portal: wgpu::RenderPipeline,
    pub fireflies: wgpu::RenderPipeline,
}

impl Pipelines {
    /// Creates every pipeline for `color_format`.
    ///
    /// WGSL is validated when the pipeline is created; a validation error is
    /// captured and reported as [`SceneError::ShaderCompile`] naming the
    /// offending program instead of reaching the device's uncaptured error handler.
    pub async fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        layouts: &Layouts,
    ) -> Result<Self, SceneError> {
        let baked = validated(device, "baked", || {
            baked::mk_baked_pipeline(device, color_format, &layouts.camera, &layouts.texture)
        })
        .await?;
        let emissive = validated(device, "emissive", || {
            emissive::mk_emissive_pipeline(device, color_format, &layouts.camera, &layouts.emissive)
        })
        .await?;
        let portal = validated(device, "portal", || {
            portal::mk_portal_pipeline(device, color_format, &layouts.camera, &layouts.portal)
        })
        .await?;
        let fireflies = validated(device, "fireflies", || {
            fireflies::mk_fireflies_pipeline(
                device,
                color_format,
                &layouts.camera,
                &layouts.fireflies,
            )
        })
        .await?;
        log::info!("Render pipelines ready");
        Ok(Self {
            baked,
            emissive,
            portal,
            fireflies,
        })
    }
}

async fn validated<T>(
    device: &wgpu::Device,
    shader: &str,
    create: impl FnOnce() -> T,
) -> Result<T, SceneError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let created = create();
    match device.pop_error_scope().await {
        None => Ok(created),
        Some(err) => {
            log::error!("Shader {shader} failed validation: {err}");
            Err(SceneError::ShaderCompile {
                shader: shader.to_string(),
                reason: err.to_string(),
            })
        }
    }
}
