//! Procedural firefly particles.
//!
//! The field is generated once at startup and uploaded as an instance buffer;
//! each particle is drawn as a camera-facing quad by the fireflies pipeline.

use std::ops::Range;

use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Horizontal extent on x and z: `(rand - 0.5) * 4`.
pub const HORIZONTAL_RANGE: Range<f32> = -2.0..2.0;
/// Vertical extent: `rand * 2`.
pub const VERTICAL_RANGE: Range<f32> = 0.0..2.0;
/// Per-particle scale: `rand`.
pub const SCALE_RANGE: Range<f32> = 0.0..1.0;

/// Generator for the production field, seeded from the wall clock.
/// OS entropy would need a getrandom backend on wasm32.
pub fn clock_seeded_rng() -> SmallRng {
    SmallRng::seed_from_u64((instant::now() * 1000.0) as u64)
}

/// GPU layout of a single particle.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FireflyRaw {
    pub position: [f32; 3],
    pub scale: f32,
}

impl FireflyRaw {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<FireflyRaw>() as wgpu::BufferAddress,
            // One quad (six vertices) per particle
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

/// Positions (three floats per particle) and scales (one float per particle).
#[derive(Clone, Debug)]
pub struct FireflyField {
    positions: Vec<f32>,
    scales: Vec<f32>,
}

impl FireflyField {
    /// Draws x, y, z and scale per particle, in that order, from `[0, 1)` samples.
    pub fn generate(count: usize, rng: &mut impl Rng) -> Self {
        let mut positions = Vec::with_capacity(count * 3);
        let mut scales = Vec::with_capacity(count);
        for _ in 0..count {
            positions.push((rng.random::<f32>() - 0.5) * 4.0);
            positions.push(rng.random::<f32>() * 2.0);
            positions.push((rng.random::<f32>() - 0.5) * 4.0);
            scales.push(rng.random::<f32>());
        }
        Self { positions, scales }
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn scales(&self) -> &[f32] {
        &self.scales
    }

    pub fn position(&self, idx: usize) -> Option<[f32; 3]> {
        self.positions
            .get(idx * 3..idx * 3 + 3)
            .map(|p| [p[0], p[1], p[2]])
    }

    pub fn to_raw(&self) -> Vec<FireflyRaw> {
        self.positions
            .chunks_exact(3)
            .zip(self.scales.iter())
            .map(|(p, &scale)| FireflyRaw {
                position: [p[0], p[1], p[2]],
                scale,
            })
            .collect()
    }
}
