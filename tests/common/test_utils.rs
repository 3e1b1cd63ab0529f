use rand::RngCore;

use portal_scene::{
    config::SceneConfig,
    data_structures::{
        fireflies::FireflyField,
        scene_graph::{SceneGraph, SceneNode},
    },
    frame::FrameSink,
    scene::SceneState,
    viewport::Viewport,
};

/// Replays a fixed list of `[0, 1)` samples as `random::<f32>()` results,
/// wrapping around at the end. Samples keep 24 bits of precision.
pub struct SequenceSource {
    samples: Vec<f32>,
    next: usize,
}

impl SequenceSource {
    pub fn new(samples: Vec<f32>) -> Self {
        Self { samples, next: 0 }
    }
}

impl RngCore for SequenceSource {
    fn next_u32(&mut self) -> u32 {
        let sample = self.samples[self.next % self.samples.len()];
        self.next += 1;
        // rand takes the high 24 bits of a u32 for an f32
        ((sample * (1u32 << 24) as f32) as u32) << 8
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u32() as u64
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

pub fn test_scene(width: u32, height: u32, device_pixel_ratio: f64) -> SceneState {
    let config = SceneConfig::default();
    let fireflies = FireflyField::generate(config.firefly_count, &mut SequenceSource::new(vec![0.5]));
    SceneState::new(
        &config,
        Viewport::new(width, height, device_pixel_ratio),
        fireflies,
    )
}

/// Frame sink around a [`SceneState`] that records what every frame saw.
pub struct RecordingSink {
    pub scene: SceneState,
    /// Portal and fireflies time per rendered frame.
    pub times: Vec<(f32, f32)>,
    pub control_updates: u32,
    pub fail_on_frame: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            scene: test_scene(800, 600, 1.0),
            times: Vec::new(),
            control_updates: 0,
            fail_on_frame: None,
        }
    }
}

impl FrameSink for RecordingSink {
    fn set_elapsed(&mut self, elapsed: f32) {
        self.scene.set_elapsed(elapsed);
    }

    fn update_controls(&mut self) {
        self.control_updates += 1;
        self.scene.update_controls();
    }

    fn render(&mut self) -> anyhow::Result<()> {
        if self.fail_on_frame == Some(self.times.len()) {
            anyhow::bail!("render failed on frame {}", self.times.len());
        }
        self.times
            .push((self.scene.portal.time, self.scene.fireflies_uniform.time));
        Ok(())
    }
}

pub fn portal_graph() -> SceneGraph {
    SceneGraph::new(vec![
        SceneNode::new("Baked").with_meshes(vec![0]),
        SceneNode::new("LampInsides").with_meshes(vec![1]),
        SceneNode::new("LampInsides001").with_meshes(vec![1]),
        SceneNode::new("Circle").with_meshes(vec![2]),
        SceneNode::new("Ground").with_child(SceneNode::new("Rock").with_meshes(vec![0])),
    ])
}

pub const TRIANGLE_POSITIONS: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
pub const TRIANGLE_UVS: [[f32; 2]; 3] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];

/// A binary glTF with one indexed triangle mesh shared by a top-level node per name.
/// The node at index 1 is translated by one unit on x.
pub fn build_glb(node_names: &[&str]) -> Vec<u8> {
    let mut bin: Vec<u8> = Vec::new();
    bin.extend_from_slice(bytemuck::cast_slice(&TRIANGLE_POSITIONS));
    bin.extend_from_slice(bytemuck::cast_slice(&TRIANGLE_UVS));
    bin.extend_from_slice(bytemuck::cast_slice(&[0u32, 1, 2]));

    let nodes: Vec<String> = node_names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let translation = if idx == 1 {
                r#","translation":[1.0,0.0,0.0]"#
            } else {
                ""
            };
            format!(r#"{{"name":"{name}","mesh":0{translation}}}"#)
        })
        .collect();
    let roots: Vec<String> = (0..node_names.len()).map(|idx| idx.to_string()).collect();

    let json = format!(
        r#"{{
            "asset":{{"version":"2.0"}},
            "scene":0,
            "scenes":[{{"nodes":[{roots}]}}],
            "nodes":[{nodes}],
            "meshes":[{{"name":"Triangle","primitives":[{{"attributes":{{"POSITION":0,"TEXCOORD_0":1}},"indices":2}}]}}],
            "buffers":[{{"byteLength":{len}}}],
            "bufferViews":[
                {{"buffer":0,"byteOffset":0,"byteLength":36}},
                {{"buffer":0,"byteOffset":36,"byteLength":24}},
                {{"buffer":0,"byteOffset":60,"byteLength":12}}
            ],
            "accessors":[
                {{"bufferView":0,"componentType":5126,"count":3,"type":"VEC3","min":[0.0,0.0,0.0],"max":[1.0,1.0,0.0]}},
                {{"bufferView":1,"componentType":5126,"count":3,"type":"VEC2"}},
                {{"bufferView":2,"componentType":5125,"count":3,"type":"SCALAR"}}
            ]
        }}"#,
        roots = roots.join(","),
        nodes = nodes.join(","),
        len = bin.len(),
    );

    let mut json = json.into_bytes();
    while json.len() % 4 != 0 {
        json.push(b' ');
    }
    while bin.len() % 4 != 0 {
        bin.push(0);
    }

    let total = 12 + 8 + json.len() + 8 + bin.len();
    let mut glb = Vec::with_capacity(total);
    glb.extend_from_slice(b"glTF");
    glb.extend_from_slice(&2u32.to_le_bytes());
    glb.extend_from_slice(&(total as u32).to_le_bytes());
    glb.extend_from_slice(&(json.len() as u32).to_le_bytes());
    glb.extend_from_slice(b"JSON");
    glb.extend_from_slice(&json);
    glb.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    glb.extend_from_slice(b"BIN\0");
    glb.extend_from_slice(&bin);
    glb
}

/// A glTF document that requires the Draco mesh compression extension.
pub fn draco_gltf() -> Vec<u8> {
    br#"{
        "asset":{"version":"2.0"},
        "extensionsUsed":["KHR_draco_mesh_compression"],
        "extensionsRequired":["KHR_draco_mesh_compression"],
        "scenes":[{"nodes":[]}]
    }"#
    .to_vec()
}

#[cfg(feature = "integration-tests")]
pub fn headless_device() -> (wgpu::Device, wgpu::Queue) {
    let runtime = tokio::runtime::Runtime::new().expect("failed to start a runtime");
    runtime.block_on(async {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .expect("no GPU adapter available");
        portal_scene::context::request_device(&adapter)
            .await
            .expect("failed to create a device")
    })
}
