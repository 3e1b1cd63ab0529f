//! Loading of the scene assets: the glTF model and the baked lighting texture.
//!
//! Parsing is split from the GPU upload. [`ModelData`] holds the scene graph
//! and the vertex data in memory; [`load_scene_assets`] fetches both files
//! concurrently, binds the materials and uploads the meshes.

use std::collections::HashMap;

use crate::{
    config::SceneConfig,
    data_structures::{
        model,
        scene_graph::{SceneGraph, SceneNode},
        texture::Texture,
    },
    error::SceneError,
    materials::bind_materials,
    resources::{
        mesh::{MeshData, read_primitive, upload_meshes},
        texture::{load_binary, load_texture},
    },
};

pub mod mesh;
pub mod texture;

const DRACO_EXTENSION: &str = "KHR_draco_mesh_compression";

/// Node names the way three.js exposes them: whitespace becomes `_` and
/// `[ ] . : /` are dropped, so Blender's `LampInsides.001` is `LampInsides001`.
pub fn sanitize_node_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '[' | ']' | '.' | ':' | '/'))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// The parsed model: the graph of the default scene and one [`MeshData`] per primitive.
#[derive(Clone, Debug, Default)]
pub struct ModelData {
    pub graph: SceneGraph,
    pub meshes: Vec<MeshData>,
}

impl ModelData {
    /// Parses a self-contained model (a GLB, or glTF without external buffers).
    pub fn from_slice(bytes: &[u8], file_name: &str) -> anyhow::Result<Self> {
        let gltf = parse(bytes, file_name)?;
        let mut buffers = Vec::new();
        for buffer in gltf.buffers() {
            match buffer.source() {
                gltf::buffer::Source::Bin => buffers.push(blob(&gltf, file_name)?),
                gltf::buffer::Source::Uri(uri) => {
                    return Err(SceneError::asset(
                        file_name,
                        format!("external buffer {uri} needs an asset root"),
                    )
                    .into());
                }
            }
        }
        build(&gltf, &buffers, file_name)
    }
}

/// The uploaded model.
#[derive(Debug)]
pub struct LoadedModel {
    pub graph: SceneGraph,
    pub meshes: Vec<model::Mesh>,
}

pub async fn load_model_data(asset_dir: &str, file_name: &str) -> anyhow::Result<ModelData> {
    let bytes = load_binary(asset_dir, file_name).await?;
    let gltf = parse(&bytes, file_name)?;

    let mut buffers = Vec::new();
    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => buffers.push(blob(&gltf, file_name)?),
            gltf::buffer::Source::Uri(uri) => buffers.push(load_binary(asset_dir, uri).await?),
        }
    }
    build(&gltf, &buffers, file_name)
}

/// Loads model and baked texture concurrently, binds the materials and uploads the meshes.
pub async fn load_scene_assets(
    config: &SceneConfig,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<(LoadedModel, Texture)> {
    let (data, baked) = futures::try_join!(
        load_model_data(&config.asset_dir, &config.model_file),
        load_texture(&config.asset_dir, &config.baked_texture_file, device, queue),
    )?;

    let ModelData { mut graph, meshes } = data;
    bind_materials(&mut graph)?;
    log::info!(
        "Model ready: {} nodes, {} meshes",
        graph.node_count(),
        meshes.len()
    );

    let meshes = upload_meshes(&meshes, device);
    Ok((LoadedModel { graph, meshes }, baked))
}

fn parse(bytes: &[u8], file_name: &str) -> anyhow::Result<gltf::Gltf> {
    // Check for Draco before validation, which only reports a generic unsupported extension.
    let unchecked = gltf::Gltf::from_slice_without_validation(bytes)
        .map_err(|e| SceneError::asset(file_name, e))?;
    if unchecked
        .extensions_required()
        .any(|extension| extension == DRACO_EXTENSION)
    {
        log::error!("{file_name} uses Draco compression");
        return Err(SceneError::asset(
            file_name,
            "Draco-compressed meshes are not supported, export the model without compression",
        )
        .into());
    }
    Ok(gltf::Gltf::from_slice(bytes).map_err(|e| SceneError::asset(file_name, e))?)
}

fn blob(gltf: &gltf::Gltf, file_name: &str) -> anyhow::Result<Vec<u8>> {
    gltf.blob
        .clone()
        .ok_or_else(|| SceneError::asset(file_name, "binary chunk missing").into())
}

fn build(gltf: &gltf::Gltf, buffers: &[Vec<u8>], file_name: &str) -> anyhow::Result<ModelData> {
    let scene = gltf
        .default_scene()
        .or_else(|| gltf.scenes().next())
        .ok_or_else(|| SceneError::asset(file_name, "the model contains no scene"))?;

    let mut meshes = Vec::new();
    let mut mesh_slots = HashMap::new();
    let children = scene
        .nodes()
        .map(|node| to_scene_node(node, buffers, &mut meshes, &mut mesh_slots))
        .collect();

    Ok(ModelData {
        graph: SceneGraph::new(children),
        meshes,
    })
}

fn to_scene_node(
    node: gltf::Node,
    buffers: &[Vec<u8>],
    meshes: &mut Vec<MeshData>,
    mesh_slots: &mut HashMap<usize, Vec<usize>>,
) -> SceneNode {
    let name = sanitize_node_name(node.name().unwrap_or_default());
    let mut scene_node = SceneNode::new(name);
    scene_node.local = node.transform().into();

    if let Some(mesh) = node.mesh() {
        // Nodes sharing a mesh share its uploaded primitives.
        let slots = mesh_slots.entry(mesh.index()).or_insert_with(|| {
            let mesh_name = mesh.name().unwrap_or(&scene_node.name).to_string();
            mesh.primitives()
                .filter(|primitive| {
                    let triangles = primitive.mode() == gltf::mesh::Mode::Triangles;
                    if !triangles {
                        log::warn!(
                            "Skipping {:?} primitive of mesh {mesh_name}",
                            primitive.mode()
                        );
                    }
                    triangles
                })
                .filter_map(|primitive| read_primitive(&mesh_name, &primitive, buffers))
                .map(|data| {
                    meshes.push(data);
                    meshes.len() - 1
                })
                .collect()
        });
        scene_node.meshes = slots.clone();
    }

    scene_node.children = node
        .children()
        .map(|child| to_scene_node(child, buffers, meshes, mesh_slots))
        .collect();
    scene_node
}
