use wgpu::util::DeviceExt;

use crate::data_structures::model;

/// One glTF primitive read into memory, ready to be uploaded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub name: String,
    pub vertices: Vec<model::ModelVertex>,
    pub indices: Vec<u32>,
}

/// Reads positions, the first UV set and indices of `primitive`.
///
/// Missing UVs default to zero; a non-indexed primitive gets a sequential index list.
pub fn read_primitive(
    name: &str,
    primitive: &gltf::Primitive,
    buffers: &[Vec<u8>],
) -> Option<MeshData> {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(Vec::as_slice));

    let mut vertices: Vec<model::ModelVertex> = reader
        .read_positions()?
        .map(|position| model::ModelVertex {
            position,
            tex_coords: Default::default(),
        })
        .collect();

    if let Some(tex_coords) = reader.read_tex_coords(0).map(|v| v.into_f32()) {
        vertices
            .iter_mut()
            .zip(tex_coords)
            .for_each(|(vertex, tex_coords)| vertex.tex_coords = tex_coords);
    }

    let indices = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..vertices.len() as u32).collect(),
    };

    Some(MeshData {
        name: name.to_string(),
        vertices,
        indices,
    })
}

pub fn upload_meshes(meshes: &[MeshData], device: &wgpu::Device) -> Vec<model::Mesh> {
    meshes
        .iter()
        .map(|mesh| {
            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{:?} Vertex Buffer", mesh.name)),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{:?} Index Buffer", mesh.name)),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            model::Mesh {
                name: mesh.name.clone(),
                vertex_buffer,
                index_buffer,
                num_elements: mesh.indices.len() as u32,
            }
        })
        .collect()
}
