use portal_scene::{
    SceneError,
    materials::{Material, bind_materials},
    resources::{ModelData, sanitize_node_name},
};

use crate::common::test_utils::{TRIANGLE_POSITIONS, TRIANGLE_UVS, build_glb, draco_gltf};

mod common;

const PORTAL_NODES: [&str; 4] = ["Baked", "LampInsides", "LampInsides.001", "Circle"];

#[test]
fn should_read_nodes_of_the_default_scene() {
    let model = ModelData::from_slice(&build_glb(&PORTAL_NODES), "portal.glb").unwrap();

    let names: Vec<&str> = model
        .graph
        .children
        .iter()
        .map(|child| child.name.as_str())
        .collect();
    assert_eq!(names, vec!["Baked", "LampInsides", "LampInsides001", "Circle"]);
}

#[test]
fn should_share_primitives_between_nodes_using_the_same_mesh() {
    let model = ModelData::from_slice(&build_glb(&PORTAL_NODES), "portal.glb").unwrap();

    assert_eq!(model.meshes.len(), 1);
    for child in &model.graph.children {
        assert_eq!(child.meshes, vec![0]);
    }
}

#[test]
fn should_read_positions_uvs_and_indices() {
    let model = ModelData::from_slice(&build_glb(&["Baked"]), "portal.glb").unwrap();
    let mesh = &model.meshes[0];

    assert_eq!(mesh.name, "Triangle");
    assert_eq!(mesh.indices, vec![0, 1, 2]);
    let positions: Vec<[f32; 3]> = mesh.vertices.iter().map(|v| v.position).collect();
    let uvs: Vec<[f32; 2]> = mesh.vertices.iter().map(|v| v.tex_coords).collect();
    assert_eq!(positions, TRIANGLE_POSITIONS.to_vec());
    assert_eq!(uvs, TRIANGLE_UVS.to_vec());
}

#[test]
fn should_keep_node_transforms() {
    let model = ModelData::from_slice(&build_glb(&PORTAL_NODES), "portal.glb").unwrap();

    let lamp = model.graph.find_child("LampInsides").unwrap();
    assert_eq!(lamp.local.position, [1.0, 0.0, 0.0].into());
    let baked = model.graph.find_child("Baked").unwrap();
    assert_eq!(baked.local.position, [0.0, 0.0, 0.0].into());
}

#[test]
fn should_bind_materials_on_a_loaded_model() {
    let mut model = ModelData::from_slice(&build_glb(&PORTAL_NODES), "portal.glb").unwrap();

    bind_materials(&mut model.graph).unwrap();

    let circle = model.graph.find_child("Circle").unwrap();
    assert_eq!(circle.material, Some(Material::Portal));
    let lamp = model.graph.find_child("LampInsides001").unwrap();
    assert_eq!(lamp.material, Some(Material::PoleLight));
}

#[test]
fn should_report_the_missing_node_of_an_incomplete_model() {
    let mut model =
        ModelData::from_slice(&build_glb(&["Baked", "LampInsides", "Circle"]), "portal.glb")
            .unwrap();

    let err = bind_materials(&mut model.graph).unwrap_err();

    assert_eq!(err, SceneError::NodeNotFound("LampInsides001".to_string()));
}

#[test]
fn should_reject_draco_compressed_models() {
    let err = ModelData::from_slice(&draco_gltf(), "portal.glb").unwrap_err();

    match err.downcast_ref::<SceneError>() {
        Some(SceneError::AssetLoad { asset, reason }) => {
            assert_eq!(asset, "portal.glb");
            assert!(reason.contains("Draco"), "reason = {reason}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn should_reject_garbage_as_asset_error() {
    let err = ModelData::from_slice(b"definitely not a model", "portal.glb").unwrap_err();

    assert!(matches!(
        err.downcast_ref::<SceneError>(),
        Some(SceneError::AssetLoad { .. })
    ));
}

#[test]
fn should_sanitize_node_names_like_three_js() {
    assert_eq!(sanitize_node_name("LampInsides.001"), "LampInsides001");
    assert_eq!(sanitize_node_name("Portal Frame"), "Portal_Frame");
    assert_eq!(sanitize_node_name("a[0]:b/c"), "a0bc");
    assert_eq!(sanitize_node_name("Circle"), "Circle");
}
