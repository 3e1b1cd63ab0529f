//! Material bindings.
//!
//! The portal model is authored in a DCC tool and exported with well-known
//! node names. Each of those nodes is drawn with one of three fixed
//! materials; [`bind_materials`] resolves the names and assigns them once,
//! right after the model finished loading.

use crate::{data_structures::scene_graph::SceneGraph, error::SceneError};

/// The three materials of the scene. The GPU pipeline for each lives in
/// [`crate::pipelines`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Material {
    /// Unlit, samples the baked lighting texture.
    Baked,
    /// Flat emissive colour shared by both pole lamps.
    PoleLight,
    /// Time-animated noise blending two colours.
    Portal,
}

/// Node name to material, in binding order.
pub const BINDINGS: [(&str, Material); 4] = [
    ("Baked", Material::Baked),
    ("LampInsides", Material::PoleLight),
    ("LampInsides001", Material::PoleLight),
    ("Circle", Material::Portal),
];

/// Assigns every material in [`BINDINGS`] to its node.
///
/// All names are resolved before anything is assigned, so a missing node
/// leaves the graph untouched and fails with [`SceneError::NodeNotFound`].
pub fn bind_materials(graph: &mut SceneGraph) -> Result<(), SceneError> {
    if let Some((missing, _)) = BINDINGS
        .iter()
        .find(|(name, _)| graph.find_child(name).is_none())
    {
        log::error!("Cannot bind materials: node {missing:?} is missing from the model");
        return Err(SceneError::NodeNotFound(missing.to_string()));
    }

    for (name, material) in BINDINGS {
        if let Some(node) = graph.find_child_mut(name) {
            node.material = Some(material);
            log::debug!("Bound {material:?} to {name}");
        }
    }
    Ok(())
}
