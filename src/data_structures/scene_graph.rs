//! Scene graph of the loaded model.
//!
//! The graph is plain data: node names, local transforms, indices into the
//! mesh list owned by the loader and the material slot the binder fills in.
//! Keeping GPU buffers out of the nodes lets the binding rules be exercised
//! without a device.

use crate::{data_structures::instance::Instance, materials::Material};

#[derive(Clone, Debug, Default)]
pub struct SceneNode {
    pub name: String,
    pub local: Instance,
    /// Indices into the loader's mesh list, one per glTF primitive.
    pub meshes: Vec<usize>,
    pub material: Option<Material>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_meshes(mut self, meshes: Vec<usize>) -> Self {
        self.meshes = meshes;
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }
}

/// A node reached by [`SceneGraph::visit`], with its accumulated world transform.
pub struct Visited<'a> {
    pub node: &'a SceneNode,
    pub world: Instance,
    /// Material of the closest ancestor (or the node itself) that has one.
    pub material: Option<Material>,
}

/// The children of the loaded glTF scene.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    pub children: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new(children: Vec<SceneNode>) -> Self {
        Self { children }
    }

    /// Exact-name lookup among the top-level children.
    pub fn find_child(&self, name: &str) -> Option<&SceneNode> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn find_child_mut(&mut self, name: &str) -> Option<&mut SceneNode> {
        self.children.iter_mut().find(|child| child.name == name)
    }

    /// Depth-first walk over every node, parents before children.
    pub fn visit<'a>(&'a self, f: &mut dyn FnMut(Visited<'a>)) {
        fn walk<'a>(
            node: &'a SceneNode,
            parent: &Instance,
            inherited: Option<Material>,
            f: &mut dyn FnMut(Visited<'a>),
        ) {
            let world = parent * &node.local;
            let material = node.material.or(inherited);
            f(Visited {
                node,
                world,
                material,
            });
            for child in &node.children {
                walk(child, &world, material, f);
            }
        }

        let root = Instance::default();
        for child in &self.children {
            walk(child, &root, None, f);
        }
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.visit(&mut |_| count += 1);
        count
    }
}
