// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene abstraction over the host renderer
//!
//! The renderer owns its scene graph. The viewer only needs to add model
//! meshes, drop the previously loaded model, and read back the model
//! geometry to compute bounds. Helper objects (grid, lights) are not model
//! geometry and survive [`Scene::clear_model`].

use crate::bounds::BoundingBox;
use crate::mesh::ModelMesh;

/// Host scene receiving loaded model geometry
pub trait Scene {
    /// Add a mesh tagged as loaded-model geometry
    fn add_mesh(&mut self, mesh: ModelMesh);

    /// Remove every object tagged as loaded-model geometry
    fn clear_model(&mut self);

    /// Iterate over the loaded-model meshes
    fn model_meshes(&self) -> Box<dyn Iterator<Item = &ModelMesh> + '_>;

    /// Union of the extents of all loaded-model meshes
    fn model_bounds(&self) -> BoundingBox {
        self.model_meshes()
            .fold(BoundingBox::empty(), |bounds, mesh| bounds.union(&mesh.bounds()))
    }
}

/// In-memory scene holding model meshes for a renderer to draw
#[derive(Debug, Clone, Default)]
pub struct MeshScene {
    meshes: Vec<ModelMesh>,
}

impl MeshScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of loaded meshes
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Mesh by insertion index
    pub fn get(&self, index: usize) -> Option<&ModelMesh> {
        self.meshes.get(index)
    }

    /// Total vertex count across all meshes
    pub fn total_vertices(&self) -> usize {
        self.meshes.iter().map(|m| m.vertex_count()).sum()
    }

    /// Total triangle count across all meshes
    pub fn total_triangles(&self) -> usize {
        self.meshes.iter().map(|m| m.triangle_count()).sum()
    }
}

impl Scene for MeshScene {
    fn add_mesh(&mut self, mesh: ModelMesh) {
        self.meshes.push(mesh);
    }

    fn clear_model(&mut self) {
        self.meshes.clear();
    }

    fn model_meshes(&self) -> Box<dyn Iterator<Item = &ModelMesh> + '_> {
        Box::new(self.meshes.iter())
    }
}
