// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data handed from the model parser to the renderer

use crate::bounds::BoundingBox;
use nalgebra::{Point3, Vector3};

/// Raw geometry of one product item as produced by the model parser
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryItem {
    /// Express ID of the IFC element
    pub express_id: u32,
    /// Vertex positions (x, y, z triplets)
    pub positions: Vec<f32>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl GeometryItem {
    pub fn new(express_id: u32, positions: Vec<f32>, indices: Vec<u32>) -> Self {
        Self {
            express_id,
            positions,
            indices,
        }
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Check if the item carries no vertex data
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Renderable mesh of a loaded model item
#[derive(Debug, Clone, PartialEq)]
pub struct ModelMesh {
    /// Express ID of the IFC element
    pub express_id: u32,
    /// Vertex positions (x, y, z triplets)
    pub positions: Vec<f32>,
    /// Vertex normals (x, y, z triplets)
    pub normals: Vec<f32>,
    /// Triangle indices
    pub indices: Vec<u32>,
    /// RGBA color [r, g, b, a] in 0-1 range
    pub color: [f32; 4],
}

impl ModelMesh {
    /// Build a renderable mesh from parser output: computes smooth vertex
    /// normals and assigns the item's display color.
    pub fn from_geometry(item: GeometryItem) -> Self {
        let normals = calculate_normals(&item.positions, &item.indices);
        Self {
            express_id: item.express_id,
            color: item_color(item.express_id),
            positions: item.positions,
            normals,
            indices: item.indices,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Bounds of the mesh positions
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_positions(&self.positions)
    }
}

/// Area-weighted vertex normals for an indexed triangle list.
///
/// Triangles referencing out-of-range vertices are skipped; vertices that
/// belong to no valid triangle get a zero normal.
pub fn calculate_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
    let vertex_count = positions.len() / 3;
    let mut normals = vec![Vector3::<f64>::zeros(); vertex_count];

    let vertex = |i: usize| {
        Point3::new(
            positions[i * 3] as f64,
            positions[i * 3 + 1] as f64,
            positions[i * 3 + 2] as f64,
        )
    };

    for triangle in indices.chunks_exact(3) {
        let (i0, i1, i2) = (
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        );
        if i0 >= vertex_count || i1 >= vertex_count || i2 >= vertex_count {
            continue;
        }

        let v0 = vertex(i0);
        let normal = (vertex(i1) - v0).cross(&(vertex(i2) - v0));

        normals[i0] += normal;
        normals[i1] += normal;
        normals[i2] += normal;
    }

    let mut flat = Vec::with_capacity(vertex_count * 3);
    for normal in normals {
        let n = normal
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(Vector3::zeros);
        flat.push(n.x as f32);
        flat.push(n.y as f32);
        flat.push(n.z as f32);
    }
    flat
}

/// Deterministic display color for an item, spread over the hue circle
/// by the golden-ratio step so neighbouring IDs stay distinguishable.
pub fn item_color(express_id: u32) -> [f32; 4] {
    const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;
    let hue = (express_id as f64 * GOLDEN_RATIO_CONJUGATE).fract();
    let [r, g, b] = hsv_to_rgb(hue, 0.55, 0.85);
    [r, g, b, 1.0]
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [f32; 3] {
    let sector = h * 6.0;
    let i = sector.floor();
    let f = sector - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match i as u32 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [r as f32, g as f32, b as f32]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle(id: u32) -> GeometryItem {
        GeometryItem::new(
            id,
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0, 1, 2],
        )
    }

    #[test]
    fn test_triangle_normals_face_up_z() {
        let mesh = ModelMesh::from_geometry(unit_triangle(7));
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.normals, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_out_of_range_indices_are_skipped() {
        let normals = calculate_normals(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0], &[0, 1, 5]);
        assert_eq!(normals, vec![0.0; 6]);
    }

    #[test]
    fn test_item_color_is_stable_and_opaque() {
        let a = item_color(42);
        assert_eq!(a, item_color(42));
        assert_eq!(a[3], 1.0);
        assert!(a[..3].iter().all(|c| (0.0..=1.0).contains(c)));
        assert_ne!(item_color(42), item_color(43));
    }

    #[test]
    fn test_mesh_bounds() {
        let mesh = ModelMesh::from_geometry(unit_triangle(1));
        let bounds = mesh.bounds();
        assert_eq!(bounds.max_dimension(), 1.0);
    }
}
