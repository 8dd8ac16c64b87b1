// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Renderable triangle mesh handed to the exporters

use super::BoundingBox;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Vertex with position and normal
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Point3<f64>,
    pub normal: Vector3<f64>,
}

impl Vertex {
    pub fn new(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self { position, normal }
    }
}

/// Triangle defined by three vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle {
    pub indices: [usize; 3],
}

impl Triangle {
    pub fn new(indices: [usize; 3]) -> Self {
        Self { indices }
    }
}

/// Triangular mesh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Build a mesh from bare positions and index triples, then derive
    /// smooth normals from the triangles.
    pub fn from_indexed(positions: &[Point3<f64>], triangles: &[[usize; 3]]) -> Self {
        let mut mesh = Self::with_capacity(positions.len(), triangles.len());
        for position in positions {
            mesh.add_vertex(Vertex::new(*position, Vector3::z()));
        }
        for indices in triangles {
            mesh.add_triangle(Triangle::new(*indices));
        }
        mesh.recompute_normals();
        mesh
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, vertex: Vertex) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a triangle
    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Compute bounding box
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_vertices(&self.vertices)
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Weld vertices that are within epsilon distance of each other.
    /// Returns the number of vertices removed.
    pub fn weld_vertices(&mut self, epsilon: f64) -> usize {
        if self.vertices.is_empty() {
            return 0;
        }

        let original_count = self.vertices.len();
        let mut new_vertices: Vec<Vertex> = Vec::new();
        let mut new_indices: Vec<usize> = vec![0; original_count];

        for (i, vertex) in self.vertices.iter().enumerate() {
            let found = new_vertices
                .iter()
                .position(|existing| (vertex.position - existing.position).norm() < epsilon);

            new_indices[i] = match found {
                Some(j) => j,
                None => {
                    new_vertices.push(*vertex);
                    new_vertices.len() - 1
                }
            };
        }

        for triangle in &mut self.triangles {
            for index in &mut triangle.indices {
                *index = new_indices[*index];
            }
        }
        // Collapsed triangles would only produce slivers
        self.triangles.retain(|t| {
            let [a, b, c] = t.indices;
            a != b && b != c && a != c
        });

        self.vertices = new_vertices;
        original_count - self.vertices.len()
    }

    /// Recompute vertex normals from triangle geometry, area weighted
    pub fn recompute_normals(&mut self) {
        if self.vertices.is_empty() || self.triangles.is_empty() {
            return;
        }

        let mut normal_sums: Vec<Vector3<f64>> = vec![Vector3::zeros(); self.vertices.len()];

        for triangle in &self.triangles {
            let v0 = &self.vertices[triangle.indices[0]];
            let v1 = &self.vertices[triangle.indices[1]];
            let v2 = &self.vertices[triangle.indices[2]];

            // Unnormalized cross product is already area weighted
            let face_normal = (v1.position - v0.position).cross(&(v2.position - v0.position));
            if face_normal.norm() > 1e-10 {
                for &idx in &triangle.indices {
                    normal_sums[idx] += face_normal;
                }
            }
        }

        for (vertex, sum) in self.vertices.iter_mut().zip(&normal_sums) {
            vertex.normal = sum.try_normalize(1e-12).unwrap_or_else(Vector3::z);
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Mesh {
        Mesh::from_indexed(
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            &[[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn test_from_indexed_normals() {
        let mesh = quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.vertices.iter().all(|v| (v.normal - Vector3::z()).norm() < 1e-12));
    }

    #[test]
    fn test_weld_vertices() {
        // Two triangles with unshared corners along the diagonal
        let mut mesh = Mesh::from_indexed(
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            &[[0, 1, 2], [3, 4, 5]],
        );

        let removed = mesh.weld_vertices(1e-9);
        assert_eq!(removed, 2);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangles[1].indices, [0, 2, 3]);
    }
}
