// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Accumulated tessellation result

use crate::geometry::{BoundingBox, Mesh, SurfaceKind};
use crate::sat::{EntityId, Sense};
use nalgebra::{Point2, Point3};
use serde::Serialize;

/// Per-face bookkeeping: which slice of the output a face produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceMeta {
    pub face: EntityId,
    pub surface: SurfaceKind,
    pub sense: Sense,
    /// Loops with at least three distinct points
    pub loop_count: usize,
    pub first_vertex: usize,
    pub vertex_count: usize,
    pub first_triangle: usize,
    pub triangle_count: usize,
}

/// World-space triangles, 2D loop outlines, and face metadata of one
/// SAT payload
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SatMesh {
    pub vertices: Vec<Point3<f64>>,
    pub triangles: Vec<[usize; 3]>,
    /// One XY-projected polyline per traversed loop
    pub outlines: Vec<Vec<Point2<f64>>>,
    pub faces: Vec<FaceMeta>,
}

impl SatMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, position: Point3<f64>) -> usize {
        self.vertices.push(position);
        self.vertices.len() - 1
    }

    pub fn add_triangle(&mut self, indices: [usize; 3]) {
        self.triangles.push(indices);
    }

    /// Record a loop outline, dropping Z
    pub fn add_outline(&mut self, points: &[Point3<f64>]) {
        self.outlines
            .push(points.iter().map(|p| Point2::new(p.x, p.y)).collect());
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// True when no triangle was produced
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.vertices)
    }

    /// Renderable mesh with smooth normals
    pub fn to_mesh(&self) -> Mesh {
        Mesh::from_indexed(&self.vertices, &self.triangles)
    }
}
