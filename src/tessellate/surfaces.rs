// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Per-surface triangle generation
//!
//! Every generator writes world-space vertices straight into the output.
//! Forward faces wind counter-clockwise seen from the side the surface
//! normal points to; reversed faces wind the other way.

use super::output::SatMesh;
use crate::geometry::{Cone, Sphere, Torus};
use crate::sat::Sense;
use crate::utils::math::transform_point;
use nalgebra::{Matrix4, Point3};
use std::f64::consts::{PI, TAU};

/// Regular (u, v) grid resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub u_segments: usize,
    pub v_segments: usize,
}

impl Grid {
    pub fn vertex_count(&self) -> usize {
        (self.u_segments + 1) * (self.v_segments + 1)
    }
}

/// Fan-triangulate a polygon from its first vertex
pub fn fan(mesh: &mut SatMesh, polygon: &[Point3<f64>], transform: &Matrix4<f64>, sense: Sense) {
    if polygon.len() < 3 {
        return;
    }
    let base = mesh.vertex_count();
    for point in polygon {
        mesh.add_vertex(transform_point(transform, point));
    }
    for i in 1..polygon.len() - 1 {
        let (b, c) = (base + i, base + i + 1);
        if sense.is_reversed() {
            mesh.add_triangle([base, c, b]);
        } else {
            mesh.add_triangle([base, b, c]);
        }
    }
}

/// Tessellate a parametric grid. `eval` takes fractions in `[0, 1]`, and
/// the forward winding follows `d/du x d/dv`. With `collapsed_poles` the
/// first and last rows are taken to be single points, and the triangles
/// that would degenerate there are skipped.
fn grid<F>(
    mesh: &mut SatMesh,
    resolution: Grid,
    transform: &Matrix4<f64>,
    sense: Sense,
    collapsed_poles: bool,
    eval: F,
) where
    F: Fn(f64, f64) -> Point3<f64>,
{
    let Grid {
        u_segments,
        v_segments,
    } = resolution;
    let base = mesh.vertex_count();
    let stride = u_segments + 1;

    for j in 0..=v_segments {
        let v = j as f64 / v_segments as f64;
        for i in 0..=u_segments {
            let u = i as f64 / u_segments as f64;
            mesh.add_vertex(transform_point(transform, &eval(u, v)));
        }
    }

    let reversed = sense.is_reversed();
    for j in 0..v_segments {
        for i in 0..u_segments {
            let a = base + j * stride + i;
            let b = a + 1;
            let c = a + stride + 1;
            let d = a + stride;

            if !(collapsed_poles && j == 0) {
                mesh.add_triangle(if reversed { [a, c, b] } else { [a, b, c] });
            }
            if !(collapsed_poles && j == v_segments - 1) {
                mesh.add_triangle(if reversed { [a, d, c] } else { [a, c, d] });
            }
        }
    }
}

/// Lateral grid of a cone or cylinder, from the origin ring along the axis
pub fn cone(mesh: &mut SatMesh, cone: &Cone, resolution: Grid, transform: &Matrix4<f64>, sense: Sense) {
    grid(mesh, resolution, transform, sense, false, |u, v| {
        cone.point_at(u * TAU, v)
    });
}

/// Latitude/longitude grid from the south pole to the north pole
pub fn sphere(mesh: &mut SatMesh, sphere: &Sphere, resolution: Grid, transform: &Matrix4<f64>, sense: Sense) {
    grid(mesh, resolution, transform, sense, true, |u, v| {
        sphere.point_at(u * TAU, PI - v * PI)
    });
}

pub fn torus(mesh: &mut SatMesh, torus: &Torus, resolution: Grid, transform: &Matrix4<f64>, sense: Sense) {
    grid(mesh, resolution, transform, sense, false, |u, v| {
        torus.point_at(u * TAU, v * TAU)
    });
}
