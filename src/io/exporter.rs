// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL exporters

use crate::geometry::{Mesh, Triangle};
use anyhow::{Context, Result};
use nalgebra::Vector3;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Export mesh to binary STL
pub fn export_stl(mesh: &Mesh, path: &Path) -> Result<()> {
    use stl_io::{Normal, Triangle as StlTriangle, Vertex as StlVertex};

    let triangles: Vec<StlTriangle> = mesh
        .triangles
        .iter()
        .map(|tri| {
            let normal = facet_normal(mesh, tri);
            let [v0, v1, v2] = tri.indices.map(|i| mesh.vertices[i].position);

            StlTriangle {
                normal: Normal::new([normal.x as f32, normal.y as f32, normal.z as f32]),
                vertices: [
                    StlVertex::new([v0.x as f32, v0.y as f32, v0.z as f32]),
                    StlVertex::new([v1.x as f32, v1.y as f32, v1.z as f32]),
                    StlVertex::new([v2.x as f32, v2.y as f32, v2.z as f32]),
                ],
            }
        })
        .collect();

    let mut file = BufWriter::new(File::create(path).context("Failed to create STL file")?);

    stl_io::write_stl(&mut file, triangles.iter()).context("Failed to write STL file")?;

    Ok(())
}

/// Export mesh to ASCII STL
pub fn export_stl_ascii(mesh: &Mesh, path: &Path) -> Result<()> {
    let mut file = BufWriter::new(File::create(path).context("Failed to create STL file")?);

    writeln!(file, "solid satmesh")?;

    for tri in &mesh.triangles {
        let normal = facet_normal(mesh, tri);
        writeln!(file, "  facet normal {} {} {}", normal.x, normal.y, normal.z)?;
        writeln!(file, "    outer loop")?;
        for &i in &tri.indices {
            let p = mesh.vertices[i].position;
            writeln!(file, "      vertex {} {} {}", p.x, p.y, p.z)?;
        }
        writeln!(file, "    endloop")?;
        writeln!(file, "  endfacet")?;
    }

    writeln!(file, "endsolid satmesh")?;
    file.flush()?;

    Ok(())
}

/// Geometric facet normal, falling back to the averaged vertex normals for
/// degenerate triangles
fn facet_normal(mesh: &Mesh, tri: &Triangle) -> Vector3<f64> {
    let [v0, v1, v2] = tri.indices.map(|i| &mesh.vertices[i]);
    (v1.position - v0.position)
        .cross(&(v2.position - v0.position))
        .try_normalize(1e-12)
        .unwrap_or_else(|| (v0.normal + v1.normal + v2.normal) / 3.0)
}
