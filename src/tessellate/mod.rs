// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Topology traversal and mesh assembly
//!
//! Bodies are walked body → lump → shell → face, each level through its
//! `next` chain. Every face is sampled into boundary loops and filled
//! according to its surface kind.

pub mod loops;
mod output;
pub mod surfaces;

pub use output::{FaceMeta, SatMesh};

use crate::config::TessellationConfig;
use crate::error::SatError;
use crate::geometry::{Surface, SurfaceKind};
use crate::sat::{EntityArena, EntityId};
use crate::utils::math::{is_finite_point, transform_point};
use nalgebra::Matrix4;
use surfaces::Grid;
use tracing::{debug, trace};

/// Turns the entities of one arena into a [`SatMesh`]
pub struct Tessellator<'a> {
    arena: &'a EntityArena,
    config: &'a TessellationConfig,
    mesh: SatMesh,
    /// First face dropped for producing non-finite vertices
    rejected: Option<EntityId>,
}

impl<'a> Tessellator<'a> {
    pub fn new(arena: &'a EntityArena, config: &'a TessellationConfig) -> Self {
        Self {
            arena,
            config,
            mesh: SatMesh::new(),
            rejected: None,
        }
    }

    /// Tessellate every body. When that produces no triangles, start over
    /// and tessellate every face entity directly with an identity transform.
    ///
    /// Faces that evaluate to non-finite coordinates are dropped. The result
    /// is `NonFiniteVertex` only when such a face was dropped and nothing
    /// else produced triangles.
    pub fn run(mut self) -> Result<SatMesh, SatError> {
        let bodies: Vec<EntityId> = self.arena.bodies().collect();
        for &body in &bodies {
            self.tessellate_body(body);
        }

        if self.mesh.is_empty() {
            debug!(bodies = bodies.len(), "no triangles from bodies, tessellating standalone faces");
            self.mesh = SatMesh::new();
            let identity = Matrix4::identity();
            let faces: Vec<EntityId> = self.arena.faces().collect();
            for face in faces {
                self.tessellate_face(face, &identity);
            }
        }

        if self.mesh.is_empty() {
            return Err(match self.rejected {
                Some(face) => SatError::NonFiniteVertex { face },
                None => SatError::NoGeometry,
            });
        }
        debug!(
            vertices = self.mesh.vertex_count(),
            triangles = self.mesh.triangle_count(),
            faces = self.mesh.faces.len(),
            "tessellation complete"
        );
        Ok(self.mesh)
    }

    fn tessellate_body(&mut self, body_id: EntityId) {
        let arena = self.arena;
        let Some(body) = arena.body(Some(body_id)) else {
            return;
        };
        let transform = arena.transform_matrix(body.transform);

        let lumps = arena.chain(body.lump, |arena, id| arena.lump(Some(id)).map(|l| l.next));
        for lump_id in lumps {
            let Some(lump) = arena.lump(Some(lump_id)) else {
                continue;
            };
            let shells = arena.chain(lump.shell, |arena, id| arena.shell(Some(id)).map(|s| s.next));
            for shell_id in shells {
                let Some(shell) = arena.shell(Some(shell_id)) else {
                    continue;
                };
                let faces = arena.chain(shell.face, |arena, id| arena.face(Some(id)).map(|f| f.next));
                for face_id in faces {
                    self.tessellate_face(face_id, &transform);
                }
            }
        }
    }

    fn tessellate_face(&mut self, face_id: EntityId, transform: &Matrix4<f64>) {
        let arena = self.arena;
        let Some(face) = arena.face(Some(face_id)) else {
            return;
        };

        let loops = loops::face_loops(arena, face, self.config.edge_segments());
        let surface = arena.surface(face.surface);
        let first_vertex = self.mesh.vertex_count();
        let first_triangle = self.mesh.triangle_count();
        let first_outline = self.mesh.outlines.len();

        for points in &loops {
            let world: Vec<_> = points.iter().map(|p| transform_point(transform, p)).collect();
            self.mesh.add_outline(&world);
        }

        let resolution = Grid {
            u_segments: self.config.u_segments(),
            v_segments: self.config.v_segments(),
        };
        let mesh = &mut self.mesh;
        match surface {
            Some(Surface::Cone(cone)) => surfaces::cone(mesh, cone, resolution, transform, face.sense),
            Some(Surface::Sphere(sphere)) => {
                surfaces::sphere(mesh, sphere, resolution, transform, face.sense)
            }
            Some(Surface::Torus(torus)) => {
                surfaces::torus(mesh, torus, resolution, transform, face.sense)
            }
            // Planes fill their outer loop; other surfaces reuse it as a flat fill
            Some(Surface::Plane(_)) | Some(Surface::Spline(_)) | None => {
                if let Some(outer) = loops.first() {
                    surfaces::fan(mesh, outer, transform, face.sense);
                }
            }
        }

        if !self.mesh.vertices[first_vertex..].iter().all(is_finite_point) {
            // Roll the face back so its neighbours still render
            self.mesh.vertices.truncate(first_vertex);
            self.mesh.triangles.truncate(first_triangle);
            self.mesh.outlines.truncate(first_outline);
            self.rejected.get_or_insert(face_id);
            debug!(face = face_id, "dropped face with non-finite vertices");
            return;
        }

        let meta = FaceMeta {
            face: face_id,
            surface: surface.map_or(SurfaceKind::Unknown, Surface::kind),
            sense: face.sense,
            loop_count: loops.len(),
            first_vertex,
            vertex_count: self.mesh.vertex_count() - first_vertex,
            first_triangle,
            triangle_count: self.mesh.triangle_count() - first_triangle,
        };
        trace!(face = face_id, surface = ?meta.surface, triangles = meta.triangle_count, "tessellated face");
        self.mesh.faces.push(meta);
    }
}
