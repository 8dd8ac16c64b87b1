// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! SAT text builder shared by the integration tests
//!
//! Records are numbered by position, so every method returns the id of the
//! record it wrote. Forward links are handled by reserving ids first.

#![allow(dead_code)]

use std::path::PathBuf;

pub const HEADER: &str = "700 0 1 0\n@7 satmesh @11 ACIS 7.0 NT @24 Mon Jan 01 00:00:00 2024\n1 9.9999999999999995e-007 1e-010\n";

pub type P = [f64; 3];

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

pub fn fixture_text(name: &str) -> String {
    std::fs::read_to_string(fixture(name)).expect("fixture exists")
}

fn ptr(id: Option<usize>) -> String {
    match id {
        Some(id) => format!("${}", id),
        None => "$-1".to_string(),
    }
}

fn xyz(p: P) -> String {
    format!("{} {} {}", p[0], p[1], p[2])
}

/// Parts of a face that are written once its position in a chain is known
#[derive(Debug, Clone, Copy)]
pub struct FaceParts {
    pub loop_ref: Option<usize>,
    pub surface: Option<usize>,
    pub reversed: bool,
}

impl FaceParts {
    pub fn new(loop_ref: Option<usize>, surface: Option<usize>) -> Self {
        Self {
            loop_ref,
            surface,
            reversed: false,
        }
    }

    pub fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }
}

#[derive(Default)]
pub struct SatWriter {
    records: Vec<Option<String>>,
}

impl SatWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reserve(&mut self) -> usize {
        self.records.push(None);
        self.records.len() - 1
    }

    pub fn set(&mut self, id: usize, record: String) {
        self.records[id] = Some(record);
    }

    pub fn record(&mut self, record: impl Into<String>) -> usize {
        let id = self.reserve();
        self.set(id, record.into());
        id
    }

    pub fn point(&mut self, p: P) -> usize {
        self.record(format!("point $-1 {} #", xyz(p)))
    }

    pub fn vertex(&mut self, p: P) -> usize {
        let point = self.point(p);
        self.record(format!("vertex $-1 $-1 ${} #", point))
    }

    pub fn straight(&mut self, from: P, to: P) -> usize {
        let dir = [to[0] - from[0], to[1] - from[1], to[2] - from[2]];
        self.record(format!("straight-curve $-1 {} {} I I #", xyz(from), xyz(dir)))
    }

    pub fn ellipse(&mut self, center: P, normal: P, major: P, ratio: f64) -> usize {
        self.record(format!(
            "ellipse-curve $-1 {} {} {} {} I I #",
            xyz(center),
            xyz(normal),
            xyz(major),
            ratio
        ))
    }

    pub fn intcurve(&mut self) -> usize {
        self.record("intcurve-curve $-1 forward { exactcur nubs 3 open 2 0 1 } I I #")
    }

    pub fn edge(&mut self, start: usize, end: usize, curve: Option<usize>) -> usize {
        self.record(format!(
            "edge $-1 ${} ${} $-1 {} forward #",
            start,
            end,
            ptr(curve)
        ))
    }

    /// Loop over `(edge, reversed)` coedges, linked into a ring
    pub fn face_loop(&mut self, coedges: &[(usize, bool)], next: Option<usize>) -> usize {
        let loop_id = self.reserve();
        let first = self.records.len();
        let n = coedges.len();
        for (i, &(edge, reversed)) in coedges.iter().enumerate() {
            self.record(format!(
                "coedge $-1 ${} ${} $-1 ${} ${} {} #",
                first + (i + 1) % n,
                first + (i + n - 1) % n,
                edge,
                loop_id,
                if reversed { "reversed" } else { "forward" }
            ));
        }
        self.set(loop_id, format!("loop $-1 {} ${} $-1 #", ptr(next), first));
        loop_id
    }

    /// Polygon loop with straight edges between consecutive corners
    pub fn polygon(&mut self, corners: &[P], next: Option<usize>) -> usize {
        let vertices: Vec<usize> = corners.iter().map(|&p| self.vertex(p)).collect();
        let n = corners.len();
        let edges: Vec<(usize, bool)> = (0..n)
            .map(|i| {
                let curve = self.straight(corners[i], corners[(i + 1) % n]);
                (self.edge(vertices[i], vertices[(i + 1) % n], Some(curve)), false)
            })
            .collect();
        self.face_loop(&edges, next)
    }

    pub fn plane(&mut self, origin: P, normal: P) -> usize {
        self.record(format!("plane-surface $-1 {} {} forward_v I I I I #", xyz(origin), xyz(normal)))
    }

    pub fn sphere(&mut self, center: P, radius: f64) -> usize {
        self.record(format!(
            "sphere-surface $-1 {} {} 1 0 0 0 0 1 forward_v I I I I #",
            xyz(center),
            radius
        ))
    }

    pub fn cone(&mut self, origin: P, axis: P, major: P, half_angle: f64) -> usize {
        self.record(format!(
            "cone-surface $-1 {} {} {} 1 I I {} {} 1 forward I I I I #",
            xyz(origin),
            xyz(axis),
            xyz(major),
            half_angle.sin(),
            half_angle.cos()
        ))
    }

    pub fn torus(&mut self, center: P, axis: P, major: f64, minor: f64) -> usize {
        self.record(format!(
            "torus-surface $-1 {} {} {} {} 1 0 0 forward_v I I I I #",
            xyz(center),
            xyz(axis),
            major,
            minor
        ))
    }

    pub fn spline(&mut self) -> usize {
        self.record("spline-surface $-1 forward { exactsur nubs 1 1 both open open none none 2 2 0 1 0 1 0 0 0 1 0 0 0 1 0 1 1 0 } I I I I #")
    }

    pub fn translation(&mut self, offset: P) -> usize {
        self.record(format!(
            "transform $-1 1 0 0 0 1 0 0 0 1 {} 1 no_rotate no_reflect no_shear #",
            xyz(offset)
        ))
    }

    /// Faces linked in one chain, not owned by any shell
    pub fn faces(&mut self, faces: &[FaceParts], shell: Option<usize>) -> Option<usize> {
        let ids: Vec<usize> = faces.iter().map(|_| self.reserve()).collect();
        for (i, face) in faces.iter().enumerate() {
            self.set(
                ids[i],
                format!(
                    "face $-1 {} {} {} $-1 {} {} single #",
                    ptr(ids.get(i + 1).copied()),
                    ptr(face.loop_ref),
                    ptr(shell),
                    ptr(face.surface),
                    if face.reversed { "reversed" } else { "forward" }
                ),
            );
        }
        ids.first().copied()
    }

    /// body → lump → shell → faces
    pub fn body(&mut self, faces: &[FaceParts], transform: Option<usize>) -> usize {
        let body = self.reserve();
        let lump = self.reserve();
        let shell = self.reserve();
        let first_face = self.faces(faces, Some(shell));
        self.set(body, format!("body $-1 ${} $-1 {} #", lump, ptr(transform)));
        self.set(lump, format!("lump $-1 $-1 ${} ${} #", shell, body));
        self.set(shell, format!("shell $-1 $-1 $-1 {} $-1 ${} #", ptr(first_face), lump));
        body
    }

    pub fn finish(&self) -> String {
        let mut text = HEADER.to_string();
        for record in &self.records {
            text.push_str(record.as_deref().unwrap_or("null-record $-1 #"));
            text.push('\n');
        }
        text.push_str("End-of-ACIS-data\n");
        text
    }
}

/// Counter-clockwise regular polygon in the XY plane
pub fn regular_polygon(n: usize, radius: f64) -> Vec<P> {
    (0..n)
        .map(|i| {
            let a = i as f64 * std::f64::consts::TAU / n as f64;
            [radius * a.cos(), radius * a.sin(), 0.0]
        })
        .collect()
}

/// Single planar triangle inside a body
pub fn triangle_sat() -> String {
    let mut sat = SatWriter::new();
    let lp = sat.polygon(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]], None);
    let plane = sat.plane([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
    sat.body(&[FaceParts::new(Some(lp), Some(plane))], None);
    sat.finish()
}
