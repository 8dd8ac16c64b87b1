// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Boundary sampling: edges, coedge rings, and face loops

use crate::sat::{EntityArena, EntityId, EntityRef, Face};
use crate::utils::math::POINT_EPSILON;
use nalgebra::Point3;

/// Polyline of one edge in its own direction.
///
/// Curve samples are taken between the edge parameters and their endpoints
/// are snapped to the resolved vertex positions. When the curve is missing or
/// yields nothing, the result is the vertex-to-vertex chord (shorter when a
/// vertex does not resolve).
pub fn edge_polyline(arena: &EntityArena, edge_id: EntityRef, segments: usize) -> Vec<Point3<f64>> {
    let Some(edge) = arena.edge(edge_id) else {
        return Vec::new();
    };
    let start = arena.vertex_position(edge.start_vertex);
    let end = arena.vertex_position(edge.end_vertex);

    let mut points = arena
        .curve(edge.curve)
        .map(|curve| curve.sample(edge.start_param, edge.end_param, segments))
        .unwrap_or_default();

    if points.is_empty() {
        return start.into_iter().chain(end).collect();
    }

    if let (Some(first), Some(start)) = (points.first_mut(), start) {
        *first = start;
    }
    if let (Some(last), Some(end)) = (points.last_mut(), end) {
        *last = end;
    }
    points
}

/// Polyline of a coedge, reversed when the coedge runs against its edge
pub fn coedge_polyline(arena: &EntityArena, coedge_id: EntityId, segments: usize) -> Vec<Point3<f64>> {
    let Some(coedge) = arena.coedge(Some(coedge_id)) else {
        return Vec::new();
    };
    let mut points = edge_polyline(arena, coedge.edge, segments);
    if coedge.sense.is_reversed() {
        points.reverse();
    }
    points
}

/// Walk a loop's coedge ring and concatenate the coedge polylines.
///
/// The ring ends on returning to the first coedge, on any revisit, or at a
/// link that does not resolve to a coedge. The result is deduplicated.
pub fn loop_polyline(arena: &EntityArena, loop_id: EntityId, segments: usize) -> Vec<Point3<f64>> {
    let Some(face_loop) = arena.face_loop(Some(loop_id)) else {
        return Vec::new();
    };
    let Some(first) = face_loop.coedge else {
        return Vec::new();
    };

    let ring = arena.chain(Some(first), |arena, id| {
        arena
            .coedge(Some(id))
            .map(|coedge| coedge.next.filter(|&next| next != first))
    });

    let mut points = Vec::new();
    for coedge_id in ring {
        points.extend(coedge_polyline(arena, coedge_id, segments));
    }
    dedupe_polyline(points)
}

/// Drop consecutive points closer than [`POINT_EPSILON`], and a closing
/// point that repeats the first
pub fn dedupe_polyline(points: Vec<Point3<f64>>) -> Vec<Point3<f64>> {
    let mut unique: Vec<Point3<f64>> = Vec::with_capacity(points.len());
    for point in points {
        match unique.last() {
            Some(last) if (point - last).norm() < POINT_EPSILON => {}
            _ => unique.push(point),
        }
    }
    if unique.len() > 1 {
        if let (Some(first), Some(last)) = (unique.first(), unique.last()) {
            if (last - first).norm() < POINT_EPSILON {
                unique.pop();
            }
        }
    }
    unique
}

/// Model-space polylines of every usable loop on a face, outer loop first.
///
/// A loop is usable when at least three distinct points remain.
pub fn face_loops(arena: &EntityArena, face: &Face, segments: usize) -> Vec<Vec<Point3<f64>>> {
    arena
        .chain(face.loop_ref, |arena, id| arena.face_loop(Some(id)).map(|l| l.next))
        .map(|loop_id| loop_polyline(arena, loop_id, segments))
        .filter(|points| points.len() >= 3)
        .collect()
}
