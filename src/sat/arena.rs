// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Id-indexed entity store for one parse

use super::entity::{
    Body, Coedge, Edge, Entity, EntityId, EntityKind, EntityRef, Face, Lump, Loop, Shell, Vertex,
};
use crate::geometry::{Curve, Surface};
use ahash::AHashMap;
use nalgebra::{Matrix4, Point3};
use std::collections::BTreeMap;
use tracing::trace;

/// Entities of one SAT payload, indexed by id.
///
/// Ids are dense and equal to the insertion position, so lookups are plain
/// indexing. Every typed accessor returns `None` for null, dangling, and
/// wrong-kind references alike.
#[derive(Debug, Default)]
pub struct EntityArena {
    entities: Vec<Entity>,
    transforms: AHashMap<EntityId, Matrix4<f64>>,
}

impl EntityArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an entity. Ids must arrive in sequence.
    pub fn insert(&mut self, entity: Entity) {
        debug_assert_eq!(entity.id, self.entities.len(), "entity ids must be sequential");
        if let EntityKind::Transform(transform) = &entity.kind {
            self.transforms.insert(entity.id, transform.matrix);
        }
        self.entities.push(entity);
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: EntityRef) -> Option<&Entity> {
        self.entities.get(id?)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    fn kind(&self, id: EntityRef) -> Option<&EntityKind> {
        self.get(id).map(|e| &e.kind)
    }

    pub fn body(&self, id: EntityRef) -> Option<&Body> {
        match self.kind(id)? {
            EntityKind::Body(body) => Some(body),
            _ => None,
        }
    }

    pub fn lump(&self, id: EntityRef) -> Option<&Lump> {
        match self.kind(id)? {
            EntityKind::Lump(lump) => Some(lump),
            _ => None,
        }
    }

    pub fn shell(&self, id: EntityRef) -> Option<&Shell> {
        match self.kind(id)? {
            EntityKind::Shell(shell) => Some(shell),
            _ => None,
        }
    }

    pub fn face(&self, id: EntityRef) -> Option<&Face> {
        match self.kind(id)? {
            EntityKind::Face(face) => Some(face),
            _ => None,
        }
    }

    pub fn face_loop(&self, id: EntityRef) -> Option<&Loop> {
        match self.kind(id)? {
            EntityKind::Loop(face_loop) => Some(face_loop),
            _ => None,
        }
    }

    pub fn coedge(&self, id: EntityRef) -> Option<&Coedge> {
        match self.kind(id)? {
            EntityKind::Coedge(coedge) => Some(coedge),
            _ => None,
        }
    }

    pub fn edge(&self, id: EntityRef) -> Option<&Edge> {
        match self.kind(id)? {
            EntityKind::Edge(edge) => Some(edge),
            _ => None,
        }
    }

    pub fn vertex(&self, id: EntityRef) -> Option<&Vertex> {
        match self.kind(id)? {
            EntityKind::Vertex(vertex) => Some(vertex),
            _ => None,
        }
    }

    pub fn point(&self, id: EntityRef) -> Option<&Point3<f64>> {
        match self.kind(id)? {
            EntityKind::Point(point) => Some(point),
            _ => None,
        }
    }

    pub fn surface(&self, id: EntityRef) -> Option<&Surface> {
        match self.kind(id)? {
            EntityKind::Surface(surface) => Some(surface),
            _ => None,
        }
    }

    pub fn curve(&self, id: EntityRef) -> Option<&Curve> {
        match self.kind(id)? {
            EntityKind::Curve(curve) => Some(curve),
            _ => None,
        }
    }

    /// Position of a vertex through its point link
    pub fn vertex_position(&self, id: EntityRef) -> Option<Point3<f64>> {
        let vertex = self.vertex(id)?;
        self.point(vertex.point).copied()
    }

    /// Cached transform matrix, identity when the link is null or dangling
    pub fn transform_matrix(&self, id: EntityRef) -> Matrix4<f64> {
        id.and_then(|id| self.transforms.get(&id))
            .copied()
            .unwrap_or_else(Matrix4::identity)
    }

    /// Ids of all body entities, in file order
    pub fn bodies(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.ids_where(|kind| matches!(kind, EntityKind::Body(_)))
    }

    /// Ids of all face entities, in file order
    pub fn faces(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.ids_where(|kind| matches!(kind, EntityKind::Face(_)))
    }

    fn ids_where(&self, pred: fn(&EntityKind) -> bool) -> impl Iterator<Item = EntityId> + '_ {
        self.entities
            .iter()
            .filter(move |e| pred(&e.kind))
            .map(|e| e.id)
    }

    /// Number of entities per type name
    pub fn kind_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for entity in &self.entities {
            *counts.entry(entity.type_name.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Walk a singly linked `next` chain from `start`.
    ///
    /// Stops at a null link, at a link that does not resolve through `next`
    /// (dangling or wrong kind), or on revisiting an entity.
    pub fn chain<F>(&self, start: EntityRef, next: F) -> Chain<'_, F>
    where
        F: Fn(&Self, EntityId) -> Option<EntityRef>,
    {
        Chain {
            arena: self,
            current: start,
            visited: vec![false; self.len()],
            next,
        }
    }
}

/// Iterator over a `next`-linked chain; see [`EntityArena::chain`]
pub struct Chain<'a, F> {
    arena: &'a EntityArena,
    current: EntityRef,
    visited: Vec<bool>,
    next: F,
}

impl<F> Iterator for Chain<'_, F>
where
    F: Fn(&EntityArena, EntityId) -> Option<EntityRef>,
{
    type Item = EntityId;

    fn next(&mut self) -> Option<EntityId> {
        let id = self.current.take()?;
        let Some(seen) = self.visited.get_mut(id) else {
            trace!(id, "chain link dangles");
            return None;
        };
        if *seen {
            trace!(id, "chain revisits entity");
            return None;
        }
        *seen = true;
        // A node that does not resolve ends the chain without being yielded
        let Some(following) = (self.next)(self.arena, id) else {
            trace!(id, "chain link has the wrong kind");
            return None;
        };
        self.current = following;
        Some(id)
    }
}
