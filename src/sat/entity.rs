// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Interpreted SAT entities
//!
//! Links between entities are plain arena indices. They are resolved lazily
//! through [`EntityArena`](super::EntityArena), so forward and dangling
//! references need no fixup pass.

use super::tokenizer::Token;
use crate::geometry::{Curve, Surface};
use nalgebra::{Matrix4, Point3};
use serde::Serialize;

/// Sequential entity index, assigned in encounter order starting at 0
pub type EntityId = usize;

/// Optional link to another entity; `None` is "no link"
pub type EntityRef = Option<EntityId>;

/// Orientation agreement between topology and geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sense {
    #[default]
    Forward,
    Reversed,
}

impl Sense {
    pub fn from_reversed(reversed: bool) -> Self {
        if reversed {
            Self::Reversed
        } else {
            Self::Forward
        }
    }

    /// `+1.0` for forward, `-1.0` for reversed
    pub fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Reversed => -1.0,
        }
    }

    pub fn is_reversed(self) -> bool {
        self == Self::Reversed
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Body {
    pub lump: EntityRef,
    pub transform: EntityRef,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Lump {
    pub next: EntityRef,
    pub shell: EntityRef,
    pub body: EntityRef,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Shell {
    pub next: EntityRef,
    pub face: EntityRef,
    pub lump: EntityRef,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Face {
    pub next: EntityRef,
    pub loop_ref: EntityRef,
    pub shell: EntityRef,
    pub surface: EntityRef,
    pub sense: Sense,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Loop {
    pub next: EntityRef,
    pub coedge: EntityRef,
    pub face: EntityRef,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Coedge {
    pub next: EntityRef,
    pub prev: EntityRef,
    pub partner: EntityRef,
    pub edge: EntityRef,
    pub loop_ref: EntityRef,
    pub sense: Sense,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Edge {
    pub start_vertex: EntityRef,
    pub end_vertex: EntityRef,
    pub coedge: EntityRef,
    pub curve: EntityRef,
    pub start_param: Option<f64>,
    pub end_param: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Vertex {
    pub edge: EntityRef,
    pub point: EntityRef,
}

/// Placement transform; the matrix is built once at interpretation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transform {
    pub matrix: Matrix4<f64>,
}

/// Closed set of entity kinds understood by the tessellator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum EntityKind {
    Body(Body),
    Lump(Lump),
    Shell(Shell),
    Face(Face),
    Loop(Loop),
    Coedge(Coedge),
    Edge(Edge),
    Vertex(Vertex),
    Point(Point3<f64>),
    Surface(Surface),
    Curve(Curve),
    Transform(Transform),
    /// Opaque record (attributes, header markers, unsupported kinds)
    Unknown,
}

/// One interpreted record
#[derive(Debug, Clone, Serialize)]
pub struct Entity {
    pub id: EntityId,
    /// Lower-cased type name as written in the file
    pub type_name: String,
    #[serde(skip)]
    pub tokens: Vec<Token>,
    #[serde(flatten)]
    pub kind: EntityKind,
}

impl Entity {
    pub fn is_unknown(&self) -> bool {
        matches!(self.kind, EntityKind::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sense() {
        assert_eq!(Sense::from_reversed(true), Sense::Reversed);
        assert_eq!(Sense::default().sign(), 1.0);
        assert_eq!(Sense::Reversed.sign(), -1.0);
        assert!(!Sense::Forward.is_reversed());
    }

    #[test]
    fn test_entity_json_is_tagged() {
        let entity = Entity {
            id: 3,
            type_name: "lump".to_string(),
            tokens: Vec::new(),
            kind: EntityKind::Lump(Lump { next: None, shell: Some(4), body: Some(0) }),
        };
        let value = serde_json::to_value(&entity).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["kind"], "lump");
        assert_eq!(value["data"]["shell"], 4);
    }
}
