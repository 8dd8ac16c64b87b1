// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Record grouping and positional field extraction
//!
//! An identifier at the top level opens a record; the record runs to a
//! top-level `;` or the end of its line. Fields are then read positionally:
//! the n-th pointer-or-null token, the n-th number, and flag presence.

use super::entity::{
    Body, Coedge, Edge, Entity, EntityId, EntityKind, EntityRef, Face, Lump, Loop, Sense, Shell,
    Transform, Vertex,
};
use super::tokenizer::{Token, TokenKind};
use crate::geometry::{
    Cone, Curve, EllipseCurve, Plane, Sphere, SplineSurface, StraightCurve, Surface, Torus,
};
use crate::utils::math::{acis_transform, point_at, try_normalize, vector_at};
use std::iter::Peekable;
use tracing::trace;

/// Runaway-input guard: tokens kept per record
pub const MAX_RECORD_TOKENS: usize = 500;

/// Raw record: a type name plus the tokens that follow it
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: EntityId,
    pub type_name: String,
    pub tokens: Vec<Token>,
}

/// Value of the n-th pointer-or-null token. Null, negative, and missing
/// pointers all read as no link.
pub fn find_pointer(tokens: &[Token], n: usize) -> EntityRef {
    tokens
        .iter()
        .filter_map(|t| match t.kind {
            TokenKind::Pointer(value) => Some(usize::try_from(value).ok()),
            TokenKind::Null => Some(None),
            _ => None,
        })
        .nth(n)
        .flatten()
}

/// True if any flag token carries `text`
pub fn find_flag(tokens: &[Token], text: &str) -> bool {
    tokens
        .iter()
        .any(|t| matches!(&t.kind, TokenKind::Flag(flag) if flag == text))
}

/// All number tokens, in order
pub fn numbers(tokens: &[Token]) -> Vec<f64> {
    tokens.iter().filter_map(Token::as_number).collect()
}

/// Groups a token stream into records.
///
/// Tokens seen before the first record are kept as the preamble (the SAT
/// header). Other stray tokens between records are skipped.
pub struct RecordReader<I: Iterator<Item = Token>> {
    tokens: Peekable<I>,
    next_id: EntityId,
    preamble: Vec<Token>,
}

impl<I: Iterator<Item = Token>> RecordReader<I> {
    pub fn new(tokens: I) -> Self {
        Self {
            tokens: tokens.peekable(),
            next_id: 0,
            preamble: Vec::new(),
        }
    }

    /// Tokens that preceded the first record
    pub fn preamble(&self) -> &[Token] {
        &self.preamble
    }

    fn read_body(&mut self, mut line: usize) -> Vec<Token> {
        let mut body = Vec::new();
        let mut depth = 0usize;
        let mut truncated = false;

        while let Some(peeked) = self.tokens.peek() {
            if depth == 0 && peeked.line > line {
                break;
            }
            let Some(token) = self.tokens.next() else { break };
            line = line.max(token.line);

            match token.kind {
                TokenKind::Char('{') => depth += 1,
                TokenKind::Char('}') => depth = depth.saturating_sub(1),
                TokenKind::Char(';') if depth == 0 => break,
                _ => {}
            }

            // Past the cap the record is drained but not stored, so its
            // tail cannot open spurious records.
            if body.len() < MAX_RECORD_TOKENS {
                body.push(token);
            } else {
                truncated = true;
            }
        }

        if truncated {
            trace!(line, "record truncated at {MAX_RECORD_TOKENS} tokens");
        }
        body
    }
}

impl<I: Iterator<Item = Token>> Iterator for RecordReader<I> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        loop {
            let token = self.tokens.next()?;
            match token.kind {
                TokenKind::Ident(name) => {
                    let id = self.next_id;
                    self.next_id += 1;
                    let tokens = self.read_body(token.line);
                    return Some(Record {
                        id,
                        type_name: name.to_lowercase(),
                        tokens,
                    });
                }
                _ if self.next_id == 0 => self.preamble.push(token),
                _ => {}
            }
        }
    }
}

/// Turn a raw record into a typed entity
pub fn interpret(record: Record) -> Entity {
    let kind = interpret_kind(&record.type_name, &record.tokens);
    Entity {
        id: record.id,
        type_name: record.type_name,
        tokens: record.tokens,
        kind,
    }
}

fn interpret_kind(type_name: &str, tokens: &[Token]) -> EntityKind {
    let p = |n: usize| find_pointer(tokens, n);
    let sense = || Sense::from_reversed(find_flag(tokens, "reversed"));

    match type_name {
        "body" => EntityKind::Body(Body {
            lump: p(1),
            transform: p(3),
        }),
        "lump" => EntityKind::Lump(Lump {
            next: p(1),
            shell: p(2),
            body: p(3),
        }),
        "shell" => EntityKind::Shell(Shell {
            next: p(1),
            face: p(3),
            lump: p(5),
        }),
        "face" => EntityKind::Face(Face {
            next: p(1),
            loop_ref: p(2),
            shell: p(3),
            surface: p(5),
            sense: sense(),
        }),
        "loop" => EntityKind::Loop(Loop {
            next: p(1),
            coedge: p(2),
            face: p(3),
        }),
        "coedge" => EntityKind::Coedge(Coedge {
            next: p(1),
            prev: p(2),
            partner: p(3),
            edge: p(4),
            loop_ref: p(5),
            sense: sense(),
        }),
        "edge" => {
            let n = numbers(tokens);
            EntityKind::Edge(Edge {
                start_vertex: p(1),
                end_vertex: p(2),
                coedge: p(3),
                curve: p(4),
                start_param: n.first().copied(),
                end_param: n.get(1).copied(),
            })
        }
        "vertex" => EntityKind::Vertex(Vertex {
            edge: p(1),
            point: p(2),
        }),
        "point" => EntityKind::Point(point_at(&numbers(tokens), 0)),
        "transform" => EntityKind::Transform(interpret_transform(&numbers(tokens))),
        "plane" | "plane-surface" | "cone" | "cone-surface" | "sphere" | "sphere-surface"
        | "torus" | "torus-surface" | "spline" | "spline-surface" => {
            EntityKind::Surface(interpret_surface(type_name, &numbers(tokens)))
        }
        "straight" | "straight-curve" | "ellipse" | "ellipse-curve" | "intcurve"
        | "intcurve-curve" | "pcurve" | "helix" | "helix-curve" => {
            EntityKind::Curve(interpret_curve(type_name, &numbers(tokens)))
        }
        _ => EntityKind::Unknown,
    }
}

fn interpret_surface(type_name: &str, n: &[f64]) -> Surface {
    let base = type_name.trim_end_matches("-surface");
    let get = |i: usize| n.get(i).copied();

    match base {
        "plane" => {
            let u_dir = (n.len() >= 9).then(|| vector_at(n, 6));
            Surface::Plane(Plane::new(point_at(n, 0), vector_at(n, 3), u_dir))
        }
        "cone" => {
            let half_angle = match (get(10), get(11)) {
                (Some(sin), Some(cos)) => sin.atan2(cos),
                _ => 0.0,
            };
            Surface::Cone(Cone::new(point_at(n, 0), vector_at(n, 3), vector_at(n, 6), half_angle))
        }
        "sphere" => Surface::Sphere(Sphere {
            center: point_at(n, 0),
            radius: get(3).unwrap_or(0.0),
        }),
        "torus" => Surface::Torus(Torus::new(
            point_at(n, 0),
            vector_at(n, 3),
            get(6).unwrap_or(0.0),
            get(7).unwrap_or(0.0),
        )),
        _ => Surface::Spline(SplineSurface {
            control_points: n.chunks_exact(3).map(|c| point_at(c, 0)).collect(),
        }),
    }
}

fn interpret_curve(type_name: &str, n: &[f64]) -> Curve {
    match type_name.trim_end_matches("-curve") {
        "straight" => Curve::Straight(StraightCurve {
            origin: point_at(n, 0),
            direction: vector_at(n, 3),
        }),
        "ellipse" => Curve::Ellipse(EllipseCurve {
            center: point_at(n, 0),
            normal: try_normalize(&vector_at(n, 3)).unwrap_or_else(nalgebra::Vector3::z),
            major_axis: vector_at(n, 6),
            ratio: n.get(9).copied().unwrap_or(1.0),
        }),
        _ => Curve::Unsupported {
            type_name: type_name.to_string(),
        },
    }
}

fn interpret_transform(n: &[f64]) -> Transform {
    let mut rows = [0.0; 9];
    for (slot, value) in rows.iter_mut().zip(n) {
        *slot = *value;
    }
    // A missing rotation block reads as identity rather than a collapse
    if n.len() < 9 {
        rows = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
    }
    let scale = n.get(12).copied().unwrap_or(1.0);
    Transform {
        matrix: acis_transform(&rows, &vector_at(n, 9), scale),
    }
}
