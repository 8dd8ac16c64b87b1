// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! SAT text front end: tokens, records, entities, and the entity arena

mod arena;
mod entity;
mod header;
pub mod interpreter;
pub mod tokenizer;

pub use arena::{Chain, EntityArena};
pub use entity::{
    Body, Coedge, Edge, Entity, EntityId, EntityKind, EntityRef, Face, Loop, Lump, Sense, Shell,
    Transform, Vertex,
};
pub use header::SatHeader;
pub use interpreter::{interpret, Record, RecordReader};
pub use tokenizer::{tokenize, Token, TokenKind, Tokenizer};
