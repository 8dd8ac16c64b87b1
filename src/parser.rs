// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parser API: SAT text in, mesh out

use crate::config::TessellationConfig;
use crate::error::SatError;
use crate::sat::{interpret, EntityArena, RecordReader, SatHeader, Tokenizer};
use crate::tessellate::{SatMesh, Tessellator};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

/// One interpreted SAT payload: its header and entity arena
#[derive(Debug)]
pub struct ParseSession {
    header: Option<SatHeader>,
    arena: EntityArena,
}

impl ParseSession {
    /// Tokenize and interpret `text`. Never fails; unreadable input simply
    /// yields fewer (or only unknown) entities.
    pub fn new(text: &str) -> Self {
        let mut reader = RecordReader::new(Tokenizer::new(text));
        let mut arena = EntityArena::new();
        for record in reader.by_ref() {
            arena.insert(interpret(record));
        }
        let header = SatHeader::from_preamble(reader.preamble());
        debug!(
            entities = arena.len(),
            version = ?header.as_ref().and_then(|h| h.version),
            "interpreted SAT payload"
        );
        Self { header, arena }
    }

    pub fn header(&self) -> Option<&SatHeader> {
        self.header.as_ref()
    }

    pub fn arena(&self) -> &EntityArena {
        &self.arena
    }

    pub fn tessellate(&self, config: &TessellationConfig) -> Result<SatMesh, SatError> {
        Tessellator::new(&self.arena, config).run()
    }
}

/// Reusable SAT parser holding an immutable tessellation config
#[derive(Debug, Clone, Default)]
pub struct SatParser {
    config: TessellationConfig,
}

impl SatParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TessellationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TessellationConfig {
        &self.config
    }

    /// Parse and tessellate, reporting why no mesh was produced.
    ///
    /// Panics raised anywhere in interpretation or tessellation are caught
    /// and returned as [`SatError::Panicked`].
    pub fn try_parse(&self, text: &str) -> Result<SatMesh, SatError> {
        panic::catch_unwind(AssertUnwindSafe(|| {
            ParseSession::new(text).tessellate(&self.config)
        }))
        .unwrap_or_else(|payload| Err(SatError::Panicked(panic_message(payload.as_ref()))))
    }

    /// Parse and tessellate. Returns `None` when the payload holds no
    /// tessellatable geometry or when parsing fails; failures are logged.
    pub fn parse(&self, text: &str) -> Option<SatMesh> {
        match self.try_parse(text) {
            Ok(mesh) => Some(mesh),
            Err(SatError::NoGeometry) => {
                debug!("SAT payload produced no geometry");
                None
            }
            Err(err) => {
                warn!(error = %err, "SAT parse failed");
                None
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
