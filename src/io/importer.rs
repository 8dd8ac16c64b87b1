// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! SAT file importer

use crate::config::TessellationConfig;
use crate::parser::{ParseSession, SatParser};
use crate::tessellate::SatMesh;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Read a SAT file as text. Invalid UTF-8 inside strings is replaced
/// rather than rejected.
pub fn read_sat_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("Failed to read SAT file: {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Import a .sat file into a parse session
pub fn import_sat_file(path: impl AsRef<Path>) -> Result<ParseSession> {
    let text = read_sat_file(path)?;
    Ok(ParseSession::new(&text))
}

/// Import and tessellate a .sat file
pub fn render_sat_file(path: impl AsRef<Path>, config: &TessellationConfig) -> Result<SatMesh> {
    let path = path.as_ref();
    let text = read_sat_file(path)?;
    SatParser::with_config(config.clone())
        .try_parse(&text)
        .with_context(|| format!("Failed to tessellate SAT file: {}", path.display()))
}
