// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! JSON exporter for the full tessellation result

use crate::tessellate::SatMesh;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write vertices, triangles, outlines, and face metadata as pretty JSON
pub fn export_json(mesh: &SatMesh, path: &Path) -> Result<()> {
    let mut file = BufWriter::new(File::create(path).context("Failed to create JSON file")?);
    serde_json::to_writer_pretty(&mut file, mesh).context("Failed to write JSON file")?;
    file.flush()?;
    Ok(())
}
