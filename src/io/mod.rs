// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - importing SAT files and exporting meshes

mod export_gltf;
mod export_json;
mod exporter;
mod importer;

pub use export_gltf::{export_glb, export_gltf};
pub use export_json::export_json;
pub use exporter::{export_stl, export_stl_ascii};
pub use importer::{import_sat_file, read_sat_file, render_sat_file};

use crate::tessellate::SatMesh;
use anyhow::{bail, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Mesh output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Stl,
    AsciiStl,
    Gltf,
    Glb,
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Stl,
        ExportFormat::AsciiStl,
        ExportFormat::Gltf,
        ExportFormat::Glb,
        ExportFormat::Json,
    ];

    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "stl" => Some(Self::Stl),
            "gltf" => Some(Self::Gltf),
            "glb" => Some(Self::Glb),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// File extension written for this format
    pub fn extension(self) -> &'static str {
        match self {
            Self::Stl | Self::AsciiStl => "stl",
            Self::Gltf => "gltf",
            Self::Glb => "glb",
            Self::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "stl" => Ok(Self::Stl),
            "ascii-stl" | "stl-ascii" => Ok(Self::AsciiStl),
            "gltf" => Ok(Self::Gltf),
            "glb" => Ok(Self::Glb),
            "json" => Ok(Self::Json),
            other => bail!("Unsupported format: {}", other),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stl => "stl",
            Self::AsciiStl => "ascii-stl",
            Self::Gltf => "gltf",
            Self::Glb => "glb",
            Self::Json => "json",
        };
        f.write_str(name)
    }
}

/// Export a tessellation result. Mesh formats optionally weld vertices
/// closer than `weld` first; JSON keeps the raw result.
pub fn export(mesh: &SatMesh, path: &Path, format: ExportFormat, weld: Option<f64>) -> Result<()> {
    if format == ExportFormat::Json {
        return export_json(mesh, path);
    }

    let mut render = mesh.to_mesh();
    if let Some(epsilon) = weld {
        render.weld_vertices(epsilon);
        render.recompute_normals();
    }

    match format {
        ExportFormat::Stl => export_stl(&render, path),
        ExportFormat::AsciiStl => export_stl_ascii(&render, path),
        ExportFormat::Gltf => export_gltf(&render, path),
        ExportFormat::Glb => export_glb(&render, path),
        ExportFormat::Json => export_json(mesh, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("a/b.STL")), Some(ExportFormat::Stl));
        assert_eq!(ExportFormat::from_path(Path::new("b.glb")), Some(ExportFormat::Glb));
        assert_eq!(ExportFormat::from_path(Path::new("b.obj")), None);
        assert_eq!(ExportFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_format_names_round_trip() {
        for format in ExportFormat::ALL {
            assert_eq!(format.to_string().parse::<ExportFormat>().ok(), Some(format));
        }
        assert!("3mf".parse::<ExportFormat>().is_err());
    }
}
