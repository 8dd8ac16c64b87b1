// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! satmesh
//!
//! Decodes ACIS SAT text (as embedded in DXF `3DSOLID`/`BODY`/`REGION`
//! entities) and tessellates its boundary representation into triangles
//! plus 2D loop outlines for preview rendering.

pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod parser;
pub mod sat;
pub mod tessellate;
pub mod utils;

pub use config::TessellationConfig;
pub use error::SatError;
pub use geometry::Mesh;
pub use io::{export, import_sat_file, render_sat_file, ExportFormat};
pub use parser::{ParseSession, SatParser};
pub use tessellate::{FaceMeta, SatMesh};

/// Parse SAT text with the default configuration.
///
/// Returns `None` when the text holds no tessellatable geometry or parsing
/// fails for any reason; failures are logged through `tracing`.
pub fn parse_sat(text: &str) -> Option<SatMesh> {
    SatParser::new().parse(text)
}

/// Parse SAT text with an explicit configuration
pub fn parse_sat_with(text: &str, config: &TessellationConfig) -> Option<SatMesh> {
    SatParser::with_config(config.clone()).parse(text)
}
