// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Tessellation configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up by [`TessellationConfig::load`]
pub const CONFIG_FILE: &str = "satmesh.toml";

/// Immutable settings shared by every parse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TessellationConfig {
    /// Chordal tolerance; recorded but not yet used by the evaluators
    pub tolerance: f64,
    /// Angular segments around curved surfaces
    pub max_segments: usize,
    /// Samples per elliptical edge
    pub min_segments: usize,
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            max_segments: 64,
            min_segments: 8,
        }
    }
}

impl TessellationConfig {
    pub fn with_segments(max_segments: usize, min_segments: usize) -> Self {
        Self {
            max_segments,
            min_segments,
            ..Self::default()
        }
    }

    /// Grid resolution around curved surfaces, at least 3
    pub fn u_segments(&self) -> usize {
        self.max_segments.max(3)
    }

    /// Grid resolution across curved surfaces: half of `u_segments`, rounded up
    pub fn v_segments(&self) -> usize {
        self.u_segments().div_ceil(2)
    }

    /// Samples per elliptical edge, at least 1
    pub fn edge_segments(&self) -> usize {
        self.min_segments.max(1)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: TessellationConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load `satmesh.toml` from the working directory when present, then
    /// apply environment variable overrides
    pub fn load() -> Result<Self> {
        let mut config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// Apply `SATMESH_*` environment overrides; unparsable values are ignored
    pub fn apply_env(&mut self) {
        if let Some(tolerance) = env_value("SATMESH_TOLERANCE") {
            self.tolerance = tolerance;
        }
        if let Some(max_segments) = env_value("SATMESH_MAX_SEGMENTS") {
            self.max_segments = max_segments;
        }
        if let Some(min_segments) = env_value("SATMESH_MIN_SEGMENTS") {
            self.min_segments = min_segments;
        }
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }
}

fn env_value<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok()?.trim().parse().ok()
}
