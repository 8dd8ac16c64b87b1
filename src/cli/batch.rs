// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Batch conversion: input discovery and parallel SAT-to-mesh export

use crate::config::TessellationConfig;
use crate::io::{self, ExportFormat};
use ahash::AHashMap;
use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::WalkDir;

/// Outcome of converting one input
#[derive(Debug)]
pub struct ConvertOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub result: Result<ConvertStats>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertStats {
    pub vertices: usize,
    pub triangles: usize,
    pub faces: usize,
    pub duration: Duration,
}

/// Settings shared by every job of a batch
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub config: TessellationConfig,
    pub format: ExportFormat,
    pub weld: Option<f64>,
    pub show_progress: bool,
}

fn is_sat_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("sat"))
        .unwrap_or(false)
}

/// Expand directories into the `.sat` files beneath them (sorted), keeping
/// plain file arguments as given
pub fn discover_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file() && is_sat_file(e.path()))
                .map(|e| e.into_path())
                .collect();
            found.sort();
            files.extend(found);
        } else if input.exists() {
            files.push(input.clone());
        } else {
            bail!("Input file not found: {}", input.display());
        }
    }
    Ok(files)
}

/// Output path for `input`: the input's stem with the format's extension,
/// placed in `out_dir` when given, next to the input otherwise
pub fn output_path_for(input: &Path, out_dir: Option<&Path>, format: ExportFormat) -> PathBuf {
    let file_name = input.with_extension(format.extension());
    match (out_dir, file_name.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => file_name,
    }
}

/// Refuse a batch in which two inputs would write the same output file
pub fn check_unique_outputs(jobs: &[(PathBuf, PathBuf)]) -> Result<()> {
    let mut claimed: AHashMap<&Path, &Path> = AHashMap::with_capacity(jobs.len());
    for (input, output) in jobs {
        if let Some(previous) = claimed.insert(output.as_path(), input.as_path()) {
            bail!(
                "{} and {} would both write {}",
                previous.display(),
                input.display(),
                output.display()
            );
        }
    }
    Ok(())
}

/// Convert a single file
pub fn convert_file(input: &Path, output: &Path, options: &BatchOptions) -> Result<ConvertStats> {
    let start = Instant::now();
    let mesh = io::render_sat_file(input, &options.config)?;
    io::export(&mesh, output, options.format, options.weld)?;

    Ok(ConvertStats {
        vertices: mesh.vertex_count(),
        triangles: mesh.triangle_count(),
        faces: mesh.faces.len(),
        duration: start.elapsed(),
    })
}

/// Convert many files in parallel
pub fn convert_batch(jobs: &[(PathBuf, PathBuf)], options: &BatchOptions) -> Vec<ConvertOutcome> {
    let progress = options.show_progress.then(|| {
        let pb = ProgressBar::new(jobs.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    });

    let outcomes: Vec<ConvertOutcome> = jobs
        .par_iter()
        .map(|(input, output)| {
            if let Some(ref pb) = progress {
                pb.set_message(format!("{}", input.display()));
            }

            let result = convert_file(input, output, options);

            if let Some(ref pb) = progress {
                pb.inc(1);
            }

            ConvertOutcome {
                input: input.clone(),
                output: output.clone(),
                result,
            }
        })
        .collect();

    if let Some(pb) = progress {
        pb.finish_with_message("done");
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_discover_inputs() -> Result<()> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("nested"))?;
        fs::write(dir.path().join("b.sat"), "")?;
        fs::write(dir.path().join("nested/a.SAT"), "")?;
        fs::write(dir.path().join("notes.txt"), "")?;

        let found = discover_inputs(&[dir.path().to_path_buf()])?;
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|p| is_sat_file(p)));

        assert!(discover_inputs(&[dir.path().join("missing.sat")]).is_err());
        Ok(())
    }

    #[test]
    fn test_output_path_for() {
        let input = Path::new("models/part.sat");
        assert_eq!(
            output_path_for(input, None, ExportFormat::Glb),
            PathBuf::from("models/part.glb")
        );
        assert_eq!(
            output_path_for(input, Some(Path::new("out")), ExportFormat::AsciiStl),
            PathBuf::from("out/part.stl")
        );
    }

    #[test]
    fn test_colliding_outputs_are_refused() {
        let out = Some(Path::new("out"));
        let jobs: Vec<(PathBuf, PathBuf)> = ["a/part.sat", "b/part.sat"]
            .iter()
            .map(|p| {
                let input = PathBuf::from(p);
                let output = output_path_for(&input, out, ExportFormat::Glb);
                (input, output)
            })
            .collect();
        let message = check_unique_outputs(&jobs).unwrap_err().to_string();
        assert!(message.contains("a/part.sat"));
        assert!(message.contains("b/part.sat"));

        // Without --out-dir each output stays next to its input
        let jobs: Vec<(PathBuf, PathBuf)> = jobs
            .into_iter()
            .map(|(input, _)| {
                let output = output_path_for(&input, None, ExportFormat::Glb);
                (input, output)
            })
            .collect();
        assert!(check_unique_outputs(&jobs).is_ok());
    }
}
