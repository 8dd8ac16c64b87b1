// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use super::batch::{ConvertOutcome, ConvertStats};
use crate::parser::ParseSession;
use crate::tessellate::SatMesh;
use colored::*;
use std::path::Path;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report a converted file
    pub fn report_convert(input: &Path, output: &Path, stats: &ConvertStats) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!(
            "{} {} {} {}",
            "Converted:".bold(),
            input.display().to_string().cyan(),
            "→".bright_black(),
            output.display().to_string().cyan()
        );
        println!("{}", "━".repeat(80).bright_black());
        Self::print_field("Faces:", stats.faces.to_string());
        Self::print_field("Vertices:", stats.vertices.to_string());
        Self::print_field("Triangles:", stats.triangles.to_string());
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(stats.duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Summarize a batch; returns the number of failures
    pub fn report_batch(outcomes: &[ConvertOutcome]) -> usize {
        let failed: Vec<&ConvertOutcome> = outcomes.iter().filter(|o| o.result.is_err()).collect();
        let triangles: usize = outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .map(|s| s.triangles)
            .sum();

        println!("\n{}", "═".repeat(80).bright_black());
        println!("{}", "Conversion Summary".bold());
        println!("{}", "═".repeat(80).bright_black());
        Self::print_field("Files:", outcomes.len().to_string());
        println!(
            "  {} {}",
            "Converted:".bright_black(),
            (outcomes.len() - failed.len()).to_string().green()
        );
        println!(
            "  {} {}",
            "Failed:".bright_black(),
            if failed.is_empty() {
                "0".green()
            } else {
                failed.len().to_string().red()
            }
        );
        Self::print_field("Triangles:", triangles.to_string());

        for outcome in &failed {
            if let Err(err) = &outcome.result {
                println!("    {} {}", "❌".red(), outcome.input.display());
                println!("       {}", format!("{:#}", err).bright_black());
            }
        }
        println!("{}", "═".repeat(80).bright_black());
        failed.len()
    }

    /// Header, entity table summary, and mesh statistics of one file
    pub fn report_info(file: &Path, session: &ParseSession, mesh: Option<&SatMesh>) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "File:".bold(), file.display().to_string().cyan());
        println!("{}", "━".repeat(80).bright_black());

        if let Some(header) = session.header() {
            println!("{}", "Header:".bold());
            if let Some(version) = header.version {
                Self::print_field("Version:", version.to_string());
            }
            if let Some(product) = &header.product {
                Self::print_field("Product:", product.clone());
            }
            if let Some(acis) = &header.acis_version {
                Self::print_field("ACIS:", acis.clone());
            }
            if let Some(date) = &header.date {
                Self::print_field("Date:", date.clone());
            }
            if let Some(units) = header.units_per_mm {
                Self::print_field("Units/mm:", units.to_string());
            }
        }

        println!("\n{}", "Entities:".bold());
        Self::print_field("Total:", session.arena().len().to_string());
        for (name, count) in session.arena().kind_counts() {
            println!("  {:>24} {}", name.bright_black(), count);
        }

        println!("\n{}", "Mesh:".bold());
        match mesh {
            Some(mesh) => {
                Self::print_field("Faces:", mesh.faces.len().to_string());
                Self::print_field("Vertices:", mesh.vertex_count().to_string());
                Self::print_field("Triangles:", mesh.triangle_count().to_string());
                Self::print_field("Outlines:", mesh.outlines.len().to_string());
                let bbox = mesh.bounding_box();
                if !bbox.is_empty() {
                    let size = bbox.size();
                    Self::print_field(
                        "Size:",
                        format!("{:.3} × {:.3} × {:.3}", size.x, size.y, size.z),
                    );
                }
            }
            None => println!("  {}", "no tessellatable geometry".yellow()),
        }
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    fn print_field(name: &str, value: String) {
        println!("  {} {}", name.bright_black(), value.cyan());
    }

    /// Format duration for display
    pub fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}
