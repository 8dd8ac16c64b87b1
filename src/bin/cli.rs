// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! satmesh CLI

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use satmesh::cli::{self, BatchOptions, Reporter};
use satmesh::io::{self, ExportFormat};
use satmesh::sat::{Tokenizer, TokenKind};
use satmesh::{SatError, TessellationConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "satmesh")]
#[command(about = "ACIS SAT decoder and tessellator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Tessellation config file (TOML); defaults to ./satmesh.toml when present
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Angular segments around curved surfaces
    #[arg(long, global = true)]
    max_segments: Option<usize>,

    /// Samples per elliptical edge
    #[arg(long, global = true)]
    min_segments: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Tessellate SAT files and export meshes
    Convert {
        /// Input SAT files or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (single input only)
        #[arg(short, long, conflicts_with = "out_dir")]
        output: Option<PathBuf>,

        /// Output directory for batch conversion
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Output format (stl, ascii-stl, gltf, glb, json); guessed from
        /// the output extension when omitted
        #[arg(short, long)]
        format: Option<String>,

        /// Weld vertices closer than this distance before export
        #[arg(long, value_name = "EPS")]
        weld: Option<f64>,
    },

    /// Print the token stream of a SAT file
    Tokens {
        input: PathBuf,
    },

    /// Print the interpreted entity table
    Entities {
        input: PathBuf,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show header, entity counts, and mesh statistics
    Info {
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Convert {
            inputs,
            output,
            out_dir,
            format,
            weld,
        } => {
            let config = load_config(&cli)?;
            convert_command(
                inputs,
                output.as_deref(),
                out_dir.as_deref(),
                format.as_deref(),
                *weld,
                config,
                cli.verbose,
            )?;
        }
        Commands::Tokens { input } => tokens_command(input)?,
        Commands::Entities { input, json } => entities_command(input, *json)?,
        Commands::Info { input } => {
            let config = load_config(&cli)?;
            info_command(input, &config)?;
        }
        Commands::Version => {
            println!("satmesh v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "satmesh=debug" } else { "satmesh=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file (explicit or ./satmesh.toml), then environment, then flags
fn load_config(cli: &Cli) -> Result<TessellationConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = TessellationConfig::from_file(path)?;
            config.apply_env();
            config
        }
        None => TessellationConfig::load()?,
    };
    if let Some(max_segments) = cli.max_segments {
        config.max_segments = max_segments;
    }
    if let Some(min_segments) = cli.min_segments {
        config.min_segments = min_segments;
    }
    Ok(config)
}

fn convert_command(
    inputs: &[PathBuf],
    output: Option<&Path>,
    out_dir: Option<&Path>,
    format: Option<&str>,
    weld: Option<f64>,
    config: TessellationConfig,
    verbose: bool,
) -> Result<()> {
    let files = cli::discover_inputs(inputs)?;
    if files.is_empty() {
        bail!("No .sat files found");
    }
    if output.is_some() && files.len() > 1 {
        bail!("--output needs a single input; use --out-dir for batches");
    }

    let format = match format {
        Some(name) => name.parse::<ExportFormat>()?,
        None => output
            .and_then(ExportFormat::from_path)
            .unwrap_or(ExportFormat::Stl),
    };

    if let Some(dir) = out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }

    let jobs: Vec<(PathBuf, PathBuf)> = files
        .into_iter()
        .map(|input| {
            let target = match output {
                Some(path) => path.to_path_buf(),
                None => cli::output_path_for(&input, out_dir, format),
            };
            (input, target)
        })
        .collect();
    cli::check_unique_outputs(&jobs)?;

    let options = BatchOptions {
        config,
        format,
        weld,
        show_progress: jobs.len() > 1,
    };
    let outcomes = cli::convert_batch(&jobs, &options);

    if let [outcome] = outcomes.as_slice() {
        return match &outcome.result {
            Ok(stats) => {
                if verbose {
                    Reporter::report_convert(&outcome.input, &outcome.output, stats);
                } else {
                    println!(
                        "Converted {} -> {}",
                        outcome.input.display(),
                        outcome.output.display()
                    );
                }
                Ok(())
            }
            Err(err) => {
                Reporter::report_error(&format!("{:#}", err));
                std::process::exit(1);
            }
        };
    }

    if Reporter::report_batch(&outcomes) > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn tokens_command(input: &Path) -> Result<()> {
    let text = io::read_sat_file(input)?;
    for token in Tokenizer::new(&text) {
        let shown = match &token.kind {
            TokenKind::Str(s) => format!("str     {:?}", s),
            TokenKind::Null => "null".to_string(),
            TokenKind::Pointer(p) => format!("ptr     ${}", p),
            TokenKind::Ref(r) => format!("ref     {}", r),
            TokenKind::Number(n) => format!("num     {}", n),
            TokenKind::Bool(b) => format!("bool    {}", b),
            TokenKind::Flag(f) => format!("flag    {}", f),
            TokenKind::Ident(i) => format!("ident   {}", i),
            TokenKind::Char(c) => format!("char    {:?}", c),
        };
        println!("{:>6}  {}", token.line, shown);
    }
    Ok(())
}

fn entities_command(input: &Path, json: bool) -> Result<()> {
    let session = io::import_sat_file(input)?;
    let arena = session.arena();

    if json {
        let entities: Vec<_> = arena.iter().collect();
        println!("{}", serde_json::to_string_pretty(&entities)?);
        return Ok(());
    }

    for entity in arena.iter() {
        let links = match serde_json::to_value(&entity.kind)? {
            serde_json::Value::Object(map) => map
                .get("data")
                .map(|data| data.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        };
        println!("{:>6}  {:<20} {}", entity.id, entity.type_name, links);
    }
    Ok(())
}

fn info_command(input: &Path, config: &TessellationConfig) -> Result<()> {
    let session = io::import_sat_file(input)?;
    let mesh = match session.tessellate(config) {
        Ok(mesh) => Some(mesh),
        Err(SatError::NoGeometry) => None,
        Err(err) => {
            Reporter::report_warning(&err.to_string());
            None
        }
    };
    Reporter::report_info(input, &session, mesh.as_ref());
    Ok(())
}
