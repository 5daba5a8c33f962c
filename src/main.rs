use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use meshgrad::commands::{self, ExportOptions, NewOptions, Session};
use meshgrad::{init_logging, ColorDistribution, BUILD_DATE, VERSION};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "meshgrad", version, about = "Create, edit and export mesh gradient documents")]
struct Cli {
    /// Config file (.toml or .json); defaults to the platform config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new document
    New {
        path: PathBuf,
        #[arg(long)]
        rows: Option<u32>,
        #[arg(long)]
        columns: Option<u32>,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
        /// Comma-separated hex colors, e.g. "#FF3B30, #007AFF"
        #[arg(long)]
        palette: Option<String>,
        /// Background hex color
        #[arg(long)]
        background: Option<String>,
        #[arg(long)]
        distribution: Option<ColorDistribution>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print a summary of a document
    Info { path: PathBuf },
    /// Rebuild a document with a different number of rows and columns
    Resize {
        path: PathBuf,
        #[arg(long)]
        rows: u32,
        #[arg(long)]
        columns: u32,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Move every point back onto the uniform lattice
    Reset { path: PathBuf },
    /// Jitter interior points around the lattice
    Randomize {
        path: PathBuf,
        #[arg(long)]
        magnitude: Option<f32>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Displace interior points with coherent noise
    Distort {
        path: PathBuf,
        #[arg(long)]
        frequency: Option<f64>,
        #[arg(long)]
        amplitude: Option<f64>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Redistribute a palette over the points
    Recolor {
        path: PathBuf,
        /// Comma-separated hex colors; defaults to the document palette
        #[arg(long)]
        palette: Option<String>,
        #[arg(long)]
        distribution: Option<ColorDistribution>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Set the color of selected points
    Paint {
        path: PathBuf,
        /// Hex color
        #[arg(long)]
        color: String,
        /// Cells as ROW,COLUMN; repeatable
        #[arg(long = "cell", value_parser = parse_cell, required = true)]
        cells: Vec<(u32, u32)>,
    },
    /// Move one point by a normalized offset
    Nudge {
        path: PathBuf,
        #[arg(long)]
        row: u32,
        #[arg(long)]
        column: u32,
        #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
        dx: f32,
        #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
        dy: f32,
    },
    /// Render a document to PNG or JPEG
    Export {
        path: PathBuf,
        output: PathBuf,
        #[arg(long)]
        scale: Option<u32>,
        #[arg(long)]
        quality: Option<u8>,
        #[arg(long)]
        subdivisions: Option<u32>,
    },
    /// Print the document as Rust constants
    Code {
        path: PathBuf,
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Omit the generator banner
        #[arg(long)]
        no_header: bool,
    },
}

fn parse_cell(text: &str) -> Result<(u32, u32), String> {
    let (row, column) = text
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COLUMN, got '{text}'"))?;
    let row = row.trim().parse().map_err(|e| format!("bad row: {e}"))?;
    let column = column.trim().parse().map_err(|e| format!("bad column: {e}"))?;
    Ok((row, column))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    init_logging(level)?;
    tracing::debug!(version = VERSION, build_date = BUILD_DATE, "starting meshgrad");

    let mut session = Session::load(cli.config.as_deref())?;

    match cli.command {
        Command::New {
            path,
            rows,
            columns,
            width,
            height,
            palette,
            background,
            distribution,
            seed,
        } => {
            let options = NewOptions {
                rows,
                columns,
                width,
                height,
                palette,
                background,
                distribution,
                seed,
            };
            let grid = commands::new_document(&mut session, &path, &options)?;
            println!(
                "created {} ({} x {})",
                path.display(),
                grid.rows(),
                grid.columns()
            );
        }
        Command::Info { path } => {
            println!("{}", commands::info(&path)?);
        }
        Command::Resize {
            path,
            rows,
            columns,
            seed,
        } => {
            commands::resize(&session, &path, rows, columns, seed)?;
        }
        Command::Reset { path } => {
            commands::reset(&path)?;
        }
        Command::Randomize {
            path,
            magnitude,
            seed,
        } => {
            commands::randomize(&session, &path, magnitude, seed)?;
        }
        Command::Distort {
            path,
            frequency,
            amplitude,
            seed,
        } => {
            commands::distort(&session, &path, frequency, amplitude, seed)?;
        }
        Command::Recolor {
            path,
            palette,
            distribution,
            seed,
        } => {
            commands::recolor(&session, &path, palette.as_deref(), distribution, seed)?;
        }
        Command::Paint { path, color, cells } => {
            commands::paint(&path, &cells, &color)?;
        }
        Command::Nudge {
            path,
            row,
            column,
            dx,
            dy,
        } => {
            commands::nudge(&path, row, column, [dx, dy])?;
        }
        Command::Export {
            path,
            output,
            scale,
            quality,
            subdivisions,
        } => {
            let options = ExportOptions {
                scale,
                jpeg_quality: quality,
                subdivisions,
            };
            commands::export_image(&mut session, &path, &output, &options)?;
            println!("exported {}", output.display());
        }
        Command::Code {
            path,
            output,
            no_header,
        } => {
            let code = commands::generate_code(&path, !no_header)?;
            match output {
                Some(output) => std::fs::write(&output, code)
                    .with_context(|| format!("Failed to write {}", output.display()))?,
                None => print!("{code}"),
            }
        }
    }

    Ok(())
}
