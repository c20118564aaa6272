//! Command line of the `adapter-plate` binary.
//!
//! Any dimension not given on the command line is asked for interactively;
//! pressing Enter accepts the default.

use crate::adapter::{Dimensions, build_adapter};
use crate::config::{
    DEFAULT_OUTPUT_NAME, DimensionOverrides, resolve_dimensions, resolve_output_dir,
};
use crate::io::StlFormat;
use crate::prompt::Prompter;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// SBC -> AX15 Adapter Plate STL Generator
#[derive(Parser, Debug, Clone)]
#[command(name = "adapter-plate")]
#[command(about = "SBC -> AX15 Adapter Plate STL Generator", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Plate thickness (mm)
    #[arg(long)]
    pub thickness: Option<f64>,

    /// Outer radius (mm)
    #[arg(long)]
    pub outer_radius: Option<f64>,

    /// Center bore radius (mm)
    #[arg(long)]
    pub center_bore_radius: Option<f64>,

    /// Bolt hole radius (mm)
    #[arg(long)]
    pub bolt_radius: Option<f64>,

    /// Output STL filename
    #[arg(long, default_value = DEFAULT_OUTPUT_NAME)]
    pub output_name: String,

    /// Output directory (default: Desktop, or the current directory without one)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// STL encoding: binary or ascii
    #[arg(long, default_value = "binary")]
    pub format: StlFormat,

    /// Exit without waiting for Enter after the export
    #[arg(long)]
    pub no_pause: bool,
}

impl Cli {
    pub const fn overrides(&self) -> DimensionOverrides {
        DimensionOverrides {
            thickness: self.thickness,
            outer_radius: self.outer_radius,
            center_bore_radius: self.center_bore_radius,
            bolt_radius: self.bolt_radius,
        }
    }
}

fn print_summary<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    dims: &Dimensions,
    out_path: &Path,
) -> io::Result<()> {
    prompter.say("\nGenerating STL with:")?;
    prompter.say(&format!("  thickness          = {:?}", dims.thickness))?;
    prompter.say(&format!("  outer_radius       = {:?}", dims.outer_radius))?;
    prompter.say(&format!("  center_bore_radius = {:?}", dims.center_bore_radius))?;
    prompter.say(&format!("  bolt_radius        = {:?}", dims.bolt_radius))?;
    prompter.say(&format!("\nSaving to: {}\n", out_path.display()))
}

/// Collect the dimensions, build the plate and write it out.
///
/// Returns the path of the written file.
///
/// # Errors
/// Prompt I/O failures (including end of input), dimensions the builder
/// rejects, and filesystem errors, each with context attached.
pub fn run<R: BufRead, W: Write>(cli: &Cli, prompter: &mut Prompter<R, W>) -> Result<PathBuf> {
    let dims = resolve_dimensions(&cli.overrides(), prompter)
        .context("failed to read dimensions")?;

    let out_dir = resolve_output_dir(cli.output_dir.clone())
        .context("failed to determine the output directory")?;
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let out_path = out_dir.join(&cli.output_name);

    print_summary(prompter, &dims, &out_path)?;

    let adapter = build_adapter(&dims).context("failed to build the adapter plate")?;
    adapter
        .export_to_file(&out_path, cli.format)
        .with_context(|| format!("failed to write {}", out_path.display()))?;

    prompter.say(&format!("Export complete: {}", out_path.display()))?;
    Ok(out_path)
}
