//! Command line argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Sciter application bundler
#[derive(Parser, Debug)]
#[command(
    name = "scapp_bundler",
    version,
    about = "Packages a Sciter application for Windows, macOS and Linux",
    long_about = "Packs a resource folder into a single archive, converts the vector logo into
platform icon formats and assembles a runnable binary per target.

Usage:
  scapp_bundler --project <id|name>
  scapp_bundler --config project.json
  scapp_bundler --exe app --resources path/to/app --out dist --logo icon.svg --targets winX64,mac [--silent]

Targets: winX32, winX64, winARM64, mac, linuxX64, linuxARM32.

Exit code 0 = every requested target was assembled."
)]
pub struct Args {
    /// Application name; also the file stem of every produced artifact
    #[arg(long, value_name = "NAME")]
    pub exe: Option<String>,

    /// Folder containing the application resources
    #[arg(long, value_name = "DIR")]
    pub resources: Option<String>,

    /// Output folder for all artifacts
    #[arg(long, value_name = "DIR")]
    pub out: Option<String>,

    /// Vector logo converted into the per-platform icon formats
    #[arg(long, value_name = "SVG")]
    pub logo: Option<String>,

    /// Comma separated list of targets to build
    #[arg(long, value_name = "LIST", value_delimiter = ',')]
    pub targets: Vec<String>,

    /// Single target to build; may be repeated
    #[arg(long, value_name = "TARGET")]
    pub target: Vec<String>,

    /// Product name embedded into the assembled executables
    #[arg(long, value_name = "TEXT")]
    pub product_name: Option<String>,

    /// Product version; also used in the macOS bundle manifest
    #[arg(long, value_name = "TEXT")]
    pub product_version: Option<String>,

    /// Product description embedded into the assembled executables
    #[arg(long, value_name = "TEXT")]
    pub product_description: Option<String>,

    /// Publishing company embedded into the assembled executables
    #[arg(long, value_name = "TEXT")]
    pub product_company: Option<String>,

    /// Copyright line embedded into the assembled executables
    #[arg(long, value_name = "TEXT")]
    pub product_copyright: Option<String>,

    /// Saved project to load from the settings file, by id or name
    #[arg(long, value_name = "ID", conflicts_with = "config")]
    pub project: Option<String>,

    /// JSON file providing the same fields as a saved project
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only emit errors
    #[arg(long)]
    pub silent: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// All requested target names: the `--targets` list first, then any
    /// repeated `--target` flags.
    pub fn requested_targets(&self) -> Vec<String> {
        let mut all = self.targets.clone();
        all.extend(self.target.iter().cloned());
        all
    }
}
