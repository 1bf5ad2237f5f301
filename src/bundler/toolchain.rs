//! External toolchain seam.
//!
//! Everything the pipeline delegates to external binaries sits behind
//! [`Toolchain`], so the orchestration can be exercised without the
//! proprietary scapp SDK installed. [`ScappToolchain`] is the production
//! implementation.

use std::path::{Path, PathBuf};

use crate::bundler::error::Result;
use crate::bundler::icon;
use crate::bundler::logger::{BuildLog, LineClass};
use crate::bundler::pack;
use crate::bundler::params::ExeMetadata;
use crate::bundler::process::run_command;
use crate::bundler::target::Target;
use crate::bundler::tools;

/// External operations required by a build run.
#[allow(async_fn_in_trait)]
pub trait Toolchain {
    /// Locates the assembler binary for `target`, or `None` when it is not
    /// installed.
    fn locate_assembler(&self, target: Target) -> Option<PathBuf>;

    /// Packs a resource folder into a single archive.
    async fn pack_resources(&self, folder: &Path, datfile: &Path, log: &dyn BuildLog)
    -> Result<()>;

    /// Produces a Windows `.ico` file from the vector logo.
    async fn svg_to_ico(&self, svg: &Path, ico: &Path, log: &dyn BuildLog) -> Result<()>;

    /// Produces `<out_dir>/icon.icns` and the intermediate iconset from the
    /// vector logo.
    async fn svg_to_icns(&self, svg: &Path, out_dir: &Path, log: &dyn BuildLog) -> Result<()>;

    /// Merges the packed archive into the platform stub at `exefile` and
    /// returns the signed assembler status.
    async fn assemble_exe(
        &self,
        assembler: &Path,
        datfile: &Path,
        exefile: &Path,
        metadata: Option<&ExeMetadata>,
        log: &dyn BuildLog,
    ) -> Result<i32>;
}

/// Production toolchain backed by the scapp SDK binaries.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScappToolchain;

impl ScappToolchain {
    pub fn new() -> Self {
        Self
    }
}

impl Toolchain for ScappToolchain {
    fn locate_assembler(&self, target: Target) -> Option<PathBuf> {
        tools::locate_assembler(target)
    }

    async fn pack_resources(
        &self,
        folder: &Path,
        datfile: &Path,
        log: &dyn BuildLog,
    ) -> Result<()> {
        pack::package_resources(folder, datfile, log).await
    }

    async fn svg_to_ico(&self, svg: &Path, ico: &Path, log: &dyn BuildLog) -> Result<()> {
        icon::convert_svg_to_ico(svg, ico, log).await
    }

    async fn svg_to_icns(&self, svg: &Path, out_dir: &Path, log: &dyn BuildLog) -> Result<()> {
        icon::convert_svg_to_icns(svg, out_dir, log).await
    }

    async fn assemble_exe(
        &self,
        assembler: &Path,
        datfile: &Path,
        exefile: &Path,
        metadata: Option<&ExeMetadata>,
        log: &dyn BuildLog,
    ) -> Result<i32> {
        let mut argv = vec![
            assembler.display().to_string(),
            "-assemble".to_string(),
            datfile.display().to_string(),
            exefile.display().to_string(),
        ];
        if let Some(metadata) = metadata {
            argv.extend(metadata.to_args());
        }
        let code = run_command(&argv, log).await?;
        Ok(widen_status(code))
    }
}

/// Maps a raw process exit code back to the assembler's signed status.
///
/// Exit codes travel as unsigned bytes on Unix, so 255 means status -1.
fn widen_status(code: i32) -> i32 {
    if (128..=255).contains(&code) {
        code - 256
    } else {
        code
    }
}

/// Writes the per-status log line for an assembler result.
pub fn log_assemble_status(status: i32, log: &dyn BuildLog) {
    match status {
        0 => log.add("Done!", LineClass::Result),
        1 => log.add("Done, but no metadata update", LineClass::Result),
        -1 => log.add("FAILURE, no .dat file", LineClass::Stderr),
        -2 => log.add("FAILURE opening output file", LineClass::Stderr),
        -3 => log.add("FAILURE writing output file", LineClass::Stderr),
        other => log.add(&format!("FAILURE, assemble status={other}"), LineClass::Stderr),
    }
}
