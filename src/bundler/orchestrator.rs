//! Top-level build orchestration.
//!
//! This module provides the [`ProjectBuilder`] that coordinates one assembly
//! run: validate the input and output folders, pack the resources exactly
//! once, then build every requested target in order, fail-fast.

use std::path::{Path, PathBuf};

use crate::bundler::error::{Error, Result};
use crate::bundler::logger::{BuildLog, LineClass};
use crate::bundler::params::BuildParameters;
use crate::bundler::platform;
use crate::bundler::target::{IconKind, Target};
use crate::bundler::toolchain::{Toolchain, log_assemble_status};
use crate::bundler::utils::fs as fsutil;

/// Outcome of one assembly run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BuildResult {
    /// True when every requested target was assembled.
    pub ok: bool,
    /// 0 success, 1 build failure, 2 invalid input or output folder.
    pub exit_code: i32,
}

impl BuildResult {
    fn success() -> Self {
        Self {
            ok: true,
            exit_code: 0,
        }
    }

    fn failure(exit_code: i32) -> Self {
        Self {
            ok: false,
            exit_code,
        }
    }
}

/// Drives a full assembly run.
///
/// Construction validates the parameter invariants; [`Self::assemble`] runs
/// the pipeline against an injected [`Toolchain`] and folds any failure into
/// the returned [`BuildResult`]. Steps are strictly sequential; there is no
/// parallelism between targets.
///
/// # Examples
///
/// ```no_run
/// use scapp_bundler::bundler::{NoopLog, ProjectBuilder, ScappToolchain};
///
/// # async fn example(params: scapp_bundler::bundler::BuildParameters) -> scapp_bundler::bundler::Result<()> {
/// let builder = ProjectBuilder::new(params)?;
/// let result = builder.assemble(&ScappToolchain::new(), &NoopLog).await;
/// println!("build finished with exit code {}", result.exit_code);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ProjectBuilder {
    params: BuildParameters,
}

impl ProjectBuilder {
    /// Validates `params` and wraps them for assembly.
    pub fn new(params: BuildParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Returns the validated build parameters.
    pub fn params(&self) -> &BuildParameters {
        &self.params
    }

    /// Runs the whole pipeline.
    ///
    /// The first failing step stops the run: folder problems map to exit
    /// code 2 without touching any external tool, everything else to 1. The
    /// error message is appended to the build log as a `Stderr` line and the
    /// status is set to a terminal "Failed".
    pub async fn assemble<T: Toolchain>(&self, tools: &T, log: &dyn BuildLog) -> BuildResult {
        log.clear();

        match self.run_pipeline(tools, log).await {
            Ok(()) => {
                log.status("Done", Some(100));
                log.add("All targets complete.", LineClass::Result);
                BuildResult::success()
            }
            Err(e) => {
                log.status("Failed", None);
                log.add(&e.to_string(), LineClass::Stderr);
                let exit_code = match &e {
                    Error::UnreadableFolder { .. } | Error::UnwriteableFolder { .. } => 2,
                    _ => 1,
                };
                BuildResult::failure(exit_code)
            }
        }
    }

    async fn run_pipeline<T: Toolchain>(&self, tools: &T, log: &dyn BuildLog) -> Result<()> {
        let params = &self.params;

        if !fsutil::is_readable_dir(&params.resources) {
            return Err(Error::UnreadableFolder {
                path: params.resources.clone(),
            });
        }
        if !fsutil::ensure_writable_dir(&params.out) {
            return Err(Error::UnwriteableFolder {
                path: params.out.clone(),
            });
        }

        // One archive per run, shared by every target.
        let datfile = params.out.join(format!("{}.dat", params.exe));
        log.status("Packing resources...", Some(0));
        tools.pack_resources(&params.resources, &datfile, log).await?;

        let total = params.targets.len();
        for (index, target) in params.targets.iter().copied().enumerate() {
            log.status(
                &format!("({}/{}) {}", index + 1, total, target),
                Some((index * 100 / total) as u8),
            );
            log::info!("building target {target}");
            self.build_target(target, &datfile, tools, log).await?;
        }
        Ok(())
    }

    /// Builds one target: assembler discovery, icon production, assembly
    /// and, for macOS, bundle construction.
    async fn build_target<T: Toolchain>(
        &self,
        target: Target,
        datfile: &Path,
        tools: &T,
        log: &dyn BuildLog,
    ) -> Result<()> {
        let params = &self.params;

        let assembler = tools
            .locate_assembler(target)
            .ok_or(Error::AssemblerNotFound { target })?;

        let icon = self.produce_icon(target, tools, log).await?;
        let metadata = target.supports_metadata().then(|| params.metadata(icon));

        let exefile = fsutil::make_path(
            &params.out,
            target.out_subdirs(),
            &format!("{}{}", params.exe, target.exe_suffix()),
        )
        .await?;

        log.add(&format!("{target}: assembling..."), LineClass::Initial);
        let status = tools
            .assemble_exe(&assembler, datfile, &exefile, metadata.as_ref(), log)
            .await?;
        log_assemble_status(status, log);
        if status < 0 {
            return Err(Error::Assembly { target, status });
        }

        if target == Target::Mac {
            platform::macos::make_apple_bundle(&exefile, params).await?;
        }
        Ok(())
    }

    /// Produces the target's icon asset when one is required. Returns the
    /// `.ico` path for Windows targets; the macOS icon lands at a fixed
    /// location and is picked up by the bundle step instead.
    async fn produce_icon<T: Toolchain>(
        &self,
        target: Target,
        tools: &T,
        log: &dyn BuildLog,
    ) -> Result<Option<PathBuf>> {
        let params = &self.params;
        match target.icon_kind() {
            IconKind::Ico => {
                let icofile = params.out.join(format!("{}.ico", params.exe));
                tools.svg_to_ico(self.logo()?, &icofile, log).await?;
                Ok(Some(icofile))
            }
            IconKind::Icns => {
                tools.svg_to_icns(self.logo()?, &params.out, log).await?;
                Ok(None)
            }
            IconKind::None => Ok(None),
        }
    }

    fn logo(&self) -> Result<&PathBuf> {
        self.params
            .logo
            .as_ref()
            .ok_or(Error::MissingParameter { name: "logo" })
    }
}
