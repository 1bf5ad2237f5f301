//! Discovery of the external packfolder and scapp binaries.
//!
//! Both tools ship with the scapp SDK and live at fixed locations relative
//! to the installed bundler executable. packfolder additionally falls back
//! to a PATH lookup; the assembler does not, because each target needs its
//! own platform-specific binary.

use std::path::{Path, PathBuf};

use crate::bundler::target::Target;

/// Directory of the running executable, when it can be determined.
fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
}

fn first_existing(base: &Path, candidates: &[&str]) -> Option<PathBuf> {
    candidates.iter().map(|c| base.join(c)).find(|p| p.is_file())
}

/// Candidate locations of packfolder relative to the running executable.
fn packfolder_candidates() -> &'static [&'static str] {
    if cfg!(windows) {
        &["../packfolder.exe", "../../bin/windows/packfolder.exe"]
    } else if cfg!(target_os = "macos") {
        &["packfolder", "../../bin/macosx/packfolder"]
    } else {
        &["../packfolder", "../../bin/linux/packfolder"]
    }
}

/// Locates the packfolder resource packer: install-tree candidates first,
/// then PATH.
pub fn locate_packfolder() -> Option<PathBuf> {
    if let Some(dir) = exe_dir() {
        if let Some(found) = first_existing(&dir, packfolder_candidates()) {
            log::debug!("found packfolder at {}", found.display());
            return Some(found);
        }
    }
    match which::which("packfolder") {
        Ok(path) => {
            log::debug!("found packfolder on PATH: {}", path.display());
            Some(path)
        }
        Err(e) => {
            log::debug!("packfolder not found: {e}");
            None
        }
    }
}

/// Locates the scapp assembler for `target` in the install tree.
pub fn locate_assembler(target: Target) -> Option<PathBuf> {
    let dir = exe_dir()?;
    let found = first_existing(&dir, target.assembler_candidates());
    match &found {
        Some(path) => log::debug!("{target}: assembler at {}", path.display()),
        None => log::debug!("{target}: no assembler in install tree"),
    }
    found
}
