//! Resource packing via the external packfolder tool.

use std::path::Path;

use crate::bundler::error::{Error, Result};
use crate::bundler::logger::BuildLog;
use crate::bundler::process::run_command;
use crate::bundler::tools;

/// Packs `folder` into the single `datfile` archive.
///
/// Invokes `packfolder <folder> <datfile> -binary`. Re-running with the same
/// inputs overwrites the previous archive; any non-zero exit status is an
/// error carrying the raw code.
pub async fn package_resources(folder: &Path, datfile: &Path, log: &dyn BuildLog) -> Result<()> {
    let packfolder = tools::locate_packfolder().ok_or(Error::ToolNotFound { tool: "packfolder" })?;

    let argv = vec![
        packfolder.display().to_string(),
        folder.display().to_string(),
        datfile.display().to_string(),
        "-binary".to_string(),
    ];
    let status = run_command(&argv, log).await?;
    if status != 0 {
        return Err(Error::PackFailed {
            datfile: datfile.to_path_buf(),
            status,
        });
    }
    Ok(())
}
