//! Parameter resolution: saved projects, config files and flag merging.
//!
//! Build parameters can come from three places, merged in this order:
//! a saved project (`--project <id|name>` against the settings file) or a
//! `--config` JSON document as the base, then CLI flags on top. Paths from a
//! config file resolve against the config's directory; everything else
//! resolves against the current working directory.

use std::path::{Path, PathBuf};

use path_absolutize::Absolutize;
use serde::Deserialize;

use crate::bundler::utils::fs::normalize_path;
use crate::bundler::{BuildParameters, ProductInfo, Target};
use crate::cli::Args;
use crate::error::{CliError, Result};

/// Name of the saved-projects settings file under the user settings
/// directory.
pub const SETTINGS_FILE: &str = "sciter-js-quark.json";

/// One project record, as stored in the settings file or a `--config`
/// document. All fields are optional; validation happens after merging.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub exe: Option<String>,
    pub resources: Option<String>,
    pub out: Option<String>,
    pub logo: Option<String>,
    pub product_name: Option<String>,
    pub product_version: Option<String>,
    pub product_description: Option<String>,
    pub product_company: Option<String>,
    pub product_copyright: Option<String>,
    pub targets: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    projects: Vec<ProjectRecord>,
}

/// Resolves `raw` against `base`, normalizing separators. Absolute paths
/// come back unchanged.
pub fn resolve_path(base: &Path, raw: &str) -> PathBuf {
    let path = PathBuf::from(normalize_path(raw));
    match path.absolutize_from(base) {
        Ok(abs) => abs.into_owned(),
        Err(_) => path,
    }
}

/// Location of the settings file, when a settings directory exists.
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(SETTINGS_FILE))
}

/// Looks `selector` up in the saved-projects settings file by exact `id` or
/// `name` match. A missing settings file behaves like an empty one.
pub fn load_project(selector: &str) -> Result<Option<ProjectRecord>> {
    match settings_path() {
        Some(path) => load_project_from(&path, selector),
        None => Ok(None),
    }
}

pub(crate) fn load_project_from(path: &Path, selector: &str) -> Result<Option<ProjectRecord>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path)?;
    let settings: SettingsFile = serde_json::from_str(&text)?;
    Ok(settings
        .projects
        .into_iter()
        .find(|p| p.id.as_deref() == Some(selector) || p.name.as_deref() == Some(selector)))
}

/// Loads a `--config` document and resolves its paths against the config
/// file's directory.
pub fn load_config(path: &Path) -> Result<ProjectRecord> {
    let text = std::fs::read_to_string(path).map_err(|e| CliError::ConfigRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let mut record: ProjectRecord = serde_json::from_str(&text)?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    record.resources = record
        .resources
        .take()
        .map(|v| resolve_path(base, &v).display().to_string());
    record.out = record
        .out
        .take()
        .map(|v| resolve_path(base, &v).display().to_string());
    record.logo = record
        .logo
        .take()
        .map(|v| resolve_path(base, &v).display().to_string());
    Ok(record)
}

/// Applies CLI flags over a base record and produces build parameters.
/// Remaining relative paths resolve against `cwd`; target names parse into
/// the closed target set here, so unknown names fail before any work starts.
pub fn resolve_parameters(
    args: &Args,
    base: Option<ProjectRecord>,
    cwd: &Path,
) -> Result<BuildParameters> {
    let base = base.unwrap_or_default();

    let exe = args.exe.clone().or(base.exe);
    let resources = args.resources.clone().or(base.resources);
    let out = args.out.clone().or(base.out);
    let logo = args.logo.clone().or(base.logo);

    let product = ProductInfo {
        name: args.product_name.clone().or(base.product_name),
        version: args.product_version.clone().or(base.product_version),
        description: args.product_description.clone().or(base.product_description),
        company: args.product_company.clone().or(base.product_company),
        copyright: args.product_copyright.clone().or(base.product_copyright),
    };

    let requested = {
        let flags = args.requested_targets();
        if flags.is_empty() {
            base.targets.unwrap_or_default()
        } else {
            flags
        }
    };
    let mut targets = Vec::with_capacity(requested.len());
    for name in &requested {
        targets.push(name.parse::<Target>().map_err(crate::error::BundlerError::Build)?);
    }

    let missing = |argument: &str| CliError::MissingArgument {
        argument: argument.to_string(),
    };
    let exe = exe.ok_or_else(|| missing("exe"))?;
    let resources = resources.ok_or_else(|| missing("resources"))?;
    let out = out.ok_or_else(|| missing("out"))?;
    if targets.is_empty() {
        return Err(missing("targets").into());
    }

    Ok(BuildParameters {
        exe,
        resources: resolve_path(cwd, &resources),
        out: resolve_path(cwd, &out),
        logo: logo.map(|l| resolve_path(cwd, &l)),
        product,
        targets,
    })
}
