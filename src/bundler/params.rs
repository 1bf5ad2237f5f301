//! Build parameter records.

use std::path::PathBuf;

use crate::bundler::error::{Error, Result};
use crate::bundler::target::{IconKind, Target};

/// Product metadata embedded into assembled executables and the macOS
/// bundle manifest.
#[derive(Clone, Debug, Default)]
pub struct ProductInfo {
    /// Product name displayed to users.
    pub name: Option<String>,
    /// Version string, e.g. "1.0.0".
    pub version: Option<String>,
    /// Brief description of the application.
    pub description: Option<String>,
    /// Publishing company.
    pub company: Option<String>,
    /// Copyright line.
    pub copyright: Option<String>,
}

/// Validated input record for one assembly run.
///
/// Paths are expected to be absolute with forward-slash separators; the
/// resolution layer takes care of that before construction. The record is
/// immutable for the duration of a run; targets only see the per-target
/// [`ExeMetadata`] projection.
#[derive(Clone, Debug)]
pub struct BuildParameters {
    /// Application name; also the file stem of every produced artifact.
    pub exe: String,
    /// Folder with the application resources to pack.
    pub resources: PathBuf,
    /// Output root for all artifacts.
    pub out: PathBuf,
    /// Vector logo, required when a requested target needs an icon.
    pub logo: Option<PathBuf>,
    /// Product metadata for the assembler.
    pub product: ProductInfo,
    /// Targets to build, in order.
    pub targets: Vec<Target>,
}

impl BuildParameters {
    /// Checks the construction invariants: `exe`, `resources`, `out` and a
    /// non-empty target list are mandatory, and a logo must be present when
    /// any requested target has an icon requirement.
    pub fn validate(&self) -> Result<()> {
        if self.exe.is_empty() {
            return Err(Error::MissingParameter { name: "exe" });
        }
        if self.resources.as_os_str().is_empty() {
            return Err(Error::MissingParameter { name: "resources" });
        }
        if self.out.as_os_str().is_empty() {
            return Err(Error::MissingParameter { name: "out" });
        }
        if self.targets.is_empty() {
            return Err(Error::MissingParameter { name: "targets" });
        }
        let needs_logo = self
            .targets
            .iter()
            .any(|t| t.icon_kind() != IconKind::None);
        if needs_logo && self.logo.is_none() {
            return Err(Error::MissingParameter { name: "logo" });
        }
        Ok(())
    }

    /// Assembler metadata for one target. `icon` carries the produced
    /// `.ico` path on Windows targets and is `None` elsewhere.
    pub fn metadata(&self, icon: Option<PathBuf>) -> ExeMetadata {
        ExeMetadata {
            product: self.product.clone(),
            icon,
        }
    }

    /// Version string for manifests, defaulting to "1.0.0".
    pub fn version_or_default(&self) -> &str {
        self.product.version.as_deref().unwrap_or("1.0.0")
    }
}

/// Per-target projection of the build parameters handed to the assembler.
#[derive(Clone, Debug, Default)]
pub struct ExeMetadata {
    /// Product metadata to embed.
    pub product: ProductInfo,
    /// Icon file to embed, when the target format supports one.
    pub icon: Option<PathBuf>,
}

impl ExeMetadata {
    /// Flag list appended to the assembler invocation.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        let pairs = [
            ("-product-name", &self.product.name),
            ("-product-version", &self.product.version),
            ("-product-description", &self.product.description),
            ("-product-company", &self.product.company),
            ("-product-copyright", &self.product.copyright),
        ];
        for (flag, value) in pairs {
            if let Some(value) = value {
                args.push(flag.to_string());
                args.push(value.clone());
            }
        }
        if let Some(icon) = &self.icon {
            args.push("-icon".to_string());
            args.push(icon.display().to_string());
        }
        args
    }
}
