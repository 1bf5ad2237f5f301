//! macOS `.app` bundle construction.
//!
//! Runs after the assembler has produced the bare macOS executable: builds
//! the `<out>/macos/<name>.app` directory tree, renders the bundle manifest
//! and moves the executable and icon into place.

use std::path::Path;

use handlebars::Handlebars;
use serde_json::json;

use crate::bundler::error::Result;
use crate::bundler::params::BuildParameters;
use crate::bundler::utils::fs as fsutil;

/// Bundle manifest template. `{{name}}` and `{{version}}` are the only
/// substitution points.
const INFO_PLIST_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
  <key>CFBundleDevelopmentRegion</key>
  <string>en</string>
  <key>CFBundleVersion</key>
  <string>{{version}}</string>
  <key>CFBundleShortVersionString</key>
  <string>{{version}}</string>
  <key>CFBundleIdentifier</key>
  <string>{{name}}</string>
  <key>CFBundlePackageType</key>
  <string>APPL</string>
  <key>CFBundleSignature</key>
  <string>MOOS</string>
  <key>LSMinimumSystemVersion</key>
  <string>10.9</string>
  <key>NSMainNibFile</key>
  <string>MainMenu</string>
  <key>NSPrincipalClass</key>
  <string>NSApplication</string>
  <key>CFBundleName</key>
  <string>{{name}}</string>
  <key>CFBundleExecutable</key>
  <string>{{name}}</string>
  <key>CFBundleIconFile</key>
  <string>{{name}}.icns</string>
</dict>
</plist>
"#;

/// Renders the bundle manifest for `name` and `version`.
fn render_info_plist(name: &str, version: &str) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    let rendered = handlebars.render_template(
        INFO_PLIST_TEMPLATE,
        &json!({ "name": name, "version": version }),
    )?;
    Ok(rendered)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}

/// Builds `<out>/macos/<exe>.app` around the assembled executable.
///
/// The assembled stub lands in `Contents/MacOS` with the executable bit
/// set, the previously produced `<out>/icon.icns` in `Contents/Resources`,
/// and the rendered manifest in `Contents/Info.plist`. Existing destination
/// files are overwritten.
pub async fn make_apple_bundle(exefile: &Path, params: &BuildParameters) -> Result<()> {
    let app = format!("{}.app", params.exe);
    fsutil::make_path(&params.out, &["macos", &app, "Contents", "MacOS"], "").await?;
    fsutil::make_path(&params.out, &["macos", &app, "Contents", "Resources"], "").await?;

    let app_path = params.out.join("macos").join(&app);
    set_mode(&app_path, 0o755)?;

    let contents = app_path.join("Contents");
    let plist = render_info_plist(&params.exe, params.version_or_default())?;
    tokio::fs::write(contents.join("Info.plist"), plist).await?;

    let bundled_exe = contents.join("MacOS").join(&params.exe);
    fsutil::copy_file_force(exefile, &bundled_exe).await?;
    set_mode(&bundled_exe, 0o755)?;

    let icns = params.out.join("icon.icns");
    let bundled_icns = contents.join("Resources").join(format!("{}.icns", params.exe));
    fsutil::copy_file_force(&icns, &bundled_icns).await?;

    Ok(())
}
