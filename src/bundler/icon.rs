//! Logo conversion into platform icon formats.
//!
//! Windows `.ico` files come straight out of ImageMagick. The macOS `.icns`
//! path rasterizes the logo once at the largest iconset size, downscales the
//! remaining entries in-process and hands the finished `icon.iconset`
//! directory to iconutil.

use std::path::{Path, PathBuf};

use image::GenericImageView;
use image::imageops::FilterType;

use crate::bundler::error::{Error, Result};
use crate::bundler::logger::BuildLog;
use crate::bundler::process::run_command;
use crate::bundler::utils::fs as fsutil;

/// The ten entries of a macOS iconset: rendered pixel size and entry name.
pub const ICONSET: [(u32, &str); 10] = [
    (16, "16x16"),
    (32, "16x16@2x"),
    (32, "32x32"),
    (64, "32x32@2x"),
    (128, "128x128"),
    (256, "128x128@2x"),
    (256, "256x256"),
    (512, "256x256@2x"),
    (512, "512x512"),
    (1024, "512x512@2x"),
];

/// Pixel size and entry name of the master rasterization, the largest
/// iconset entry.
const MASTER_SIZE: u32 = 1024;
const MASTER_NAME: &str = "512x512@2x";

fn iconset_entry(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("icon_{name}.png"))
}

/// Converts the vector logo into a multi-resolution Windows `.ico` file.
pub async fn convert_svg_to_ico(svg: &Path, ico: &Path, log: &dyn BuildLog) -> Result<()> {
    let argv = vec![
        "magick".to_string(),
        "-density".to_string(),
        "256x256".to_string(),
        "-background".to_string(),
        "transparent".to_string(),
        svg.display().to_string(),
        "-define".to_string(),
        "icon:auto-resize".to_string(),
        "-colors".to_string(),
        "256".to_string(),
        ico.display().to_string(),
    ];
    let status = run_command(&argv, log).await?;
    if status != 0 {
        return Err(Error::IcoFailed { status });
    }
    Ok(())
}

/// Writes all ten iconset PNGs into `dir` from one master bitmap.
///
/// Entries whose size matches the master are saved as-is; the rest are
/// Lanczos-resampled.
pub(crate) fn write_iconset(master: &image::DynamicImage, dir: &Path) -> Result<()> {
    for (size, name) in ICONSET {
        let path = iconset_entry(dir, name);
        if master.dimensions() == (size, size) {
            master.save(&path)?;
        } else {
            master
                .resize_exact(size, size, FilterType::Lanczos3)
                .save(&path)?;
        }
    }
    Ok(())
}

/// Converts the vector logo into `<out_dir>/icon.icns`.
///
/// Produces the intermediate `icon.iconset` directory, rasterizing the logo
/// once at 1024x1024 via ImageMagick and downscaling the other nine entries
/// from that bitmap, then runs `iconutil --convert icns` on the directory.
pub async fn convert_svg_to_icns(svg: &Path, out_dir: &Path, log: &dyn BuildLog) -> Result<()> {
    let iconset_dir = fsutil::make_path(out_dir, &["icon.iconset"], "").await?;

    let master_path = iconset_entry(&iconset_dir, MASTER_NAME);
    let argv = vec![
        "magick".to_string(),
        "-density".to_string(),
        "256x256".to_string(),
        "-background".to_string(),
        "transparent".to_string(),
        svg.display().to_string(),
        "-resize".to_string(),
        format!("{MASTER_SIZE}x{MASTER_SIZE}"),
        master_path.display().to_string(),
    ];
    let status = run_command(&argv, log).await?;
    if status != 0 {
        return Err(Error::IcnsFailed { status });
    }

    let master = image::open(&master_path).map_err(|source| Error::IconMaster {
        path: master_path.clone(),
        source,
    })?;
    write_iconset(&master, &iconset_dir)?;

    let argv = vec![
        "iconutil".to_string(),
        "--convert".to_string(),
        "icns".to_string(),
        iconset_dir.display().to_string(),
    ];
    let status = run_command(&argv, log).await?;
    if status != 0 {
        return Err(Error::IcnsFailed { status });
    }
    Ok(())
}
