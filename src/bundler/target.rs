//! Build targets and their platform tables.
//!
//! Each target maps to an assembler search list, an output subdirectory
//! layout and an icon requirement. Keeping the mapping in one closed enum
//! makes the per-target dispatch exhaustive at compile time.

use std::fmt;
use std::str::FromStr;

use crate::bundler::error::Error;

/// Icon format a target needs before assembly.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IconKind {
    /// Windows `.ico` file.
    Ico,
    /// macOS `.icns` bundle.
    Icns,
    /// No icon asset.
    None,
}

/// One (platform, architecture) pair a build run can produce.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Target {
    /// Windows, 32-bit x86
    WinX32,
    /// Windows, 64-bit x86
    WinX64,
    /// Windows, 64-bit ARM
    WinArm64,
    /// macOS (universal stub)
    Mac,
    /// Linux, 64-bit x86
    LinuxX64,
    /// Linux, 32-bit ARM
    LinuxArm32,
}

impl Target {
    /// Every supported target, in canonical order.
    pub const ALL: [Target; 6] = [
        Target::WinX32,
        Target::WinX64,
        Target::WinArm64,
        Target::Mac,
        Target::LinuxX64,
        Target::LinuxArm32,
    ];

    /// Wire name used by flags, config files and log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::WinX32 => "winX32",
            Target::WinX64 => "winX64",
            Target::WinArm64 => "winARM64",
            Target::Mac => "mac",
            Target::LinuxX64 => "linuxX64",
            Target::LinuxArm32 => "linuxARM32",
        }
    }

    /// Output subdirectories under the output root.
    pub fn out_subdirs(&self) -> &'static [&'static str] {
        match self {
            Target::WinX32 => &["windows", "x32"],
            Target::WinX64 => &["windows", "x64"],
            Target::WinArm64 => &["windows", "arm64"],
            Target::Mac => &["macos"],
            Target::LinuxX64 => &["linux", "x64"],
            Target::LinuxArm32 => &["linux", "arm32"],
        }
    }

    /// Suffix of the produced executable.
    pub fn exe_suffix(&self) -> &'static str {
        match self {
            Target::WinX32 | Target::WinX64 | Target::WinArm64 => ".exe",
            Target::Mac | Target::LinuxX64 | Target::LinuxArm32 => "",
        }
    }

    /// Icon asset the target needs before assembly.
    pub fn icon_kind(&self) -> IconKind {
        match self {
            Target::WinX32 | Target::WinX64 | Target::WinArm64 => IconKind::Ico,
            Target::Mac => IconKind::Icns,
            Target::LinuxX64 | Target::LinuxArm32 => IconKind::None,
        }
    }

    /// Candidate locations of the scapp assembler, relative to the directory
    /// of the running executable. Checked in order: SDK sibling layout
    /// first, then the `bin/` tree of an unpacked SDK.
    pub fn assembler_candidates(&self) -> &'static [&'static str] {
        match self {
            Target::WinX32 => &["../x32/scapp.exe", "../../bin/windows/x32/scapp.exe"],
            Target::WinX64 => &["../x64/scapp.exe", "../../bin/windows/x64/scapp.exe"],
            Target::WinArm64 => &["../arm64/scapp.exe", "../../bin/windows/arm64/scapp.exe"],
            Target::Mac => &["scapp", "../../bin/macosx/scapp"],
            Target::LinuxX64 => &["../x64/scapp", "../../bin/linux/x64/scapp"],
            Target::LinuxArm32 => &["../arm32/scapp", "../../bin/linux/arm32/scapp"],
        }
    }

    /// True when the assembler accepts product metadata for this target.
    /// Metadata embedding is a Windows/macOS capability only.
    pub fn supports_metadata(&self) -> bool {
        !matches!(self, Target::LinuxX64 | Target::LinuxArm32)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "winX32" => Ok(Target::WinX32),
            "winX64" => Ok(Target::WinX64),
            "winARM64" => Ok(Target::WinArm64),
            "mac" => Ok(Target::Mac),
            "linuxX64" => Ok(Target::LinuxX64),
            "linuxARM32" => Ok(Target::LinuxArm32),
            other => Err(Error::UnknownTarget(other.to_string())),
        }
    }
}
