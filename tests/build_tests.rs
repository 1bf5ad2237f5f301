//! Orchestration scenarios against a stub toolchain.
//!
//! The stub fabricates every external artifact (archive, icons, assembled
//! executables) and records invocations, so the full pipeline runs without
//! the scapp SDK, ImageMagick or iconutil installed.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use scapp_bundler::bundler::error::Result;
use scapp_bundler::bundler::{
    BuildLog, BuildParameters, ExeMetadata, LineClass, ProductInfo, ProjectBuilder, Target,
    Toolchain,
};

#[derive(Default)]
struct RecordingLog {
    lines: Mutex<Vec<(LineClass, String)>>,
    statuses: Mutex<Vec<String>>,
}

impl RecordingLog {
    fn has_line(&self, class: LineClass, needle: &str) -> bool {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .any(|(c, t)| *c == class && t.contains(needle))
    }

    fn has_status(&self, needle: &str) -> bool {
        self.statuses
            .lock()
            .unwrap()
            .iter()
            .any(|s| s.contains(needle))
    }
}

impl BuildLog for RecordingLog {
    fn add(&self, text: &str, class: LineClass) {
        self.lines.lock().unwrap().push((class, text.to_string()));
    }

    fn status(&self, text: &str, _progress: Option<u8>) {
        self.statuses.lock().unwrap().push(text.to_string());
    }

    fn clear(&self) {
        self.lines.lock().unwrap().clear();
        self.statuses.lock().unwrap().clear();
    }
}

/// Toolchain stub: fabricates artifacts, records invocations, and can fail
/// assembly for output paths containing a marker.
#[derive(Default)]
struct StubToolchain {
    pack_calls: AtomicUsize,
    assemble_calls: AtomicUsize,
    last_metadata: Mutex<Option<ExeMetadata>>,
    fail_on: Option<(&'static str, i32)>,
}

impl StubToolchain {
    fn new() -> Self {
        Self::default()
    }

    fn failing(marker: &'static str, status: i32) -> Self {
        Self {
            fail_on: Some((marker, status)),
            ..Self::default()
        }
    }
}

impl Toolchain for StubToolchain {
    fn locate_assembler(&self, _target: Target) -> Option<PathBuf> {
        Some(PathBuf::from("/opt/scapp-sdk/scapp"))
    }

    async fn pack_resources(
        &self,
        _folder: &Path,
        datfile: &Path,
        _log: &dyn BuildLog,
    ) -> Result<()> {
        self.pack_calls.fetch_add(1, Ordering::SeqCst);
        std::fs::write(datfile, b"packed")?;
        Ok(())
    }

    async fn svg_to_ico(&self, _svg: &Path, ico: &Path, _log: &dyn BuildLog) -> Result<()> {
        std::fs::write(ico, b"ico")?;
        Ok(())
    }

    async fn svg_to_icns(&self, _svg: &Path, out_dir: &Path, _log: &dyn BuildLog) -> Result<()> {
        std::fs::create_dir_all(out_dir.join("icon.iconset"))?;
        std::fs::write(out_dir.join("icon.icns"), b"icns")?;
        Ok(())
    }

    async fn assemble_exe(
        &self,
        _assembler: &Path,
        _datfile: &Path,
        exefile: &Path,
        metadata: Option<&ExeMetadata>,
        _log: &dyn BuildLog,
    ) -> Result<i32> {
        self.assemble_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_metadata.lock().unwrap() = metadata.cloned();
        if let Some((marker, status)) = &self.fail_on {
            if exefile.display().to_string().contains(marker) {
                return Ok(*status);
            }
        }
        std::fs::write(exefile, b"assembled")?;
        Ok(0)
    }
}

fn params(root: &Path, targets: Vec<Target>) -> BuildParameters {
    BuildParameters {
        exe: "MyApp".to_string(),
        resources: root.join("assets"),
        out: root.join("dist"),
        logo: Some(root.join("logo.svg")),
        product: ProductInfo {
            name: Some("My App".to_string()),
            version: Some("2.5.0".to_string()),
            ..Default::default()
        },
        targets,
    }
}

fn setup(root: &Path) {
    std::fs::create_dir_all(root.join("assets")).unwrap();
    std::fs::write(root.join("assets/index.htm"), "<html></html>").unwrap();
    std::fs::write(root.join("logo.svg"), "<svg></svg>").unwrap();
}

#[tokio::test]
async fn linux_x64_scenario_produces_the_documented_layout() {
    let tmp = tempfile::tempdir().unwrap();
    setup(tmp.path());

    let builder = ProjectBuilder::new(params(tmp.path(), vec![Target::LinuxX64])).unwrap();
    let tools = StubToolchain::new();
    let log = RecordingLog::default();

    let result = builder.assemble(&tools, &log).await;

    assert!(result.ok);
    assert_eq!(result.exit_code, 0);
    assert!(tmp.path().join("dist/MyApp.dat").is_file());
    assert!(tmp.path().join("dist/linux/x64/MyApp").is_file());
    assert!(log.has_status("(1/1) linuxX64"));
    assert!(log.has_line(LineClass::Result, "All targets complete."));
}

#[tokio::test]
async fn resources_are_packed_exactly_once_for_many_targets() {
    let tmp = tempfile::tempdir().unwrap();
    setup(tmp.path());

    let builder =
        ProjectBuilder::new(params(tmp.path(), vec![Target::LinuxX64, Target::LinuxArm32]))
            .unwrap();
    let tools = StubToolchain::new();

    let result = builder.assemble(&tools, &RecordingLog::default()).await;

    assert!(result.ok);
    assert_eq!(tools.pack_calls.load(Ordering::SeqCst), 1);
    assert_eq!(tools.assemble_calls.load(Ordering::SeqCst), 2);
    assert!(tmp.path().join("dist/linux/x64/MyApp").is_file());
    assert!(tmp.path().join("dist/linux/arm32/MyApp").is_file());
}

#[tokio::test]
async fn missing_resources_folder_fails_before_packing() {
    let tmp = tempfile::tempdir().unwrap();
    // No assets folder on purpose.
    std::fs::write(tmp.path().join("logo.svg"), "<svg></svg>").unwrap();

    let builder = ProjectBuilder::new(params(tmp.path(), vec![Target::LinuxX64])).unwrap();
    let tools = StubToolchain::new();
    let log = RecordingLog::default();

    let result = builder.assemble(&tools, &log).await;

    assert!(!result.ok);
    assert_eq!(result.exit_code, 2);
    assert_eq!(tools.pack_calls.load(Ordering::SeqCst), 0);
    assert!(!tmp.path().join("dist/MyApp.dat").exists());
    assert!(log.has_line(LineClass::Stderr, "not a readable folder"));
}

#[tokio::test]
async fn assembler_failure_aborts_remaining_targets() {
    let tmp = tempfile::tempdir().unwrap();
    setup(tmp.path());

    let builder =
        ProjectBuilder::new(params(tmp.path(), vec![Target::WinX64, Target::LinuxX64])).unwrap();
    let tools = StubToolchain::failing("windows", -1);
    let log = RecordingLog::default();

    let result = builder.assemble(&tools, &log).await;

    assert!(!result.ok);
    assert_eq!(result.exit_code, 1);
    // The second target never runs.
    assert_eq!(tools.assemble_calls.load(Ordering::SeqCst), 1);
    assert!(!tmp.path().join("dist/linux/x64/MyApp").exists());
    assert!(log.has_line(LineClass::Stderr, "no .dat file"));
    assert!(log.has_line(LineClass::Stderr, "assemble failed (-1)"));
    assert!(log.has_status("Failed"));
}

#[tokio::test]
async fn windows_target_injects_the_ico_into_metadata() {
    let tmp = tempfile::tempdir().unwrap();
    setup(tmp.path());

    let builder = ProjectBuilder::new(params(tmp.path(), vec![Target::WinX64])).unwrap();
    let tools = StubToolchain::new();

    let result = builder.assemble(&tools, &RecordingLog::default()).await;

    assert!(result.ok);
    assert!(tmp.path().join("dist/MyApp.ico").is_file());
    assert!(tmp.path().join("dist/windows/x64/MyApp.exe").is_file());

    let metadata = tools.last_metadata.lock().unwrap().clone().unwrap();
    assert_eq!(metadata.icon, Some(tmp.path().join("dist/MyApp.ico")));
    assert_eq!(metadata.product.name.as_deref(), Some("My App"));
}

#[tokio::test]
async fn linux_targets_pass_no_metadata() {
    let tmp = tempfile::tempdir().unwrap();
    setup(tmp.path());

    let builder = ProjectBuilder::new(params(tmp.path(), vec![Target::LinuxX64])).unwrap();
    let tools = StubToolchain::new();
    builder.assemble(&tools, &RecordingLog::default()).await;

    assert!(tools.last_metadata.lock().unwrap().is_none());
}

#[tokio::test]
async fn mac_scenario_builds_a_complete_app_bundle() {
    let tmp = tempfile::tempdir().unwrap();
    setup(tmp.path());

    let builder = ProjectBuilder::new(params(tmp.path(), vec![Target::Mac])).unwrap();
    let tools = StubToolchain::new();

    let result = builder.assemble(&tools, &RecordingLog::default()).await;

    assert!(result.ok);
    assert!(tmp.path().join("dist/icon.icns").is_file());

    let contents = tmp.path().join("dist/macos/MyApp.app/Contents");
    let plist = std::fs::read_to_string(contents.join("Info.plist")).unwrap();
    assert!(plist.contains("<string>MyApp</string>"));
    assert!(plist.contains("<string>2.5.0</string>"));

    let bundled_exe = contents.join("MacOS/MyApp");
    assert!(bundled_exe.is_file());
    assert!(contents.join("Resources/MyApp.icns").is_file());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&bundled_exe).unwrap().permissions().mode();
        assert_ne!(mode & 0o100, 0, "bundled executable must be executable");
    }
}

#[tokio::test]
async fn rerunning_a_build_overwrites_previous_artifacts() {
    let tmp = tempfile::tempdir().unwrap();
    setup(tmp.path());

    let builder = ProjectBuilder::new(params(tmp.path(), vec![Target::LinuxX64])).unwrap();

    for _ in 0..2 {
        let result = builder
            .assemble(&StubToolchain::new(), &RecordingLog::default())
            .await;
        assert!(result.ok);
    }
    assert_eq!(
        std::fs::read(tmp.path().join("dist/MyApp.dat")).unwrap(),
        b"packed"
    );
}

#[test]
fn construction_rejects_incomplete_parameters() {
    let tmp = tempfile::tempdir().unwrap();

    let empty_targets = params(tmp.path(), Vec::new());
    assert!(ProjectBuilder::new(empty_targets).is_err());

    let mut no_logo = params(tmp.path(), vec![Target::WinX64]);
    no_logo.logo = None;
    assert!(ProjectBuilder::new(no_logo).is_err());

    let mut linux_no_logo = params(tmp.path(), vec![Target::LinuxX64]);
    linux_no_logo.logo = None;
    assert!(ProjectBuilder::new(linux_no_logo).is_ok());
}
