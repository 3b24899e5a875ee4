#![allow(dead_code)]

use engine::common::ActionError;
use engine::config::{EngineConfig, TargetPaths};
use engine::deploy::Deployer;
use engine::palette::PalettePipeline;
use engine::registry::ThemeRegistry;
use engine::session::DesktopSession;
use engine::state::StateStore;
use engine::sync::{FsLinker, HardLinker};
use image::{Rgb, RgbImage};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// A session call as seen by [`RecordingSession`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ReloadWindowManager,
    SignalStatusBar,
    ReloadTerminal(Option<PathBuf>),
    EnsureWallpaperDaemon(Duration),
    SetWallpaper(PathBuf, Duration),
    WriteSetting(String, String),
    SetCursor(String, u32),
}

impl Call {
    pub fn is_reload(&self) -> bool {
        matches!(
            self,
            Call::ReloadWindowManager | Call::SignalStatusBar | Call::ReloadTerminal(_)
        )
    }
}

/// In-memory desktop that records every call.
#[derive(Default)]
pub struct RecordingSession {
    calls: Mutex<Vec<Call>>,
    settings: Mutex<HashMap<String, String>>,
    fail_everything: bool,
}

impl RecordingSession {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A session on which every action fails.
    pub fn broken() -> Arc<Self> {
        Arc::new(Self {
            fail_everything: true,
            ..Self::default()
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    pub fn setting(&self, key: &str) -> Option<String> {
        self.settings.lock().unwrap().get(key).cloned()
    }

    fn record(&self, call: Call) -> Result<(), ActionError> {
        self.calls.lock().unwrap().push(call);
        if self.fail_everything {
            Err(ActionError::failed("test", "session unavailable"))
        } else {
            Ok(())
        }
    }
}

impl DesktopSession for RecordingSession {
    fn reload_window_manager(&self) -> Result<(), ActionError> {
        self.record(Call::ReloadWindowManager)
    }

    fn signal_status_bar(&self) -> Result<(), ActionError> {
        self.record(Call::SignalStatusBar)
    }

    fn reload_terminal(&self, config: Option<&Path>) -> Result<(), ActionError> {
        self.record(Call::ReloadTerminal(config.map(Path::to_path_buf)))
    }

    fn ensure_wallpaper_daemon(&self, settle: Duration) -> Result<(), ActionError> {
        self.record(Call::EnsureWallpaperDaemon(settle))
    }

    fn set_wallpaper(&self, image: &Path, transition: Duration) -> Result<(), ActionError> {
        self.record(Call::SetWallpaper(image.to_path_buf(), transition))
    }

    fn read_setting(&self, key: &str) -> Result<Option<String>, ActionError> {
        if self.fail_everything {
            return Err(ActionError::failed("read setting", "session unavailable"));
        }
        Ok(self.settings.lock().unwrap().get(key).cloned())
    }

    fn write_setting(&self, key: &str, value: &str) -> Result<(), ActionError> {
        self.record(Call::WriteSetting(key.to_string(), value.to_string()))?;
        self.settings
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn set_cursor(&self, theme: &str, size: u32) -> Result<(), ActionError> {
        self.record(Call::SetCursor(theme.to_string(), size))
    }
}

/// Linker for filesystems without hardlink support.
pub struct RefusingLinker;

impl HardLinker for RefusingLinker {
    fn hard_link(&self, _src: &Path, _dst: &Path) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "hardlinks not supported",
        ))
    }
}

/// Throwaway `~/.config` with a themes root inside it.
pub struct TestEnv {
    pub tmp: TempDir,
    pub paths: TargetPaths,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let paths = TargetPaths::under(&tmp.path().join(".config"));
        fs::create_dir_all(&paths.themes_dir).unwrap();
        Self { tmp, paths }
    }

    pub fn home(&self) -> &Path {
        self.tmp.path()
    }

    pub fn theme(&self, id: &str) -> ThemeBuilder {
        ThemeBuilder::new(self.paths.themes_dir.join(id))
    }

    pub fn state(&self) -> StateStore {
        StateStore::new(&self.paths.state_file)
    }

    pub fn deployer(&self, session: Arc<RecordingSession>) -> Deployer {
        self.deployer_with_linker(session, Arc::new(FsLinker))
    }

    pub fn deployer_with_linker(
        &self,
        session: Arc<RecordingSession>,
        linker: Arc<dyn HardLinker>,
    ) -> Deployer {
        Deployer::new(
            EngineConfig::new(self.paths.clone()),
            Arc::new(ThemeRegistry::new(&self.paths.themes_dir)),
            Arc::new(StateStore::new(&self.paths.state_file)),
            session,
            Arc::new(PalettePipeline::new(&self.paths.palette_css)),
            linker,
        )
    }

    /// Every regular file below the home directory, relative, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(self.home())
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path().strip_prefix(self.home()).unwrap().to_path_buf())
            .collect();
        files.sort();
        files
    }
}

/// Writes a theme directory file by file.
pub struct ThemeBuilder {
    dir: PathBuf,
}

impl ThemeBuilder {
    fn new(dir: PathBuf) -> Self {
        fs::create_dir_all(&dir).unwrap();
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn descriptor(self, json: &str) -> Self {
        fs::write(self.dir.join("theme.json"), json).unwrap();
        self
    }

    pub fn file(self, rel: &str, content: &str) -> Self {
        let path = self.dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        self
    }

    pub fn wallpaper(self, rel: &str, color: [u8; 3]) -> Self {
        write_png(&self.dir.join(rel), color);
        self
    }
}

/// Small two-tone PNG dominated by `color`.
pub fn write_png(path: &Path, color: [u8; 3]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let img = RgbImage::from_fn(24, 16, |x, _| {
        if x < 18 {
            Rgb(color)
        } else {
            Rgb([255 - color[0], 255 - color[1], 255 - color[2]])
        }
    });
    img.save(path).unwrap();
}
