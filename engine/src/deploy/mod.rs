//! # Deployment Orchestrator
//!
//! [`Deployer::apply_theme`] pushes one theme onto every live target.
//!
//! ## Sequence
//!
//! 1. Load the state document and the turbo preference. Later steps compare
//!    against this snapshot.
//! 2. Resolve the theme. An unknown id fails here, before anything is
//!    written.
//! 3. Create the destination directories.
//! 4. Fan out one task per [`Target`] onto the bounded [`TaskPool`].
//! 5. Await all of them. A failed or panicked task only marks its target.
//! 6. Apply the cursor theme to the running session.
//! 7. Switch the wallpaper and derive the palette when the wallpaper
//!    changed. In turbo mode the palette runs detached.
//! 8. Reload the window manager and signal the status bar, each only if
//!    its file changed.
//! 9. Commit the new state.
//!
//! Only [`ApplyError::ThemeNotFound`] reaches the caller; every other problem
//! is logged and recorded in the [`ApplyReport`].

mod report;
mod targets;

pub use report::{ApplyReport, ReloadAction, Target, TargetStatus};

use crate::common::{ActionError, ApplyError, StateError};
use crate::config::{EngineConfig, TargetPaths, Tuning};
use crate::palette::PalettePipeline;
use crate::registry::{Theme, ThemeRegistry};
use crate::session::DesktopSession;
use crate::state::StateStore;
use crate::sync::{FileSync, FsLinker, HardLinker};
use crate::taskpool::TaskPool;
use futures::future::join_all;
use std::sync::Arc;
use targets::{TargetJob, TargetResult};

/// Applies themes. Holds every collaborator it talks to; nothing is global.
pub struct Deployer {
    config: EngineConfig,
    paths: Arc<TargetPaths>,
    registry: Arc<ThemeRegistry>,
    state: Arc<StateStore>,
    session: Arc<dyn DesktopSession>,
    palette: Arc<PalettePipeline>,
    linker: Arc<dyn HardLinker>,
    pool: TaskPool,
}

impl Deployer {
    pub fn new(
        config: EngineConfig,
        registry: Arc<ThemeRegistry>,
        state: Arc<StateStore>,
        session: Arc<dyn DesktopSession>,
        palette: Arc<PalettePipeline>,
        linker: Arc<dyn HardLinker>,
    ) -> Self {
        let pool = TaskPool::new(config.workers);
        let paths = Arc::new(config.paths.clone());
        Self {
            config,
            paths,
            registry,
            state,
            session,
            palette,
            linker,
            pool,
        }
    }

    /// Wire the standard collaborators from `config`'s paths.
    pub fn from_config(config: EngineConfig, session: Arc<dyn DesktopSession>) -> Self {
        let registry = Arc::new(ThemeRegistry::new(&config.paths.themes_dir));
        let state = Arc::new(StateStore::new(&config.paths.state_file));
        let palette = Arc::new(PalettePipeline::new(&config.paths.palette_css));
        Self::new(config, registry, state, session, palette, Arc::new(FsLinker))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    pub fn state(&self) -> &StateStore {
        &self.state
    }

    pub fn palette(&self) -> &Arc<PalettePipeline> {
        &self.palette
    }

    pub fn list_themes(&self) -> Vec<Theme> {
        self.registry.list_themes()
    }

    pub fn get_turbo(&self) -> bool {
        self.state.get_turbo()
    }

    pub fn set_turbo(&self, enabled: bool) -> Result<(), StateError> {
        self.state.set_turbo(enabled)?;
        log::info!("Turbo {}", if enabled { "enabled" } else { "disabled" });
        Ok(())
    }

    pub async fn apply_theme(&self, id: &str) -> Result<ApplyReport, ApplyError> {
        let mut state = self.state.load();
        let turbo = self.state.turbo_of(&state);
        let tuning = Tuning::for_turbo(turbo);

        let Some(theme) = self.registry.find(id) else {
            log::warn!("Theme '{id}' not found");
            return Err(ApplyError::ThemeNotFound { id: id.to_string() });
        };
        log::info!(
            "Applying theme '{}' (turbo {})",
            theme.id,
            if turbo { "on" } else { "off" }
        );

        if let Err(e) = self.paths.ensure_dirs() {
            log::warn!("Failed to create target directories: {e}");
        }

        let theme = Arc::new(theme);
        let mut report = ApplyReport::new(&theme.id, turbo);
        self.deploy_targets(&theme, turbo, &mut report).await;

        if let Some(cursor) = theme.desktop.cursor_theme.clone() {
            let session = self.session.clone();
            let size = self.config.cursor_size;
            if let Err(e) = self
                .run_action("set cursor", move || session.set_cursor(&cursor, size))
                .await
            {
                log::warn!("Cursor not applied: {e}");
            }
        }

        if let Some(wallpaper) = theme.wallpaper.clone().filter(|w| w.is_file()) {
            let recorded = wallpaper.to_string_lossy().into_owned();
            if recorded == state.last_wallpaper {
                log::debug!("Wallpaper unchanged: {recorded}");
            } else {
                let session = self.session.clone();
                let image = wallpaper.clone();
                let shown = self
                    .run_action("set wallpaper", move || {
                        session.ensure_wallpaper_daemon(tuning.daemon_settle)?;
                        session.set_wallpaper(&image, tuning.wallpaper_transition)
                    })
                    .await;
                if let Err(e) = shown {
                    log::warn!("Wallpaper not set: {e}");
                }

                let task = self.palette.spawn_detached(wallpaper);
                if turbo {
                    report.palette = Some(task);
                } else if let Err(e) = task.wait().await {
                    log::warn!("Palette not updated: {e}");
                }

                state.last_wallpaper = recorded;
                report.wallpaper_changed = true;
            }
        }

        if report.changed(Target::StatusBar) {
            let session = self.session.clone();
            if let Err(e) = self
                .run_action("signal status bar", move || session.signal_status_bar())
                .await
            {
                log::warn!("Waybar reload failed: {e}");
            }
            report.reloads.push(ReloadAction::StatusBar);
        }
        if report.changed(Target::WindowManager) {
            let session = self.session.clone();
            if let Err(e) = self
                .run_action("reload window manager", move || {
                    session.reload_window_manager()
                })
                .await
            {
                log::warn!("Hyprland reload failed: {e}");
            }
            report.reloads.push(ReloadAction::WindowManager);
        }

        state.last_theme = theme.id.clone();
        state.turbo = Some(turbo);
        if let Err(e) = self.state.save(&state) {
            log::error!("Failed to save state: {e}");
        }

        log::info!("Theme '{}' applied", theme.id);
        Ok(report)
    }

    /// Run every target on the pool and collect the results in
    /// [`Target::ALL`] order.
    async fn deploy_targets(&self, theme: &Arc<Theme>, turbo: bool, report: &mut ApplyReport) {
        let sync = FileSync::with_linker(turbo, self.linker.clone());

        let handles = Target::ALL.map(|target| {
            let job = TargetJob {
                target,
                theme: theme.clone(),
                sync: sync.clone(),
                paths: self.paths.clone(),
                session: self.session.clone(),
            };
            self.pool.spawn_blocking(move || job.run())
        });
        let joined = join_all(handles).await;

        for (target, outcome) in Target::ALL.into_iter().zip(joined) {
            let result = match outcome {
                Ok(Ok(result)) => result,
                Ok(Err(e)) => TargetResult::failed(e.to_string()),
                Err(e) => TargetResult::failed(e.to_string()),
            };

            match &result.status {
                TargetStatus::Failed { reason } => log::error!("{target} target failed: {reason}"),
                status => log::debug!("{target} target {status}"),
            }
            if result.reloaded {
                report.reloads.push(ReloadAction::Terminal);
            }
            report.targets.push((target, result.status));
        }
    }

    /// Run a blocking session call on the pool.
    async fn run_action<F>(&self, action: &str, func: F) -> Result<(), ActionError>
    where
        F: FnOnce() -> Result<(), ActionError> + Send + 'static,
    {
        match self.pool.spawn_blocking(func).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(ActionError::failed(action, e.to_string())),
            Err(e) => Err(ActionError::failed(action, e.to_string())),
        }
    }
}
