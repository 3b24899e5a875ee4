//! Blocking per-target work, run on the task pool.

use super::report::{Target, TargetStatus};
use crate::config::TargetPaths;
use crate::registry::Theme;
use crate::session::{DesktopSession, apply_desktop_settings};
use crate::sync::{FileSync, SyncOutcome};
use std::sync::Arc;

/// Result of one target task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct TargetResult {
    pub status: TargetStatus,
    /// The task itself issued a reload.
    pub reloaded: bool,
}

impl TargetResult {
    fn skipped() -> Self {
        Self {
            status: TargetStatus::Skipped,
            reloaded: false,
        }
    }

    fn synced(changed: bool) -> Self {
        Self {
            status: TargetStatus::Synced { changed },
            reloaded: false,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            status: TargetStatus::Failed {
                reason: reason.into(),
            },
            reloaded: false,
        }
    }

    fn from_outcome(outcome: SyncOutcome) -> Self {
        match outcome.error {
            Some(e) => Self::failed(e.to_string()),
            None => Self::synced(outcome.changed),
        }
    }
}

/// Everything a target task needs, owned so it can move to another thread.
pub(super) struct TargetJob {
    pub target: Target,
    pub theme: Arc<Theme>,
    pub sync: FileSync,
    pub paths: Arc<TargetPaths>,
    pub session: Arc<dyn DesktopSession>,
}

impl TargetJob {
    pub fn run(self) -> TargetResult {
        match self.target {
            Target::WindowManager => self.window_manager(),
            Target::StatusBar => self.status_bar(),
            Target::Terminal => self.terminal(),
            Target::Browser => self.browser(),
            Target::Desktop => self.desktop(),
        }
    }

    fn window_manager(&self) -> TargetResult {
        TargetResult::from_outcome(
            self.sync
                .sync_file(&self.theme.hypr_config, &self.paths.hypr_config),
        )
    }

    fn status_bar(&self) -> TargetResult {
        if !self.theme.waybar_css.exists() {
            return TargetResult::skipped();
        }
        TargetResult::from_outcome(
            self.sync
                .sync_file(&self.theme.waybar_css, &self.paths.waybar_css),
        )
    }

    /// Directory sources are mirrored into the config directory; file
    /// sources land under the configured name; a bare `ghostty` file in the
    /// theme root is the fallback when the configured source is absent.
    fn terminal(&self) -> TargetResult {
        let term = &self.theme.terminal;
        let named = self.paths.ghostty_dir.join(&term.target);
        let default = self.paths.ghostty_config();

        let (result, touched) = if term.src.is_dir() {
            let changed = self.sync.sync_tree(&term.src, &self.paths.ghostty_dir);
            let touched = if named.exists() { named } else { default };
            (TargetResult::synced(changed), touched)
        } else if term.src.exists() {
            (
                TargetResult::from_outcome(self.sync.sync_file(&term.src, &named)),
                named,
            )
        } else if term.legacy.is_file() {
            (
                TargetResult::from_outcome(self.sync.sync_file(&term.legacy, &default)),
                default,
            )
        } else {
            return TargetResult::skipped();
        };

        if !result.status.changed() {
            return result;
        }
        if let Err(e) = self.session.reload_terminal(Some(&touched)) {
            log::warn!("Ghostty reload failed: {e}");
        }
        TargetResult {
            reloaded: true,
            ..result
        }
    }

    fn browser(&self) -> TargetResult {
        let Some(profile) = &self.theme.browser else {
            return TargetResult::skipped();
        };
        let files = profile.files();
        if files.is_empty() {
            return TargetResult::skipped();
        }

        let mut changed = false;
        let mut errors = Vec::new();
        for (src, dst) in &files {
            let outcome = self.sync.sync_file(src, dst);
            changed |= outcome.changed;
            if let Some(e) = outcome.error {
                errors.push(e.to_string());
            }
        }

        if errors.is_empty() {
            TargetResult::synced(changed)
        } else {
            TargetResult::failed(errors.join("; "))
        }
    }

    fn desktop(&self) -> TargetResult {
        let settings = &self.theme.desktop;
        if settings.is_empty() {
            return TargetResult::skipped();
        }

        let outcome = apply_desktop_settings(self.session.as_ref(), settings);
        if outcome.errors.is_empty() {
            TargetResult::synced(outcome.changed)
        } else {
            let reasons: Vec<String> = outcome.errors.iter().map(ToString::to_string).collect();
            TargetResult::failed(reasons.join("; "))
        }
    }
}

