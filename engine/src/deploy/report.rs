use crate::palette::PaletteTask;
use std::fmt;

/// One consumer of theme output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    WindowManager,
    StatusBar,
    Terminal,
    Browser,
    Desktop,
}

impl Target {
    /// Every target, in dispatch order.
    pub const ALL: [Target; 5] = [
        Target::WindowManager,
        Target::StatusBar,
        Target::Terminal,
        Target::Browser,
        Target::Desktop,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Target::WindowManager => "hyprland",
            Target::StatusBar => "waybar",
            Target::Terminal => "ghostty",
            Target::Browser => "zen",
            Target::Desktop => "gsettings",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetStatus {
    /// Nothing configured or nothing to deploy for this target.
    Skipped,
    Synced { changed: bool },
    Failed { reason: String },
}

impl TargetStatus {
    pub fn changed(&self) -> bool {
        matches!(self, TargetStatus::Synced { changed: true })
    }
}

impl fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetStatus::Skipped => f.write_str("skipped"),
            TargetStatus::Synced { changed: true } => f.write_str("updated"),
            TargetStatus::Synced { changed: false } => f.write_str("unchanged"),
            TargetStatus::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}

/// A reload notification sent to a running program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadAction {
    WindowManager,
    StatusBar,
    Terminal,
}

/// What one [`apply_theme`](super::Deployer::apply_theme) call did.
#[derive(Debug)]
pub struct ApplyReport {
    pub theme_id: String,
    pub turbo: bool,
    /// One entry per [`Target::ALL`], in that order.
    pub targets: Vec<(Target, TargetStatus)>,
    pub wallpaper_changed: bool,
    pub reloads: Vec<ReloadAction>,
    /// Present when the palette is still being derived in the background.
    pub palette: Option<PaletteTask>,
}

impl ApplyReport {
    pub(super) fn new(theme_id: &str, turbo: bool) -> Self {
        Self {
            theme_id: theme_id.to_string(),
            turbo,
            targets: Vec::with_capacity(Target::ALL.len()),
            wallpaper_changed: false,
            reloads: Vec::new(),
            palette: None,
        }
    }

    pub fn status(&self, target: Target) -> Option<&TargetStatus> {
        self.targets
            .iter()
            .find(|(t, _)| *t == target)
            .map(|(_, status)| status)
    }

    pub fn changed(&self, target: Target) -> bool {
        self.status(target).is_some_and(TargetStatus::changed)
    }

    /// True when no target, wallpaper or reload was touched.
    pub fn is_noop(&self) -> bool {
        !self.wallpaper_changed
            && self.reloads.is_empty()
            && self.targets.iter().all(|(_, s)| !s.changed())
    }

    pub fn failures(&self) -> impl Iterator<Item = (Target, &str)> {
        self.targets.iter().filter_map(|(t, s)| match s {
            TargetStatus::Failed { reason } => Some((*t, reason.as_str())),
            _ => None,
        })
    }
}
