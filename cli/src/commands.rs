//! One function per subcommand. Each writes its human-readable output to
//! `out` and leaves diagnostics to the logger.

use crate::args::Toggle;
use crate::config::AppConfig;
use crate::error::AppResult;
use crate::validation::{ThemeIdValidator, Validator};
use engine::deploy::Deployer;
use engine::palette::Palette;
use engine::registry::Theme;
use std::io::Write;
use std::path::Path;

/// Themes whose id or name contains `filter`, ignoring case.
pub fn filter_themes(themes: Vec<Theme>, filter: Option<&str>) -> Vec<Theme> {
    let Some(filter) = filter.map(str::to_lowercase) else {
        return themes;
    };
    themes
        .into_iter()
        .filter(|t| {
            t.id.to_lowercase().contains(&filter) || t.name.to_lowercase().contains(&filter)
        })
        .collect()
}

pub fn list(
    deployer: &Deployer,
    filter: Option<&str>,
    json: bool,
    out: &mut dyn Write,
) -> AppResult<()> {
    let themes = filter_themes(deployer.list_themes(), filter);

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&themes)?)?;
        return Ok(());
    }

    if themes.is_empty() {
        writeln!(
            out,
            "No themes found in {}",
            deployer.registry().root().display()
        )?;
        return Ok(());
    }

    let current = deployer.state().load().last_theme;
    let width = themes.iter().map(|t| t.id.len()).max().unwrap_or(0);
    for theme in &themes {
        let marker = if theme.id == current { '*' } else { ' ' };
        writeln!(out, "{marker} {:<width$}  {}", theme.id, theme.name)?;
    }
    Ok(())
}

/// Deploy `id` and wait for any background palette work so the stylesheet
/// is complete when the process exits.
pub async fn apply(deployer: &Deployer, id: &str, out: &mut dyn Write) -> AppResult<()> {
    ThemeIdValidator.validate(id)?;

    let mut report = deployer.apply_theme(id).await?;

    writeln!(
        out,
        "Applied {} (turbo {})",
        report.theme_id,
        if report.turbo { "on" } else { "off" }
    )?;
    for (target, status) in &report.targets {
        writeln!(out, "  {:<10} {status}", target.name())?;
    }
    if report.wallpaper_changed {
        writeln!(out, "  {:<10} updated", "wallpaper")?;
    }

    if let Some(task) = report.palette.take() {
        log::debug!("Waiting for palette from {}", task.image().display());
        match task.wait().await {
            Ok(changed) => writeln!(
                out,
                "  {:<10} {}",
                "palette",
                if changed { "updated" } else { "unchanged" }
            )?,
            Err(e) => log::warn!("Palette update failed: {e}"),
        }
    }

    let failures = report.failures().count();
    if failures > 0 {
        log::warn!("{failures} target(s) failed while applying {id}");
    } else if report.is_noop() {
        writeln!(out, "Nothing to do, {id} is already live")?;
    }
    Ok(())
}

pub fn turbo(deployer: &Deployer, mode: Option<Toggle>, out: &mut dyn Write) -> AppResult<()> {
    if let Some(mode) = mode {
        deployer.set_turbo(mode.enabled())?;
    }
    let state = if deployer.get_turbo() { "on" } else { "off" };
    writeln!(out, "Turbo mode: {state}")?;
    Ok(())
}

pub fn status(deployer: &Deployer, out: &mut dyn Write) -> AppResult<()> {
    let state = deployer.state().load();
    let or_none = |s: &str| {
        if s.is_empty() {
            "(none)".to_string()
        } else {
            s.to_string()
        }
    };

    writeln!(out, "Theme:      {}", or_none(&state.last_theme))?;
    writeln!(out, "Wallpaper:  {}", or_none(&state.last_wallpaper))?;
    writeln!(
        out,
        "Turbo:      {}",
        if deployer.get_turbo() { "on" } else { "off" }
    )?;
    if let Some(updated_at) = state.updated_at {
        writeln!(out, "Updated:    {}", updated_at.to_rfc3339())?;
    }
    writeln!(
        out,
        "Themes:     {} in {}",
        deployer.list_themes().len(),
        deployer.registry().root().display()
    )?;
    Ok(())
}

/// Rebuild the palette stylesheet from `image` in the foreground.
pub fn palette(deployer: &Deployer, image: &Path, out: &mut dyn Write) -> AppResult<()> {
    let pipeline = deployer.palette();
    let (palette, written) = pipeline.update(image)?;

    for (role, rgb) in palette.roles() {
        writeln!(out, "{role:<10} {}", Palette::hex(rgb))?;
    }
    writeln!(
        out,
        "{} {}",
        pipeline.output().display(),
        if written { "updated" } else { "unchanged" }
    )?;
    Ok(())
}

pub fn show_config(config: &AppConfig, config_home: &Path, out: &mut dyn Write) -> AppResult<()> {
    write!(out, "{}", toml::to_string(&config.effective(config_home))?)?;
    Ok(())
}
