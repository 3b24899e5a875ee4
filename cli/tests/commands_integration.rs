use claims::{assert_err, assert_matches, assert_ok};
use engine::common::{ActionError, ApplyError};
use engine::config::{EngineConfig, TargetPaths};
use engine::deploy::Deployer;
use engine::session::DesktopSession;
use hyprtheme::args::Toggle;
use hyprtheme::commands;
use hyprtheme::config::AppConfig;
use hyprtheme::error::AppError;
use hyprtheme::validation::ThemeIdError;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// A desktop where every action succeeds and nothing is running.
struct QuietSession;

impl DesktopSession for QuietSession {
    fn reload_window_manager(&self) -> Result<(), ActionError> {
        Ok(())
    }

    fn signal_status_bar(&self) -> Result<(), ActionError> {
        Ok(())
    }

    fn reload_terminal(&self, _config: Option<&Path>) -> Result<(), ActionError> {
        Ok(())
    }

    fn ensure_wallpaper_daemon(&self, _settle: Duration) -> Result<(), ActionError> {
        Ok(())
    }

    fn set_wallpaper(&self, _image: &Path, _transition: Duration) -> Result<(), ActionError> {
        Ok(())
    }

    fn read_setting(&self, _key: &str) -> Result<Option<String>, ActionError> {
        Ok(None)
    }

    fn write_setting(&self, _key: &str, _value: &str) -> Result<(), ActionError> {
        Ok(())
    }

    fn set_cursor(&self, _theme: &str, _size: u32) -> Result<(), ActionError> {
        Ok(())
    }
}

fn setup() -> (TempDir, Deployer) {
    let tmp = tempfile::tempdir().unwrap();
    let paths = TargetPaths::under(tmp.path());
    for (id, name) in [("nord", "Nord"), ("dracula", "Dracula"), ("gruvbox", "Gruvbox Dark")] {
        let dir = paths.themes_dir.join(id);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("theme.json"), format!(r#"{{"name": "{name}"}}"#)).unwrap();
        fs::write(dir.join("hyprland.conf"), format!("# {name}\n")).unwrap();
    }
    let deployer = Deployer::from_config(EngineConfig::new(paths), Arc::new(QuietSession));
    (tmp, deployer)
}

fn output(run: impl FnOnce(&mut Vec<u8>) -> hyprtheme::AppResult<()>) -> String {
    let mut buf = Vec::new();
    assert_ok!(run(&mut buf));
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_list_marks_nothing_before_first_apply() {
    let (_tmp, deployer) = setup();
    let text = output(|out| commands::list(&deployer, None, false, out));

    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("  dracula"));
    assert!(lines[2].ends_with("Nord"));
}

#[test]
fn test_list_filter_matches_id_or_name() {
    let (_tmp, deployer) = setup();
    let text = output(|out| commands::list(&deployer, Some("DARK"), false, out));
    assert_eq!(text.lines().count(), 1);
    assert!(text.contains("gruvbox"));

    let text = output(|out| commands::list(&deployer, Some("zzz"), false, out));
    assert!(text.starts_with("No themes found"));
}

#[test]
fn test_list_json_is_parseable() {
    let (_tmp, deployer) = setup();
    let text = output(|out| commands::list(&deployer, Some("nord"), true, out));

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let themes = value.as_array().unwrap();
    assert_eq!(themes.len(), 1);
    assert_eq!(themes[0]["id"], "nord");
    assert_eq!(themes[0]["name"], "Nord");
}

#[test]
fn test_turbo_round_trip() {
    let (_tmp, deployer) = setup();

    let text = output(|out| commands::turbo(&deployer, Some(Toggle::Off), out));
    assert_eq!(text, "Turbo mode: off\n");
    assert!(!deployer.state().load().turbo.unwrap());

    let text = output(|out| commands::turbo(&deployer, None, out));
    assert_eq!(text, "Turbo mode: off\n");

    let text = output(|out| commands::turbo(&deployer, Some(Toggle::On), out));
    assert_eq!(text, "Turbo mode: on\n");
}

#[tokio::test]
async fn test_apply_then_status() {
    let (tmp, deployer) = setup();

    let mut buf = Vec::new();
    assert_ok!(commands::apply(&deployer, "dracula", &mut buf).await);
    let text = String::from_utf8(buf).unwrap();
    assert!(text.starts_with("Applied dracula"));
    assert!(text.contains("hyprland   updated"));
    assert!(text.contains("waybar     skipped"));

    assert_eq!(
        fs::read_to_string(tmp.path().join("hypr").join("hyprland.conf")).unwrap(),
        "# Dracula\n"
    );

    let text = output(|out| commands::status(&deployer, out));
    assert!(text.contains("Theme:      dracula"));
    assert!(text.contains("Wallpaper:  (none)"));
    assert!(text.contains("Themes:     3 in"));

    let text = output(|out| commands::list(&deployer, None, false, out));
    assert!(text.contains("* dracula"));
}

#[tokio::test]
async fn test_second_apply_reports_nothing_to_do() {
    let (_tmp, deployer) = setup();
    let mut buf = Vec::new();
    assert_ok!(commands::apply(&deployer, "nord", &mut buf).await);

    let mut buf = Vec::new();
    assert_ok!(commands::apply(&deployer, "nord", &mut buf).await);
    let text = String::from_utf8(buf).unwrap();
    assert!(text.contains("hyprland   unchanged"));
    assert!(text.ends_with("Nothing to do, nord is already live\n"));
}

#[tokio::test]
async fn test_apply_rejects_bad_ids_before_touching_disk() {
    let (tmp, deployer) = setup();
    let mut buf = Vec::new();

    let result = commands::apply(&deployer, "../nord", &mut buf).await;
    assert_matches!(result, Err(AppError::ThemeId(ThemeIdError::PathSeparator(_))));

    let result = commands::apply(&deployer, "solarized", &mut buf).await;
    assert_matches!(
        result,
        Err(AppError::Apply(ApplyError::ThemeNotFound { ref id })) if id == "solarized"
    );

    assert!(buf.is_empty());
    assert!(!tmp.path().join("hypr").exists());
    assert!(!deployer.state().path().exists());
}

#[test]
fn test_palette_rejects_missing_image() {
    let (tmp, deployer) = setup();
    let mut buf = Vec::new();
    assert_err!(commands::palette(
        &deployer,
        &tmp.path().join("missing.png"),
        &mut buf
    ));
    assert!(!deployer.palette().output().exists());
}

#[test]
fn test_palette_writes_stylesheet_once() {
    let (tmp, deployer) = setup();
    let image = tmp.path().join("wall.png");
    image::RgbImage::from_pixel(32, 32, image::Rgb([40, 42, 54]))
        .save(&image)
        .unwrap();

    let text = output(|out| commands::palette(&deployer, &image, out));
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "primary    #282a36");
    assert!(lines[6].ends_with("style-vars.css updated"));
    assert!(
        fs::read_to_string(deployer.palette().output())
            .unwrap()
            .contains("--m3-primary: #282a36;")
    );

    let text = output(|out| commands::palette(&deployer, &image, out));
    assert!(text.ends_with("style-vars.css unchanged\n"));
}

#[test]
fn test_show_config_prints_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let text = output(|out| commands::show_config(&AppConfig::default(), tmp.path(), out));

    let parsed: toml::Value = toml::from_str(&text).unwrap();
    assert_eq!(parsed["workers"].as_integer(), Some(4));
    assert_eq!(parsed["cursor_size"].as_integer(), Some(24));
    assert_eq!(parsed["logging"]["level"].as_str(), Some("info"));
    assert!(
        parsed["targets"]["hypr_config"]
            .as_str()
            .unwrap()
            .ends_with("hypr/hyprland.conf")
    );
}
