use super::DesktopSession;
use crate::common::ActionError;
use crate::registry::DesktopSettings;

/// What applying a [`DesktopSettings`] did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SettingsOutcome {
    /// At least one key was written.
    pub changed: bool,
    pub errors: Vec<ActionError>,
}

/// Write every configured key whose current value differs.
///
/// A key that cannot be read is written anyway. Failures on one key do not
/// stop the others.
pub fn apply_desktop_settings(
    session: &dyn DesktopSession,
    settings: &DesktopSettings,
) -> SettingsOutcome {
    let mut outcome = SettingsOutcome::default();

    for (key, value) in settings.entries() {
        match session.read_setting(key) {
            Ok(Some(current)) if current == value => {
                log::debug!("Setting {key} already '{value}'");
                continue;
            }
            Ok(_) => {}
            Err(e) => log::debug!("Could not read {key}, writing anyway: {e}"),
        }

        match session.write_setting(key, value) {
            Ok(()) => {
                log::info!("Set {key} = '{value}'");
                outcome.changed = true;
            }
            Err(e) => {
                log::warn!("Failed to set {key}: {e}");
                outcome.errors.push(e);
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ColorScheme;
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct MapSession {
        values: Mutex<HashMap<String, String>>,
        writes: Mutex<Vec<String>>,
        unwritable: Option<&'static str>,
    }

    impl DesktopSession for MapSession {
        fn reload_window_manager(&self) -> Result<(), ActionError> {
            Ok(())
        }
        fn signal_status_bar(&self) -> Result<(), ActionError> {
            Ok(())
        }
        fn reload_terminal(&self, _: Option<&Path>) -> Result<(), ActionError> {
            Ok(())
        }
        fn ensure_wallpaper_daemon(&self, _: Duration) -> Result<(), ActionError> {
            Ok(())
        }
        fn set_wallpaper(&self, _: &Path, _: Duration) -> Result<(), ActionError> {
            Ok(())
        }
        fn read_setting(&self, key: &str) -> Result<Option<String>, ActionError> {
            Ok(self.values.lock().unwrap().get(key).cloned())
        }
        fn write_setting(&self, key: &str, value: &str) -> Result<(), ActionError> {
            if self.unwritable == Some(key) {
                return Err(ActionError::failed("write setting", "read-only"));
            }
            self.writes.lock().unwrap().push(key.to_string());
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
        fn set_cursor(&self, _: &str, _: u32) -> Result<(), ActionError> {
            Ok(())
        }
    }

    fn dracula() -> DesktopSettings {
        DesktopSettings {
            gtk_theme: Some("Dracula".to_string()),
            icon_theme: Some("Papirus-Dark".to_string()),
            color_scheme: Some(ColorScheme::PreferDark),
            ..DesktopSettings::default()
        }
    }

    #[test]
    fn test_second_apply_writes_nothing() {
        let session = MapSession::default();

        let first = apply_desktop_settings(&session, &dracula());
        assert!(first.changed);
        assert_eq!(session.writes.lock().unwrap().len(), 3);

        let second = apply_desktop_settings(&session, &dracula());
        assert!(!second.changed);
        assert!(second.errors.is_empty());
        assert_eq!(session.writes.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_failed_key_does_not_stop_others() {
        let session = MapSession {
            unwritable: Some("gtk-theme"),
            ..MapSession::default()
        };

        let outcome = apply_desktop_settings(&session, &dracula());
        assert!(outcome.changed);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(
            *session.writes.lock().unwrap(),
            vec!["icon-theme".to_string(), "color-scheme".to_string()]
        );
    }

    #[test]
    fn test_empty_settings_are_untouched() {
        let session = MapSession::default();
        let outcome = apply_desktop_settings(&session, &DesktopSettings::default());
        assert_eq!(outcome, SettingsOutcome::default());
    }
}
