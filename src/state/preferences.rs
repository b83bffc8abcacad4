//! UI preference profiles (app-wide).
//!
//! Stored by the backend as one JSON value under the settings key
//! [`SETTINGS_KEY`], and exchanged with other users as plain JSON on the
//! clipboard.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::{Followup, Toast};
use crate::models::SettingsMap;
use crate::store::{Loadable, RequestToken};

pub const SETTINGS_KEY: &str = "ui_preferences";

pub const DEFAULT_PROFILE: &str = "Default";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    #[default]
    Comfortable,
    Compact,
}

/// Accent presets offered by the cycle key.
pub const ACCENT_PRESETS: [&str; 6] = ["#4ade80", "#60a5fa", "#f472b6", "#facc15", "#a78bfa", "#fb923c"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceProfile {
    pub name: String,
    pub theme: ThemeMode,
    /// `#rrggbb`.
    pub accent_color: String,
    pub density: Density,
    pub show_status_line: bool,
    pub show_icons: bool,
    pub show_download_count: bool,
}

impl Default for PreferenceProfile {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROFILE.to_string(),
            theme: ThemeMode::Dark,
            accent_color: ACCENT_PRESETS[0].to_string(),
            density: Density::Comfortable,
            show_status_line: true,
            show_icons: true,
            show_download_count: true,
        }
    }
}

impl PreferenceProfile {
    pub fn accent_rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(&self.accent_color)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiPreferences {
    pub active_profile: String,
    pub profiles: Vec<PreferenceProfile>,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            active_profile: DEFAULT_PROFILE.to_string(),
            profiles: vec![PreferenceProfile::default()],
        }
    }
}

impl UiPreferences {
    /// Repair a decoded value: at least one profile, unique names, valid
    /// accents and an active profile that exists.
    fn normalized(mut self) -> Self {
        let mut seen = Vec::new();
        self.profiles.retain(|p| {
            let keep = !p.name.trim().is_empty() && !seen.contains(&p.name);
            if keep {
                seen.push(p.name.clone());
            }
            keep
        });
        if self.profiles.is_empty() {
            self.profiles.push(PreferenceProfile::default());
        }
        for profile in &mut self.profiles {
            if parse_hex_color(&profile.accent_color).is_none() {
                profile.accent_color = ACCENT_PRESETS[0].to_string();
            }
        }
        if !self.profiles.iter().any(|p| p.name == self.active_profile) {
            self.active_profile = self.profiles[0].name.clone();
        }
        self
    }
}

/// `#rgb` or `#rrggbb`.
pub fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => Some((
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        )),
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
            Some((digit(0)?, digit(1)?, digit(2)?))
        }
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreferencesMsg {
    Loaded(RequestToken, Result<SettingsMap, String>),
    Saved(RequestToken, Result<(), String>),
}

#[derive(Debug, Default)]
pub struct PreferencesStore {
    prefs: UiPreferences,
    pub load: Loadable<()>,
    pub save: Loadable<()>,
    dirty: bool,
}

impl PreferencesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preferences(&self) -> &UiPreferences {
        &self.prefs
    }

    pub fn active(&self) -> &PreferenceProfile {
        self.prefs
            .profiles
            .iter()
            .find(|p| p.name == self.prefs.active_profile)
            .or_else(|| self.prefs.profiles.first())
            .unwrap_or_else(|| default_profile())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_active(&mut self, name: &str) -> bool {
        if self.prefs.active_profile == name || !self.prefs.profiles.iter().any(|p| p.name == name) {
            return false;
        }
        self.prefs.active_profile = name.to_string();
        self.dirty = true;
        true
    }

    pub fn cycle_profile(&mut self) {
        let profiles = &self.prefs.profiles;
        let index = profiles
            .iter()
            .position(|p| p.name == self.prefs.active_profile)
            .unwrap_or(0);
        if let Some(next) = profiles.get((index + 1) % profiles.len().max(1)) {
            let name = next.name.clone();
            self.set_active(&name);
        }
    }

    /// Copy the active profile under a new name and activate it.
    pub fn add_profile(&mut self, name: &str) -> Result<(), String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("Profile name is empty".to_string());
        }
        if self.prefs.profiles.iter().any(|p| p.name == name) {
            return Err(format!("Profile '{}' already exists", name));
        }
        let mut profile = self.active().clone();
        profile.name = name.to_string();
        self.prefs.profiles.push(profile);
        self.prefs.active_profile = name.to_string();
        self.dirty = true;
        Ok(())
    }

    /// The last remaining profile cannot be removed.
    pub fn remove_profile(&mut self, name: &str) -> bool {
        if self.prefs.profiles.len() <= 1 {
            return false;
        }
        let before = self.prefs.profiles.len();
        self.prefs.profiles.retain(|p| p.name != name);
        if self.prefs.profiles.len() == before {
            return false;
        }
        if self.prefs.active_profile == name {
            self.prefs.active_profile = self.prefs.profiles[0].name.clone();
        }
        self.dirty = true;
        true
    }

    /// Edit the active profile in place.
    pub fn update_active(&mut self, edit: impl FnOnce(&mut PreferenceProfile)) {
        let active = self.prefs.active_profile.clone();
        if let Some(profile) = self.prefs.profiles.iter_mut().find(|p| p.name == active) {
            let before = profile.clone();
            edit(profile);
            profile.name = before.name.clone();
            if *profile != before {
                self.dirty = true;
            }
        }
    }

    pub fn toggle_theme(&mut self) {
        self.update_active(|p| {
            p.theme = match p.theme {
                ThemeMode::Dark => ThemeMode::Light,
                ThemeMode::Light => ThemeMode::Dark,
            }
        });
    }

    pub fn toggle_density(&mut self) {
        self.update_active(|p| {
            p.density = match p.density {
                Density::Comfortable => Density::Compact,
                Density::Compact => Density::Comfortable,
            }
        });
    }

    pub fn cycle_accent(&mut self) {
        self.update_active(|p| {
            let index = ACCENT_PRESETS
                .iter()
                .position(|c| c.eq_ignore_ascii_case(&p.accent_color))
                .map_or(0, |i| (i + 1) % ACCENT_PRESETS.len());
            p.accent_color = ACCENT_PRESETS[index].to_string();
        });
    }

    pub fn begin_load(&mut self) -> RequestToken {
        self.load.begin()
    }

    /// The value to store under [`SETTINGS_KEY`].
    pub fn begin_save(&mut self) -> Option<(RequestToken, Value)> {
        if self.save.loading {
            return None;
        }
        let value = serde_json::to_value(&self.prefs).ok()?;
        Some((self.save.begin(), value))
    }

    /// Pretty JSON of every profile, for the clipboard.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.prefs)
    }

    /// Replace all profiles with clipboard JSON. Accepts a full
    /// preferences object or a single profile.
    pub fn import_json(&mut self, text: &str) -> Result<(), String> {
        let value: Value =
            serde_json::from_str(text.trim()).map_err(|e| format!("Not valid JSON: {}", e))?;
        let imported = if value.get("profiles").is_some() {
            serde_json::from_value::<UiPreferences>(value).map_err(|e| e.to_string())?
        } else if value.get("name").is_some() {
            let profile: PreferenceProfile =
                serde_json::from_value(value).map_err(|e| e.to_string())?;
            let mut prefs = self.prefs.clone();
            prefs.profiles.retain(|p| p.name != profile.name);
            prefs.active_profile = profile.name.clone();
            prefs.profiles.push(profile);
            prefs
        } else {
            return Err("JSON does not contain preference profiles".to_string());
        };
        self.prefs = imported.normalized();
        self.dirty = true;
        Ok(())
    }

    pub fn apply(&mut self, msg: PreferencesMsg) -> Followup {
        match msg {
            PreferencesMsg::Loaded(token, result) => {
                let prefs = result.as_ref().ok().map(|settings| match settings.get(SETTINGS_KEY) {
                    Some(value) => match serde_json::from_value::<UiPreferences>(value.clone()) {
                        Ok(prefs) => prefs.normalized(),
                        Err(err) => {
                            warn!(error = %err, "stored UI preferences are invalid, using defaults");
                            UiPreferences::default()
                        }
                    },
                    None => UiPreferences::default(),
                });
                let outcome = result.map(|_| ());
                if self.load.resolve(token, outcome).is_applied() {
                    // Local edits made before the load completed win.
                    if let (Some(prefs), false) = (prefs, self.dirty) {
                        debug!(profiles = prefs.profiles.len(), "preferences loaded");
                        self.prefs = prefs;
                    }
                }
                Followup::Nothing
            }
            PreferencesMsg::Saved(token, result) => {
                let error = result.as_ref().err().cloned();
                if !self.save.resolve(token, result).is_applied() {
                    return Followup::Nothing;
                }
                match error {
                    None => {
                        self.dirty = false;
                        Followup::Notify(Toast::success("Preferences saved"))
                    }
                    Some(message) => {
                        Followup::Notify(Toast::error(format!("Saving preferences failed: {}", message)))
                    }
                }
            }
        }
    }
}

fn default_profile() -> &'static PreferenceProfile {
    static DEFAULT: once_cell::sync::Lazy<PreferenceProfile> =
        once_cell::sync::Lazy::new(PreferenceProfile::default);
    &DEFAULT
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings_with(value: Value) -> SettingsMap {
        let mut map = SettingsMap::new();
        map.insert(SETTINGS_KEY.to_string(), value);
        map
    }

    #[test]
    fn test_load_from_settings_key() {
        let mut store = PreferencesStore::new();
        let token = store.begin_load();
        store.apply(PreferencesMsg::Loaded(
            token,
            Ok(settings_with(json!({
                "activeProfile": "Night",
                "profiles": [
                    { "name": "Default" },
                    { "name": "Night", "theme": "dark", "accentColor": "#f472b6", "density": "compact" }
                ]
            }))),
        ));
        let active = store.active();
        assert_eq!(active.name, "Night");
        assert_eq!(active.density, Density::Compact);
        assert_eq!(active.accent_rgb(), Some((0xf4, 0x72, 0xb6)));
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_missing_or_invalid_key_uses_defaults() {
        let mut store = PreferencesStore::new();
        let token = store.begin_load();
        store.apply(PreferencesMsg::Loaded(token, Ok(settings_with(json!("garbage")))));
        assert_eq!(store.preferences(), &UiPreferences::default());
    }

    #[test]
    fn test_profiles_add_switch_remove() {
        let mut store = PreferencesStore::new();
        store.toggle_density();
        store.add_profile("Streaming").unwrap();
        assert_eq!(store.active().name, "Streaming");
        assert_eq!(store.active().density, Density::Compact, "copied from active");
        assert!(store.add_profile("Streaming").is_err());

        store.cycle_profile();
        assert_eq!(store.active().name, DEFAULT_PROFILE);
        assert!(store.remove_profile(DEFAULT_PROFILE));
        assert_eq!(store.active().name, "Streaming");
        assert!(!store.remove_profile("Streaming"), "last profile stays");
    }

    #[test]
    fn test_update_active_cannot_rename() {
        let mut store = PreferencesStore::new();
        store.update_active(|p| p.name = "Hijacked".into());
        assert_eq!(store.active().name, DEFAULT_PROFILE);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_export_import_round_trip_via_text() {
        let mut source = PreferencesStore::new();
        source.cycle_accent();
        source.add_profile("Second").unwrap();
        let text = source.export_json().unwrap();

        let mut target = PreferencesStore::new();
        target.import_json(&text).unwrap();
        assert_eq!(target.preferences(), source.preferences());
        assert!(target.is_dirty());
    }

    #[test]
    fn test_import_single_profile_and_repair() {
        let mut store = PreferencesStore::new();
        store
            .import_json(r#"{ "name": "Shared", "accentColor": "not-a-color" }"#)
            .unwrap();
        assert_eq!(store.active().name, "Shared");
        assert_eq!(store.active().accent_color, ACCENT_PRESETS[0]);
        assert_eq!(store.preferences().profiles.len(), 2);

        assert!(store.import_json("[1, 2]").is_err());
        assert!(store.import_json("{").is_err());
    }

    #[test]
    fn test_save_clears_dirty() {
        let mut store = PreferencesStore::new();
        store.toggle_theme();
        let (token, value) = store.begin_save().unwrap();
        assert_eq!(value["profiles"][0]["theme"], "light");
        store.apply(PreferencesMsg::Saved(token, Ok(())));
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#fff"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("#102030"), Some((16, 32, 48)));
        assert_eq!(parse_hex_color("102030"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
    }
}
