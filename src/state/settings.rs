//! Backend settings as a flat key/value map with local edits.

use serde_json::Value;

use super::{Followup, Toast};
use crate::models::SettingsMap;
use crate::store::{Loadable, RequestToken};
use crate::view_state::ListCursor;

/// Keys managed by other screens and hidden from the settings list.
pub const RESERVED_KEYS: [&str; 1] = [super::preferences::SETTINGS_KEY];

#[derive(Debug, Clone, PartialEq)]
pub enum SettingsMsg {
    Loaded(RequestToken, Result<SettingsMap, String>),
    Saved(RequestToken, Result<(), String>),
}

#[derive(Debug, Default)]
pub struct SettingsStore {
    pub remote: Loadable<SettingsMap>,
    pub save: Loadable<()>,
    pub cursor: ListCursor,
    /// Text being typed for the selected key.
    pub edit_buffer: Option<String>,
    pub edit_error: Option<String>,
    edits: SettingsMap,
    /// Map sent by the save in flight.
    saving: Option<SettingsMap>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .remote
            .data
            .iter()
            .flat_map(|m| m.keys())
            .chain(self.edits.keys())
            .map(String::as_str)
            .filter(|k| !RESERVED_KEYS.contains(k))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    pub fn selected_key(&self) -> Option<String> {
        self.keys().get(self.cursor.selected).map(|k| k.to_string())
    }

    /// Current value: a local edit if there is one, else the backend's.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.edits
            .get(key)
            .or_else(|| self.remote.data.as_ref().and_then(|m| m.get(key)))
    }

    pub fn is_dirty(&self) -> bool {
        !self.edits.is_empty()
    }

    pub fn is_edited(&self, key: &str) -> bool {
        self.edits.contains_key(key)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        let unchanged = self
            .remote
            .data
            .as_ref()
            .and_then(|m| m.get(key))
            .is_some_and(|v| *v == value);
        if unchanged {
            self.edits.remove(key);
        } else {
            self.edits.insert(key.to_string(), value);
        }
    }

    pub fn toggle_bool(&mut self, key: &str) -> bool {
        match self.value(key) {
            Some(Value::Bool(b)) => {
                let flipped = !*b;
                self.set(key, Value::Bool(flipped));
                true
            }
            _ => false,
        }
    }

    /// Parse `text` keeping the JSON type of the current value.
    pub fn set_from_text(&mut self, key: &str, text: &str) -> Result<(), String> {
        let text = text.trim();
        let value = match self.value(key) {
            Some(Value::Bool(_)) => match text {
                "true" | "on" | "yes" => Value::Bool(true),
                "false" | "off" | "no" => Value::Bool(false),
                _ => return Err(format!("'{}' is not a boolean", text)),
            },
            Some(Value::Number(_)) => {
                if let Ok(i) = text.parse::<i64>() {
                    Value::from(i)
                } else {
                    let f = text
                        .parse::<f64>()
                        .map_err(|_| format!("'{}' is not a number", text))?;
                    serde_json::Number::from_f64(f)
                        .map(Value::Number)
                        .ok_or_else(|| format!("'{}' is not a finite number", text))?
                }
            }
            Some(Value::String(_)) | Some(Value::Null) | None => Value::String(text.to_string()),
            Some(_) => serde_json::from_str(text).map_err(|e| e.to_string())?,
        };
        self.set(key, value);
        Ok(())
    }

    /// Commit the edit buffer for the selected key.
    pub fn commit_edit(&mut self) {
        let (Some(key), Some(text)) = (self.selected_key(), self.edit_buffer.take()) else {
            return;
        };
        if let Err(message) = self.set_from_text(&key, &text) {
            self.edit_error = Some(message);
            self.edit_buffer = Some(text);
        } else {
            self.edit_error = None;
        }
    }

    pub fn revert(&mut self, key: &str) {
        self.edits.remove(key);
    }

    /// Fetch from the backend, dropping local edits.
    pub fn begin_reload(&mut self) -> RequestToken {
        self.edits.clear();
        self.edit_buffer = None;
        self.edit_error = None;
        self.remote.begin()
    }

    /// The full map to persist.
    pub fn begin_save(&mut self) -> Option<(RequestToken, SettingsMap)> {
        if !self.is_dirty() || self.save.loading {
            return None;
        }
        let mut merged = self.remote.data.clone().unwrap_or_default();
        merged.extend(self.edits.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.saving = Some(merged.clone());
        Some((self.save.begin(), merged))
    }

    pub fn apply(&mut self, msg: SettingsMsg) -> Followup {
        match msg {
            SettingsMsg::Loaded(token, result) => {
                if self.remote.resolve(token, result).is_applied() {
                    let len = self.keys().len();
                    self.cursor.clamp(len);
                }
                Followup::Nothing
            }
            SettingsMsg::Saved(token, result) => {
                let ok = result.is_ok();
                let error = result.as_ref().err().cloned();
                if !self.save.resolve(token, result).is_applied() {
                    return Followup::Nothing;
                }
                let saved = self.saving.take();
                if let (true, Some(saved)) = (ok, saved) {
                    // Edits made while the save was in flight stay dirty.
                    self.edits.retain(|k, v| saved.get(k) != Some(v));
                    self.remote.set_data(saved);
                    return Followup::Notify(Toast::success("Settings saved"));
                }
                Followup::Notify(Toast::error(format!(
                    "Saving settings failed: {}",
                    error.unwrap_or_default()
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn loaded() -> SettingsStore {
        let mut store = SettingsStore::new();
        let token = store.begin_reload();
        let map: SettingsMap = serde_json::from_value(json!({
            "auto_update": true,
            "max_memory_mb": 4096,
            "java_path": "/usr/bin/java",
            "ui_preferences": { "activeProfile": "Default" },
        }))
        .unwrap();
        store.apply(SettingsMsg::Loaded(token, Ok(map)));
        store
    }

    #[test]
    fn test_reserved_keys_hidden() {
        let store = loaded();
        assert_eq!(store.keys(), vec!["auto_update", "java_path", "max_memory_mb"]);
    }

    #[test]
    fn test_edits_are_dirty_until_saved() {
        let mut store = loaded();
        assert!(!store.is_dirty());
        assert!(store.toggle_bool("auto_update"));
        assert!(store.is_edited("auto_update"));
        assert_eq!(store.value("auto_update"), Some(&json!(false)));

        store.toggle_bool("auto_update");
        assert!(!store.is_dirty(), "back to the backend value");
    }

    #[test]
    fn test_set_from_text_keeps_type() {
        let mut store = loaded();
        store.set_from_text("max_memory_mb", "8192").unwrap();
        assert_eq!(store.value("max_memory_mb"), Some(&json!(8192)));
        assert!(store.set_from_text("max_memory_mb", "lots").is_err());
        assert!(store.set_from_text("auto_update", "maybe").is_err());
        store.set_from_text("java_path", " /opt/java ").unwrap();
        assert_eq!(store.value("java_path"), Some(&json!("/opt/java")));
    }

    #[test]
    fn test_reload_discards_edits() {
        let mut store = loaded();
        store.set_from_text("java_path", "/x").unwrap();
        store.begin_reload();
        assert!(!store.is_dirty());
        assert_eq!(store.value("java_path"), Some(&json!("/usr/bin/java")));
    }

    #[test]
    fn test_save_sends_merged_map_and_clears_edits() {
        let mut store = loaded();
        assert!(store.begin_save().is_none(), "nothing to save");
        store.set_from_text("max_memory_mb", "6144").unwrap();
        let (token, map) = store.begin_save().unwrap();
        assert_eq!(map.get("max_memory_mb"), Some(&json!(6144)));
        assert!(map.contains_key("ui_preferences"));

        store.set_from_text("java_path", "/late").unwrap();
        let followup = store.apply(SettingsMsg::Saved(token, Ok(())));
        assert!(matches!(followup, Followup::Notify(_)));
        assert!(!store.is_edited("max_memory_mb"));
        assert!(store.is_edited("java_path"));
        assert_eq!(store.value("max_memory_mb"), Some(&json!(6144)));
    }

    #[test]
    fn test_failed_save_keeps_edits() {
        let mut store = loaded();
        store.toggle_bool("auto_update");
        let (token, _) = store.begin_save().unwrap();
        store.apply(SettingsMsg::Saved(token, Err("read-only".into())));
        assert!(store.is_dirty());
        assert_eq!(store.save.error.as_deref(), Some("read-only"));
    }
}
