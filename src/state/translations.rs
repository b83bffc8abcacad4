//! Custom translation overrides per language.

use super::{Followup, Toast};
use crate::models::TranslationEntries;
use crate::store::{Loadable, RequestToken};
use crate::view_state::ListCursor;

#[derive(Debug, Clone, PartialEq)]
pub enum TranslationsMsg {
    LangsLoaded(RequestToken, Result<Vec<String>, String>),
    EntriesLoaded(RequestToken, Result<TranslationEntries, String>),
    Saved {
        lang: String,
        result: Result<(), String>,
    },
    Deleted {
        lang: String,
        result: Result<(), String>,
    },
}

/// Minecraft language codes look like `en_us` or `zh_cn`.
pub fn is_valid_lang_code(code: &str) -> bool {
    let mut parts = code.split('_');
    let (Some(lang), Some(region), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    let lower = |s: &str, len: std::ops::RangeInclusive<usize>| {
        len.contains(&s.len()) && s.chars().all(|c| c.is_ascii_lowercase())
    };
    lower(lang, 2..=3) && lower(region, 2..=3)
}

#[derive(Debug, Default)]
pub struct TranslationsStore {
    pub langs: Loadable<Vec<String>>,
    pub cursor: ListCursor,
    pub lang: Option<String>,
    pub entries: Loadable<TranslationEntries>,
    /// Entry cursor within the selected language.
    pub entry_cursor: ListCursor,
    pub saving: bool,
    pub action_error: Option<String>,
    dirty: bool,
}

impl TranslationsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn langs(&self) -> &[String] {
        self.langs.data.as_deref().unwrap_or(&[])
    }

    pub fn entry_list(&self) -> Vec<(&str, &str)> {
        self.entries
            .data
            .iter()
            .flatten()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn begin_fetch_langs(&mut self) -> RequestToken {
        self.langs.begin()
    }

    /// Open a language; unsaved edits of the previous one are dropped.
    pub fn open(&mut self, lang: &str) -> RequestToken {
        self.lang = Some(lang.to_string());
        self.dirty = false;
        self.entry_cursor = ListCursor::new();
        self.entries.clear();
        self.entries.begin()
    }

    /// Start a language the backend does not have yet.
    pub fn create(&mut self, lang: &str) -> Result<(), String> {
        let lang = lang.trim().to_ascii_lowercase();
        if !is_valid_lang_code(&lang) {
            return Err(format!("'{}' is not a language code like en_us", lang));
        }
        if self.langs().contains(&lang) {
            return Err(format!("{} already exists", lang));
        }
        self.lang = Some(lang);
        self.entries.clear();
        self.entries.set_data(TranslationEntries::new());
        self.entry_cursor = ListCursor::new();
        self.dirty = true;
        Ok(())
    }

    pub fn set_entry(&mut self, key: &str, value: &str) -> bool {
        let key = key.trim();
        if key.is_empty() || self.lang.is_none() {
            return false;
        }
        let Some(entries) = self.entries.data_mut() else {
            return false;
        };
        entries.insert(key.to_string(), value.to_string());
        self.dirty = true;
        true
    }

    pub fn remove_entry(&mut self, key: &str) -> bool {
        let removed = self
            .entries
            .data_mut()
            .is_some_and(|entries| entries.remove(key).is_some());
        if removed {
            self.dirty = true;
            let len = self.entry_list().len();
            self.entry_cursor.clamp(len);
        }
        removed
    }

    pub fn begin_save(&mut self) -> Option<(String, TranslationEntries)> {
        if self.saving || !self.dirty {
            return None;
        }
        let lang = self.lang.clone()?;
        let entries = self.entries.data.clone()?;
        self.saving = true;
        self.action_error = None;
        Some((lang, entries))
    }

    pub fn begin_delete(&mut self) -> Option<String> {
        if self.saving {
            return None;
        }
        let lang = self.lang.clone()?;
        self.saving = true;
        self.action_error = None;
        Some(lang)
    }

    pub fn apply(&mut self, msg: TranslationsMsg) -> Followup {
        match msg {
            TranslationsMsg::LangsLoaded(token, result) => {
                if self.langs.resolve(token, result).is_applied() {
                    let len = self.langs().len();
                    self.cursor.clamp(len);
                }
                Followup::Nothing
            }
            TranslationsMsg::EntriesLoaded(token, result) => {
                if self.entries.resolve(token, result).is_applied() {
                    self.dirty = false;
                }
                Followup::Nothing
            }
            TranslationsMsg::Saved { lang, result } => {
                self.saving = false;
                match result {
                    Ok(()) => {
                        if self.lang.as_deref() == Some(lang.as_str()) {
                            self.dirty = false;
                        }
                        if let Some(langs) = self.langs.data_mut() {
                            if !langs.contains(&lang) {
                                langs.push(lang.clone());
                                langs.sort();
                            }
                        }
                        Followup::Notify(Toast::success(format!("Saved {} translations", lang)))
                    }
                    Err(message) => {
                        self.action_error = Some(message.clone());
                        Followup::Notify(Toast::error(message))
                    }
                }
            }
            TranslationsMsg::Deleted { lang, result } => {
                self.saving = false;
                match result {
                    Ok(()) => {
                        if self.lang.as_deref() == Some(lang.as_str()) {
                            self.lang = None;
                            self.entries.clear();
                            self.dirty = false;
                        }
                        Followup::RefetchWith(Toast::info(format!("Deleted {} translations", lang)))
                    }
                    Err(message) => {
                        self.action_error = Some(message.clone());
                        Followup::Notify(Toast::error(message))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened(lang: &str) -> TranslationsStore {
        let mut store = TranslationsStore::new();
        let token = store.begin_fetch_langs();
        store.apply(TranslationsMsg::LangsLoaded(token, Ok(vec!["de_de".into()])));
        let token = store.open(lang);
        let mut entries = TranslationEntries::new();
        entries.insert("item.packdeck.wrench".into(), "Schraubenschlüssel".into());
        store.apply(TranslationsMsg::EntriesLoaded(token, Ok(entries)));
        store
    }

    #[test]
    fn test_lang_codes() {
        assert!(is_valid_lang_code("en_us"));
        assert!(is_valid_lang_code("fil_ph"));
        assert!(!is_valid_lang_code("en"));
        assert!(!is_valid_lang_code("EN_US"));
        assert!(!is_valid_lang_code("en_us_x"));
    }

    #[test]
    fn test_edit_and_save() {
        let mut store = opened("de_de");
        assert!(store.begin_save().is_none(), "nothing changed");
        assert!(store.set_entry("block.packdeck.crate", "Kiste"));
        let (lang, entries) = store.begin_save().unwrap();
        assert_eq!(lang, "de_de");
        assert_eq!(entries.len(), 2);

        store.apply(TranslationsMsg::Saved { lang, result: Ok(()) });
        assert!(!store.is_dirty());
        assert!(!store.saving);
    }

    #[test]
    fn test_switching_language_drops_stale_entries() {
        let mut store = opened("de_de");
        let old = store.open("fr_fr");
        let new = store.open("es_es");
        store.apply(TranslationsMsg::EntriesLoaded(old, Ok(TranslationEntries::new())));
        assert!(store.entries.data.is_none());
        store.apply(TranslationsMsg::EntriesLoaded(new, Ok(TranslationEntries::new())));
        assert!(store.entries.data.is_some());
    }

    #[test]
    fn test_create_new_language() {
        let mut store = opened("de_de");
        assert!(store.create("de_de").is_err());
        assert!(store.create("klingon").is_err());
        store.create("PT_BR").unwrap();
        assert_eq!(store.lang.as_deref(), Some("pt_br"));
        store.set_entry("a", "b");
        let (lang, _) = store.begin_save().unwrap();
        store.apply(TranslationsMsg::Saved { lang, result: Ok(()) });
        assert_eq!(store.langs(), &["de_de".to_string(), "pt_br".to_string()]);
    }

    #[test]
    fn test_delete() {
        let mut store = opened("de_de");
        let lang = store.begin_delete().unwrap();
        let followup = store.apply(TranslationsMsg::Deleted { lang, result: Ok(()) });
        assert!(matches!(followup, Followup::RefetchWith(_)));
        assert!(store.lang.is_none());
    }

    #[test]
    fn test_remove_entry() {
        let mut store = opened("de_de");
        assert!(store.remove_entry("item.packdeck.wrench"));
        assert!(!store.remove_entry("missing"));
        assert!(store.is_dirty());
    }
}
