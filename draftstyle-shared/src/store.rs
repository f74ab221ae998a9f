//! JSON-backed storage for named style presets.
//!
//! The preset file is a single JSON object mapping preset names to attribute
//! objects, written with four-space indentation:
//!
//! ```json
//! {
//!     "Technical": {
//!         "ShapeColor": 3435973887,
//!         "LineWidth": 2,
//!         "TextFont": "Sans",
//!         "ShowUnit": true
//!     }
//! }
//! ```
//!
//! The store holds no handle and no cache: every [`load`](PresetStore::load)
//! and [`save`](PresetStore::save) opens and closes the file within the call.
//! Concurrent writers are not coordinated; the last save wins.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::attributes::StyleAttributes;
use crate::document::{read_document, write_document};
use crate::errors::StoreResult;
use crate::presets::{PresetDict, remove_preset, upsert_preset};

/// Application namespace directory under the user data directory
pub const APP_DIR: &str = "draftstyle";
/// Preset file name
pub const PRESET_FILE: &str = "StylePresets.json";

/// Handle to the preset document at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetStore {
    path: PathBuf,
}

impl PresetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Gets the default preset file location.
    ///
    /// Returns `~/.local/share/draftstyle/StylePresets.json` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|data| data.join(APP_DIR).join(PRESET_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all presets.
    ///
    /// Returns an empty mapping if the file doesn't exist, can't be read or
    /// isn't a valid preset document. The file itself is never modified.
    pub fn load(&self) -> PresetDict {
        let pdict: PresetDict = read_document(&self.path).unwrap_or_default();
        debug!(
            "Loaded {} presets from {}",
            pdict.len(),
            self.path.display()
        );
        pdict
    }

    /// Replaces the preset file with `pdict`.
    ///
    /// Creates the parent directory if needed. On error nothing has been
    /// written over the existing file.
    pub fn save(&self, pdict: &PresetDict) -> StoreResult<()> {
        write_document(&self.path, pdict)?;
        info!("Saved {} presets to {}", pdict.len(), self.path.display());
        Ok(())
    }

    /// Loads, inserts or overwrites `name`, and saves.
    pub fn save_preset(&self, name: &str, attrs: StyleAttributes) -> StoreResult<PresetDict> {
        let pdict = upsert_preset(self.load(), name, attrs);
        self.save(&pdict)?;
        Ok(pdict)
    }

    /// Loads, removes `name` if present, and saves only when something changed.
    ///
    /// Returns whether the preset existed.
    pub fn delete_preset(&self, name: &str) -> StoreResult<bool> {
        let (pdict, removed) = remove_preset(self.load(), name);
        if removed {
            self.save(&pdict)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{StyleValue, default_style};
    use std::fs;
    use tempfile::TempDir;

    fn attrs(entries: &[(&str, StyleValue)]) -> StyleAttributes {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    fn store_in(temp_dir: &TempDir) -> PresetStore {
        PresetStore::new(temp_dir.path().join("Draft").join(PRESET_FILE))
    }

    #[test]
    fn test_load_missing_file_is_empty_and_not_created() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        assert!(store.load().is_empty());
        assert!(!store.path().exists());
        assert!(!store.path().parent().unwrap().exists());
    }

    #[test]
    fn test_load_malformed_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = PresetStore::new(temp_dir.path().join(PRESET_FILE));
        fs::write(store.path(), "{not valid json").unwrap();

        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_non_object_document_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = PresetStore::new(temp_dir.path().join(PRESET_FILE));

        fs::write(store.path(), "[1, 2, 3]").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_keeps_presets_with_unrecognised_values() {
        let temp_dir = TempDir::new().unwrap();
        let store = PresetStore::new(temp_dir.path().join(PRESET_FILE));
        fs::write(
            store.path(),
            r#"{"Keep": {"LineWidth": 4}, "Odd": {"LineWidth": [1], "Extra": null}}"#,
        )
        .unwrap();

        let loaded = store.load();
        let names: Vec<_> = loaded.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Keep", "Odd"]);
        assert_eq!(loaded["Keep"]["LineWidth"], StyleValue::Integer(4));
    }

    #[test]
    fn test_save_preset_preserves_entries_with_unrecognised_values() {
        let temp_dir = TempDir::new().unwrap();
        let store = PresetStore::new(temp_dir.path().join(PRESET_FILE));
        fs::write(
            store.path(),
            r#"{"Keep": {"LineWidth": 4}, "Odd": {"LineWidth": 2, "Extra": null}}"#,
        )
        .unwrap();

        store.save_preset("New", StyleAttributes::new()).unwrap();

        let loaded = store.load();
        let names: Vec<_> = loaded.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Keep", "Odd", "New"]);
        assert_eq!(loaded["Keep"]["LineWidth"], StyleValue::Integer(4));

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("\"Extra\": null"));
    }

    #[test]
    fn test_round_trip_preserves_values_and_order() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        let mut pdict = PresetDict::new();
        pdict.insert("Zeta".to_string(), default_style());
        pdict.insert(
            "Alpha".to_string(),
            attrs(&[
                ("LineColor", StyleValue::Integer(4_278_190_335)),
                ("TextSize", StyleValue::Float(2.5)),
                ("ShowUnit", StyleValue::Boolean(false)),
                ("UnitOverride", StyleValue::from("mm")),
                ("ExtLines", StyleValue::Float(-0.5)),
            ]),
        );

        store.save(&pdict).unwrap();
        let loaded = store.load();

        assert_eq!(loaded, pdict);
        let names: Vec<_> = loaded.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_saved_file_is_indented_json() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        let mut pdict = PresetDict::new();
        pdict.insert("A".to_string(), attrs(&[("LineWidth", StyleValue::Integer(2))]));
        store.save(&pdict).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "{\n    \"A\": {\n        \"LineWidth\": 2\n    }\n}\n");
    }

    #[test]
    fn test_save_preset_overwrite_drops_old_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        store
            .save_preset(
                "Mine",
                attrs(&[
                    ("LineWidth", StyleValue::Integer(2)),
                    ("TextFont", StyleValue::from("Sans")),
                ]),
            )
            .unwrap();
        store
            .save_preset("Mine", attrs(&[("LineWidth", StyleValue::Integer(6))]))
            .unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(
            loaded["Mine"],
            attrs(&[("LineWidth", StyleValue::Integer(6))])
        );
    }

    #[test]
    fn test_save_over_malformed_file_replaces_it() {
        let temp_dir = TempDir::new().unwrap();
        let store = PresetStore::new(temp_dir.path().join(PRESET_FILE));
        fs::write(store.path(), "{not valid json").unwrap();

        store.save_preset("Fresh", StyleAttributes::new()).unwrap();
        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains_key("Fresh"));
    }

    #[test]
    fn test_delete_preset() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        assert!(!store.delete_preset("Nothing").unwrap());
        assert!(!store.path().exists());

        store.save_preset("One", StyleAttributes::new()).unwrap();
        store.save_preset("Two", StyleAttributes::new()).unwrap();
        assert!(store.delete_preset("One").unwrap());

        let names: Vec<_> = store.load().keys().cloned().collect();
        assert_eq!(names, vec!["Two".to_string()]);
    }

    #[test]
    fn test_default_path() {
        if let Some(path) = PresetStore::default_path() {
            assert!(path.ends_with("draftstyle/StylePresets.json"));
        }
    }
}
