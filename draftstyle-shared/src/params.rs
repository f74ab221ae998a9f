//! Live default styles held in the host parameter store.
//!
//! The host keeps the defaults applied to newly created objects as typed
//! parameters, split between the view provider group and the drafting
//! group. These are independent of named presets: a preset is loaded *into*
//! the parameters, and the current parameters can be snapshotted *into* a
//! preset.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::attributes::{StyleAttribute, StyleAttributes, StyleValue};
use crate::document::{read_document, write_document};
use crate::errors::StoreResult;

/// Namespace a host parameter lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParameterGroup {
    /// View provider defaults (shape colors, widths, point size)
    View,
    /// Drafting defaults (text, dimensions, draw and display modes)
    Draft,
}

impl ParameterGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            ParameterGroup::View => "View",
            ParameterGroup::Draft => "Draft",
        }
    }
}

impl fmt::Display for ParameterGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed get/set access to host parameters.
pub trait ParameterStore {
    fn get(&self, group: ParameterGroup, name: &str) -> Option<StyleValue>;

    fn set(&mut self, group: ParameterGroup, name: &str, value: StyleValue);
}

/// Parameters kept in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryParameterStore {
    values: BTreeMap<(ParameterGroup, String), StyleValue>,
}

impl MemoryParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ParameterStore for MemoryParameterStore {
    fn get(&self, group: ParameterGroup, name: &str) -> Option<StyleValue> {
        self.values.get(&(group, name.to_string())).cloned()
    }

    fn set(&mut self, group: ParameterGroup, name: &str, value: StyleValue) {
        self.values.insert((group, name.to_string()), value);
    }
}

/// Parameters persisted as a flat JSON object keyed by `"<Group>/<name>"`.
///
/// The file is read once on [`open`](JsonParameterStore::open); changes are
/// kept in memory until [`save`](JsonParameterStore::save).
#[derive(Debug, Clone)]
pub struct JsonParameterStore {
    path: PathBuf,
    values: IndexMap<String, StyleValue>,
}

impl JsonParameterStore {
    /// Open the parameter file at `path`. A missing or malformed file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values: IndexMap<String, StyleValue> = read_document(&path).unwrap_or_default();
        debug!(
            "Opened parameter store {} with {} entries",
            path.display(),
            values.len()
        );
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> StoreResult<()> {
        write_document(&self.path, &self.values)?;
        info!(
            "Saved {} parameters to {}",
            self.values.len(),
            self.path.display()
        );
        Ok(())
    }

    fn entry_key(group: ParameterGroup, name: &str) -> String {
        format!("{}/{}", group, name)
    }
}

impl ParameterStore for JsonParameterStore {
    fn get(&self, group: ParameterGroup, name: &str) -> Option<StyleValue> {
        self.values.get(&Self::entry_key(group, name)).cloned()
    }

    fn set(&mut self, group: ParameterGroup, name: &str, value: StyleValue) {
        self.values.insert(Self::entry_key(group, name), value);
    }
}

/// Snapshot the live defaults as a complete style.
///
/// Parameters that were never set read as the attribute's static default.
/// Unlike presets, parameters have no legacy fallbacks: each one is
/// independent in the host.
pub fn read_current_style(store: &dyn ParameterStore) -> StyleAttributes {
    StyleAttribute::ALL
        .into_iter()
        .map(|attribute| {
            let (group, name) = attribute.parameter();
            let kind = attribute.kind();
            let value = store
                .get(group, name)
                .and_then(|stored| {
                    let coerced = kind.coerce(&stored);
                    if coerced.is_none() {
                        warn!(
                            "Ignoring parameter {}/{} = {} for {}: expected {}",
                            group,
                            name,
                            stored,
                            attribute.key(),
                            kind.describe()
                        );
                    }
                    coerced
                })
                .unwrap_or_else(|| attribute.default_value());
            (attribute.key().to_string(), value)
        })
        .collect()
}

/// Make `style` the live defaults.
///
/// Every known attribute is written, resolved through the preset fallback
/// rules, so loading a legacy preset still sets point and annotation styles.
/// Unknown keys in `style` are ignored.
pub fn write_current_style(store: &mut dyn ParameterStore, style: &StyleAttributes) {
    for attribute in StyleAttribute::ALL {
        let (group, name) = attribute.parameter();
        store.set(group, name, attribute.resolve(style));
    }
}
