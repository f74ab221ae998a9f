use indexmap::IndexMap;

use crate::attributes::StyleAttributes;

/// Named presets in stored order. Names are case-sensitive.
pub type PresetDict = IndexMap<String, StyleAttributes>;

/// Find the first preset (in stored order) whose every stored attribute has
/// an equal value in `current`.
///
/// Keys present in `current` but not in a preset are ignored, so a legacy
/// preset with fewer attributes can still match a complete live style.
pub fn find_matching_preset_name<'a>(
    pdict: &'a PresetDict,
    current: &StyleAttributes,
) -> Option<&'a str> {
    pdict
        .iter()
        .find(|(_, preset)| {
            preset
                .iter()
                .all(|(key, value)| current.get(key) == Some(value))
        })
        .map(|(name, _)| name.as_str())
}

/// Insert `attrs` under `name`, replacing any existing entry entirely.
///
/// An overwritten preset keeps its position in the stored order.
pub fn upsert_preset(mut pdict: PresetDict, name: &str, attrs: StyleAttributes) -> PresetDict {
    pdict.insert(name.to_string(), attrs);
    pdict
}

/// Remove the preset called `name`, keeping the order of the others.
///
/// The flag reports whether a preset was removed.
pub fn remove_preset(mut pdict: PresetDict, name: &str) -> (PresetDict, bool) {
    let removed = pdict.shift_remove(name).is_some();
    (pdict, removed)
}
