//! Shared style types and preset storage for draftstyle.
//!
//! This crate holds everything the command-line front end (or any other
//! host integration) needs to manage default drawing styles: the attribute
//! vocabulary with its legacy fallbacks, the JSON preset store, the host
//! parameter bindings for the live defaults, and capability-driven
//! application of a style to host objects.
//!
//! # Key Components
//!
//! * [`StyleAttribute`] - Known attributes with kind, default and fallback
//! * [`resolve_attribute`] / [`resolve_style`] - Three-tier defaulting for legacy presets
//! * [`PresetStore`] - Load and save the named preset document
//! * [`find_matching_preset_name`] / [`upsert_preset`] - Preset dictionary operations
//! * [`ParameterStore`] - Live defaults kept by the host
//! * [`StyleTarget`] / [`apply_style`] - Style host objects by their declared properties
//!
//! # Data Flow
//!
//! ```text
//!  StylePresets.json ──load──► PresetDict ──resolve──► StyleAttributes
//!         ▲                                               │      │
//!         └──────────save◄── upsert ◄── read_current ─────┘      │
//!                                          ▲                     ▼
//!                                   ParameterStore ◄── write_current_style
//! ```

pub mod apply;
pub mod attributes;
pub mod color;
mod document;
pub mod errors;
pub mod params;
pub mod presets;
pub mod store;

pub use apply::{PropertyValue, StyleTarget, apply_style, apply_to_annotations};
pub use attributes::{
    AttributeKind, StyleAttribute, StyleAttributes, StyleValue, default_style, parse_assignment,
    resolve_attribute, resolve_style,
};
pub use color::PackedColor;
pub use errors::{StoreError, StyleError};
pub use params::{
    JsonParameterStore, MemoryParameterStore, ParameterGroup, ParameterStore, read_current_style,
    write_current_style,
};
pub use presets::{PresetDict, find_matching_preset_name, remove_preset, upsert_preset};
pub use store::PresetStore;
