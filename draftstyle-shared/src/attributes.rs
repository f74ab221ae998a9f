//! Style attribute vocabulary, value model and the fallback resolution rule.
//!
//! A preset is an open mapping from attribute name to [`StyleValue`]. The
//! known attributes are enumerated by [`StyleAttribute`], each carrying its
//! value kind, static default, the host parameter it mirrors and, for
//! attributes added after the first preset format, the older attribute whose
//! value it inherits when a legacy preset lacks it.
//!
//! # Legacy fallbacks
//!
//! ```text
//! PointColor    -> LineColor
//! PointSize     -> LineWidth
//! AnnoLineColor -> LineColor
//! AnnoLineWidth -> LineWidth
//! ```

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::color::PackedColor;
use crate::errors::{StyleError, StyleResult};
use crate::params::ParameterGroup;

/// A single attribute value as stored in a preset document.
///
/// Colors are stored as [`Integer`](StyleValue::Integer) holding a packed
/// `0xRRGGBBAA` value. Any other JSON (null, arrays, objects) is kept
/// verbatim in [`Other`](StyleValue::Other) so it survives a load and save,
/// but never resolves as an attribute value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl StyleValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            StyleValue::Integer(value) => Some(*value),
            StyleValue::Float(value)
                if value.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(value) =>
            {
                Some(*value as i64)
            }
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StyleValue::Integer(value) => Some(*value as f64),
            StyleValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StyleValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<PackedColor> {
        self.as_i64().and_then(PackedColor::from_stored)
    }
}

/// Numbers compare by value regardless of integer/float storage, so a
/// preset written as `2.0` still matches a live value of `2`.
impl PartialEq for StyleValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (StyleValue::Boolean(a), StyleValue::Boolean(b)) => a == b,
            (StyleValue::Integer(a), StyleValue::Integer(b)) => a == b,
            (StyleValue::Float(a), StyleValue::Float(b)) => a == b,
            (StyleValue::Integer(i), StyleValue::Float(f))
            | (StyleValue::Float(f), StyleValue::Integer(i)) => (*i as f64) == *f,
            (StyleValue::Text(a), StyleValue::Text(b)) => a == b,
            (StyleValue::Other(a), StyleValue::Other(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Boolean(value) => write!(f, "{}", value),
            StyleValue::Integer(value) => write!(f, "{}", value),
            StyleValue::Float(value) => write!(f, "{}", value),
            StyleValue::Text(value) => write!(f, "{:?}", value),
            StyleValue::Other(value) => write!(f, "{}", value),
        }
    }
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        StyleValue::Boolean(value)
    }
}

impl From<i64> for StyleValue {
    fn from(value: i64) -> Self {
        StyleValue::Integer(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Float(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

impl From<PackedColor> for StyleValue {
    fn from(color: PackedColor) -> Self {
        StyleValue::Integer(color.to_stored())
    }
}

/// Attribute name to value, in insertion order.
pub type StyleAttributes = IndexMap<String, StyleValue>;

/// The shape of value an attribute holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Packed `0xRRGGBBAA` integer
    Color,
    Integer,
    /// Index into a fixed list of names (draw style, display mode, arrow type)
    Index,
    Float,
    /// Length in millimetres
    Length,
    Boolean,
    Text,
}

impl AttributeKind {
    pub fn describe(self) -> &'static str {
        match self {
            AttributeKind::Color => "a color (#RRGGBB, #RRGGBBAA or packed integer)",
            AttributeKind::Integer => "an integer",
            AttributeKind::Index => "a non-negative index",
            AttributeKind::Float => "a number",
            AttributeKind::Length => "a length in mm",
            AttributeKind::Boolean => "true or false",
            AttributeKind::Text => "text",
        }
    }

    /// Parse a user-supplied literal into a value of this kind.
    pub fn parse(self, attribute: &str, raw: &str) -> StyleResult<StyleValue> {
        let literal = raw.trim();
        let invalid = || StyleError::invalid_value(attribute, raw, self.describe());

        match self {
            AttributeKind::Color => PackedColor::from_str(literal).map(StyleValue::from),
            AttributeKind::Integer => literal
                .parse::<i64>()
                .map(StyleValue::Integer)
                .map_err(|_| invalid()),
            AttributeKind::Index => match literal.parse::<i64>() {
                Ok(index) if index >= 0 => Ok(StyleValue::Integer(index)),
                _ => Err(invalid()),
            },
            AttributeKind::Float | AttributeKind::Length => {
                let number = literal.strip_suffix("mm").unwrap_or(literal).trim();
                number
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .map(StyleValue::Float)
                    .ok_or_else(invalid)
            }
            AttributeKind::Boolean => match literal.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(StyleValue::Boolean(true)),
                "false" | "no" | "off" | "0" => Ok(StyleValue::Boolean(false)),
                _ => Err(invalid()),
            },
            AttributeKind::Text => Ok(StyleValue::Text(raw.to_string())),
        }
    }

    /// Normalise a stored value to this kind, or `None` if it cannot be.
    ///
    /// Integral floats become integers for integer kinds, integers widen to
    /// floats for numeric kinds, and colors must fit in 32 bits.
    pub fn coerce(self, value: &StyleValue) -> Option<StyleValue> {
        match self {
            AttributeKind::Color => value.as_color().map(StyleValue::from),
            AttributeKind::Integer => value.as_i64().map(StyleValue::Integer),
            AttributeKind::Index => value
                .as_i64()
                .filter(|index| *index >= 0)
                .map(StyleValue::Integer),
            AttributeKind::Float | AttributeKind::Length => value.as_f64().map(StyleValue::Float),
            AttributeKind::Boolean => value.as_bool().map(StyleValue::Boolean),
            AttributeKind::Text => value.as_str().map(StyleValue::from),
        }
    }
}

/// Every style attribute known to the dialog, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleAttribute {
    ShapeColor,
    Transparency,
    LineColor,
    LineWidth,
    PointColor,
    PointSize,
    DrawStyle,
    DisplayMode,
    TextColor,
    TextFont,
    TextSize,
    LineSpacing,
    ScaleMultiplier,
    AnnoLineColor,
    AnnoLineWidth,
    ArrowStyle,
    ArrowSize,
    ShowUnit,
    UnitOverride,
    DimOvershoot,
    ExtLines,
    ExtOvershoot,
    TextSpacing,
}

impl StyleAttribute {
    pub const ALL: [StyleAttribute; 23] = [
        StyleAttribute::ShapeColor,
        StyleAttribute::Transparency,
        StyleAttribute::LineColor,
        StyleAttribute::LineWidth,
        StyleAttribute::PointColor,
        StyleAttribute::PointSize,
        StyleAttribute::DrawStyle,
        StyleAttribute::DisplayMode,
        StyleAttribute::TextColor,
        StyleAttribute::TextFont,
        StyleAttribute::TextSize,
        StyleAttribute::LineSpacing,
        StyleAttribute::ScaleMultiplier,
        StyleAttribute::AnnoLineColor,
        StyleAttribute::AnnoLineWidth,
        StyleAttribute::ArrowStyle,
        StyleAttribute::ArrowSize,
        StyleAttribute::ShowUnit,
        StyleAttribute::UnitOverride,
        StyleAttribute::DimOvershoot,
        StyleAttribute::ExtLines,
        StyleAttribute::ExtOvershoot,
        StyleAttribute::TextSpacing,
    ];

    /// Key used in preset documents.
    pub fn key(self) -> &'static str {
        match self {
            StyleAttribute::ShapeColor => "ShapeColor",
            StyleAttribute::Transparency => "Transparency",
            StyleAttribute::LineColor => "LineColor",
            StyleAttribute::LineWidth => "LineWidth",
            StyleAttribute::PointColor => "PointColor",
            StyleAttribute::PointSize => "PointSize",
            StyleAttribute::DrawStyle => "DrawStyle",
            StyleAttribute::DisplayMode => "DisplayMode",
            StyleAttribute::TextColor => "TextColor",
            StyleAttribute::TextFont => "TextFont",
            StyleAttribute::TextSize => "TextSize",
            StyleAttribute::LineSpacing => "LineSpacing",
            StyleAttribute::ScaleMultiplier => "ScaleMultiplier",
            StyleAttribute::AnnoLineColor => "AnnoLineColor",
            StyleAttribute::AnnoLineWidth => "AnnoLineWidth",
            StyleAttribute::ArrowStyle => "ArrowStyle",
            StyleAttribute::ArrowSize => "ArrowSize",
            StyleAttribute::ShowUnit => "ShowUnit",
            StyleAttribute::UnitOverride => "UnitOverride",
            StyleAttribute::DimOvershoot => "DimOvershoot",
            StyleAttribute::ExtLines => "ExtLines",
            StyleAttribute::ExtOvershoot => "ExtOvershoot",
            StyleAttribute::TextSpacing => "TextSpacing",
        }
    }

    pub fn kind(self) -> AttributeKind {
        match self {
            StyleAttribute::ShapeColor
            | StyleAttribute::LineColor
            | StyleAttribute::PointColor
            | StyleAttribute::TextColor
            | StyleAttribute::AnnoLineColor => AttributeKind::Color,
            StyleAttribute::Transparency
            | StyleAttribute::LineWidth
            | StyleAttribute::PointSize
            | StyleAttribute::AnnoLineWidth => AttributeKind::Integer,
            StyleAttribute::DrawStyle | StyleAttribute::DisplayMode | StyleAttribute::ArrowStyle => {
                AttributeKind::Index
            }
            StyleAttribute::LineSpacing | StyleAttribute::ScaleMultiplier => AttributeKind::Float,
            StyleAttribute::TextSize
            | StyleAttribute::ArrowSize
            | StyleAttribute::DimOvershoot
            | StyleAttribute::ExtLines
            | StyleAttribute::ExtOvershoot
            | StyleAttribute::TextSpacing => AttributeKind::Length,
            StyleAttribute::ShowUnit => AttributeKind::Boolean,
            StyleAttribute::TextFont | StyleAttribute::UnitOverride => AttributeKind::Text,
        }
    }

    /// Older attribute whose value stands in when a legacy preset lacks this one.
    pub fn fallback(self) -> Option<StyleAttribute> {
        match self {
            StyleAttribute::PointColor | StyleAttribute::AnnoLineColor => {
                Some(StyleAttribute::LineColor)
            }
            StyleAttribute::PointSize | StyleAttribute::AnnoLineWidth => {
                Some(StyleAttribute::LineWidth)
            }
            _ => None,
        }
    }

    /// Hardcoded value used when neither the attribute nor its fallback is stored.
    pub fn default_value(self) -> StyleValue {
        match self {
            StyleAttribute::ShapeColor => PackedColor::SHAPE_DEFAULT.into(),
            StyleAttribute::LineColor
            | StyleAttribute::PointColor
            | StyleAttribute::TextColor
            | StyleAttribute::AnnoLineColor => PackedColor::BLACK.into(),
            StyleAttribute::LineWidth
            | StyleAttribute::PointSize
            | StyleAttribute::AnnoLineWidth => StyleValue::Integer(2),
            StyleAttribute::Transparency
            | StyleAttribute::DrawStyle
            | StyleAttribute::DisplayMode
            | StyleAttribute::ArrowStyle => StyleValue::Integer(0),
            StyleAttribute::TextFont => StyleValue::from("Sans"),
            StyleAttribute::TextSize => StyleValue::Float(3.5),
            StyleAttribute::LineSpacing
            | StyleAttribute::ScaleMultiplier
            | StyleAttribute::ArrowSize
            | StyleAttribute::TextSpacing => StyleValue::Float(1.0),
            StyleAttribute::ShowUnit => StyleValue::Boolean(true),
            StyleAttribute::UnitOverride => StyleValue::from(""),
            StyleAttribute::DimOvershoot => StyleValue::Float(0.0),
            StyleAttribute::ExtLines => StyleValue::Float(-0.5),
            StyleAttribute::ExtOvershoot => StyleValue::Float(2.0),
        }
    }

    /// Host parameter this attribute mirrors in the live defaults.
    pub fn parameter(self) -> (ParameterGroup, &'static str) {
        use ParameterGroup::{Draft, View};

        match self {
            StyleAttribute::ShapeColor => (View, "DefaultShapeColor"),
            StyleAttribute::Transparency => (View, "DefaultShapeTransparency"),
            StyleAttribute::LineColor => (View, "DefaultShapeLineColor"),
            StyleAttribute::LineWidth => (View, "DefaultShapeLineWidth"),
            StyleAttribute::PointColor => (View, "DefaultShapeVertexColor"),
            StyleAttribute::PointSize => (View, "DefaultShapePointSize"),
            StyleAttribute::DrawStyle => (Draft, "DefaultDrawStyle"),
            StyleAttribute::DisplayMode => (Draft, "DefaultDisplayMode"),
            StyleAttribute::TextColor => (Draft, "DefaultTextColor"),
            StyleAttribute::TextFont => (Draft, "textfont"),
            StyleAttribute::TextSize => (Draft, "textheight"),
            StyleAttribute::LineSpacing => (Draft, "LineSpacing"),
            StyleAttribute::ScaleMultiplier => (Draft, "DefaultAnnoScaleMultiplier"),
            StyleAttribute::AnnoLineColor => (Draft, "DefaultAnnoLineColor"),
            StyleAttribute::AnnoLineWidth => (Draft, "DefaultAnnoLineWidth"),
            StyleAttribute::ArrowStyle => (Draft, "dimsymbol"),
            StyleAttribute::ArrowSize => (Draft, "arrowsize"),
            StyleAttribute::ShowUnit => (Draft, "showUnit"),
            StyleAttribute::UnitOverride => (Draft, "overrideUnit"),
            StyleAttribute::DimOvershoot => (Draft, "dimovershoot"),
            StyleAttribute::ExtLines => (Draft, "extlines"),
            StyleAttribute::ExtOvershoot => (Draft, "extovershoot"),
            StyleAttribute::TextSpacing => (Draft, "dimspacing"),
        }
    }

    /// Resolve this attribute from a stored preset using its own fallback and default.
    ///
    /// Values that cannot be read as this attribute's kind are skipped with a
    /// warning, as if they were absent.
    pub fn resolve(self, preset: &StyleAttributes) -> StyleValue {
        let kind = self.kind();
        let usable = |attribute: StyleAttribute| {
            let stored = preset.get(attribute.key())?;
            let coerced = kind.coerce(stored);
            if coerced.is_none() {
                warn!(
                    "Ignoring stored {} = {} while resolving {}: expected {}",
                    attribute.key(),
                    stored,
                    self.key(),
                    kind.describe()
                );
            }
            coerced
        };

        usable(self)
            .or_else(|| self.fallback().and_then(&usable))
            .unwrap_or_else(|| self.default_value())
    }

    /// Parse a user-supplied literal for this attribute.
    pub fn parse_value(self, raw: &str) -> StyleResult<StyleValue> {
        self.kind().parse(self.key(), raw)
    }
}

impl fmt::Display for StyleAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for StyleAttribute {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleAttribute::ALL
            .into_iter()
            .find(|attribute| attribute.key() == s)
            .ok_or_else(|| StyleError::UnknownAttribute {
                name: s.to_string(),
            })
    }
}

/// Three-tier lookup: the key itself, then the legacy fallback key, then the static default.
pub fn resolve_attribute(
    preset: &StyleAttributes,
    key: &str,
    legacy_fallback_key: Option<&str>,
    static_default: StyleValue,
) -> StyleValue {
    preset
        .get(key)
        .or_else(|| legacy_fallback_key.and_then(|fallback| preset.get(fallback)))
        .cloned()
        .unwrap_or(static_default)
}

/// Resolve every known attribute of a stored preset, in vocabulary order.
pub fn resolve_style(preset: &StyleAttributes) -> StyleAttributes {
    StyleAttribute::ALL
        .into_iter()
        .map(|attribute| (attribute.key().to_string(), attribute.resolve(preset)))
        .collect()
}

/// The complete default style, as used before any preset or parameter exists.
pub fn default_style() -> StyleAttributes {
    resolve_style(&StyleAttributes::new())
}

/// Parse a `KEY=VALUE` override into a known attribute and typed value.
pub fn parse_assignment(input: &str) -> StyleResult<(StyleAttribute, StyleValue)> {
    let (key, raw) = input
        .split_once('=')
        .ok_or_else(|| StyleError::MalformedAssignment {
            input: input.to_string(),
        })?;
    let attribute: StyleAttribute = key.trim().parse()?;
    let value = attribute.parse_value(raw)?;
    Ok((attribute, value))
}
