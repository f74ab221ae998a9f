//! Applying a resolved style to host objects through a capability query.
//!
//! Host objects expose a varying set of view properties. Rather than probing
//! for each one, a [`StyleTarget`] reports the names it supports and
//! [`apply_style`] assigns only those. Objects exposing `FontName` are
//! styled as annotations, everything else as shapes.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::attributes::{StyleAttribute, StyleAttributes, StyleValue};
use crate::color::PackedColor;

/// Draw style names, indexed by the `DrawStyle` attribute
pub const DRAW_STYLES: [&str; 4] = ["Solid", "Dashed", "Dotted", "Dashdot"];
/// Display mode names, indexed by the `DisplayMode` attribute
pub const DISPLAY_MODES: [&str; 4] = ["Flat Lines", "Shaded", "Wireframe", "Points"];
/// Arrow type names, indexed by the `ArrowStyle` attribute
pub const ARROW_TYPES: [&str; 5] = ["Dot", "Circle", "Arrow", "Tick", "Tick-2"];

/// Object types that count as annotations for [`apply_to_annotations`]
pub const ANNOTATION_TYPES: [&str; 6] = [
    "Dimension",
    "LinearDimension",
    "AngularDimension",
    "Text",
    "DraftText",
    "Label",
];

/// A value assigned to a view property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Normalised `(r, g, b)`, alpha removed
    Color([f32; 3]),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(String),
}

/// A host object whose view properties can be styled.
pub trait StyleTarget {
    /// Names of the view properties this object declares.
    fn properties(&self) -> BTreeSet<String>;

    /// Display modes this object can switch to.
    fn display_modes(&self) -> Vec<String> {
        Vec::new()
    }

    /// Host type name, e.g. `"LinearDimension"`.
    fn object_type(&self) -> String;

    fn set_property(&mut self, name: &str, value: PropertyValue);
}

/// Whether a target is styled as an annotation rather than a shape.
pub fn is_annotation(properties: &BTreeSet<String>) -> bool {
    properties.contains("FontName")
}

/// Assign every property of `style` the target supports.
///
/// `style` may be partial; missing attributes resolve through the usual
/// fallbacks and defaults. Returns the names of the properties assigned.
pub fn apply_style(target: &mut dyn StyleTarget, style: &StyleAttributes) -> Vec<&'static str> {
    let properties = target.properties();
    let mut assignments: Vec<(&'static str, PropertyValue)> = Vec::new();

    let mut offer = |property: &'static str, value: Option<PropertyValue>| {
        if let Some(value) = value.filter(|_| properties.contains(property)) {
            assignments.push((property, value));
        }
    };

    if !is_annotation(&properties) {
        offer("ShapeColor", color(style, StyleAttribute::ShapeColor));
        offer("Transparency", integer(style, StyleAttribute::Transparency));
        offer("LineColor", color(style, StyleAttribute::LineColor));
        offer("LineWidth", integer(style, StyleAttribute::LineWidth));
        offer("PointColor", color(style, StyleAttribute::PointColor));
        offer("PointSize", integer(style, StyleAttribute::PointSize));
        offer("DrawStyle", named(style, StyleAttribute::DrawStyle, &DRAW_STYLES));

        let display_mode = named(style, StyleAttribute::DisplayMode, &DISPLAY_MODES)
            .filter(|mode| match mode {
                PropertyValue::Text(name) => target.display_modes().contains(name),
                _ => false,
            });
        offer("DisplayMode", display_mode);
    } else {
        offer("TextColor", color(style, StyleAttribute::TextColor));
        offer("FontName", text(style, StyleAttribute::TextFont));
        offer("FontSize", float(style, StyleAttribute::TextSize));
        offer("LineSpacing", float(style, StyleAttribute::LineSpacing));
        offer("ScaleMultiplier", float(style, StyleAttribute::ScaleMultiplier));
        offer("LineColor", color(style, StyleAttribute::AnnoLineColor));
        offer("LineWidth", integer(style, StyleAttribute::AnnoLineWidth));
        offer("ArrowType", named(style, StyleAttribute::ArrowStyle, &ARROW_TYPES));
        offer("ArrowSize", float(style, StyleAttribute::ArrowSize));
        offer("ShowUnit", boolean(style, StyleAttribute::ShowUnit));
        offer("UnitOverride", text(style, StyleAttribute::UnitOverride));
        offer("DimOvershoot", float(style, StyleAttribute::DimOvershoot));
        offer("ExtLines", float(style, StyleAttribute::ExtLines));
        offer("ExtOvershoot", float(style, StyleAttribute::ExtOvershoot));
        offer("TextSpacing", float(style, StyleAttribute::TextSpacing));
    }

    let mut assigned = Vec::with_capacity(assignments.len());
    for (property, value) in assignments {
        trace!("Setting {} = {:?}", property, value);
        target.set_property(property, value);
        assigned.push(property);
    }
    debug!(
        "Applied {} properties to {}",
        assigned.len(),
        target.object_type()
    );
    assigned
}

/// Style every annotation among `targets`, leaving other objects alone.
///
/// Returns how many objects were styled.
pub fn apply_to_annotations<'a, I>(targets: I, style: &StyleAttributes) -> usize
where
    I: IntoIterator<Item = &'a mut dyn StyleTarget>,
{
    let mut styled = 0;
    for target in targets {
        if ANNOTATION_TYPES.contains(&target.object_type().as_str()) {
            apply_style(target, style);
            styled += 1;
        }
    }
    styled
}

fn color(style: &StyleAttributes, attribute: StyleAttribute) -> Option<PropertyValue> {
    attribute
        .resolve(style)
        .as_color()
        .map(|c: PackedColor| PropertyValue::Color(c.rgb_f32()))
}

fn integer(style: &StyleAttributes, attribute: StyleAttribute) -> Option<PropertyValue> {
    attribute.resolve(style).as_i64().map(PropertyValue::Integer)
}

fn float(style: &StyleAttributes, attribute: StyleAttribute) -> Option<PropertyValue> {
    attribute.resolve(style).as_f64().map(PropertyValue::Float)
}

fn boolean(style: &StyleAttributes, attribute: StyleAttribute) -> Option<PropertyValue> {
    attribute.resolve(style).as_bool().map(PropertyValue::Boolean)
}

fn text(style: &StyleAttributes, attribute: StyleAttribute) -> Option<PropertyValue> {
    match attribute.resolve(style) {
        StyleValue::Text(value) => Some(PropertyValue::Text(value)),
        _ => None,
    }
}

/// Map an index attribute to its name; out-of-range indices are skipped.
fn named(
    style: &StyleAttributes,
    attribute: StyleAttribute,
    names: &[&str],
) -> Option<PropertyValue> {
    let index = attribute.resolve(style).as_i64()?;
    let name = usize::try_from(index).ok().and_then(|i| names.get(i))?;
    Some(PropertyValue::Text(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    struct FakeObject {
        type_name: &'static str,
        properties: &'static [&'static str],
        modes: Vec<String>,
        assigned: BTreeMap<String, PropertyValue>,
    }

    impl FakeObject {
        fn shape(properties: &'static [&'static str]) -> Self {
            Self {
                type_name: "Wire",
                properties,
                modes: vec!["Flat Lines".to_string(), "Wireframe".to_string()],
                assigned: BTreeMap::new(),
            }
        }

        fn annotation(type_name: &'static str) -> Self {
            Self {
                type_name,
                properties: &["FontName", "FontSize", "LineColor", "ArrowType", "ShowUnit"],
                modes: Vec::new(),
                assigned: BTreeMap::new(),
            }
        }
    }

    impl StyleTarget for FakeObject {
        fn properties(&self) -> BTreeSet<String> {
            self.properties.iter().map(|p| p.to_string()).collect()
        }

        fn display_modes(&self) -> Vec<String> {
            self.modes.clone()
        }

        fn object_type(&self) -> String {
            self.type_name.to_string()
        }

        fn set_property(&mut self, name: &str, value: PropertyValue) {
            self.assigned.insert(name.to_string(), value);
        }
    }

    fn style(entries: &[(&str, StyleValue)]) -> StyleAttributes {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn test_shape_only_gets_supported_properties() {
        let mut object = FakeObject::shape(&["ShapeColor", "LineWidth"]);
        let assigned = apply_style(
            &mut object,
            &style(&[
                ("ShapeColor", StyleValue::Integer(0xFF00_00FF)),
                ("LineWidth", StyleValue::Integer(4)),
                ("PointSize", StyleValue::Integer(9)),
            ]),
        );

        assert_eq!(assigned, vec!["ShapeColor", "LineWidth"]);
        assert_eq!(
            object.assigned["ShapeColor"],
            PropertyValue::Color([1.0, 0.0, 0.0])
        );
        assert_eq!(object.assigned["LineWidth"], PropertyValue::Integer(4));
    }

    #[test]
    fn test_shape_indices_map_to_names() {
        let mut object = FakeObject::shape(&["DrawStyle", "DisplayMode"]);
        apply_style(
            &mut object,
            &style(&[
                ("DrawStyle", StyleValue::Integer(1)),
                ("DisplayMode", StyleValue::Integer(2)),
            ]),
        );

        assert_eq!(
            object.assigned["DrawStyle"],
            PropertyValue::Text("Dashed".to_string())
        );
        assert_eq!(
            object.assigned["DisplayMode"],
            PropertyValue::Text("Wireframe".to_string())
        );
    }

    #[test]
    fn test_display_mode_skipped_when_object_lacks_it() {
        let mut object = FakeObject::shape(&["DisplayMode"]);
        let assigned = apply_style(
            &mut object,
            &style(&[("DisplayMode", StyleValue::Integer(1))]),
        );
        assert!(assigned.is_empty());
    }

    #[test]
    fn test_out_of_range_index_is_skipped() {
        let mut object = FakeObject::shape(&["DrawStyle"]);
        let assigned = apply_style(&mut object, &style(&[("DrawStyle", StyleValue::Integer(9))]));
        assert!(assigned.is_empty());
    }

    #[test]
    fn test_annotation_uses_annotation_attributes() {
        let mut object = FakeObject::annotation("LinearDimension");
        apply_style(
            &mut object,
            &style(&[
                ("LineColor", StyleValue::Integer(0xFF00_00FF)),
                ("AnnoLineColor", StyleValue::Integer(0x0000_FFFF)),
                ("TextFont", StyleValue::from("Mono")),
                ("ArrowStyle", StyleValue::Integer(3)),
            ]),
        );

        assert_eq!(
            object.assigned["LineColor"],
            PropertyValue::Color([0.0, 0.0, 1.0])
        );
        assert_eq!(
            object.assigned["FontName"],
            PropertyValue::Text("Mono".to_string())
        );
        assert_eq!(object.assigned["FontSize"], PropertyValue::Float(3.5));
        assert_eq!(
            object.assigned["ArrowType"],
            PropertyValue::Text("Tick".to_string())
        );
        assert_eq!(object.assigned["ShowUnit"], PropertyValue::Boolean(true));
    }

    #[test]
    fn test_legacy_style_falls_back_for_annotation_lines() {
        let mut object = FakeObject::annotation("Text");
        apply_style(
            &mut object,
            &style(&[("LineColor", StyleValue::Integer(0x00FF_00FF))]),
        );
        assert_eq!(
            object.assigned["LineColor"],
            PropertyValue::Color([0.0, 1.0, 0.0])
        );
    }

    #[test]
    fn test_apply_to_annotations_filters_by_type() {
        let mut dimension = FakeObject::annotation("AngularDimension");
        let mut label = FakeObject::annotation("Label");
        let mut wire = FakeObject::shape(&["LineWidth"]);

        let targets: Vec<&mut dyn StyleTarget> = vec![&mut dimension, &mut wire, &mut label];
        let styled = apply_to_annotations(targets, &StyleAttributes::new());

        assert_eq!(styled, 2);
        assert!(!dimension.assigned.is_empty());
        assert!(!label.assigned.is_empty());
        assert!(wire.assigned.is_empty());
    }
}
