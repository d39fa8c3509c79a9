//! Derivation of display sections from validated metadata.
//!
//! Section order is fixed. Basic Info is always present, every other section
//! only when its source field is.

use serde_json::Value;

use super::types::{
    number_to_string, value_to_string, Definition, DisplayStyle, MetadataEntry,
    MetadataSection, RenderMaterial, Transform, ValidatedMetadata,
};
use super::validation::{validate, MIN_MATRIX_LEN};

/// Placeholder for missing Basic Info values (en-dash)
pub const PLACEHOLDER: &str = "–";

/// Rendered in place of a missing base point axis.
/// Kept as the literal `undefined` for compatibility with existing exports.
pub const MISSING_AXIS: &str = "undefined";

/// `userStrings` keys already shown in Basic Info or used for bookkeeping
pub const HIDDEN_USER_STRING_KEYS: [&str; 4] =
    ["id", "speckle_type", "applicationId", "totalChildrenCount"];

pub const BASIC_INFO: &str = "Basic Info";
pub const DISPLAY_STYLE: &str = "Display Style";
pub const MATERIAL: &str = "Material";
pub const TRANSFORM: &str = "Transform";
pub const DEFINITION: &str = "Definition";
pub const USER_DATA: &str = "User Data";

/// Format validated metadata into ordered display sections.
///
/// # Example
/// ```
/// use contracts::shared::speckle::{format_metadata, ValidatedMetadata};
///
/// let meta = ValidatedMetadata { id: "abc123".into(), ..Default::default() };
/// let sections = format_metadata(&meta);
/// assert_eq!(sections.len(), 1);
/// assert_eq!(sections[0].title, "Basic Info");
/// ```
pub fn format_metadata(data: &ValidatedMetadata) -> Vec<MetadataSection> {
    let mut sections = vec![basic_info(data)];

    if let Some(style) = &data.display_style {
        sections.push(display_style(style));
    }
    if let Some(material) = &data.render_material {
        sections.push(material_section(material));
    }
    if let Some(transform) = &data.transform {
        sections.push(transform_section(transform));
    }
    if let Some(def) = &data.definition {
        sections.push(definition_section(def));
    }
    if let Some(section) = data.user_strings.as_ref().and_then(user_data) {
        sections.push(section);
    }

    sections
}

/// Validate then format. A rejected record yields no sections.
pub fn format_raw(raw: &Value) -> Vec<MetadataSection> {
    match validate(raw) {
        Ok(data) => format_metadata(&data),
        Err(_) => Vec::new(),
    }
}

fn section(title: &str, entries: Vec<MetadataEntry>) -> MetadataSection {
    MetadataSection {
        title: title.to_string(),
        entries,
    }
}

// Пустая строка считается отсутствующим значением
fn or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

fn basic_info(data: &ValidatedMetadata) -> MetadataSection {
    section(
        BASIC_INFO,
        vec![
            MetadataEntry::new("Name", or_placeholder(data.name.as_deref())),
            MetadataEntry::new("Type", or_placeholder(data.speckle_type.as_deref())),
            MetadataEntry::new("Units", or_placeholder(data.units.as_deref())),
            MetadataEntry::new("ID", or_placeholder(Some(&data.id))),
            MetadataEntry::new("App ID", or_placeholder(data.application_id.as_deref())),
        ],
    )
}

fn display_style(style: &DisplayStyle) -> MetadataSection {
    section(
        DISPLAY_STYLE,
        vec![
            MetadataEntry::new("Color", style.color.to_display()),
            MetadataEntry::new("Linetype", style.linetype.as_str()),
            MetadataEntry::new("Lineweight", number_to_string(style.lineweight)),
            MetadataEntry::new("Line Source", style.line_source.as_str()),
        ],
    )
}

fn material_section(material: &RenderMaterial) -> MetadataSection {
    section(
        MATERIAL,
        vec![
            MetadataEntry::new("Name", material.name.as_str()),
            MetadataEntry::new("Diffuse", material.diffuse.to_display()),
            MetadataEntry::new("Opacity", number_to_string(material.opacity)),
            MetadataEntry::new("Metalness", number_to_string(material.metalness)),
            MetadataEntry::new("Roughness", number_to_string(material.roughness)),
        ],
    )
}

fn transform_section(transform: &Transform) -> MetadataSection {
    let matrix = transform
        .matrix
        .iter()
        .take(MIN_MATRIX_LEN)
        .map(|n| number_to_string(*n))
        .collect::<Vec<_>>()
        .join(", ");

    section(TRANSFORM, vec![MetadataEntry::new("Matrix", matrix)])
}

fn definition_section(def: &Definition) -> MetadataSection {
    let geometry_count = def.geometry.as_ref().map_or(0, Vec::len);

    let base_point = match &def.base_point {
        Some(p) => format!(
            "x: {}, y: {}, z: {}",
            number_to_string(p.x),
            number_to_string(p.y),
            number_to_string(p.z)
        ),
        None => format!("x: {0}, y: {0}, z: {0}", MISSING_AXIS),
    };

    section(
        DEFINITION,
        vec![
            MetadataEntry::new("Name", def.name.as_str()),
            MetadataEntry::new("Geometry Count", geometry_count.to_string()),
            MetadataEntry::new("Base Point", base_point),
        ],
    )
}

fn user_data(strings: &serde_json::Map<String, Value>) -> Option<MetadataSection> {
    let entries: Vec<MetadataEntry> = strings
        .iter()
        .filter(|(key, _)| !HIDDEN_USER_STRING_KEYS.contains(&key.as_str()))
        .map(|(key, value)| MetadataEntry::new(key.as_str(), value_to_string(value)))
        .collect();

    if entries.is_empty() {
        None
    } else {
        Some(section(USER_DATA, entries))
    }
}
