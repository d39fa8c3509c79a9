use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Строка или число (`displayStyle.color`, `renderMaterial.diffuse`)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Number(f64),
    Text(String),
}

impl ScalarValue {
    pub fn to_display(&self) -> String {
        match self {
            ScalarValue::Number(n) => number_to_string(*n),
            ScalarValue::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayStyle {
    pub color: ScalarValue,
    pub linetype: String,
    pub lineweight: f64,
    pub line_source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderMaterial {
    pub name: String,
    pub diffuse: ScalarValue,
    pub opacity: f64,
    pub metalness: f64,
    pub roughness: f64,
}

/// Flattened 4x4 matrix. Validation guarantees at least 16 elements;
/// the layout (row- or column-major) is not interpreted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transform {
    pub matrix: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BasePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_point: Option<BasePoint>,
}

/// Metadata of a model component after it passed validation.
///
/// Only `id` is guaranteed. Every other field is `Some` exactly when the raw
/// record supplied it with the expected shape.
///
/// Deserialization goes through [`validate`](super::validate), so a value of
/// this type can't be built from JSON that would be rejected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "serde_json::Value")]
pub struct ValidatedMetadata {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "speckle_type", skip_serializing_if = "Option::is_none")]
    pub speckle_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_style: Option<DisplayStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render_material: Option<RenderMaterial>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<Definition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_strings: Option<Map<String, Value>>,
}

/// Одна строка панели: подпись и уже отформатированное значение
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub label: String,
    pub value: String,
}

impl MetadataEntry {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Titled group of entries, rendered as-is by the sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataSection {
    pub title: String,
    pub entries: Vec<MetadataEntry>,
}

/// Renders a number the way the browser's `String(number)` does.
///
/// ```
/// use contracts::shared::speckle::number_to_string;
/// assert_eq!(number_to_string(1.0), "1");
/// assert_eq!(number_to_string(0.25), "0.25");
/// assert_eq!(number_to_string(1e21), "1e+21");
/// ```
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        // -0 тоже печатается как "0"
        return "0".to_string();
    }

    let abs = n.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let formatted = format!("{:e}", n);
        return match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => formatted,
        };
    }

    format!("{}", n)
}

/// Stringifies an arbitrary JSON value like `String(value)` in the browser.
/// Used for `userStrings`, whose values are never validated.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.as_f64().map(number_to_string).unwrap_or_else(|| n.to_string()),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                // Array.prototype.join печатает null как пустую строку
                Value::Null => String::new(),
                other => value_to_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_to_string() {
        assert_eq!(number_to_string(0.0), "0");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(42.0), "42");
        assert_eq!(number_to_string(-3.5), "-3.5");
        assert_eq!(number_to_string(0.1), "0.1");
        assert_eq!(number_to_string(16777215.0), "16777215");
        assert_eq!(number_to_string(1e21), "1e+21");
        assert_eq!(number_to_string(1.5e-7), "1.5e-7");
        assert_eq!(number_to_string(0.000001), "0.000001");
    }

    #[test]
    fn test_value_to_string() {
        assert_eq!(value_to_string(&json!("bar")), "bar");
        assert_eq!(value_to_string(&json!(3)), "3");
        assert_eq!(value_to_string(&json!(2.5)), "2.5");
        assert_eq!(value_to_string(&json!(true)), "true");
        assert_eq!(value_to_string(&json!(null)), "null");
        assert_eq!(value_to_string(&json!([1, "a", null, [2, 3]])), "1,a,,2,3");
        assert_eq!(value_to_string(&json!({"k": 1})), "[object Object]");
    }

    #[test]
    fn test_scalar_value_display() {
        assert_eq!(ScalarValue::Number(255.0).to_display(), "255");
        assert_eq!(ScalarValue::Text("#ff0000".into()).to_display(), "#ff0000");
    }

    #[test]
    fn test_validated_metadata_serializes_with_wire_names() {
        let meta = ValidatedMetadata {
            id: "abc".into(),
            speckle_type: Some("Objects.Geometry.Mesh".into()),
            application_id: Some("app".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(
            json,
            json!({"id": "abc", "speckle_type": "Objects.Geometry.Mesh", "applicationId": "app"})
        );
        assert_eq!(serde_json::from_value::<ValidatedMetadata>(json).unwrap(), meta);
    }

    #[test]
    fn test_deserialize_runs_validation() {
        let short_matrix = json!({"id": "a", "transform": {"matrix": [1.0, 2.0]}});
        assert!(serde_json::from_value::<ValidatedMetadata>(short_matrix).is_err());

        let null_name = json!({"id": "a", "name": null});
        assert!(serde_json::from_value::<ValidatedMetadata>(null_name).is_err());

        let err = serde_json::from_str::<ValidatedMetadata>(r#"{"name": "no id"}"#).unwrap_err();
        assert!(err.to_string().contains("required field `id` is missing"));
    }
}
