//! Shape validation of the raw metadata attached to a clicked scene node.
//!
//! The raw record comes from the external viewer and is untrusted. Validation
//! is all-or-nothing: either every present field has its declared shape and a
//! [`ValidatedMetadata`] is produced, or the whole record is rejected.
//! Values are never coerced (`"2"` is not a number).

use serde_json::{Map, Value};
use thiserror::Error;

use super::types::{
    BasePoint, Definition, DisplayStyle, RenderMaterial, ScalarValue, Transform,
    ValidatedMetadata,
};

/// Minimum number of elements in `transform.matrix` (a flattened 4x4)
pub const MIN_MATRIX_LEN: usize = 16;

/// Причина отклонения записи. Частичных данных не содержит.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("metadata must be an object, got {0}")]
    NotAnObject(&'static str),

    #[error("required field `{0}` is missing")]
    MissingField(String),

    #[error("field `{field}` must be {expected}, got {found}")]
    InvalidType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("field `transform.matrix` must have at least 16 elements, got {0}")]
    MatrixTooShort(usize),
}

/// Validate a raw metadata record.
///
/// # Example
/// ```
/// use contracts::shared::speckle::validate;
/// use serde_json::json;
///
/// let meta = validate(&json!({"id": "abc123", "units": "mm"})).unwrap();
/// assert_eq!(meta.units.as_deref(), Some("mm"));
/// assert!(validate(&json!({"units": "mm"})).is_err());
/// ```
pub fn validate(raw: &Value) -> Result<ValidatedMetadata, ValidationError> {
    let result = validate_record(raw);
    if let Err(e) = &result {
        log::debug!("metadata rejected: {}", e);
    }
    result
}

impl TryFrom<Value> for ValidatedMetadata {
    type Error = ValidationError;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        validate(&raw)
    }
}

fn validate_record(raw: &Value) -> Result<ValidatedMetadata, ValidationError> {
    let record = Fields::root(raw)?;
    let id = record.required("id", string)?;

    // speckleType — запасной вариант, если ключа speckle_type нет
    let speckle_type = match record.optional("speckle_type", string)? {
        Some(t) => Some(t),
        None => record.optional("speckleType", string)?,
    };

    Ok(ValidatedMetadata {
        id,
        name: record.optional("name", string)?,
        speckle_type,
        units: record.optional("units", string)?,
        application_id: record.optional("applicationId", string)?,
        display_style: record.optional("displayStyle", display_style)?,
        render_material: record.optional("renderMaterial", render_material)?,
        transform: record.optional("transform", transform)?,
        definition: record.optional("definition", definition)?,
        user_strings: record.optional("userStrings", |v, field| object(v, field).cloned())?,
    })
}

fn display_style(value: &Value, field: &str) -> Result<DisplayStyle, ValidationError> {
    let style = Fields::nested(value, field)?;
    Ok(DisplayStyle {
        color: style.required("color", scalar)?,
        linetype: style.required("linetype", string)?,
        lineweight: style.required("lineweight", number)?,
        line_source: style.required("lineSource", string)?,
    })
}

fn render_material(value: &Value, field: &str) -> Result<RenderMaterial, ValidationError> {
    let material = Fields::nested(value, field)?;
    Ok(RenderMaterial {
        name: material.required("name", string)?,
        diffuse: material.required("diffuse", scalar)?,
        opacity: material.required("opacity", number)?,
        metalness: material.required("metalness", number)?,
        roughness: material.required("roughness", number)?,
    })
}

fn transform(value: &Value, field: &str) -> Result<Transform, ValidationError> {
    let transform = Fields::nested(value, field)?;
    let matrix = transform.required("matrix", |v, field| {
        array(v, field)?
            .iter()
            .enumerate()
            .map(|(i, item)| number(item, &format!("{}[{}]", field, i)))
            .collect::<Result<Vec<_>, _>>()
    })?;

    // Лишние элементы допустимы: обрезка до 16 происходит при форматировании
    if matrix.len() < MIN_MATRIX_LEN {
        return Err(ValidationError::MatrixTooShort(matrix.len()));
    }
    Ok(Transform { matrix })
}

fn definition(value: &Value, field: &str) -> Result<Definition, ValidationError> {
    let def = Fields::nested(value, field)?;
    Ok(Definition {
        name: def.required("name", string)?,
        geometry: def.optional("geometry", |v, field| array(v, field).map(<[Value]>::to_vec))?,
        base_point: def.optional("basePoint", base_point)?,
    })
}

fn base_point(value: &Value, field: &str) -> Result<BasePoint, ValidationError> {
    let point = Fields::nested(value, field)?;
    Ok(BasePoint {
        x: point.required("x", number)?,
        y: point.required("y", number)?,
        z: point.required("z", number)?,
    })
}

/// Object being validated together with its dotted path for error messages
struct Fields<'a> {
    map: &'a Map<String, Value>,
    path: String,
}

impl<'a> Fields<'a> {
    fn root(value: &'a Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) => Ok(Self {
                map,
                path: String::new(),
            }),
            other => Err(ValidationError::NotAnObject(type_name(other))),
        }
    }

    fn nested(value: &'a Value, field: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            map: object(value, field)?,
            path: field.to_string(),
        })
    }

    fn field_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    fn required<T>(
        &self,
        key: &str,
        check: impl FnOnce(&'a Value, &str) -> Result<T, ValidationError>,
    ) -> Result<T, ValidationError> {
        let field = self.field_path(key);
        match self.map.get(key) {
            Some(value) => check(value, &field),
            None => Err(ValidationError::MissingField(field)),
        }
    }

    /// Absent key → `None`. An explicit `null` is a present value and is checked.
    fn optional<T>(
        &self,
        key: &str,
        check: impl FnOnce(&'a Value, &str) -> Result<T, ValidationError>,
    ) -> Result<Option<T>, ValidationError> {
        match self.map.get(key) {
            Some(value) => check(value, &self.field_path(key)).map(Some),
            None => Ok(None),
        }
    }
}

fn invalid(field: &str, expected: &'static str, found: &Value) -> ValidationError {
    ValidationError::InvalidType {
        field: field.to_string(),
        expected,
        found: type_name(found),
    }
}

fn string(value: &Value, field: &str) -> Result<String, ValidationError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(field, "a string", value))
}

fn number(value: &Value, field: &str) -> Result<f64, ValidationError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| invalid(field, "a number", value)),
        other => Err(invalid(field, "a number", other)),
    }
}

fn scalar(value: &Value, field: &str) -> Result<ScalarValue, ValidationError> {
    match value {
        Value::String(s) => Ok(ScalarValue::Text(s.clone())),
        Value::Number(_) => number(value, field).map(ScalarValue::Number),
        other => Err(invalid(field, "a string or a number", other)),
    }
}

fn object<'v>(value: &'v Value, field: &str) -> Result<&'v Map<String, Value>, ValidationError> {
    value.as_object().ok_or_else(|| invalid(field, "an object", value))
}

fn array<'v>(value: &'v Value, field: &str) -> Result<&'v [Value], ValidationError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| invalid(field, "an array", value))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_record() -> Value {
        json!({
            "id": "abc123",
            "name": "Wall",
            "speckle_type": "Objects.BuiltElements.Wall",
            "units": "mm",
            "applicationId": "app-1",
            "displayStyle": {
                "color": -16777216,
                "linetype": "Continuous",
                "lineweight": 0.25,
                "lineSource": "Layer"
            },
            "renderMaterial": {
                "name": "Concrete",
                "diffuse": "#808080",
                "opacity": 1,
                "metalness": 0,
                "roughness": 0.8
            },
            "transform": { "matrix": [1,0,0,0, 0,1,0,0, 0,0,1,0, 0,0,0,1] },
            "definition": {
                "name": "Block A",
                "geometry": [{"id": "g1"}, "g2"],
                "basePoint": {"x": 1, "y": 2, "z": 3}
            },
            "userStrings": {"foo": "bar"},
            "totalChildrenCount": 4
        })
    }

    #[test]
    fn test_full_record_validates() {
        let meta = validate(&full_record()).unwrap();
        assert_eq!(meta.id, "abc123");
        assert_eq!(meta.speckle_type.as_deref(), Some("Objects.BuiltElements.Wall"));
        assert_eq!(meta.display_style.unwrap().color, ScalarValue::Number(-16777216.0));
        assert_eq!(meta.render_material.unwrap().diffuse, ScalarValue::Text("#808080".into()));
        assert_eq!(meta.transform.unwrap().matrix.len(), 16);
        let def = meta.definition.unwrap();
        assert_eq!(def.geometry.unwrap().len(), 2);
        assert_eq!(def.base_point, Some(BasePoint { x: 1.0, y: 2.0, z: 3.0 }));
        assert_eq!(meta.user_strings.unwrap().get("foo"), Some(&json!("bar")));
    }

    #[test]
    fn test_id_only_record_validates() {
        let meta = validate(&json!({"id": "abc123"})).unwrap();
        assert_eq!(
            meta,
            ValidatedMetadata {
                id: "abc123".into(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_missing_or_non_string_id_is_rejected() {
        assert_eq!(
            validate(&json!({"name": "Wall"})),
            Err(ValidationError::MissingField("id".into()))
        );
        assert!(matches!(
            validate(&json!({"id": 42})),
            Err(ValidationError::InvalidType { .. })
        ));
        assert!(validate(&json!({"id": null})).is_err());
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert_eq!(validate(&json!("abc")), Err(ValidationError::NotAnObject("string")));
        assert_eq!(validate(&json!(null)), Err(ValidationError::NotAnObject("null")));
        assert_eq!(validate(&json!([{"id": "a"}])), Err(ValidationError::NotAnObject("array")));
    }

    #[test]
    fn test_values_are_not_coerced() {
        let mut raw = full_record();
        raw["displayStyle"]["lineweight"] = json!("0.25");
        assert_eq!(
            validate(&raw),
            Err(ValidationError::InvalidType {
                field: "displayStyle.lineweight".into(),
                expected: "a number",
                found: "string",
            })
        );
    }

    #[test]
    fn test_invalid_sub_object_rejects_whole_record() {
        let mut raw = full_record();
        raw["renderMaterial"].as_object_mut().unwrap().remove("roughness");
        assert_eq!(
            validate(&raw),
            Err(ValidationError::MissingField("renderMaterial.roughness".into()))
        );

        let mut raw = full_record();
        raw["definition"]["basePoint"] = json!({"x": 1, "y": 2});
        assert_eq!(
            validate(&raw),
            Err(ValidationError::MissingField("definition.basePoint.z".into()))
        );

        let mut raw = full_record();
        raw["definition"]["geometry"] = json!({"id": "g1"});
        assert_eq!(
            validate(&raw),
            Err(ValidationError::InvalidType {
                field: "definition.geometry".into(),
                expected: "an array",
                found: "object",
            })
        );

        let mut raw = full_record();
        raw["definition"].as_object_mut().unwrap().remove("name");
        assert_eq!(
            validate(&raw),
            Err(ValidationError::MissingField("definition.name".into()))
        );

        let mut raw = full_record();
        raw["displayStyle"]["color"] = json!(true);
        assert!(validate(&raw).is_err());
    }

    #[test]
    fn test_explicit_null_is_rejected() {
        assert!(validate(&json!({"id": "a", "applicationId": null})).is_err());
        assert!(validate(&json!({"id": "a", "userStrings": null})).is_err());
    }

    #[test]
    fn test_matrix_length() {
        let short: Vec<f64> = (0..15).map(f64::from).collect();
        assert_eq!(
            validate(&json!({"id": "a", "transform": {"matrix": short}})),
            Err(ValidationError::MatrixTooShort(15))
        );

        let long: Vec<f64> = (0..20).map(f64::from).collect();
        let meta = validate(&json!({"id": "a", "transform": {"matrix": long}})).unwrap();
        assert_eq!(meta.transform.unwrap().matrix.len(), 20);

        let mut mixed: Vec<Value> = (0..16).map(|i| json!(i)).collect();
        mixed[3] = json!("3");
        assert_eq!(
            validate(&json!({"id": "a", "transform": {"matrix": mixed}})),
            Err(ValidationError::InvalidType {
                field: "transform.matrix[3]".into(),
                expected: "a number",
                found: "string",
            })
        );
    }

    #[test]
    fn test_user_strings_must_be_object() {
        assert!(validate(&json!({"id": "a", "userStrings": ["foo"]})).is_err());
        let meta = validate(&json!({"id": "a", "userStrings": {"n": {"deep": [1]}}})).unwrap();
        assert_eq!(meta.user_strings.unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let meta = validate(&json!({
            "id": "a",
            "elements": [1, 2, 3],
            "displayStyle": {"color": "red", "linetype": "Dash", "lineweight": 1, "lineSource": "Object", "extra": null}
        }))
        .unwrap();
        assert!(meta.display_style.is_some());
    }

    #[test]
    fn test_speckle_type_alias() {
        let meta = validate(&json!({"id": "a", "speckleType": "Base"})).unwrap();
        assert_eq!(meta.speckle_type.as_deref(), Some("Base"));

        let meta = validate(&json!({"id": "a", "speckle_type": "Mesh", "speckleType": "Base"})).unwrap();
        assert_eq!(meta.speckle_type.as_deref(), Some("Mesh"));
    }
}
