use derive_more::{Display, From};
use mongodb::bson::{Bson, Document};
use serde_json::Value;

use crate::model::adjustment::AdjustmentFields;

/// ===============================
/// Adjustment record fields
/// ===============================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Name,
    Month,
    Year,
    Operation,
    Reason,
    Salary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Number,
    Text,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Id,
        Field::Name,
        Field::Month,
        Field::Year,
        Field::Operation,
        Field::Reason,
        Field::Salary,
    ];

    /// Key used both in JSON payloads and in stored documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Month => "month",
            Field::Year => "year",
            Field::Operation => "operation",
            Field::Reason => "reasonForDeductionOrIncentive",
            Field::Salary => "salaryDeductionOrIncentive",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == key)
    }

    fn kind(&self) -> Kind {
        match self {
            Field::Id | Field::Salary => Kind::Number,
            _ => Kind::Text,
        }
    }
}

/// ===============================
/// Coerced field value
/// ===============================
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Null,
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn to_bson(&self) -> Bson {
        match self {
            FieldValue::Number(v) => Bson::Double(*v),
            FieldValue::Text(s) => Bson::String(s.clone()),
            FieldValue::Null => Bson::Null,
        }
    }
}

#[derive(Debug, Display)]
#[display(
    fmt = "Cast to {} failed for value {} (type {}) at path \"{}\"",
    target,
    value,
    value_type,
    path
)]
pub struct CastError {
    target: &'static str,
    value: String,
    value_type: &'static str,
    path: &'static str,
}

impl std::error::Error for CastError {}

#[derive(Debug, Display, From)]
pub enum PayloadError {
    #[display(fmt = "Payload must be a JSON object")]
    #[from(ignore)]
    NotAnObject,
    #[display(fmt = "{}", _0)]
    Cast(CastError),
}

impl std::error::Error for PayloadError {}

/// Casts a loosely-typed JSON value to the declared type of `field`.
pub fn cast(field: Field, value: &Value) -> Result<FieldValue, CastError> {
    let failed = |target| CastError {
        target,
        value: value.to_string(),
        value_type: json_type(value),
        path: field.as_str(),
    };

    match field.kind() {
        Kind::Number => match to_number(value) {
            Ok(n) => Ok(n.map_or(FieldValue::Null, FieldValue::Number)),
            Err(()) => Err(failed("Number")),
        },
        Kind::Text => match value {
            Value::Null => Ok(FieldValue::Null),
            Value::String(s) => Ok(FieldValue::Text(s.clone())),
            Value::Number(n) => Ok(FieldValue::Text(number_text(n))),
            Value::Bool(b) => Ok(FieldValue::Text(b.to_string())),
            Value::Array(_) | Value::Object(_) => Err(failed("string")),
        },
    }
}

fn to_number(value: &Value) -> Result<Option<f64>, ()> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n.as_f64().map(Some).ok_or(()),
        Value::Bool(b) => Ok(Some(if *b { 1.0 } else { 0.0 })),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            match trimmed.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Some(n)),
                _ => Err(()),
            }
        }
        Value::Array(_) | Value::Object(_) => Err(()),
    }
}

// Whole numbers render without a fraction, `2024` rather than `2024.0`.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(v) if n.is_f64() && v.fract() == 0.0 && v.abs() <= 9_007_199_254_740_992.0 => {
            (v as i64).to_string()
        }
        _ => n.to_string(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}

/// Casts a raw path segment to the `id` used in record lookups.
///
/// A blank segment casts to null and matches records without an `id`.
pub fn cast_record_id(raw: &str) -> Result<Option<f64>, CastError> {
    cast(Field::Id, &Value::String(raw.to_string())).map(|v| v.as_number())
}

/// ===============================
/// Field update container
/// ===============================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjustmentUpdate {
    pub values: Vec<(Field, FieldValue)>,
}

impl AdjustmentUpdate {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Applies the update onto `fields`; explicit nulls clear the field.
    pub fn apply(&self, fields: &mut AdjustmentFields) {
        for (field, value) in &self.values {
            match field {
                Field::Id => fields.id = value.as_number(),
                Field::Name => fields.name = value.as_text(),
                Field::Month => fields.month = value.as_text(),
                Field::Year => fields.year = value.as_text(),
                Field::Operation => fields.operation = value.as_text(),
                Field::Reason => fields.reason_for_deduction_or_incentive = value.as_text(),
                Field::Salary => fields.salary_deduction_or_incentive = value.as_number(),
            }
        }
    }

    pub fn into_fields(self) -> AdjustmentFields {
        let mut fields = AdjustmentFields::default();
        self.apply(&mut fields);
        fields
    }

    /// Body of a `$set` operator.
    pub fn to_set_document(&self) -> Document {
        self.values
            .iter()
            .map(|(field, value)| (field.as_str().to_string(), value.to_bson()))
            .collect()
    }
}

/// ===============================
/// Build update from a JSON payload
/// ===============================
pub fn build_update(payload: &Value) -> Result<AdjustmentUpdate, PayloadError> {
    let obj = payload.as_object().ok_or(PayloadError::NotAnObject)?;

    let mut values = Vec::with_capacity(obj.len());

    // Keys outside the record shape are dropped.
    for (key, value) in obj {
        if let Some(field) = Field::from_key(key) {
            values.push((field, cast(field, value)?));
        }
    }

    Ok(AdjustmentUpdate { values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_strings_are_coerced_for_number_fields() {
        let update = build_update(&json!({
            "id": "12",
            "salaryDeductionOrIncentive": " -250.75 "
        }))
        .unwrap();
        let fields = update.into_fields();
        assert_eq!(fields.id, Some(12.0));
        assert_eq!(fields.salary_deduction_or_incentive, Some(-250.75));
    }

    #[test]
    fn numbers_and_booleans_are_coerced_for_string_fields() {
        let fields = build_update(&json!({ "year": 2024, "month": true }))
            .unwrap()
            .into_fields();
        assert_eq!(fields.year.as_deref(), Some("2024"));
        assert_eq!(fields.month.as_deref(), Some("true"));
    }

    #[test]
    fn whole_float_renders_without_fraction_in_string_fields() {
        let fields = build_update(&json!({ "year": 2024.0, "name": 2.5 }))
            .unwrap()
            .into_fields();
        assert_eq!(fields.year.as_deref(), Some("2024"));
        assert_eq!(fields.name.as_deref(), Some("2.5"));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let update = build_update(&json!({ "_id": "x", "__v": 0, "extra": 1, "name": "A" })).unwrap();
        assert_eq!(
            update.values,
            vec![(Field::Name, FieldValue::Text("A".to_string()))]
        );
    }

    #[test]
    fn non_numeric_string_fails_with_cast_message() {
        let err = build_update(&json!({ "salaryDeductionOrIncentive": "lots" })).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"Cast to Number failed for value "lots" (type string) at path "salaryDeductionOrIncentive""#
        );
    }

    #[test]
    fn fractional_id_is_cast_like_any_number() {
        let fields = build_update(&json!({ "id": "1.5" })).unwrap().into_fields();
        assert_eq!(fields.id, Some(1.5));

        let err = build_update(&json!({ "id": "1.5x" })).unwrap_err();
        assert!(err.to_string().contains(r#"at path "id""#));
    }

    #[test]
    fn objects_cannot_be_cast_to_strings() {
        let err = build_update(&json!({ "name": { "first": "A" } })).unwrap_err();
        assert!(err.to_string().starts_with("Cast to string failed"));
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let err = build_update(&json!([1, 2])).unwrap_err();
        assert_eq!(err.to_string(), "Payload must be a JSON object");
    }

    #[test]
    fn explicit_null_clears_a_field() {
        let mut fields = AdjustmentFields {
            name: Some("A".to_string()),
            year: Some("2024".to_string()),
            ..AdjustmentFields::default()
        };
        build_update(&json!({ "name": null })).unwrap().apply(&mut fields);
        assert_eq!(fields.name, None);
        assert_eq!(fields.year.as_deref(), Some("2024"));
    }

    #[test]
    fn set_document_carries_typed_values() {
        let update = build_update(&json!({
            "id": 3,
            "operation": "deduction",
            "salaryDeductionOrIncentive": 10,
            "reasonForDeductionOrIncentive": null
        }))
        .unwrap();
        let set = update.to_set_document();
        assert_eq!(set.get("id"), Some(&Bson::Double(3.0)));
        assert_eq!(set.get("operation"), Some(&Bson::String("deduction".to_string())));
        assert_eq!(set.get("salaryDeductionOrIncentive"), Some(&Bson::Double(10.0)));
        assert_eq!(set.get("reasonForDeductionOrIncentive"), Some(&Bson::Null));
    }

    #[test]
    fn record_id_casts_from_path_segment() {
        assert_eq!(cast_record_id("42").unwrap(), Some(42.0));
        assert_eq!(cast_record_id("1.5").unwrap(), Some(1.5));
        assert_eq!(cast_record_id(" ").unwrap(), None);
        assert!(cast_record_id("abc").is_err());
    }
}
