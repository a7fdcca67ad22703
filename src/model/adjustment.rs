use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

/// The seven caller-supplied fields of a payroll adjustment.
///
/// Every field is optional: absent fields are neither stored nor rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentFields {
    /// Application-assigned identifier, not unique
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "compact_number"
    )]
    #[schema(example = 1)]
    pub id: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "A")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "January")]
    pub month: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "2024")]
    pub year: Option<String>,

    /// Either `deduction` or `incentive`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "incentive")]
    pub operation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "bonus")]
    pub reason_for_deduction_or_incentive: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "compact_number"
    )]
    #[schema(example = 500)]
    pub salary_deduction_or_incentive: Option<f64>,
}

/// A stored adjustment as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
    "id": 1,
    "name": "A",
    "month": "Jan",
    "year": "2024",
    "operation": "incentive",
    "reasonForDeductionOrIncentive": "bonus",
    "salaryDeductionOrIncentive": 500
}))]
pub struct AdjustmentRecord {
    /// Storage-assigned identity, hex encoded
    #[serde(rename = "_id")]
    pub object_id: String,

    #[serde(flatten)]
    pub fields: AdjustmentFields,
}

// Integral values go out without a fractional part, `500` rather than `500.0`.
fn compact_number<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() <= MAX_EXACT => serializer.serialize_i64(*v as i64),
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> AdjustmentRecord {
        AdjustmentRecord {
            object_id: "65a1f0c2e4b0a1b2c3d4e5f6".to_string(),
            fields: AdjustmentFields {
                id: Some(1.0),
                name: Some("A".to_string()),
                month: Some("Jan".to_string()),
                year: Some("2024".to_string()),
                operation: Some("incentive".to_string()),
                reason_for_deduction_or_incentive: Some("bonus".to_string()),
                salary_deduction_or_incentive: Some(500.0),
            },
        }
    }

    #[test]
    fn record_serializes_with_camel_case_keys_and_storage_identity() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
                "id": 1,
                "name": "A",
                "month": "Jan",
                "year": "2024",
                "operation": "incentive",
                "reasonForDeductionOrIncentive": "bonus",
                "salaryDeductionOrIncentive": 500
            })
        );
    }

    #[test]
    fn absent_fields_are_omitted() {
        let record = AdjustmentRecord {
            object_id: "abc".to_string(),
            fields: AdjustmentFields {
                name: Some("B".to_string()),
                ..AdjustmentFields::default()
            },
        };
        let value = serde_json::to_value(record).unwrap();
        assert_eq!(value, json!({ "_id": "abc", "name": "B" }));
    }

    #[test]
    fn fractional_salary_keeps_its_fraction() {
        let fields = AdjustmentFields {
            salary_deduction_or_incentive: Some(-120.5),
            ..AdjustmentFields::default()
        };
        let value = serde_json::to_value(fields).unwrap();
        assert_eq!(value, json!({ "salaryDeductionOrIncentive": -120.5 }));
    }

    #[test]
    fn integral_and_fractional_ids_render_like_json_numbers() {
        let fields: AdjustmentFields =
            serde_json::from_value(json!({ "id": 7, "name": null })).unwrap();
        assert_eq!(fields.id, Some(7.0));
        assert_eq!(fields.name, None);
        assert_eq!(serde_json::to_value(&fields).unwrap(), json!({ "id": 7 }));

        let fractional = AdjustmentFields {
            id: Some(1.5),
            ..AdjustmentFields::default()
        };
        assert_eq!(serde_json::to_value(fractional).unwrap(), json!({ "id": 1.5 }));
    }

    #[test]
    fn record_reads_back_from_its_own_json() {
        let text = serde_json::to_string(&sample()).unwrap();
        let parsed: AdjustmentRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, sample());
    }
}
