use crate::api::error::ErrorMessage;
use crate::model::adjustment::{AdjustmentFields, AdjustmentRecord};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Payroll Adjustments API",
        version = "1.0.0",
        description = r#"
## Employee Deductions & Incentives

Tracks payroll adjustments per employee per month and year.

- Each record carries an application `id` that is **not** unique.
- Lookups by `id` always return an array, empty when nothing matches.
- Update and delete act on the first record with the given `id`.

Errors are returned as `{"message": "..."}`.
"#,
    ),
    paths(
        crate::api::employee_deduction_incentive::list_records,
        crate::api::employee_deduction_incentive::get_records,
        crate::api::employee_deduction_incentive::create_record,
        crate::api::employee_deduction_incentive::update_record,
        crate::api::employee_deduction_incentive::delete_record
    ),
    components(
        schemas(
            AdjustmentFields,
            AdjustmentRecord,
            ErrorMessage
        )
    ),
    tags(
        (name = "EmployeeDeductionIncentive", description = "Payroll deduction and incentive records"),
    )
)]
pub struct ApiDoc;
