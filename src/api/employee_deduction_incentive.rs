use actix_web::{HttpResponse, web};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::api::error::ApiError;
use crate::store::AdjustmentStore;
use crate::utils::db_utils::{build_update, cast_record_id};

// Each route maps its failures to one status, whatever the cause.

/// List all adjustment records
#[utoipa::path(
    get,
    path = "/employeeDeductionIncentive",
    responses(
        (status = 200, description = "Every record in storage order", body = [crate::model::adjustment::AdjustmentRecord]),
        (status = 500, description = "Database error", body = crate::api::error::ErrorMessage)
    ),
    tag = "EmployeeDeductionIncentive"
)]
pub async fn list_records<S: AdjustmentStore>(
    store: web::Data<S>,
) -> Result<HttpResponse, ApiError> {
    let records = store.list().await.map_err(|e| {
        error!(error = %e, "Failed to list adjustment records");
        ApiError::internal(e)
    })?;

    Ok(HttpResponse::Ok().json(records))
}

/// Get adjustment records by application id
///
/// Always answers with an array: an unknown id yields `[]`, not 404.
#[utoipa::path(
    get,
    path = "/employeeDeductionIncentive/{id}",
    params(
        ("id" = String, Path, description = "Application-assigned record id")
    ),
    responses(
        (status = 200, description = "Matching records, possibly none", body = [crate::model::adjustment::AdjustmentRecord]),
        (status = 500, description = "Invalid id or database error", body = crate::api::error::ErrorMessage)
    ),
    tag = "EmployeeDeductionIncentive"
)]
pub async fn get_records<S: AdjustmentStore>(
    store: web::Data<S>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = cast_record_id(&path).map_err(ApiError::internal)?;

    let records = store.find_by_id(id).await.map_err(|e| {
        error!(error = %e, ?id, "Failed to fetch adjustment records");
        ApiError::internal(e)
    })?;

    Ok(HttpResponse::Ok().json(records))
}

/// Create an adjustment record
#[utoipa::path(
    post,
    path = "/employeeDeductionIncentive",
    request_body = crate::model::adjustment::AdjustmentFields,
    responses(
        (status = 201, description = "Record created", body = crate::model::adjustment::AdjustmentRecord),
        (status = 400, description = "Invalid payload or database error", body = crate::api::error::ErrorMessage)
    ),
    tag = "EmployeeDeductionIncentive"
)]
pub async fn create_record<S: AdjustmentStore>(
    store: web::Data<S>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let fields = build_update(&payload)
        .map_err(|e| {
            warn!(error = %e, "Rejected adjustment payload");
            ApiError::bad_request(e)
        })?
        .into_fields();

    let record = store.insert(fields).await.map_err(|e| {
        error!(error = %e, "Failed to create adjustment record");
        ApiError::bad_request(e)
    })?;

    debug!(object_id = %record.object_id, id = ?record.fields.id, "Created adjustment record");
    Ok(HttpResponse::Created().json(record))
}

/// Update the first adjustment record with the given id
#[utoipa::path(
    put,
    path = "/employeeDeductionIncentive/{id}",
    params(
        ("id" = String, Path, description = "Application-assigned record id")
    ),
    request_body = crate::model::adjustment::AdjustmentFields,
    responses(
        (status = 200, description = "Record after the update", body = crate::model::adjustment::AdjustmentRecord),
        (status = 404, description = "No record with this id", body = crate::api::error::ErrorMessage, example = json!({
            "message": "Record not found"
        })),
        (status = 400, description = "Invalid id, payload or database error", body = crate::api::error::ErrorMessage)
    ),
    tag = "EmployeeDeductionIncentive"
)]
pub async fn update_record<S: AdjustmentStore>(
    store: web::Data<S>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let id = cast_record_id(&path).map_err(ApiError::bad_request)?;
    let update = build_update(&payload).map_err(|e| {
        warn!(error = %e, ?id, "Rejected adjustment update");
        ApiError::bad_request(e)
    })?;

    let updated = store.update_first(id, update).await.map_err(|e| {
        error!(error = %e, ?id, "Failed to update adjustment record");
        ApiError::bad_request(e)
    })?;

    match updated {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Err(ApiError::NotFound),
    }
}

/// Delete the first adjustment record with the given id
#[utoipa::path(
    delete,
    path = "/employeeDeductionIncentive/{id}",
    params(
        ("id" = String, Path, description = "Application-assigned record id")
    ),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 404, description = "No record with this id", body = crate::api::error::ErrorMessage, example = json!({
            "message": "Record not found"
        })),
        (status = 500, description = "Invalid id or database error", body = crate::api::error::ErrorMessage)
    ),
    tag = "EmployeeDeductionIncentive"
)]
pub async fn delete_record<S: AdjustmentStore>(
    store: web::Data<S>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = cast_record_id(&path).map_err(ApiError::internal)?;

    let removed = store.delete_first(id).await.map_err(|e| {
        error!(error = %e, ?id, "Failed to delete adjustment record");
        ApiError::internal(e)
    })?;

    match removed {
        Some(_) => Ok(HttpResponse::NoContent().finish()),
        None => Err(ApiError::NotFound),
    }
}
