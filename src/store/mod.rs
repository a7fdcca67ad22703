//! Persistence for adjustment records.

use std::future::Future;

use derive_more::{Display, From};

use crate::model::adjustment::{AdjustmentFields, AdjustmentRecord};
use crate::utils::db_utils::AdjustmentUpdate;

#[cfg(test)]
pub mod memory;
pub mod mongo;

/// Collection holding every adjustment document.
pub const COLLECTION: &str = "employeeDeductionIncentive";

#[derive(Debug, Display, From)]
pub enum StoreError {
    #[display(fmt = "{}", _0)]
    Database(mongodb::error::Error),
}

impl std::error::Error for StoreError {}

/// Storage for [`AdjustmentRecord`]s.
///
/// Lookups take the application `id`; `None` matches records whose `id` is
/// null or missing. Every method is a single document operation, so none of
/// them coordinate with concurrent writers.
pub trait AdjustmentStore: Send + Sync + 'static {
    /// All records in storage order.
    fn list(&self) -> impl Future<Output = Result<Vec<AdjustmentRecord>, StoreError>> + Send;

    /// Every record whose `id` equals `id`.
    fn find_by_id(
        &self,
        id: Option<f64>,
    ) -> impl Future<Output = Result<Vec<AdjustmentRecord>, StoreError>> + Send;

    /// Persist a new record; no uniqueness check on `id`.
    fn insert(
        &self,
        fields: AdjustmentFields,
    ) -> impl Future<Output = Result<AdjustmentRecord, StoreError>> + Send;

    /// Apply `update` to the first matching record and return it post-update.
    fn update_first(
        &self,
        id: Option<f64>,
        update: AdjustmentUpdate,
    ) -> impl Future<Output = Result<Option<AdjustmentRecord>, StoreError>> + Send;

    /// Remove the first matching record, returning what was removed.
    fn delete_first(
        &self,
        id: Option<f64>,
    ) -> impl Future<Output = Result<Option<AdjustmentRecord>, StoreError>> + Send;
}
