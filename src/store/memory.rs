use futures::lock::Mutex;
use mongodb::bson::oid::ObjectId;

use super::{AdjustmentStore, StoreError};
use crate::model::adjustment::{AdjustmentFields, AdjustmentRecord};
use crate::utils::db_utils::AdjustmentUpdate;

/// Insertion-ordered records behind a lock, for exercising the HTTP layer.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<AdjustmentRecord>>,
}

impl AdjustmentStore for MemoryStore {
    async fn list(&self) -> Result<Vec<AdjustmentRecord>, StoreError> {
        Ok(self.records.lock().await.clone())
    }

    async fn find_by_id(&self, id: Option<f64>) -> Result<Vec<AdjustmentRecord>, StoreError> {
        let records = self.records.lock().await;
        Ok(records
            .iter()
            .filter(|r| r.fields.id == id)
            .cloned()
            .collect())
    }

    async fn insert(&self, fields: AdjustmentFields) -> Result<AdjustmentRecord, StoreError> {
        let record = AdjustmentRecord {
            object_id: ObjectId::new().to_hex(),
            fields,
        };
        self.records.lock().await.push(record.clone());
        Ok(record)
    }

    async fn update_first(
        &self,
        id: Option<f64>,
        update: AdjustmentUpdate,
    ) -> Result<Option<AdjustmentRecord>, StoreError> {
        let mut records = self.records.lock().await;
        Ok(records.iter_mut().find(|r| r.fields.id == id).map(|record| {
            update.apply(&mut record.fields);
            record.clone()
        }))
    }

    async fn delete_first(&self, id: Option<f64>) -> Result<Option<AdjustmentRecord>, StoreError> {
        let mut records = self.records.lock().await;
        let position = records.iter().position(|r| r.fields.id == id);
        Ok(position.map(|index| records.remove(index)))
    }
}
