use futures_util::TryStreamExt;
use mongodb::bson::{Bson, Document, doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AdjustmentStore, COLLECTION, StoreError};
use crate::model::adjustment::{AdjustmentFields, AdjustmentRecord};
use crate::utils::db_utils::AdjustmentUpdate;

/// Stored shape of a record.
#[derive(Debug, Serialize, Deserialize)]
pub struct AdjustmentDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,

    #[serde(flatten)]
    pub fields: AdjustmentFields,
}

impl AdjustmentDocument {
    fn into_record(self) -> AdjustmentRecord {
        AdjustmentRecord {
            object_id: self.object_id.map(|oid| oid.to_hex()).unwrap_or_default(),
            fields: self.fields,
        }
    }
}

#[derive(Clone)]
pub struct MongoStore {
    collection: Collection<AdjustmentDocument>,
}

impl MongoStore {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COLLECTION),
        }
    }
}

fn id_filter(id: Option<f64>) -> Document {
    match id {
        Some(id) => doc! { "id": id },
        None => doc! { "id": Bson::Null },
    }
}

impl AdjustmentStore for MongoStore {
    async fn list(&self) -> Result<Vec<AdjustmentRecord>, StoreError> {
        let docs: Vec<AdjustmentDocument> = self.collection.find(doc! {}).await?.try_collect().await?;
        Ok(docs.into_iter().map(AdjustmentDocument::into_record).collect())
    }

    async fn find_by_id(&self, id: Option<f64>) -> Result<Vec<AdjustmentRecord>, StoreError> {
        let docs: Vec<AdjustmentDocument> = self
            .collection
            .find(id_filter(id))
            .await?
            .try_collect()
            .await?;
        Ok(docs.into_iter().map(AdjustmentDocument::into_record).collect())
    }

    async fn insert(&self, fields: AdjustmentFields) -> Result<AdjustmentRecord, StoreError> {
        let document = AdjustmentDocument {
            object_id: Some(ObjectId::new()),
            fields,
        };
        self.collection.insert_one(&document).await?;
        Ok(document.into_record())
    }

    async fn update_first(
        &self,
        id: Option<f64>,
        update: AdjustmentUpdate,
    ) -> Result<Option<AdjustmentRecord>, StoreError> {
        // An empty `$set` is rejected by the server.
        let found = if update.is_empty() {
            self.collection.find_one(id_filter(id)).await?
        } else {
            let set = update.to_set_document();
            debug!(?id, set = %set, "Updating adjustment record");
            self.collection
                .find_one_and_update(id_filter(id), doc! { "$set": set })
                .return_document(ReturnDocument::After)
                .await?
        };
        Ok(found.map(AdjustmentDocument::into_record))
    }

    async fn delete_first(&self, id: Option<f64>) -> Result<Option<AdjustmentRecord>, StoreError> {
        let removed = self.collection.find_one_and_delete(id_filter(id)).await?;
        Ok(removed.map(AdjustmentDocument::into_record))
    }
}
