use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Bson};
use mongodb::{Collection, Database};

use crate::application::order_service::ORDERS_COLLECTION;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderId, UpdateResult};
use crate::domain::ports::OrderCollection;

use super::models::OrderDocument;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<mongodb::error::Error> for DomainError {
    fn from(e: mongodb::error::Error) -> Self {
        DomainError::Storage(e.to_string())
    }
}

impl From<bson::ser::Error> for DomainError {
    fn from(e: bson::ser::Error) -> Self {
        DomainError::Storage(e.to_string())
    }
}

// ── Collection adapter ───────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct MongoOrderCollection {
    collection: Collection<OrderDocument>,
}

impl MongoOrderCollection {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(ORDERS_COLLECTION),
        }
    }
}

#[async_trait]
impl OrderCollection for MongoOrderCollection {
    async fn insert_one(&self, order: &Order) -> Result<OrderId, DomainError> {
        let document = OrderDocument::try_from(order)?;
        let result = self.collection.insert_one(&document).await?;

        result
            .inserted_id
            .as_object_id()
            .map(OrderId::from)
            .ok_or_else(|| {
                DomainError::Storage(format!(
                    "store assigned a non-ObjectId id: {}",
                    result.inserted_id
                ))
            })
    }

    async fn update_one(&self, order: &Order, upsert: bool) -> Result<UpdateResult, DomainError> {
        let Some(id) = order.assigned_id() else {
            return Ok(UpdateResult {
                matched_count: 0,
                upserted_id: None,
            });
        };

        // `_id` comes from the filter; it must not appear in `$set`.
        let mut fields = bson::to_document(&OrderDocument::try_from(order)?)?;
        fields.remove("_id");

        let result = self
            .collection
            .update_one(doc! { "_id": id.as_object_id() }, doc! { "$set": fields })
            .upsert(upsert)
            .await?;

        Ok(UpdateResult {
            matched_count: result.matched_count,
            upserted_id: result
                .upserted_id
                .as_ref()
                .and_then(Bson::as_object_id)
                .map(OrderId::from),
        })
    }

    async fn find(&self, limit: i64) -> Result<Vec<Order>, DomainError> {
        let cursor = self.collection.find(doc! {}).limit(limit).await?;
        let documents: Vec<OrderDocument> = cursor.try_collect().await?;

        documents.into_iter().map(Order::try_from).collect()
    }

    async fn find_one(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        self.collection
            .find_one(doc! { "_id": id.as_object_id() })
            .await?
            .map(Order::try_from)
            .transpose()
    }

    async fn delete_one(&self, id: &OrderId) -> Result<u64, DomainError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id.as_object_id() })
            .await?;
        Ok(result.deleted_count)
    }
}
