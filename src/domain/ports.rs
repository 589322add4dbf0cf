use async_trait::async_trait;

use super::errors::DomainError;
use super::order::{Order, OrderId, UpdateResult};

/// Collection-level operations on the purchase orders store.
///
/// Implemented by the MongoDB adapter and by the in-memory double; both must
/// behave the same for every method below.
#[async_trait]
pub trait OrderCollection: Send + Sync + 'static {
    /// Inserts `order` (whose id is unset) and returns the store-assigned id.
    async fn insert_one(&self, order: &Order) -> Result<OrderId, DomainError>;
    /// `$set`s every field of `order` on the document with the same id.
    async fn update_one(&self, order: &Order, upsert: bool) -> Result<UpdateResult, DomainError>;
    /// At most `limit` orders in the store's natural order.
    async fn find(&self, limit: i64) -> Result<Vec<Order>, DomainError>;
    async fn find_one(&self, id: &OrderId) -> Result<Option<Order>, DomainError>;
    /// Number of deleted documents, 0 or 1.
    async fn delete_one(&self, id: &OrderId) -> Result<u64, DomainError>;
}

/// Persistence contract the HTTP layer talks to.
#[async_trait]
pub trait OrdersDataService: Send + Sync + 'static {
    async fn create(&self, order: Order) -> Result<OrderId, DomainError>;
    async fn update(&self, order: Order) -> Result<u64, DomainError>;
    async fn get_all(&self) -> Result<Vec<Order>, DomainError>;
    /// `Ok(None)` means no such order; it is not an error.
    async fn get_by_id(&self, id: &str) -> Result<Option<Order>, DomainError>;
    async fn delete_by_id(&self, id: &str) -> Result<u64, DomainError>;
}

#[async_trait]
pub trait DatabasePing: Send + Sync + 'static {
    async fn ping(&self) -> Result<(), DomainError>;
}
