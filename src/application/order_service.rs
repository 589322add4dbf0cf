use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderId};
use crate::domain::ports::{OrderCollection, OrdersDataService};
use crate::util::format_iso;

pub const ORDERS_COLLECTION: &str = "purchaseorders";
pub const PAGE_SIZE: i64 = 100;

pub type Clock = fn() -> DateTime<Utc>;

/// Data service for purchase orders.
///
/// Setup is two-phase: the service may be built before the collection is
/// available (`unbound`) and bound later. Until then every operation fails
/// with [`DomainError::NotConfigured`] without touching storage.
pub struct OrdersService<C> {
    collection: Option<C>,
    upsert_on_update: bool,
    clock: Clock,
}

impl<C: OrderCollection> OrdersService<C> {
    pub fn new(collection: C) -> Self {
        Self {
            collection: Some(collection),
            upsert_on_update: false,
            clock: Utc::now,
        }
    }

    pub fn unbound() -> Self {
        Self {
            collection: None,
            upsert_on_update: false,
            clock: Utc::now,
        }
    }

    pub fn bind(&mut self, collection: C) {
        self.collection = Some(collection);
    }

    /// When set, updating an id that matches nothing inserts the order.
    pub fn with_upsert_on_update(mut self, upsert: bool) -> Self {
        self.upsert_on_update = upsert;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn collection(&self) -> Result<&C, DomainError> {
        self.collection
            .as_ref()
            .ok_or_else(|| DomainError::NotConfigured("orders collection is not bound".to_string()))
    }

    fn now(&self) -> String {
        format_iso((self.clock)())
    }
}

#[async_trait]
impl<C: OrderCollection> OrdersDataService for OrdersService<C> {
    async fn create(&self, mut order: Order) -> Result<OrderId, DomainError> {
        let collection = self.collection()?;
        if order.assigned_id().is_some() {
            return Err(DomainError::InvalidRequest(
                "order already has an id, use update".to_string(),
            ));
        }
        order.id = None;
        order.last_updated_at = self.now();

        collection.insert_one(&order).await
    }

    async fn update(&self, mut order: Order) -> Result<u64, DomainError> {
        let collection = self.collection()?;
        let id = order.assigned_id().ok_or_else(|| {
            DomainError::InvalidRequest("order id is required for update".to_string())
        })?;
        order.last_updated_at = self.now();

        let result = collection.update_one(&order, self.upsert_on_update).await?;
        if result.matched_count != 0 {
            log::debug!("Updated existing order {}", id);
            return Ok(result.matched_count);
        }
        if let Some(upserted) = result.upserted_id {
            log::warn!("Update of order {} matched nothing; inserted it as a new document", upserted);
            return Ok(1);
        }
        Ok(0)
    }

    async fn get_all(&self) -> Result<Vec<Order>, DomainError> {
        self.collection()?.find(PAGE_SIZE).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Order>, DomainError> {
        let collection = self.collection()?;
        let id = OrderId::parse(id)?;
        collection.find_one(&id).await
    }

    async fn delete_by_id(&self, id: &str) -> Result<u64, DomainError> {
        let collection = self.collection()?;
        let id = OrderId::parse(id)?;
        collection.delete_one(&id).await
    }
}
