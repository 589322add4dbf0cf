use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderId, UpdateResult};
use crate::domain::ports::OrderCollection;

/// In-process stand-in for the MongoDB collection.
///
/// Keeps insertion order, assigns ObjectIds the same way the driver does, and
/// can be switched into a failing mode to exercise storage-error paths.
/// Clones share the same backing store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderCollection {
    orders: Arc<Mutex<Vec<Order>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryOrderCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.orders.lock().map(|orders| orders.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Order>>, DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::Storage("in-memory store is unavailable".to_string()));
        }
        self.orders
            .lock()
            .map_err(|_| DomainError::Storage("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl OrderCollection for InMemoryOrderCollection {
    async fn insert_one(&self, order: &Order) -> Result<OrderId, DomainError> {
        let mut orders = self.lock()?;
        let id = OrderId::from(ObjectId::new());
        orders.push(Order {
            id: Some(id),
            ..order.clone()
        });
        Ok(id)
    }

    async fn update_one(&self, order: &Order, upsert: bool) -> Result<UpdateResult, DomainError> {
        let Some(id) = order.id else {
            return Ok(UpdateResult {
                matched_count: 0,
                upserted_id: None,
            });
        };
        let mut orders = self.lock()?;

        if let Some(existing) = orders.iter_mut().find(|o| o.id == Some(id)) {
            existing.last_updated_at = order.last_updated_at.clone();
            existing.products = order.products.clone();
            return Ok(UpdateResult {
                matched_count: 1,
                upserted_id: None,
            });
        }

        if upsert {
            orders.push(order.clone());
            return Ok(UpdateResult {
                matched_count: 0,
                upserted_id: Some(id),
            });
        }

        Ok(UpdateResult {
            matched_count: 0,
            upserted_id: None,
        })
    }

    async fn find(&self, limit: i64) -> Result<Vec<Order>, DomainError> {
        let orders = self.lock()?;
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(orders.iter().take(limit).cloned().collect())
    }

    async fn find_one(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        let orders = self.lock()?;
        Ok(orders.iter().find(|o| o.id.as_ref() == Some(id)).cloned())
    }

    async fn delete_one(&self, id: &OrderId) -> Result<u64, DomainError> {
        let mut orders = self.lock()?;
        match orders.iter().position(|o| o.id.as_ref() == Some(id)) {
            Some(index) => {
                orders.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
