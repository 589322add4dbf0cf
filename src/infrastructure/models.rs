use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::order::{Order, Product};

/// Stored shape of an order in the `purchaseorders` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub last_updated_at: String,
    #[serde(default)]
    pub products: Vec<ProductDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub remarks: String,
}

impl TryFrom<&Order> for OrderDocument {
    type Error = DomainError;

    fn try_from(order: &Order) -> Result<Self, Self::Error> {
        Ok(Self {
            id: order.assigned_id().map(|id| id.as_object_id()),
            last_updated_at: order.last_updated_at.clone(),
            products: order
                .products
                .iter()
                .map(ProductDocument::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl TryFrom<&Product> for ProductDocument {
    type Error = DomainError;

    /// BSON has no unsigned 64-bit integer; prices above `i64::MAX` are refused.
    fn try_from(product: &Product) -> Result<Self, Self::Error> {
        let price = i64::try_from(product.price).map_err(|_| {
            DomainError::InvalidRequest(format!("price {} is too large to store", product.price))
        })?;
        Ok(Self {
            name: product.name.clone(),
            updated_at: product.updated_at.clone(),
            price,
            status: product.status.clone(),
            remarks: product.remarks.clone(),
        })
    }
}

impl TryFrom<OrderDocument> for Order {
    type Error = DomainError;

    fn try_from(doc: OrderDocument) -> Result<Self, Self::Error> {
        Ok(Order {
            id: doc.id.map(Into::into),
            last_updated_at: doc.last_updated_at,
            products: doc
                .products
                .into_iter()
                .map(Product::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl TryFrom<ProductDocument> for Product {
    type Error = DomainError;

    fn try_from(doc: ProductDocument) -> Result<Self, Self::Error> {
        let price = u64::try_from(doc.price).map_err(|_| {
            DomainError::Storage(format!("stored price {} is out of range", doc.price))
        })?;
        Ok(Product {
            name: doc.name,
            price,
            status: doc.status,
            remarks: doc.remarks,
            updated_at: doc.updated_at,
        })
    }
}
