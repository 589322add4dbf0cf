use std::fmt;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

use super::errors::DomainError;

/// Store-assigned order identifier, rendered externally as 24 hex chars.
///
/// The all-zero value is the store's "unset" marker and never names a
/// persisted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderId(ObjectId);

impl OrderId {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| DomainError::BadRequest(format!("'{}' is not a valid order id", raw)))
    }

    pub fn zero() -> Self {
        Self(ObjectId::from_bytes([0; 12]))
    }

    pub fn is_zero(&self) -> bool {
        self.0.bytes() == [0; 12]
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for OrderId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for OrderId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for OrderId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        OrderId::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Absent, null and empty-string ids all mean "not yet created".
fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<OrderId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(hex) => OrderId::parse(hex).map(Some).map_err(serde::de::Error::custom),
    }
}

/// Explicit `null` decodes like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Smallest currency unit.
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub remarks: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    #[serde(
        rename = "order_id",
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, example = "64b7f0c2e13a4a1f9c0d5e21")]
    pub id: Option<OrderId>,
    /// Server-controlled; whatever the caller sends is overwritten on write.
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_updated_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<Product>,
}

impl Order {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            id: None,
            last_updated_at: String::new(),
            products,
        }
    }

    /// The id, if one is set and not the zero marker.
    pub fn assigned_id(&self) -> Option<OrderId> {
        self.id.filter(|id| !id.is_zero())
    }
}

/// Outcome of a `$set` update matched by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateResult {
    pub matched_count: u64,
    /// Set when the store inserted a new document because nothing matched.
    pub upserted_id: Option<OrderId>,
}
