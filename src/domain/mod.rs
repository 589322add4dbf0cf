pub mod errors;
pub mod order;
pub mod ports;

pub use errors::DomainError;
pub use order::{Order, OrderId, Product, UpdateResult};
pub use ports::{DatabasePing, OrderCollection, OrdersDataService};
