pub mod memory;
pub mod models;
pub mod order_repo;

pub use memory::InMemoryOrderCollection;
pub use order_repo::MongoOrderCollection;
