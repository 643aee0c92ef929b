#[cfg(test)]
mod contract;
pub mod filter;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod store;

pub use filter::Filter;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use repository::{Repository, Timeouts};
pub use store::{DatabaseError, Document, DocumentStore};
