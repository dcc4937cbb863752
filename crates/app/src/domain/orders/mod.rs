//! Orders

pub mod data;
pub mod errors;
pub mod payment_code;
pub mod records;
mod repository;
pub mod service;
pub mod status;
pub mod store;

pub use errors::CheckoutServiceError;
pub use repository::PgOrderStore;
pub use service::*;
pub use store::{MemoryOrderStore, MockOrderStore, OrderStore};
