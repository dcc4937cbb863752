//! Discount Codes

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;
pub mod store;

pub use errors::DiscountCodesServiceError;
pub use repository::PgDiscountCodeStore;
pub use service::*;
pub use store::{DiscountCodeStore, MemoryDiscountCodeStore, MockDiscountCodeStore};
