//! App Context

use std::sync::Arc;

use pricebook::pricing::ShippingPolicy;
use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        discount_codes::{
            DiscountCodesManager, DiscountCodesService, MemoryDiscountCodeStore,
            PgDiscountCodeStore, store::DiscountCodeStore,
        },
        orders::{
            CheckoutService, MemoryOrderStore, PgOrderStore, service::Checkout, store::OrderStore,
        },
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrate(#[source] MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub discount_codes: Arc<dyn DiscountCodesService>,
    pub checkout: Arc<dyn CheckoutService>,
}

impl AppContext {
    /// Build application context from a database URL, applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting or migrating fails.
    pub async fn from_database_url(
        url: &str,
        shipping: ShippingPolicy,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        let db = Db::new(pool);

        Ok(Self::from_stores(
            PgDiscountCodeStore::new(db.clone()),
            PgOrderStore::new(db),
            shipping,
        ))
    }

    /// Context backed by process memory; nothing survives a restart.
    #[must_use]
    pub fn in_memory(shipping: ShippingPolicy) -> Self {
        Self::from_stores(MemoryDiscountCodeStore::new(), MemoryOrderStore::new(), shipping)
    }

    fn from_stores<D, O>(discount_codes: D, orders: O, shipping: ShippingPolicy) -> Self
    where
        D: DiscountCodeStore + 'static,
        O: OrderStore + 'static,
    {
        let discount_codes = Arc::new(discount_codes);

        Self {
            discount_codes: Arc::new(DiscountCodesManager::new(Arc::clone(&discount_codes))),
            checkout: Arc::new(Checkout::new(discount_codes, orders, shipping)),
        }
    }
}
