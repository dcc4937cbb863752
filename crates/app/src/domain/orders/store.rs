//! Order persistence

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tokio::sync::RwLock;

use crate::{
    database::StoreError,
    domain::orders::{
        data::NewOrder,
        payment_code::PaymentCode,
        records::{OrderRecord, OrderUuid},
        status::{OrderStatus, PaymentStatus},
    },
};

/// Storage for orders and their lines.
///
/// `insert` writes the order and every line as one unit.
#[automock]
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Store a new order. Fails with [`StoreError::AlreadyExists`] if its payment code is taken.
    async fn insert(&self, order: NewOrder) -> Result<OrderRecord, StoreError>;

    async fn payment_code_exists(&self, code: &PaymentCode) -> Result<bool, StoreError>;

    async fn get(&self, uuid: OrderUuid) -> Result<Option<OrderRecord>, StoreError>;

    async fn find_by_payment_code(
        &self,
        code: &PaymentCode,
    ) -> Result<Option<OrderRecord>, StoreError>;

    /// Overwrite both statuses; `None` if the order does not exist.
    async fn update_status(
        &self,
        uuid: OrderUuid,
        status: OrderStatus,
        payment_status: PaymentStatus,
    ) -> Result<Option<OrderRecord>, StoreError>;
}

/// In-process order store.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: RwLock<Vec<OrderRecord>>,
}

impl MemoryOrderStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn insert(&self, order: NewOrder) -> Result<OrderRecord, StoreError> {
        let mut orders = self.orders.write().await;

        if orders
            .iter()
            .any(|record| record.uuid == order.uuid || record.payment_code == order.payment_code)
        {
            return Err(StoreError::AlreadyExists);
        }

        let now = Timestamp::now();

        let record = OrderRecord {
            uuid: order.uuid,
            payment_code: order.payment_code,
            customer: order.customer,
            cod: order.cod,
            status: order.status,
            payment_status: order.payment_status,
            pricing: order.pricing,
            items: order.items,
            created_at: now,
            updated_at: now,
        };

        orders.push(record.clone());

        Ok(record)
    }

    async fn payment_code_exists(&self, code: &PaymentCode) -> Result<bool, StoreError> {
        let orders = self.orders.read().await;

        Ok(orders.iter().any(|record| &record.payment_code == code))
    }

    async fn get(&self, uuid: OrderUuid) -> Result<Option<OrderRecord>, StoreError> {
        let orders = self.orders.read().await;

        Ok(orders.iter().find(|record| record.uuid == uuid).cloned())
    }

    async fn find_by_payment_code(
        &self,
        code: &PaymentCode,
    ) -> Result<Option<OrderRecord>, StoreError> {
        let orders = self.orders.read().await;

        Ok(orders
            .iter()
            .find(|record| &record.payment_code == code)
            .cloned())
    }

    async fn update_status(
        &self,
        uuid: OrderUuid,
        status: OrderStatus,
        payment_status: PaymentStatus,
    ) -> Result<Option<OrderRecord>, StoreError> {
        let mut orders = self.orders.write().await;

        let Some(record) = orders.iter_mut().find(|record| record.uuid == uuid) else {
            return Ok(None);
        };

        record.status = status;
        record.payment_status = payment_status;
        record.updated_at = Timestamp::now();

        Ok(Some(record.clone()))
    }
}
