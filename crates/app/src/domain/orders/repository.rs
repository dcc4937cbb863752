//! Orders Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use pricebook::{
    discounts::{CouponCode, DiscountValue},
    products::ProductId,
};
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as, query_scalar};
use tracing::info;
use uuid::Uuid;

use crate::{
    database::{Db, StoreError, decode_error},
    domain::{
        discount_codes::records::DiscountCodeUuid,
        orders::{
            data::{CustomerDetails, NewOrder, OrderQuote, QuotedDiscount},
            payment_code::PaymentCode,
            records::{OrderItemRecord, OrderRecord, OrderUuid},
            status::{OrderStatus, PaymentStatus},
            store::OrderStore,
        },
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEMS_SQL: &str = include_str!("sql/create_order_items.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const FIND_ORDER_BY_PAYMENT_CODE_SQL: &str = include_str!("sql/find_order_by_payment_code.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");
const PAYMENT_CODE_EXISTS_SQL: &str = include_str!("sql/payment_code_exists.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");

/// `PostgreSQL` order store.
#[derive(Debug, Clone)]
pub struct PgOrderStore {
    db: Db,
}

impl PgOrderStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Attach the order's lines, which live in their own table.
    async fn with_items(
        &self,
        record: Option<OrderRecord>,
    ) -> Result<Option<OrderRecord>, StoreError> {
        let Some(mut record) = record else {
            return Ok(None);
        };

        record.items = query_as::<Postgres, OrderItemRecord>(LIST_ORDER_ITEMS_SQL)
            .bind(record.uuid.into_uuid())
            .fetch_all(self.db.pool())
            .await?;

        record.pricing.item_count = record
            .items
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum();

        Ok(Some(record))
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    #[tracing::instrument(
        name = "orders.repository.insert",
        skip(self, order),
        fields(order_uuid = %order.uuid, item_count = order.items.len()),
        err
    )]
    async fn insert(&self, order: NewOrder) -> Result<OrderRecord, StoreError> {
        let mut tx = self.db.begin().await?;

        let discount = order.pricing.discount.as_ref();

        let (created_at, updated_at): (SqlxTimestamp, SqlxTimestamp) = query_as(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.payment_code.as_str())
            .bind(&order.customer.name)
            .bind(&order.customer.phone)
            .bind(order.customer.email.as_deref())
            .bind(&order.customer.address)
            .bind(order.customer.note.as_deref())
            .bind(order.cod)
            .bind(order.status.as_str())
            .bind(order.payment_status.as_str())
            .bind(order.pricing.subtotal)
            .bind(order.pricing.shipping_fee)
            .bind(order.pricing.original_total)
            .bind(order.pricing.discount_amount)
            .bind(order.pricing.total)
            .bind(discount.map(|discount| discount.uuid.into_uuid()))
            .bind(discount.map(|discount| discount.code.as_str()))
            .bind(discount.map(|discount| discount.value.percent()))
            .fetch_one(&mut *tx)
            .await?;

        let positions = (1..).take(order.items.len()).collect::<Vec<i32>>();
        let product_uuids: Vec<Uuid> = order
            .items
            .iter()
            .map(|item| item.product_uuid.into_uuid())
            .collect();
        let names: Vec<&str> = order.items.iter().map(|item| item.name.as_str()).collect();
        let unit_prices: Vec<i64> = order.items.iter().map(|item| item.unit_price).collect();
        let quantities: Vec<i64> = order
            .items
            .iter()
            .map(|item| i64::from(item.quantity))
            .collect();

        sqlx::query(CREATE_ORDER_ITEMS_SQL)
            .bind(order.uuid.into_uuid())
            .bind(&positions)
            .bind(&product_uuids)
            .bind(&names)
            .bind(&unit_prices)
            .bind(&quantities)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(order_uuid = %order.uuid, payment_code = %order.payment_code, "stored order");

        Ok(OrderRecord {
            uuid: order.uuid,
            payment_code: order.payment_code,
            customer: order.customer,
            cod: order.cod,
            status: order.status,
            payment_status: order.payment_status,
            pricing: order.pricing,
            items: order.items,
            created_at: created_at.to_jiff(),
            updated_at: updated_at.to_jiff(),
        })
    }

    async fn payment_code_exists(&self, code: &PaymentCode) -> Result<bool, StoreError> {
        let exists = query_scalar(PAYMENT_CODE_EXISTS_SQL)
            .bind(code.as_str())
            .fetch_one(self.db.pool())
            .await?;

        Ok(exists)
    }

    async fn get(&self, uuid: OrderUuid) -> Result<Option<OrderRecord>, StoreError> {
        let record = query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(uuid.into_uuid())
            .fetch_optional(self.db.pool())
            .await?;

        self.with_items(record).await
    }

    async fn find_by_payment_code(
        &self,
        code: &PaymentCode,
    ) -> Result<Option<OrderRecord>, StoreError> {
        let record = query_as::<Postgres, OrderRecord>(FIND_ORDER_BY_PAYMENT_CODE_SQL)
            .bind(code.as_str())
            .fetch_optional(self.db.pool())
            .await?;

        self.with_items(record).await
    }

    #[tracing::instrument(
        name = "orders.repository.update_status",
        skip(self),
        fields(order_uuid = %uuid, status = %status, payment_status = %payment_status),
        err
    )]
    async fn update_status(
        &self,
        uuid: OrderUuid,
        status: OrderStatus,
        payment_status: PaymentStatus,
    ) -> Result<Option<OrderRecord>, StoreError> {
        let updated: Option<Uuid> = query_scalar(UPDATE_ORDER_STATUS_SQL)
            .bind(uuid.into_uuid())
            .bind(status.as_str())
            .bind(payment_status.as_str())
            .fetch_optional(self.db.pool())
            .await?;

        if updated.is_none() {
            return Ok(None);
        }

        self.get(uuid).await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity: i64 = row.try_get("quantity")?;

        Ok(Self {
            product_uuid: ProductId::from_uuid(row.try_get("product_uuid")?),
            name: row.try_get("name")?,
            unit_price: row.try_get("unit_price")?,
            quantity: u32::try_from(quantity).map_err(|error| decode_error("quantity", error))?,
        })
    }
}

/// Lines are loaded separately; see [`PgOrderStore::with_items`].
impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let payment_code: String = row.try_get("payment_code")?;
        let status: String = row.try_get("status")?;
        let payment_status: String = row.try_get("payment_status")?;

        let discount_uuid: Option<Uuid> = row.try_get("discount_code_uuid")?;
        let discount_code: Option<String> = row.try_get("discount_code")?;
        let discount_value: Option<Decimal> = row.try_get("discount_value")?;
        let discount_amount: i64 = row.try_get("discount_amount")?;

        let discount = match (discount_uuid, discount_code, discount_value) {
            (Some(uuid), Some(code), Some(value)) => Some(QuotedDiscount {
                uuid: DiscountCodeUuid::from_uuid(uuid),
                code: CouponCode::parse(&code)
                    .map_err(|error| decode_error("discount_code", error))?,
                value: DiscountValue::new(value)
                    .map_err(|error| decode_error("discount_value", error))?,
                amount: discount_amount,
            }),
            _ => None,
        };

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            payment_code: PaymentCode::parse(&payment_code)
                .map_err(|error| decode_error("payment_code", error))?,
            customer: CustomerDetails {
                name: row.try_get("customer_name")?,
                phone: row.try_get("customer_phone")?,
                email: row.try_get("customer_email")?,
                address: row.try_get("customer_address")?,
                note: row.try_get("customer_note")?,
            },
            cod: row.try_get("cod")?,
            status: status
                .parse()
                .map_err(|error| decode_error("status", error))?,
            payment_status: payment_status
                .parse()
                .map_err(|error| decode_error("payment_status", error))?,
            pricing: OrderQuote {
                subtotal: row.try_get("subtotal")?,
                shipping_fee: row.try_get("shipping_fee")?,
                original_total: row.try_get("original_total")?,
                discount_amount,
                total: row.try_get("total")?,
                item_count: 0,
                discount,
            },
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
