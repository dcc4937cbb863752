//! Discount Codes Repository

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use pricebook::{
    discounts::{CouponCode, DiscountValue, DiscountWindow, ProductScope},
    products::ProductId,
};
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use tracing::info;
use uuid::Uuid;

use crate::{
    database::{Db, StoreError, decode_error},
    domain::discount_codes::{
        data::{DiscountCodeDetails, DiscountCodeQuery},
        records::{DiscountCodeRecord, DiscountCodeUuid},
        store::DiscountCodeStore,
    },
};

const LIST_ACTIVE_DISCOUNT_CODES_SQL: &str = include_str!("sql/list_active_discount_codes.sql");
const LIST_DISCOUNT_CODES_SQL: &str = include_str!("sql/list_discount_codes.sql");
const COUNT_DISCOUNT_CODES_SQL: &str = include_str!("sql/count_discount_codes.sql");
const GET_DISCOUNT_CODE_SQL: &str = include_str!("sql/get_discount_code.sql");
const FIND_DISCOUNT_CODE_BY_CODE_SQL: &str = include_str!("sql/find_discount_code_by_code.sql");
const DISCOUNT_CODE_EXISTS_SQL: &str = include_str!("sql/discount_code_exists.sql");
const CREATE_DISCOUNT_CODE_SQL: &str = include_str!("sql/create_discount_code.sql");
const UPDATE_DISCOUNT_CODE_SQL: &str = include_str!("sql/update_discount_code.sql");
const CREATE_DISCOUNT_CODE_PRODUCTS_SQL: &str =
    include_str!("sql/create_discount_code_products.sql");
const DELETE_DISCOUNT_CODE_PRODUCTS_SQL: &str =
    include_str!("sql/delete_discount_code_products.sql");
const DELETE_DISCOUNT_CODE_SQL: &str = include_str!("sql/delete_discount_code.sql");

/// `ILIKE` pattern matching `search` as a literal substring.
fn search_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);

    pattern.push('%');

    for ch in search.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }

        pattern.push(ch);
    }

    pattern.push('%');

    pattern
}

/// `PostgreSQL` discount code store.
#[derive(Debug, Clone)]
pub struct PgDiscountCodeStore {
    db: Db,
}

impl PgDiscountCodeStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    async fn replace_products(
        tx: &mut Transaction<'_, Postgres>,
        uuid: DiscountCodeUuid,
        product_ids: &ProductScope,
    ) -> Result<(), sqlx::Error> {
        query(DELETE_DISCOUNT_CODE_PRODUCTS_SQL)
            .bind(uuid.into_uuid())
            .execute(&mut **tx)
            .await?;

        if product_ids.is_empty() {
            return Ok(());
        }

        let product_uuids: Vec<Uuid> = product_ids.iter().map(|id| id.into_uuid()).collect();

        query(CREATE_DISCOUNT_CODE_PRODUCTS_SQL)
            .bind(uuid.into_uuid())
            .bind(&product_uuids)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

fn record_from(
    uuid: DiscountCodeUuid,
    details: DiscountCodeDetails,
    (created_at, updated_at): (SqlxTimestamp, SqlxTimestamp),
) -> DiscountCodeRecord {
    DiscountCodeRecord {
        uuid,
        code: details.code,
        value: details.value,
        window: details.window,
        is_active: details.is_active,
        product_ids: details.product_ids,
        created_at: created_at.to_jiff(),
        updated_at: updated_at.to_jiff(),
    }
}

#[async_trait]
impl DiscountCodeStore for PgDiscountCodeStore {
    #[tracing::instrument(
        name = "discount_codes.repository.list_active",
        skip(self),
        fields(active_count = tracing::field::Empty),
        err
    )]
    async fn list_active(&self, now: Timestamp) -> Result<Vec<DiscountCodeRecord>, StoreError> {
        let records = query_as::<Postgres, DiscountCodeRecord>(LIST_ACTIVE_DISCOUNT_CODES_SQL)
            .bind(SqlxTimestamp::from(now))
            .fetch_all(self.db.pool())
            .await?;

        tracing::Span::current().record("active_count", records.len());

        Ok(records)
    }

    async fn list(
        &self,
        query: &DiscountCodeQuery,
    ) -> Result<(Vec<DiscountCodeRecord>, u64), StoreError> {
        let status = query.status.map(|status| status.is_active());
        let search = query.search.as_deref().map(search_pattern);
        let limit = i64::from(query.page.limit());
        let offset =
            i64::try_from(query.page.offset()).map_err(|_overflow| StoreError::InvalidData)?;

        let records = query_as::<Postgres, DiscountCodeRecord>(LIST_DISCOUNT_CODES_SQL)
            .bind(status)
            .bind(search.as_deref())
            .bind(limit)
            .bind(offset)
            .fetch_all(self.db.pool())
            .await?;

        let total: i64 = query_scalar(COUNT_DISCOUNT_CODES_SQL)
            .bind(status)
            .bind(search.as_deref())
            .fetch_one(self.db.pool())
            .await?;

        let total = u64::try_from(total).map_err(|_negative| StoreError::InvalidData)?;

        Ok((records, total))
    }

    async fn get(&self, uuid: DiscountCodeUuid) -> Result<Option<DiscountCodeRecord>, StoreError> {
        let record = query_as::<Postgres, DiscountCodeRecord>(GET_DISCOUNT_CODE_SQL)
            .bind(uuid.into_uuid())
            .fetch_optional(self.db.pool())
            .await?;

        Ok(record)
    }

    async fn find_by_code(
        &self,
        code: &CouponCode,
    ) -> Result<Option<DiscountCodeRecord>, StoreError> {
        let record = query_as::<Postgres, DiscountCodeRecord>(FIND_DISCOUNT_CODE_BY_CODE_SQL)
            .bind(code.as_str())
            .fetch_optional(self.db.pool())
            .await?;

        Ok(record)
    }

    async fn code_exists(
        &self,
        code: &CouponCode,
        excluding: Option<DiscountCodeUuid>,
    ) -> Result<bool, StoreError> {
        let exists = query_scalar(DISCOUNT_CODE_EXISTS_SQL)
            .bind(code.as_str())
            .bind(excluding.map(DiscountCodeUuid::into_uuid))
            .fetch_one(self.db.pool())
            .await?;

        Ok(exists)
    }

    #[tracing::instrument(
        name = "discount_codes.repository.create",
        skip(self, details),
        fields(discount_code_uuid = %uuid, product_count = details.product_ids.len()),
        err
    )]
    async fn create(
        &self,
        uuid: DiscountCodeUuid,
        details: DiscountCodeDetails,
    ) -> Result<DiscountCodeRecord, StoreError> {
        let mut tx = self.db.begin().await?;

        let timestamps: (SqlxTimestamp, SqlxTimestamp) = query_as(CREATE_DISCOUNT_CODE_SQL)
            .bind(uuid.into_uuid())
            .bind(details.code.as_str())
            .bind(details.value.percent())
            .bind(SqlxTimestamp::from(details.window.starts_at()))
            .bind(SqlxTimestamp::from(details.window.ends_at()))
            .bind(details.is_active)
            .fetch_one(&mut *tx)
            .await?;

        Self::replace_products(&mut tx, uuid, &details.product_ids).await?;

        tx.commit().await?;

        info!(discount_code_uuid = %uuid, "stored discount code");

        Ok(record_from(uuid, details, timestamps))
    }

    #[tracing::instrument(
        name = "discount_codes.repository.update",
        skip(self, details),
        fields(discount_code_uuid = %uuid, product_count = details.product_ids.len()),
        err
    )]
    async fn update(
        &self,
        uuid: DiscountCodeUuid,
        details: DiscountCodeDetails,
    ) -> Result<Option<DiscountCodeRecord>, StoreError> {
        let mut tx = self.db.begin().await?;

        let timestamps: Option<(SqlxTimestamp, SqlxTimestamp)> =
            query_as(UPDATE_DISCOUNT_CODE_SQL)
                .bind(uuid.into_uuid())
                .bind(details.code.as_str())
                .bind(details.value.percent())
                .bind(SqlxTimestamp::from(details.window.starts_at()))
                .bind(SqlxTimestamp::from(details.window.ends_at()))
                .bind(details.is_active)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(timestamps) = timestamps else {
            return Ok(None);
        };

        Self::replace_products(&mut tx, uuid, &details.product_ids).await?;

        tx.commit().await?;

        Ok(Some(record_from(uuid, details, timestamps)))
    }

    async fn delete(&self, uuid: DiscountCodeUuid) -> Result<bool, StoreError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = query(DELETE_DISCOUNT_CODE_SQL)
            .bind(uuid.into_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(rows_affected > 0)
    }
}

impl<'r> FromRow<'r, PgRow> for DiscountCodeRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let code: String = row.try_get("code")?;
        let value: Decimal = row.try_get("value")?;
        let product_uuids: Vec<Uuid> = row.try_get("product_uuids")?;

        let starts_at = row.try_get::<SqlxTimestamp, _>("starts_at")?.to_jiff();
        let ends_at = row.try_get::<SqlxTimestamp, _>("ends_at")?.to_jiff();

        Ok(Self {
            uuid: DiscountCodeUuid::from_uuid(row.try_get("uuid")?),
            code: CouponCode::parse(&code).map_err(|error| decode_error("code", error))?,
            value: DiscountValue::new(value).map_err(|error| decode_error("value", error))?,
            window: DiscountWindow::new(starts_at, ends_at)
                .map_err(|error| decode_error("ends_at", error))?,
            is_active: row.try_get("is_active")?,
            product_ids: product_uuids.into_iter().map(ProductId::from_uuid).collect(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan;
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::{
        domain::{discount_codes::data::CodeStatus, pagination::PageRequest},
        test::{db::TestDb, helpers::details},
    };

    use super::*;

    #[test]
    fn search_pattern_escapes_wildcards() {
        assert_eq!(search_pattern("sale"), "%sale%");
        assert_eq!(search_pattern("S_LE"), "%S\\_LE%");
        assert_eq!(search_pattern("10%"), "%10\\%%");
        assert_eq!(search_pattern("a\\b"), "%a\\\\b%");
    }

    async fn store() -> (TestDb, PgDiscountCodeStore) {
        let test_db = TestDb::new().await;
        let store = PgDiscountCodeStore::new(Db::new(test_db.pool.clone()));

        (test_db, store)
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn create_persists_code_and_scope() -> TestResult {
        let (_db, store) = store().await;
        let uuid = DiscountCodeUuid::new();
        let product = ProductId::generate();

        let created = store
            .create(uuid, details("SCOPED", 20, smallvec![product])?)
            .await?;

        let fetched = store.get(uuid).await?.ok_or("expected a record")?;

        assert_eq!(fetched.code, created.code);
        assert_eq!(fetched.value, created.value);
        assert_eq!(fetched.product_ids.as_slice(), &[product]);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn duplicate_code_is_already_exists() -> TestResult {
        let (_db, store) = store().await;

        store
            .create(DiscountCodeUuid::new(), details("TWICE1", 10, smallvec![])?)
            .await?;

        let result = store
            .create(DiscountCodeUuid::new(), details("TWICE1", 10, smallvec![])?)
            .await;

        assert!(
            matches!(result, Err(StoreError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn update_replaces_scope_and_delete_cascades() -> TestResult {
        let (_db, store) = store().await;
        let uuid = DiscountCodeUuid::new();
        let first = ProductId::generate();
        let second = ProductId::generate();

        store
            .create(uuid, details("CHANGE", 10, smallvec![first])?)
            .await?;

        store
            .update(uuid, details("CHANGE", 30, smallvec![second])?)
            .await?
            .ok_or("expected a record")?;

        let fetched = store.get(uuid).await?.ok_or("expected a record")?;

        assert_eq!(fetched.value, DiscountValue::try_from(30_u8)?);
        assert_eq!(fetched.product_ids.as_slice(), &[second]);

        assert!(store.delete(uuid).await?);
        assert_eq!(store.get(uuid).await?, None);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn list_active_and_filtered_listing() -> TestResult {
        let (_db, store) = store().await;
        let now = Timestamp::now();

        store
            .create(DiscountCodeUuid::new(), details("LIVE01", 10, smallvec![])?)
            .await?;

        let mut expired = details("GONE01", 10, smallvec![])?;
        expired.window = DiscountWindow::new(now - 120.hours(), now - 24.hours())?;
        store.create(DiscountCodeUuid::new(), expired).await?;

        let mut disabled = details("LIVE02", 10, smallvec![])?;
        disabled.is_active = false;
        store.create(DiscountCodeUuid::new(), disabled).await?;

        let active = store.list_active(now).await?;

        assert_eq!(active.len(), 1);
        assert_eq!(active[0].code.as_str(), "LIVE01");

        let (page, total) = store
            .list(&DiscountCodeQuery {
                status: Some(CodeStatus::Active),
                search: Some("live".to_owned()),
                page: PageRequest::default(),
            })
            .await?;

        assert_eq!(total, 1);
        assert_eq!(page[0].code.as_str(), "LIVE01");

        let (_, total) = store
            .list(&DiscountCodeQuery {
                status: None,
                search: Some("L_VE".to_owned()),
                page: PageRequest::default(),
            })
            .await?;

        assert_eq!(total, 0);

        Ok(())
    }
}
