//! Discount code persistence

use std::{cmp::Ordering, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use pricebook::discounts::CouponCode;
use tokio::sync::RwLock;

use crate::{
    database::StoreError,
    domain::discount_codes::{
        data::{DiscountCodeDetails, DiscountCodeQuery},
        records::{DiscountCodeRecord, DiscountCodeUuid},
    },
};

/// Storage for discount codes and their product scope.
///
/// `create` and `update` write the code and its scope as one unit: either both are stored or
/// neither is.
#[automock]
#[async_trait]
pub trait DiscountCodeStore: Send + Sync {
    /// Codes switched on whose window contains `now`.
    async fn list_active(&self, now: Timestamp) -> Result<Vec<DiscountCodeRecord>, StoreError>;

    /// One page of codes matching `query`, newest first, with the total number of matches.
    async fn list(
        &self,
        query: &DiscountCodeQuery,
    ) -> Result<(Vec<DiscountCodeRecord>, u64), StoreError>;

    async fn get(&self, uuid: DiscountCodeUuid) -> Result<Option<DiscountCodeRecord>, StoreError>;

    async fn find_by_code(
        &self,
        code: &CouponCode,
    ) -> Result<Option<DiscountCodeRecord>, StoreError>;

    /// Whether another record already uses `code`.
    async fn code_exists(
        &self,
        code: &CouponCode,
        excluding: Option<DiscountCodeUuid>,
    ) -> Result<bool, StoreError>;

    async fn create(
        &self,
        uuid: DiscountCodeUuid,
        details: DiscountCodeDetails,
    ) -> Result<DiscountCodeRecord, StoreError>;

    /// Replace every field of an existing record; `None` if it does not exist.
    async fn update(
        &self,
        uuid: DiscountCodeUuid,
        details: DiscountCodeDetails,
    ) -> Result<Option<DiscountCodeRecord>, StoreError>;

    /// Delete a record and its scope; `false` if it did not exist.
    async fn delete(&self, uuid: DiscountCodeUuid) -> Result<bool, StoreError>;
}

#[async_trait]
impl<S: DiscountCodeStore + ?Sized> DiscountCodeStore for Arc<S> {
    async fn list_active(&self, now: Timestamp) -> Result<Vec<DiscountCodeRecord>, StoreError> {
        (**self).list_active(now).await
    }

    async fn list(
        &self,
        query: &DiscountCodeQuery,
    ) -> Result<(Vec<DiscountCodeRecord>, u64), StoreError> {
        (**self).list(query).await
    }

    async fn get(&self, uuid: DiscountCodeUuid) -> Result<Option<DiscountCodeRecord>, StoreError> {
        (**self).get(uuid).await
    }

    async fn find_by_code(
        &self,
        code: &CouponCode,
    ) -> Result<Option<DiscountCodeRecord>, StoreError> {
        (**self).find_by_code(code).await
    }

    async fn code_exists(
        &self,
        code: &CouponCode,
        excluding: Option<DiscountCodeUuid>,
    ) -> Result<bool, StoreError> {
        (**self).code_exists(code, excluding).await
    }

    async fn create(
        &self,
        uuid: DiscountCodeUuid,
        details: DiscountCodeDetails,
    ) -> Result<DiscountCodeRecord, StoreError> {
        (**self).create(uuid, details).await
    }

    async fn update(
        &self,
        uuid: DiscountCodeUuid,
        details: DiscountCodeDetails,
    ) -> Result<Option<DiscountCodeRecord>, StoreError> {
        (**self).update(uuid, details).await
    }

    async fn delete(&self, uuid: DiscountCodeUuid) -> Result<bool, StoreError> {
        (**self).delete(uuid).await
    }
}

/// In-process discount code store.
#[derive(Debug, Default)]
pub struct MemoryDiscountCodeStore {
    records: RwLock<Vec<DiscountCodeRecord>>,
}

impl MemoryDiscountCodeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_query(record: &DiscountCodeRecord, query: &DiscountCodeQuery) -> bool {
    let status_matches = query
        .status
        .is_none_or(|status| status.is_active() == record.is_active);

    let search_matches = query.search.as_deref().is_none_or(|search| {
        record
            .code
            .as_str()
            .to_lowercase()
            .contains(&search.to_lowercase())
    });

    status_matches && search_matches
}

/// Same order as the SQL listings: `created_at DESC, uuid DESC`.
fn newest_first(a: &DiscountCodeRecord, b: &DiscountCodeRecord) -> Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.uuid.cmp(&a.uuid))
}

#[async_trait]
impl DiscountCodeStore for MemoryDiscountCodeStore {
    async fn list_active(&self, now: Timestamp) -> Result<Vec<DiscountCodeRecord>, StoreError> {
        let records = self.records.read().await;

        let mut active: Vec<DiscountCodeRecord> = records
            .iter()
            .filter(|record| record.is_active && record.window.contains(now))
            .cloned()
            .collect();

        active.sort_by(newest_first);

        Ok(active)
    }

    async fn list(
        &self,
        query: &DiscountCodeQuery,
    ) -> Result<(Vec<DiscountCodeRecord>, u64), StoreError> {
        let records = self.records.read().await;

        let mut matching: Vec<&DiscountCodeRecord> = records
            .iter()
            .filter(|record| matches_query(record, query))
            .collect();

        matching.sort_by(|a, b| newest_first(a, b));

        let total = u64::try_from(matching.len()).map_err(|_overflow| StoreError::InvalidData)?;
        let offset =
            usize::try_from(query.page.offset()).map_err(|_overflow| StoreError::InvalidData)?;
        let limit =
            usize::try_from(query.page.limit()).map_err(|_overflow| StoreError::InvalidData)?;

        let page = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn get(&self, uuid: DiscountCodeUuid) -> Result<Option<DiscountCodeRecord>, StoreError> {
        let records = self.records.read().await;

        Ok(records.iter().find(|record| record.uuid == uuid).cloned())
    }

    async fn find_by_code(
        &self,
        code: &CouponCode,
    ) -> Result<Option<DiscountCodeRecord>, StoreError> {
        let records = self.records.read().await;

        Ok(records.iter().find(|record| &record.code == code).cloned())
    }

    async fn code_exists(
        &self,
        code: &CouponCode,
        excluding: Option<DiscountCodeUuid>,
    ) -> Result<bool, StoreError> {
        let records = self.records.read().await;

        Ok(records
            .iter()
            .any(|record| &record.code == code && Some(record.uuid) != excluding))
    }

    async fn create(
        &self,
        uuid: DiscountCodeUuid,
        details: DiscountCodeDetails,
    ) -> Result<DiscountCodeRecord, StoreError> {
        let mut records = self.records.write().await;

        if records
            .iter()
            .any(|record| record.uuid == uuid || record.code == details.code)
        {
            return Err(StoreError::AlreadyExists);
        }

        let now = Timestamp::now();

        let record = DiscountCodeRecord {
            uuid,
            code: details.code,
            value: details.value,
            window: details.window,
            is_active: details.is_active,
            product_ids: details.product_ids,
            created_at: now,
            updated_at: now,
        };

        records.push(record.clone());

        Ok(record)
    }

    async fn update(
        &self,
        uuid: DiscountCodeUuid,
        details: DiscountCodeDetails,
    ) -> Result<Option<DiscountCodeRecord>, StoreError> {
        let mut records = self.records.write().await;

        if records
            .iter()
            .any(|record| record.code == details.code && record.uuid != uuid)
        {
            return Err(StoreError::AlreadyExists);
        }

        let Some(record) = records.iter_mut().find(|record| record.uuid == uuid) else {
            return Ok(None);
        };

        record.code = details.code;
        record.value = details.value;
        record.window = details.window;
        record.is_active = details.is_active;
        record.product_ids = details.product_ids;
        record.updated_at = Timestamp::now();

        Ok(Some(record.clone()))
    }

    async fn delete(&self, uuid: DiscountCodeUuid) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        let before = records.len();

        records.retain(|record| record.uuid != uuid);

        Ok(records.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan;
    use pricebook::{
        discounts::{DiscountValue, DiscountWindow, ProductScope},
        products::ProductId,
    };
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::{
        domain::{discount_codes::data::CodeStatus, pagination::PageRequest},
        test::helpers::details,
    };

    use super::*;

    fn query(
        status: Option<CodeStatus>,
        search: Option<&str>,
        page: PageRequest,
    ) -> DiscountCodeQuery {
        DiscountCodeQuery {
            status,
            search: search.map(str::to_owned),
            page,
        }
    }

    #[tokio::test]
    async fn create_then_get_and_find() -> TestResult {
        let store = MemoryDiscountCodeStore::new();
        let uuid = DiscountCodeUuid::new();

        let created = store.create(uuid, details("SPRING", 10, smallvec![])?).await?;

        assert_eq!(store.get(uuid).await?, Some(created.clone()));
        assert_eq!(
            store.find_by_code(&CouponCode::parse("SPRING")?).await?,
            Some(created)
        );

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_code_is_rejected() -> TestResult {
        let store = MemoryDiscountCodeStore::new();

        store
            .create(DiscountCodeUuid::new(), details("SPRING", 10, smallvec![])?)
            .await?;

        let result = store
            .create(DiscountCodeUuid::new(), details("SPRING", 20, smallvec![])?)
            .await;

        assert!(matches!(result, Err(StoreError::AlreadyExists)));

        Ok(())
    }

    #[tokio::test]
    async fn code_exists_can_exclude_a_record() -> TestResult {
        let store = MemoryDiscountCodeStore::new();
        let uuid = DiscountCodeUuid::new();
        let code = CouponCode::parse("SPRING")?;

        store.create(uuid, details("SPRING", 10, smallvec![])?).await?;

        assert!(store.code_exists(&code, None).await?);
        assert!(!store.code_exists(&code, Some(uuid)).await?);

        Ok(())
    }

    #[tokio::test]
    async fn list_active_skips_disabled_and_out_of_window() -> TestResult {
        let store = MemoryDiscountCodeStore::new();
        let now = Timestamp::now();

        store
            .create(DiscountCodeUuid::new(), details("ACTIVE", 10, smallvec![])?)
            .await?;

        let mut disabled = details("OFF001", 10, smallvec![])?;
        disabled.is_active = false;
        store.create(DiscountCodeUuid::new(), disabled).await?;

        let mut expired = details("OLD001", 10, smallvec![])?;
        expired.window = DiscountWindow::new(now - 240.hours(), now - 24.hours())?;
        store.create(DiscountCodeUuid::new(), expired).await?;

        let active = store.list_active(now).await?;

        assert_eq!(active.len(), 1);
        assert_eq!(active[0].code.as_str(), "ACTIVE");

        Ok(())
    }

    #[tokio::test]
    async fn list_active_is_newest_first() -> TestResult {
        let store = MemoryDiscountCodeStore::new();

        for label in ["FIRST1", "SECOND", "THIRD1"] {
            store
                .create(DiscountCodeUuid::new(), details(label, 10, smallvec![])?)
                .await?;
        }

        let active = store.list_active(Timestamp::now()).await?;
        let labels: Vec<_> = active.iter().map(|record| record.code.as_str()).collect();

        assert_eq!(labels, vec!["THIRD1", "SECOND", "FIRST1"]);

        Ok(())
    }

    #[tokio::test]
    async fn search_wildcards_match_literally() -> TestResult {
        let store = MemoryDiscountCodeStore::new();

        store
            .create(DiscountCodeUuid::new(), details("SALE01", 10, smallvec![])?)
            .await?;

        let (page, total) = store
            .list(&query(None, Some("S_LE"), PageRequest::default()))
            .await?;

        assert_eq!(total, 0);
        assert!(page.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn list_filters_searches_and_pages_newest_first() -> TestResult {
        let store = MemoryDiscountCodeStore::new();

        for label in ["SALE01", "SALE02", "XMAS01", "SALE03"] {
            store
                .create(DiscountCodeUuid::new(), details(label, 10, smallvec![])?)
                .await?;
        }

        let (page, total) = store
            .list(&query(None, Some("sale"), PageRequest::new(Some(1), Some(2))))
            .await?;

        let labels: Vec<_> = page.iter().map(|record| record.code.as_str()).collect();

        assert_eq!(total, 3);
        assert_eq!(labels, vec!["SALE03", "SALE02"]);

        let (page, _) = store
            .list(&query(None, Some("sale"), PageRequest::new(Some(2), Some(2))))
            .await?;

        assert_eq!(page.len(), 1);
        assert_eq!(page[0].code.as_str(), "SALE01");

        let (inactive, total) = store
            .list(&query(Some(CodeStatus::Inactive), None, PageRequest::default()))
            .await?;

        assert!(inactive.is_empty());
        assert_eq!(total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_fields_and_scope() -> TestResult {
        let store = MemoryDiscountCodeStore::new();
        let uuid = DiscountCodeUuid::new();
        let product = ProductId::generate();

        store.create(uuid, details("SPRING", 10, smallvec![])?).await?;

        let changed = details("SPRING", 25, smallvec![product])?;

        let updated = store.update(uuid, changed).await?.ok_or("expected a record")?;

        assert_eq!(updated.value, DiscountValue::try_from(25_u8)?);
        assert_eq!(updated.product_ids, ProductScope::from_slice(&[product]));

        let missing = store
            .update(DiscountCodeUuid::new(), details("OTHER1", 5, smallvec![])?)
            .await?;

        assert!(missing.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() -> TestResult {
        let store = MemoryDiscountCodeStore::new();
        let uuid = DiscountCodeUuid::new();

        store.create(uuid, details("SPRING", 10, smallvec![])?).await?;

        assert!(store.delete(uuid).await?);
        assert!(!store.delete(uuid).await?);
        assert_eq!(store.get(uuid).await?, None);

        Ok(())
    }
}
