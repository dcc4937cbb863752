//! Discount Codes Service

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use pricebook::{
    discounts::{CouponCode, check_code},
    products::ProductId,
};
use tracing::{Span, info};

use crate::domain::{
    discount_codes::{
        DiscountCodesServiceError,
        data::{DiscountCodeFilter, DiscountCodeQuery, DiscountCodeUpdate, NewDiscountCode},
        records::{DiscountCodeRecord, DiscountCodeUuid},
        store::DiscountCodeStore,
    },
    pagination::Page,
};

/// Discount code administration and lookup over a [`DiscountCodeStore`].
#[derive(Debug, Clone)]
pub struct DiscountCodesManager<S> {
    store: S,
}

impl<S: DiscountCodeStore> DiscountCodesManager<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: DiscountCodeStore> DiscountCodesService for DiscountCodesManager<S> {
    async fn list_active(
        &self,
        now: Timestamp,
    ) -> Result<Vec<DiscountCodeRecord>, DiscountCodesServiceError> {
        Ok(self.store.list_active(now).await?)
    }

    #[tracing::instrument(
        name = "discount_codes.service.list",
        skip(self, filter),
        fields(total = tracing::field::Empty),
        err
    )]
    async fn list(
        &self,
        filter: DiscountCodeFilter,
    ) -> Result<Page<DiscountCodeRecord>, DiscountCodesServiceError> {
        let query = DiscountCodeQuery::from(filter);

        let (records, total) = self.store.list(&query).await?;

        Span::current().record("total", total);

        Ok(Page::new(records, query.page, total))
    }

    async fn get(
        &self,
        uuid: DiscountCodeUuid,
    ) -> Result<DiscountCodeRecord, DiscountCodesServiceError> {
        self.store
            .get(uuid)
            .await?
            .ok_or(DiscountCodesServiceError::NotFound)
    }

    #[tracing::instrument(
        name = "discount_codes.service.create",
        skip(self, code),
        fields(discount_code_uuid = tracing::field::Empty),
        err
    )]
    async fn create(
        &self,
        code: NewDiscountCode,
    ) -> Result<DiscountCodeRecord, DiscountCodesServiceError> {
        let details = code.validate()?;

        if self.store.code_exists(&details.code, None).await? {
            return Err(DiscountCodesServiceError::DuplicateCode);
        }

        let uuid = DiscountCodeUuid::new();

        Span::current().record("discount_code_uuid", tracing::field::display(uuid));

        let record = self.store.create(uuid, details).await?;

        info!(discount_code_uuid = %record.uuid, code = %record.code, "created discount code");

        Ok(record)
    }

    #[tracing::instrument(
        name = "discount_codes.service.update",
        skip(self, update),
        fields(discount_code_uuid = %uuid),
        err
    )]
    async fn update(
        &self,
        uuid: DiscountCodeUuid,
        update: DiscountCodeUpdate,
    ) -> Result<DiscountCodeRecord, DiscountCodesServiceError> {
        let current = self
            .store
            .get(uuid)
            .await?
            .ok_or(DiscountCodesServiceError::NotFound)?;

        let details = update.merge(&current).validate()?;

        if details.code != current.code && self.store.code_exists(&details.code, Some(uuid)).await?
        {
            return Err(DiscountCodesServiceError::DuplicateCode);
        }

        let record = self
            .store
            .update(uuid, details)
            .await?
            .ok_or(DiscountCodesServiceError::NotFound)?;

        info!(discount_code_uuid = %uuid, "updated discount code");

        Ok(record)
    }

    #[tracing::instrument(
        name = "discount_codes.service.delete",
        skip(self),
        fields(discount_code_uuid = %uuid),
        err
    )]
    async fn delete(&self, uuid: DiscountCodeUuid) -> Result<(), DiscountCodesServiceError> {
        if !self.store.delete(uuid).await? {
            return Err(DiscountCodesServiceError::NotFound);
        }

        info!(discount_code_uuid = %uuid, "deleted discount code");

        Ok(())
    }

    async fn check_code(
        &self,
        code: String,
        product: Option<ProductId>,
        now: Timestamp,
    ) -> Result<DiscountCodeRecord, DiscountCodesServiceError> {
        let Ok(code) = CouponCode::parse(&code) else {
            return Err(DiscountCodesServiceError::NotFound);
        };

        let record = self.store.find_by_code(&code).await?;

        let discount_code = record.as_ref().map(DiscountCodeRecord::to_discount_code);

        check_code(discount_code.as_ref(), product, now)?;

        record.ok_or(DiscountCodesServiceError::NotFound)
    }
}

#[automock]
#[async_trait]
pub trait DiscountCodesService: Send + Sync {
    /// Codes that shoppers can use at `now`.
    async fn list_active(
        &self,
        now: Timestamp,
    ) -> Result<Vec<DiscountCodeRecord>, DiscountCodesServiceError>;

    /// One page of codes for administration, newest first.
    async fn list(
        &self,
        filter: DiscountCodeFilter,
    ) -> Result<Page<DiscountCodeRecord>, DiscountCodesServiceError>;

    /// Retrieve a single code.
    async fn get(
        &self,
        uuid: DiscountCodeUuid,
    ) -> Result<DiscountCodeRecord, DiscountCodesServiceError>;

    /// Validate and create a new code.
    async fn create(
        &self,
        code: NewDiscountCode,
    ) -> Result<DiscountCodeRecord, DiscountCodesServiceError>;

    /// Apply a partial update, re-validating the merged code.
    async fn update(
        &self,
        uuid: DiscountCodeUuid,
        update: DiscountCodeUpdate,
    ) -> Result<DiscountCodeRecord, DiscountCodesServiceError>;

    /// Delete a code with its product scope.
    async fn delete(&self, uuid: DiscountCodeUuid) -> Result<(), DiscountCodesServiceError>;

    /// Look up a shopper-entered code and check it can be used, optionally for one product.
    async fn check_code(
        &self,
        code: String,
        product: Option<ProductId>,
        now: Timestamp,
    ) -> Result<DiscountCodeRecord, DiscountCodesServiceError>;
}
