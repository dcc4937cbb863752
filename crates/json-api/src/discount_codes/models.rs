//! Discount Code Models

use std::string::ToString;

use jiff::Timestamp;
use pricebook::products::ProductId;
use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pricebook_app::domain::{
    discount_codes::{
        data::{DiscountCodeUpdate, NewDiscountCode},
        records::DiscountCodeRecord,
    },
    pagination::{Page, Pagination},
};

/// Discount Code Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DiscountCodeResponse {
    /// The unique identifier of the code
    pub uuid: Uuid,

    /// The code shoppers type in
    pub code: String,

    /// Percentage taken off, as a decimal string
    #[salvo(schema(value_type = String))]
    pub value: Decimal,

    /// First instant the code may be used
    pub starts_at: String,

    /// Last instant the code may be used
    pub ends_at: String,

    /// Manual on/off switch
    pub is_active: bool,

    /// Products the code is restricted to; empty means every product
    pub product_uuids: Vec<Uuid>,

    /// The date and time the code was created
    pub created_at: String,

    /// The date and time the code was last updated
    pub updated_at: String,
}

impl From<DiscountCodeRecord> for DiscountCodeResponse {
    fn from(record: DiscountCodeRecord) -> Self {
        DiscountCodeResponse {
            uuid: record.uuid.into(),
            code: record.code.to_string(),
            value: record.value.percent(),
            starts_at: record.window.starts_at().to_string(),
            ends_at: record.window.ends_at().to_string(),
            is_active: record.is_active,
            product_uuids: record
                .product_ids
                .iter()
                .map(|product| product.into_uuid())
                .collect(),
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

/// Page position
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaginationResponse {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl From<Pagination> for PaginationResponse {
    fn from(pagination: Pagination) -> Self {
        PaginationResponse {
            page: pagination.page,
            limit: pagination.limit,
            total: pagination.total,
            total_pages: pagination.total_pages,
        }
    }
}

/// Discount Codes Page Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DiscountCodesResponse {
    pub data: Vec<DiscountCodeResponse>,
    pub pagination: PaginationResponse,
}

impl From<Page<DiscountCodeRecord>> for DiscountCodesResponse {
    fn from(page: Page<DiscountCodeRecord>) -> Self {
        let page = page.map(DiscountCodeResponse::from);

        DiscountCodesResponse {
            data: page.data,
            pagination: page.pagination.into(),
        }
    }
}

fn active_by_default() -> bool {
    true
}

/// Create Discount Code Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateDiscountCodeRequest {
    /// Uppercase letters and digits
    pub code: String,

    /// Percentage greater than 0 and at most 100
    #[salvo(schema(value_type = String))]
    pub value: Decimal,

    #[salvo(schema(value_type = String))]
    pub starts_at: Timestamp,

    #[salvo(schema(value_type = String))]
    pub ends_at: Timestamp,

    #[serde(default = "active_by_default")]
    pub is_active: bool,

    #[serde(default)]
    pub product_uuids: Vec<Uuid>,
}

impl From<CreateDiscountCodeRequest> for NewDiscountCode {
    fn from(request: CreateDiscountCodeRequest) -> Self {
        NewDiscountCode {
            code: request.code,
            value: request.value,
            starts_at: request.starts_at,
            ends_at: request.ends_at,
            is_active: request.is_active,
            product_ids: request.product_uuids.into_iter().map(ProductId::from).collect(),
        }
    }
}

/// Update Discount Code Request; omitted fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateDiscountCodeRequest {
    pub code: Option<String>,

    #[salvo(schema(value_type = Option<String>))]
    pub value: Option<Decimal>,

    #[salvo(schema(value_type = Option<String>))]
    pub starts_at: Option<Timestamp>,

    #[salvo(schema(value_type = Option<String>))]
    pub ends_at: Option<Timestamp>,

    pub is_active: Option<bool>,

    pub product_uuids: Option<Vec<Uuid>>,
}

impl From<UpdateDiscountCodeRequest> for DiscountCodeUpdate {
    fn from(request: UpdateDiscountCodeRequest) -> Self {
        DiscountCodeUpdate {
            code: request.code,
            value: request.value,
            starts_at: request.starts_at,
            ends_at: request.ends_at,
            is_active: request.is_active,
            product_ids: request
                .product_uuids
                .map(|uuids| uuids.into_iter().map(ProductId::from).collect()),
        }
    }
}

/// Check Discount Code Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckDiscountCodeRequest {
    /// Code as typed by the shopper
    pub code: String,

    /// Product the shopper wants to use the code on
    #[serde(default)]
    pub product_uuid: Option<Uuid>,
}

/// Usable codes at a point in time
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ActiveDiscountCodesResponse {
    pub discount_codes: Vec<DiscountCodeResponse>,
}
