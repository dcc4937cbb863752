//! Order Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pricebook_app::domain::orders::{
    data::{CheckoutRequest, CustomerDetails},
    records::{OrderItemRecord, OrderRecord},
};

use crate::pricing::models::{CartItemRequest, QuoteResponse, display_vnd};

/// Who the order ships to
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerPayload {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub address: String,
    #[serde(default)]
    pub note: Option<String>,
}

impl From<CustomerPayload> for CustomerDetails {
    fn from(payload: CustomerPayload) -> Self {
        CustomerDetails {
            name: payload.name,
            phone: payload.phone,
            email: payload.email,
            address: payload.address,
            note: payload.note,
        }
    }
}

impl From<CustomerDetails> for CustomerPayload {
    fn from(details: CustomerDetails) -> Self {
        CustomerPayload {
            name: details.name,
            phone: details.phone,
            email: details.email,
            address: details.address,
            note: details.note,
        }
    }
}

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    pub customer: CustomerPayload,
    pub items: Vec<CartItemRequest>,

    /// Pay on delivery
    #[serde(default)]
    pub cod: bool,
}

impl From<CreateOrderRequest> for CheckoutRequest {
    fn from(request: CreateOrderRequest) -> Self {
        CheckoutRequest {
            customer: request.customer.into(),
            items: request.items.into_iter().map(Into::into).collect(),
            cod: request.cod,
        }
    }
}

/// Order line priced at order time
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub product_uuid: Uuid,
    pub name: String,
    pub unit_price: i64,
    pub quantity: u32,
    pub display_unit_price: String,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        OrderItemResponse {
            product_uuid: item.product_uuid.into_uuid(),
            display_unit_price: display_vnd(item.unit_price),
            name: item.name,
            unit_price: item.unit_price,
            quantity: item.quantity,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// Code the shopper quotes when paying and tracking
    pub payment_code: String,

    pub customer: CustomerPayload,
    pub cod: bool,
    pub status: String,
    pub payment_status: String,
    pub pricing: QuoteResponse,
    pub items: Vec<OrderItemResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            payment_code: order.payment_code.to_string(),
            customer: order.customer.into(),
            cod: order.cod,
            status: order.status.to_string(),
            payment_status: order.payment_status.to_string(),
            pricing: order.pricing.into(),
            items: order.items.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Status Update Request; omitted fields are left unchanged
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// One of `pending_confirmation`, `pending_pickup`, `shipping`, `delivered`, `cancelled`
    pub status: Option<String>,

    /// One of `pending`, `paid`, `failed`, `cod`
    pub payment_status: Option<String>,
}

#[cfg(test)]
mod tests {
    use pricebook_app::domain::orders::records::OrderUuid;
    use testresult::TestResult;

    use crate::test_helpers::make_order;

    use super::*;

    #[test]
    fn order_response_uses_wire_status_names() -> TestResult {
        let response = OrderResponse::from(make_order(OrderUuid::new(), "DHABC123")?);

        assert_eq!(response.payment_code, "DHABC123", "payment code");
        assert_eq!(response.status, "pending_confirmation", "status");
        assert_eq!(response.payment_status, "cod", "payment status");
        assert_eq!(response.items.first().map(|item| item.unit_price), Some(200_000), "line");

        Ok(())
    }
}
