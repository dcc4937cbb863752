//! Checkout Service

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use pricebook::{
    cart::Cart,
    discounts::DiscountCode,
    items::CartItem,
    pricing::ShippingPolicy,
    products::Product,
    receipt::Receipt,
};
use rusty_money::{Money, iso::VND};
use tracing::{Span, info, warn};

use crate::{
    database::StoreError,
    domain::{
        discount_codes::{records::DiscountCodeRecord, store::DiscountCodeStore},
        orders::{
            CheckoutServiceError,
            data::{CheckoutItem, CheckoutRequest, NewOrder, OrderQuote, OrderStatusUpdate},
            payment_code::PaymentCode,
            records::{OrderItemRecord, OrderRecord, OrderUuid},
            status::{OrderStatus, PaymentStatus},
            store::OrderStore,
        },
        validation::FieldErrors,
    },
};

/// Attempts at drawing an unused payment code before giving up.
pub const MAX_PAYMENT_CODE_ATTEMPTS: usize = 5;

/// Prices carts against the live discount codes and records orders.
#[derive(Debug, Clone)]
pub struct Checkout<D, O> {
    discount_codes: D,
    orders: O,
    shipping: ShippingPolicy,
}

impl<D: DiscountCodeStore, O: OrderStore> Checkout<D, O> {
    #[must_use]
    pub fn new(discount_codes: D, orders: O, shipping: ShippingPolicy) -> Self {
        Self {
            discount_codes,
            orders,
            shipping,
        }
    }

    /// Price `items` with the codes usable at `now`.
    async fn price(
        &self,
        items: &[CheckoutItem],
        now: Timestamp,
    ) -> Result<OrderQuote, CheckoutServiceError> {
        let cart = cart(items)?;

        let codes: Vec<DiscountCode> = self
            .discount_codes
            .list_active(now)
            .await?
            .iter()
            .map(DiscountCodeRecord::to_discount_code)
            .collect();

        let receipt = Receipt::quote(&cart, &codes, now, &self.shipping)?;

        Ok(OrderQuote::from(&receipt))
    }

    /// Insert the order under a fresh payment code, drawing again when a code is taken.
    async fn insert_with_payment_code(
        &self,
        uuid: OrderUuid,
        order: impl Fn(PaymentCode) -> NewOrder + Send + Sync,
    ) -> Result<OrderRecord, CheckoutServiceError> {
        for _ in 0..MAX_PAYMENT_CODE_ATTEMPTS {
            let payment_code = PaymentCode::generate();

            if self.orders.payment_code_exists(&payment_code).await? {
                continue;
            }

            match self.orders.insert(order(payment_code)).await {
                Ok(record) => return Ok(record),
                // Another order took the code between the check and the insert.
                Err(StoreError::AlreadyExists) => {
                    warn!(order_uuid = %uuid, "payment code taken concurrently, retrying");
                }
                Err(error) => return Err(error.into()),
            }
        }

        Err(CheckoutServiceError::PaymentCodeExhausted)
    }
}

/// Reject lines the cart reducer would otherwise drop or misprice.
fn validate_items(items: &[CheckoutItem]) -> Result<(), CheckoutServiceError> {
    if let Some(item) = items.iter().find(|item| item.quantity == 0) {
        return Err(CheckoutServiceError::InvalidQuantity(item.product_uuid));
    }

    let mut errors = FieldErrors::new();

    if items.iter().any(|item| item.price < 0) {
        errors.push("items.price", "must not be negative");
    }

    if items.iter().any(|item| item.name.trim().is_empty()) {
        errors.push("items.name", "must not be blank");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.into())
    }
}

fn cart(items: &[CheckoutItem]) -> Result<Cart<'static>, CheckoutServiceError> {
    validate_items(items)?;

    let lines: Vec<CartItem<'static>> = items
        .iter()
        .map(|item| {
            let product = Product::new(
                item.product_uuid,
                item.name.clone(),
                Money::from_minor(item.price, VND),
            );

            CartItem::new(product, item.quantity)
        })
        .collect();

    Ok(Cart::with_items(lines, VND)?)
}

fn order_items(cart: &Cart<'_>) -> Vec<OrderItemRecord> {
    cart.iter()
        .map(|item| OrderItemRecord {
            product_uuid: item.product_id(),
            name: item.product.name.clone(),
            unit_price: item.price().to_minor_units(),
            quantity: item.quantity,
        })
        .collect()
}

#[async_trait]
impl<D: DiscountCodeStore, O: OrderStore> CheckoutService for Checkout<D, O> {
    #[tracing::instrument(
        name = "checkout.service.quote",
        skip(self, items),
        fields(line_count = items.len(), total = tracing::field::Empty),
        err
    )]
    async fn quote(
        &self,
        items: Vec<CheckoutItem>,
        now: Timestamp,
    ) -> Result<OrderQuote, CheckoutServiceError> {
        let quote = self.price(&items, now).await?;

        Span::current().record("total", quote.total);

        Ok(quote)
    }

    #[tracing::instrument(
        name = "checkout.service.place_order",
        skip(self, request),
        fields(
            order_uuid = tracing::field::Empty,
            payment_code = tracing::field::Empty,
            total = tracing::field::Empty
        ),
        err
    )]
    async fn place_order(
        &self,
        request: CheckoutRequest,
        now: Timestamp,
    ) -> Result<OrderRecord, CheckoutServiceError> {
        if request.items.is_empty() {
            return Err(CheckoutServiceError::EmptyCart);
        }

        validate_items(&request.items)?;

        let mut errors = FieldErrors::new();
        request.customer.validate(&mut errors);

        if !errors.is_empty() {
            return Err(errors.into());
        }

        // Discounts are recomputed from the store at commit time.
        let pricing = self.price(&request.items, now).await?;
        let items = order_items(&cart(&request.items)?);

        let uuid = OrderUuid::new();
        let customer = request.customer.normalized();

        let span = Span::current();
        span.record("order_uuid", tracing::field::display(uuid));
        span.record("total", pricing.total);

        let record = self
            .insert_with_payment_code(uuid, |payment_code| NewOrder {
                uuid,
                payment_code,
                customer: customer.clone(),
                cod: request.cod,
                status: OrderStatus::PendingConfirmation,
                payment_status: PaymentStatus::initial(request.cod),
                pricing: pricing.clone(),
                items: items.clone(),
            })
            .await?;

        span.record("payment_code", tracing::field::display(&record.payment_code));

        info!(
            order_uuid = %record.uuid,
            payment_code = %record.payment_code,
            total = record.pricing.total,
            discount_code = record.pricing.discount.as_ref().map(|discount| discount.code.as_str()),
            "placed order"
        );

        Ok(record)
    }

    async fn track(&self, payment_code: String) -> Result<OrderRecord, CheckoutServiceError> {
        let Ok(code) = PaymentCode::parse(&payment_code.trim().to_ascii_uppercase()) else {
            return Err(CheckoutServiceError::NotFound);
        };

        self.orders
            .find_by_payment_code(&code)
            .await?
            .ok_or(CheckoutServiceError::NotFound)
    }

    #[tracing::instrument(
        name = "checkout.service.update_status",
        skip(self, update),
        fields(order_uuid = %uuid),
        err
    )]
    async fn update_status(
        &self,
        uuid: OrderUuid,
        update: OrderStatusUpdate,
    ) -> Result<OrderRecord, CheckoutServiceError> {
        let current = self
            .orders
            .get(uuid)
            .await?
            .ok_or(CheckoutServiceError::NotFound)?;

        let status = update.status.unwrap_or(current.status);
        let payment_status = update.payment_status.unwrap_or(current.payment_status);

        if !current.status.can_transition_to(status) {
            return Err(CheckoutServiceError::InvalidTransition {
                from: current.status,
                to: status,
            });
        }

        if payment_status != current.payment_status && current.payment_status.is_final() {
            return Err(CheckoutServiceError::PaymentFinalized(
                current.payment_status,
            ));
        }

        if status == current.status && payment_status == current.payment_status {
            return Ok(current);
        }

        let record = self
            .orders
            .update_status(uuid, status, payment_status)
            .await?
            .ok_or(CheckoutServiceError::NotFound)?;

        info!(
            order_uuid = %uuid,
            status = %record.status,
            payment_status = %record.payment_status,
            "updated order status"
        );

        Ok(record)
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Price a cart preview with the codes usable at `now`.
    async fn quote(
        &self,
        items: Vec<CheckoutItem>,
        now: Timestamp,
    ) -> Result<OrderQuote, CheckoutServiceError>;

    /// Validate, re-price and record an order.
    async fn place_order(
        &self,
        request: CheckoutRequest,
        now: Timestamp,
    ) -> Result<OrderRecord, CheckoutServiceError>;

    /// Look an order up by the payment code given to the shopper.
    async fn track(&self, payment_code: String) -> Result<OrderRecord, CheckoutServiceError>;

    /// Move an order and its payment through their lifecycles.
    async fn update_status(
        &self,
        uuid: OrderUuid,
        update: OrderStatusUpdate,
    ) -> Result<OrderRecord, CheckoutServiceError>;
}
