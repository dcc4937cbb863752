//! Checkout service errors.

use pricebook::{
    cart::CartError, discounts::DiscountError, pricing::TotalPriceError, products::ProductId,
    receipt::ReceiptError,
};
use thiserror::Error;

use crate::{
    database::StoreError,
    domain::{
        orders::status::{OrderStatus, PaymentStatus},
        validation::FieldErrors,
    },
};

#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("invalid quantity for product {0}")]
    InvalidQuantity(ProductId),

    #[error("invalid order: {0}")]
    Validation(FieldErrors),

    #[error("order not found")]
    NotFound,

    #[error("cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("payment status {0} can no longer change")]
    PaymentFinalized(PaymentStatus),

    #[error("could not build cart")]
    Cart(#[source] CartError),

    #[error("could not price cart")]
    Pricing(#[source] ReceiptError),

    #[error("could not allocate a unique payment code")]
    PaymentCodeExhausted,

    #[error("storage error")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for CheckoutServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}

impl From<FieldErrors> for CheckoutServiceError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<CartError> for CheckoutServiceError {
    fn from(error: CartError) -> Self {
        match error {
            CartError::InvalidQuantity(product) | CartError::QuantityOverflow(product) => {
                Self::InvalidQuantity(product)
            }
            other => Self::Cart(other),
        }
    }
}

/// Totals that overflow come from client-supplied prices and quantities, so they are bad input.
impl From<ReceiptError> for CheckoutServiceError {
    fn from(error: ReceiptError) -> Self {
        match error {
            ReceiptError::TotalPrice(TotalPriceError::Overflow(_))
            | ReceiptError::Discount(
                DiscountError::PercentConversion
                | DiscountError::TotalPrice(TotalPriceError::Overflow(_)),
            ) => {
                let mut errors = FieldErrors::new();

                errors.push("items.price", "order total is too large");

                Self::Validation(errors)
            }
            other => Self::Pricing(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_errors_name_the_product() {
        let product = ProductId::generate();

        assert!(matches!(
            CheckoutServiceError::from(CartError::QuantityOverflow(product)),
            CheckoutServiceError::InvalidQuantity(id) if id == product
        ));
    }

    #[test]
    fn total_overflow_is_a_validation_error() {
        let overflow = ReceiptError::TotalPrice(TotalPriceError::Overflow(ProductId::generate()));

        assert!(matches!(
            CheckoutServiceError::from(overflow),
            CheckoutServiceError::Validation(errors) if errors.contains("items.price")
        ));
        assert!(matches!(
            CheckoutServiceError::from(ReceiptError::Discount(DiscountError::PercentConversion)),
            CheckoutServiceError::Validation(_)
        ));
    }

    #[test]
    fn missing_row_is_not_found() {
        assert!(matches!(
            CheckoutServiceError::from(StoreError::NotFound),
            CheckoutServiceError::NotFound
        ));
        assert!(matches!(
            CheckoutServiceError::from(StoreError::InvalidData),
            CheckoutServiceError::Storage(StoreError::InvalidData)
        ));
    }
}
