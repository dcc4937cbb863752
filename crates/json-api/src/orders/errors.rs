//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use pricebook_app::domain::orders::CheckoutServiceError;

pub(crate) fn into_status_error(error: CheckoutServiceError) -> StatusError {
    match error {
        CheckoutServiceError::EmptyCart => StatusError::bad_request().brief("items: cart is empty"),
        CheckoutServiceError::InvalidQuantity(product) => StatusError::bad_request()
            .brief(format!("items.quantity: invalid quantity for product {product}")),
        CheckoutServiceError::Validation(errors) => {
            StatusError::bad_request().brief(errors.to_string())
        }
        CheckoutServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        CheckoutServiceError::InvalidTransition { from, to } => {
            StatusError::conflict().brief(format!("cannot move order from {from} to {to}"))
        }
        CheckoutServiceError::PaymentFinalized(status) => {
            StatusError::conflict().brief(format!("payment is already {status}"))
        }
        CheckoutServiceError::Cart(source) => {
            error!("failed to build cart: {source}");

            StatusError::internal_server_error()
        }
        CheckoutServiceError::Pricing(source) => {
            error!("failed to price cart: {source}");

            StatusError::internal_server_error()
        }
        CheckoutServiceError::PaymentCodeExhausted => {
            error!("failed to allocate a unique payment code");

            StatusError::service_unavailable().brief("Please retry the order")
        }
        CheckoutServiceError::Storage(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
