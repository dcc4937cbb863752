//! Pricing Config

use clap::Args;
use pricebook::pricing::{FLAT_SHIPPING_FEE, FREE_SHIPPING_THRESHOLD, ShippingPolicy};

/// Shipping fee settings, in VND.
#[derive(Debug, Args)]
pub struct PricingConfig {
    /// Subtotal at or above which shipping is free
    #[arg(long, env = "FREE_SHIPPING_THRESHOLD", default_value_t = FREE_SHIPPING_THRESHOLD)]
    pub free_shipping_threshold: i64,

    /// Shipping fee charged below the threshold
    #[arg(long, env = "FLAT_SHIPPING_FEE", default_value_t = FLAT_SHIPPING_FEE)]
    pub flat_shipping_fee: i64,
}

impl PricingConfig {
    /// The configured shipping policy.
    #[must_use]
    pub fn shipping_policy(&self) -> ShippingPolicy {
        ShippingPolicy::new(self.free_shipping_threshold, self.flat_shipping_fee)
    }
}
