//! Pricebook prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartAction, CartError, CartStore, CartStoreError, MemoryCartStore},
    discounts::{
        BestDiscount, CodeCheckError, CouponCode, CouponCodeError, DiscountCode, DiscountCodeId,
        DiscountError, DiscountValue, DiscountValueError, DiscountWindow, DiscountWindowError,
        ProductScope, best_discount, best_discount_for_product, check_code, discount_amount,
        eligible_codes,
    },
    items::CartItem,
    money::format_price,
    pricing::{
        OrderTotals, ShippingPolicy, TotalPriceError, compose_total, shipping_fee, total_price,
    },
    products::{Product, ProductId},
    receipt::{AppliedDiscount, ProductBadge, Receipt, ReceiptError},
};
