use clap::Args;
use jiff::Timestamp;
use pricebook::products::ProductId;
use pricebook_app::domain::discount_codes::{DiscountCodesService, data::NewDiscountCode};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::Manager;

#[derive(Debug, Args)]
pub(crate) struct CreateDiscountCodeArgs {
    /// Six uppercase letters or digits
    #[arg(long)]
    code: String,

    /// Percentage off, greater than 0 and at most 100
    #[arg(long)]
    value: Decimal,

    /// First instant the code can be used, e.g. 2025-01-01T00:00:00Z
    #[arg(long)]
    starts_at: Timestamp,

    /// Last instant the code can be used
    #[arg(long)]
    ends_at: Timestamp,

    /// Restrict the code to a product; repeat for several
    #[arg(long = "product")]
    products: Vec<Uuid>,

    /// Create the code switched off
    #[arg(long)]
    inactive: bool,
}

pub(crate) async fn run(manager: &Manager, args: CreateDiscountCodeArgs) -> Result<(), String> {
    let record = manager
        .create(NewDiscountCode {
            code: args.code,
            value: args.value,
            starts_at: args.starts_at,
            ends_at: args.ends_at,
            is_active: !args.inactive,
            product_ids: args.products.into_iter().map(ProductId::from_uuid).collect(),
        })
        .await
        .map_err(|error| format!("failed to create discount code: {error}"))?;

    println!("discount_code_uuid: {}", record.uuid);
    println!("code: {}", record.code);
    println!("value: {}%", record.value.percent());
    println!(
        "window: {} .. {}",
        record.window.starts_at(),
        record.window.ends_at()
    );

    Ok(())
}
