use clap::Args;
use pricebook_app::domain::discount_codes::{
    DiscountCodesService,
    data::{CodeStatus, DiscountCodeFilter},
};

use super::Manager;

#[derive(Debug, Args)]
pub(crate) struct ListDiscountCodesArgs {
    /// `active` or `inactive`
    #[arg(long)]
    status: Option<CodeStatus>,

    /// Case-insensitive substring of the code
    #[arg(long)]
    search: Option<String>,

    #[arg(long)]
    page: Option<u32>,

    #[arg(long)]
    limit: Option<u32>,
}

pub(crate) async fn run(manager: &Manager, args: ListDiscountCodesArgs) -> Result<(), String> {
    let page = manager
        .list(DiscountCodeFilter {
            status: args.status,
            search: args.search,
            page: args.page,
            limit: args.limit,
        })
        .await
        .map_err(|error| format!("failed to list discount codes: {error}"))?;

    for record in &page.data {
        let status = if record.is_active { "active" } else { "inactive" };

        println!(
            "{}  {}  {:>6}%  {}  {} .. {}  products: {}",
            record.uuid,
            record.code,
            record.value.percent(),
            status,
            record.window.starts_at(),
            record.window.ends_at(),
            record.product_ids.len()
        );
    }

    println!(
        "page {} of {} ({} codes)",
        page.pagination.page, page.pagination.total_pages, page.pagination.total
    );

    Ok(())
}
