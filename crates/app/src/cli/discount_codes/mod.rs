use clap::{Args, Subcommand};
use pricebook_app::{
    database::{self, Db},
    domain::discount_codes::{DiscountCodesManager, PgDiscountCodeStore},
};

mod create;
mod list;

#[derive(Debug, Args)]
pub(crate) struct DiscountCodesCommand {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: DiscountCodesSubcommand,
}

#[derive(Debug, Subcommand)]
enum DiscountCodesSubcommand {
    Create(create::CreateDiscountCodeArgs),
    List(list::ListDiscountCodesArgs),
}

type Manager = DiscountCodesManager<PgDiscountCodeStore>;

async fn manager(database_url: Option<String>) -> Result<Manager, String> {
    let database_url = database_url.ok_or("DATABASE_URL is required")?;

    let pool = database::connect(&database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    Ok(DiscountCodesManager::new(PgDiscountCodeStore::new(Db::new(pool))))
}

pub(crate) async fn run(command: DiscountCodesCommand) -> Result<(), String> {
    let manager = manager(command.database_url).await?;

    match command.command {
        DiscountCodesSubcommand::Create(args) => create::run(&manager, args).await,
        DiscountCodesSubcommand::List(args) => list::run(&manager, args).await,
    }
}
