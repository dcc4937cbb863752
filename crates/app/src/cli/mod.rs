use clap::{Parser, Subcommand};

mod discount_codes;
mod migrate;

#[derive(Debug, Parser)]
#[command(name = "pricebook-app", about = "Pricebook CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate(migrate::MigrateArgs),
    /// Manage discount codes
    DiscountCodes(discount_codes::DiscountCodesCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Migrate(args) => migrate::run(args).await,
            Commands::DiscountCodes(command) => discount_codes::run(command).await,
        }
    }
}
