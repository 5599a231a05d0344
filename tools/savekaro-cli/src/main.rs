//! SaveKaro CLI - browse the SaveKaro deal catalog from a terminal.
//!
//! Commands:
//! - `savekaro browse` - List a category page with sidebar filters
//! - `savekaro search` - Search products by text
//! - `savekaro product` - Show a product with related picks
//! - `savekaro categories` - Show the category menu
//! - `savekaro account` - Sign in, register and manage the account
//! - `savekaro favorites` - List and toggle favorites
//! - `savekaro config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    AccountArgs, BrowseArgs, CategoriesArgs, ConfigArgs, FavoritesArgs, ProductArgs, SearchArgs,
};

/// SaveKaro CLI - Discounted fashion from Pakistani stores
#[derive(Parser)]
#[command(name = "savekaro")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse a category listing
    Browse(BrowseArgs),

    /// Search products
    Search(SearchArgs),

    /// Show a product
    Product(ProductArgs),

    /// Show the category menu
    Categories(CategoriesArgs),

    /// Manage your account
    Account(AccountArgs),

    /// Manage favorites
    Favorites(FavoritesArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.json);
    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Categories(args) => commands::categories::run(args, &ctx).await,
        Commands::Account(args) => commands::account::run(args, &ctx).await,
        Commands::Favorites(args) => commands::favorites::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
