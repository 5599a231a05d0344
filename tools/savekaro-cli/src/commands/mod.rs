//! CLI command implementations.

pub mod account;
pub mod browse;
pub mod categories;
pub mod config;
pub mod favorites;
pub mod product;
pub mod search;

use clap::{Args, Subcommand};

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Storefront path, e.g. `/women/eastern` or `/men/jeans?brand=outfitters`.
    #[arg(default_value = "/")]
    pub path: String,

    /// Select a brand (repeatable). Replaces the brand from the URL.
    #[arg(short, long = "brand")]
    pub brands: Vec<String>,

    /// Minimum price in rupees.
    #[arg(long)]
    pub min_price: Option<String>,

    /// Maximum price in rupees.
    #[arg(long)]
    pub max_price: Option<String>,

    /// Minimum discount: 0, 20, 30, 40 or 50.
    #[arg(short = 'd', long)]
    pub min_discount: Option<u32>,

    /// Sort order: discount-desc, price-asc or price-desc.
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Number of pages to reveal.
    #[arg(short, long, default_value = "1")]
    pub pages: usize,

    /// Reveal every page.
    #[arg(long)]
    pub all: bool,

    /// List the brands available on this listing.
    #[arg(long)]
    pub brands_only: bool,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Search text. Omit with --interactive.
    pub query: Option<String>,

    /// Read queries line by line from stdin, searching as typing pauses.
    #[arg(short, long)]
    pub interactive: bool,

    /// Show at most N results.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product id or `/product/<id>` path.
    pub id: String,

    /// Skip "you may also like" picks.
    #[arg(long)]
    pub no_related: bool,
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    /// Only one gender: men or women.
    #[arg(short, long)]
    pub gender: Option<String>,

    /// Print the raw backend listing instead of the menu.
    #[arg(long)]
    pub raw: bool,
}

/// Arguments for the account command.
#[derive(Args)]
pub struct AccountArgs {
    #[command(subcommand)]
    pub command: AccountCommand,
}

#[derive(Subcommand)]
pub enum AccountCommand {
    /// Sign in.
    Login {
        email: String,
        /// Prompted for when omitted.
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Create an account and sign in.
    Register {
        email: String,
        #[arg(short, long, default_value = "")]
        name: String,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Sign out and forget the stored session.
    Logout,
    /// Show the signed-in user.
    Me {
        /// Reload the user from the backend first.
        #[arg(long)]
        refresh: bool,
    },
    /// Confirm an email address with the token from the email.
    VerifyEmail {
        token: String,
    },
    /// Send the verification email again.
    ResendVerification,
    /// Request a password reset email.
    ForgotPassword {
        email: String,
    },
    /// Set a new password with a reset token.
    ResetPassword {
        /// Reset token from the email link.
        #[arg(short, long)]
        token: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        confirm: Option<String>,
    },
    /// Change the password of the signed-in user.
    ChangePassword {
        #[arg(long)]
        current: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        confirm: Option<String>,
    },
    /// Update name and email.
    UpdateProfile {
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
    },
}

/// Arguments for the favorites command.
#[derive(Args)]
pub struct FavoritesArgs {
    #[command(subcommand)]
    pub command: Option<FavoritesCommand>,
}

#[derive(Subcommand)]
pub enum FavoritesCommand {
    /// List favorited products.
    List,
    /// Flip the favorite state of a product.
    Toggle {
        /// Product id.
        id: String,
    },
    /// Remove a product from the backend list.
    Remove {
        /// Product id.
        id: String,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a configuration value.
    Get {
        /// Configuration key (e.g., catalog.page_size).
        key: String,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a savekaro.toml in the current directory.
    Init {
        /// Overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate configuration.
    Validate,
}
