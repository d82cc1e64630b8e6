use clap::{Parser, Subcommand};

/// shopctl — admin client for the shop catalog API
#[derive(Parser)]
#[command(name = "shopctl", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new user account
    Register {
        #[arg(long)]
        firstname: String,
        #[arg(long)]
        lastname: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Locale for the activation email (e.g. en, fr)
        #[arg(long, default_value = "en")]
        locale: String,
    },

    /// Activate an account with the emailed 6-digit code
    Activate {
        code: String,
        #[arg(long, default_value = "en")]
        locale: String,
    },

    /// Authenticate and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Drop the local session token (no network call)
    Logout,

    /// Manage catalog products (requires a valid session)
    Product {
        #[command(subcommand)]
        command: ProductCommands,
    },
}

#[derive(Subcommand)]
pub enum ProductCommands {
    /// List products with pagination and filters
    List {
        /// Page index, zero-based
        #[arg(long)]
        page: Option<u32>,
        /// Page size
        #[arg(long)]
        size: Option<u32>,
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
        /// Free-text search over name, code and description
        #[arg(long)]
        q: Option<String>,
        /// Filter by inventory status: INSTOCK, LOWSTOCK or OUTOFSTOCK
        #[arg(long)]
        status: Option<String>,
    },
    /// Show a single product
    Get { id: i64 },
    /// Create a product from a JSON record ('-' reads stdin)
    Create {
        #[arg(long)]
        json: String,
    },
    /// Update a product from a JSON record ('-' reads stdin)
    Update {
        id: i64,
        #[arg(long)]
        json: String,
    },
    /// Delete a product
    Delete { id: i64 },
}
