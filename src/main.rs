use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shop_admin::auth::guard::{RouteAccess, SessionGate};
use shop_admin::auth::token_store::TokenStore;
use shop_admin::auth::{AuthClient, Credentials, RegisterRequest};
use shop_admin::errors::ApiError;
use shop_admin::products::types::{Product, ProductQuery};
use shop_admin::products::CatalogClient;
use shop_admin::{config, net};

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "shop_admin=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = config::load()?;
    let args = cli::Cli::parse();

    // Explicit wiring: one token slot, one middleware-equipped HTTP client,
    // façades built on top. No ambient lookup anywhere.
    let store = Arc::new(TokenStore::new(cfg.token_file.clone()));
    let client = net::build_client(&cfg.api_url, store.clone())?;
    let auth = AuthClient::new(client.clone(), &cfg.api_url, store.clone());

    match args.command {
        cli::Commands::Register {
            firstname,
            lastname,
            email,
            password,
            locale,
        } => {
            let payload = RegisterRequest {
                firstname,
                lastname,
                email,
                password,
            };
            auth.register(&payload, &locale).await.map_err(display)?;
            println!("Registration submitted. Check your email for the activation code.");
        }

        cli::Commands::Activate { code, locale } => {
            // Client-side validation: a bad code never reaches the network.
            if code.len() != 6 || !code.chars().all(|c| c.is_ascii_digit()) {
                anyhow::bail!("activation code must be exactly 6 digits");
            }
            auth.confirm(&code, &locale).await.map_err(display)?;
            println!("Your account has been activated. You can now log in.");
        }

        cli::Commands::Login { email, password } => {
            auth.login(&Credentials { email, password })
                .await
                .map_err(display)?;
            println!("Logged in. Try `shopctl product list`.");
        }

        cli::Commands::Logout => {
            auth.logout();
            println!("Logged out.");
        }

        cli::Commands::Product { command } => {
            // The product subtree is guarded: evaluate the gate before
            // running anything, and point the user at login on denial.
            let gate = SessionGate::new(store.clone());
            if let RouteAccess::Denied { redirect_to } = gate.check() {
                anyhow::bail!("no valid session — go to `{redirect_to}` (shopctl login) first");
            }

            let mut catalog = CatalogClient::new(client.clone(), &cfg.api_url);
            run_product_command(&mut catalog, command).await?;
        }
    }

    Ok(())
}

async fn run_product_command(
    catalog: &mut CatalogClient,
    command: cli::ProductCommands,
) -> anyhow::Result<()> {
    match command {
        cli::ProductCommands::List {
            page,
            size,
            category,
            q,
            status,
        } => {
            let query = ProductQuery {
                page,
                size,
                category,
                q,
                status,
            };
            let page = catalog.list(&query).await.map_err(display)?;
            if page.content.is_empty() {
                println!("No products found.");
                return Ok(());
            }
            println!(
                "{:<6} {:<14} {:<28} {:<14} {:>10} {:>6} {:<10}",
                "ID", "CODE", "NAME", "CATEGORY", "PRICE", "QTY", "STATUS"
            );
            for p in &page.content {
                println!(
                    "{:<6} {:<14} {:<28} {:<14} {:>10.2} {:>6} {:<10}",
                    p.id.map_or_else(|| "-".into(), |v| v.to_string()),
                    p.code,
                    p.name,
                    p.category.as_deref().unwrap_or("-"),
                    p.price,
                    p.quantity.map_or_else(|| "-".into(), |v| v.to_string()),
                    p.inventory_status.map_or("-", |s| s.as_str()),
                );
            }
            println!(
                "page {}/{} — {} products total",
                page.number + 1,
                page.total_pages.max(1),
                page.total_elements
            );
        }

        cli::ProductCommands::Get { id } => {
            let product = catalog.get_by_id(id).await.map_err(display)?;
            println!("{}", serde_json::to_string_pretty(&product)?);
        }

        cli::ProductCommands::Create { json } => {
            let payload = read_product(&json)?;
            let created = catalog.create(&payload).await.map_err(display)?;
            println!(
                "Product created: {} ({})",
                created.name,
                created.id.map_or_else(|| "-".into(), |v| v.to_string())
            );
        }

        cli::ProductCommands::Update { id, json } => {
            let payload = read_product(&json)?;
            let updated = catalog.update(id, &payload).await.map_err(display)?;
            println!("Product {} updated: {}", id, updated.name);
        }

        cli::ProductCommands::Delete { id } => {
            catalog.delete(id).await.map_err(display)?;
            println!("Product {id} deleted.");
        }
    }
    Ok(())
}

/// Parses a product record from an inline JSON argument or stdin (`-`).
fn read_product(raw: &str) -> anyhow::Result<Product> {
    let text = if raw == "-" {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)?;
        buf
    } else {
        raw.to_string()
    };
    serde_json::from_str(&text).map_err(|e| anyhow::anyhow!("invalid product JSON: {e}"))
}

/// The CLI is the display boundary: show the readable message, not the
/// raw error chain.
fn display(err: ApiError) -> anyhow::Error {
    anyhow::anyhow!(err.readable_message())
}
