//! Storefront CLI demo
//!
//! A small command-line client for the storefront gateway. The access token is
//! kept in the platform config directory, one file per gateway origin, so a
//! login survives between invocations; expired tokens are refreshed silently.
//!
//! Run with: cargo run -p storefront-cli -- --help

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use std::sync::Arc;
use storefront_client::config::{BASE_URL_ENV, DEFAULT_BASE_URL};
use storefront_client::{
    ApiClient, ClientConfig, FileCredentialStore, ProductQuery, SessionEvent,
};

/// Storefront gateway client
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(about = "Talk to the storefront API gateway", long_about = None)]
struct Args {
    /// Gateway base URL
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and remember the session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,
        /// Account password
        #[arg(short, long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log out and forget the session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List active sessions
    Sessions,
    /// Browse or search products
    Products {
        /// Search keyword
        #[arg(short, long)]
        search: Option<String>,
        /// Zero-based page
        #[arg(long, default_value = "0")]
        page: u32,
        /// Page size
        #[arg(long, default_value = "20")]
        size: u32,
    },
    /// List my orders
    Orders,
    /// List my payments
    Payments,
    /// Check whether a product can be ordered
    Stock {
        /// Product id
        product_id: i64,
        /// Wanted quantity
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = ClientConfig::builder().base_url(args.base_url.clone()).build();
    let store = FileCredentialStore::for_origin(&config.base_url);
    tracing::debug!(path = %store.path().display(), "Using credential file");

    let client = ApiClient::builder()
        .config(config)
        .store(Arc::new(store))
        .observer(|event: &SessionEvent| {
            if let SessionEvent::Expired { reason } = event {
                eprintln!(
                    "{} session expired ({reason}); run `storefront login`",
                    style("!").yellow().bold()
                );
            }
        })
        .build()
        .context("Failed to create client")?;

    run(&client, args.command).await
}

async fn run(client: &ApiClient, command: Command) -> Result<()> {
    match command {
        Command::Login { email, password } => {
            let response = client.auth().login(&email, password).await?;
            let name = response.user.map_or(email, |user| user.name);
            println!("{} Logged in as {}", style("✓").green(), style(name).bold());
        }
        Command::Logout => {
            client.auth().logout().await?;
            println!("{} Logged out", style("✓").green());
        }
        Command::Whoami => {
            let user = client.auth().current_user().await?;
            println!("{} <{}>", style(&user.name).bold(), user.email);
            println!("  role: {}", user.role);
            if !user.permissions.is_empty() {
                println!("  permissions: {}", user.permissions.join(", "));
            }
        }
        Command::Sessions => {
            for session in client.auth().sessions().await? {
                let marker = if session.current { "*" } else { " " };
                println!(
                    "{marker} {}  {}  {}",
                    session.session_id,
                    session.device_name.as_deref().unwrap_or("-"),
                    session.login_at.as_deref().unwrap_or("-"),
                );
            }
        }
        Command::Products { search, page, size } => {
            let results = match search {
                Some(keyword) => client.catalog().search(&keyword, page, size).await?,
                None => {
                    let query = ProductQuery::default().page(page).size(size);
                    client.catalog().products(&query).await?
                }
            };
            for product in &results.content {
                println!(
                    "{:>6}  {:<40}  {:>10.2}",
                    product.id,
                    product.name,
                    product.effective_price()
                );
            }
            println!(
                "{}",
                style(format!(
                    "page {}/{} - {} products",
                    results.page + 1,
                    results.total_pages.max(1),
                    results.total_elements
                ))
                .dim()
            );
        }
        Command::Orders => {
            let orders = client.orders().mine().await?;
            if orders.is_empty() {
                println!("No orders yet");
            }
            for order in orders {
                println!(
                    "{}  {:<10}  {:>10.2}  {} item(s)",
                    style(&order.order_number).bold(),
                    order.status,
                    order.total_amount,
                    order.items.len()
                );
            }
        }
        Command::Payments => {
            let payments = client.payments().mine().await?;
            if payments.is_empty() {
                println!("No payments yet");
            }
            for payment in payments {
                println!(
                    "#{:<6} order #{:<6} {:>12.2}  {:?}",
                    payment.id, payment.order_id, payment.amount, payment.status
                );
            }
        }
        Command::Stock {
            product_id,
            quantity,
        } => {
            let available = client
                .inventory()
                .check_availability(product_id, quantity)
                .await?;
            if available {
                println!("{} {quantity} x #{product_id} available", style("✓").green());
            } else {
                println!("{} {quantity} x #{product_id} not available", style("✗").red());
            }
        }
    }
    Ok(())
}
