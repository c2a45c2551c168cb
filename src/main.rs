use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use log::info;
use serde::Serialize;

use xrpl_access::config;
use xrpl_access::models::{PathHop, PaymentRequest};
use xrpl_access::rates::RateFeed;
use xrpl_access::utils::is_valid_address;
use xrpl_access::xrpl;

#[derive(Parser, Debug)]
#[command(name = "xrpl-access", version, about = "Query and pay on the XRP Ledger with endpoint failover")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the selected network and endpoint
    Info,
    /// Check endpoints and report the connection status
    Connect,
    /// Look up account state
    Account { address: String },
    /// Look up an account balance in XRP
    Balance { address: String },
    /// Find payment paths for delivering an amount
    Paths {
        source: String,
        destination: String,
        amount: String,
        #[arg(long, default_value = "USD")]
        currency: String,
    },
    /// List recent transactions for an account
    History {
        address: String,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Submit a (simulated) payment
    Submit {
        source: String,
        destination: String,
        amount: String,
        #[arg(long, default_value = "XRP")]
        currency: String,
        #[arg(long)]
        send_max: Option<String>,
        /// Route through the best synthesized path for the currency
        #[arg(long)]
        best_path: bool,
    },
    /// Check an address for syntactic validity
    Validate { address: String },
    /// Fetch current exchange rates
    Rates,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment variables
    dotenv().ok();

    // Initialize logging
    init_logger();

    let cli = Cli::parse();

    let config = config::load_config().context("Failed to load configuration")?;
    info!("Configuration loaded for {} network", config.network);

    let feed = RateFeed::default();

    match cli.command {
        Command::Validate { address } => {
            print_json(&serde_json::json!({ "address": address, "valid": is_valid_address(&address) }))?;
        }
        Command::Rates => {
            print_json(&feed.fetch().await)?;
        }
        command => {
            let client = xrpl::create_client_with_rates(&config, &feed).await;
            run(&client, command).await?;
            client.disconnect().await;
        }
    }

    Ok(())
}

async fn run(client: &xrpl::XrplClient, command: Command) -> Result<()> {
    match command {
        Command::Info => print_json(&client.network_info()),
        Command::Connect => {
            client.connect().await;
            print_json(&client.network_info())
        }
        Command::Account { address } => print_json(&client.account_info(&address).await),
        Command::Balance { address } => {
            let balance = client.account_balance(&address).await;
            print_json(&serde_json::json!({ "address": address, "balance": balance }))
        }
        Command::Paths {
            source,
            destination,
            amount,
            currency,
        } => {
            let paths = client.find_payment_paths(&source, &destination, &amount, &currency).await?;
            print_json(&paths)
        }
        Command::History { address, limit } => print_json(&client.transaction_history(&address, limit).await),
        Command::Submit {
            source,
            destination,
            amount,
            currency,
            send_max,
            best_path,
        } => {
            let mut request = PaymentRequest::new(&source, &destination, &amount, &currency);
            if best_path {
                let best: Option<Vec<PathHop>> = client
                    .find_payment_paths(&source, &destination, &amount, &currency)
                    .await?
                    .into_iter()
                    .next()
                    .map(|best| best.paths)
                    .filter(|hops| !hops.is_empty());
                // a direct route needs no path set
                if let Some(hops) = best {
                    request = request.with_paths(vec![hops]);
                }
            }
            if let Some(send_max) = send_max {
                request = request.with_send_max(send_max);
            }

            print_json(&client.submit_payment(&request).await?)
        }
        Command::Validate { .. } | Command::Rates => Ok(()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render output")?;
    println!("{}", rendered);
    Ok(())
}

fn init_logger() {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or("RUST_LOG", "info")
    );
}
