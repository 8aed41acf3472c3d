/*
[INPUT]:  CLI arguments and the primary wallet private key
[OUTPUT]: One order attempt and its status line on stdout
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or the startup flow
*/

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use hyperperp_adapter::{EvmWalletSigner, Network, Side};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hyperperp_flow::{ActivationPolicy, OrderFlow, OrderIntent, SessionKeyStore, UserSession};

#[derive(Parser, Debug)]
#[command(name = "hyperperp-flow", version, about = "Place a perp limit order through a delegated agent wallet")]
struct Cli {
    /// Trading pair, e.g. HYPE-PERP
    #[arg(long)]
    pair: String,

    #[arg(long, value_enum)]
    side: CliSide,

    #[arg(long, value_parser = parse_decimal)]
    price: Decimal,

    #[arg(long, value_parser = parse_decimal)]
    size: Decimal,

    #[arg(long, default_value_t = 1)]
    leverage: u32,

    #[arg(long, value_enum, default_value_t = CliNetwork::Testnet)]
    network: CliNetwork,

    /// Primary wallet private key (hex)
    #[arg(long = "private-key", env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: String,

    /// Directory for the delegated key (defaults to the user data dir)
    #[arg(long = "session-dir", value_name = "PATH")]
    session_dir: Option<PathBuf>,

    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliSide {
    Buy,
    Sell,
}

impl From<CliSide> for Side {
    fn from(side: CliSide) -> Self {
        match side {
            CliSide::Buy => Side::Buy,
            CliSide::Sell => Side::Sell,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliNetwork {
    Testnet,
    Mainnet,
}

impl From<CliNetwork> for Network {
    fn from(network: CliNetwork) -> Self {
        match network {
            CliNetwork::Testnet => Network::Testnet,
            CliNetwork::Mainnet => Network::Mainnet,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let network: Network = args.network.into();
    let wallet = EvmWalletSigner::from_hex(&args.private_key, network.chain_id())
        .context("parse private key")?;
    let session = UserSession::new(true, vec![Arc::new(wallet)]);

    let store = match &args.session_dir {
        Some(dir) => SessionKeyStore::new(dir),
        None => SessionKeyStore::new(SessionKeyStore::default_dir()),
    };
    let flow = OrderFlow::with_parts(ActivationPolicy::default(), store);

    let intent = OrderIntent {
        pair: args.pair.clone(),
        side: args.side.into(),
        price: args.price,
        quantity: args.size,
        leverage: args.leverage,
    };

    info!(pair = %intent.pair, side = ?intent.side, "submitting order");
    let status = flow.submit(&session, &intent).await;
    println!("{status}");

    Ok(if status.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn parse_decimal(raw: &str) -> Result<Decimal, String> {
    raw.parse().map_err(|err| format!("invalid decimal: {err}"))
}
