use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::Level;
use wallet_core::*;

#[derive(Parser)]
#[command(name = "wallet-cli")]
#[command(about = "Wallet Core CLI - seed, identity and transaction signing tools")]
#[command(version = "1.0.0")]
struct Cli {
    /// Network preset
    #[arg(short, long, default_value = "mainnet")]
    network: Network,

    /// JSON network configuration file (overrides --network)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new seed phrase
    GenerateSeed {
        /// Number of words (12, 15, 18, 21 or 24)
        #[arg(short, long, default_value_t = DEFAULT_SEED_WORDS)]
        words: usize,
    },

    /// Derive the key pair and address of a seed
    Identity {
        /// Seed phrase
        #[arg(short, long)]
        seed: String,

        /// Also print the private key
        #[arg(long)]
        show_private: bool,
    },

    /// Check an address against the active network
    ValidateAddress {
        address: String,
    },

    /// Build and sign an asset transfer
    Transfer {
        /// Sender seed phrase
        #[arg(short, long)]
        seed: String,

        /// Base58 address or alias:<name>
        #[arg(short, long)]
        recipient: String,

        /// Amount in tokens
        #[arg(short, long)]
        amount: String,

        /// Asset id (empty for the native asset)
        #[arg(long, default_value = "")]
        asset: String,

        /// Fee in tokens
        #[arg(long, default_value = "0.001")]
        fee: String,

        /// Fee asset id (empty for the native asset)
        #[arg(long, default_value = "")]
        fee_asset: String,

        /// Attachment text
        #[arg(long)]
        attachment: Option<String>,

        /// Timestamp in milliseconds (defaults to now)
        #[arg(long)]
        timestamp: Option<i64>,
    },

    /// Encrypt a seed with a password
    EncryptSeed {
        #[arg(short, long)]
        seed: String,

        #[arg(short, long)]
        password: String,
    },

    /// Decrypt a stored seed
    DecryptSeed {
        #[arg(long)]
        cipher: String,

        #[arg(long)]
        checksum: String,

        #[arg(short, long)]
        password: String,
    },

    /// Convert a token price to the matcher wire integer
    BackendPrice {
        /// Price in price-asset tokens per amount-asset token
        #[arg(short, long)]
        price: String,

        /// Amount asset id (empty for the native asset)
        #[arg(long, default_value = "")]
        amount_asset: String,

        /// Price asset id (empty for the native asset)
        #[arg(long, default_value = "")]
        price_asset: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => NetworkConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => cli.network.config(),
    };
    let core = WalletCore::new(config)?;

    match cli.command {
        Commands::GenerateSeed { words } => {
            println!("{}", core.generate_seed_phrase(words)?);
        }
        Commands::Identity { seed, show_private } => {
            let identity = core.identity(seed.as_bytes());
            let mut output = serde_json::to_value(&identity)?;
            if show_private {
                output["privateKey"] = json!(identity.key_pair.private_key);
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::ValidateAddress { address } => {
            if let Err(e) = core.keys().decode_address(&address) {
                bail!("invalid address: {}", e);
            }
            println!("Valid: {}", address);
        }
        Commands::Transfer {
            seed,
            recipient,
            amount,
            asset,
            fee,
            fee_asset,
            attachment,
            timestamp,
        } => {
            let sender = core.identity(seed.as_bytes()).key_pair;
            let request = TransferRequest {
                recipient: Some(recipient),
                amount: Some(core.money(&amount, &asset)?),
                fee: Some(core.money(&fee, &fee_asset)?),
                attachment: attachment.map(String::into_bytes),
                timestamp,
            };
            let signed = core.transfer(&sender, request)?;
            println!("{}", serde_json::to_string_pretty(&signed.json)?);
        }
        Commands::EncryptSeed { seed, password } => {
            let encrypted = core.encrypt_seed(seed.as_bytes(), &password)?;
            println!("{}", serde_json::to_string_pretty(&encrypted)?);
        }
        Commands::DecryptSeed {
            cipher,
            checksum,
            password,
        } => {
            let encrypted = EncryptedSeed { cipher, checksum };
            let Some(seed) = core.decrypt_seed(&encrypted, &password) else {
                bail!("wrong password or damaged cipher");
            };
            println!("{}", String::from_utf8_lossy(&seed));
        }
        Commands::BackendPrice {
            price,
            amount_asset,
            price_asset,
        } => {
            let pair = core.asset_pair(&amount_asset, &price_asset)?;
            let price = OrderPrice::from_tokens(price.parse()?, pair)?;
            let output = json!({
                "assetPair": price.pair().to_json(),
                "price": price.to_tokens().to_plain_string(),
                "backendPrice": price.to_backend_price(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
