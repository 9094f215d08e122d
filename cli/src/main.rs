use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod keygen;
mod tx;

#[derive(Parser)]
#[command(name = "weave-cli")]
#[command(about = "Wallet and transaction CLI for the gossip-bridge node", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Node HTTP base URL to submit transactions to
    #[arg(long, default_value = "http://127.0.0.1:1984", global = true)]
    node_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new RSA keypair
    Keygen {
        /// Output file path (will create .pub and .priv files)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Build, sign, and submit a value-transfer transaction
    Send {
        /// Recipient address or public key (hex-encoded)
        to: String,

        /// Quantity to transfer, in base units
        amount: u128,

        /// Miner reward to attach, in base units
        #[arg(short, long, default_value = "0")]
        reward: u128,

        /// Private key file (DER, as written by `keygen`)
        #[arg(short, long)]
        key: PathBuf,

        /// Previous transaction id from this wallet, hex-encoded
        #[arg(long)]
        last_tx: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Keygen { output } => {
            keygen::generate_keypair(&output)?;
        }
        Commands::Send {
            to,
            amount,
            reward,
            key,
            last_tx,
        } => {
            let last_tx = match last_tx {
                Some(s) => {
                    let bytes = hex::decode(s)?;
                    let id: [u8; 32] = bytes
                        .try_into()
                        .map_err(|_| anyhow::anyhow!("last-tx must be 32 bytes"))?;
                    Some(id)
                }
                None => None,
            };
            tx::send_transaction(&cli.node_url, &to, amount, reward, &key, last_tx).await?;
        }
    }

    Ok(())
}
