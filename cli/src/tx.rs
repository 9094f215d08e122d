use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Result};
use weave_core::Transaction;
use weave_crypto::Keypair;

const NET_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds, signs, and submits a value-transfer transaction to a node's
/// `/tx` wire endpoint — the same endpoint peers use to forward
/// transactions to each other.
pub async fn send_transaction(
    node_url: &str,
    to: &str,
    amount: u128,
    reward: u128,
    key_file: &Path,
    last_tx: Option<[u8; 32]>,
) -> Result<()> {
    println!("preparing transaction...");
    println!("  recipient: {}", to);
    println!("  quantity: {}", amount);
    println!("  reward: {}", reward);

    let der = fs::read(key_file)?;
    let keypair = Keypair::from_private_key_der(&der)?;

    let destination = hex::decode(to)?;
    let mut transaction = Transaction::transfer(&destination, reward, amount, last_tx);
    transaction.sign(&keypair)?;

    println!("  from: {}", hex::encode(keypair.address()?));
    println!("  tx id: {}", hex::encode(transaction.id));

    println!("submitting to {}...", node_url);
    let client = reqwest::Client::builder().timeout(NET_TIMEOUT).build()?;
    let response = client
        .post(format!("{}/tx", node_url))
        .json(&transaction)
        .send()
        .await?;

    if !response.status().is_success() {
        bail!("node rejected transaction: HTTP {}", response.status());
    }

    println!("transaction submitted successfully");
    Ok(())
}
