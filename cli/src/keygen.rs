use std::fs;
use std::path::Path;

use anyhow::Result;
use weave_crypto::Keypair;

pub fn generate_keypair(output: &Path) -> Result<()> {
    println!("generating RSA keypair...");

    let keypair = Keypair::generate()?;

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }

    let priv_path = output.with_extension("priv");
    fs::write(&priv_path, keypair.private_key_der()?)?;
    println!("private key saved to: {}", priv_path.display());

    let pub_path = output.with_extension("pub");
    fs::write(&pub_path, hex::encode(keypair.public_key_bytes()?))?;
    println!("public key saved to: {}", pub_path.display());

    println!("address: {}", hex::encode(keypair.address()?));
    println!();
    println!("keep the private key file secure and never share it");

    Ok(())
}
