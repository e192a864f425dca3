//! Pubkey command implementation.

use bns_chain::{BitcoinAddresses, BitcoinScripts, Network};
use bns_consensus::{public_key_for_address, TxInput};

use crate::output::read_file;

pub fn run(inputs_path: String, address: String, testnet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let content = read_file(&inputs_path)?;
    let inputs: Vec<TxInput> = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse inputs: {}", e))?;

    let network = if testnet {
        Network::Testnet
    } else {
        Network::Mainnet
    };
    let codec = BitcoinAddresses::new(network);

    match public_key_for_address(&inputs, &address, &BitcoinScripts, &codec) {
        Some(public_key) => {
            println!("{}", hex::encode(public_key));
            Ok(())
        }
        None => Err(format!("No input signed for {}", address).into()),
    }
}
