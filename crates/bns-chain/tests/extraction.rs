use bns_chain::{BitcoinAddresses, BitcoinScripts, Network};
use bns_consensus::{public_key_for_address, ConsensusConfig, FieldChecker, Grammar, TxInput};
use serde_json::json;

const G_COMPRESSED: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
const G_ADDRESS: &str = "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH";

fn p2pkh_script(pubkey_hex: &str) -> String {
    let pubkey = hex::decode(pubkey_hex).unwrap();
    let mut script = vec![0x47];
    script.extend_from_slice(&[0x30; 0x47]);
    script.push(pubkey.len() as u8);
    script.extend_from_slice(&pubkey);
    hex::encode(script)
}

fn inputs(scripts: &[String]) -> Vec<TxInput> {
    let raw: Vec<_> = scripts
        .iter()
        .enumerate()
        .map(|(vout, script)| json!({ "script": script, "vout": vout }))
        .collect();
    serde_json::from_value(json!(raw)).unwrap()
}

#[test]
fn extracts_signer_key_from_p2pkh_input() {
    let inputs = inputs(&[
        // Multisig-style spend: three elements, skipped.
        "00".to_string() + &p2pkh_script(G_COMPRESSED),
        // Invalid point, logged and skipped.
        p2pkh_script(&format!("02{}", "ff".repeat(32))),
        p2pkh_script(G_COMPRESSED),
    ]);
    let codec = BitcoinAddresses::new(Network::Mainnet);
    let found = public_key_for_address(&inputs, G_ADDRESS, &BitcoinScripts, &codec);
    assert_eq!(found.map(hex::encode), Some(G_COMPRESSED.to_string()));
}

#[test]
fn wrong_network_finds_nothing() {
    let inputs = inputs(&[p2pkh_script(G_COMPRESSED)]);
    let codec = BitcoinAddresses::new(Network::Testnet);
    assert!(public_key_for_address(&inputs, G_ADDRESS, &BitcoinScripts, &codec).is_none());
}

#[test]
fn truncated_script_is_skipped() {
    let inputs = inputs(&["4730".to_string(), p2pkh_script(G_COMPRESSED)]);
    let codec = BitcoinAddresses::default();
    assert!(public_key_for_address(&inputs, G_ADDRESS, &BitcoinScripts, &codec).is_some());
}

#[test]
fn address_checker_uses_reencoding() {
    let config = ConsensusConfig::default();
    let grammar = Grammar::new(&config).unwrap();
    let codec = BitcoinAddresses::default();
    let checker = FieldChecker::new(&grammar, &config.network, &codec);

    assert!(checker.check_address(&json!(G_ADDRESS)));
    assert!(checker.check_address(&json!("3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy")));
    // Right shape, broken checksum.
    assert!(!checker.check_address(&json!("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMJ")));
    assert!(!checker.check_address(&json!(12345)));
}
