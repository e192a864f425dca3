//! Bitcoin-style chain primitives for the BNS consensus core.
//!
//! This crate provides:
//! - Signature-script deserialization ([`BitcoinScripts`])
//! - Public key to pay-to-pubkey-hash address derivation and base58check
//!   address re-encoding ([`BitcoinAddresses`])
//!
//! Both implement the seams defined in [`bns_consensus::chain`].

#![deny(missing_docs)]

/// Address derivation and re-encoding.
pub mod address;
/// Script deserialization.
pub mod script;

pub use address::{hash160, BitcoinAddresses, Network};
pub use script::{deserialize_script, BitcoinScripts};
