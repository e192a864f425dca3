//! Seams to the chain library: script deserialization and address encoding.
//!
//! The consensus core never parses raw transactions or encodes addresses
//! itself; it consumes these traits. `bns-chain` provides the Bitcoin-style
//! implementations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors reported by chain-library primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// A script could not be deserialized.
    #[error("invalid script at offset {offset}: {reason}")]
    Script {
        /// Byte offset of the offending element.
        offset: usize,
        /// Reason for invalidity.
        reason: String,
    },
    /// Bytes are not a valid public key.
    #[error("invalid public key: {0}")]
    PublicKey(String),
    /// A string is not a valid address.
    #[error("invalid address: {0}")]
    Address(String),
}

/// One element of a deserialized script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptElement {
    /// Data pushed onto the stack.
    Push(Vec<u8>),
    /// Any non-push opcode.
    Op(u8),
}

impl ScriptElement {
    /// The pushed bytes, if this element is a data push.
    pub fn as_push(&self) -> Option<&[u8]> {
        match self {
            ScriptElement::Push(data) => Some(data),
            ScriptElement::Op(_) => None,
        }
    }
}

/// Turns raw script bytes into script elements.
pub trait ScriptDeserializer {
    /// Deserializes `script` into its ordered elements.
    fn deserialize(&self, script: &[u8]) -> Result<Vec<ScriptElement>, ChainError>;
}

/// Address derivation and normalization.
pub trait AddressCodec {
    /// Pay-to-pubkey-hash address for a public key.
    fn address_from_public_key(&self, public_key: &[u8]) -> Result<String, ChainError>;

    /// Decodes and re-encodes `address` for the codec's network.
    fn reencode(&self, address: &str) -> Result<String, ChainError>;
}

/// A transaction input as handed over by the chain indexer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxInput {
    /// Raw signature script, hex-encoded on the wire.
    #[serde(with = "hex::serde")]
    pub script: Vec<u8>,
    /// Remaining indexer fields, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TxInput {
    /// An input with only a signature script.
    pub fn from_script(script: impl Into<Vec<u8>>) -> Self {
        Self {
            script: script.into(),
            extra: Map::new(),
        }
    }
}
