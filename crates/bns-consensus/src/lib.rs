//! Consensus-critical primitives for the blockchain naming system.
//!
//! Every node replaying the chain of naming operations consults these
//! routines, so their output must be identical across implementations:
//! name and namespace grammar, name and namespace pricing, field admission
//! checks, public key extraction from transaction inputs, and opcode
//! filtering of accepted operations.
//!
//! All functions are pure over their arguments and the immutable
//! [`ConsensusConfig`] they are given.
//!
#![deny(missing_docs)]

/// The b40 alphabet.
pub mod alphabet;
/// Chain-library seams (scripts, addresses, transaction inputs).
pub mod chain;
/// Field admission checks.
pub mod checkers;
/// Consensus configuration.
pub mod config;
/// Epoch-dependent price tables.
pub mod epochs;
/// Public key extraction from transaction inputs.
pub mod extract;
/// Name, namespace and subdomain grammar.
pub mod grammar;
/// Validated name newtypes.
pub mod identifiers;
/// Opcodes and opcode filtering.
pub mod opcodes;
/// Name and namespace pricing.
pub mod pricing;
/// Error types.
pub mod validation;

pub use alphabet::{is_b40, B40_CHARS};
pub use chain::{AddressCodec, ChainError, ScriptDeserializer, ScriptElement, TxInput};
pub use checkers::{check_count, check_offset, check_string, FieldChecker};
pub use config::{ConsensusConfig, CostUnits, Lengths, NetworkParams, Patterns};
pub use epochs::{Epoch, EpochSchedule, EpochTable, NamespaceEpoch};
pub use extract::public_key_for_address;
pub use grammar::{name_part_of, namespace_of, Grammar};
pub use identifiers::{Name, NamespaceId, Subdomain};
pub use opcodes::{
    find_by_opcode, Opcode, OpcodeFilter, OpcodeResolver, OperationFilter, OperationJson,
    StandardOpcodes,
};
pub use pricing::{NamespaceParams, NamespaceVersion, Price, PriceUnits, PricingEngine};
pub use validation::{ConfigError, ValidationError};
