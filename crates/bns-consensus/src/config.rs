//! Consensus configuration: length limits, patterns, cost units, network
//! parameters and the epoch table.
//!
//! A [`ConsensusConfig`] is loaded once at startup and never mutated. Every
//! other component borrows it (or a [`Grammar`](crate::Grammar) compiled from
//! it) explicitly.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::epochs::EpochTable;
use crate::pricing::PriceUnits;
use crate::validation::ConfigError;
use crate::Grammar;

/// Length limits for names and namespace IDs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lengths {
    /// Maximum length of a fully-qualified name, separator included.
    pub max_name_length: usize,
    /// Maximum length of a namespace ID.
    pub max_namespace_id_length: usize,
}

impl Default for Lengths {
    fn default() -> Self {
        Self {
            max_name_length: 37,
            max_namespace_id_length: 19,
        }
    }
}

/// Fixed patterns used by the grammar and the field checkers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Patterns {
    /// Namespace ID pattern, also admitted as a token type.
    pub namespace: String,
    /// Two-group pattern capturing `(subdomain_name, domain)`.
    pub subdomain: String,
    /// Address shape pattern.
    pub address: String,
    /// Literal naming the native settlement token.
    pub native_token: String,
}

impl Default for Patterns {
    fn default() -> Self {
        Self {
            namespace: r"^([a-z0-9\-_]{1,19})$".to_string(),
            subdomain: r"^([a-z0-9\-_+]{1,37})\.([a-z0-9\-_.+]{3,37})$".to_string(),
            address: r"^([123mn][1-9A-HJ-NP-Za-km-z]{25,34})$".to_string(),
            native_token: "STACKS".to_string(),
        }
    }
}

/// Minimum price of a name, per unit domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostUnits {
    /// Cost unit for names priced in the native unit (satoshis).
    pub btc: f64,
    /// Cost unit for names priced in the secondary unit.
    pub stacks: f64,
}

impl CostUnits {
    /// Cost unit for the given unit domain.
    pub fn for_units(&self, units: PriceUnits) -> f64 {
        match units {
            PriceUnits::Btc => self.btc,
            PriceUnits::Stacks => self.stacks,
        }
    }
}

impl Default for CostUnits {
    fn default() -> Self {
        Self {
            btc: 100.0,
            stacks: 1000.0,
        }
    }
}

/// Network parameters consulted by the block checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkParams {
    /// Height of the first block the naming system processes on mainnet.
    pub first_block_mainnet: u64,
    /// Sanity ceiling for block heights.
    pub max_block_height: u64,
    /// Test/debug mode: any positive block height is admitted.
    pub test_mode: bool,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self {
            first_block_mainnet: 373_601,
            max_block_height: 10_000_000,
            test_mode: false,
        }
    }
}

/// Complete consensus configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusConfig {
    /// Length limits.
    pub lengths: Lengths,
    /// Fixed patterns.
    pub patterns: Patterns,
    /// Cost units per unit domain.
    pub cost_units: CostUnits,
    /// Network parameters.
    pub network: NetworkParams,
    /// Epoch-dependent price tables.
    pub epochs: EpochTable,
}

impl ConsensusConfig {
    /// Parses and validates a configuration from JSON. Missing sections take
    /// their mainnet defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ConsensusConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Returns a copy with test mode switched on or off.
    pub fn with_test_mode(mut self, test_mode: bool) -> Self {
        self.network.test_mode = test_mode;
        self
    }

    /// Checks every invariant a consumer of this configuration relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lengths.max_name_length == 0 || self.lengths.max_namespace_id_length == 0 {
            return Err(ConfigError::Invalid(
                "length limits must be positive".to_string(),
            ));
        }
        for (label, unit) in [("btc", self.cost_units.btc), ("stacks", self.cost_units.stacks)] {
            if !unit.is_finite() || unit < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "cost unit {} must be finite and non-negative",
                    label
                )));
            }
        }
        if self.network.max_block_height < self.network.first_block_mainnet {
            return Err(ConfigError::Invalid(
                "max_block_height is below first_block_mainnet".to_string(),
            ));
        }
        self.epochs.validate()?;
        Grammar::new(self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_mainnet_defaults() {
        let config = ConsensusConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ConsensusConfig::default());
        assert!(!config.network.test_mode);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = ConsensusConfig::from_json_str(
            r#"{"network": {"test_mode": true}, "lengths": {"max_name_length": 40}}"#,
        )
        .unwrap();
        assert!(config.network.test_mode);
        assert_eq!(config.network.first_block_mainnet, 373_601);
        assert_eq!(config.lengths.max_name_length, 40);
        assert_eq!(config.lengths.max_namespace_id_length, 19);
    }

    #[test]
    fn bad_pattern_is_rejected_at_load() {
        let err = ConsensusConfig::from_json_str(r#"{"patterns": {"address": "^([a-z"}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Pattern { field: "address", .. }));
    }

    #[test]
    fn negative_cost_unit_is_rejected() {
        let err = ConsensusConfig::from_json_str(r#"{"cost_units": {"btc": -1.0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("consensus.json");
        std::fs::write(&path, r#"{"network": {"first_block_mainnet": 100}}"#).unwrap();
        let config = ConsensusConfig::from_path(&path).unwrap();
        assert_eq!(config.network.first_block_mainnet, 100);
    }
}
