//! Epoch-dependent price tables.
//!
//! Protocol upgrades reprice names and namespaces at fixed block heights
//! without touching the base pricing formula. An [`EpochSchedule`] answers
//! the two questions the pricing engine asks of an epoch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::pricing::PriceUnits;
use crate::validation::ConfigError;

/// Namespace entry that applies to every namespace without its own entry.
pub const WILDCARD_NAMESPACE: &str = "*";

const SATOSHIS_PER_BTC: f64 = 100_000_000.0;

/// Source of epoch multipliers and namespace price tables.
pub trait EpochSchedule {
    /// Multiplier applied to a name price at `block_height`.
    fn price_multiplier(&self, block_height: u64, namespace_id: &str, units: PriceUnits) -> f64;

    /// Namespace prices indexed by namespace-ID length, or `None` if the
    /// epoch at `block_height` has no table for `units`.
    fn namespace_prices(&self, block_height: u64, units: PriceUnits) -> Option<&[f64]>;
}

/// Per-namespace settings inside one epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceEpoch {
    /// Name price multiplier per unit domain.
    pub price_multiplier: BTreeMap<PriceUnits, f64>,
}

/// One epoch of the schedule, in force for heights below `end_block`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Epoch {
    /// First block height no longer covered by this epoch.
    pub end_block: u64,
    /// Settings keyed by namespace ID or [`WILDCARD_NAMESPACE`].
    pub namespaces: BTreeMap<String, NamespaceEpoch>,
    /// Namespace prices per unit domain, indexed by namespace-ID length.
    #[serde(default)]
    pub namespace_prices: BTreeMap<PriceUnits, Vec<f64>>,
}

impl Epoch {
    fn multiplier(&self, namespace_id: &str, units: PriceUnits) -> f64 {
        self.namespaces
            .get(namespace_id)
            .and_then(|ns| ns.price_multiplier.get(&units))
            .or_else(|| {
                self.namespaces
                    .get(WILDCARD_NAMESPACE)
                    .and_then(|ns| ns.price_multiplier.get(&units))
            })
            .copied()
            // validate() guarantees the wildcard entry covers every unit domain
            .unwrap_or(1.0)
    }
}

/// Ordered list of epochs loaded from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpochTable {
    epochs: Vec<Epoch>,
}

impl EpochTable {
    /// Builds and validates a schedule.
    pub fn new(epochs: Vec<Epoch>) -> Result<Self, ConfigError> {
        let table = Self { epochs };
        table.validate()?;
        Ok(table)
    }

    /// The epochs, in order.
    pub fn epochs(&self) -> &[Epoch] {
        &self.epochs
    }

    /// Checks the invariants lookups rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.epochs.is_empty() {
            return Err(ConfigError::Epochs("at least one epoch is required".into()));
        }

        for pair in self.epochs.windows(2) {
            if pair[1].end_block <= pair[0].end_block {
                return Err(ConfigError::Epochs(format!(
                    "end_block {} does not follow {}",
                    pair[1].end_block, pair[0].end_block
                )));
            }
        }

        for (idx, epoch) in self.epochs.iter().enumerate() {
            let wildcard = epoch.namespaces.get(WILDCARD_NAMESPACE).ok_or_else(|| {
                ConfigError::Epochs(format!("epoch {} has no '*' namespace entry", idx))
            })?;
            for units in [PriceUnits::Btc, PriceUnits::Stacks] {
                if !wildcard.price_multiplier.contains_key(&units) {
                    return Err(ConfigError::Epochs(format!(
                        "epoch {} has no '*' multiplier for {}",
                        idx, units
                    )));
                }
            }
            let multipliers = epoch
                .namespaces
                .values()
                .flat_map(|ns| ns.price_multiplier.values());
            let prices = epoch.namespace_prices.values().flatten();
            if multipliers.chain(prices).any(|v| !v.is_finite() || *v < 0.0) {
                return Err(ConfigError::Epochs(format!(
                    "epoch {} has a negative or non-finite value",
                    idx
                )));
            }
        }

        Ok(())
    }

    /// The epoch in force at `block_height`; `None` only for an empty table.
    pub fn epoch_at(&self, block_height: u64) -> Option<&Epoch> {
        let epoch = self
            .epochs
            .iter()
            .find(|epoch| block_height < epoch.end_block)
            .or_else(|| self.epochs.last());
        log::debug!(
            "block {} falls in epoch ending at {:?}",
            block_height,
            epoch.map(|e| e.end_block)
        );
        epoch
    }
}

impl EpochSchedule for EpochTable {
    fn price_multiplier(&self, block_height: u64, namespace_id: &str, units: PriceUnits) -> f64 {
        self.epoch_at(block_height)
            .map_or(1.0, |epoch| epoch.multiplier(namespace_id, units))
    }

    fn namespace_prices(&self, block_height: u64, units: PriceUnits) -> Option<&[f64]> {
        self.epoch_at(block_height)?
            .namespace_prices
            .get(&units)
            .map(Vec::as_slice)
    }
}

/// Default namespace prices in satoshis, indexed by namespace-ID length.
pub fn default_btc_namespace_prices() -> Vec<f64> {
    let one = 400.0 * SATOSHIS_PER_BTC;
    let two_three = 40.0 * SATOSHIS_PER_BTC;
    let four_to_seven = 4.0 * SATOSHIS_PER_BTC;
    let eight_up = SATOSHIS_PER_BTC * 4.0 / 10.0;

    let mut prices = vec![one, one, two_three, two_three];
    prices.extend(std::iter::repeat(four_to_seven).take(4));
    prices.extend(std::iter::repeat(eight_up).take(12));
    prices
}

impl Default for EpochTable {
    fn default() -> Self {
        let mut namespaces = BTreeMap::new();
        namespaces.insert(
            WILDCARD_NAMESPACE.to_string(),
            NamespaceEpoch {
                price_multiplier: BTreeMap::from([(PriceUnits::Btc, 1.0), (PriceUnits::Stacks, 0.0)]),
            },
        );
        let namespace_prices = BTreeMap::from([(PriceUnits::Btc, default_btc_namespace_prices())]);
        Self {
            epochs: vec![Epoch {
                end_block: u64::MAX,
                namespaces,
                namespace_prices,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wildcard(btc: f64, stacks: f64) -> BTreeMap<String, NamespaceEpoch> {
        BTreeMap::from([(
            WILDCARD_NAMESPACE.to_string(),
            NamespaceEpoch {
                price_multiplier: BTreeMap::from([(PriceUnits::Btc, btc), (PriceUnits::Stacks, stacks)]),
            },
        )])
    }

    fn two_epochs() -> EpochTable {
        let mut second = wildcard(0.5, 1.0);
        second.insert(
            "id".to_string(),
            NamespaceEpoch {
                price_multiplier: BTreeMap::from([(PriceUnits::Btc, 0.25)]),
            },
        );
        EpochTable::new(vec![
            Epoch {
                end_block: 1000,
                namespaces: wildcard(1.0, 0.0),
                namespace_prices: BTreeMap::from([(PriceUnits::Btc, vec![0.0, 10.0, 5.0])]),
            },
            Epoch {
                end_block: 2000,
                namespaces: second,
                namespace_prices: BTreeMap::from([(PriceUnits::Stacks, vec![0.0, 7.0])]),
            },
        ])
        .unwrap()
    }

    #[test]
    fn default_table_covers_every_namespace_length() {
        let table = EpochTable::default();
        table.validate().unwrap();
        let prices = table.namespace_prices(500_000, PriceUnits::Btc).unwrap();
        assert_eq!(prices.len(), 20);
        assert_eq!(prices[1], 40_000_000_000.0);
        assert_eq!(prices[3], 4_000_000_000.0);
        assert_eq!(prices[7], 400_000_000.0);
        assert_eq!(prices[19], 40_000_000.0);
        assert!(table.namespace_prices(500_000, PriceUnits::Stacks).is_none());
    }

    #[test]
    fn epoch_selection_by_end_block() {
        let table = two_epochs();
        assert_eq!(table.epoch_at(0).unwrap().end_block, 1000);
        assert_eq!(table.epoch_at(999).unwrap().end_block, 1000);
        assert_eq!(table.epoch_at(1000).unwrap().end_block, 2000);
        // Past the end, the last epoch stays in force.
        assert_eq!(table.epoch_at(5000).unwrap().end_block, 2000);
    }

    #[test]
    fn multiplier_falls_back_to_wildcard() {
        let table = two_epochs();
        assert_eq!(table.price_multiplier(10, "id", PriceUnits::Btc), 1.0);
        assert_eq!(table.price_multiplier(1500, "id", PriceUnits::Btc), 0.25);
        assert_eq!(table.price_multiplier(1500, "id", PriceUnits::Stacks), 1.0);
        assert_eq!(table.price_multiplier(1500, "btc", PriceUnits::Btc), 0.5);
    }

    #[test]
    fn missing_wildcard_is_rejected() {
        let err = EpochTable::new(vec![Epoch {
            end_block: 10,
            namespaces: BTreeMap::new(),
            namespace_prices: BTreeMap::new(),
        }])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Epochs(_)));
    }

    #[test]
    fn unordered_epochs_are_rejected() {
        let epoch = |end_block| Epoch {
            end_block,
            namespaces: wildcard(1.0, 1.0),
            namespace_prices: BTreeMap::new(),
        };
        assert!(EpochTable::new(vec![epoch(10), epoch(10)]).is_err());
        assert!(EpochTable::new(vec![]).is_err());
    }

    #[test]
    fn deserializes_from_json() {
        let table: EpochTable = serde_json::from_str(
            r#"[{"end_block": 100,
                 "namespaces": {"*": {"price_multiplier": {"BTC": 1.0, "STACKS": 0.0}}},
                 "namespace_prices": {"BTC": [0.0, 3.0]}}]"#,
        )
        .unwrap();
        table.validate().unwrap();
        assert_eq!(table.namespace_prices(1, PriceUnits::Btc), Some(&[0.0, 3.0][..]));
    }
}
