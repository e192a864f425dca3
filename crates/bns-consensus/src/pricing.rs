//! Name and namespace pricing.
//!
//! The formula is consensus-critical: every node must derive bit-identical
//! prices. Operation order is fixed as
//! `((coeff * base^exponent) / discount) * cost_unit`, floored at
//! `cost_unit`, then scaled by the epoch multiplier. Do not reassociate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::alphabet::{NONALPHA, VOWELS};
use crate::config::CostUnits;
use crate::epochs::EpochSchedule;
use crate::validation::ValidationError;

/// Largest bucket exponent; with one-byte `base` and `coeff` this keeps
/// `coeff * base^exponent` within `u128`.
pub const MAX_BUCKET_EXPONENT: u8 = 15;

/// Settlement unit domain a price is denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriceUnits {
    /// Native chain unit (satoshis).
    #[serde(rename = "BTC")]
    Btc,
    /// Secondary token unit.
    #[serde(rename = "STACKS")]
    Stacks,
}

impl fmt::Display for PriceUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceUnits::Btc => f.write_str("BTC"),
            PriceUnits::Stacks => f.write_str("STACKS"),
        }
    }
}

impl FromStr for PriceUnits {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BTC" => Ok(PriceUnits::Btc),
            "STACKS" => Ok(PriceUnits::Stacks),
            other => Err(ValidationError::PatternMismatch {
                field: "units",
                value: other.to_string(),
            }),
        }
    }
}

/// How a namespace's names are paid for, by protocol number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum NamespaceVersion {
    /// Name fees are burned (native unit).
    PayToBurn,
    /// Name fees go to the namespace creator (native unit).
    PayToCreator,
    /// Name fees are paid in the secondary token.
    PayWithStacks,
}

impl NamespaceVersion {
    /// Unit domain names in this namespace are priced in.
    pub fn units(self) -> PriceUnits {
        match self {
            NamespaceVersion::PayWithStacks => PriceUnits::Stacks,
            NamespaceVersion::PayToBurn | NamespaceVersion::PayToCreator => PriceUnits::Btc,
        }
    }
}

impl TryFrom<u16> for NamespaceVersion {
    type Error = ValidationError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(NamespaceVersion::PayToBurn),
            2 => Ok(NamespaceVersion::PayToCreator),
            3 => Ok(NamespaceVersion::PayWithStacks),
            other => Err(ValidationError::PatternMismatch {
                field: "version",
                value: other.to_string(),
            }),
        }
    }
}

impl From<NamespaceVersion> for u16 {
    fn from(version: NamespaceVersion) -> Self {
        match version {
            NamespaceVersion::PayToBurn => 1,
            NamespaceVersion::PayToCreator => 2,
            NamespaceVersion::PayWithStacks => 3,
        }
    }
}

#[derive(Deserialize)]
struct RawNamespaceParams {
    version: NamespaceVersion,
    base: u8,
    coeff: u8,
    buckets: Vec<u8>,
    no_vowel_discount: f64,
    nonalpha_discount: f64,
    namespace_id: String,
}

impl TryFrom<RawNamespaceParams> for NamespaceParams {
    type Error = ValidationError;

    fn try_from(raw: RawNamespaceParams) -> Result<Self, Self::Error> {
        NamespaceParams::new(
            raw.version,
            raw.base,
            raw.coeff,
            raw.buckets,
            raw.no_vowel_discount,
            raw.nonalpha_discount,
            raw.namespace_id,
        )
    }
}

/// Pricing parameters revealed with a namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNamespaceParams")]
pub struct NamespaceParams {
    version: NamespaceVersion,
    base: u8,
    coeff: u8,
    buckets: Vec<u8>,
    no_vowel_discount: f64,
    nonalpha_discount: f64,
    namespace_id: String,
}

impl NamespaceParams {
    /// Validates and builds namespace parameters.
    ///
    /// `buckets` must be non-empty with every exponent at most
    /// [`MAX_BUCKET_EXPONENT`]; both discounts must be finite and `>= 1.0`.
    pub fn new(
        version: NamespaceVersion,
        base: u8,
        coeff: u8,
        buckets: Vec<u8>,
        no_vowel_discount: f64,
        nonalpha_discount: f64,
        namespace_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if buckets.is_empty() {
            return Err(ValidationError::OutOfBounds {
                field: "buckets",
                value: 0,
            });
        }
        if let Some(exp) = buckets.iter().find(|e| **e > MAX_BUCKET_EXPONENT) {
            return Err(ValidationError::OutOfBounds {
                field: "bucket_exponent",
                value: usize::from(*exp),
            });
        }
        for (field, discount) in [
            ("no_vowel_discount", no_vowel_discount),
            ("nonalpha_discount", nonalpha_discount),
        ] {
            if !discount.is_finite() || discount < 1.0 {
                return Err(ValidationError::PatternMismatch {
                    field,
                    value: discount.to_string(),
                });
            }
        }
        Ok(Self {
            version,
            base,
            coeff,
            buckets,
            no_vowel_discount,
            nonalpha_discount,
            namespace_id: namespace_id.into(),
        })
    }

    /// Payment version.
    pub fn version(&self) -> NamespaceVersion {
        self.version
    }

    /// Price radix.
    pub fn base(&self) -> u8 {
        self.base
    }

    /// Price coefficient.
    pub fn coeff(&self) -> u8 {
        self.coeff
    }

    /// Exponents by name length; never empty.
    pub fn buckets(&self) -> &[u8] {
        &self.buckets
    }

    /// Discount for names without vowels.
    pub fn no_vowel_discount(&self) -> f64 {
        self.no_vowel_discount
    }

    /// Discount for names with digits, `-` or `_`.
    pub fn nonalpha_discount(&self) -> f64 {
        self.nonalpha_discount
    }

    /// Namespace these parameters belong to.
    pub fn namespace_id(&self) -> &str {
        &self.namespace_id
    }

    /// Exponent for a name of `name_len` characters: `buckets[name_len - 1]`
    /// when in range, otherwise the last bucket.
    pub fn bucket_exponent(&self, name_len: usize) -> u8 {
        let last = self.buckets[self.buckets.len() - 1];
        name_len
            .checked_sub(1)
            .and_then(|idx| self.buckets.get(idx))
            .copied()
            .unwrap_or(last)
    }
}

/// A non-negative amount in one unit domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the smallest denomination of `units`.
    pub amount: f64,
    /// Unit domain.
    pub units: PriceUnits,
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.units)
    }
}

/// Discount factor for `name`: the larger of the applicable discounts, never
/// below 1.0. Discounts do not compound.
pub fn name_discount(name: &str, namespace: &NamespaceParams) -> f64 {
    let mut discount = 1.0_f64;

    let has_vowel = name
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .any(|c| VOWELS.contains(&c));
    if !has_vowel {
        discount = discount.max(namespace.no_vowel_discount);
    }

    let has_nonalpha = name
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .any(|c| NONALPHA.contains(&c));
    if has_nonalpha {
        discount = discount.max(namespace.nonalpha_discount);
    }

    discount
}

/// Computes name and namespace prices against an epoch schedule.
pub struct PricingEngine<'a, E: EpochSchedule + ?Sized> {
    cost_units: CostUnits,
    epochs: &'a E,
}

impl<'a, E: EpochSchedule + ?Sized> PricingEngine<'a, E> {
    /// Creates an engine over the configured cost units and schedule.
    pub fn new(cost_units: CostUnits, epochs: &'a E) -> Self {
        Self { cost_units, epochs }
    }

    /// Price of `name` (without its namespace ID) in `namespace` at `block_height`.
    ///
    /// The result is never below `cost_unit * multiplier`.
    pub fn price_name(&self, name: &str, namespace: &NamespaceParams, block_height: u64) -> Price {
        let units = namespace.version.units();
        let cost_unit = self.cost_units.for_units(units);

        let exponent = namespace.bucket_exponent(name.chars().count());
        let discount = name_discount(name, namespace);

        // Exact integer, rounded to f64 once.
        let raw = u128::from(namespace.coeff) * u128::from(namespace.base).pow(u32::from(exponent));

        let mut price = (raw as f64 / discount) * cost_unit;
        if price < cost_unit {
            price = cost_unit;
        }

        let multiplier = self
            .epochs
            .price_multiplier(block_height, &namespace.namespace_id, units);
        Price {
            amount: price * multiplier,
            units,
        }
    }

    /// Price of a namespace ID at `block_height`, a function of its length only.
    ///
    /// `None` if the epoch has no table for `units`, or the ID is empty or
    /// not shorter than the table.
    pub fn price_namespace(
        &self,
        namespace_id: &str,
        block_height: u64,
        units: PriceUnits,
    ) -> Option<Price> {
        let table = self.epochs.namespace_prices(block_height, units)?;
        let len = namespace_id.chars().count();
        if len == 0 || len >= table.len() {
            return None;
        }
        Some(Price {
            amount: table[len],
            units,
        })
    }
}
