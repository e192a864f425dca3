//! Admission checks for untrusted field values.
//!
//! Values arrive as JSON from the operation parser or the API boundary. Each
//! check is a total predicate: a value of the wrong JSON type is rejected, never
//! coerced.

use regex::Regex;
use serde_json::Value;

use crate::chain::AddressCodec;
use crate::config::NetworkParams;
use crate::grammar::{compile_prefix, Grammar};

/// Minimum length of an address string.
pub const ADDRESS_MIN_LENGTH: usize = 26;
/// Maximum length of an address string.
pub const ADDRESS_MAX_LENGTH: usize = 35;

/// Integral JSON numbers only; floats and every other type yield `None`.
fn integral(value: &Value) -> Option<i128> {
    value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
}

/// Admission gate over field values.
pub struct FieldChecker<'a, A: AddressCodec + ?Sized> {
    grammar: &'a Grammar,
    network: &'a NetworkParams,
    codec: &'a A,
}

impl<'a, A: AddressCodec + ?Sized> FieldChecker<'a, A> {
    /// Creates a checker bound to one grammar, network and address codec.
    pub fn new(grammar: &'a Grammar, network: &'a NetworkParams, codec: &'a A) -> Self {
        Self {
            grammar,
            network,
            codec,
        }
    }

    /// The grammar names are checked against.
    pub fn grammar(&self) -> &Grammar {
        self.grammar
    }

    /// A fully-qualified name.
    pub fn check_name(&self, value: &Value) -> bool {
        value
            .as_str()
            .map(|s| self.grammar.name_is_valid(s))
            .unwrap_or(false)
    }

    /// A namespace ID.
    pub fn check_namespace(&self, value: &Value) -> bool {
        value
            .as_str()
            .map(|s| self.grammar.namespace_is_valid(s))
            .unwrap_or(false)
    }

    /// A fully-qualified subdomain.
    pub fn check_subdomain(&self, value: &Value) -> bool {
        value
            .as_str()
            .map(|s| self.grammar.is_subdomain(s))
            .unwrap_or(false)
    }

    /// The native token literal or a namespace ID.
    pub fn check_token_type(&self, value: &Value) -> bool {
        check_string_with(
            value,
            Some(1),
            Some(self.grammar.max_namespace_id_length()),
            Some(self.grammar.token_type_pattern()),
        )
    }

    /// A block height: positive in test mode, otherwise at or past the first
    /// mainnet block; never past the sanity ceiling.
    pub fn check_block(&self, value: &Value) -> bool {
        let block = match integral(value) {
            Some(block) => block,
            None => return false,
        };

        if self.network.test_mode {
            if block <= 0 {
                return false;
            }
        } else if block < i128::from(self.network.first_block_mainnet) {
            log::debug!("block {} precedes the first mainnet block", block);
            return false;
        }

        block <= i128::from(self.network.max_block_height)
    }

    /// An address: fixed length bounds and shape, and re-encodable.
    pub fn check_address(&self, value: &Value) -> bool {
        if !check_string_with(
            value,
            Some(ADDRESS_MIN_LENGTH),
            Some(ADDRESS_MAX_LENGTH),
            Some(self.grammar.address_pattern()),
        ) {
            return false;
        }

        let address = value.as_str().unwrap_or_default();
        match self.codec.reencode(address) {
            Ok(_) => true,
            Err(e) => {
                log::debug!("address {} does not re-encode: {}", address, e);
                false
            }
        }
    }
}

/// A non-negative integer, at most `max_value` when one is given.
///
/// A `max_value` of zero means no bound.
pub fn check_offset(value: &Value, max_value: Option<u64>) -> bool {
    check_non_negative(value, max_value)
}

/// A non-negative integer (zero included), at most `max_value` when one is
/// given. A `max_value` of zero means no bound.
pub fn check_count(value: &Value, max_value: Option<u64>) -> bool {
    check_non_negative(value, max_value)
}

fn check_non_negative(value: &Value, max_value: Option<u64>) -> bool {
    let n = match integral(value) {
        Some(n) => n,
        None => return false,
    };
    if n < 0 {
        return false;
    }
    match max_value.filter(|max| *max != 0) {
        Some(max) => n <= i128::from(max),
        None => true,
    }
}

/// A string within the given length bounds whose start matches `pattern`.
///
/// Bounds of zero are treated as absent and lengths count characters. The
/// pattern is anchored at the start only. An invalid pattern rejects the value.
pub fn check_string(
    value: &Value,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<&str>,
) -> bool {
    let compiled = match pattern.map(|p| compile_prefix("pattern", p)).transpose() {
        Ok(compiled) => compiled,
        Err(e) => {
            log::debug!("rejecting value against unusable pattern: {}", e);
            return false;
        }
    };
    check_string_with(value, min_length, max_length, compiled.as_ref())
}

fn check_string_with(
    value: &Value,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<&Regex>,
) -> bool {
    let s = match value.as_str() {
        Some(s) => s,
        None => return false,
    };
    let len = s.chars().count();

    if let Some(min) = min_length.filter(|m| *m != 0) {
        if len < min {
            return false;
        }
    }
    if let Some(max) = max_length.filter(|m| *m != 0) {
        if len > max {
            return false;
        }
    }
    if let Some(re) = pattern {
        if !re.is_match(s) {
            return false;
        }
    }

    true
}
