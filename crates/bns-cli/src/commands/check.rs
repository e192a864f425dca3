//! Check command implementation.

use bns_chain::{BitcoinAddresses, Network};
use bns_consensus::{check_count, check_offset, FieldChecker};
use serde_json::{json, Value};

use crate::context::Context;
use crate::output::{format_json, format_verdict_row};

/// Field kinds the check command admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FieldKind {
    Name,
    Namespace,
    Subdomain,
    TokenType,
    Address,
    Block,
    Offset,
    Count,
}

impl FieldKind {
    fn label(self) -> &'static str {
        match self {
            FieldKind::Name => "name",
            FieldKind::Namespace => "namespace",
            FieldKind::Subdomain => "subdomain",
            FieldKind::TokenType => "token-type",
            FieldKind::Address => "address",
            FieldKind::Block => "block",
            FieldKind::Offset => "offset",
            FieldKind::Count => "count",
        }
    }

    fn is_integral(self) -> bool {
        matches!(self, FieldKind::Block | FieldKind::Offset | FieldKind::Count)
    }
}

/// Integral kinds take the argument as a JSON literal so `12` is a number
/// and `12.5` or `"12"` are not integers. Other kinds take it verbatim.
fn field_value(kind: FieldKind, raw: &str) -> Value {
    if kind.is_integral() {
        serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
    } else {
        Value::String(raw.to_string())
    }
}

pub fn run(
    ctx: &Context,
    kind: FieldKind,
    raw: String,
    max: Option<u64>,
    strict: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let network = if ctx.config.network.test_mode {
        Network::Testnet
    } else {
        Network::Mainnet
    };
    let codec = BitcoinAddresses::new(network);
    let checker = FieldChecker::new(&ctx.grammar, &ctx.config.network, &codec);

    let value = field_value(kind, &raw);
    let accepted = match kind {
        FieldKind::Name => checker.check_name(&value),
        FieldKind::Namespace => checker.check_namespace(&value),
        FieldKind::Subdomain => checker.check_subdomain(&value),
        FieldKind::TokenType => checker.check_token_type(&value),
        FieldKind::Address => checker.check_address(&value),
        FieldKind::Block => checker.check_block(&value),
        FieldKind::Offset => check_offset(&value, max),
        FieldKind::Count => check_count(&value, max),
    };
    let reason = if accepted {
        None
    } else {
        Some(rejection_reason(ctx, kind, &raw))
    };

    if json {
        let report = json!({
            "kind": kind.label(),
            "value": value,
            "accepted": accepted,
            "reason": reason,
        });
        println!("{}", format_json(&report));
    } else {
        println!("{}", format_verdict_row(kind.label(), &raw, accepted, reason.as_deref()));
    }

    if strict && !accepted {
        std::process::exit(1);
    }

    Ok(())
}

fn rejection_reason(ctx: &Context, kind: FieldKind, raw: &str) -> String {
    let grammar_error = match kind {
        FieldKind::Name => ctx.grammar.parse_name(raw).err(),
        FieldKind::Namespace => ctx.grammar.parse_namespace(raw).err(),
        FieldKind::Subdomain => ctx.grammar.parse_subdomain(raw).err(),
        _ => None,
    };
    if let Some(e) = grammar_error {
        return e.to_string();
    }

    match kind {
        FieldKind::Block if ctx.config.network.test_mode => format!(
            "block must be an integer in 1..={}",
            ctx.config.network.max_block_height
        ),
        FieldKind::Block => format!(
            "block must be an integer in {}..={}",
            ctx.config.network.first_block_mainnet, ctx.config.network.max_block_height
        ),
        FieldKind::Offset | FieldKind::Count => {
            format!("{} must be a non-negative integer within bounds", kind.label())
        }
        FieldKind::Address => "not a well-formed address for this network".to_string(),
        FieldKind::TokenType => "not the native token or a namespace ID".to_string(),
        _ => format!("invalid {}", kind.label()),
    }
}
