//! Price command implementations.

use bns_consensus::{NamespaceParams, PriceUnits, PricingEngine};
use serde_json::json;

use crate::context::Context;
use crate::output::{format_json, read_file};

pub fn run_name(
    ctx: &Context,
    name: String,
    namespace_path: String,
    block: u64,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = read_file(&namespace_path)?;
    let params: NamespaceParams = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse namespace parameters: {}", e))?;

    let engine = PricingEngine::new(ctx.config.cost_units, &ctx.config.epochs);
    let price = engine.price_name(&name, &params, block);

    if json {
        let report = json!({
            "name": name,
            "namespace_id": params.namespace_id(),
            "block": block,
            "amount": price.amount,
            "units": price.units,
        });
        println!("{}", format_json(&report));
    } else {
        println!("{}.{}: {}", name, params.namespace_id(), price);
    }

    Ok(())
}

pub fn run_namespace(
    ctx: &Context,
    namespace_id: String,
    block: u64,
    units: String,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let units: PriceUnits = units
        .parse()
        .map_err(|e| format!("Invalid units: {}", e))?;

    let engine = PricingEngine::new(ctx.config.cost_units, &ctx.config.epochs);
    let price = engine
        .price_namespace(&namespace_id, block, units)
        .ok_or_else(|| {
            format!(
                "No {} namespace price for '{}' at block {}",
                units, namespace_id, block
            )
        })?;

    if json {
        let report = json!({
            "namespace_id": namespace_id,
            "block": block,
            "amount": price.amount,
            "units": price.units,
        });
        println!("{}", format_json(&report));
    } else {
        println!("{}: {}", namespace_id, price);
    }

    Ok(())
}
