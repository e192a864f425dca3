//! Find-ops command implementation.

use bns_consensus::{find_by_opcode, Opcode, OperationJson, StandardOpcodes};
use serde_json::Value;

use crate::output::{format_json, read_file};

pub fn run(ops_path: String, opcode_names: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let opcodes = opcode_names
        .iter()
        .map(|name| name.parse::<Opcode>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("Invalid opcode: {}", e))?;

    let content = read_file(&ops_path)?;
    let ops: Vec<OperationJson> = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse operations: {}", e))?;

    let found = find_by_opcode(&ops, &opcodes, &StandardOpcodes);
    log::info!("{} of {} operations matched", found.len(), ops.len());

    let selected = Value::Array(found.into_iter().cloned().collect());
    println!("{}", format_json(&selected));

    Ok(())
}
