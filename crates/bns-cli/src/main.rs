//! BNS CLI - Command-line interface for name checks, pricing and extraction.

use clap::{Parser, Subcommand};

mod commands;
mod context;
mod output;

use commands::{check, find_ops, price, pubkey};

#[derive(Parser)]
#[command(name = "bns")]
#[command(about = "BNS name admission, pricing and transaction field extraction CLI")]
struct Cli {
    /// Consensus configuration file (JSON); mainnet defaults otherwise
    #[arg(long, global = true)]
    config: Option<String>,
    /// Admit test-network block heights
    #[arg(long, global = true)]
    test_mode: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a field value against its admission rules
    Check {
        /// Kind of field
        #[arg(value_enum)]
        kind: check::FieldKind,
        /// Value to check
        value: String,
        /// Upper bound for offset and count checks
        #[arg(long)]
        max: Option<u64>,
        /// Exit with error code if the value is rejected
        #[arg(long)]
        strict: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Price a name (without its namespace ID)
    PriceName {
        /// Name part to price
        name: String,
        /// Namespace parameters file (JSON)
        #[arg(long)]
        namespace: String,
        /// Block height to price at
        #[arg(long)]
        block: u64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Price a namespace ID
    PriceNamespace {
        /// Namespace ID to price
        namespace_id: String,
        /// Block height to price at
        #[arg(long)]
        block: u64,
        /// Unit domain (BTC or STACKS)
        #[arg(long, default_value = "BTC")]
        units: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Select accepted operations by opcode
    FindOps {
        /// Operations file (JSON array)
        ops: String,
        /// Opcode name to select (repeatable)
        #[arg(long = "opcode", required = true)]
        opcodes: Vec<String>,
    },
    /// Find the public key that signed for an address
    Pubkey {
        /// Transaction inputs file (JSON array)
        inputs: String,
        /// Address of the signer
        #[arg(long)]
        address: String,
        /// Derive testnet addresses
        #[arg(long)]
        testnet: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = context::Context::load(cli.config.as_deref(), cli.test_mode).and_then(|ctx| {
        match cli.command {
            Commands::Check {
                kind,
                value,
                max,
                strict,
                json,
            } => check::run(&ctx, kind, value, max, strict, json),
            Commands::PriceName {
                name,
                namespace,
                block,
                json,
            } => price::run_name(&ctx, name, namespace, block, json),
            Commands::PriceNamespace {
                namespace_id,
                block,
                units,
                json,
            } => price::run_namespace(&ctx, namespace_id, block, units, json),
            Commands::FindOps { ops, opcodes } => find_ops::run(ops, opcodes),
            Commands::Pubkey {
                inputs,
                address,
                testnet,
            } => pubkey::run(inputs, address, testnet),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
