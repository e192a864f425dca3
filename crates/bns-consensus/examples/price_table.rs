use bns_consensus::{
    ConsensusConfig, Grammar, NamespaceParams, NamespaceVersion, PricingEngine,
};

fn main() {
    let config = ConsensusConfig::default();
    let grammar = Grammar::new(&config).expect("default config compiles");
    let namespace = NamespaceParams::new(
        NamespaceVersion::PayToBurn,
        4,
        250,
        vec![6, 5, 4, 3, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        10.0,
        10.0,
        "id",
    )
    .expect("valid namespace parameters");
    let engine = PricingEngine::new(config.cost_units, &config.epochs);

    for fqn in ["a.id", "bcd.id", "alice.id", "4lice.id", "muneeb_ali.id"] {
        match grammar.parse_name(fqn) {
            Ok(name) => {
                let price = engine.price_name(name.name_part(), &namespace, 400_000);
                println!("{:<16} {}", fqn, price);
            }
            Err(err) => {
                eprintln!("{:<16} rejected: {}", fqn, err);
            }
        }
    }
}
