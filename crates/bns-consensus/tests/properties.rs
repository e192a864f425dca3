//! Property tests for the grammar and pricing invariants.

use bns_consensus::{
    is_b40, namespace_of, ConsensusConfig, CostUnits, EpochTable, Grammar, NamespaceParams,
    NamespaceVersion, PricingEngine,
};
use proptest::prelude::*;

fn grammar() -> Grammar {
    Grammar::new(&ConsensusConfig::default()).unwrap()
}

fn reference_name_is_valid(g: &Grammar, s: &str) -> bool {
    if s.matches('.').count() != 1 {
        return false;
    }
    let (name, ns) = s.split_once('.').unwrap();
    !name.is_empty()
        && !ns.is_empty()
        && is_b40(name)
        && !name.contains('+')
        && g.namespace_is_valid(ns)
        && s.chars().count() <= g.max_name_length()
}

proptest! {
    #[test]
    fn name_validity_matches_definition(s in "[a-z0-9+_.A-Z -]{0,45}") {
        let g = grammar();
        prop_assert_eq!(g.name_is_valid(&s), reference_name_is_valid(&g, &s));
    }

    #[test]
    fn namespace_of_never_contains_a_dot(s in "[a-z.]{0,30}") {
        prop_assert!(!namespace_of(&s).contains('.'));
    }

    #[test]
    fn subdomains_always_have_two_dots(s in "[a-z.]{0,40}") {
        if grammar().is_subdomain(&s) {
            prop_assert_eq!(s.matches('.').count(), 2);
        }
    }

    #[test]
    fn price_never_below_cost_unit(
        name in "[a-z0-9_-]{1,40}",
        base in any::<u8>(),
        coeff in any::<u8>(),
        buckets in prop::collection::vec(0u8..=15, 1..16),
        no_vowel in 1.0f64..16.0,
        nonalpha in 1.0f64..16.0,
    ) {
        let table = EpochTable::default();
        let engine = PricingEngine::new(CostUnits::default(), &table);
        let ns = NamespaceParams::new(
            NamespaceVersion::PayToBurn,
            base,
            coeff,
            buckets,
            no_vowel,
            nonalpha,
            "id",
        )
        .unwrap();
        let price = engine.price_name(&name, &ns, 400_000);
        prop_assert!(price.amount >= CostUnits::default().btc);
    }

    #[test]
    fn long_names_use_last_bucket(
        buckets in prop::collection::vec(0u8..=15, 1..16),
        extra in 0usize..20,
    ) {
        let last = *buckets.last().unwrap();
        let len = buckets.len() + extra;
        let ns = NamespaceParams::new(NamespaceVersion::PayToBurn, 2, 1, buckets, 1.0, 1.0, "id")
            .unwrap();
        prop_assert_eq!(ns.bucket_exponent(len), last);
    }
}
