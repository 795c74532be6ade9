use std::collections::BTreeSet;

use log::warn;

use crate::grammar::{Production, RuleMap};

pub fn undefined_nonterminals(rules: &RuleMap) -> BTreeSet<&str> {
    // Take every nonterminal on a right-hand side, then keep the ones that
    // never get a definition of their own
    rules.values()
        .flatten()
        .flat_map(|production| match production {
            Production::Binary(left, right) => vec![left.as_str(), right.as_str()],
            Production::Unary(_) => Vec::new(),
        })
        .filter(|symbol| !rules.contains_key(*symbol))
        .collect()
}

// Undefined nonterminals are legal, they just never derive anything
pub fn verify_rules(rules: &RuleMap) {
    for symbol in undefined_nonterminals(rules) {
        warn!("Nonterminal `{}` is used but has no productions", symbol);
    }
}
