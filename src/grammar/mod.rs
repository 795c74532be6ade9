/*
    This module is for storing and querying grammars in Chomsky normal form
*/

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::str::FromStr;

use crate::rules::{self, Classification, MalformedRuleError};

// The base unit in a sentential form
#[derive(Debug, PartialEq, Eq, Hash, Clone, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(String),
    Nonterminal(String),
}

impl Symbol {
    pub fn text(&self) -> &str {
        match self {
            Symbol::Terminal(t) | Symbol::Nonterminal(t) => t,
        }
    }
}

/// The right-hand side of a production. A binary production rewrites to two
/// nonterminals, a unary one to a single terminal.
#[derive(Debug, PartialEq, Eq, Hash, Clone, PartialOrd, Ord)]
pub enum Production {
    Binary(String, String),
    Unary(String),
}

impl Production {
    pub fn symbols(&self) -> Vec<Symbol> {
        match self {
            Production::Binary(left, right) => vec![
                Symbol::Nonterminal(left.clone()),
                Symbol::Nonterminal(right.clone()),
            ],
            Production::Unary(terminal) => vec![Symbol::Terminal(terminal.clone())],
        }
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // Single character names are written in the compact form
            Production::Binary(left, right)
                if left.chars().count() == 1 && right.chars().count() == 1 =>
            {
                write!(f, "{}{}", left, right)
            }
            Production::Binary(left, right) => write!(f, "{} {}", left, right),
            Production::Unary(terminal) => write!(f, "{}", terminal),
        }
    }
}

// Left-hand side to the set of its right-hand sides
pub type RuleMap = BTreeMap<String, BTreeSet<Production>>;

/// Unions the productions of `b` into `a`, key by key.
pub fn merge_rule_maps(mut a: RuleMap, b: RuleMap) -> RuleMap {
    for (lhs, productions) in b {
        a.entry(lhs).or_default().extend(productions);
    }
    a
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Grammar {
    rules: RuleMap,
}

impl Grammar {
    pub fn from_rules(rules: RuleMap) -> Self {
        Grammar { rules }
    }

    /// Parses rule text using the uppercase-initial convention for nonterminals.
    pub fn parse(text: &str) -> Result<Self, MalformedRuleError> {
        rules::parse_grammar(text, Classification::default())
    }

    pub fn parse_with(text: &str, classification: Classification) -> Result<Self, MalformedRuleError> {
        rules::parse_grammar(text, classification)
    }

    pub fn productions(&self, nonterminal: &str) -> Option<&BTreeSet<Production>> {
        self.rules.get(nonterminal)
    }

    // Whether a symbol can be rewritten, i.e. it is a nonterminal with productions
    pub fn is_expandable(&self, symbol: &Symbol) -> bool {
        match symbol {
            Symbol::Nonterminal(name) => self.rules.contains_key(name),
            Symbol::Terminal(_) => false,
        }
    }

    pub fn rules(&self) -> impl Iterator<Item = (&str, &Production)> {
        self.rules
            .iter()
            .flat_map(|(lhs, productions)| productions.iter().map(move |p| (lhs.as_str(), p)))
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// The terminal alphabet of the grammar.
    pub fn terminals(&self) -> BTreeSet<&str> {
        self.rules()
            .filter_map(|(_, production)| match production {
                Production::Unary(terminal) => Some(terminal.as_str()),
                Production::Binary(..) => None,
            })
            .collect()
    }

    /// Nonterminals used on a right-hand side that never appear on a left-hand
    /// side. They can never be rewritten.
    pub fn undefined_nonterminals(&self) -> BTreeSet<&str> {
        rules::verifier::undefined_nonterminals(&self.rules)
    }

    /// Number of distinct productions.
    pub fn len(&self) -> usize {
        self.rules.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromStr for Grammar {
    type Err = MalformedRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grammar::parse(s)
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (lhs, production) in self.rules() {
            writeln!(f, "{} -> {}", lhs, production)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_map(rules: &[(&str, Production)]) -> RuleMap {
        let mut map = RuleMap::new();
        for (lhs, production) in rules {
            map.entry(lhs.to_string()).or_default().insert(production.clone());
        }
        map
    }

    fn binary(left: &str, right: &str) -> Production {
        Production::Binary(left.to_string(), right.to_string())
    }

    fn unary(terminal: &str) -> Production {
        Production::Unary(terminal.to_string())
    }

    #[test]
    fn merge_unions_shared_keys() {
        let a = rule_map(&[("S", binary("A", "B")), ("A", unary("a"))]);
        let b = rule_map(&[("S", binary("B", "A")), ("S", binary("A", "B")), ("B", unary("b"))]);

        let merged = merge_rule_maps(a, b);

        assert_eq!(merged, rule_map(&[
            ("S", binary("A", "B")),
            ("S", binary("B", "A")),
            ("A", unary("a")),
            ("B", unary("b")),
        ]));
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let a = rule_map(&[("S", binary("A", "B")), ("A", unary("a"))]);
        assert_eq!(merge_rule_maps(a.clone(), RuleMap::new()), a);
        assert_eq!(merge_rule_maps(RuleMap::new(), a.clone()), a);
    }

    #[test]
    fn query_grammar() {
        let grammar = Grammar::from_rules(rule_map(&[
            ("S", binary("A", "B")),
            ("S", binary("A", "C")),
            ("A", unary("a")),
            ("B", unary("b")),
            ("B", unary("a")),
        ]));

        assert_eq!(grammar.len(), 5);
        assert_eq!(grammar.nonterminals().collect::<Vec<_>>(), vec!["A", "B", "S"]);
        assert_eq!(grammar.terminals(), BTreeSet::from(["a", "b"]));
        assert_eq!(grammar.undefined_nonterminals(), BTreeSet::from(["C"]));
        assert!(grammar.is_expandable(&Symbol::Nonterminal("S".to_string())));
        assert!(!grammar.is_expandable(&Symbol::Nonterminal("C".to_string())));
        assert!(!grammar.is_expandable(&Symbol::Terminal("S".to_string())));
        assert!(grammar.productions("C").is_none());
    }

    #[test]
    fn display_round_trips() {
        let text = "NP -> Det N\nS -> AB\nS -> NP VP\nA -> a\n";
        let grammar = Grammar::parse(text).unwrap();
        assert_eq!(Grammar::parse(&grammar.to_string()).unwrap(), grammar);
        assert_eq!(grammar.to_string().lines().next(), Some("A -> a"));
    }
}
