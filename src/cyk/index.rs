use std::collections::{BTreeSet, HashMap};

use crate::grammar::*;

/// Maps a right-hand side back to the nonterminals producing it.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct ReverseIndex {
    // left -> right -> producers
    binary: HashMap<String, HashMap<String, BTreeSet<String>>>,
    unary: HashMap<String, BTreeSet<String>>,
}

impl ReverseIndex {
    pub fn build(grammar: &Grammar) -> Self {
        let mut index = ReverseIndex::default();
        for (lhs, production) in grammar.rules() {
            index.insert(production, lhs);
        }
        index
    }

    fn insert(&mut self, production: &Production, lhs: &str) {
        let producers = match production {
            Production::Binary(left, right) => self
                .binary
                .entry(left.clone())
                .or_default()
                .entry(right.clone())
                .or_default(),
            Production::Unary(terminal) => self.unary.entry(terminal.clone()).or_default(),
        };
        producers.insert(lhs.to_string());
    }

    pub fn pair(&self, left: &str, right: &str) -> Option<&BTreeSet<String>> {
        self.binary.get(left)?.get(right)
    }

    pub fn terminal(&self, terminal: &str) -> Option<&BTreeSet<String>> {
        self.unary.get(terminal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn index_reverses_rules() {
        let grammar = Grammar::parse("S -> AB\nC -> AB\nA -> a\nB -> a\nB -> b\nS -> SS").unwrap();
        let index = ReverseIndex::build(&grammar);

        assert_eq!(index.pair("A", "B"), Some(&names(&["C", "S"])));
        assert_eq!(index.pair("S", "S"), Some(&names(&["S"])));
        assert_eq!(index.pair("B", "A"), None);
        assert_eq!(index.terminal("a"), Some(&names(&["A", "B"])));
        assert_eq!(index.terminal("b"), Some(&names(&["B"])));
        assert_eq!(index.terminal("c"), None);
    }

    #[test]
    fn index_is_deterministic() {
        let grammar = Grammar::parse("S -> AB\nA -> a\nB -> b").unwrap();
        assert_eq!(ReverseIndex::build(&grammar), ReverseIndex::build(&grammar));
    }
}
