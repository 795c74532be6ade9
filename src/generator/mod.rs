/*
    This module enumerates the strings a grammar derives within a bounded
    number of steps
*/

mod complement;
mod sample;

use std::collections::{BTreeSet, HashSet};

use itertools::Itertools;
use log::debug;

use crate::grammar::*;

pub use complement::complement;
pub use sample::sample;

// A partially derived sequence of terminals and nonterminals
pub type Sentence = Vec<Symbol>;

/// How a single derivation step rewrites a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expansion {
    /// Rewrite only the leftmost expandable nonterminal.
    #[default]
    Leftmost,
    /// Rewrite every expandable nonterminal at once, bounding the depth of the
    /// derivation tree instead of the number of rewrites. Each step takes the
    /// product of the choices at every position, so the frontier grows much
    /// faster than with `Leftmost`.
    Parallel,
}

impl Expansion {
    // Every sentence one step away, or None if nothing in it can be rewritten
    fn expand(self, grammar: &Grammar, sentence: &[Symbol]) -> Option<Vec<Sentence>> {
        match self {
            Expansion::Leftmost => expand_leftmost(grammar, sentence),
            Expansion::Parallel => expand_parallel(grammar, sentence),
        }
    }
}

fn productions_of<'g>(grammar: &'g Grammar, symbol: &Symbol) -> Option<&'g BTreeSet<Production>> {
    match symbol {
        Symbol::Nonterminal(name) => grammar.productions(name),
        Symbol::Terminal(_) => None,
    }
}

// Builds a new sentence with the symbol at `index` replaced by the production
fn rewrite(sentence: &[Symbol], index: usize, production: &Production) -> Sentence {
    sentence[..index]
        .iter()
        .cloned()
        .chain(production.symbols())
        .chain(sentence[index + 1..].iter().cloned())
        .collect()
}

fn expand_leftmost(grammar: &Grammar, sentence: &[Symbol]) -> Option<Vec<Sentence>> {
    let (index, productions) = sentence
        .iter()
        .enumerate()
        .find_map(|(index, symbol)| productions_of(grammar, symbol).map(|p| (index, p)))?;

    Some(productions.iter().map(|production| rewrite(sentence, index, production)).collect())
}

fn expand_parallel(grammar: &Grammar, sentence: &[Symbol]) -> Option<Vec<Sentence>> {
    if !sentence.iter().any(|symbol| grammar.is_expandable(symbol)) {
        return None;
    }

    // The choices for each position, then every combination of them
    let choices = sentence
        .iter()
        .map(|symbol| match productions_of(grammar, symbol) {
            Some(productions) => productions.iter().map(Production::symbols).collect(),
            None => vec![vec![symbol.clone()]],
        })
        .collect_vec();

    Some(
        choices
            .iter()
            .map(|options| options.iter())
            .multi_cartesian_product()
            .map(|parts| parts.into_iter().flatten().cloned().collect())
            .collect(),
    )
}

fn words(sentence: &[Symbol]) -> Vec<String> {
    sentence.iter().map(|symbol| symbol.text().to_string()).collect()
}

/// Every sentence whose derivation from `start` completes within `max_steps`
/// steps, as the sequence of its terminals.
pub fn generate_sentences(grammar: &Grammar, start: &str, max_steps: usize, expansion: Expansion) -> HashSet<Vec<String>> {
    let mut frontier: HashSet<Sentence> = HashSet::from([vec![Symbol::Nonterminal(start.to_string())]]);
    let mut language = HashSet::new();

    for step in 1..=max_steps {
        let mut derived = HashSet::new();
        for sentence in &frontier {
            match expansion.expand(grammar, sentence) {
                Some(sentences) => derived.extend(sentences),
                None => {
                    language.insert(words(sentence));
                }
            }
        }
        debug!("Step {}: {} sentences in the frontier, {} complete", step, derived.len(), language.len());
        frontier = derived;
    }

    // Sentences finished by the very last step
    language.extend(
        frontier
            .iter()
            .filter(|sentence| !sentence.iter().any(|symbol| grammar.is_expandable(symbol)))
            .map(|sentence| words(sentence)),
    );

    language
}

/// The strings derivable from `start` in at most `max_steps` leftmost
/// derivation steps. Every rewrite counts as a step, so `S -> AB, A -> a,
/// B -> b` needs 3 steps for `ab`. To bound the depth of the derivation tree
/// instead, use `generate_with(.., Expansion::Parallel)`.
pub fn generate(grammar: &Grammar, start: &str, max_steps: usize) -> HashSet<String> {
    generate_with(grammar, start, max_steps, Expansion::Leftmost)
}

pub fn generate_with(grammar: &Grammar, start: &str, max_steps: usize, expansion: Expansion) -> HashSet<String> {
    generate_sentences(grammar, start, max_steps, expansion)
        .into_iter()
        .map(|sentence| sentence.concat())
        .collect()
}
