use rand::prelude::*;

use crate::grammar::*;

/// Derives one random sentence from `start`, choosing a production uniformly at
/// every nonterminal. Returns None if the derivation tree would get deeper than
/// `max_depth`.
pub fn sample<R: Rng + ?Sized>(grammar: &Grammar, start: &str, max_depth: usize, rng: &mut R) -> Option<Vec<String>> {
    let mut sentence = Vec::new();
    sample_nonterminal(start, grammar, max_depth, rng, &mut sentence)?;
    Some(sentence)
}

fn sample_nonterminal<R: Rng + ?Sized>(
    nonterminal: &str,
    grammar: &Grammar,
    depth: usize,
    rng: &mut R,
    sentence: &mut Vec<String>,
) -> Option<()> {
    let productions = match grammar.productions(nonterminal) {
        Some(productions) => productions,
        None => {
            sentence.push(nonterminal.to_string());
            return Some(());
        }
    };
    if depth == 0 {
        return None;
    }

    match productions.iter().choose(rng)? {
        Production::Unary(terminal) => sentence.push(terminal.clone()),
        Production::Binary(left, right) => {
            sample_nonterminal(left, grammar, depth - 1, rng, sentence)?;
            sample_nonterminal(right, grammar, depth - 1, rng, sentence)?;
        }
    }
    Some(())
}
