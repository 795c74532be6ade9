/*
    This module parses CNF rule text into grammars
*/

mod lexer;
pub(crate) mod verifier;

use std::collections::{BTreeSet, HashSet};
use std::fmt::Display;

use log::debug;

use crate::error_handling::*;
use crate::grammar::*;
use lexer::{split_arrow, words};

pub use lexer::ARROW;

#[derive(Debug, PartialEq, Clone)]
pub enum RuleErrorType {
    // A line has nothing in it
    BlankLine,
    // A line does not contain ` -> `
    MissingArrow,
    // A line contains more than one ` -> `
    UnexpectedArrow,
    // Nothing stands left of the arrow
    MissingNonterminal,
    // The left-hand side is not a nonterminal
    InvalidNonterminal(String),
    // Nothing stands right of the arrow
    EmptyRightSide,
    // A pair of symbols where one of them is a terminal
    TerminalInPair(String),
    // A right-hand side that is neither a pair of nonterminals nor a terminal
    MalformedPair(String),
    // More than two symbols on the right
    TooManySymbols(usize),
    // A single nonterminal on the right
    UnitProduction(String),
}

impl ErrorType for RuleErrorType {}

impl Display for RuleErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleErrorType::BlankLine => write!(f, "Blank line where a rule was expected"),
            RuleErrorType::MissingArrow => write!(f, "Expected `{}` between the sides of a rule", ARROW.trim()),
            RuleErrorType::UnexpectedArrow => write!(f, "Unexpected second `{}` encountered", ARROW.trim()),
            RuleErrorType::MissingNonterminal => write!(f, "Missing nonterminal before `{}`", ARROW.trim()),
            RuleErrorType::InvalidNonterminal(lhs) => write!(f, "Tried to define `{}`, which is not a nonterminal", lhs),
            RuleErrorType::EmptyRightSide => write!(f, "Missing right-hand side"),
            RuleErrorType::TerminalInPair(symbol) => write!(f, "Terminal `{}` in a pair of nonterminals", symbol),
            RuleErrorType::MalformedPair(rhs) => write!(f, "`{}` is not a pair of nonterminals", rhs),
            RuleErrorType::TooManySymbols(count) => write!(f, "Expected one or two symbols, found {}", count),
            RuleErrorType::UnitProduction(symbol) => write!(f, "Unit production to `{}` is not in Chomsky normal form", symbol),
        }
    }
}

pub type MalformedRuleError = Error<RuleErrorType>;

pub type Result<T> = std::result::Result<T, RuleErrorType>;
pub type LineResult<T> = std::result::Result<T, MalformedRuleError>;

/// How tokens are told apart into nonterminals and terminals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Classification {
    /// A token starting with an uppercase letter is a nonterminal.
    #[default]
    UppercaseInitial,
    /// A token is a nonterminal iff it is defined on some left-hand side.
    Declared,
}

struct Classifier<'a> {
    classification: Classification,
    declared: HashSet<&'a str>,
}

impl<'a> Classifier<'a> {
    fn new(classification: Classification, text: &'a str) -> Self {
        let declared = match classification {
            Classification::UppercaseInitial => HashSet::new(),
            Classification::Declared => text
                .lines()
                .filter_map(|line| split_arrow(line).ok())
                .map(|(lhs, _)| lhs)
                .filter(|lhs| !lhs.is_empty())
                .collect(),
        };
        Classifier { classification, declared }
    }

    fn is_nonterminal(&self, token: &str) -> bool {
        match self.classification {
            Classification::UppercaseInitial => token.chars().next().is_some_and(char::is_uppercase),
            Classification::Declared => self.declared.contains(token),
        }
    }

    // A right-hand side written as two single character nonterminals, e.g. `AB`
    fn compact_pair(&self, token: &str) -> Option<(String, String)> {
        let mut chars = token.chars();
        let (left, right) = match (chars.next(), chars.next(), chars.next()) {
            (Some(left), Some(right), None) => (left.to_string(), right.to_string()),
            _ => return None,
        };
        if self.is_nonterminal(&left) && self.is_nonterminal(&right) {
            Some((left, right))
        } else {
            None
        }
    }
}

#[derive(PartialEq, Debug)]
struct Rule {
    symbol: String,
    production: Production,
}

impl Rule {
    fn into_map(self) -> RuleMap {
        RuleMap::from([(self.symbol, BTreeSet::from([self.production]))])
    }
}

fn parse_lhs(lhs: &str, classifier: &Classifier) -> Result<String> {
    if lhs.is_empty() {
        return Err(RuleErrorType::MissingNonterminal);
    }
    if lhs.contains(char::is_whitespace) || !classifier.is_nonterminal(lhs) {
        return Err(RuleErrorType::InvalidNonterminal(lhs.to_string()));
    }
    Ok(lhs.to_string())
}

fn parse_rhs(rhs: &str, classifier: &Classifier) -> Result<Production> {
    let symbols = words(rhs);
    match symbols.as_slice() {
        [] => Err(RuleErrorType::EmptyRightSide),
        [token] => {
            if let Some((left, right)) = classifier.compact_pair(token) {
                Ok(Production::Binary(left, right))
            } else if !classifier.is_nonterminal(token) {
                Ok(Production::Unary(token.to_string()))
            } else if token.chars().count() == 1 || classifier.classification == Classification::Declared {
                Err(RuleErrorType::UnitProduction(token.to_string()))
            } else {
                Err(RuleErrorType::MalformedPair(token.to_string()))
            }
        }
        [left, right] => {
            match [left, right].into_iter().find(|symbol| !classifier.is_nonterminal(symbol)) {
                Some(terminal) => Err(RuleErrorType::TerminalInPair(terminal.to_string())),
                None => Ok(Production::Binary(left.to_string(), right.to_string())),
            }
        }
        _ => Err(RuleErrorType::TooManySymbols(symbols.len())),
    }
}

fn parse_line(line: &str, classifier: &Classifier) -> Result<Rule> {
    let (lhs, rhs) = split_arrow(line)?;
    let symbol = parse_lhs(lhs, classifier)?;
    let production = parse_rhs(rhs, classifier)?;

    Ok(Rule { symbol, production })
}

fn parse_located_line(line: &str, num: usize, classifier: &Classifier) -> LineResult<Rule> {
    parse_line(line, classifier).map_err(|error| MalformedRuleError {
        location: Location::line(num),
        error
    })
}

/// Builds a grammar from rule text, one rule per line. Stops at the first
/// malformed line.
pub fn parse_grammar(text: &str, classification: Classification) -> LineResult<Grammar> {
    let classifier = Classifier::new(classification, text);

    let rules = text
        .lines()
        .enumerate()
        .map(|(num, line)| parse_located_line(line, num + 1, &classifier))
        .try_fold(RuleMap::new(), |rules, rule| -> LineResult<RuleMap> {
            Ok(merge_rule_maps(rules, rule?.into_map()))
        })?;

    verifier::verify_rules(&rules);

    let grammar = Grammar::from_rules(rules);
    debug!("Parsed grammar with {} productions", grammar.len());
    Ok(grammar)
}
