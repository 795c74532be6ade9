/*
    This module decides membership with the CYK algorithm
*/

mod index;

use std::collections::BTreeSet;

use log::trace;

use crate::grammar::Grammar;

pub use index::ReverseIndex;

pub const DEFAULT_START: &str = "S";

/// Triangular chart of a single parse. The cell at (start, length) holds the
/// nonterminals deriving the `length` tokens beginning at `start`.
#[derive(Debug, PartialEq, Clone)]
pub struct ParseTable {
    // cells[start][length - 1]
    cells: Vec<Vec<BTreeSet<String>>>,
}

impl ParseTable {
    fn new(n: usize) -> Self {
        ParseTable {
            cells: (0..n).map(|start| vec![BTreeSet::new(); n - start]).collect(),
        }
    }

    /// Length of the parsed input.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, start: usize, length: usize) -> Option<&BTreeSet<String>> {
        self.cells.get(start)?.get(length.checked_sub(1)?)
    }

    /// The cell covering the whole input.
    pub fn spanning(&self) -> Option<&BTreeSet<String>> {
        self.cell(0, self.len())
    }
}

/// A recogniser for one grammar. The reverse index is built once and shared by
/// every parse.
#[derive(Debug, Clone)]
pub struct CykParser {
    index: ReverseIndex,
    start: String,
}

impl CykParser {
    pub fn new(grammar: &Grammar) -> Self {
        CykParser::with_start(grammar, DEFAULT_START)
    }

    pub fn with_start(grammar: &Grammar, start: &str) -> Self {
        CykParser {
            index: ReverseIndex::build(grammar),
            start: start.to_string(),
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    /// Fills the chart for the given tokens, shortest substrings first.
    pub fn table<T: AsRef<str>>(&self, tokens: &[T]) -> ParseTable {
        let n = tokens.len();
        let mut table = ParseTable::new(n);

        for (i, token) in tokens.iter().enumerate() {
            if let Some(producers) = self.index.terminal(token.as_ref()) {
                table.cells[i][0].extend(producers.iter().cloned());
            }
        }

        for length in 2..=n {
            for start in 0..=n - length {
                let mut cell = BTreeSet::new();
                // The left part covers split + 1 tokens, the right part the rest
                for split in 0..length - 1 {
                    let left = &table.cells[start][split];
                    let right = &table.cells[start + split + 1][length - split - 2];
                    for b in left {
                        for c in right {
                            if let Some(producers) = self.index.pair(b, c) {
                                cell.extend(producers.iter().cloned());
                            }
                        }
                    }
                }
                trace!("Cell ({}, {}): {:?}", start, length, cell);
                table.cells[start][length - 1] = cell;
            }
        }

        table
    }

    /// Whether the start symbol derives the token sequence. The empty sequence
    /// is never derivable, since there are no epsilon productions.
    pub fn parse<T: AsRef<str>>(&self, tokens: &[T]) -> bool {
        if tokens.is_empty() {
            return false;
        }
        self.table(tokens)
            .spanning()
            .is_some_and(|cell| cell.contains(&self.start))
    }

    /// Like `parse`, with the input split on whitespace.
    pub fn recognise(&self, input: &str) -> bool {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        self.parse(&tokens)
    }
}
