use std::collections::{BTreeSet, HashSet};

use itertools::Itertools;

/// Every sequence of 1 to `max_len` terminals that is not in `language`.
/// Useful as negative test data for a recogniser.
pub fn complement(language: &HashSet<Vec<String>>, terminals: &BTreeSet<&str>, max_len: usize) -> BTreeSet<Vec<String>> {
    (1..=max_len)
        .flat_map(|len| (0..len).map(|_| terminals.iter()).multi_cartesian_product())
        .map(|sentence| sentence.into_iter().map(|t| t.to_string()).collect_vec())
        .filter(|sentence| !language.contains(sentence))
        .collect()
}
