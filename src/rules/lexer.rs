use super::{Result, RuleErrorType};

pub const ARROW: &str = " -> ";

// Splits a rule line into its left- and right-hand side around the arrow
pub fn split_arrow(line: &str) -> Result<(&str, &str)> {
    if line.trim().is_empty() {
        return Err(RuleErrorType::BlankLine);
    }

    let mut sides = line.split(ARROW);
    match (sides.next(), sides.next(), sides.next()) {
        (Some(lhs), Some(rhs), None) => Ok((lhs.trim(), rhs.trim())),
        (_, None, _) => Err(RuleErrorType::MissingArrow),
        _ => Err(RuleErrorType::UnexpectedArrow),
    }
}

// The whitespace separated symbols of a right-hand side
pub fn words(rhs: &str) -> Vec<&str> {
    rhs.split_whitespace().collect()
}
