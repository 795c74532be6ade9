use std::collections::{BTreeSet, HashSet};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use cnfkit::error_handling::*;
use cnfkit::grammar::Grammar;
use cnfkit::rules::Classification;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write the strings derivable within a number of steps, and some that are not
    Generate(GenerateArgs),
    /// Decide whether inputs belong to the language of the grammar
    Parse(ParseArgs),
    /// Print random sentences of the grammar
    Sample(SampleArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// File containing the grammar
    pub grammar: PathBuf,

    /// Start symbol of the derivation
    pub start: String,

    /// Number of derivation steps
    #[arg(value_parser = parse_step_bound)]
    pub steps: usize,

    /// File to write the derivable strings to
    pub positive: PathBuf,

    /// File to write underivable strings to
    pub negative: PathBuf,

    /// Longest underivable string, in terminals
    #[arg(long, value_name = "LENGTH", default_value_t = 3)]
    pub max_length: usize,

    /// Put between the terminals of a string
    #[arg(long, default_value = "")]
    pub separator: String,

    /// Bound the derivation tree depth instead of the number of leftmost rewrites
    #[arg(long)]
    pub parallel: bool,

    /// Treat exactly the defined symbols as nonterminals
    #[arg(long)]
    pub declared: bool,
}

#[derive(Args)]
pub struct ParseArgs {
    /// File containing the grammar
    pub grammar: PathBuf,

    /// Whitespace separated inputs (default: lines of stdin)
    pub inputs: Vec<String>,

    /// Start symbol
    #[arg(short, long, value_name = "SYMBOL", default_value = cnfkit::cyk::DEFAULT_START)]
    pub start: String,

    /// Treat exactly the defined symbols as nonterminals
    #[arg(long)]
    pub declared: bool,
}

#[derive(Args)]
pub struct SampleArgs {
    /// File containing the grammar
    pub grammar: PathBuf,

    /// Start symbol
    #[arg(short, long, value_name = "SYMBOL", default_value = cnfkit::cyk::DEFAULT_START)]
    pub start: String,

    /// Amount to generate
    #[arg(short = 'n', long, value_name = "AMOUNT", default_value_t = 1)]
    pub amount: u32,

    /// Deepest derivation tree allowed
    #[arg(long, value_name = "DEPTH", default_value_t = 16)]
    pub max_depth: usize,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Put between the terminals of a sentence
    #[arg(long, default_value = " ")]
    pub separator: String,

    /// Treat exactly the defined symbols as nonterminals
    #[arg(long)]
    pub declared: bool,
}

pub fn classification(declared: bool) -> Classification {
    if declared {
        Classification::Declared
    } else {
        Classification::UppercaseInitial
    }
}

#[derive(Debug, PartialEq)]
pub struct InvalidStepBoundError(pub String);

impl Display for InvalidStepBoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ill-formatted number of steps `{}` for CNF derivation", self.0)
    }
}

impl std::error::Error for InvalidStepBoundError {}

pub fn parse_step_bound(text: &str) -> Result<usize, InvalidStepBoundError> {
    text.trim().parse().map_err(|_| InvalidStepBoundError(text.to_string()))
}

#[derive(Debug)]
pub enum CliErrorType {
    // There was an issue with reading or writing a file
    FileError(std::io::Error),
}

impl ErrorType for CliErrorType {}

impl PartialEq for CliErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CliErrorType::FileError(a), CliErrorType::FileError(b)) => a.kind() == b.kind(),
        }
    }
}

impl Display for CliErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type CliError = Error<CliErrorType>;

pub fn io_error(error: std::io::Error, file: &Path) -> CliError {
    CliError {
        location: Location::file(file.to_path_buf()),
        error: CliErrorType::FileError(error)
    }
}

pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

pub fn load_grammar(path: &Path, classification: Classification) -> CliResult<Grammar> {
    let text = fs::read_to_string(path).map_err(|e| io_error(e, path))?;
    let grammar = Grammar::parse_with(&text, classification).map_err(|e| e.in_file(path.to_path_buf()))?;
    Ok(grammar)
}

// Joins both samples with the separator. Different sentences can join to the
// same string, so the derivable ones collapse and are removed from the rest.
pub fn join_samples(
    language: &HashSet<Vec<String>>,
    underivable: &BTreeSet<Vec<String>>,
    separator: &str,
) -> (BTreeSet<String>, BTreeSet<String>) {
    let positive: BTreeSet<String> = language.iter().map(|sentence| sentence.join(separator)).collect();
    let negative = underivable
        .iter()
        .map(|sentence| sentence.join(separator))
        .filter(|joined| !positive.contains(joined))
        .collect();
    (positive, negative)
}

// One entry per line
pub fn write_lines<I: IntoIterator<Item = String>>(path: &Path, lines: I) -> CliResult<()> {
    let contents: String = lines.into_iter().map(|line| line + "\n").collect();
    fs::write(path, contents).map_err(|e| io_error(e, path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use cnfkit::generator::{complement, generate_sentences, Expansion};
    use cnfkit::rules::{MalformedRuleError, RuleErrorType};

    use super::*;

    #[test]
    fn parse_normal_step_bound() {
        assert_eq!(parse_step_bound("0"), Ok(0));
        assert_eq!(parse_step_bound("12"), Ok(12));
    }

    #[test]
    fn parse_malformed_step_bound() {
        for text in ["", "-1", "three", "1.5"] {
            assert_eq!(parse_step_bound(text), Err(InvalidStepBoundError(text.to_string())));
        }
    }

    #[test]
    fn cli_requires_every_generate_argument() {
        assert!(Cli::try_parse_from(["cnfkit", "generate", "g.cnf", "S", "3", "pos.txt"]).is_err());
        assert!(Cli::try_parse_from(["cnfkit", "generate", "g.cnf", "S", "x", "pos.txt", "neg.txt"]).is_err());

        let cli = Cli::try_parse_from(["cnfkit", "generate", "g.cnf", "S", "3", "pos.txt", "neg.txt"]).unwrap();
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.steps, 3);
                assert_eq!(args.max_length, 3);
                assert!(!args.parallel);
            }
            _ => panic!("expected the generate command"),
        }
    }

    #[test]
    fn join_samples_keeps_files_disjoint() {
        let grammar = Grammar::parse("S -> AB\nA -> a\nA -> aa\nB -> a\nB -> aa").unwrap();
        let language = generate_sentences(&grammar, "S", 10, Expansion::Leftmost);
        let underivable = complement(&language, &grammar.terminals(), 2);

        let (positive, negative) = join_samples(&language, &underivable, "");

        assert_eq!(positive, BTreeSet::from(["aa", "aaa", "aaaa"].map(String::from)));
        assert_eq!(negative, BTreeSet::from(["a".to_string()]));

        let (positive, negative) = join_samples(&language, &underivable, " ");
        assert_eq!(positive.len(), 4);
        assert!(positive.contains("aa aa"));
        assert_eq!(negative, BTreeSet::from(["a", "aa"].map(String::from)));
    }

    #[test]
    fn load_normal_file() {
        let grammar = load_grammar(Path::new("example_data/balanced.cnf"), Classification::UppercaseInitial).unwrap();
        assert_eq!(grammar.len(), 5);
        assert_eq!(grammar.nonterminals().collect::<Vec<_>>(), vec!["A", "B", "C", "S"]);
    }

    #[test]
    fn load_and_parse_english() {
        let grammar = load_grammar(Path::new("example_data/english.cnf"), Classification::UppercaseInitial).unwrap();
        let parser = cnfkit::cyk::CykParser::new(&grammar);

        assert!(parser.recognise("the dog sees they"));
        assert!(parser.recognise("they chases the cat"));
        assert!(!parser.recognise("the dog sees"));
        assert!(!parser.recognise("dog the sees they"));
    }

    #[test]
    fn load_malformed_file() {
        let path = PathBuf::from("example_data/malformed.cnf");
        let error = load_grammar(&path, Classification::UppercaseInitial).unwrap_err();

        assert_eq!(error.downcast_ref::<MalformedRuleError>(), Some(&MalformedRuleError {
            location: Location { file: Some(path), line: 3 },
            error: RuleErrorType::MissingArrow
        }));
    }

    #[test]
    fn load_missing_file() {
        let path = PathBuf::from("example_data/missing.cnf");
        let error = load_grammar(&path, Classification::UppercaseInitial).unwrap_err();

        assert_eq!(
            error.downcast_ref::<CliError>().map(|e| &e.location),
            Some(&Location::file(path))
        );
    }
}
