mod cli;

use std::io::BufRead;
use std::process::ExitCode;

use clap::Parser;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cli::*;
use cnfkit::cyk::CykParser;
use cnfkit::generator::{self, Expansion};

// Attempts per requested sample before giving up on it
const SAMPLE_ATTEMPTS: usize = 100;

fn run_generate(args: GenerateArgs) -> CliResult<()> {
    let grammar = load_grammar(&args.grammar, classification(args.declared))?;
    let expansion = if args.parallel { Expansion::Parallel } else { Expansion::Leftmost };

    let language = generator::generate_sentences(&grammar, &args.start, args.steps, expansion);
    let underivable = generator::complement(&language, &grammar.terminals(), args.max_length);

    let (positive, negative) = join_samples(&language, &underivable, &args.separator);
    info!("{} derivable and {} underivable strings", positive.len(), negative.len());

    write_lines(&args.positive, positive)?;
    write_lines(&args.negative, negative)?;
    Ok(())
}

fn run_parse(args: ParseArgs) -> CliResult<()> {
    let grammar = load_grammar(&args.grammar, classification(args.declared))?;
    let parser = CykParser::with_start(&grammar, &args.start);

    if args.inputs.is_empty() {
        for line in std::io::stdin().lock().lines() {
            let line = line?;
            println!("{}\t{}", parser.recognise(&line), line);
        }
    } else {
        for input in &args.inputs {
            println!("{}\t{}", parser.recognise(input), input);
        }
    }
    Ok(())
}

fn run_sample(args: SampleArgs) -> CliResult<()> {
    let grammar = load_grammar(&args.grammar, classification(args.declared))?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for _ in 0..args.amount {
        let sentence = (0..SAMPLE_ATTEMPTS).find_map(|_| generator::sample(&grammar, &args.start, args.max_depth, &mut rng));
        match sentence {
            Some(sentence) => println!("{}", sentence.join(args.separator.as_str())),
            None => warn!("No derivation of `{}` within depth {} found", args.start, args.max_depth),
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Parse(args) => run_parse(args),
        Command::Sample(args) => run_sample(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}
