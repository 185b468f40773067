use clap::Parser;
use std::io::BufRead;

use crate::generator::Question;
use crate::session::{ChoiceInput, DEFAULT_ROUNDS, SessionInterface, SessionSummary};

/// Word quiz CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word bank file
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<String>,

    /// Play in the full-screen terminal UI instead of the prompt loop
    #[arg(long)]
    pub tui: bool,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

fn parse_round_count(input: &str) -> u32 {
    let input = input.trim();
    if input.is_empty() {
        return DEFAULT_ROUNDS;
    }
    match input.parse::<i64>() {
        Ok(n) => n.clamp(1, i64::from(u32::MAX)) as u32,
        Err(_) => DEFAULT_ROUNDS,
    }
}

fn parse_choice(input: &str, option_count: usize) -> ChoiceInput {
    let input = input.trim().to_lowercase();
    if input == "q" {
        return ChoiceInput::Quit;
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=option_count).contains(&n) => ChoiceInput::Choice(n - 1),
        _ => ChoiceInput::Invalid,
    }
}

pub fn display_welcome(word_count: usize) {
    println!("Missing Letters Word Quiz (MCQ)");
    println!("- Underscores (_) mark missing letters");
    println!("- Answer by choosing an option number; 'q' to quit");
    println!("Loaded {word_count} words.");
}

pub fn display_question(round: u32, question: &Question) {
    println!("\nQuestion {round}");
    println!("Word:  {}", question.masked);
    for (i, option) in question.options.iter().enumerate() {
        println!("  {}) {option}", i + 1);
    }
}

pub fn display_result(correct: bool, answer: &str) {
    if correct {
        println!("Correct! +1 point");
    } else {
        println!("Wrong. Correct answer was '{answer}'.");
    }
}

pub fn display_summary(summary: &SessionSummary) {
    println!(
        "\nYour final score: {}/{}",
        summary.score, summary.rounds_played
    );
}

/// CLI implementation of the SessionInterface trait.
/// Wraps a BufRead so whole sessions can be driven from a Cursor in tests.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> SessionInterface for CliInterface<R> {
    fn read_round_count(&mut self) -> Option<u32> {
        println!("How many rounds? [{DEFAULT_ROUNDS}]:");
        let mut input = String::new();
        if self.reader.read_line(&mut input).unwrap() == 0 {
            // End of input before the session began: fall back to the default
            // and let the first choice prompt decide whether play continues.
            return Some(DEFAULT_ROUNDS);
        }
        Some(parse_round_count(&input))
    }

    fn present_question(&mut self, round: u32, _total: u32, question: &Question) {
        display_question(round, question);
    }

    fn read_choice(&mut self, option_count: usize) -> ChoiceInput {
        println!("Choose option (1-{option_count}) or q to quit:");
        let mut input = String::new();
        if self.reader.read_line(&mut input).unwrap() == 0 {
            println!("Exiting quiz.");
            return ChoiceInput::Quit;
        }
        match parse_choice(&input, option_count) {
            ChoiceInput::Quit => {
                println!("Exiting quiz.");
                ChoiceInput::Quit
            }
            ChoiceInput::Invalid => {
                println!("Invalid input. Try again.");
                ChoiceInput::Invalid
            }
            choice => choice,
        }
    }

    fn display_result(&mut self, correct: bool, answer: &str) {
        display_result(correct, answer);
    }

    fn display_summary(&mut self, summary: &SessionSummary) {
        display_summary(summary);
    }
}
