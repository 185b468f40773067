use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

/// Smallest bank the engine accepts: one answer plus three distractors.
pub const MIN_WORDBANK_SIZE: usize = crate::generator::OPTION_COUNT;

fn is_valid_entry(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic())
}

fn push_entry(words: &mut Vec<String>, line: &str) {
    let word = line.trim().to_lowercase();
    if is_valid_entry(&word) && !words.contains(&word) {
        words.push(word);
    }
}

pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    let mut words = Vec::new();
    for line in data.lines() {
        push_entry(&mut words, line);
    }
    words
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        push_entry(&mut words, &line?);
    }
    Ok(words)
}

/// Per-user bank checked when no -i flag is given, before the embedded list.
pub fn default_user_wordbank_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("word-quiz").join("wordbank.txt"))
}
