//! Question generation: masking and multiple-choice option building.
//!
//! Everything here is stateless; randomness comes from the caller's `Rng`,
//! so concurrent callers just hold independent (or thread-local) generators.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::QuizError;

/// Placeholder character for a hidden letter.
pub const BLANK: char = '_';

/// Options per question: the answer plus three distractors.
pub const OPTION_COUNT: usize = 4;

/// One generated quiz round. Built fresh per round, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub answer: String,
    pub masked: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

/// Replace 1..=len-1 random letters of `word` with blanks.
/// Words of length <= 2 are masked entirely.
pub fn mask_word<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() <= 2 {
        return std::iter::repeat(BLANK).take(chars.len()).collect();
    }

    let num_to_hide = rng.gen_range(1..chars.len());
    let mut hidden = vec![false; chars.len()];
    for position in rand::seq::index::sample(rng, chars.len(), num_to_hide) {
        hidden[position] = true;
    }

    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| if hidden[i] { BLANK } else { c })
        .collect()
}

/// Build the option list for `answer`: k-1 distractors plus the answer,
/// uniformly permuted. Distractors of the same length as the answer are
/// preferred so the mask length gives nothing away; the pool widens to the
/// whole bank only when too few same-length words exist.
pub fn select_options<R: Rng + ?Sized>(
    answer: &str,
    bank: &[String],
    k: usize,
    rng: &mut R,
) -> Result<(Vec<String>, usize), QuizError> {
    let same_len: Vec<&String> = bank
        .iter()
        .filter(|w| w.as_str() != answer && w.chars().count() == answer.chars().count())
        .collect();
    let rest: Vec<&String> = bank.iter().filter(|w| w.as_str() != answer).collect();
    if rest.is_empty() {
        return Err(QuizError::InsufficientBank {
            needed: k,
            available: bank.len(),
        });
    }

    let pool = if same_len.len() >= k - 1 { same_len } else { rest };

    let mut options: Vec<String> = if pool.len() >= k - 1 {
        pool.choose_multiple(rng, k - 1).map(|w| (*w).clone()).collect()
    } else {
        // Undersized pool: draw with replacement, so duplicate distractors
        // are possible. Callers avoid this by keeping banks at OPTION_COUNT+.
        log::warn!(
            "distractor pool has only {} entries for '{answer}', drawing with replacement",
            pool.len()
        );
        (0..k - 1)
            .map(|_| (*pool.choose(rng).unwrap()).clone())
            .collect()
    };

    options.push(answer.to_string());
    options.shuffle(rng);
    let correct_index = options.iter().position(|w| w == answer).unwrap();
    Ok((options, correct_index))
}

/// Draw an answer from the bank and build the full question around it.
pub fn next_question<R: Rng + ?Sized>(
    bank: &[String],
    rng: &mut R,
) -> Result<Question, QuizError> {
    let answer = bank.choose(rng).ok_or(QuizError::InsufficientBank {
        needed: OPTION_COUNT,
        available: 0,
    })?;
    let masked = mask_word(answer, rng);
    let (options, correct_index) = select_options(answer, bank, OPTION_COUNT, rng)?;

    Ok(Question {
        answer: answer.clone(),
        masked,
        options,
        correct_index,
    })
}

/// Case-insensitive check of a user-supplied word against the known answer.
pub fn validate_selection(answer: &str, selected: &str) -> Result<bool, QuizError> {
    if answer.is_empty() {
        return Err(QuizError::MissingField("answer"));
    }
    if selected.is_empty() {
        return Err(QuizError::MissingField("selected"));
    }
    Ok(answer.to_lowercase() == selected.to_lowercase())
}
