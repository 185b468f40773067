use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::debug_log;
use crate::error::QuizError;
use crate::generator::{Question, next_question};

/// Rounds played when the user gives no (or an unparseable) count.
pub const DEFAULT_ROUNDS: u32 = 10;

/// One user reaction to a presented question.
pub enum ChoiceInput {
    /// Zero-based index into the question's options.
    Choice(usize),
    Invalid,
    Quit,
}

/// Outcome of a finished (or quit) session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u32,
    pub rounds_played: u32,
    pub rounds_requested: u32,
    pub started_at: DateTime<Utc>,
}

/// Everything the session driver needs from a front end. Implemented by the
/// CLI over a BufRead and by the TUI over key events; tests use scripted
/// doubles.
pub trait SessionInterface {
    /// Ask how many rounds to play. None means quit before the first round;
    /// implementations apply DEFAULT_ROUNDS on blank/invalid input and
    /// never return 0.
    fn read_round_count(&mut self) -> Option<u32>;

    fn present_question(&mut self, round: u32, total: u32, question: &Question);

    /// Collect one reaction to the current question. Invalid re-prompts
    /// without touching session state.
    fn read_choice(&mut self, option_count: usize) -> ChoiceInput;

    fn display_result(&mut self, correct: bool, answer: &str);

    fn display_summary(&mut self, summary: &SessionSummary);
}

/// Draw a question whose answer has not been used this session. Once every
/// bank word has been an answer, repeats are allowed again.
fn draw_question<R: Rng + ?Sized>(
    bank: &[String],
    used: &HashSet<String>,
    rng: &mut R,
) -> Result<Question, QuizError> {
    loop {
        let question = next_question(bank, rng)?;
        if used.contains(&question.answer) && used.len() < bank.len() {
            debug_log!("redrawing: '{}' already asked this session", question.answer);
            continue;
        }
        return Ok(question);
    }
}

/// Run one full session: round count, then present/answer/score until the
/// requested rounds are played or the user quits. The summary handed to
/// `display_summary` is also returned so callers can inspect the outcome.
pub fn run_session<I, R>(
    bank: &[String],
    interface: &mut I,
    rng: &mut R,
) -> Result<SessionSummary, QuizError>
where
    I: SessionInterface + ?Sized,
    R: Rng + ?Sized,
{
    let started_at = Utc::now();

    let Some(rounds_requested) = interface.read_round_count() else {
        let summary = SessionSummary {
            score: 0,
            rounds_played: 0,
            rounds_requested: 0,
            started_at,
        };
        interface.display_summary(&summary);
        return Ok(summary);
    };
    debug_log!("session started: {rounds_requested} rounds requested");

    let mut used: HashSet<String> = HashSet::new();
    let mut score: u32 = 0;
    let mut rounds_played: u32 = 0;

    'rounds: while rounds_played < rounds_requested {
        let question = draw_question(bank, &used, rng)?;
        used.insert(question.answer.clone());
        interface.present_question(rounds_played + 1, rounds_requested, &question);

        loop {
            match interface.read_choice(question.options.len()) {
                ChoiceInput::Quit => break 'rounds,
                ChoiceInput::Invalid => continue,
                ChoiceInput::Choice(selected) => {
                    let correct = selected == question.correct_index;
                    if correct {
                        score += 1;
                    }
                    rounds_played += 1;
                    debug_log!(
                        "round {rounds_played}: answer '{}', correct={correct}",
                        question.answer
                    );
                    interface.display_result(correct, &question.answer);
                    break;
                }
            }
        }
    }

    let summary = SessionSummary {
        score,
        rounds_played,
        rounds_requested,
        started_at,
    };
    interface.display_summary(&summary);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    enum Play {
        Correct,
        Wrong,
        Fumble,
        Quit,
    }

    /// Scripted front end: answers each question right or wrong on cue,
    /// recording what the driver showed it.
    struct ScriptedPlayer {
        rounds: Option<u32>,
        plays: Vec<Play>,
        next_play: usize,
        current_correct: usize,
        seen_answers: Vec<String>,
        results: Vec<bool>,
        summary_shown: Option<SessionSummary>,
    }

    impl ScriptedPlayer {
        fn new(rounds: Option<u32>, plays: Vec<Play>) -> Self {
            Self {
                rounds,
                plays,
                next_play: 0,
                current_correct: 0,
                seen_answers: Vec::new(),
                results: Vec::new(),
                summary_shown: None,
            }
        }
    }

    impl SessionInterface for ScriptedPlayer {
        fn read_round_count(&mut self) -> Option<u32> {
            self.rounds
        }

        fn present_question(&mut self, _round: u32, _total: u32, question: &Question) {
            self.current_correct = question.correct_index;
            self.seen_answers.push(question.answer.clone());
        }

        fn read_choice(&mut self, option_count: usize) -> ChoiceInput {
            let play = self.plays.get(self.next_play);
            self.next_play += 1;
            match play {
                Some(Play::Correct) => ChoiceInput::Choice(self.current_correct),
                Some(Play::Wrong) => ChoiceInput::Choice((self.current_correct + 1) % option_count),
                Some(Play::Fumble) => ChoiceInput::Invalid,
                Some(Play::Quit) | None => ChoiceInput::Quit,
            }
        }

        fn display_result(&mut self, correct: bool, _answer: &str) {
            self.results.push(correct);
        }

        fn display_summary(&mut self, summary: &SessionSummary) {
            self.summary_shown = Some(summary.clone());
        }
    }

    fn bank(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn wide_bank() -> Vec<String> {
        bank(&[
            "python", "docker", "server", "github", "client", "socket", "memory", "thread",
        ])
    }

    #[test]
    fn test_full_session_scores_every_correct_round() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut player = ScriptedPlayer::new(
            Some(5),
            vec![
                Play::Correct,
                Play::Correct,
                Play::Correct,
                Play::Correct,
                Play::Correct,
            ],
        );

        let summary = run_session(&wide_bank(), &mut player, &mut rng).unwrap();
        assert_eq!(summary.score, 5);
        assert_eq!(summary.rounds_played, 5);
        assert_eq!(summary.rounds_requested, 5);
        assert_eq!(player.results, vec![true; 5]);
        assert_eq!(player.summary_shown.as_ref(), Some(&summary));
    }

    #[test]
    fn test_quit_mid_session_reports_partial_rounds() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut player = ScriptedPlayer::new(
            Some(10),
            vec![Play::Correct, Play::Correct, Play::Wrong, Play::Quit],
        );

        let summary = run_session(&wide_bank(), &mut player, &mut rng).unwrap();
        // Quit during round four: 2/3, not 2/10.
        assert_eq!(summary.score, 2);
        assert_eq!(summary.rounds_played, 3);
        assert_eq!(summary.rounds_requested, 10);
    }

    #[test]
    fn test_invalid_input_reprompts_without_consuming_the_round() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut player = ScriptedPlayer::new(
            Some(2),
            vec![Play::Fumble, Play::Fumble, Play::Correct, Play::Wrong],
        );

        let summary = run_session(&wide_bank(), &mut player, &mut rng).unwrap();
        assert_eq!(summary.score, 1);
        assert_eq!(summary.rounds_played, 2);
        // Both fumbles targeted the first question.
        assert_eq!(player.seen_answers.len(), 2);
    }

    #[test]
    fn test_answers_do_not_repeat_until_bank_is_exhausted() {
        let mut rng = StdRng::seed_from_u64(4);
        let six = bank(&["python", "docker", "server", "github", "client", "socket"]);
        let plays = (0..6).map(|_| Play::Correct).collect();
        let mut player = ScriptedPlayer::new(Some(6), plays);

        run_session(&six, &mut player, &mut rng).unwrap();

        let mut answers = player.seen_answers.clone();
        answers.sort();
        answers.dedup();
        assert_eq!(answers.len(), 6, "every bank word asked exactly once");
    }

    #[test]
    fn test_repeats_allowed_after_bank_exhaustion() {
        let mut rng = StdRng::seed_from_u64(5);
        let tiny = bank(&["python", "docker", "server"]);
        let plays = (0..5).map(|_| Play::Correct).collect();
        let mut player = ScriptedPlayer::new(Some(5), plays);

        let summary = run_session(&tiny, &mut player, &mut rng).unwrap();
        assert_eq!(summary.rounds_played, 5);

        // The first three answers cover the bank; only then may repeats occur.
        let first_three: HashSet<&String> = player.seen_answers[..3].iter().collect();
        assert_eq!(first_three.len(), 3);
    }

    #[test]
    fn test_quit_before_first_round_is_a_zero_session() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut player = ScriptedPlayer::new(None, vec![]);

        let summary = run_session(&wide_bank(), &mut player, &mut rng).unwrap();
        assert_eq!(summary.score, 0);
        assert_eq!(summary.rounds_played, 0);
        assert_eq!(summary.rounds_requested, 0);
        assert!(player.seen_answers.is_empty());
        assert!(player.summary_shown.is_some());
    }

    #[test]
    fn test_empty_bank_propagates_insufficient_bank() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut player = ScriptedPlayer::new(Some(1), vec![Play::Correct]);

        let err = run_session(&[], &mut player, &mut rng).unwrap_err();
        assert!(matches!(err, QuizError::InsufficientBank { .. }));
    }
}
