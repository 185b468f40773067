// Library interface for word-quiz
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod generator;
pub mod logging;
pub mod session;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use error::QuizError;
pub use generator::{
    BLANK, OPTION_COUNT, Question, mask_word, next_question, select_options, validate_selection,
};
pub use session::{ChoiceInput, DEFAULT_ROUNDS, SessionInterface, SessionSummary, run_session};
pub use wordbank::{load_wordbank_from_file, load_wordbank_from_str};
