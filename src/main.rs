use std::io;

use rand::thread_rng;

use word_quiz::cli::{self, CliInterface, parse_cli};
use word_quiz::info_log;
use word_quiz::logging;
use word_quiz::session::run_session;
use word_quiz::tui::TuiInterface;
use word_quiz::wordbank::{
    EMBEDDED_WORDBANK, MIN_WORDBANK_SIZE, default_user_wordbank_path, load_wordbank_from_file,
    load_wordbank_from_str,
};

fn resolve_wordbank(path_flag: Option<&str>) -> Option<Vec<String>> {
    match path_flag {
        Some(path) => match load_wordbank_from_file(path) {
            Ok(words) => Some(words),
            Err(e) => {
                eprintln!("Failed to load word bank from '{path}': {e}");
                None
            }
        },
        None => {
            if let Some(user_path) = default_user_wordbank_path()
                && user_path.exists()
                && let Ok(words) = load_wordbank_from_file(&user_path)
            {
                info_log!("Loaded user word bank from {}", user_path.display());
                return Some(words);
            }
            Some(load_wordbank_from_str(EMBEDDED_WORDBANK))
        }
    }
}

fn main() {
    logging::init();
    let cli = parse_cli();

    let Some(wordbank) = resolve_wordbank(cli.wordbank_path.as_deref()) else {
        return;
    };
    if wordbank.len() < MIN_WORDBANK_SIZE {
        eprintln!(
            "Word bank has {} usable words; at least {MIN_WORDBANK_SIZE} are needed.",
            wordbank.len()
        );
        return;
    }

    let mut rng = thread_rng();
    let result = if cli.tui {
        match TuiInterface::new() {
            Ok(mut interface) => run_session(&wordbank, &mut interface, &mut rng),
            Err(e) => {
                eprintln!("Failed to initialize the terminal UI: {e}");
                return;
            }
        }
    } else {
        cli::display_welcome(wordbank.len());
        let mut interface = CliInterface::new(io::stdin().lock());
        run_session(&wordbank, &mut interface, &mut rng)
    };

    match result {
        Ok(summary) => {
            log::info!(
                "Session finished: {}/{} in {}s",
                summary.score,
                summary.rounds_played,
                (chrono::Utc::now() - summary.started_at).num_seconds()
            );
        }
        Err(e) => eprintln!("Quiz failed: {e}"),
    }
}
