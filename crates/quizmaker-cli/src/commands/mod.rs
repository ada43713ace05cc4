//! Subcommand implementations and the helpers they share.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;

use quizmaker_core::config::load_config_from;
use quizmaker_core::{Confirmation, QuizMaker, QuizmakerConfig};

pub mod categories;
pub mod create;
pub mod delete;
pub mod init;
pub mod list;
pub mod take;

/// Load the config and apply the `--data-dir` override.
pub fn load_settings(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<QuizmakerConfig> {
    let mut config = load_config_from(config_path)?;
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    Ok(config)
}

/// Open the collection, seeding the sample quizzes if configured.
pub fn open_app(config: &QuizmakerConfig) -> Result<QuizMaker> {
    tracing::debug!("opening quiz collection at {}", config.storage_path().display());
    let mut app = QuizMaker::open(config.open_store());
    if config.seed_samples {
        app.seed_samples_if_empty()?;
    }
    Ok(app)
}

/// Whether `answer` is a yes.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Ask a yes/no question on stdout and read the answer from stdin.
///
/// Anything other than `y`/`yes`, including end of input, declines.
pub fn confirm(question: &str) -> Result<Confirmation> {
    print!("{question} [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(is_yes(&answer).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yes_answers() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES \n"));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn data_dir_flag_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizmaker.toml");
        std::fs::write(&path, "data_dir = \"/from/config\"\n").unwrap();

        let config = load_settings(Some(&path), Some(PathBuf::from("/from/flag"))).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/from/flag"));
    }
}
