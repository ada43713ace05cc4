//! The `quizmaker categories` command.

use anyhow::Result;

use quizmaker_core::QuizmakerConfig;

use super::open_app;

pub fn execute(config: &QuizmakerConfig) -> Result<()> {
    let app = open_app(config)?;
    let categories = app.categories();

    if categories.is_empty() {
        println!("No categories yet.");
    }
    for category in &categories {
        println!("{category}");
    }

    Ok(())
}
