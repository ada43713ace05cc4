//! The `quizmaker create` command.

use std::path::PathBuf;

use anyhow::Result;

use quizmaker_core::draft::parse_draft_file;
use quizmaker_core::QuizmakerConfig;

use super::open_app;

pub fn execute(config: &QuizmakerConfig, draft_path: PathBuf) -> Result<()> {
    let draft = parse_draft_file(&draft_path)?;
    let mut app = open_app(config)?;

    let quiz = app.create_quiz(&draft)?;

    println!("Quiz saved successfully!");
    println!(
        "  {} ({}, {} question(s)) id: {}",
        quiz.title,
        quiz.category,
        quiz.questions.len(),
        quiz.id
    );

    Ok(())
}
