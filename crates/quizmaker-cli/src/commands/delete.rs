//! The `quizmaker delete` command.

use anyhow::Result;

use quizmaker_core::{Confirmation, QuizmakerConfig};

use super::{confirm, open_app};

pub fn execute(config: &QuizmakerConfig, id: String, yes: bool) -> Result<()> {
    let mut app = open_app(config)?;
    let title = app.find_quiz(&id)?.title.clone();

    let confirmation = if yes || !config.confirm_destructive {
        Confirmation::Confirmed
    } else {
        confirm(&format!("Delete this quiz? ({title})"))?
    };

    if app.delete_quiz(&id, confirmation)? {
        println!("Deleted quiz: {title}");
    } else {
        println!("Cancelled.");
    }

    Ok(())
}
