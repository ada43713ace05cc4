//! The `quizmaker list` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizmaker_core::{Quiz, QuizFilter, QuizmakerConfig};

use super::open_app;

pub fn execute(config: &QuizmakerConfig, search: String, category: String, json: bool) -> Result<()> {
    let app = open_app(config)?;
    let filter = QuizFilter::new(search, category);
    let quizzes = app.list_quizzes(&filter);

    if json {
        println!("{}", serde_json::to_string_pretty(&quizzes)?);
        return Ok(());
    }

    if quizzes.is_empty() {
        println!("No quizzes found. Try creating one!");
        return Ok(());
    }

    println!("{}", quiz_table(&quizzes));
    Ok(())
}

fn quiz_table(quizzes: &[&Quiz]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Category", "Questions", "Timer"]);

    for quiz in quizzes {
        let timer = match quiz.time_limit_minutes() {
            Some(minutes) => format!("{minutes} min"),
            None => "-".to_string(),
        };
        table.add_row(vec![
            Cell::new(&quiz.id),
            Cell::new(&quiz.title),
            Cell::new(&quiz.category),
            Cell::new(quiz.questions.len()),
            Cell::new(timer),
        ]);
    }

    table
}
