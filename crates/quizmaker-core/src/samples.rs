//! Starter quizzes seeded into an empty collection.

use crate::builder::new_quiz_id;
use crate::model::{Question, Quiz};

fn question(text: &str, options: [&str; 4], correct_index: usize) -> Question {
    Question {
        text: text.to_string(),
        options: options.map(str::to_string),
        correct_index,
    }
}

/// Two ready-to-take quizzes with fresh ids.
pub fn sample_quizzes() -> Vec<Quiz> {
    vec![
        Quiz {
            id: new_quiz_id(),
            title: "Rust Basics".to_string(),
            description: "Test your basic Rust knowledge.".to_string(),
            category: "Rust".to_string(),
            time_limit_seconds: Some(120),
            questions: vec![
                question(
                    "Which keyword declares a binding that can be reassigned?",
                    ["let", "let mut", "const", "static"],
                    1,
                ),
                question(
                    "What does the `?` operator do on an `Err` value?",
                    [
                        "Panics",
                        "Ignores the error",
                        "Returns the error from the function",
                        "Converts it to `None`",
                    ],
                    2,
                ),
                question(
                    "Which trait lets a type be printed with `{:?}`?",
                    ["Debug", "Display", "Clone", "Format"],
                    0,
                ),
            ],
        },
        Quiz {
            id: new_quiz_id(),
            title: "General Knowledge - Mixed".to_string(),
            description: "A quick general knowledge quiz.".to_string(),
            category: "General".to_string(),
            time_limit_seconds: Some(180),
            questions: vec![
                question(
                    "Which is the largest planet in our solar system?",
                    ["Earth", "Jupiter", "Saturn", "Mars"],
                    1,
                ),
                question(
                    "Who wrote 'Romeo and Juliet'?",
                    [
                        "William Shakespeare",
                        "Charles Dickens",
                        "Jane Austen",
                        "Mark Twain",
                    ],
                    0,
                ),
                question(
                    "What is H2O commonly known as?",
                    ["Salt", "Oxygen", "Water", "Hydrogen"],
                    2,
                ),
            ],
        },
    ]
}
