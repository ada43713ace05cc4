//! Scoring of captured answers against a quiz.

use serde::{Deserialize, Serialize};

use crate::model::Quiz;

/// Outcome for a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResult {
    /// Option the user picked, if any.
    pub user_answer: Option<usize>,
    pub correct_index: usize,
    pub is_correct: bool,
}

/// Per-question outcomes plus the aggregate score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsSummary {
    pub questions: Vec<QuestionResult>,
    pub correct_count: usize,
    pub total: usize,
    /// `correct_count / total * 100`, rounded half-up.
    pub percentage: u32,
}

impl ResultsSummary {
    /// One-line score, e.g. `You scored 2 out of 3 (67%).`
    pub fn headline(&self) -> String {
        format!(
            "You scored {} out of {} ({}%).",
            self.correct_count, self.total, self.percentage
        )
    }

    /// Human-readable lines for each question of `quiz`.
    pub fn details<'a>(&'a self, quiz: &'a Quiz) -> impl Iterator<Item = ResultLine<'a>> + 'a {
        self.questions
            .iter()
            .zip(&quiz.questions)
            .enumerate()
            .map(|(index, (result, question))| ResultLine {
                number: index + 1,
                question: &question.text,
                user_answer: result
                    .user_answer
                    .and_then(|i| question.options.get(i))
                    .map(String::as_str),
                correct_answer: question.correct_option(),
                is_correct: result.is_correct,
            })
    }
}

/// A question's result resolved to display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLine<'a> {
    /// 1-based question number.
    pub number: usize,
    pub question: &'a str,
    pub user_answer: Option<&'a str>,
    pub correct_answer: &'a str,
    pub is_correct: bool,
}

impl ResultLine<'_> {
    /// The user's answer, or `No answer selected`.
    pub fn user_answer_text(&self) -> &str {
        self.user_answer.unwrap_or("No answer selected")
    }
}

/// Score `answers` against `quiz`.
///
/// Slots that are missing or `None` count as incorrect.
pub fn score(quiz: &Quiz, answers: &[Option<usize>]) -> ResultsSummary {
    let questions: Vec<QuestionResult> = quiz
        .questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let user_answer = answers.get(i).copied().flatten();
            QuestionResult {
                user_answer,
                correct_index: q.correct_index,
                is_correct: user_answer == Some(q.correct_index),
            }
        })
        .collect();

    let total = questions.len();
    let correct_count = questions.iter().filter(|r| r.is_correct).count();

    ResultsSummary {
        questions,
        correct_count,
        total,
        percentage: percentage(correct_count, total),
    }
}

/// Integer percentage rounded half-up. An empty quiz scores 0.
pub fn percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((correct * 100 * 2 + total) / (total * 2)) as u32
}
