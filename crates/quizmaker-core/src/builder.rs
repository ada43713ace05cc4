//! Turns unvalidated drafts into quizzes.
//!
//! Validation is fail-fast: the first problem found is returned and nothing
//! is built.

use uuid::Uuid;

use crate::error::ValidationError;
use crate::model::{resolve_category, Question, Quiz, OPTIONS_PER_QUESTION};

/// User input for a new quiz, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizDraft {
    pub title: String,
    pub description: String,
    /// Blank means [`crate::model::DEFAULT_CATEGORY`].
    pub category: String,
    /// Free text in minutes. Anything that isn't a positive integer means
    /// the quiz is untimed.
    pub time_limit_minutes: String,
    pub questions: Vec<QuestionDraft>,
}

/// User input for one question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub text: String,
    pub options: [String; OPTIONS_PER_QUESTION],
    /// Option marked as correct. `None` selects the first option.
    pub correct: Option<usize>,
}

impl QuestionDraft {
    pub fn new(
        text: impl Into<String>,
        options: [&str; OPTIONS_PER_QUESTION],
        correct: Option<usize>,
    ) -> Self {
        Self {
            text: text.into(),
            options: options.map(str::to_string),
            correct,
        }
    }
}

/// Validate `draft` and build a quiz with a freshly allocated id.
pub fn build_quiz(draft: &QuizDraft) -> Result<Quiz, ValidationError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if draft.questions.is_empty() {
        return Err(ValidationError::NoQuestions);
    }

    let questions = draft
        .questions
        .iter()
        .enumerate()
        .map(|(index, q)| build_question(index, q))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Quiz {
        id: new_quiz_id(),
        title: title.to_string(),
        description: draft.description.trim().to_string(),
        category: resolve_category(Some(&draft.category)),
        time_limit_seconds: parse_time_limit(&draft.time_limit_minutes),
        questions,
    })
}

fn build_question(index: usize, draft: &QuestionDraft) -> Result<Question, ValidationError> {
    let text = draft.text.trim();
    if text.is_empty() {
        return Err(ValidationError::MissingQuestionText(index));
    }
    if draft.options.iter().any(|o| o.trim().is_empty()) {
        return Err(ValidationError::MissingOption(index));
    }

    let correct_index = draft.correct.unwrap_or(0);
    if correct_index >= OPTIONS_PER_QUESTION {
        return Err(ValidationError::CorrectOptionOutOfRange(index));
    }

    Ok(Question {
        text: text.to_string(),
        options: draft.options.clone().map(|o| o.trim().to_string()),
        correct_index,
    })
}

/// Parse a minutes field into a limit in seconds.
///
/// Leading whitespace is skipped and the leading run of digits is used, so
/// `"5"`, `" 5 "` and `"5min"` all mean five minutes. Zero, negative, empty,
/// non-numeric or overflowing input yields `None`.
pub fn parse_time_limit(minutes: &str) -> Option<u32> {
    let trimmed = minutes.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    let minutes: u32 = digits[..end].parse().ok()?;
    if minutes == 0 {
        return None;
    }
    minutes.checked_mul(60)
}

/// Allocate an opaque id that is unique within the process.
pub fn new_quiz_id() -> String {
    Uuid::new_v4().simple().to_string()
}
