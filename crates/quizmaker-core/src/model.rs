//! Core data model types for quizmaker.
//!
//! These are the records that get persisted, listed and taken. Field names
//! serialize in camelCase so the stored collection keeps its established
//! JSON layout.

use serde::{Deserialize, Deserializer, Serialize};

/// Category assigned to quizzes that don't name one.
pub const DEFAULT_CATEGORY: &str = "General";

/// Number of answer options every question carries.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// The question prompt.
    pub text: String,
    /// Exactly four answer options, in display order.
    pub options: [String; OPTIONS_PER_QUESTION],
    /// Index into `options` of the correct answer.
    pub correct_index: usize,
}

impl Question {
    /// Text of the correct option.
    pub fn correct_option(&self) -> &str {
        self.options
            .get(self.correct_index)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Whether `correct_index` points at an actual option.
    pub fn is_well_formed(&self) -> bool {
        self.correct_index < OPTIONS_PER_QUESTION
    }
}

/// A named set of questions with an optional category and time limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    /// Opaque unique identifier.
    pub id: String,
    /// Human-readable title, never empty.
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Always resolved; blank or missing values become [`DEFAULT_CATEGORY`].
    #[serde(default = "default_category", deserialize_with = "deserialize_category")]
    pub category: String,
    /// Countdown length. `None` means the quiz is untimed.
    #[serde(default)]
    pub time_limit_seconds: Option<u32>,
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Whether the quiz runs with a countdown.
    pub fn is_timed(&self) -> bool {
        matches!(self.time_limit_seconds, Some(s) if s > 0)
    }

    /// Time limit rounded to whole minutes, for list display.
    pub fn time_limit_minutes(&self) -> Option<u32> {
        self.time_limit_seconds
            .filter(|s| *s > 0)
            .map(|s| (s + 30) / 60)
    }

    /// Whether the record can be taken: at least one question and every
    /// correct index in range.
    pub fn is_well_formed(&self) -> bool {
        !self.questions.is_empty() && self.questions.iter().all(Question::is_well_formed)
    }
}

/// Resolve a possibly-absent category to its stored form.
///
/// Applied when reading persisted records and when building new ones, so the
/// rest of the crate never sees an empty category.
pub fn resolve_category(category: Option<&str>) -> String {
    match category.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => DEFAULT_CATEGORY.to_string(),
    }
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn deserialize_category<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(resolve_category(raw.as_deref()))
}

/// Format a second count as `mm:ss`.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
