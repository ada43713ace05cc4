//! TOML quiz draft parser.
//!
//! Loads drafts authored as files. Parsing only checks the file's shape;
//! the content is validated later by [`crate::builder::build_quiz`].

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::builder::{QuestionDraft, QuizDraft};
use crate::model::OPTIONS_PER_QUESTION;

/// Intermediate TOML structure for draft files.
#[derive(Debug, Deserialize)]
struct TomlDraftFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    time_limit_minutes: Option<toml::Value>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    #[serde(default)]
    text: String,
    #[serde(default)]
    options: Vec<String>,
    /// 1-based option number.
    #[serde(default)]
    correct: Option<usize>,
}

/// Parse a draft file.
pub fn parse_draft_file(path: &Path) -> Result<QuizDraft> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read draft file: {}", path.display()))?;

    parse_draft_str(&content, path)
}

/// Parse a TOML string into a draft (useful for testing).
pub fn parse_draft_str(content: &str, source_path: &Path) -> Result<QuizDraft> {
    let parsed: TomlDraftFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let time_limit_minutes = match parsed.quiz.time_limit_minutes {
        None => String::new(),
        Some(toml::Value::String(s)) => s,
        Some(toml::Value::Integer(n)) => n.to_string(),
        Some(other) => anyhow::bail!(
            "time_limit_minutes must be a number or string, got {}",
            other.type_str()
        ),
    };

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            let count = q.options.len();
            let options: [String; OPTIONS_PER_QUESTION] = q.options.try_into().map_err(|_| {
                anyhow::anyhow!(
                    "question #{} must have exactly {OPTIONS_PER_QUESTION} options, got {count}",
                    i + 1
                )
            })?;
            let correct = match q.correct {
                None => None,
                Some(0) => anyhow::bail!("question #{}: options are numbered from 1", i + 1),
                Some(n) => Some(n - 1),
            };
            Ok(QuestionDraft {
                text: q.text,
                options,
                correct,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuizDraft {
        title: parsed.quiz.title,
        description: parsed.quiz.description,
        category: parsed.quiz.category,
        time_limit_minutes,
        questions,
    })
}

/// Starter draft written by `quizmaker init`.
pub const EXAMPLE_DRAFT: &str = r#"[quiz]
title = "Ownership Warm-up"
description = "A few questions about Rust ownership"
category = "Rust"
# Minutes; leave out or set to 0 for an untimed quiz.
time_limit_minutes = 2

[[questions]]
text = "What happens to a `String` when it is moved into a function?"
options = [
    "It is copied",
    "The caller can no longer use it",
    "It becomes a reference",
    "It is dropped immediately",
]
correct = 2

[[questions]]
text = "How many mutable references to a value may exist at once?"
options = ["Zero", "One", "Two", "Unlimited"]
correct = 2
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_quiz;
    use std::path::PathBuf;

    #[test]
    fn parse_example_draft() {
        let draft = parse_draft_str(EXAMPLE_DRAFT, &PathBuf::from("example.toml")).unwrap();
        assert_eq!(draft.title, "Ownership Warm-up");
        assert_eq!(draft.time_limit_minutes, "2");
        assert_eq!(draft.questions.len(), 2);
        assert_eq!(draft.questions[0].correct, Some(1));

        let quiz = build_quiz(&draft).unwrap();
        assert_eq!(quiz.time_limit_seconds, Some(120));
        assert_eq!(quiz.questions[1].correct_option(), "One");
    }

    #[test]
    fn parse_minimal_draft() {
        let toml = r#"
[quiz]
title = "Minimal"

[[questions]]
text = "Q"
options = ["a", "b", "c", "d"]
"#;
        let draft = parse_draft_str(toml, &PathBuf::from("d.toml")).unwrap();
        assert_eq!(draft.category, "");
        assert_eq!(draft.time_limit_minutes, "");
        assert_eq!(draft.questions[0].correct, None);
        assert_eq!(build_quiz(&draft).unwrap().questions[0].correct_index, 0);
    }

    #[test]
    fn string_time_limit_is_kept_verbatim() {
        let toml = r#"
[quiz]
title = "T"
time_limit_minutes = "soon"
"#;
        let draft = parse_draft_str(toml, &PathBuf::from("d.toml")).unwrap();
        assert_eq!(draft.time_limit_minutes, "soon");
        assert!(draft.questions.is_empty());
    }

    #[test]
    fn wrong_option_count() {
        let toml = r#"
[quiz]
title = "T"

[[questions]]
text = "Q"
options = ["a", "b"]
"#;
        let err = parse_draft_str(toml, &PathBuf::from("d.toml")).unwrap_err();
        assert!(err.to_string().contains("exactly 4 options"));
    }

    #[test]
    fn zero_correct_is_rejected() {
        let toml = r#"
[quiz]
title = "T"

[[questions]]
text = "Q"
options = ["a", "b", "c", "d"]
correct = 0
"#;
        assert!(parse_draft_str(toml, &PathBuf::from("d.toml")).is_err());
    }

    #[test]
    fn malformed_toml() {
        let result = parse_draft_str("not [valid toml }{", &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn missing_file() {
        assert!(parse_draft_file(Path::new("/definitely/not/here.toml")).is_err());
    }
}
