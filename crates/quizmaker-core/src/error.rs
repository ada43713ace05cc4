//! Error types for quizmaker.
//!
//! Every error here is recoverable: storage problems degrade to an empty or
//! unsaved collection, validation problems abort a single creation, and
//! session misuse is rejected without changing state.

use thiserror::Error;

/// Failures reading or writing the storage slot.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The slot could not be read or written.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The slot holds something other than a collection of quizzes.
    #[error("stored quizzes are corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// The collection could not be serialized.
    #[error("failed to serialize quizzes: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Why a draft could not become a quiz. Question indices are 0-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please enter a quiz title")]
    MissingTitle,

    #[error("please add at least one question")]
    NoQuestions,

    #[error("please enter text for question #{}", .0 + 1)]
    MissingQuestionText(usize),

    #[error("please fill all options for question #{}", .0 + 1)]
    MissingOption(usize),

    #[error("question #{} marks an option that does not exist", .0 + 1)]
    CorrectOptionOutOfRange(usize),
}

/// Errors returned by the application facade.
#[derive(Debug, Error)]
pub enum QuizError {
    /// No quiz with the requested id.
    #[error("quiz not found: {0}")]
    NotFound(String),

    /// A quiz with this id is already stored.
    #[error("duplicate quiz id: {0}")]
    DuplicateId(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The change is held in memory but could not be persisted.
    #[error("quiz change not persisted: {0}")]
    Storage(#[from] StoreError),
}

/// Misuse of a quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session has already finished.
    #[error("the quiz session has already finished")]
    NotActive,

    /// The selected option does not exist on the current question.
    #[error("option {index} does not exist")]
    OptionOutOfRange { index: usize },
}
