//! quizmaker-core — quiz authoring, storage, sessions and scoring.
//!
//! This crate holds everything except presentation: the quiz model, the
//! persisted collection, draft validation, the quiz-taking state machine
//! with its countdown, and scoring.

pub mod app;
pub mod builder;
pub mod config;
pub mod draft;
pub mod error;
pub mod model;
pub mod repository;
pub mod samples;
pub mod scorer;
pub mod session;
pub mod store;
pub mod ticker;

pub use app::QuizMaker;
pub use builder::{build_quiz, QuestionDraft, QuizDraft};
pub use config::{load_config, load_config_from, QuizmakerConfig};
pub use error::{QuizError, SessionError, StoreError, ValidationError};
pub use model::{Question, Quiz};
pub use repository::{QuizFilter, QuizRepository};
pub use scorer::{score, ResultsSummary};
pub use session::{AnswerFeedback, Confirmation, QuizSession, TickOutcome};
pub use store::{QuizStore, StorageSlot};
