//! Application facade used by the presentation layer.
//!
//! Owns the repository and at most one live session. Starting a session
//! replaces (and thereby tears down) any previous one, so only one countdown
//! can ever be running.

use std::collections::BTreeSet;

use crate::builder::{build_quiz, QuizDraft};
use crate::error::QuizError;
use crate::model::Quiz;
use crate::repository::{QuizFilter, QuizRepository};
use crate::samples::sample_quizzes;
use crate::scorer::{score, ResultsSummary};
use crate::session::{Confirmation, QuizSession};
use crate::store::QuizStore;

pub struct QuizMaker {
    repository: QuizRepository,
    session: Option<QuizSession>,
}

impl QuizMaker {
    /// Load the collection from `store`.
    pub fn open(store: QuizStore) -> Self {
        Self {
            repository: QuizRepository::load(store),
            session: None,
        }
    }

    pub fn repository(&self) -> &QuizRepository {
        &self.repository
    }

    /// Insert the sample quizzes if the collection is empty. Returns how many
    /// were added.
    pub fn seed_samples_if_empty(&mut self) -> Result<usize, QuizError> {
        if !self.repository.is_empty() {
            return Ok(0);
        }
        let samples = sample_quizzes();
        let count = samples.len();
        self.repository.extend(samples)?;
        tracing::info!("seeded {count} sample quizzes");
        Ok(count)
    }

    pub fn list_quizzes(&self, filter: &QuizFilter) -> Vec<&Quiz> {
        self.repository.list(filter)
    }

    /// Distinct categories in alphabetical order.
    pub fn categories(&self) -> BTreeSet<String> {
        self.repository.categories()
    }

    pub fn find_quiz(&self, id: &str) -> Result<&Quiz, QuizError> {
        self.repository
            .find_by_id(id)
            .ok_or_else(|| QuizError::NotFound(id.to_string()))
    }

    /// Validate `draft`, store the resulting quiz and return it.
    ///
    /// Nothing is stored or written when validation fails.
    pub fn create_quiz(&mut self, draft: &QuizDraft) -> Result<Quiz, QuizError> {
        let quiz = build_quiz(draft)?;
        self.repository.add(quiz.clone())?;
        tracing::info!(id = %quiz.id, title = %quiz.title, "quiz created");
        Ok(quiz)
    }

    /// Delete the quiz with `id`.
    ///
    /// Returns `Ok(false)` without touching anything when the deletion is
    /// declined or no quiz has that id.
    pub fn delete_quiz(&mut self, id: &str, confirmation: Confirmation) -> Result<bool, QuizError> {
        if confirmation == Confirmation::Declined {
            return Ok(false);
        }
        let removed = self.repository.remove(id)?;
        if let Some(quiz) = &removed {
            tracing::info!(id = %quiz.id, title = %quiz.title, "quiz deleted");
        }
        Ok(removed.is_some())
    }

    /// Start taking the quiz with `id`, replacing any live session.
    ///
    /// An unknown id leaves the current session untouched.
    pub fn start_session(&mut self, id: &str) -> Result<&mut QuizSession, QuizError> {
        let quiz = self.find_quiz(id)?.clone();
        self.leave_session();
        Ok(self.session.insert(QuizSession::new(quiz)))
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut QuizSession> {
        self.session.as_mut()
    }

    /// Tear down the live session, cancelling its countdown.
    pub fn leave_session(&mut self) -> Option<QuizSession> {
        let session = self.session.take();
        if session.is_some() {
            tracing::debug!("session closed");
        }
        session
    }

    /// Score the answers captured so far in `session`.
    pub fn score_of(session: &QuizSession) -> ResultsSummary {
        match session.summary() {
            Some(summary) => summary.clone(),
            None => score(session.quiz(), session.answers()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::builder::QuestionDraft;
    use crate::error::ValidationError;
    use crate::session::TickOutcome;
    use crate::store::MemorySlot;

    fn open() -> (Arc<MemorySlot>, QuizMaker) {
        let slot = Arc::new(MemorySlot::new());
        let app = QuizMaker::open(QuizStore::new(Arc::clone(&slot)));
        (slot, app)
    }

    fn draft(title: &str, category: &str, minutes: &str) -> QuizDraft {
        QuizDraft {
            title: title.into(),
            description: String::new(),
            category: category.into(),
            time_limit_minutes: minutes.into(),
            questions: vec![
                QuestionDraft::new("One?", ["1", "2", "3", "4"], Some(0)),
                QuestionDraft::new("Two?", ["1", "2", "3", "4"], Some(1)),
                QuestionDraft::new("Three?", ["1", "2", "3", "4"], Some(2)),
            ],
        }
    }

    #[test]
    fn create_list_and_categories() {
        let (slot, mut app) = open();
        let a = app.create_quiz(&draft("Numbers", "Math", "")).unwrap();
        let b = app.create_quiz(&draft("Letters", "", "1")).unwrap();

        assert_eq!(a.questions.len(), 3);
        assert_ne!(a.id, b.id);
        assert_eq!(slot.write_count(), 2);

        let listed: Vec<&str> = app
            .list_quizzes(&QuizFilter::default())
            .into_iter()
            .map(|q| q.title.as_str())
            .collect();
        assert_eq!(listed, vec!["Numbers", "Letters"]);
        assert_eq!(
            app.categories().into_iter().collect::<Vec<_>>(),
            vec!["General", "Math"]
        );
    }

    #[test]
    fn invalid_draft_writes_nothing() {
        let (slot, mut app) = open();
        let err = app.create_quiz(&draft(" ", "Math", "")).unwrap_err();
        assert!(matches!(
            err,
            QuizError::Validation(ValidationError::MissingTitle)
        ));
        assert!(app.repository().is_empty());
        assert_eq!(slot.write_count(), 0);
    }

    #[test]
    fn delete_requires_confirmation() {
        let (slot, mut app) = open();
        let quiz = app.create_quiz(&draft("Numbers", "Math", "")).unwrap();
        let writes = slot.write_count();

        assert!(!app.delete_quiz(&quiz.id, Confirmation::Declined).unwrap());
        assert_eq!(app.repository().len(), 1);
        assert_eq!(slot.write_count(), writes);

        assert!(app.delete_quiz(&quiz.id, Confirmation::Confirmed).unwrap());
        assert!(app.repository().is_empty());
        assert!(!app.delete_quiz(&quiz.id, Confirmation::Confirmed).unwrap());
    }

    #[test]
    fn seeding_only_when_empty() {
        let (_, mut app) = open();
        assert_eq!(app.seed_samples_if_empty().unwrap(), 2);
        assert_eq!(app.seed_samples_if_empty().unwrap(), 0);
        assert_eq!(app.repository().len(), 2);
    }

    #[test]
    fn one_unreadable_record_does_not_trigger_seeding() {
        let raw = r#"[
            {"id":"keep","title":"Keep me","category":"Math","questions":[
                {"text":"Q","options":["a","b","c","d"],"correctIndex":1}]},
            {"id":"short","title":"Short","questions":[
                {"text":"Q","options":["a","b","c"],"correctIndex":0}]}
        ]"#;
        let slot = Arc::new(MemorySlot::with_contents(raw));
        let mut app = QuizMaker::open(QuizStore::new(Arc::clone(&slot)));

        assert_eq!(app.repository().len(), 1);
        assert_eq!(app.seed_samples_if_empty().unwrap(), 0);
        assert_eq!(slot.write_count(), 0);
        assert_eq!(app.find_quiz("keep").unwrap().title, "Keep me");
    }

    #[test]
    fn start_session_unknown_id() {
        let (_, mut app) = open();
        let quiz = app.create_quiz(&draft("Numbers", "Math", "")).unwrap();
        app.start_session(&quiz.id).unwrap().go_next();

        let err = app.start_session("missing").unwrap_err();
        assert!(matches!(err, QuizError::NotFound(id) if id == "missing"));
        assert_eq!(app.session().unwrap().current_index(), 1);
    }

    #[test]
    fn session_survives_quiz_deletion() {
        let (_, mut app) = open();
        let quiz = app.create_quiz(&draft("Numbers", "Math", "")).unwrap();
        app.start_session(&quiz.id).unwrap();
        app.delete_quiz(&quiz.id, Confirmation::Confirmed).unwrap();

        let session = app.session_mut().unwrap();
        session.select_answer(0).unwrap();
        assert_eq!(session.quiz().title, "Numbers");
    }

    #[test]
    fn score_of_active_and_finished_sessions() {
        let (_, mut app) = open();
        let quiz = app.create_quiz(&draft("Numbers", "Math", "")).unwrap();
        let session = app.start_session(&quiz.id).unwrap();
        session.select_answer(0).unwrap();
        session.go_next();
        session.select_answer(3).unwrap();

        let partial = QuizMaker::score_of(session);
        assert_eq!(partial.correct_count, 1);
        assert_eq!(partial.percentage, 33);

        session.finish(Confirmation::Confirmed).unwrap();
        assert_eq!(QuizMaker::score_of(session), partial);
    }

    #[tokio::test(start_paused = true)]
    async fn new_session_replaces_running_timer() {
        let (_, mut app) = open();
        let timed = app.create_quiz(&draft("Timed", "Math", "1")).unwrap();
        let other = app.create_quiz(&draft("Other", "Math", "2")).unwrap();

        let first = app.start_session(&timed.id).unwrap();
        assert!(first.arm_timer());
        assert_eq!(first.next_tick().await, Some(TickOutcome::Remaining(59)));

        let second = app.start_session(&other.id).unwrap();
        assert!(!second.timer_armed());
        assert_eq!(second.remaining_seconds(), Some(120));
        assert!(second.arm_timer());
        assert_eq!(second.next_tick().await, Some(TickOutcome::Remaining(119)));

        let left = app.leave_session().unwrap();
        assert_eq!(left.quiz().title, "Other");
        assert!(app.session().is_none());
    }
}
