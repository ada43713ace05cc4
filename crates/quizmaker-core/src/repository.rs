//! In-memory quiz collection mirrored to a [`QuizStore`].
//!
//! The in-memory collection is the source of truth for the life of the
//! process. Every mutation is applied in memory first and then saved; a
//! failed save is reported but does not roll the change back.

use std::collections::{BTreeSet, HashSet};

use crate::error::{QuizError, StoreError};
use crate::model::Quiz;
use crate::store::QuizStore;

/// Category filter value that matches every quiz.
pub const ALL_CATEGORIES: &str = "all";

/// Criteria for listing quizzes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizFilter {
    /// Case-insensitive substring matched against titles. Empty matches all.
    pub search_term: String,
    /// Exact category, or [`ALL_CATEGORIES`].
    pub category: String,
}

impl Default for QuizFilter {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl QuizFilter {
    pub fn new(search_term: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            category: category.into(),
        }
    }

    /// Filter on title text only.
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            ..Self::default()
        }
    }

    /// Filter on category only.
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Self::default()
        }
    }

    pub fn matches_title(&self, quiz: &Quiz) -> bool {
        let needle = self.search_term.trim().to_lowercase();
        needle.is_empty() || quiz.title.to_lowercase().contains(&needle)
    }

    pub fn matches_category(&self, quiz: &Quiz) -> bool {
        self.category == ALL_CATEGORIES || quiz.category == self.category
    }

    pub fn matches(&self, quiz: &Quiz) -> bool {
        self.matches_title(quiz) && self.matches_category(quiz)
    }
}

/// The quiz collection plus the store it is mirrored to.
pub struct QuizRepository {
    quizzes: Vec<Quiz>,
    store: QuizStore,
}

impl QuizRepository {
    /// Load the collection from `store`.
    pub fn load(store: QuizStore) -> Self {
        let quizzes = store.load();
        tracing::debug!("loaded {} quizzes", quizzes.len());
        Self { quizzes, store }
    }

    /// All quizzes in collection order.
    pub fn all(&self) -> &[Quiz] {
        &self.quizzes
    }

    pub fn len(&self) -> usize {
        self.quizzes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }

    /// Quizzes matching `filter`, in collection order.
    pub fn list(&self, filter: &QuizFilter) -> Vec<&Quiz> {
        self.quizzes.iter().filter(|q| filter.matches(q)).collect()
    }

    /// Distinct categories, alphabetically ordered.
    pub fn categories(&self) -> BTreeSet<String> {
        self.quizzes.iter().map(|q| q.category.clone()).collect()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Quiz> {
        self.quizzes.iter().find(|q| q.id == id)
    }

    /// Append a quiz and save.
    ///
    /// A storage error is returned after the quiz is already in memory.
    pub fn add(&mut self, quiz: Quiz) -> Result<(), QuizError> {
        if self.find_by_id(&quiz.id).is_some() {
            return Err(QuizError::DuplicateId(quiz.id));
        }
        self.quizzes.push(quiz);
        self.persist()?;
        Ok(())
    }

    /// Append several quizzes with a single save.
    ///
    /// Nothing is added if any id is already taken or repeated in the batch.
    pub fn extend(&mut self, quizzes: impl IntoIterator<Item = Quiz>) -> Result<(), QuizError> {
        let batch: Vec<Quiz> = quizzes.into_iter().collect();
        let mut ids: HashSet<&str> = self.quizzes.iter().map(|q| q.id.as_str()).collect();
        if let Some(dup) = batch.iter().find(|q| !ids.insert(q.id.as_str())) {
            return Err(QuizError::DuplicateId(dup.id.clone()));
        }
        self.quizzes.extend(batch);
        self.persist()?;
        Ok(())
    }

    /// Remove the quiz with `id`. Returns `Ok(None)` (and writes nothing) when
    /// no quiz matches.
    pub fn remove(&mut self, id: &str) -> Result<Option<Quiz>, QuizError> {
        let Some(pos) = self.quizzes.iter().position(|q| q.id == id) else {
            return Ok(None);
        };
        let removed = self.quizzes.remove(pos);
        self.persist()?;
        Ok(Some(removed))
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.store.save(&self.quizzes).inspect_err(|e| {
            tracing::error!("failed to save quizzes, keeping in-memory copy: {e}");
        })
    }
}
