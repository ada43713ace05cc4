//! The quiz-taking state machine.
//!
//! A session starts `Active` on the first question with every answer slot
//! empty, and ends `Finished` either when the user submits or when the
//! countdown reaches zero. `Finished` is terminal.

use crate::error::SessionError;
use crate::model::{Question, Quiz, OPTIONS_PER_QUESTION};
use crate::scorer::{score, ResultsSummary};
use crate::ticker::{Ticker, TICK_PERIOD};

/// Whether the user wants to go ahead with a destructive action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}

/// How a session reached `Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// The user finished early or after the last question.
    Submitted,
    /// The countdown reached zero.
    TimeUp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Finished {
        reason: FinishReason,
        summary: ResultsSummary,
    },
}

/// Immediate feedback after selecting an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerFeedback {
    Correct,
    Incorrect { correct_option: String },
}

impl AnswerFeedback {
    pub fn is_correct(&self) -> bool {
        matches!(self, AnswerFeedback::Correct)
    }

    /// Display message for the feedback line.
    pub fn message(&self) -> String {
        match self {
            AnswerFeedback::Correct => "Correct!".to_string(),
            AnswerFeedback::Incorrect { correct_option } => {
                format!("Incorrect. Correct answer: {correct_option}")
            }
        }
    }
}

/// Result of a countdown pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Seconds left after this pulse.
    Remaining(u32),
    /// This pulse exhausted the countdown and finished the session.
    TimeUp,
    /// The session is untimed or already finished; nothing changed.
    Ignored,
}

/// A user working through one quiz.
#[derive(Debug)]
pub struct QuizSession {
    quiz: Quiz,
    current_index: usize,
    answers: Vec<Option<usize>>,
    remaining_seconds: Option<u32>,
    state: SessionState,
    ticker: Option<Ticker>,
}

impl QuizSession {
    /// Start a session on the first question with no answers captured.
    pub fn new(quiz: Quiz) -> Self {
        let answers = vec![None; quiz.questions.len()];
        let remaining_seconds = quiz.time_limit_seconds.filter(|s| *s > 0);
        Self {
            quiz,
            current_index: 0,
            answers,
            remaining_seconds,
            state: SessionState::Active,
            ticker: None,
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active)
    }

    pub fn is_timed(&self) -> bool {
        self.remaining_seconds.is_some()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.questions.get(self.current_index)
    }

    /// Answer captured for the current question.
    pub fn current_answer(&self) -> Option<usize> {
        self.answers.get(self.current_index).copied().flatten()
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn remaining_seconds(&self) -> Option<u32> {
        self.remaining_seconds
    }

    /// `(current question number, total questions)`, 1-based.
    pub fn progress(&self) -> (usize, usize) {
        (self.current_index + 1, self.quiz.questions.len())
    }

    pub fn can_go_previous(&self) -> bool {
        self.is_active() && self.current_index > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.is_active() && self.current_index + 1 < self.quiz.questions.len()
    }

    /// Results once the session has finished.
    pub fn summary(&self) -> Option<&ResultsSummary> {
        match &self.state {
            SessionState::Finished { summary, .. } => Some(summary),
            SessionState::Active => None,
        }
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        match &self.state {
            SessionState::Finished { reason, .. } => Some(*reason),
            SessionState::Active => None,
        }
    }

    /// Feedback for `option_index` on the current question, without
    /// recording anything.
    pub fn feedback_for(&self, option_index: usize) -> Option<AnswerFeedback> {
        let question = self.current_question()?;
        Some(if option_index == question.correct_index {
            AnswerFeedback::Correct
        } else {
            AnswerFeedback::Incorrect {
                correct_option: question.correct_option().to_string(),
            }
        })
    }

    /// Record `option_index` as the answer to the current question.
    ///
    /// Selecting again overwrites the previous choice.
    pub fn select_answer(&mut self, option_index: usize) -> Result<AnswerFeedback, SessionError> {
        if !self.is_active() {
            return Err(SessionError::NotActive);
        }
        if option_index >= OPTIONS_PER_QUESTION {
            return Err(SessionError::OptionOutOfRange {
                index: option_index,
            });
        }
        let feedback = self
            .feedback_for(option_index)
            .ok_or(SessionError::NotActive)?;
        self.answers[self.current_index] = Some(option_index);
        tracing::debug!(
            question = self.current_index,
            option = option_index,
            "answer selected"
        );
        Ok(feedback)
    }

    /// Move to the next question. Returns `false` at the last question or
    /// when finished.
    pub fn go_next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.current_index += 1;
        tracing::debug!(question = self.current_index, "moved forward");
        true
    }

    /// Move to the previous question. Returns `false` at the first question
    /// or when finished.
    pub fn go_previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.current_index -= 1;
        tracing::debug!(question = self.current_index, "moved back");
        true
    }

    /// Advance the countdown by one second, finishing the session when it
    /// reaches zero.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_active() {
            return TickOutcome::Ignored;
        }
        let Some(remaining) = self.remaining_seconds.as_mut() else {
            return TickOutcome::Ignored;
        };

        *remaining = remaining.saturating_sub(1);
        let left = *remaining;
        if left == 0 {
            self.complete(FinishReason::TimeUp);
            return TickOutcome::TimeUp;
        }
        TickOutcome::Remaining(left)
    }

    /// End the session early. A declined confirmation changes nothing and
    /// returns `Ok(None)`.
    pub fn finish(
        &mut self,
        confirmation: Confirmation,
    ) -> Result<Option<&ResultsSummary>, SessionError> {
        if !self.is_active() {
            return Err(SessionError::NotActive);
        }
        if confirmation == Confirmation::Declined {
            return Ok(None);
        }
        self.complete(FinishReason::Submitted);
        Ok(self.summary())
    }

    /// Spawn the per-second countdown for a timed session.
    ///
    /// Must be called from within a tokio runtime. Returns `false` when the
    /// session is untimed, finished, or already armed.
    pub fn arm_timer(&mut self) -> bool {
        if !self.is_active() || !self.is_timed() || self.ticker.is_some() {
            return false;
        }
        self.ticker = Some(Ticker::spawn(TICK_PERIOD));
        tracing::debug!(
            seconds = self.remaining_seconds.unwrap_or_default(),
            "timer armed"
        );
        true
    }

    pub fn timer_armed(&self) -> bool {
        self.ticker.is_some()
    }

    /// Wait for the next pulse from the armed timer and apply it.
    ///
    /// Returns `None` when no timer is armed, so callers should only poll
    /// this while [`QuizSession::timer_armed`] holds.
    pub async fn next_tick(&mut self) -> Option<TickOutcome> {
        let ticker = self.ticker.as_mut()?;
        ticker.tick().await?;
        Some(self.tick())
    }

    fn complete(&mut self, reason: FinishReason) {
        self.disarm_timer();
        let summary = score(&self.quiz, &self.answers);
        tracing::info!(
            quiz = %self.quiz.id,
            correct = summary.correct_count,
            total = summary.total,
            ?reason,
            "quiz session finished"
        );
        self.state = SessionState::Finished { reason, summary };
    }

    fn disarm_timer(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
            tracing::debug!("timer cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Question;

    fn quiz(time_limit_seconds: Option<u32>) -> Quiz {
        Quiz {
            id: "s".into(),
            title: "Session".into(),
            description: String::new(),
            category: "General".into(),
            time_limit_seconds,
            questions: (0..3)
                .map(|i| Question {
                    text: format!("Question {i}"),
                    options: ["w".into(), "x".into(), "y".into(), "z".into()],
                    correct_index: i,
                })
                .collect(),
        }
    }

    #[test]
    fn starts_on_first_question_unanswered() {
        let session = QuizSession::new(quiz(Some(30)));
        assert!(session.is_active());
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.answers(), &[None, None, None]);
        assert_eq!(session.remaining_seconds(), Some(30));
        assert_eq!(session.progress(), (1, 3));
        assert!(!session.timer_armed());
    }

    #[test]
    fn navigation_is_clamped() {
        let mut session = QuizSession::new(quiz(None));
        assert!(!session.go_previous());
        assert_eq!(session.current_index(), 0);

        assert!(session.go_next());
        assert!(session.go_next());
        assert!(!session.go_next());
        assert_eq!(session.current_index(), 2);
        assert!(!session.can_go_next());

        assert!(session.go_previous());
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn select_answer_records_and_overwrites() {
        let mut session = QuizSession::new(quiz(None));
        let feedback = session.select_answer(1).unwrap();
        assert_eq!(
            feedback,
            AnswerFeedback::Incorrect {
                correct_option: "w".into()
            }
        );
        assert_eq!(feedback.message(), "Incorrect. Correct answer: w");

        let feedback = session.select_answer(0).unwrap();
        assert!(feedback.is_correct());
        assert_eq!(session.answers(), &[Some(0), None, None]);
        assert!(session.is_active());
    }

    #[test]
    fn select_answer_rejects_bad_option() {
        let mut session = QuizSession::new(quiz(None));
        assert_eq!(
            session.select_answer(4),
            Err(SessionError::OptionOutOfRange { index: 4 })
        );
        assert_eq!(session.answers(), &[None, None, None]);
    }

    #[test]
    fn answers_follow_navigation() {
        let mut session = QuizSession::new(quiz(None));
        session.select_answer(0).unwrap();
        session.go_next();
        assert_eq!(session.current_answer(), None);
        session.select_answer(1).unwrap();
        session.go_previous();
        assert_eq!(session.current_answer(), Some(0));
    }

    #[test]
    fn declined_finish_is_noop() {
        let mut session = QuizSession::new(quiz(None));
        assert_eq!(session.finish(Confirmation::Declined), Ok(None));
        assert!(session.is_active());
    }

    #[test]
    fn finish_scores_and_is_terminal() {
        let mut session = QuizSession::new(quiz(None));
        session.select_answer(0).unwrap();
        session.go_next();
        session.select_answer(3).unwrap();

        let summary = session.finish(Confirmation::Confirmed).unwrap().unwrap();
        assert_eq!(summary.correct_count, 1);
        assert_eq!(summary.percentage, 33);
        assert_eq!(session.finish_reason(), Some(FinishReason::Submitted));

        assert_eq!(session.select_answer(0), Err(SessionError::NotActive));
        assert!(!session.go_next());
        assert!(!session.go_previous());
        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert!(session.finish(Confirmation::Confirmed).is_err());
    }

    #[test]
    fn untimed_tick_is_ignored() {
        let mut session = QuizSession::new(quiz(None));
        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert!(session.is_active());
        assert!(!session.arm_timer());
    }

    #[test]
    fn timer_expiry_after_limit_ticks() {
        let mut session = QuizSession::new(quiz(Some(5)));
        session.select_answer(0).unwrap();

        for expected in (1..5).rev() {
            assert_eq!(session.tick(), TickOutcome::Remaining(expected));
            assert!(session.is_active());
        }
        assert_eq!(session.tick(), TickOutcome::TimeUp);

        assert_eq!(session.finish_reason(), Some(FinishReason::TimeUp));
        let summary = session.summary().unwrap();
        assert_eq!(summary.correct_count, 1);
        assert_eq!(summary.total, 3);
        assert_eq!(session.tick(), TickOutcome::Ignored);
    }

    #[tokio::test(start_paused = true)]
    async fn armed_timer_drives_expiry() {
        let mut session = QuizSession::new(quiz(Some(3)));
        assert!(session.arm_timer());
        assert!(!session.arm_timer());

        assert_eq!(session.next_tick().await, Some(TickOutcome::Remaining(2)));
        assert_eq!(session.next_tick().await, Some(TickOutcome::Remaining(1)));
        assert_eq!(session.next_tick().await, Some(TickOutcome::TimeUp));

        assert!(!session.is_active());
        assert!(!session.timer_armed());
        assert_eq!(session.next_tick().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn finishing_cancels_timer() {
        let mut session = QuizSession::new(quiz(Some(60)));
        session.arm_timer();
        session.next_tick().await;
        assert_eq!(session.remaining_seconds(), Some(59));

        session.finish(Confirmation::Confirmed).unwrap();
        assert!(!session.timer_armed());
        assert_eq!(session.next_tick().await, None);
        assert_eq!(session.remaining_seconds(), Some(59));
    }
}
