// src/models/session.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    question::{Question, TriageCategory},
    test::Test,
    user::User,
};

/// Attempt mode, fixed when the session is recorded and never inferred later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestMode {
    Training,
    Exam,
}

impl TestMode {
    /// Training permits in-session hints; exam forbids them.
    pub fn allows_hints(self) -> bool {
        matches!(self, TestMode::Training)
    }
}

/// One attempt at a test. Immutable once finished.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSession {
    pub id: Uuid,
    pub test_id: Uuid,
    pub user_id: Uuid,
    pub mode: TestMode,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,

    /// Percentage of correct answers (0-100), set when the session finishes.
    pub score: Option<f64>,
}

/// One answer row per question per session.
///
/// `is_correct` is fixed at answer time; editing a question's correct answer
/// later must not rewrite historical correctness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAnswer {
    pub id: Uuid,
    pub test_session_id: Uuid,
    pub question_id: Uuid,
    pub selected_answer: TriageCategory,
    pub is_correct: bool,
}

/// A stored answer joined with its question, for per-session review.
#[derive(Debug, Clone, Serialize)]
pub struct UserAnswerWithQuestion {
    pub answer: UserAnswer,
    pub question: Question,
}

/// A finished session joined with its test and answers.
#[derive(Debug, Serialize)]
pub struct TestSessionResult {
    pub session: TestSession,
    pub test: Test,
    pub answers: Vec<UserAnswerWithQuestion>,
}

/// One group member's standing for an assigned test.
#[derive(Debug, Serialize)]
pub struct ParticipantResult {
    pub user: User,

    /// The counted exam session, if the member has one.
    pub session: Option<TestSession>,

    /// Reconstructed from the stored percentage and the difficulty-derived
    /// total; 0 when the member has not attempted the test.
    pub correct_answers: usize,
    pub total_questions: usize,
}

/// Aggregated statistics for one test assigned to one group.
#[derive(Debug, Serialize)]
pub struct GroupTestStatistics {
    /// Members whose counted session has finished.
    pub passed_count: usize,
    pub total_participants: usize,
    pub results: Vec<ParticipantResult>,
}

/// One entry of a user's results history.
#[derive(Debug, Serialize)]
pub struct CompletedResult {
    pub session: TestSession,
    pub difficulty: String,
    pub correct_answers: usize,
    pub total_questions: usize,
}
