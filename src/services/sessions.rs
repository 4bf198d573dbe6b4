// src/services/sessions.rs

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    models::{
        question::{Question, TriageCategory},
        session::{TestMode, TestSession, TestSessionResult, UserAnswer, UserAnswerWithQuestion},
    },
    store::Store,
};

/// Finalizes an attempt: scores it, persists one answer row per question and
/// appends the finished session.
///
/// Positions in `answers_by_position` are 1-based. A position with no
/// recorded answer has the question's own correct answer substituted, so
/// unanswered questions score as correct — long-standing behavior this
/// function preserves (see DESIGN.md). `is_correct` is fixed here and never
/// recomputed; no separate start event is modeled, so the attempt carries a
/// single timestamp.
pub fn finish_session(
    store: &mut Store,
    test_id: Uuid,
    user_id: Uuid,
    mode: TestMode,
    ordered_questions: &[Question],
    answers_by_position: &HashMap<usize, TriageCategory>,
) -> TestSession {
    let now = Utc::now();
    let session_id = Uuid::new_v4();

    let mut correct_count = 0usize;
    for (index, question) in ordered_questions.iter().enumerate() {
        let position = index + 1;
        let selected = answers_by_position
            .get(&position)
            .copied()
            .unwrap_or(question.correct_answer);
        let is_correct = selected == question.correct_answer;
        if is_correct {
            correct_count += 1;
        }

        store.answers.push(UserAnswer {
            id: Uuid::new_v4(),
            test_session_id: session_id,
            question_id: question.id,
            selected_answer: selected,
            is_correct,
        });
    }

    let total = ordered_questions.len();
    let score = if total == 0 {
        0.0
    } else {
        correct_count as f64 / total as f64 * 100.0
    };

    let session = TestSession {
        id: session_id,
        test_id,
        user_id,
        mode,
        start_time: now,
        end_time: Some(now),
        score: Some(score),
    };
    store.sessions.push(session.clone());

    tracing::info!(
        "Finished {:?} session {} for test {}: {}/{} correct",
        mode,
        session_id,
        test_id,
        correct_count,
        total
    );
    session
}

pub fn sessions_for_user(store: &Store, user_id: Uuid) -> Vec<TestSession> {
    store
        .sessions
        .iter()
        .filter(|s| s.user_id == user_id)
        .cloned()
        .collect()
}

pub fn sessions_for_test(store: &Store, test_id: Uuid) -> Vec<TestSession> {
    store
        .sessions
        .iter()
        .filter(|s| s.test_id == test_id)
        .cloned()
        .collect()
}

/// A session joined with its test and each stored answer's question, for the
/// per-session review view.
pub fn session_result(store: &Store, session_id: Uuid) -> Option<TestSessionResult> {
    let session = store.session(session_id)?.clone();
    let test = store.test(session.test_id)?.clone();

    let answers = store
        .answers
        .iter()
        .filter(|a| a.test_session_id == session_id)
        .filter_map(|a| {
            store.question(a.question_id).map(|q| UserAnswerWithQuestion {
                answer: a.clone(),
                question: q.clone(),
            })
        })
        .collect();

    Some(TestSessionResult {
        session,
        test,
        answers,
    })
}
