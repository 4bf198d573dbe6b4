// src/services/statistics.rs

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    models::{
        session::{CompletedResult, GroupTestStatistics, ParticipantResult, TestMode, TestSession},
        test::question_count_for,
        user::User,
    },
    services::groups::list_members,
    store::Store,
};

/// Per-group statistics for one assigned test.
///
/// Participants are the group roster minus the test's creator. The counted
/// attempt is the first stored exam session for the test (not the most
/// recent; see DESIGN.md). Correct counts are reconstructed from the stored
/// percentage and the difficulty-derived total, so a truncated float can be
/// off by one versus the original count.
pub fn group_test_statistics(
    store: &Store,
    group_id: Uuid,
    test_id: Uuid,
    difficulty_label: &str,
) -> GroupTestStatistics {
    let creator_id = store.test(test_id).map(|t| t.creator_id);
    let total_questions = question_count_for(difficulty_label);

    let participants: Vec<User> = list_members(store, group_id)
        .into_iter()
        .filter(|id| Some(*id) != creator_id)
        .filter_map(|id| store.user(id).cloned())
        .collect();

    let results: Vec<ParticipantResult> = participants
        .iter()
        .map(|user| {
            let session = store
                .sessions
                .iter()
                .find(|s| {
                    s.user_id == user.id && s.test_id == test_id && s.mode == TestMode::Exam
                })
                .cloned();

            let correct_answers = session
                .as_ref()
                .and_then(|s| s.score)
                .map(|score| correct_count_from(score, total_questions))
                .unwrap_or(0);

            ParticipantResult {
                user: user.clone(),
                session,
                correct_answers,
                total_questions,
            }
        })
        .collect();

    let passed_count = results
        .iter()
        .filter(|r| r.session.as_ref().is_some_and(|s| s.end_time.is_some()))
        .count();

    GroupTestStatistics {
        passed_count,
        total_participants: participants.len(),
        results,
    }
}

/// A user's finished attempts, newest first, with correct counts
/// reconstructed from each session's stored percentage.
///
/// Difficulty labels are client-local state and never persisted with a
/// session; sessions missing from the map fall back to the easy bucket.
pub fn user_results(
    store: &Store,
    user_id: Uuid,
    difficulties_by_session: &HashMap<Uuid, String>,
) -> Vec<CompletedResult> {
    let mut finished: Vec<TestSession> = store
        .sessions
        .iter()
        .filter(|s| s.user_id == user_id && s.end_time.is_some() && s.score.is_some())
        .cloned()
        .collect();
    finished.sort_by(|a, b| b.end_time.cmp(&a.end_time));

    finished
        .into_iter()
        .map(|session| {
            let difficulty = difficulties_by_session
                .get(&session.id)
                .map(String::as_str)
                .unwrap_or("easy");
            let total_questions = question_count_for(difficulty);
            let correct_answers = session
                .score
                .map(|score| correct_count_from(score, total_questions))
                .unwrap_or(0);

            CompletedResult {
                session,
                difficulty: difficulty.to_string(),
                correct_answers,
                total_questions,
            }
        })
        .collect()
}

/// Inverts a stored percentage back into a correct-answer count, truncating.
fn correct_count_from(score: f64, total_questions: usize) -> usize {
    ((score / 100.0) * total_questions as f64) as usize
}
