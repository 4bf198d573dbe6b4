// tests/session_tests.rs

use std::collections::HashMap;

use triage_trainer::models::group::{CreateGroupRequest, JoinResult};
use triage_trainer::models::question::{CreateQuestionRequest, TriageCategory};
use triage_trainer::models::session::TestMode;
use triage_trainer::models::test::{Difficulty, question_count_for};
use triage_trainer::models::user::{RegisterRequest, User};
use triage_trainer::services::{auth, groups, sessions, statistics, testing};
use triage_trainer::store::Store;
use uuid::Uuid;

fn register_user(store: &mut Store, family: &str, email: &str) -> User {
    auth::register(
        store,
        RegisterRequest {
            family: family.to_string(),
            name: "Ivan".to_string(),
            patronymic: String::new(),
            email: email.to_string(),
            password: "password123".to_string(),
        },
    )
    .expect("registration failed")
}

#[test]
fn difficulty_sizes_the_placeholder_fallback() {
    let mut store = Store::new();
    let creator = Uuid::new_v4();
    let test = testing::create_test(&mut store, "Empty bank", creator).unwrap();

    assert_eq!(testing::questions_for_test(&store, test.id, "hard").len(), 20);
    assert_eq!(testing::questions_for_test(&store, test.id, "medium").len(), 15);
    assert_eq!(testing::questions_for_test(&store, test.id, "easy").len(), 10);
    // Unrecognized labels fall back to the easy bucket.
    assert_eq!(testing::questions_for_test(&store, test.id, "extreme").len(), 10);
    assert_eq!(question_count_for("extreme"), 10);
}

#[test]
fn placeholders_cycle_triage_categories_and_are_marked() {
    let questions = testing::placeholder_questions(6);

    let categories: Vec<TriageCategory> = questions.iter().map(|q| q.correct_answer).collect();
    assert_eq!(
        categories,
        vec![
            TriageCategory::Red,
            TriageCategory::Yellow,
            TriageCategory::Green,
            TriageCategory::Black,
            TriageCategory::Red,
            TriageCategory::Yellow,
        ]
    );
    assert!(questions.iter().all(|q| q.description.starts_with("Placeholder")));
    assert!(questions.iter().all(|q| q.hint.is_some()));
}

#[test]
fn authored_questions_resolve_in_order_without_duplicates() {
    let mut store = Store::new();
    let creator = Uuid::new_v4();
    let test = testing::create_test(&mut store, "Authored", creator).unwrap();

    let mut ids = Vec::new();
    for (i, category) in [TriageCategory::Black, TriageCategory::Red, TriageCategory::Green]
        .into_iter()
        .enumerate()
    {
        let question = testing::create_question(
            &mut store,
            CreateQuestionRequest {
                description: format!("Scenario {}", i),
                image_url: None,
                correct_answer: category,
                hint: None,
            },
        )
        .unwrap();
        ids.push(question.id);
    }

    // Attach out of order, with one duplicate attachment.
    testing::attach_question(&mut store, test.id, ids[2], 3).unwrap();
    testing::attach_question(&mut store, test.id, ids[0], 1).unwrap();
    testing::attach_question(&mut store, test.id, ids[1], 2).unwrap();
    testing::attach_question(&mut store, test.id, ids[0], 9).unwrap();

    let questions = testing::questions_for_test(&store, test.id, "hard");

    // Authored content wins over the difficulty-derived fallback.
    assert_eq!(questions.len(), 3);
    assert_eq!(
        questions.iter().map(|q| q.id).collect::<Vec<_>>(),
        ids
    );
}

#[test]
fn assigned_tests_become_visible_to_members_once() {
    let mut store = Store::new();
    let owner = register_user(&mut store, "Ivanova", "owner@example.com");
    let member = register_user(&mut store, "Sidorov", "member@example.com");
    let group = groups::create_group(
        &mut store,
        CreateGroupRequest {
            name: "Year 3".to_string(),
        },
        owner.id,
    )
    .unwrap();
    groups::join_by_code(&mut store, &group.join_code(), member.id);

    let test = testing::create_test(&mut store, "Drill", owner.id).unwrap();
    testing::assign_test(&mut store, group.id, test.id);
    testing::assign_test(&mut store, group.id, test.id);

    let visible = testing::visible_tests_for(&store, member.id);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, test.id);

    let outsider = register_user(&mut store, "Orlova", "outsider@example.com");
    assert!(testing::visible_tests_for(&store, outsider.id).is_empty());
}

#[test]
fn stored_answers_survive_question_edits() {
    let mut store = Store::new();
    let question = testing::create_question(
        &mut store,
        CreateQuestionRequest {
            description: "Unresponsive, not breathing after airway repositioning".to_string(),
            image_url: None,
            correct_answer: TriageCategory::Black,
            hint: None,
        },
    )
    .unwrap();

    let answers: HashMap<usize, TriageCategory> =
        [(1, TriageCategory::Black)].into_iter().collect();
    let session = sessions::finish_session(
        &mut store,
        Uuid::new_v4(),
        Uuid::new_v4(),
        TestMode::Exam,
        std::slice::from_ref(&question),
        &answers,
    );

    // Correctness is fixed at answer time: a later edit to the question's
    // correct answer must not rewrite history.
    store.questions[0].correct_answer = TriageCategory::Red;

    let stored = store
        .answers
        .iter()
        .find(|a| a.test_session_id == session.id)
        .unwrap();
    assert!(stored.is_correct);
    assert_eq!(session.score, Some(100.0));
}

#[test]
fn session_result_joins_test_and_questions() {
    let mut store = Store::new();
    let creator = Uuid::new_v4();
    let test = testing::create_test(&mut store, "Drill", creator).unwrap();
    let question = testing::create_question(
        &mut store,
        CreateQuestionRequest {
            description: "Walking wounded with a sprained ankle".to_string(),
            image_url: None,
            correct_answer: TriageCategory::Green,
            hint: Some("The casualty can walk unaided.".to_string()),
        },
    )
    .unwrap();
    testing::attach_question(&mut store, test.id, question.id, 1).unwrap();

    let questions = testing::questions_for_test(&store, test.id, "easy");
    let session = sessions::finish_session(
        &mut store,
        test.id,
        Uuid::new_v4(),
        TestMode::Training,
        &questions,
        &HashMap::new(),
    );

    let result = sessions::session_result(&store, session.id).expect("session exists");

    assert_eq!(result.test.id, test.id);
    assert_eq!(result.answers.len(), 1);
    assert_eq!(result.answers[0].question.id, question.id);
    assert!(result.session.mode.allows_hints());
}

#[test]
fn results_history_is_newest_first_with_reconstructed_counts() {
    let mut store = Store::new();
    let user_id = Uuid::new_v4();
    let questions = testing::placeholder_questions(10);

    let older = sessions::finish_session(
        &mut store,
        Uuid::new_v4(),
        user_id,
        TestMode::Training,
        &questions,
        &HashMap::new(),
    );
    let newer = sessions::finish_session(
        &mut store,
        Uuid::new_v4(),
        user_id,
        TestMode::Exam,
        &questions,
        &HashMap::new(),
    );
    // Force distinct end times; both sessions finished at "now".
    store
        .sessions
        .iter_mut()
        .find(|s| s.id == older.id)
        .unwrap()
        .end_time = Some(older.start_time - chrono::Duration::minutes(5));

    let difficulties: HashMap<Uuid, String> = [(newer.id, "hard".to_string())].into_iter().collect();
    let results = statistics::user_results(&store, user_id, &difficulties);

    assert_eq!(sessions::sessions_for_user(&store, user_id).len(), 2);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].session.id, newer.id);
    assert_eq!(results[0].total_questions, 20);
    // Labels missing from the map fall back to the easy bucket.
    assert_eq!(results[1].total_questions, 10);
    assert_eq!(results[0].correct_answers, 20);
}

#[test]
fn full_scenario_scores_seven_of_ten() {
    let mut store = Store::new();
    let u1 = register_user(&mut store, "Ivanova", "u1@example.com");
    let u2 = register_user(&mut store, "Sidorov", "u2@example.com");

    let group = groups::create_group(
        &mut store,
        CreateGroupRequest {
            name: "Emergency medicine".to_string(),
        },
        u1.id,
    )
    .unwrap();

    assert_eq!(
        groups::join_by_code(&mut store, &group.join_code(), u2.id),
        JoinResult::Success
    );

    let test = testing::create_test(&mut store, "Final drill", u1.id).unwrap();
    testing::assign_test(&mut store, group.id, test.id);
    assert!(
        testing::visible_tests_for(&store, u2.id)
            .iter()
            .any(|t| t.id == test.id)
    );

    let questions = testing::questions_for_test(&store, test.id, Difficulty::Easy.label());
    assert_eq!(questions.len(), 10);

    // Answer all ten, three deliberately wrong.
    let mut answers: HashMap<usize, TriageCategory> = HashMap::new();
    for (index, question) in questions.iter().enumerate() {
        let selected = if index < 3 {
            TriageCategory::ALL
                .into_iter()
                .find(|c| *c != question.correct_answer)
                .unwrap()
        } else {
            question.correct_answer
        };
        answers.insert(index + 1, selected);
    }

    let session = sessions::finish_session(
        &mut store,
        test.id,
        u2.id,
        TestMode::Exam,
        &questions,
        &answers,
    );
    assert_eq!(session.score, Some(70.0));

    let stats = statistics::group_test_statistics(&store, group.id, test.id, "easy");

    // The creator is excluded from the participant list.
    assert_eq!(stats.total_participants, 1);
    assert_eq!(stats.passed_count, 1);
    assert_eq!(stats.results[0].user.id, u2.id);
    assert_eq!(stats.results[0].correct_answers, 7);
    assert_eq!(stats.results[0].total_questions, 10);
}

#[test]
fn statistics_count_the_first_exam_session() {
    let mut store = Store::new();
    let owner = register_user(&mut store, "Ivanova", "owner@example.com");
    let member = register_user(&mut store, "Sidorov", "member@example.com");
    let group = groups::create_group(
        &mut store,
        CreateGroupRequest {
            name: "Year 3".to_string(),
        },
        owner.id,
    )
    .unwrap();
    groups::join_by_code(&mut store, &group.join_code(), member.id);

    let test = testing::create_test(&mut store, "Drill", owner.id).unwrap();
    testing::assign_test(&mut store, group.id, test.id);
    let questions = testing::questions_for_test(&store, test.id, "easy");

    // A training attempt never feeds statistics.
    sessions::finish_session(
        &mut store,
        test.id,
        member.id,
        TestMode::Training,
        &questions,
        &HashMap::new(),
    );

    // First exam: everything wrong. Second exam: everything right.
    let mut all_wrong: HashMap<usize, TriageCategory> = HashMap::new();
    for (index, question) in questions.iter().enumerate() {
        let wrong = TriageCategory::ALL
            .into_iter()
            .find(|c| *c != question.correct_answer)
            .unwrap();
        all_wrong.insert(index + 1, wrong);
    }
    let first = sessions::finish_session(
        &mut store,
        test.id,
        member.id,
        TestMode::Exam,
        &questions,
        &all_wrong,
    );
    sessions::finish_session(
        &mut store,
        test.id,
        member.id,
        TestMode::Exam,
        &questions,
        &HashMap::new(),
    );

    assert_eq!(sessions::sessions_for_test(&store, test.id).len(), 3);

    let stats = statistics::group_test_statistics(&store, group.id, test.id, "easy");

    // First match in insertion order wins, not the most recent attempt.
    assert_eq!(
        stats.results[0].session.as_ref().map(|s| s.id),
        Some(first.id)
    );
    assert_eq!(stats.results[0].correct_answers, 0);
}

#[test]
fn members_without_attempts_are_reported_as_such() {
    let mut store = Store::new();
    let owner = register_user(&mut store, "Ivanova", "owner@example.com");
    let member = register_user(&mut store, "Sidorov", "member@example.com");
    let group = groups::create_group(
        &mut store,
        CreateGroupRequest {
            name: "Year 3".to_string(),
        },
        owner.id,
    )
    .unwrap();
    groups::join_by_code(&mut store, &group.join_code(), member.id);

    let test = testing::create_test(&mut store, "Drill", owner.id).unwrap();
    testing::assign_test(&mut store, group.id, test.id);

    let stats = statistics::group_test_statistics(&store, group.id, test.id, "medium");

    assert_eq!(stats.total_participants, 1);
    assert_eq!(stats.passed_count, 0);
    assert!(stats.results[0].session.is_none());
    assert_eq!(stats.results[0].correct_answers, 0);
    assert_eq!(stats.results[0].total_questions, 15);
}
