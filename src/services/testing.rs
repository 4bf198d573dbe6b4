// src/services/testing.rs

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        question::{CreateQuestionRequest, Question, TriageCategory},
        test::{GroupTestAssignment, Test, TestQuestion, question_count_for},
    },
    services::groups::list_user_groups,
    store::Store,
};

/// Creates a test owned by `creator_id`. Tests are immutable once created.
pub fn create_test(store: &mut Store, name: &str, creator_id: Uuid) -> Result<Test, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Test name must not be empty.".to_string()));
    }

    let test = Test {
        id: Uuid::new_v4(),
        name: name.to_string(),
        creator_id,
    };
    store.tests.push(test.clone());

    tracing::info!("Created test {} by {}", test.id, creator_id);
    Ok(test)
}

/// Authors a new question into the bank.
pub fn create_question(
    store: &mut Store,
    payload: CreateQuestionRequest,
) -> Result<Question, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let question = Question {
        id: Uuid::new_v4(),
        description: payload.description,
        image_url: payload.image_url,
        correct_answer: payload.correct_answer,
        hint: payload.hint,
    };
    store.questions.push(question.clone());

    Ok(question)
}

/// Places a question at `order` within a test.
/// Attaching the same question to the same test twice is a no-op.
pub fn attach_question(
    store: &mut Store,
    test_id: Uuid,
    question_id: Uuid,
    order: i32,
) -> Result<(), AppError> {
    if store.test(test_id).is_none() {
        return Err(AppError::NotFound("Test not found".to_string()));
    }
    if store.question(question_id).is_none() {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    let exists = store
        .test_questions
        .iter()
        .any(|tq| tq.test_id == test_id && tq.question_id == question_id);
    if exists {
        return Ok(());
    }

    store.test_questions.push(TestQuestion {
        test_id,
        question_id,
        order,
    });
    Ok(())
}

/// Makes a test visible to a group's members.
///
/// Duplicate assignments are permitted in the store; reads deduplicate, so
/// they never duplicate visible tests.
pub fn assign_test(store: &mut Store, group_id: Uuid, test_id: Uuid) {
    store.assignments.push(GroupTestAssignment { group_id, test_id });

    tracing::info!("Assigned test {} to group {}", test_id, group_id);
}

/// The ordered question list for an attempt at a test.
///
/// Authored rows are sorted by `order` ascending and deduplicated by
/// question. A test with no authored content yet falls back to generated
/// placeholder questions sized by the difficulty label.
pub fn questions_for_test(store: &Store, test_id: Uuid, difficulty_label: &str) -> Vec<Question> {
    let mut rows: Vec<&TestQuestion> = store
        .test_questions
        .iter()
        .filter(|tq| tq.test_id == test_id)
        .collect();
    rows.sort_by_key(|tq| tq.order);

    let mut questions: Vec<Question> = Vec::new();
    for row in rows {
        if questions.iter().any(|q| q.id == row.question_id) {
            continue;
        }
        if let Some(question) = store.question(row.question_id) {
            questions.push(question.clone());
        }
    }

    if !questions.is_empty() {
        return questions;
    }

    placeholder_questions(question_count_for(difficulty_label))
}

/// Generated stand-in questions used until a test has authored content,
/// cycling the triage categories in priority order. Descriptions and hints
/// are marked so placeholders are never mistaken for authored scenarios.
pub fn placeholder_questions(count: usize) -> Vec<Question> {
    (0..count)
        .map(|i| {
            let category = TriageCategory::ALL[i % TriageCategory::ALL.len()];
            Question {
                id: Uuid::new_v4(),
                description: format!(
                    "Placeholder scenario {}: assign the correct triage category",
                    i + 1
                ),
                image_url: None,
                correct_answer: category,
                hint: Some(format!("Placeholder hint: the expected category is {:?}", category)),
            }
        })
        .collect()
}

/// Tests assigned to any group the user belongs to, deduplicated.
pub fn visible_tests_for(store: &Store, user_id: Uuid) -> Vec<Test> {
    let group_ids: Vec<Uuid> = list_user_groups(store, user_id)
        .into_iter()
        .map(|g| g.id)
        .collect();

    let mut tests: Vec<Test> = Vec::new();
    for assignment in store
        .assignments
        .iter()
        .filter(|a| group_ids.contains(&a.group_id))
    {
        if tests.iter().any(|t| t.id == assignment.test_id) {
            continue;
        }
        if let Some(test) = store.test(assignment.test_id) {
            tests.push(test.clone());
        }
    }

    tests
}
