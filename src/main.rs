// src/main.rs

use std::collections::HashMap;

use dotenvy::dotenv;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use triage_trainer::config::Config;
use triage_trainer::error::AppError;
use triage_trainer::models::{
    group::CreateGroupRequest,
    question::TriageCategory,
    session::TestMode,
    test::Difficulty,
    user::RegisterRequest,
};
use triage_trainer::services::{auth, groups, sessions, statistics, testing};
use triage_trainer::store::Store;

fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    if let Err(e) = run_walkthrough() {
        tracing::error!("Walkthrough failed: {}", e);
        std::process::exit(1);
    }
}

/// Seeds a store and drives one full training scenario: two accounts, a
/// group joined by code, an assigned test, an exam attempt and the group
/// statistics derived from it.
fn run_walkthrough() -> Result<(), AppError> {
    let mut store = Store::new();

    let owner = auth::register(
        &mut store,
        RegisterRequest {
            family: "Ivanova".to_string(),
            name: "Anna".to_string(),
            patronymic: "Petrovna".to_string(),
            email: "anna.ivanova@example.com".to_string(),
            password: "training-2024".to_string(),
        },
    )?;
    let member = auth::register(
        &mut store,
        RegisterRequest {
            family: "Sidorov".to_string(),
            name: "Boris".to_string(),
            patronymic: String::new(),
            email: "boris.sidorov@example.com".to_string(),
            password: "training-2024".to_string(),
        },
    )?;

    let group = groups::create_group(
        &mut store,
        CreateGroupRequest {
            name: "Emergency medicine, year 3".to_string(),
        },
        owner.id,
    )?;

    let join_code = group.join_code();
    let joined = groups::join_by_code(&mut store, &join_code, member.id);
    tracing::info!("{} joined with code {}: {:?}", member.formatted_name(), join_code, joined);

    let difficulty = Difficulty::Easy;
    let test = testing::create_test(&mut store, "Mass casualty drill", owner.id)?;
    testing::assign_test(&mut store, group.id, test.id);

    let questions = testing::questions_for_test(&store, test.id, difficulty.label());

    // Answer every question, three of them deliberately wrong.
    let mut answers: HashMap<usize, TriageCategory> = HashMap::new();
    for (index, question) in questions.iter().enumerate() {
        let selected = if index < 3 {
            wrong_answer_for(question.correct_answer)
        } else {
            question.correct_answer
        };
        answers.insert(index + 1, selected);
    }

    let session = sessions::finish_session(
        &mut store,
        test.id,
        member.id,
        TestMode::Exam,
        &questions,
        &answers,
    );

    let stats = statistics::group_test_statistics(&store, group.id, test.id, difficulty.label());

    let report = serde_json::json!({
        "group": group.name,
        "join_code": join_code,
        "test": test.name,
        "questions": questions.len(),
        "score": session.score,
        "passed": format!("{}/{}", stats.passed_count, stats.total_participants),
        "results": stats
            .results
            .iter()
            .map(|r| {
                format!(
                    "{}: {}/{}",
                    r.user.formatted_name(),
                    r.correct_answers,
                    r.total_questions
                )
            })
            .collect::<Vec<_>>(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&report).expect("report is serializable")
    );

    Ok(())
}

fn wrong_answer_for(correct: TriageCategory) -> TriageCategory {
    TriageCategory::ALL
        .into_iter()
        .find(|c| *c != correct)
        .unwrap_or(correct)
}
