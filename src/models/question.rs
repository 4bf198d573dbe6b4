// src/models/question.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Medical sorting category — the answer domain for every question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriageCategory {
    /// First priority, immediate care.
    Red,
    /// Second priority, urgent care.
    Yellow,
    /// Third priority, delayed care.
    Green,
    /// Deceased or expectant.
    Black,
}

impl TriageCategory {
    /// All categories in priority order.
    pub const ALL: [TriageCategory; 4] = [
        TriageCategory::Red,
        TriageCategory::Yellow,
        TriageCategory::Green,
        TriageCategory::Black,
    ];
}

/// An emergency-scenario question with a single correct triage category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,

    /// Scenario text presented to the trainee.
    pub description: String,

    /// Path or URL of an illustrating image, if any.
    /// Resolved against the media base URL by `Config::image_url`.
    pub image_url: Option<String>,

    pub correct_answer: TriageCategory,

    /// Shown on request in training mode only.
    pub hint: Option<String>,
}

/// DTO for authoring a new question.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(
        min = 1,
        max = 1000,
        message = "Description length must be between 1 and 1000 characters."
    ))]
    pub description: String,

    #[validate(length(max = 500))]
    pub image_url: Option<String>,

    pub correct_answer: TriageCategory,

    #[validate(length(max = 500))]
    pub hint: Option<String>,
}
