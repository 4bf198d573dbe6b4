// src/store.rs

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{
    group::{Group, GroupMembership},
    question::Question,
    session::{TestSession, UserAnswer},
    test::{GroupTestAssignment, Test, TestQuestion},
    user::User,
};

/// In-memory repository owning every domain collection.
///
/// The application is single-user and single-process: each operation runs to
/// completion on the UI event that triggered it, so exclusive `&mut` access
/// gives per-operation atomicity. Operations are not composably atomic across
/// calls, and nothing here survives the process.
#[derive(Debug, Default)]
pub struct Store {
    pub users: Vec<User>,
    pub groups: Vec<Group>,
    pub memberships: Vec<GroupMembership>,
    pub tests: Vec<Test>,
    pub questions: Vec<Question>,
    pub test_questions: Vec<TestQuestion>,
    pub assignments: Vec<GroupTestAssignment>,
    pub sessions: Vec<TestSession>,
    pub answers: Vec<UserAnswer>,

    /// Pending password recovery codes keyed by lowercased email.
    pub recovery_codes: HashMap<String, String>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Email is the unique login key; matching is case-insensitive.
    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email.eq_ignore_ascii_case(email))
    }

    pub fn group(&self, id: Uuid) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn test(&self, id: Uuid) -> Option<&Test> {
        self.tests.iter().find(|t| t.id == id)
    }

    pub fn question(&self, id: Uuid) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn session(&self, id: Uuid) -> Option<&TestSession> {
        self.sessions.iter().find(|s| s.id == id)
    }
}
