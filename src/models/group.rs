// src/models/group.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::config::JOIN_CODE_LENGTH;
use crate::models::{test::Test, user::User};

/// A training group. Exactly one owner, fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
}

impl Group {
    /// Code non-owners use to discover and join the group.
    ///
    /// Derived from the id rather than stored: the uppercase alphanumeric
    /// prefix of the id's string form. Two groups sharing a prefix would
    /// collide; see DESIGN.md.
    pub fn join_code(&self) -> String {
        self.id
            .to_string()
            .chars()
            .take(JOIN_CODE_LENGTH)
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_uppercase()
    }
}

/// Membership row linking a non-owner to a group.
/// The owner is implicitly a member and never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMembership {
    pub user_id: Uuid,
    pub group_id: Uuid,
}

/// Outcome of a join-by-code attempt.
///
/// `AlreadyMember` is idempotent success, distinguished only so the UI can
/// phrase its message; `InvalidCode` is the sole failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinResult {
    Success,
    AlreadyMember,
    InvalidCode,
}

/// DTO for creating a new group.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Group name length must be between 1 and 100 characters."
    ))]
    pub name: String,
}

/// Aggregated group view: owner, roster and assigned tests in one read.
#[derive(Debug, Serialize)]
pub struct GroupWithDetails {
    pub group: Group,
    pub owner: Option<User>,
    pub members: Vec<User>,
    pub assigned_tests: Vec<Test>,
}
