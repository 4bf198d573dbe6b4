// src/services/groups.rs

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        group::{CreateGroupRequest, Group, GroupMembership, GroupWithDetails, JoinResult},
        test::Test,
    },
    store::Store,
};

/// Creates a group owned by `owner_id`.
/// Group names are not unique; the owner never gets a membership row.
pub fn create_group(
    store: &mut Store,
    payload: CreateGroupRequest,
    owner_id: Uuid,
) -> Result<Group, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let group = Group {
        id: Uuid::new_v4(),
        name: payload.name,
        owner_id,
    };
    store.groups.push(group.clone());

    tracing::info!("Created group {} owned by {}", group.id, owner_id);
    Ok(group)
}

/// Resolves a join code and records membership.
///
/// Matching recomputes every group's derived code and compares
/// case-insensitively. Joining a group the user already belongs to (or owns)
/// reports `AlreadyMember` without inserting a second row.
pub fn join_by_code(store: &mut Store, code: &str, user_id: Uuid) -> JoinResult {
    let code = code.trim();

    let group = match store
        .groups
        .iter()
        .find(|g| g.join_code().eq_ignore_ascii_case(code))
    {
        Some(g) => g.clone(),
        None => return JoinResult::InvalidCode,
    };

    let already_member = group.owner_id == user_id
        || store
            .memberships
            .iter()
            .any(|m| m.group_id == group.id && m.user_id == user_id);
    if already_member {
        return JoinResult::AlreadyMember;
    }

    store.memberships.push(GroupMembership {
        user_id,
        group_id: group.id,
    });

    tracing::info!("User {} joined group {}", user_id, group.id);
    JoinResult::Success
}

/// Removes `user_id`'s membership row.
/// The owner cannot leave their own group; leaving a group the user is not
/// in is a silent no-op.
pub fn leave_group(store: &mut Store, group_id: Uuid, user_id: Uuid) {
    if store.group(group_id).is_some_and(|g| g.owner_id == user_id) {
        return;
    }

    store
        .memberships
        .retain(|m| !(m.group_id == group_id && m.user_id == user_id));
}

/// Removes a member from a group. The owner cannot be removed.
pub fn remove_member(store: &mut Store, group_id: Uuid, member_id: Uuid) {
    if store.group(group_id).is_some_and(|g| g.owner_id == member_id) {
        return;
    }

    store
        .memberships
        .retain(|m| !(m.group_id == group_id && m.user_id == member_id));
}

/// Every member of the group: the owner unioned with all membership rows,
/// deduplicated.
pub fn list_members(store: &Store, group_id: Uuid) -> Vec<Uuid> {
    let mut members = Vec::new();

    if let Some(group) = store.group(group_id) {
        members.push(group.owner_id);
    }

    for membership in store.memberships.iter().filter(|m| m.group_id == group_id) {
        if !members.contains(&membership.user_id) {
            members.push(membership.user_id);
        }
    }

    members
}

/// Groups the user owns unioned with groups the user has joined.
pub fn list_user_groups(store: &Store, user_id: Uuid) -> Vec<Group> {
    let mut groups: Vec<Group> = store
        .groups
        .iter()
        .filter(|g| g.owner_id == user_id)
        .cloned()
        .collect();

    for membership in store.memberships.iter().filter(|m| m.user_id == user_id) {
        if groups.iter().any(|g| g.id == membership.group_id) {
            continue;
        }
        if let Some(group) = store.group(membership.group_id) {
            groups.push(group.clone());
        }
    }

    groups
}

/// Deletes a group, cascading to its memberships and test assignments.
pub fn delete_group(store: &mut Store, group_id: Uuid) {
    store.groups.retain(|g| g.id != group_id);
    store.memberships.retain(|m| m.group_id != group_id);
    store.assignments.retain(|a| a.group_id != group_id);

    tracing::info!("Deleted group {}", group_id);
}

/// Renames a group. Only the owner may rename.
pub fn rename_group(
    store: &mut Store,
    group_id: Uuid,
    user_id: Uuid,
    new_name: &str,
) -> Result<(), AppError> {
    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Err(AppError::BadRequest("Group name must not be empty.".to_string()));
    }

    let group = store
        .groups
        .iter_mut()
        .find(|g| g.id == group_id)
        .ok_or_else(|| AppError::NotFound("Group not found".to_string()))?;

    if group.owner_id != user_id {
        return Err(AppError::AuthError(
            "Only the owner can rename the group".to_string(),
        ));
    }

    group.name = new_name.to_string();
    Ok(())
}

/// Group joined with its owner, member roster and assigned tests.
pub fn group_with_details(store: &Store, group_id: Uuid) -> Option<GroupWithDetails> {
    let group = store.group(group_id)?.clone();
    let owner = store.user(group.owner_id).cloned();

    let members = list_members(store, group_id)
        .into_iter()
        .filter_map(|id| store.user(id).cloned())
        .collect();

    let mut assigned_tests: Vec<Test> = Vec::new();
    for assignment in store.assignments.iter().filter(|a| a.group_id == group_id) {
        if assigned_tests.iter().any(|t| t.id == assignment.test_id) {
            continue;
        }
        if let Some(test) = store.test(assignment.test_id) {
            assigned_tests.push(test.clone());
        }
    }

    Some(GroupWithDetails {
        group,
        owner,
        members,
        assigned_tests,
    })
}
