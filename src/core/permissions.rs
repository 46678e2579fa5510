//! Role checks for every operation that is not open to all users.

use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::models::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create/edit/delete entries of another user.
    ManageOthersEntries,
    /// See entries and statistics of other users.
    ViewTeam,
    LockMonth,
    UnlockMonth,
    BulkLock,
    BulkUnlock,
    ViewLockStatus,
    SendReminders,
    CreateUser,
    UpdateUser,
    ListUsers,
    ManageChildCounts,
    ManageGlobalEvents,
    Export,
    Import,
}

impl Action {
    fn describe(&self) -> &'static str {
        match self {
            Action::ManageOthersEntries => "manage entries of other users",
            Action::ViewTeam => "view data of other users",
            Action::LockMonth => "lock months",
            Action::UnlockMonth => "unlock months",
            Action::BulkLock => "lock months for several users",
            Action::BulkUnlock => "unlock months for several users",
            Action::ViewLockStatus => "view the lock status",
            Action::SendReminders => "send lock reminders",
            Action::CreateUser => "create users",
            Action::UpdateUser => "change user data",
            Action::ListUsers => "list users",
            Action::ManageChildCounts => "manage child counts",
            Action::ManageGlobalEvents => "manage global events",
            Action::Export => "export data",
            Action::Import => "import data",
        }
    }
}

/// Role table.
pub fn allowed(role: Role, action: Action) -> bool {
    match action {
        Action::BulkLock | Action::BulkUnlock | Action::CreateUser | Action::UpdateUser => {
            role == Role::Admin
        }
        Action::ManageOthersEntries
        | Action::ViewTeam
        | Action::LockMonth
        | Action::UnlockMonth
        | Action::ViewLockStatus
        | Action::SendReminders
        | Action::ListUsers
        | Action::ManageChildCounts
        | Action::ManageGlobalEvents
        | Action::Export
        | Action::Import => matches!(role, Role::Leadership | Role::Admin),
    }
}

/// Fail with `Permission` unless `actor` is active and its role allows `action`.
pub fn require(actor: &User, action: Action) -> AppResult<()> {
    if !actor.is_active {
        return Err(AppError::Permission(format!(
            "user '{}' is deactivated",
            actor.username
        )));
    }
    if allowed(actor.role, action) {
        Ok(())
    } else {
        Err(AppError::Permission(format!(
            "role '{}' may not {}",
            actor.role.to_db_str(),
            action.describe()
        )))
    }
}

/// Staff act on their own records only; anything else needs
/// [`Action::ManageOthersEntries`].
pub fn require_owner_or(actor: &User, owner_id: i64, action: Action) -> AppResult<()> {
    if actor.id == owner_id && actor.is_active {
        return Ok(());
    }
    require(actor, action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_cannot_lock() {
        assert!(!allowed(Role::Staff, Action::LockMonth));
        assert!(allowed(Role::Leadership, Action::LockMonth));
        assert!(allowed(Role::Admin, Action::LockMonth));
    }

    #[test]
    fn bulk_operations_are_admin_only() {
        for action in [Action::BulkLock, Action::BulkUnlock, Action::CreateUser] {
            assert!(!allowed(Role::Staff, action));
            assert!(!allowed(Role::Leadership, action));
            assert!(allowed(Role::Admin, action));
        }
    }
}
