//! Role-scoped write rules for tasks.
//!
//! The field partition is strict: employees own `status`, admins own
//! `priority`. A request is judged by which stored values it would actually
//! change, not by which fields it carries — the update wire shape always
//! carries both.

use taskboard_core::ServiceError;

use crate::model::{Role, Task, TaskUpdate};

/// Gate for admin-only operations (task create and delete).
pub fn require_admin(role: Role, action: &str) -> Result<(), ServiceError> {
    if role != Role::Admin {
        return Err(ServiceError::PermissionDenied(format!(
            "only admins may {action}"
        )));
    }
    Ok(())
}

/// Decide whether `role` may apply `requested` on top of `current`.
pub fn authorize_task_update(
    role: Role,
    current: &Task,
    requested: &TaskUpdate,
) -> Result<(), ServiceError> {
    match role {
        Role::Employee if requested.priority != current.priority => {
            Err(ServiceError::PermissionDenied(format!(
                "employees may not change priority ({} -> {})",
                current.priority, requested.priority
            )))
        }
        Role::Admin if requested.status != current.status => {
            Err(ServiceError::PermissionDenied(format!(
                "admins may not change status ({} -> {})",
                current.status, requested.status
            )))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, TaskStatus};

    fn task(priority: Priority, status: TaskStatus) -> Task {
        Task {
            task_id: "T1".into(),
            title: "t".into(),
            description: "d".into(),
            due_date: "2027-01-01T00:00:00+00:00".into(),
            priority,
            status,
            assigned_to: "a@x.com".into(),
            created_at: "now".into(),
            updated_at: "now".into(),
        }
    }

    #[test]
    fn employee_may_change_status_but_not_priority() {
        let current = task(Priority::Low, TaskStatus::Pending);

        let status_only = TaskUpdate {
            status: TaskStatus::Completed,
            priority: Priority::Low,
        };
        assert!(authorize_task_update(Role::Employee, &current, &status_only).is_ok());

        let priority_change = TaskUpdate {
            status: TaskStatus::Pending,
            priority: Priority::High,
        };
        let err = authorize_task_update(Role::Employee, &current, &priority_change).unwrap_err();
        assert!(matches!(err, ServiceError::PermissionDenied(_)));
    }

    #[test]
    fn admin_may_change_priority_but_not_status() {
        let current = task(Priority::Medium, TaskStatus::Pending);

        let priority_only = TaskUpdate {
            status: TaskStatus::Pending,
            priority: Priority::High,
        };
        assert!(authorize_task_update(Role::Admin, &current, &priority_only).is_ok());

        let status_change = TaskUpdate {
            status: TaskStatus::Completed,
            priority: Priority::Medium,
        };
        let err = authorize_task_update(Role::Admin, &current, &status_change).unwrap_err();
        assert!(matches!(err, ServiceError::PermissionDenied(_)));
    }

    #[test]
    fn echoing_current_values_is_allowed_for_both_roles() {
        let current = task(Priority::Medium, TaskStatus::Completed);
        let echo = TaskUpdate {
            status: TaskStatus::Completed,
            priority: Priority::Medium,
        };
        assert!(authorize_task_update(Role::Employee, &current, &echo).is_ok());
        assert!(authorize_task_update(Role::Admin, &current, &echo).is_ok());
    }

    #[test]
    fn admin_gate() {
        assert!(require_admin(Role::Admin, "delete tasks").is_ok());
        let err = require_admin(Role::Employee, "delete tasks").unwrap_err();
        assert!(matches!(err, ServiceError::PermissionDenied(_)));
    }
}
