use taskboard_core::{ListResult, ServiceError, now_rfc3339};

use super::{AssignService, policy};
use crate::model::{CreateTask, Role, Task, TaskSnapshot, TaskStatus, TaskUpdate, is_valid_email};

impl AssignService {
    /// All canonical tasks.
    pub fn list_tasks(&self) -> Result<ListResult<Task>, ServiceError> {
        Ok(ListResult::new(self.store.list_tasks()?))
    }

    /// The denormalized snapshots embedded in one user's record.
    pub fn assigned_tasks(&self, email: &str) -> Result<ListResult<TaskSnapshot>, ServiceError> {
        let user = self
            .store
            .get_user(email)?
            .ok_or_else(|| ServiceError::NotFound(format!("user '{email}' not found")))?;
        Ok(ListResult::new(user.tasks))
    }

    /// Create a task and embed its snapshot in the assignee. Admin-only.
    pub fn create_task(&self, input: CreateTask, role: Role) -> Result<Task, ServiceError> {
        policy::require_admin(role, "create tasks")?;

        if input.task_id.trim().is_empty() {
            return Err(ServiceError::Validation("taskId must not be empty".into()));
        }
        if input.title.trim().is_empty() {
            return Err(ServiceError::Validation("title must not be empty".into()));
        }
        if input.description.trim().is_empty() {
            return Err(ServiceError::Validation(
                "description must not be empty".into(),
            ));
        }
        if !is_valid_email(&input.assigned_to) {
            return Err(ServiceError::Validation(format!(
                "invalid assignee email '{}'",
                input.assigned_to
            )));
        }

        let due = chrono::DateTime::parse_from_rfc3339(&input.due_date)
            .map_err(|e| ServiceError::Validation(format!("dueDate must be RFC 3339: {e}")))?;
        if due.with_timezone(&chrono::Utc) <= chrono::Utc::now() {
            return Err(ServiceError::Validation(
                "dueDate must be in the future".into(),
            ));
        }

        let now = now_rfc3339();
        self.create_paired(Task {
            task_id: input.task_id,
            title: input.title,
            description: input.description,
            due_date: input.due_date,
            priority: input.priority,
            status: TaskStatus::Pending,
            assigned_to: input.assigned_to,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Apply a `{status, priority}` update under the role/field rules, then
    /// propagate it to both copies.
    pub fn update_task(
        &self,
        task_id: &str,
        update: &TaskUpdate,
        role: Role,
    ) -> Result<Task, ServiceError> {
        let current = self
            .store
            .get_task(task_id)?
            .ok_or_else(|| ServiceError::NotFound(format!("task '{task_id}' not found")))?;

        policy::authorize_task_update(role, &current, update)?;
        self.update_paired(task_id, update)
    }

    /// Delete a task and its embedded snapshot. Admin-only.
    pub fn delete_task(&self, task_id: &str, role: Role) -> Result<(), ServiceError> {
        policy::require_admin(role, "delete tasks")?;
        self.delete_paired(task_id)
    }
}
