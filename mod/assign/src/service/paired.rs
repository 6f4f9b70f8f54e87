//! Paired writes across the canonical task records and the snapshots
//! embedded in user records.
//!
//! Every task lives twice: once under its own key and once denormalized in
//! the assignee's `tasks` list. The per-task operations here perform the two
//! writes back to back — each write commits on its own, so a storage failure
//! between them leaves the canonical side ahead of the embedded side until
//! the next mutation. Only the user cascade delete runs as one transaction.

use tracing::warn;

use taskboard_core::{ServiceError, now_rfc3339};

use super::AssignService;
use crate::model::{Task, TaskSnapshot, TaskUpdate};

impl AssignService {
    /// Insert the canonical task, then embed its snapshot in the assignee.
    ///
    /// Duplicate ids and unknown assignees are rejected before anything is
    /// written. If the snapshot write fails after the canonical insert, the
    /// error is surfaced and the canonical record stands.
    pub(crate) fn create_paired(&self, task: Task) -> Result<Task, ServiceError> {
        if self.store.get_task(&task.task_id)?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "task '{}' already exists",
                task.task_id
            )));
        }
        let mut user = self.store.get_user(&task.assigned_to)?.ok_or_else(|| {
            ServiceError::NotFound(format!("user '{}' not found", task.assigned_to))
        })?;

        self.store.put_task(&task)?;

        user.tasks.push(TaskSnapshot::from(&task));
        user.updated_at = now_rfc3339();
        self.store.put_user(&user)?;

        Ok(task)
    }

    /// Apply `status`/`priority` to the canonical task, then to the
    /// embedded snapshot.
    ///
    /// A missing assignee record or snapshot does not fail the operation:
    /// the canonical update stands and the degradation is logged.
    pub(crate) fn update_paired(
        &self,
        task_id: &str,
        update: &TaskUpdate,
    ) -> Result<Task, ServiceError> {
        let mut task = self
            .store
            .get_task(task_id)?
            .ok_or_else(|| ServiceError::NotFound(format!("task '{task_id}' not found")))?;

        task.status = update.status;
        task.priority = update.priority;
        task.updated_at = now_rfc3339();
        self.store.put_task(&task)?;

        match self.store.get_user(&task.assigned_to)? {
            Some(mut user) => {
                if let Some(snapshot) =
                    user.tasks.iter_mut().find(|s| s.task_id == task.task_id)
                {
                    snapshot.status = task.status;
                    snapshot.priority = task.priority;
                    user.updated_at = task.updated_at.clone();
                    self.store.put_user(&user)?;
                } else {
                    warn!(
                        task = %task.task_id,
                        user = %task.assigned_to,
                        "canonical task updated but assignee holds no snapshot of it"
                    );
                }
            }
            None => {
                warn!(
                    task = %task.task_id,
                    user = %task.assigned_to,
                    "canonical task updated but assignee record is missing"
                );
            }
        }

        Ok(task)
    }

    /// Delete the canonical task, then drop its snapshot from the assignee.
    /// The assignee record itself survives; a missing assignee or snapshot
    /// is a no-op.
    pub(crate) fn delete_paired(&self, task_id: &str) -> Result<(), ServiceError> {
        let task = self
            .store
            .get_task(task_id)?
            .ok_or_else(|| ServiceError::NotFound(format!("task '{task_id}' not found")))?;

        self.store.delete_task(task_id)?;

        if let Some(mut user) = self.store.get_user(&task.assigned_to)? {
            let before = user.tasks.len();
            user.tasks.retain(|s| s.task_id != task.task_id);
            if user.tasks.len() != before {
                user.updated_at = now_rfc3339();
                self.store.put_user(&user)?;
            }
        }

        Ok(())
    }

    /// Delete a user and every canonical task assigned to it in one store
    /// transaction. Any failure leaves every record exactly as it was.
    pub(crate) fn cascade_delete_for_user(&self, email: &str) -> Result<(), ServiceError> {
        if self.store.get_user(email)?.is_none() {
            return Err(ServiceError::NotFound(format!("user '{email}' not found")));
        }

        let task_ids: Vec<String> = self
            .store
            .tasks_assigned_to(email)?
            .into_iter()
            .map(|t| t.task_id)
            .collect();

        self.store.remove_user_and_tasks(email, &task_ids)
    }
}
