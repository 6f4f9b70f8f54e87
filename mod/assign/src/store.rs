use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use taskboard_core::ServiceError;
use taskboard_kv::KVStore;

use crate::model::{Task, User};

const TASK_PREFIX: &str = "assign:task:";
const USER_PREFIX: &str = "assign:user:";

fn task_key(task_id: &str) -> String {
    format!("{TASK_PREFIX}{task_id}")
}

fn user_key(email: &str) -> String {
    format!("{USER_PREFIX}{email}")
}

fn storage_err(e: impl std::fmt::Display) -> ServiceError {
    ServiceError::Storage(e.to_string())
}

/// Typed record operations for the assign module, on top of the shared
/// key-value store.
///
/// Every method is a single store transaction. `remove_user_and_tasks` is
/// the one multi-record operation: it removes the user key and all given
/// task keys in one transaction, so the cascade delete is all-or-nothing.
pub struct AssignStore {
    kv: Arc<dyn KVStore>,
}

impl AssignStore {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self { kv }
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ServiceError> {
        match self.kv.get(key).map_err(storage_err)? {
            Some(bytes) => {
                let record = serde_json::from_slice(&bytes).map_err(storage_err)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn put_json<T: Serialize>(&self, key: &str, record: &T) -> Result<(), ServiceError> {
        let bytes = serde_json::to_vec(record)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        self.kv.set(key, &bytes).map_err(storage_err)
    }

    fn scan_json<T: DeserializeOwned>(&self, prefix: &str) -> Result<Vec<T>, ServiceError> {
        let pairs = self.kv.scan(prefix).map_err(storage_err)?;
        pairs
            .into_iter()
            .map(|(_, bytes)| serde_json::from_slice(&bytes).map_err(storage_err))
            .collect()
    }

    // ── Tasks ──

    pub fn get_task(&self, task_id: &str) -> Result<Option<Task>, ServiceError> {
        self.get_json(&task_key(task_id))
    }

    pub fn put_task(&self, task: &Task) -> Result<(), ServiceError> {
        self.put_json(&task_key(&task.task_id), task)
    }

    pub fn delete_task(&self, task_id: &str) -> Result<(), ServiceError> {
        self.kv.delete(&task_key(task_id)).map_err(storage_err)
    }

    pub fn list_tasks(&self) -> Result<Vec<Task>, ServiceError> {
        self.scan_json(TASK_PREFIX)
    }

    pub fn tasks_assigned_to(&self, email: &str) -> Result<Vec<Task>, ServiceError> {
        let tasks = self.list_tasks()?;
        Ok(tasks.into_iter().filter(|t| t.assigned_to == email).collect())
    }

    // ── Users ──

    pub fn get_user(&self, email: &str) -> Result<Option<User>, ServiceError> {
        self.get_json(&user_key(email))
    }

    pub fn put_user(&self, user: &User) -> Result<(), ServiceError> {
        self.put_json(&user_key(&user.email), user)
    }

    pub fn list_users(&self) -> Result<Vec<User>, ServiceError> {
        self.scan_json(USER_PREFIX)
    }

    /// Remove a user record and all given task records in one store
    /// transaction: either every key is gone afterwards or none is.
    pub fn remove_user_and_tasks(
        &self,
        email: &str,
        task_ids: &[String],
    ) -> Result<(), ServiceError> {
        let mut keys = Vec::with_capacity(task_ids.len() + 1);
        keys.push(user_key(email));
        keys.extend(task_ids.iter().map(|id| task_key(id)));

        let key_refs: Vec<&str> = keys.iter().map(String::as_str).collect();
        self.kv.batch_delete(&key_refs).map_err(storage_err)
    }
}
