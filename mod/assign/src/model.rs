use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Task priority. Only admins may change it after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task lifecycle state. Only employees may change it after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller role, set out-of-band by the upstream authentication layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Employee => "employee",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "employee" => Some(Self::Employee),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Task — the canonical record, keyed by taskId
// ---------------------------------------------------------------------------

/// A task assigned to exactly one user.
///
/// The canonical record lives under `assign:task:{taskId}`. A denormalized
/// [`TaskSnapshot`] of it is embedded in the assignee's `tasks` list; every
/// mutation goes through the paired operations in `service::paired` so both
/// copies stay in step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Externally generated, globally unique, immutable after creation.
    pub task_id: String,
    pub title: String,
    pub description: String,
    /// RFC 3339. Strictly in the future at creation time.
    pub due_date: String,
    pub priority: Priority,
    #[serde(default = "default_status")]
    pub status: TaskStatus,
    /// Email of the assigned user.
    pub assigned_to: String,
    pub created_at: String,
    pub updated_at: String,
}

fn default_status() -> TaskStatus {
    TaskStatus::Pending
}

/// The denormalized copy of a task's display fields, embedded in the
/// assignee's user record. Carries no `assignedTo` and no timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSnapshot {
    pub task_id: String,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: Priority,
    pub status: TaskStatus,
}

impl From<&Task> for TaskSnapshot {
    fn from(task: &Task) -> Self {
        Self {
            task_id: task.task_id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date.clone(),
            priority: task.priority,
            status: task.status,
        }
    }
}

// ---------------------------------------------------------------------------
// User — keyed by email
// ---------------------------------------------------------------------------

/// A user record under `assign:user:{email}`, embedding one [`TaskSnapshot`]
/// per task assigned to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    pub email: String,
    /// Argon2id hash. Stripped from API responses via [`User::public_json`].
    pub password: String,
    #[serde(default = "default_role")]
    pub role: Role,
    #[serde(default)]
    pub tasks: Vec<TaskSnapshot>,
    pub created_at: String,
    pub updated_at: String,
}

fn default_role() -> Role {
    Role::Employee
}

impl User {
    /// JSON view for API responses, with the credential hash removed.
    pub fn public_json(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.remove("password");
        }
        value
    }
}

// ---------------------------------------------------------------------------
// Request inputs
// ---------------------------------------------------------------------------

/// Input for creating a task. Status always starts as `pending`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub task_id: String,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: Priority,
    pub assigned_to: String,
}

/// Input for a task update. Both fields are always present on the wire;
/// the access policy inspects which one actually differs from the stored
/// value.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskUpdate {
    pub status: TaskStatus,
    pub priority: Priority,
}

/// Input for creating a user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Permissive email syntax check: one `@`, a dotted domain, no whitespace.
pub fn is_valid_email(value: &str) -> bool {
    let re = EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
    re.is_match(value)
}
