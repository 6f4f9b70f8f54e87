use taskboard_core::{ListResult, ServiceError, merge_patch, now_rfc3339};

use super::AssignService;
use crate::model::{CreateUser, Role, User, is_valid_email};

/// Hash a plain password with argon2id.
fn hash_password(password: &str) -> Result<String, ServiceError> {
    use argon2::Argon2;
    use argon2::password_hash::rand_core::OsRng;
    use argon2::password_hash::{PasswordHasher, SaltString};

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ServiceError::Internal(e.to_string()))
}

impl AssignService {
    /// Create a user with an empty task list. The password is stored as an
    /// argon2id hash; the role defaults to employee.
    pub fn create_user(&self, input: CreateUser) -> Result<User, ServiceError> {
        if input.name.trim().is_empty() {
            return Err(ServiceError::Validation("name must not be empty".into()));
        }
        if !is_valid_email(&input.email) {
            return Err(ServiceError::Validation(format!(
                "invalid email '{}'",
                input.email
            )));
        }
        if input.password.is_empty() {
            return Err(ServiceError::Validation("password must not be empty".into()));
        }
        if self.store.get_user(&input.email)?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "user '{}' already exists",
                input.email
            )));
        }

        let now = now_rfc3339();
        let user = User {
            name: input.name,
            email: input.email,
            password: hash_password(&input.password)?,
            role: input.role.unwrap_or(Role::Employee),
            tasks: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        };
        self.store.put_user(&user)?;
        Ok(user)
    }

    /// Users with role employee.
    pub fn list_employees(&self) -> Result<ListResult<User>, ServiceError> {
        let users = self.store.list_users()?;
        Ok(ListResult::new(
            users.into_iter().filter(|u| u.role == Role::Employee).collect(),
        ))
    }

    pub fn get_user(&self, email: &str) -> Result<User, ServiceError> {
        self.store
            .get_user(email)?
            .ok_or_else(|| ServiceError::NotFound(format!("user '{email}' not found")))
    }

    /// Partial update with JSON merge-patch semantics.
    ///
    /// The email is the record's identity and cannot change; the embedded
    /// task list and creation timestamp are service-maintained and are
    /// pinned across the merge. A patched password is re-hashed.
    pub fn update_user(
        &self,
        email: &str,
        patch: serde_json::Value,
    ) -> Result<User, ServiceError> {
        let current = self.get_user(email)?;

        if let Some(new_email) = patch.get("email").and_then(|v| v.as_str()) {
            if new_email != current.email {
                return Err(ServiceError::Validation(
                    "email identifies the user and cannot be changed".into(),
                ));
            }
        }

        let now = now_rfc3339();
        let mut base = serde_json::to_value(&current)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        merge_patch(&mut base, &patch);

        base["email"] = serde_json::json!(current.email);
        base["tasks"] = serde_json::to_value(&current.tasks)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        base["createdAt"] = serde_json::json!(current.created_at);
        base["updatedAt"] = serde_json::json!(now);

        // A patched password arrives in the clear; replace it with its hash.
        if let Some(new_password) = patch.get("password").and_then(|v| v.as_str()) {
            if new_password.is_empty() {
                return Err(ServiceError::Validation("password must not be empty".into()));
            }
            base["password"] = serde_json::json!(hash_password(new_password)?);
        }

        let updated: User = serde_json::from_value(base)
            .map_err(|e| ServiceError::Validation(format!("invalid user patch: {e}")))?;

        if updated.name.trim().is_empty() {
            return Err(ServiceError::Validation("name must not be empty".into()));
        }

        self.store.put_user(&updated)?;
        Ok(updated)
    }

    /// Delete a user together with every task assigned to it, atomically.
    pub fn delete_user(&self, email: &str) -> Result<(), ServiceError> {
        self.cascade_delete_for_user(email)
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::{seed_employee, test_service};
    use crate::model::{CreateUser, Role};
    use taskboard_core::ServiceError;

    #[test]
    fn create_get_roundtrip_hashes_the_password() {
        let svc = test_service();
        let created = svc
            .create_user(CreateUser {
                name: "Alice".into(),
                email: "alice@x.com".into(),
                password: "hunter2".into(),
                role: None,
            })
            .unwrap();
        assert_eq!(created.role, Role::Employee);
        assert_ne!(created.password, "hunter2");
        assert!(created.password.starts_with("$argon2"));

        let fetched = svc.get_user("alice@x.com").unwrap();
        assert_eq!(fetched.name, "Alice");
        assert!(fetched.tasks.is_empty());
    }

    #[test]
    fn create_validates_inputs_and_uniqueness() {
        let svc = test_service();

        let bad_email = svc.create_user(CreateUser {
            name: "A".into(),
            email: "nope".into(),
            password: "pw".into(),
            role: None,
        });
        assert!(matches!(bad_email, Err(ServiceError::Validation(_))));

        seed_employee(&svc, "a@x.com");
        let dup = svc.create_user(CreateUser {
            name: "Again".into(),
            email: "a@x.com".into(),
            password: "pw".into(),
            role: None,
        });
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn list_employees_excludes_admins() {
        let svc = test_service();
        seed_employee(&svc, "emp@x.com");
        svc.create_user(CreateUser {
            name: "Boss".into(),
            email: "boss@x.com".into(),
            password: "pw".into(),
            role: Some(Role::Admin),
        })
        .unwrap();

        let result = svc.list_employees().unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].email, "emp@x.com");
    }

    #[test]
    fn update_merges_fields_and_pins_identity() {
        let svc = test_service();
        seed_employee(&svc, "a@x.com");

        let updated = svc
            .update_user("a@x.com", serde_json::json!({"name": "Renamed"}))
            .unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.email, "a@x.com");

        let err = svc
            .update_user("a@x.com", serde_json::json!({"email": "new@x.com"}))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn update_rejects_invalid_role_values() {
        let svc = test_service();
        seed_employee(&svc, "a@x.com");
        let err = svc
            .update_user("a@x.com", serde_json::json!({"role": "overlord"}))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn update_rehashes_a_patched_password() {
        let svc = test_service();
        let before = seed_employee(&svc, "a@x.com");
        let updated = svc
            .update_user("a@x.com", serde_json::json!({"password": "s3cret"}))
            .unwrap();
        assert_ne!(updated.password, "s3cret");
        assert_ne!(updated.password, before.password);
        assert!(updated.password.starts_with("$argon2"));
    }

    #[test]
    fn update_unknown_user_is_not_found() {
        let svc = test_service();
        let err = svc
            .update_user("ghost@x.com", serde_json::json!({"name": "X"}))
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
