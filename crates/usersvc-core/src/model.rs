//! User record model and validated input.

use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, UserSvcError};

/// One stored user, keyed by `user_id`.
///
/// Serialized with camelCase keys (`userId`, `createdAt`, ...). Timestamps
/// render as RFC 3339 in UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub age: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Build a fresh record with a random v4 id; both timestamps equal `now`.
    pub fn new(changes: UserChanges, now: DateTime<Utc>) -> Self {
        Self {
            user_id: Uuid::new_v4().to_string(),
            email: changes.email,
            name: changes.name,
            age: changes.age,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the mutable attributes. `updated_at` never moves backwards.
    pub fn apply(&mut self, changes: UserChanges, now: DateTime<Utc>) {
        self.email = changes.email;
        self.name = changes.name;
        self.age = changes.age;
        self.updated_at = now.max(self.updated_at);
    }
}

/// Request body for create and update (`{email, name, age?}`).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserInput {
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 1))]
    pub name: String,
    #[serde(default)]
    #[garde(skip)]
    pub age: Option<u32>,
}

impl UserInput {
    /// Run field validation and hand back the attribute set for the store.
    pub fn into_changes(self) -> Result<UserChanges> {
        self.validate()
            .map_err(|report| UserSvcError::Validation(report.to_string()))?;
        Ok(UserChanges {
            email: self.email,
            name: self.name,
            age: self.age,
        })
    }
}

/// Validated mutable attributes of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub email: String,
    pub name: String,
    pub age: Option<u32>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use chrono::Duration;

    use super::*;
    use crate::error::ClientCode;

    fn input(email: &str, name: &str, age: Option<u32>) -> UserInput {
        UserInput {
            email: email.into(),
            name: name.into(),
            age,
        }
    }

    #[test]
    fn valid_input_passes() {
        let changes = input("a@b.com", "A", Some(30)).into_changes().unwrap();
        assert_eq!(changes.email, "a@b.com");
        assert_eq!(changes.age, Some(30));
    }

    #[test]
    fn bad_email_is_rejected() {
        let err = input("not-an-email", "A", None).into_changes().unwrap_err();
        assert_eq!(err.client_code(), ClientCode::Validation);
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = input("a@b.com", "", None).into_changes().unwrap_err();
        assert_eq!(err.client_code(), ClientCode::Validation);
    }

    #[test]
    fn negative_age_fails_to_parse() {
        let res = serde_json::from_str::<UserInput>(r#"{"email":"a@b.com","name":"A","age":-1}"#);
        assert!(res.is_err());
    }

    #[test]
    fn missing_age_defaults_to_none() {
        let parsed: UserInput = serde_json::from_str(r#"{"email":"a@b.com","name":"A"}"#).unwrap();
        assert_eq!(parsed.age, None);
    }

    #[test]
    fn new_record_has_equal_timestamps_and_fresh_ids() {
        let now = Utc::now();
        let changes = input("a@b.com", "A", None).into_changes().unwrap();
        let a = UserRecord::new(changes.clone(), now);
        let b = UserRecord::new(changes, now);
        assert!(!a.user_id.is_empty());
        assert_ne!(a.user_id, b.user_id);
        assert_eq!(a.created_at, a.updated_at);
    }

    #[test]
    fn apply_keeps_updated_at_monotonic() {
        let now = Utc::now();
        let mut rec = UserRecord::new(input("a@b.com", "A", None).into_changes().unwrap(), now);
        let earlier = now - Duration::seconds(5);
        rec.apply(input("c@d.com", "C", Some(4)).into_changes().unwrap(), earlier);
        assert_eq!(rec.updated_at, now);
        assert_eq!(rec.created_at, now);
        assert_eq!(rec.email, "c@d.com");
    }

    #[test]
    fn record_serializes_camel_case_with_null_age() {
        let rec = UserRecord::new(input("a@b.com", "A", None).into_changes().unwrap(), Utc::now());
        let v = serde_json::to_value(&rec).unwrap();
        assert!(v.get("userId").is_some());
        assert!(v.get("createdAt").is_some());
        assert!(v.get("updatedAt").is_some());
        assert!(v["age"].is_null());
    }
}
