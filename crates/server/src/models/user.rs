//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.

use serde::Serialize;

use stud_core::validation::{self, ValidationErrors};
use stud_core::{Email, UserId};

/// A stored user record (domain type).
///
/// Only the user store creates these; handlers hand out copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    /// Store-assigned, immutable id.
    pub id: UserId,
    /// Display name, never empty.
    pub name: String,
    /// Email address, unique ignoring case.
    pub email: Email,
}

impl UserRecord {
    /// Allocate a record for a validated creation payload.
    #[must_use]
    pub fn allocate(new_user: NewUser) -> Self {
        Self {
            id: UserId::generate(),
            name: new_user.name,
            email: new_user.email,
        }
    }
}

/// A validated user-creation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name, never empty.
    pub name: String,
    /// Validated email address.
    pub email: Email,
}

impl NewUser {
    /// Validate a raw request body.
    ///
    /// # Errors
    ///
    /// Returns every failing field: `name` when missing or empty, `email`
    /// when missing or not a syntactically valid address.
    pub fn from_body(body: &[u8]) -> Result<Self, ValidationErrors> {
        let body = validation::parse_object(body)?;
        let mut errors = ValidationErrors::new();

        let name = validation::required_string(&body, "name", &mut errors).and_then(|name| {
            if name.is_empty() {
                errors.add_field("name", "Name must contain at least 1 character");
                None
            } else {
                Some(name.to_owned())
            }
        });

        let email = validation::required_string(&body, "email", &mut errors).and_then(|raw| {
            Email::parse(raw)
                .map_err(|e| errors.add_field("email", format!("Invalid email: {e}")))
                .ok()
        });

        match (name, email) {
            (Some(name), Some(email)) => errors.into_result(Self { name, email }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_body() {
        let user = NewUser::from_body(br#"{"name": "Ada", "email": "ada@example.com"}"#).unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_empty_name_rejected() {
        let errors = NewUser::from_body(br#"{"name": "", "email": "a@b.com"}"#).unwrap_err();
        assert!(errors.field("name").is_some());
        assert!(errors.field("email").is_none());
    }

    #[test]
    fn test_reports_every_failing_field() {
        let errors = NewUser::from_body(br#"{"email": "nope"}"#).unwrap_err();
        assert_eq!(errors.field("name").unwrap(), [validation::REQUIRED]);
        assert!(errors.field("email").unwrap()[0].starts_with("Invalid email"));
    }

    #[test]
    fn test_unparsable_body() {
        let errors = NewUser::from_body(b"name=Ada").unwrap_err();
        assert!(!errors.form_errors.is_empty());
    }

    #[test]
    fn test_allocate_assigns_fresh_ids() {
        let new_user = NewUser::from_body(br#"{"name": "Ada", "email": "ada@example.com"}"#).unwrap();
        let a = UserRecord::allocate(new_user.clone());
        let b = UserRecord::allocate(new_user);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_serializes_bare_record() {
        let record = UserRecord {
            id: UserId::new("u1"),
            name: "Ada".to_string(),
            email: Email::parse("ada@example.com").unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            serde_json::json!({ "id": "u1", "name": "Ada", "email": "ada@example.com" })
        );
    }
}
