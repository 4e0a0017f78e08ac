use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::UserId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IdentityError {
    #[error("email cannot be empty")]
    EmptyEmail,

    #[error("full name cannot be empty")]
    EmptyName,

    #[error("unknown role: {0}")]
    UnknownRole(String),
}

/// Account role. Immutable once the profile row is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Teacher,
}

impl Role {
    /// Wire representation used by the hosted service.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
        }
    }

    /// Parse the wire representation.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::UnknownRole` for any other string.
    pub fn parse(raw: &str) -> Result<Self, IdentityError> {
        match raw {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            other => Err(IdentityError::UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
        })
    }
}

/// An authenticated user's profile record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    id: UserId,
    email: String,
    full_name: String,
    role: Role,
    school: String,
    language_preference: String,
}

impl Identity {
    /// Creates a new Identity.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError` if email or full name is empty or
    /// whitespace-only.
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        full_name: impl Into<String>,
        role: Role,
        school: impl Into<String>,
        language_preference: impl Into<String>,
    ) -> Result<Self, IdentityError> {
        let email = email.into().trim().to_owned();
        if email.is_empty() {
            return Err(IdentityError::EmptyEmail);
        }
        let full_name = full_name.into().trim().to_owned();
        if full_name.is_empty() {
            return Err(IdentityError::EmptyName);
        }

        Ok(Self {
            id,
            email,
            full_name,
            role,
            school: school.into(),
            language_preference: language_preference.into(),
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn school(&self) -> &str {
        &self.school
    }

    #[must_use]
    pub fn language_preference(&self) -> &str {
        &self.language_preference
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> Identity {
        Identity::new(
            UserId::random(),
            "ria@example.com",
            "Ria Sharma",
            Role::Student,
            "Hill Valley School",
            "en",
        )
        .unwrap()
    }

    #[test]
    fn identity_rejects_empty_email() {
        let err = Identity::new(
            UserId::random(),
            "   ",
            "Ria Sharma",
            Role::Student,
            "Hill Valley School",
            "en",
        )
        .unwrap_err();
        assert_eq!(err, IdentityError::EmptyEmail);
    }

    #[test]
    fn identity_rejects_empty_name() {
        let err = Identity::new(
            UserId::random(),
            "ria@example.com",
            "",
            Role::Student,
            "Hill Valley School",
            "en",
        )
        .unwrap_err();
        assert_eq!(err, IdentityError::EmptyName);
    }

    #[test]
    fn identity_trims_email() {
        let identity = Identity::new(
            UserId::random(),
            "  ria@example.com  ",
            "Ria Sharma",
            Role::Student,
            "Hill Valley School",
            "en",
        )
        .unwrap();
        assert_eq!(identity.email(), "ria@example.com");
    }

    #[test]
    fn role_round_trips_through_wire_form() {
        assert_eq!(Role::parse(Role::Teacher.as_str()), Ok(Role::Teacher));
        assert_eq!(Role::parse(Role::Student.as_str()), Ok(Role::Student));
        assert!(Role::parse("admin").is_err());
    }

    #[test]
    fn student_accessors() {
        let identity = student();
        assert_eq!(identity.role(), Role::Student);
        assert_eq!(identity.full_name(), "Ria Sharma");
        assert_eq!(identity.language_preference(), "en");
    }
}
