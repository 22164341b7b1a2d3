//! User identity and profile types.
//!
//! Profiles are owned by the auth collaborator; the application treats them
//! as read-mostly, with self-service display-name and avatar edits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum display name length in characters.
pub const DISPLAY_NAME_MIN: usize = 2;
/// Maximum display name length in characters.
pub const DISPLAY_NAME_MAX: usize = 64;

/// Validation errors for user identity and profile fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The supplied identifier was not a valid UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// The display name was empty after trimming.
    #[error("display name must not be empty")]
    EmptyDisplayName,
    /// The display name was shorter than the minimum.
    #[error("display name must be at least {min} characters")]
    DisplayNameTooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// The display name exceeded the maximum.
    #[error("display name must be at most {max} characters")]
    DisplayNameTooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// Opaque user identifier backed by a UUID.
///
/// # Examples
/// ```
/// use backend::domain::UserId;
///
/// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a user id from its string form.
    ///
    /// # Errors
    /// Returns [`UserValidationError::InvalidId`] when the input is not a
    /// valid UUID.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Uuid::parse_str(raw.as_ref())
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a fresh random id.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<Uuid> for UserId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

/// Validate a display name against the shared policy.
///
/// # Errors
/// Returns the matching [`UserValidationError`] variant.
pub fn validate_display_name(raw: &str) -> Result<String, UserValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UserValidationError::EmptyDisplayName);
    }
    let length = trimmed.chars().count();
    if length < DISPLAY_NAME_MIN {
        return Err(UserValidationError::DisplayNameTooShort {
            min: DISPLAY_NAME_MIN,
        });
    }
    if length > DISPLAY_NAME_MAX {
        return Err(UserValidationError::DisplayNameTooLong {
            max: DISPLAY_NAME_MAX,
        });
    }
    Ok(trimmed.to_owned())
}

/// A user profile as stored by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Owning user.
    pub user_id: UserId,
    /// Public display name.
    pub display_name: String,
    /// Public avatar URL, if one has been uploaded.
    pub avatar_url: Option<String>,
    /// Whether this user holds administrator privileges.
    pub is_admin: bool,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
}
