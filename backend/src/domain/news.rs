//! News post entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a news post.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(transparent)]
pub struct NewsPostId(pub i64);

impl std::fmt::Display for NewsPostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors for news post fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NewsValidationError {
    /// The description was empty after trimming.
    #[error("news description must not be empty")]
    EmptyDescription,
    /// The organizer name was empty after trimming.
    #[error("organizer name must not be empty")]
    EmptyOrganizerName,
}

/// A published news post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsPost {
    /// Post identifier.
    pub id: NewsPostId,
    /// Cover image URL, if any.
    pub thumbnail_url: Option<String>,
    /// Name of the publishing organisation or person.
    pub organizer_name: String,
    /// Avatar URL of the organizer, if any.
    pub organizer_avatar: Option<String>,
    /// Post body.
    pub description: String,
    /// When the post was published.
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating or replacing a news post.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsDraft {
    /// Cover image URL, if any.
    pub thumbnail_url: Option<String>,
    /// Name of the publishing organisation or person.
    pub organizer_name: String,
    /// Avatar URL of the organizer, if any.
    pub organizer_avatar: Option<String>,
    /// Post body.
    pub description: String,
}

impl NewsDraft {
    /// Validate raw news post fields into a draft.
    ///
    /// # Errors
    /// Returns the matching [`NewsValidationError`] variant.
    pub fn new(
        thumbnail_url: Option<String>,
        organizer_name: &str,
        organizer_avatar: Option<String>,
        description: &str,
    ) -> Result<Self, NewsValidationError> {
        let organizer_name = organizer_name.trim();
        if organizer_name.is_empty() {
            return Err(NewsValidationError::EmptyOrganizerName);
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(NewsValidationError::EmptyDescription);
        }
        Ok(Self {
            thumbnail_url,
            organizer_name: organizer_name.to_owned(),
            organizer_avatar,
            description: description.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_description() {
        assert_eq!(
            NewsDraft::new(None, "Relief Org", None, "  "),
            Err(NewsValidationError::EmptyDescription)
        );
    }

    #[test]
    fn rejects_blank_organizer() {
        assert_eq!(
            NewsDraft::new(None, " ", None, "update"),
            Err(NewsValidationError::EmptyOrganizerName)
        );
    }

    #[test]
    fn trims_fields() {
        let draft =
            NewsDraft::new(None, "  Relief Org  ", None, "  update  ").expect("valid draft");
        assert_eq!(draft.organizer_name, "Relief Org");
        assert_eq!(draft.description, "update");
    }
}
