//! Wire-level message definitions for the WebSocket adapter.
//!
//! The stream only ever sends whole-thread snapshots. Delivering the full
//! ordered list on every event keeps clients correct even when the broadcast
//! channel skipped events under load.

use serde::{Deserialize, Serialize};

use crate::domain::{Comment, PostRef};

/// Outbound payload carrying the complete comment thread for a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadSnapshot {
    /// The watched post.
    pub post: PostRef,
    /// The full thread, newest first.
    pub comments: Vec<Comment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostType;
    use serde_json::Value;

    #[test]
    fn serializes_in_camel_case() {
        let snapshot = ThreadSnapshot {
            post: PostRef {
                post_type: PostType::Donation,
                post_id: 3,
            },
            comments: Vec::new(),
        };
        let value = serde_json::to_value(&snapshot).expect("serialize");
        assert_eq!(
            value.get("post").and_then(|p| p.get("postType")),
            Some(&Value::String("donation".into()))
        );
        assert!(
            value
                .get("comments")
                .and_then(Value::as_array)
                .is_some_and(Vec::is_empty)
        );
    }
}
