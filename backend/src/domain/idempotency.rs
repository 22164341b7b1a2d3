//! Idempotency keys for donation submission.
//!
//! A client may attach an `Idempotency-Key` header to a donation request.
//! The first successful execution stores a snapshot of the response keyed by
//! the tuple (key, user, mutation, payload hash). A retry with the same
//! payload replays the stored response; a retry with a different payload is
//! rejected as a conflict rather than silently executing a second donation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::user::UserId;

/// Client-chosen idempotency key. Must be a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(transparent)]
pub struct IdempotencyKey(Uuid);

impl IdempotencyKey {
    /// Parse a key from its header form.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }
}

impl std::fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mutations covered by idempotency tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mutation {
    /// Submitting a donation.
    SubmitDonation,
}

impl std::fmt::Display for Mutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SubmitDonation => f.write_str("submit_donation"),
        }
    }
}

/// Hex-encoded SHA-256 fingerprint of a canonicalised request payload.
#[must_use]
pub fn payload_fingerprint(payload: &serde_json::Value) -> String {
    let canonical = payload.to_string();
    let digest = Sha256::digest(canonical.as_bytes());
    hex::encode(digest)
}

/// A stored record of a completed idempotent mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdempotencyRecord {
    /// Client-chosen key.
    pub key: IdempotencyKey,
    /// User who executed the mutation.
    pub user_id: UserId,
    /// Which mutation was executed.
    pub mutation: Mutation,
    /// Fingerprint of the request payload.
    pub payload_fingerprint: String,
    /// Snapshot of the successful response body.
    pub response: serde_json::Value,
    /// When the mutation first completed.
    pub created_at: DateTime<Utc>,
}

/// Outcome of checking a stored record against a new request.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayDecision {
    /// No record exists; execute the mutation.
    Execute,
    /// The same request was already executed; return the stored response.
    Replay(serde_json::Value),
    /// The key was reused with a different payload.
    Conflict,
}

/// Decide how to handle a request given any stored record for its key.
#[must_use]
pub fn decide_replay(
    stored: Option<&IdempotencyRecord>,
    payload_fingerprint: &str,
) -> ReplayDecision {
    match stored {
        None => ReplayDecision::Execute,
        Some(record) if record.payload_fingerprint == payload_fingerprint => {
            ReplayDecision::Replay(record.response.clone())
        }
        Some(_) => ReplayDecision::Conflict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(fingerprint: &str) -> IdempotencyRecord {
        IdempotencyRecord {
            key: IdempotencyKey::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid key"),
            user_id: UserId::random(),
            mutation: Mutation::SubmitDonation,
            payload_fingerprint: fingerprint.to_owned(),
            response: json!({ "ok": true }),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn rejects_non_uuid_keys() {
        assert!(IdempotencyKey::parse("not-a-uuid").is_none());
    }

    #[test]
    fn identical_payloads_produce_identical_fingerprints() {
        let a = payload_fingerprint(&json!({ "campaignId": 1, "amount": 500.0 }));
        let b = payload_fingerprint(&json!({ "campaignId": 1, "amount": 500.0 }));
        assert_eq!(a, b);
    }

    #[test]
    fn differing_payloads_produce_differing_fingerprints() {
        let a = payload_fingerprint(&json!({ "amount": 500.0 }));
        let b = payload_fingerprint(&json!({ "amount": 501.0 }));
        assert_ne!(a, b);
    }

    #[test]
    fn missing_record_executes() {
        assert_eq!(decide_replay(None, "abc"), ReplayDecision::Execute);
    }

    #[test]
    fn matching_fingerprint_replays_stored_response() {
        let stored = record("abc");
        assert_eq!(
            decide_replay(Some(&stored), "abc"),
            ReplayDecision::Replay(json!({ "ok": true }))
        );
    }

    #[test]
    fn mismatched_fingerprint_conflicts() {
        let stored = record("abc");
        assert_eq!(decide_replay(Some(&stored), "def"), ReplayDecision::Conflict);
    }
}
