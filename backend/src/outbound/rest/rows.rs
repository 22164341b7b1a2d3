//! Wire rows for the hosted store's tables and functions.
//!
//! Columns use the store's snake_case names. Conversions into domain types
//! report malformed rows as decode failures rather than panicking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::campaign::{Campaign, CampaignDraft, CampaignId};
use crate::domain::comment::{Comment, CommentId, PostRef, PostType};
use crate::domain::donation::{Donation, DonationId, DonorTotal};
use crate::domain::idempotency::{IdempotencyKey, IdempotencyRecord, Mutation};
use crate::domain::money::Amount;
use crate::domain::news::{NewsDraft, NewsPost, NewsPostId};
use crate::domain::user::{Profile, UserId};

#[derive(Debug, Clone, Deserialize)]
pub(super) struct CampaignRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub thumbnail_url: Option<String>,
    pub target_amount: i64,
    pub current_amount: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl CampaignRow {
    pub fn into_domain(self) -> Result<Campaign, String> {
        let target_amount = Amount::from_minor_units(self.target_amount)
            .map_err(|err| format!("campaign {} target amount: {err}", self.id))?;
        Ok(Campaign {
            id: CampaignId(self.id),
            title: self.title,
            description: self.description,
            thumbnail_url: self.thumbnail_url,
            target_amount,
            current_amount_minor: self.current_amount,
            start_date: self.start_date,
            end_date: self.end_date,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub(super) struct CampaignWriteRow<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub thumbnail_url: Option<&'a str>,
    pub target_amount: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl<'a> CampaignWriteRow<'a> {
    pub fn from_draft(draft: &'a CampaignDraft) -> Self {
        Self {
            title: &draft.title,
            description: &draft.description,
            thumbnail_url: draft.thumbnail_url.as_deref(),
            target_amount: draft.target_amount.minor_units(),
            start_date: draft.start_date,
            end_date: draft.end_date,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct DonationRow {
    pub id: i64,
    pub campaign_id: i64,
    pub user_id: UserId,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

impl DonationRow {
    pub fn into_domain(self) -> Result<Donation, String> {
        let amount = Amount::from_minor_units(self.amount)
            .map_err(|err| format!("donation {} amount: {err}", self.id))?;
        Ok(Donation {
            id: DonationId(self.id),
            campaign_id: CampaignId(self.campaign_id),
            user_id: self.user_id,
            amount,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub(super) struct DonationWriteRow {
    pub campaign_id: i64,
    pub user_id: UserId,
    pub amount: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct CommentRow {
    pub id: i64,
    pub post_type: String,
    pub post_id: i64,
    pub user_id: UserId,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl CommentRow {
    pub fn into_domain(self) -> Result<Comment, String> {
        let post_type: PostType = self
            .post_type
            .parse()
            .map_err(|()| format!("comment {}: unknown post type {}", self.id, self.post_type))?;
        Ok(Comment {
            id: CommentId(self.id),
            post: PostRef {
                post_type,
                post_id: self.post_id,
            },
            author: self.user_id,
            author_name: self.author_name,
            content: self.content,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub(super) struct CommentWriteRow<'a> {
    pub post_type: String,
    pub post_id: i64,
    pub user_id: UserId,
    pub author_name: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct NewsRow {
    pub id: i64,
    pub thumbnail_url: Option<String>,
    pub organizer_name: String,
    pub organizer_avatar: Option<String>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl NewsRow {
    pub fn into_domain(self) -> NewsPost {
        NewsPost {
            id: NewsPostId(self.id),
            thumbnail_url: self.thumbnail_url,
            organizer_name: self.organizer_name,
            organizer_avatar: self.organizer_avatar,
            description: self.description,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(super) struct NewsWriteRow<'a> {
    pub thumbnail_url: Option<&'a str>,
    pub organizer_name: &'a str,
    pub organizer_avatar: Option<&'a str>,
    pub description: &'a str,
}

impl<'a> NewsWriteRow<'a> {
    pub fn from_draft(draft: &'a NewsDraft) -> Self {
        Self {
            thumbnail_url: draft.thumbnail_url.as_deref(),
            organizer_name: &draft.organizer_name,
            organizer_avatar: draft.organizer_avatar.as_deref(),
            description: &draft.description,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ProfileRow {
    pub id: UserId,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl ProfileRow {
    pub fn into_domain(self) -> Profile {
        Profile {
            user_id: self.id,
            display_name: self.display_name,
            avatar_url: self.avatar_url,
            is_admin: self.is_admin,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct IdempotencyRow {
    pub key: IdempotencyKey,
    pub user_id: UserId,
    pub mutation: Mutation,
    pub payload_fingerprint: String,
    pub response: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl IdempotencyRow {
    pub fn into_domain(self) -> IdempotencyRecord {
        IdempotencyRecord {
            key: self.key,
            user_id: self.user_id,
            mutation: self.mutation,
            payload_fingerprint: self.payload_fingerprint,
            response: self.response,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(super) struct IdempotencyWriteRow<'a> {
    pub key: IdempotencyKey,
    pub user_id: UserId,
    pub mutation: Mutation,
    pub payload_fingerprint: &'a str,
    pub response: &'a serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct DonorTotalRow {
    pub user_id: UserId,
    pub total_donation: i64,
}

impl DonorTotalRow {
    pub fn into_domain(self) -> DonorTotal {
        DonorTotal {
            user_id: self.user_id,
            total_minor: self.total_donation,
        }
    }
}
