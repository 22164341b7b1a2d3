//! Donation and campaign domain services.
//!
//! This module implements the driving ports for donations and campaigns. The
//! donation flow appends to the ledger first and then applies the amount to
//! the campaign total through a single atomic increment, retrying transient
//! increment failures with bounded backoff.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde_json::json;
use tracing::{error, warn};

use crate::domain::auth::Identity;
use crate::domain::campaign::{Campaign, CampaignDraft, CampaignId, CampaignProgress};
use crate::domain::donation::{LeaderboardEntry, NewDonation};
use crate::domain::idempotency::{
    IdempotencyKey, IdempotencyRecord, Mutation, ReplayDecision, decide_replay,
    payload_fingerprint,
};
use crate::domain::money::Amount;
use crate::domain::ports::{
    CampaignCommand, CampaignQuery, CampaignRepository, CampaignRepositoryError,
    CampaignWriteRequest, DonationCommand, DonationLedger, DonationLedgerError,
    IdempotencyRepository, IdempotencyRepositoryError, ProfileStore, SubmitDonationRequest,
    SubmitDonationResponse,
};
use crate::domain::Error;

/// Maximum attempts to apply a donation to the campaign total.
const MAX_INCREMENT_ATTEMPTS: u32 = 3;
/// Base delay between increment attempts; doubles each retry.
const INCREMENT_BACKOFF_BASE_MS: u64 = 50;
/// Upper bound on the random jitter added to each retry delay.
const INCREMENT_JITTER_MS: u64 = 25;

/// Display name served when a donor has no profile.
const ANONYMOUS_DONOR: &str = "Anonymous";

/// Donation and campaign service implementing the driving ports.
#[derive(Clone)]
pub struct DonationService<C, L, I, P> {
    campaigns: Arc<C>,
    ledger: Arc<L>,
    idempotency: Arc<I>,
    profiles: Arc<P>,
}

impl<C, L, I, P> DonationService<C, L, I, P> {
    /// Create a new service with the given adapters.
    pub fn new(campaigns: Arc<C>, ledger: Arc<L>, idempotency: Arc<I>, profiles: Arc<P>) -> Self {
        Self {
            campaigns,
            ledger,
            idempotency,
            profiles,
        }
    }
}

fn map_campaign_error(error: CampaignRepositoryError) -> Error {
    match error {
        CampaignRepositoryError::Connection { message } => {
            Error::persistence(format!("campaign store unavailable: {message}"))
        }
        CampaignRepositoryError::Query { message } => {
            Error::persistence(format!("campaign store error: {message}"))
        }
        CampaignRepositoryError::NotFound { id } => {
            Error::not_found(format!("campaign {id} not found"))
        }
    }
}

fn map_ledger_error(error: DonationLedgerError) -> Error {
    match error {
        DonationLedgerError::Connection { message } => {
            Error::persistence(format!("donation ledger unavailable: {message}"))
        }
        DonationLedgerError::Query { message } => {
            Error::persistence(format!("donation ledger error: {message}"))
        }
    }
}

fn map_idempotency_error(error: IdempotencyRepositoryError) -> Error {
    match error {
        IdempotencyRepositoryError::Connection { message } => {
            Error::persistence(format!("idempotency store unavailable: {message}"))
        }
        IdempotencyRepositoryError::Query { message } => {
            Error::persistence(format!("idempotency store error: {message}"))
        }
    }
}

fn require_admin(actor: Identity) -> Result<(), Error> {
    if actor.is_admin {
        Ok(())
    } else {
        Err(Error::forbidden("administrator role required"))
    }
}

fn donation_fingerprint(campaign_id: CampaignId, amount: Amount) -> String {
    payload_fingerprint(&json!({
        "campaignId": campaign_id,
        "amountMinor": amount.minor_units(),
    }))
}

impl<C, L, I, P> DonationService<C, L, I, P>
where
    C: CampaignRepository,
    L: DonationLedger,
    I: IdempotencyRepository,
    P: ProfileStore,
{
    fn validate_write_request(request: &CampaignWriteRequest) -> Result<CampaignDraft, Error> {
        let target = Amount::from_major_units(request.target_amount)
            .map_err(|err| Error::invalid_request(format!("invalid target amount: {err}")))?;
        CampaignDraft::new(
            &request.title,
            &request.description,
            request.thumbnail_url.clone(),
            target,
            request.start_date,
            request.end_date,
        )
        .map_err(|err| Error::invalid_request(err.to_string()))
    }

    async fn check_replay(
        &self,
        key: IdempotencyKey,
        actor: Identity,
        fingerprint: &str,
    ) -> Result<Option<SubmitDonationResponse>, Error> {
        let stored = self
            .idempotency
            .find(key, actor.user_id, Mutation::SubmitDonation)
            .await
            .map_err(map_idempotency_error)?;
        match decide_replay(stored.as_ref(), fingerprint) {
            ReplayDecision::Execute => Ok(None),
            ReplayDecision::Replay(snapshot) => {
                let mut response: SubmitDonationResponse = serde_json::from_value(snapshot)
                    .map_err(|err| {
                        Error::internal(format!("stored idempotency snapshot malformed: {err}"))
                    })?;
                response.replayed = true;
                Ok(Some(response))
            }
            ReplayDecision::Conflict => Err(Error::conflict(
                "idempotency key reused with a different payload",
            )
            .with_details(json!({ "idempotencyKey": key }))),
        }
    }

    /// Apply the amount to the campaign total, retrying transient failures.
    ///
    /// Returns the new total on success. A missing campaign is not retried;
    /// the donation record already exists, so the caller reports an
    /// inconsistent state either way.
    async fn apply_increment(&self, campaign_id: CampaignId, amount: Amount) -> Result<i64, Error> {
        let mut last_error: Option<CampaignRepositoryError> = None;
        for attempt in 1..=MAX_INCREMENT_ATTEMPTS {
            match self
                .campaigns
                .increment_current_amount(campaign_id, amount.minor_units())
                .await
            {
                Ok(new_total) => return Ok(new_total),
                Err(CampaignRepositoryError::NotFound { id }) => {
                    last_error = Some(CampaignRepositoryError::NotFound { id });
                    break;
                }
                Err(err) => {
                    warn!(
                        %campaign_id,
                        attempt,
                        error = %err,
                        "campaign total increment failed"
                    );
                    last_error = Some(err);
                    if attempt < MAX_INCREMENT_ATTEMPTS {
                        let backoff = INCREMENT_BACKOFF_BASE_MS << (attempt - 1);
                        let jitter = {
                            let mut rng = rand::thread_rng();
                            rng.gen_range(0..=INCREMENT_JITTER_MS)
                        };
                        tokio::time::sleep(Duration::from_millis(backoff + jitter)).await;
                    }
                }
            }
        }
        let cause = last_error
            .map(|err| err.to_string())
            .unwrap_or_else(|| "unknown".to_owned());
        error!(
            %campaign_id,
            amount_minor = amount.minor_units(),
            %cause,
            "donation recorded but campaign total not incremented; reconciliation required"
        );
        Err(Error::inconsistent_state(
            "donation recorded but not yet reflected in the campaign total",
        ))
    }

    async fn record_snapshot(
        &self,
        key: IdempotencyKey,
        actor: Identity,
        fingerprint: String,
        response: &SubmitDonationResponse,
    ) {
        let snapshot = match serde_json::to_value(response) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "failed to serialise idempotency snapshot");
                return;
            }
        };
        let record = IdempotencyRecord {
            key,
            user_id: actor.user_id,
            mutation: Mutation::SubmitDonation,
            payload_fingerprint: fingerprint,
            response: snapshot,
            created_at: chrono::Utc::now(),
        };
        // The donation is already applied; a failed snapshot write only costs
        // replay protection for this key.
        if let Err(err) = self.idempotency.store(&record).await {
            warn!(%key, error = %err, "failed to store idempotency record");
        }
    }
}

#[async_trait]
impl<C, L, I, P> DonationCommand for DonationService<C, L, I, P>
where
    C: CampaignRepository,
    L: DonationLedger,
    I: IdempotencyRepository,
    P: ProfileStore,
{
    async fn donate(
        &self,
        actor: Identity,
        request: SubmitDonationRequest,
    ) -> Result<SubmitDonationResponse, Error> {
        let amount = Amount::from_major_units(request.amount)
            .map_err(|err| Error::invalid_request(format!("invalid donation amount: {err}")))?;

        let campaign = self
            .campaigns
            .find_by_id(request.campaign_id)
            .await
            .map_err(map_campaign_error)?
            .ok_or_else(|| {
                Error::not_found(format!("campaign {} not found", request.campaign_id))
            })?;

        let fingerprint = donation_fingerprint(campaign.id, amount);
        if let Some(key) = request.idempotency_key {
            if let Some(replayed) = self.check_replay(key, actor, &fingerprint).await? {
                return Ok(replayed);
            }
        }

        let donation = self
            .ledger
            .append(&NewDonation {
                campaign_id: campaign.id,
                user_id: actor.user_id,
                amount,
            })
            .await
            .map_err(map_ledger_error)?;

        let new_total_minor = self.apply_increment(campaign.id, amount).await?;

        let response = SubmitDonationResponse {
            donation_id: donation.id,
            campaign_id: campaign.id,
            new_total_minor,
            replayed: false,
        };
        if let Some(key) = request.idempotency_key {
            self.record_snapshot(key, actor, fingerprint, &response).await;
        }
        Ok(response)
    }
}

#[async_trait]
impl<C, L, I, P> CampaignQuery for DonationService<C, L, I, P>
where
    C: CampaignRepository,
    L: DonationLedger,
    I: IdempotencyRepository,
    P: ProfileStore,
{
    async fn list(&self) -> Result<Vec<Campaign>, Error> {
        self.campaigns.list().await.map_err(map_campaign_error)
    }

    async fn get(&self, id: CampaignId) -> Result<Campaign, Error> {
        self.campaigns
            .find_by_id(id)
            .await
            .map_err(map_campaign_error)?
            .ok_or_else(|| Error::not_found(format!("campaign {id} not found")))
    }

    async fn progress(&self, id: CampaignId) -> Result<CampaignProgress, Error> {
        let campaign = self.get(id).await?;
        let donor_count = self
            .ledger
            .distinct_donor_count(id)
            .await
            .map_err(map_ledger_error)?;
        Ok(CampaignProgress {
            campaign_id: campaign.id,
            current_amount_minor: campaign.current_amount_minor,
            target_amount: campaign.target_amount,
            donor_count,
        })
    }

    async fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, Error> {
        let totals = self
            .ledger
            .donor_totals(limit)
            .await
            .map_err(map_ledger_error)?;
        let mut entries = Vec::with_capacity(totals.len());
        for total in totals {
            let display_name = match self.profiles.find_by_user_id(total.user_id).await {
                Ok(Some(profile)) => profile.display_name,
                Ok(None) => ANONYMOUS_DONOR.to_owned(),
                Err(err) => {
                    warn!(user_id = %total.user_id, error = %err, "leaderboard name lookup failed");
                    ANONYMOUS_DONOR.to_owned()
                }
            };
            entries.push(LeaderboardEntry {
                user_id: total.user_id,
                display_name,
                total_minor: total.total_minor,
            });
        }
        Ok(entries)
    }
}

#[async_trait]
impl<C, L, I, P> CampaignCommand for DonationService<C, L, I, P>
where
    C: CampaignRepository,
    L: DonationLedger,
    I: IdempotencyRepository,
    P: ProfileStore,
{
    async fn create(
        &self,
        actor: Identity,
        request: CampaignWriteRequest,
    ) -> Result<Campaign, Error> {
        require_admin(actor)?;
        let draft = Self::validate_write_request(&request)?;
        self.campaigns
            .create(&draft)
            .await
            .map_err(map_campaign_error)
    }

    async fn update(
        &self,
        actor: Identity,
        id: CampaignId,
        request: CampaignWriteRequest,
    ) -> Result<Campaign, Error> {
        require_admin(actor)?;
        let draft = Self::validate_write_request(&request)?;
        self.campaigns
            .update(id, &draft)
            .await
            .map_err(map_campaign_error)
    }

    async fn delete(&self, actor: Identity, id: CampaignId) -> Result<(), Error> {
        require_admin(actor)?;
        self.campaigns.delete(id).await.map_err(map_campaign_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::donation::{Donation, DonationId, DonorTotal};
    use crate::domain::ports::{
        FixtureIdempotencyRepository, FixtureProfileStore, MockCampaignRepository,
        MockDonationLedger, MockIdempotencyRepository, MockProfileStore,
    };
    use crate::domain::user::{Profile, UserId};
    use chrono::Utc;

    fn sample_campaign(id: i64) -> Campaign {
        Campaign {
            id: CampaignId(id),
            title: "Flood relief".to_owned(),
            description: "desc".to_owned(),
            thumbnail_url: None,
            target_amount: Amount::from_minor_units(1_000_000).expect("valid target"),
            current_amount_minor: 0,
            start_date: Utc::now(),
            end_date: Utc::now(),
            created_at: Utc::now(),
        }
    }

    fn sample_donation(campaign_id: CampaignId, user_id: UserId, amount: Amount) -> Donation {
        Donation {
            id: DonationId(11),
            campaign_id,
            user_id,
            amount,
            created_at: Utc::now(),
        }
    }

    fn actor() -> Identity {
        Identity {
            user_id: UserId::random(),
            is_admin: false,
        }
    }

    fn admin() -> Identity {
        Identity {
            user_id: UserId::random(),
            is_admin: true,
        }
    }

    fn request(amount: f64) -> SubmitDonationRequest {
        SubmitDonationRequest {
            campaign_id: CampaignId(1),
            amount,
            idempotency_key: None,
        }
    }

    fn service(
        campaigns: MockCampaignRepository,
        ledger: MockDonationLedger,
    ) -> DonationService<
        MockCampaignRepository,
        MockDonationLedger,
        FixtureIdempotencyRepository,
        FixtureProfileStore,
    > {
        DonationService::new(
            Arc::new(campaigns),
            Arc::new(ledger),
            Arc::new(FixtureIdempotencyRepository),
            Arc::new(FixtureProfileStore),
        )
    }

    #[tokio::test]
    async fn donate_appends_then_increments() {
        let actor = actor();
        let amount = Amount::from_major_units(500.0).expect("valid amount");

        let mut campaigns = MockCampaignRepository::new();
        campaigns
            .expect_find_by_id()
            .returning(|id| Ok(Some(sample_campaign(id.0))));
        campaigns
            .expect_increment_current_amount()
            .withf(move |id, minor| *id == CampaignId(1) && *minor == 50_000)
            .times(1)
            .returning(|_, minor| Ok(minor));

        let mut ledger = MockDonationLedger::new();
        ledger
            .expect_append()
            .times(1)
            .returning(move |new| Ok(sample_donation(new.campaign_id, new.user_id, new.amount)));

        let response = service(campaigns, ledger)
            .donate(actor, request(500.0))
            .await
            .expect("donation succeeds");

        assert_eq!(response.new_total_minor, amount.minor_units());
        assert!(!response.replayed);
    }

    #[tokio::test]
    async fn donate_rejects_invalid_amounts_before_touching_storage() {
        let mut campaigns = MockCampaignRepository::new();
        campaigns.expect_find_by_id().never();
        let mut ledger = MockDonationLedger::new();
        ledger.expect_append().never();

        let error = service(campaigns, ledger)
            .donate(actor(), request(-5.0))
            .await
            .expect_err("negative amount rejected");
        assert_eq!(error.code, ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn donate_surfaces_inconsistent_state_after_retries_exhaust() {
        let mut campaigns = MockCampaignRepository::new();
        campaigns
            .expect_find_by_id()
            .returning(|id| Ok(Some(sample_campaign(id.0))));
        campaigns
            .expect_increment_current_amount()
            .times(MAX_INCREMENT_ATTEMPTS as usize)
            .returning(|_, _| {
                Err(CampaignRepositoryError::Query {
                    message: "write failed".to_owned(),
                })
            });

        let mut ledger = MockDonationLedger::new();
        ledger
            .expect_append()
            .times(1)
            .returning(move |new| Ok(sample_donation(new.campaign_id, new.user_id, new.amount)));

        let error = service(campaigns, ledger)
            .donate(actor(), request(100.0))
            .await
            .expect_err("increment exhaustion surfaces");
        assert_eq!(error.code, ErrorCode::InconsistentState);
    }

    #[tokio::test]
    async fn donate_retries_transient_increment_failures() {
        let mut campaigns = MockCampaignRepository::new();
        campaigns
            .expect_find_by_id()
            .returning(|id| Ok(Some(sample_campaign(id.0))));
        let mut attempts = 0_u32;
        campaigns
            .expect_increment_current_amount()
            .times(2)
            .returning(move |_, minor| {
                attempts += 1;
                if attempts == 1 {
                    Err(CampaignRepositoryError::Connection {
                        message: "reset".to_owned(),
                    })
                } else {
                    Ok(minor)
                }
            });

        let mut ledger = MockDonationLedger::new();
        ledger
            .expect_append()
            .times(1)
            .returning(move |new| Ok(sample_donation(new.campaign_id, new.user_id, new.amount)));

        let response = service(campaigns, ledger)
            .donate(actor(), request(100.0))
            .await
            .expect("retry succeeds");
        assert_eq!(response.new_total_minor, 10_000);
    }

    #[tokio::test]
    async fn donate_replays_stored_response_for_same_payload() {
        let actor = actor();
        let key = IdempotencyKey::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid key");
        let amount = Amount::from_major_units(500.0).expect("valid amount");
        let fingerprint = donation_fingerprint(CampaignId(1), amount);

        let stored = IdempotencyRecord {
            key,
            user_id: actor.user_id,
            mutation: Mutation::SubmitDonation,
            payload_fingerprint: fingerprint,
            response: serde_json::to_value(SubmitDonationResponse {
                donation_id: DonationId(7),
                campaign_id: CampaignId(1),
                new_total_minor: 50_000,
                replayed: false,
            })
            .expect("serializable response"),
            created_at: Utc::now(),
        };

        let mut campaigns = MockCampaignRepository::new();
        campaigns
            .expect_find_by_id()
            .returning(|id| Ok(Some(sample_campaign(id.0))));
        campaigns.expect_increment_current_amount().never();

        let mut ledger = MockDonationLedger::new();
        ledger.expect_append().never();

        let mut idempotency = MockIdempotencyRepository::new();
        idempotency
            .expect_find()
            .returning(move |_, _, _| Ok(Some(stored.clone())));

        let service = DonationService::new(
            Arc::new(campaigns),
            Arc::new(ledger),
            Arc::new(idempotency),
            Arc::new(FixtureProfileStore),
        );
        let response = service
            .donate(
                actor,
                SubmitDonationRequest {
                    campaign_id: CampaignId(1),
                    amount: 500.0,
                    idempotency_key: Some(key),
                },
            )
            .await
            .expect("replay succeeds");
        assert!(response.replayed);
        assert_eq!(response.donation_id, DonationId(7));
    }

    #[tokio::test]
    async fn donate_rejects_key_reuse_with_different_payload() {
        let actor = actor();
        let key = IdempotencyKey::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid key");

        let stored = IdempotencyRecord {
            key,
            user_id: actor.user_id,
            mutation: Mutation::SubmitDonation,
            payload_fingerprint: "different".to_owned(),
            response: serde_json::json!({}),
            created_at: Utc::now(),
        };

        let mut campaigns = MockCampaignRepository::new();
        campaigns
            .expect_find_by_id()
            .returning(|id| Ok(Some(sample_campaign(id.0))));
        let mut ledger = MockDonationLedger::new();
        ledger.expect_append().never();
        let mut idempotency = MockIdempotencyRepository::new();
        idempotency
            .expect_find()
            .returning(move |_, _, _| Ok(Some(stored.clone())));

        let service = DonationService::new(
            Arc::new(campaigns),
            Arc::new(ledger),
            Arc::new(idempotency),
            Arc::new(FixtureProfileStore),
        );
        let error = service
            .donate(
                actor,
                SubmitDonationRequest {
                    campaign_id: CampaignId(1),
                    amount: 500.0,
                    idempotency_key: Some(key),
                },
            )
            .await
            .expect_err("conflicting payload rejected");
        assert_eq!(error.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn progress_combines_campaign_and_donor_count() {
        let mut campaigns = MockCampaignRepository::new();
        campaigns.expect_find_by_id().returning(|id| {
            let mut campaign = sample_campaign(id.0);
            campaign.current_amount_minor = 150_000;
            Ok(Some(campaign))
        });
        let mut ledger = MockDonationLedger::new();
        ledger.expect_distinct_donor_count().returning(|_| Ok(2));

        let progress = service(campaigns, ledger)
            .progress(CampaignId(1))
            .await
            .expect("progress succeeds");
        assert_eq!(progress.current_amount_minor, 150_000);
        assert_eq!(progress.donor_count, 2);
    }

    #[tokio::test]
    async fn leaderboard_falls_back_to_anonymous_for_missing_profiles() {
        let named = UserId::random();
        let nameless = UserId::random();

        let campaigns = MockCampaignRepository::new();
        let mut ledger = MockDonationLedger::new();
        ledger.expect_donor_totals().returning(move |_| {
            Ok(vec![
                DonorTotal {
                    user_id: named,
                    total_minor: 90_000,
                },
                DonorTotal {
                    user_id: nameless,
                    total_minor: 40_000,
                },
            ])
        });

        let mut profiles = MockProfileStore::new();
        profiles.expect_find_by_user_id().returning(move |user_id| {
            if user_id == named {
                Ok(Some(Profile {
                    user_id,
                    display_name: "Aye Chan".to_owned(),
                    avatar_url: None,
                    is_admin: false,
                    created_at: Utc::now(),
                }))
            } else {
                Ok(None)
            }
        });

        let service = DonationService::new(
            Arc::new(campaigns),
            Arc::new(ledger),
            Arc::new(FixtureIdempotencyRepository),
            Arc::new(profiles),
        );
        let entries = service.leaderboard(10).await.expect("leaderboard succeeds");
        assert_eq!(entries[0].display_name, "Aye Chan");
        assert_eq!(entries[1].display_name, ANONYMOUS_DONOR);
    }

    #[tokio::test]
    async fn campaign_writes_require_admin() {
        let mut campaigns = MockCampaignRepository::new();
        campaigns.expect_create().never();
        let ledger = MockDonationLedger::new();

        let request = CampaignWriteRequest {
            title: "Relief".to_owned(),
            description: "desc".to_owned(),
            thumbnail_url: None,
            target_amount: 1000.0,
            start_date: Utc::now(),
            end_date: Utc::now(),
        };
        let error = service(campaigns, ledger)
            .create(actor(), request)
            .await
            .expect_err("non-admin rejected");
        assert_eq!(error.code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn campaign_create_validates_dates() {
        let mut campaigns = MockCampaignRepository::new();
        campaigns.expect_create().never();
        let ledger = MockDonationLedger::new();

        let start = Utc::now();
        let request = CampaignWriteRequest {
            title: "Relief".to_owned(),
            description: "desc".to_owned(),
            thumbnail_url: None,
            target_amount: 1000.0,
            start_date: start,
            end_date: start - chrono::Duration::days(1),
        };
        let error = service(campaigns, ledger)
            .create(admin(), request)
            .await
            .expect_err("bad dates rejected");
        assert_eq!(error.code, ErrorCode::InvalidRequest);
    }
}
