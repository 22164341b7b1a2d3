//! End-to-end donation ledger behaviour over the in-memory adapter stack.
//!
//! Exercises the full service path (validation, ledger append, atomic
//! increment, idempotency) with many concurrent writers to show totals are
//! exact.

use std::sync::Arc;

use backend::domain::ports::{
    CampaignCommand, CampaignQuery, CampaignWriteRequest, DonationCommand, SubmitDonationRequest,
};
use backend::domain::{DonationService, Identity, IdempotencyKey, UserId};
use backend::outbound::memory::{
    MemoryCampaignRepository, MemoryDonationLedger, MemoryIdempotencyRepository,
    MemoryProfileStore,
};
use chrono::{Duration, Utc};

type Service = DonationService<
    MemoryCampaignRepository,
    MemoryDonationLedger,
    MemoryIdempotencyRepository,
    MemoryProfileStore,
>;

fn service() -> Arc<Service> {
    Arc::new(DonationService::new(
        Arc::new(MemoryCampaignRepository::new()),
        Arc::new(MemoryDonationLedger::new()),
        Arc::new(MemoryIdempotencyRepository::new()),
        Arc::new(MemoryProfileStore::new()),
    ))
}

fn admin() -> Identity {
    Identity {
        user_id: UserId::random(),
        is_admin: true,
    }
}

fn donor() -> Identity {
    Identity {
        user_id: UserId::random(),
        is_admin: false,
    }
}

fn campaign_request() -> CampaignWriteRequest {
    CampaignWriteRequest {
        title: "Flood relief".to_owned(),
        description: "Emergency supplies for affected villages".to_owned(),
        thumbnail_url: None,
        target_amount: 100_000.0,
        start_date: Utc::now(),
        end_date: Utc::now() + Duration::days(30),
    }
}

#[tokio::test]
async fn sequential_donations_add_up_exactly() {
    let service = service();
    let campaign = service
        .create(admin(), campaign_request())
        .await
        .expect("campaign creates");

    let first = service
        .donate(
            donor(),
            SubmitDonationRequest {
                campaign_id: campaign.id,
                amount: 1000.0,
                idempotency_key: None,
            },
        )
        .await
        .expect("first donation succeeds");
    assert_eq!(first.new_total_minor, 100_000);

    let second = service
        .donate(
            donor(),
            SubmitDonationRequest {
                campaign_id: campaign.id,
                amount: 500.0,
                idempotency_key: None,
            },
        )
        .await
        .expect("second donation succeeds");
    assert_eq!(second.new_total_minor, 150_000);

    let progress = service.progress(campaign.id).await.expect("progress");
    assert_eq!(progress.current_amount_minor, 150_000);
    assert_eq!(progress.donor_count, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_donations_lose_no_updates() {
    const WRITERS: usize = 32;
    const AMOUNT: f64 = 10.0;

    let service = service();
    let campaign = service
        .create(admin(), campaign_request())
        .await
        .expect("campaign creates");

    let mut tasks = Vec::with_capacity(WRITERS);
    for _ in 0..WRITERS {
        let service = service.clone();
        let campaign_id = campaign.id;
        tasks.push(tokio::spawn(async move {
            service
                .donate(
                    donor(),
                    SubmitDonationRequest {
                        campaign_id,
                        amount: AMOUNT,
                        idempotency_key: None,
                    },
                )
                .await
        }));
    }
    for task in tasks {
        task.await.expect("task joins").expect("donation succeeds");
    }

    let progress = service.progress(campaign.id).await.expect("progress");
    assert_eq!(progress.current_amount_minor, (WRITERS as i64) * 1000);
    assert_eq!(progress.donor_count, WRITERS as u64);
}

#[tokio::test]
async fn repeat_donors_count_once() {
    let service = service();
    let campaign = service
        .create(admin(), campaign_request())
        .await
        .expect("campaign creates");
    let repeat = donor();

    for _ in 0..3 {
        service
            .donate(
                repeat,
                SubmitDonationRequest {
                    campaign_id: campaign.id,
                    amount: 5.0,
                    idempotency_key: None,
                },
            )
            .await
            .expect("donation succeeds");
    }

    let progress = service.progress(campaign.id).await.expect("progress");
    assert_eq!(progress.current_amount_minor, 1500);
    assert_eq!(progress.donor_count, 1);
}

#[tokio::test]
async fn replayed_submissions_do_not_double_count() {
    let service = service();
    let campaign = service
        .create(admin(), campaign_request())
        .await
        .expect("campaign creates");
    let donor = donor();
    let key = IdempotencyKey::parse("0b9a2f0c-5f0e-4f7a-9f52-2dbb52f0a111").expect("valid key");

    let request = SubmitDonationRequest {
        campaign_id: campaign.id,
        amount: 25.0,
        idempotency_key: Some(key),
    };
    let original = service
        .donate(donor, request.clone())
        .await
        .expect("original succeeds");
    assert!(!original.replayed);

    let replay = service
        .donate(donor, request)
        .await
        .expect("replay succeeds");
    assert!(replay.replayed);
    assert_eq!(replay.donation_id, original.donation_id);

    let progress = service.progress(campaign.id).await.expect("progress");
    assert_eq!(progress.current_amount_minor, 2500);
}

#[tokio::test]
async fn reused_keys_with_different_payloads_conflict() {
    let service = service();
    let campaign = service
        .create(admin(), campaign_request())
        .await
        .expect("campaign creates");
    let donor = donor();
    let key = IdempotencyKey::parse("63b5c0de-0b57-4df5-8f4e-7202cf2e5f2a").expect("valid key");

    service
        .donate(
            donor,
            SubmitDonationRequest {
                campaign_id: campaign.id,
                amount: 25.0,
                idempotency_key: Some(key),
            },
        )
        .await
        .expect("original succeeds");

    let error = service
        .donate(
            donor,
            SubmitDonationRequest {
                campaign_id: campaign.id,
                amount: 30.0,
                idempotency_key: Some(key),
            },
        )
        .await
        .expect_err("conflicting payload rejected");
    assert_eq!(error.code, backend::domain::ErrorCode::Conflict);

    let progress = service.progress(campaign.id).await.expect("progress");
    assert_eq!(progress.current_amount_minor, 2500);
}
