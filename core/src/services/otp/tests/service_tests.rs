//! Unit tests for the OTP lifecycle service

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::challenge::{CODE_LENGTH, CODE_MAX, CODE_MIN};
use crate::domain::entities::OtpChallenge;
use crate::errors::OtpError;
use crate::repositories::challenge::MockChallengeStore;
use crate::repositories::ChallengeStore;
use crate::services::otp::{OtpService, OtpServiceConfig};

use super::mocks::MockMailer;

fn service_with(
    config: OtpServiceConfig,
    mailer_fails: bool,
) -> (
    OtpService<MockChallengeStore, MockMailer>,
    Arc<MockChallengeStore>,
    Arc<MockMailer>,
) {
    let store = Arc::new(MockChallengeStore::new());
    let mailer = Arc::new(MockMailer::new(mailer_fails));
    let service = OtpService::new(Arc::clone(&store), Arc::clone(&mailer), config);
    (service, store, mailer)
}

#[tokio::test]
async fn test_issue_challenge_success() {
    let (service, store, mailer) = service_with(OtpServiceConfig::default(), false);

    let result = service.issue_challenge("a@x.com").await.unwrap();
    assert_eq!(result.message_id, "mock-msg-a@x.com");

    let sent_code = mailer.get_sent_code("a@x.com").expect("code delivered");
    assert_eq!(sent_code.len(), CODE_LENGTH);
    let num: u32 = sent_code.parse().unwrap();
    assert!((CODE_MIN..=CODE_MAX).contains(&num));

    let stored = store.peek("a@x.com").await.expect("challenge stored");
    assert_eq!(stored.code, sent_code);
    assert_eq!(stored.attempts, 0);
    assert_eq!(stored.expires_at, result.expires_at);
}

#[tokio::test]
async fn test_issue_challenge_empty_email() {
    let (service, store, _) = service_with(OtpServiceConfig::default(), false);

    let err = service.issue_challenge("   ").await.unwrap_err();
    assert_eq!(
        err,
        OtpError::invalid_request("Email is required"),
        "blank email is rejected before any state is written"
    );
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_issue_rolls_back_on_delivery_failure() {
    let (service, store, _) = service_with(OtpServiceConfig::default(), true);

    let err = service.issue_challenge("a@x.com").await.unwrap_err();
    assert!(matches!(err, OtpError::DeliveryFailed { .. }));

    // The written record is rolled back, leaving nothing guessable
    assert!(store.is_empty().await);
}

// Mailer that overwrites the stored challenge before failing, standing in
// for a concurrent re-issue completing during the delivery window
struct ReplacingMailer {
    store: Arc<MockChallengeStore>,
    replacement: OtpChallenge,
}

#[async_trait::async_trait]
impl crate::services::otp::Mailer for ReplacingMailer {
    async fn send_code(
        &self,
        email: &str,
        _code: &str,
        _valid_for: Duration,
    ) -> Result<String, String> {
        self.store
            .put(email, self.replacement.clone())
            .await
            .unwrap();
        Err("mail service error".to_string())
    }
}

#[tokio::test]
async fn test_rollback_spares_replacement_challenge() {
    let store = Arc::new(MockChallengeStore::new());
    let replacement = OtpChallenge::with_default_ttl("a@x.com");
    let mailer = Arc::new(ReplacingMailer {
        store: Arc::clone(&store),
        replacement: replacement.clone(),
    });
    let service = OtpService::new(Arc::clone(&store), mailer, OtpServiceConfig::default());

    let err = service.issue_challenge("a@x.com").await.unwrap_err();
    assert!(matches!(err, OtpError::DeliveryFailed { .. }));

    // The rollback only removes the record this call wrote, so the
    // replacement written during the delivery window survives
    assert_eq!(store.peek("a@x.com").await, Some(replacement));
}

#[tokio::test]
async fn test_verify_challenge_success_consumes_record() {
    let (service, store, mailer) = service_with(OtpServiceConfig::default(), false);

    service.issue_challenge("a@x.com").await.unwrap();
    let code = mailer.get_sent_code("a@x.com").unwrap();

    service.verify_challenge("a@x.com", &code).await.unwrap();
    assert!(store.is_empty().await);

    // A consumed challenge can never be verified again
    let err = service.verify_challenge("a@x.com", &code).await.unwrap_err();
    assert_eq!(err, OtpError::ChallengeNotFound);
}

#[tokio::test]
async fn test_verify_without_issuance() {
    let (service, _, _) = service_with(OtpServiceConfig::default(), false);

    let err = service
        .verify_challenge("d@x.com", "123456")
        .await
        .unwrap_err();
    assert_eq!(err, OtpError::ChallengeNotFound);
}

#[tokio::test]
async fn test_verify_missing_fields() {
    let (service, _, _) = service_with(OtpServiceConfig::default(), false);

    let err = service.verify_challenge("", "123456").await.unwrap_err();
    assert_eq!(err, OtpError::invalid_request("Email and OTP required"));

    let err = service.verify_challenge("a@x.com", "").await.unwrap_err();
    assert_eq!(err, OtpError::invalid_request("Email and OTP required"));
}

#[tokio::test]
async fn test_submitted_code_is_compared_exactly() {
    let (service, _, mailer) = service_with(OtpServiceConfig::default(), false);

    service.issue_challenge("a@x.com").await.unwrap();
    let code = mailer.get_sent_code("a@x.com").unwrap();

    // Surrounding whitespace is not stripped; the padded code mismatches
    // and spends an attempt
    let padded = format!(" {} ", code);
    let err = service
        .verify_challenge("a@x.com", &padded)
        .await
        .unwrap_err();
    assert_eq!(err, OtpError::CodeMismatch { attempts_left: 4 });

    // The exact code still verifies
    service.verify_challenge("a@x.com", &code).await.unwrap();
}

#[tokio::test]
async fn test_reissue_invalidates_previous_challenge() {
    let (service, _, mailer) = service_with(OtpServiceConfig::default(), false);

    service.issue_challenge("b@x.com").await.unwrap();
    let old_code = mailer.get_sent_code("b@x.com").unwrap();

    service.issue_challenge("b@x.com").await.unwrap();
    let new_code = mailer.get_sent_code("b@x.com").unwrap();

    if old_code != new_code {
        // The old code never succeeds once replaced
        let err = service
            .verify_challenge("b@x.com", &old_code)
            .await
            .unwrap_err();
        assert!(matches!(err, OtpError::CodeMismatch { .. }));
    }

    // The replacement code still works
    service.verify_challenge("b@x.com", &new_code).await.unwrap();
}

#[tokio::test]
async fn test_mismatch_countdown_and_exhaustion() {
    let (service, store, mailer) = service_with(OtpServiceConfig::default(), false);

    service.issue_challenge("b@x.com").await.unwrap();
    let code = mailer.get_sent_code("b@x.com").unwrap();
    let wrong = if code == "111111" { "222222" } else { "111111" };

    // Five mismatches report a decreasing attempt budget: 4, 3, 2, 1, 0
    for expected_left in (0..5).rev() {
        let err = service.verify_challenge("b@x.com", wrong).await.unwrap_err();
        assert_eq!(
            err,
            OtpError::CodeMismatch {
                attempts_left: expected_left
            }
        );
    }

    // The budget is spent; the next call terminates the challenge
    let err = service.verify_challenge("b@x.com", wrong).await.unwrap_err();
    assert_eq!(err, OtpError::AttemptsExhausted);
    assert!(store.is_empty().await);

    // Even the correct code fails now
    let err = service.verify_challenge("b@x.com", &code).await.unwrap_err();
    assert_eq!(err, OtpError::ChallengeNotFound);
}

#[tokio::test]
async fn test_verify_expired_challenge() {
    let (service, store, _) = service_with(OtpServiceConfig::default(), false);

    // Plant an already-expired challenge directly, bypassing the sweep
    let challenge = OtpChallenge::new("c@x.com", chrono::Duration::milliseconds(-1));
    let code = challenge.code.clone();
    store.put("c@x.com", challenge).await.unwrap();

    let err = service.verify_challenge("c@x.com", &code).await.unwrap_err();
    assert_eq!(err, OtpError::ChallengeNotFound);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_expiry_sweep_removes_record() {
    let config = OtpServiceConfig {
        ttl: Duration::from_millis(40),
        ..OtpServiceConfig::default()
    };
    let (service, store, _) = service_with(config, false);

    service.issue_challenge("c@x.com").await.unwrap();
    assert!(!store.is_empty().await);

    tokio::time::sleep(Duration::from_millis(120)).await;
    assert!(store.is_empty().await, "sweep should delete the record");
}

#[tokio::test]
async fn test_success_within_ttl_beats_the_sweep() {
    let config = OtpServiceConfig {
        ttl: Duration::from_millis(200),
        ..OtpServiceConfig::default()
    };
    let (service, _, mailer) = service_with(config, false);

    service.issue_challenge("a@x.com").await.unwrap();
    let code = mailer.get_sent_code("a@x.com").unwrap();
    service.verify_challenge("a@x.com", &code).await.unwrap();
}

#[tokio::test]
async fn test_store_failure_surfaces_as_internal() {
    let store = Arc::new(MockChallengeStore::failing());
    let mailer = Arc::new(MockMailer::new(false));
    let service = OtpService::new(store, Arc::clone(&mailer), OtpServiceConfig::default());

    let err = service.issue_challenge("a@x.com").await.unwrap_err();
    assert!(matches!(err, OtpError::Internal { .. }));
    // Nothing was delivered for a challenge that was never persisted
    assert_eq!(mailer.sent_count(), 0);

    let err = service
        .verify_challenge("a@x.com", "123456")
        .await
        .unwrap_err();
    assert!(matches!(err, OtpError::Internal { .. }));
}

#[tokio::test]
async fn test_custom_max_attempts() {
    let config = OtpServiceConfig {
        max_attempts: 2,
        ..OtpServiceConfig::default()
    };
    let (service, _, mailer) = service_with(config, false);

    service.issue_challenge("a@x.com").await.unwrap();
    let code = mailer.get_sent_code("a@x.com").unwrap();
    let wrong = if code == "111111" { "222222" } else { "111111" };

    assert_eq!(
        service.verify_challenge("a@x.com", wrong).await.unwrap_err(),
        OtpError::CodeMismatch { attempts_left: 1 }
    );
    assert_eq!(
        service.verify_challenge("a@x.com", wrong).await.unwrap_err(),
        OtpError::CodeMismatch { attempts_left: 0 }
    );
    assert_eq!(
        service.verify_challenge("a@x.com", wrong).await.unwrap_err(),
        OtpError::AttemptsExhausted
    );
}
