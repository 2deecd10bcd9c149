//! Main OTP lifecycle service implementation

use std::sync::Arc;

use mo_shared::utils::mask_email;
use tracing;

use crate::domain::entities::OtpChallenge;
use crate::errors::{OtpError, OtpResult};
use crate::repositories::ChallengeStore;

use super::config::OtpServiceConfig;
use super::expiry::ExpirySchedule;
use super::locks::IdentifierLocks;
use super::traits::Mailer;
use super::types::IssueResult;

/// OTP lifecycle service for email-based verification
///
/// Orchestrates issuance (generate, persist, deliver, schedule expiry) and
/// verification (existence, expiry, attempt budget, code match) against an
/// injected challenge store and mailer. The service never caches challenge
/// records; the store exclusively owns all state.
pub struct OtpService<S: ChallengeStore, M: Mailer> {
    /// Challenge store holding all live records
    store: Arc<S>,
    /// External mail delivery collaborator
    mailer: Arc<M>,
    /// Service configuration
    config: OtpServiceConfig,
    /// Per-identifier locks serializing read-modify-write sequences
    locks: IdentifierLocks,
    /// Cancellable expiry sweeps, one per live challenge
    expiry: ExpirySchedule,
}

impl<S, M> OtpService<S, M>
where
    S: ChallengeStore + 'static,
    M: Mailer,
{
    /// Create a new OTP service
    ///
    /// # Arguments
    ///
    /// * `store` - Challenge store implementation
    /// * `mailer` - Mail delivery implementation
    /// * `config` - Service configuration
    pub fn new(store: Arc<S>, mailer: Arc<M>, config: OtpServiceConfig) -> Self {
        Self {
            store,
            mailer,
            config,
            locks: IdentifierLocks::new(),
            expiry: ExpirySchedule::new(),
        }
    }

    /// Issue a new challenge for an email address
    ///
    /// Generates a random 6-digit code, writes a fresh challenge record
    /// (replacing and thereby invalidating any prior challenge for the same
    /// address), delivers the code via the mailer, and schedules a
    /// cancellable expiry sweep.
    ///
    /// If delivery fails the freshly written record is rolled back, so a
    /// failed issuance leaves no guessable state behind; the caller retries
    /// by issuing again.
    ///
    /// # Arguments
    ///
    /// * `email` - The address to issue a challenge for
    ///
    /// # Returns
    ///
    /// * `Ok(IssueResult)` - Provider message id and expiry timestamp
    /// * `Err(OtpError)` - Validation, delivery, or store failure
    pub async fn issue_challenge(&self, email: &str) -> OtpResult<IssueResult> {
        let email = mo_shared::utils::normalize_email(email);
        if email.is_empty() {
            return Err(OtpError::invalid_request("Email is required"));
        }

        let ttl = chrono::Duration::from_std(self.config.ttl)
            .map_err(|e| OtpError::internal(format!("Invalid TTL configuration: {}", e)))?;
        let challenge = OtpChallenge::new(email, ttl);
        let code = challenge.code.clone();
        let expires_at = challenge.expires_at;

        {
            let _guard = self.locks.acquire(email).await;
            self.store
                .put(email, challenge)
                .await
                .map_err(|e| OtpError::internal(format!("Failed to store challenge: {}", e)))?;
            // The replaced challenge's sweep no longer matches any record
            self.expiry.cancel(email);
        }

        tracing::info!(
            email = %mask_email(email),
            event = "otp_issued",
            expires_at = %expires_at,
            "Issued new verification challenge"
        );

        // Delivery happens outside the identifier lock; the record is
        // already written, so a concurrent verify simply races the mail
        let message_id = match self.mailer.send_code(email, &code, self.config.ttl).await {
            Ok(message_id) => message_id,
            Err(e) => {
                tracing::warn!(
                    email = %mask_email(email),
                    error = %e,
                    event = "delivery_failed",
                    "Mail delivery failed; rolling back challenge"
                );

                // Only roll back the record this call wrote; a concurrent
                // re-issue may have replaced it with a deliverable one
                let _guard = self.locks.acquire(email).await;
                match self.store.get(email).await {
                    Ok(Some(current)) if current.code == code => {
                        if let Err(delete_err) = self.store.delete(email).await {
                            tracing::error!(
                                email = %mask_email(email),
                                error = %delete_err,
                                "Failed to roll back challenge after delivery failure"
                            );
                        }
                    }
                    Ok(_) => {}
                    Err(get_err) => {
                        tracing::error!(
                            email = %mask_email(email),
                            error = %get_err,
                            "Failed to read challenge while rolling back delivery failure"
                        );
                    }
                }
                return Err(OtpError::DeliveryFailed { message: e });
            }
        };

        let store = Arc::clone(&self.store);
        let sweep_email = email.to_string();
        self.expiry.schedule(email, self.config.ttl, async move {
            if let Err(e) = store.delete(&sweep_email).await {
                tracing::warn!(
                    email = %mask_email(&sweep_email),
                    error = %e,
                    "Expiry sweep failed to delete challenge"
                );
            } else {
                tracing::debug!(
                    email = %mask_email(&sweep_email),
                    event = "otp_expired_swept",
                    "Expired challenge swept from store"
                );
            }
        });

        Ok(IssueResult {
            message_id,
            expires_at,
        })
    }

    /// Verify a submitted code against the active challenge for an address
    ///
    /// Outcomes follow the challenge state machine: success, expiry, and
    /// attempt exhaustion all consume the challenge; a mismatch with
    /// attempts remaining increments the counter and leaves the challenge
    /// active.
    ///
    /// # Arguments
    ///
    /// * `email` - The address the challenge was issued for
    /// * `submitted_code` - The code to check
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The code matched; the challenge is consumed
    /// * `Err(OtpError)` - The exact failure, see the error taxonomy
    pub async fn verify_challenge(&self, email: &str, submitted_code: &str) -> OtpResult<()> {
        let email = mo_shared::utils::normalize_email(email);
        // The submitted code is compared exactly as received; surrounding
        // whitespace is a mismatch, not a normalization concern
        if email.is_empty() || submitted_code.is_empty() {
            return Err(OtpError::invalid_request("Email and OTP required"));
        }

        let _guard = self.locks.acquire(email).await;

        let mut challenge = self
            .store
            .get(email)
            .await
            .map_err(|e| OtpError::internal(format!("Failed to read challenge: {}", e)))?
            .ok_or(OtpError::ChallengeNotFound)?;

        if challenge.is_expired() {
            self.consume(email).await?;
            tracing::info!(
                email = %mask_email(email),
                event = "otp_expired",
                "Challenge expired before verification"
            );
            return Err(OtpError::ChallengeNotFound);
        }

        if challenge.is_exhausted(self.config.max_attempts) {
            self.consume(email).await?;
            tracing::warn!(
                email = %mask_email(email),
                event = "otp_attempts_exhausted",
                "Attempt budget exhausted; challenge invalidated"
            );
            return Err(OtpError::AttemptsExhausted);
        }

        if challenge.matches(submitted_code) {
            self.consume(email).await?;
            tracing::info!(
                email = %mask_email(email),
                event = "otp_verified",
                "Challenge verified successfully"
            );
            return Ok(());
        }

        challenge.register_mismatch();
        let attempts_left = challenge.remaining_attempts(self.config.max_attempts);
        self.store
            .put(email, challenge)
            .await
            .map_err(|e| OtpError::internal(format!("Failed to update challenge: {}", e)))?;

        tracing::warn!(
            email = %mask_email(email),
            event = "otp_mismatch",
            attempts_left = attempts_left,
            "Verification code mismatch"
        );

        Err(OtpError::CodeMismatch { attempts_left })
    }

    /// Delete the challenge and cancel its pending expiry sweep
    ///
    /// Called for every terminal outcome so no residual state survives.
    async fn consume(&self, email: &str) -> OtpResult<()> {
        self.store
            .delete(email)
            .await
            .map_err(|e| OtpError::internal(format!("Failed to delete challenge: {}", e)))?;
        self.expiry.cancel(email);
        Ok(())
    }

    /// The configured maximum number of verification attempts
    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts
    }
}
