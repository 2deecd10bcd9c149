//! Mock mailer for OTP service tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::services::otp::traits::Mailer;

// Mock mailer that records delivered codes per address
pub struct MockMailer {
    pub sent_codes: Arc<Mutex<HashMap<String, String>>>,
    pub should_fail: bool,
}

impl MockMailer {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent_codes: Arc::new(Mutex::new(HashMap::new())),
            should_fail,
        }
    }

    pub fn get_sent_code(&self, email: &str) -> Option<String> {
        self.sent_codes.lock().unwrap().get(email).cloned()
    }

    pub fn sent_count(&self) -> usize {
        self.sent_codes.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send_code(
        &self,
        email: &str,
        code: &str,
        _valid_for: Duration,
    ) -> Result<String, String> {
        if self.should_fail {
            return Err("mail service error".to_string());
        }
        self.sent_codes
            .lock()
            .unwrap()
            .insert(email.to_string(), code.to_string());
        Ok(format!("mock-msg-{}", email))
    }
}
