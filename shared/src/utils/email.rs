//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Pragmatic email shape check: local part, one @, dotted domain.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").unwrap()
});

/// Normalize an email address by trimming surrounding whitespace
///
/// The address is otherwise treated literally; the store keys challenges
/// case-sensitively, so no case folding happens here.
pub fn normalize_email(email: &str) -> &str {
    email.trim()
}

/// Check whether an email address has a plausible shape
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(normalize_email(email))
}

/// Mask an email address for logging (e.g. `al***@example.com`)
pub fn mask_email(email: &str) -> String {
    let email = normalize_email(email);
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let visible = local.chars().take(2).collect::<String>();
            format!("{}***@{}", visible, domain)
        }
        _ => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  user@example.com "), "user@example.com");
        assert_eq!(normalize_email("user@example.com"), "user@example.com");
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co"));
        assert!(!is_valid_email("user"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_case_is_preserved() {
        // Challenge records are keyed literally, so User@ and user@ differ
        assert_eq!(normalize_email("User@Example.com"), "User@Example.com");
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "al***@example.com");
        assert_eq!(mask_email("a@example.com"), "a***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
