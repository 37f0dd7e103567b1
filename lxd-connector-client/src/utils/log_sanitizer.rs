//! Log sanitization utilities
//!
//! Keeps API keys and container passwords out of debug/error logs, and bounds
//! the size of logged response bodies.

/// Maximum number of bytes of a body included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters of a secret left visible.
const SECRET_VISIBLE_PREFIX: usize = 3;

/// Largest char boundary not after `index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit, otherwise the first
/// `TRUNCATE_LIMIT` bytes with a suffix indicating the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask a secret, keeping only a short prefix.
///
/// Short secrets are fully masked.
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(SECRET_VISIBLE_PREFIX).collect();
    if secret.chars().count() <= SECRET_VISIBLE_PREFIX * 2 {
        "***".to_string()
    } else {
        format!("{visible}***")
    }
}

/// Mask the value of `password` fields in a JSON body before logging it.
pub fn redact_json_body(body: &serde_json::Value) -> String {
    let mut redacted = body.clone();
    if let Some(map) = redacted.as_object_mut() {
        for (key, value) in map.iter_mut() {
            if key.eq_ignore_ascii_case("password") {
                *value = serde_json::Value::String("***".to_string());
            }
        }
    }
    truncate_for_log(&redacted.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_string_unchanged() {
        let s = "{\"code\":200}";
        assert_eq!(truncate_for_log(s), s);
    }

    #[test]
    fn over_limit_truncated() {
        let s = "a".repeat(TRUNCATE_LIMIT + 100);
        let result = truncate_for_log(&s);
        assert!(result.contains(&format!("{} bytes]", TRUNCATE_LIMIT + 100)));
        assert!(result.len() < s.len());
    }

    #[test]
    fn multibyte_chars_safe() {
        let s = "容".repeat(200);
        let result = truncate_for_log(&s);
        assert!(result.contains("... [truncated, total"));
    }

    #[test]
    fn secrets_are_masked() {
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret("token-1234567"), "tok***");
    }

    #[test]
    fn password_field_redacted() {
        let body = serde_json::json!({"hostname": "c1", "password": "hunter22"});
        let logged = redact_json_body(&body);
        assert!(logged.contains("c1"));
        assert!(!logged.contains("hunter22"));
    }
}
