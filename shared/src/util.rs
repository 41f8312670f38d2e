//! Small helpers shared across crates

/// Current UTC time
pub fn now() -> chrono::DateTime<chrono::Utc> {
    chrono::Utc::now()
}

/// New document id
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Trim and drop empty input
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  98400 "), Some("98400"));
        assert_eq!(non_blank("   "), None);
        assert_eq!(non_blank(""), None);
    }

    #[test]
    fn test_new_id_is_uuid() {
        assert!(uuid::Uuid::parse_str(&new_id()).is_ok());
    }
}
