//! Feedback Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Rating the feedback form starts with
pub const DEFAULT_RATING: u8 = 5;

fn default_rating() -> u8 {
    DEFAULT_RATING
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: String,
    pub name: String,
    pub email: String,
    pub rating: u8,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeedbackCreate {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[serde(default = "default_rating")]
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,
    #[validate(length(min = 1, max = 5000, message = "Message is required"))]
    pub message: String,
}

impl Default for FeedbackCreate {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            rating: DEFAULT_RATING,
            message: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_defaults_to_five() {
        let parsed: FeedbackCreate =
            serde_json::from_str(r#"{"name":"A","email":"a@b.co","message":"Lovely"}"#).unwrap();
        assert_eq!(parsed.rating, 5);
        assert_eq!(FeedbackCreate::default().rating, 5);
    }

    #[test]
    fn test_rating_range() {
        let mut fb = FeedbackCreate {
            name: "A".into(),
            email: "a@b.co".into(),
            rating: 0,
            message: "ok".into(),
        };
        assert!(fb.validate().is_err());
        fb.rating = 6;
        assert!(fb.validate().is_err());
        fb.rating = 1;
        assert!(fb.validate().is_ok());
    }
}
