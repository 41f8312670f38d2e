//! Feedback form

use std::collections::HashMap;

use shared::models::FeedbackCreate;
use validator::Validate;

use crate::api::TiffinApi;
use crate::notice::Notice;
use crate::views::{CHECK_FIELDS, failure, field_errors};

/// Rating starts at five stars
#[derive(Debug, Clone, Default)]
pub struct FeedbackForm {
    pub fields: FeedbackCreate,
    errors: HashMap<String, String>,
}

impl FeedbackForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &HashMap<String, String> {
        &self.errors
    }

    pub async fn submit<A: TiffinApi + ?Sized>(&mut self, api: &A) -> Notice {
        if let Err(errors) = self.fields.validate() {
            self.errors = field_errors(&errors);
            return Notice::error(CHECK_FIELDS);
        }
        self.errors.clear();

        match api.send_feedback(&self.fields).await {
            Ok(_) => {
                self.fields = FeedbackCreate::default();
                Notice::success(
                    "Feedback Submitted!",
                    "Thank you for your valuable feedback.",
                )
            }
            Err(e) => failure(
                "send_feedback",
                &e,
                "Failed to submit feedback. Please try again.",
            ),
        }
    }
}
