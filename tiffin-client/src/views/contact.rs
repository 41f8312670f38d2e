//! Contact form

use std::collections::HashMap;

use shared::models::ContactCreate;
use validator::Validate;

use crate::api::TiffinApi;
use crate::notice::Notice;
use crate::views::{CHECK_FIELDS, failure, field_errors};

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub fields: ContactCreate,
    errors: HashMap<String, String>,
}

impl ContactForm {
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

        match api.send_contact(&self.fields).await {
            Ok(_) => {
                self.fields = ContactCreate::default();
                Notice::success(
                    "Message Sent!",
                    "Thank you for contacting us. We'll get back to you soon.",
                )
            }
            Err(e) => failure(
                "send_contact",
                &e,
                "Failed to send message. Please try again.",
            ),
        }
    }
}
