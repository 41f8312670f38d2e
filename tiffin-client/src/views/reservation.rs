//! Table reservation form

use std::collections::HashMap;

use shared::models::{Reservation, ReservationCreate};
use validator::Validate;

use crate::api::TiffinApi;
use crate::notice::Notice;
use crate::views::{CHECK_FIELDS, failure, field_errors};

/// Every field starts empty
#[derive(Debug, Clone, Default)]
pub struct ReservationForm {
    pub fields: ReservationCreate,
    errors: HashMap<String, String>,
}

impl ReservationForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages keyed by field name from the last failed submit
    pub fn errors(&self) -> &HashMap<String, String> {
        &self.errors
    }

    /// Validate and write a pending reservation; the form resets on success
    pub async fn submit<A: TiffinApi + ?Sized>(
        &mut self,
        api: &A,
    ) -> (Notice, Option<Reservation>) {
        if let Err(errors) = self.fields.validate() {
            self.errors = field_errors(&errors);
            return (Notice::error(CHECK_FIELDS), None);
        }
        self.errors.clear();

        match api.create_reservation(&self.fields).await {
            Ok(created) => {
                self.fields = ReservationCreate::default();
                let notice = Notice::success(
                    "Reservation Submitted!",
                    "We'll contact you soon to confirm your reservation.",
                );
                (notice, Some(created))
            }
            Err(e) => {
                let notice = failure(
                    "create_reservation",
                    &e,
                    "Failed to submit reservation. Please try again.",
                );
                (notice, None)
            }
        }
    }
}
