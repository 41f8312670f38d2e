//! Gallery Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Gallery picture shown on the public site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: String,
    pub title: String,
    /// Free-text grouping, e.g. "food" or "interior"
    pub category: String,
    pub image: String,
}

/// Create gallery item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GalleryItemCreate {
    #[validate(length(min = 1, max = 120))]
    pub title: String,
    #[validate(length(min = 1, max = 60))]
    pub category: String,
    #[validate(url)]
    pub image: String,
}
