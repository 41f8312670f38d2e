//! Public gallery

use shared::models::GalleryItem;

use crate::api::TiffinApi;
use crate::notice::Notice;
use crate::views::failure;

#[derive(Debug, Clone, Default)]
pub struct GalleryView {
    items: Vec<GalleryItem>,
    /// `None` shows everything
    category: Option<String>,
}

impl GalleryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load<A: TiffinApi + ?Sized>(&mut self, api: &A) -> Option<Notice> {
        match api.list_gallery().await {
            Ok(items) => {
                self.items = items;
                None
            }
            Err(e) => Some(failure("load_gallery", &e, "Failed to load the gallery.")),
        }
    }

    pub fn set_items(&mut self, items: Vec<GalleryItem>) {
        self.items = items;
    }

    /// `"all"` or blank clears the filter
    pub fn set_category(&mut self, category: &str) {
        let category = category.trim();
        self.category = (!category.is_empty() && !category.eq_ignore_ascii_case("all"))
            .then(|| category.to_string());
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Distinct categories in first-seen order, for the filter buttons
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.category.as_str()) {
                seen.push(&item.category);
            }
        }
        seen
    }

    pub fn visible(&self) -> Vec<&GalleryItem> {
        self.items
            .iter()
            .filter(|i| self.category.as_deref().is_none_or(|c| i.category == c))
            .collect()
    }
}
