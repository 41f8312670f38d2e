//! Public menu

use std::str::FromStr;

use shared::models::{MenuCategory, MenuItem};

use crate::api::TiffinApi;
use crate::notice::Notice;
use crate::views::failure;

/// Category filter: everything, or one day-part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuFilter {
    #[default]
    All,
    Category(MenuCategory),
}

impl MenuFilter {
    pub fn matches(&self, item: &MenuItem) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => item.category == *category,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Category(category) => category.as_str(),
        }
    }
}

impl FromStr for MenuFilter {
    type Err = shared::models::UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Category)
    }
}

/// Dishes of one day-part, under its heading
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSection<'a> {
    pub category: MenuCategory,
    pub title: &'static str,
    pub hours: &'static str,
    pub items: Vec<&'a MenuItem>,
}

#[derive(Debug, Clone, Default)]
pub struct MenuView {
    items: Vec<MenuItem>,
    filter: MenuFilter,
}

impl MenuView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch every dish; the filter is applied locally
    pub async fn load<A: TiffinApi + ?Sized>(&mut self, api: &A) -> Option<Notice> {
        match api.list_menu().await {
            Ok(items) => {
                self.items = items;
                None
            }
            Err(e) => Some(failure("load_menu", &e, "Failed to load the menu.")),
        }
    }

    pub fn set_items(&mut self, items: Vec<MenuItem>) {
        self.items = items;
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn filter(&self) -> MenuFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: MenuFilter) {
        self.filter = filter;
    }

    pub fn visible(&self) -> Vec<&MenuItem> {
        self.items.iter().filter(|i| self.filter.matches(i)).collect()
    }

    /// Visible dishes grouped by day-part; empty day-parts are left out
    pub fn sections(&self) -> Vec<MenuSection<'_>> {
        MenuCategory::ALL
            .into_iter()
            .filter(|c| self.filter == MenuFilter::All || self.filter == MenuFilter::Category(*c))
            .filter_map(|category| {
                let items: Vec<&MenuItem> =
                    self.items.iter().filter(|i| i.category == category).collect();
                (!items.is_empty()).then(|| MenuSection {
                    category,
                    title: category.display_name(),
                    hours: category.serving_hours(),
                    items,
                })
            })
            .collect()
    }
}
