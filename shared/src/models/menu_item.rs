//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Day-part a dish is served in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuCategory {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl MenuCategory {
    pub const ALL: [MenuCategory; 4] = [
        MenuCategory::Morning,
        MenuCategory::Afternoon,
        MenuCategory::Evening,
        MenuCategory::Night,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }

    /// Heading shown above the dishes of this day-part
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Morning => "Morning Tiffins",
            Self::Afternoon => "Afternoon Meals",
            Self::Evening => "Evening Snacks",
            Self::Night => "Night Tiffins",
        }
    }

    pub fn serving_hours(&self) -> &'static str {
        match self {
            Self::Morning => "6:00 AM - 11:00 AM",
            Self::Afternoon => "12:00 PM - 4:00 PM",
            Self::Evening => "4:00 PM - 8:00 PM",
            Self::Night => "8:00 PM - 12:00 AM",
        }
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown category name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown menu category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for MenuCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            "night" => Ok(Self::Night),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price in rupees
    pub price: Decimal,
    pub category: MenuCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItemCreate {
    #[validate(length(min = 1, max = 120, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
    pub price: Decimal,
    pub category: MenuCategory,
    #[serde(default)]
    #[validate(url)]
    pub image: Option<String>,
}

impl MenuItemCreate {
    /// A dish must cost something, and no more than an order line may carry
    pub fn has_valid_price(&self) -> bool {
        self.price > Decimal::ZERO && self.price <= super::preorder::MAX_LINE_PRICE
    }
}
