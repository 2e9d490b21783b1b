//! # Domain Models
//!
//! These structs represent the core entities of Brew Journal.
//! Serde attributes pin the persisted JSON field names (`imageNames`,
//! flattened `latitude`/`longitude`) so existing data directories stay
//! readable across releases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A latitude/longitude pair attached to a post.
///
/// Persisted flattened into the post object: both keys present together,
/// or neither.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// A single journal entry: text, photos, optional location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub content: String,
    /// Creation timestamp. Never changes after `new`, even across edits.
    pub date: DateTime<Utc>,
    /// Soft references into the asset store, in display order.
    /// A name that no longer resolves renders as absent, never an error.
    pub image_names: Vec<String>,
    #[serde(flatten)]
    pub location: Option<Coordinate>,
}

impl Post {
    /// Builds a post with a fresh random id and the current time as `date`.
    pub fn new(content: String, image_names: Vec<String>, location: Option<Coordinate>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            date: Utc::now(),
            image_names,
            location,
        }
    }
}

/// Categories offered by the kit form picker. A kit's category may also be
/// any custom string; these are just the built-in choices.
pub const PREDEFINED_CATEGORIES: [&str; 4] = [
    "Coffee Machine",
    "Coffee Cup",
    "Distribution Tool",
    "Coffee Beans",
];

/// Fallback category when a custom choice is submitted blank.
/// Keeps the "category is never empty" invariant without rejecting the kit.
pub const FALLBACK_CATEGORY: &str = "Uncategorized";

/// Category selection as it arrives from the kit form.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryChoice {
    /// One of [`PREDEFINED_CATEGORIES`].
    Preset(String),
    /// Free-form text from the "Custom" picker entry.
    Custom(String),
}

impl CategoryChoice {
    /// Resolves the choice to the string stored on the kit.
    ///
    /// A blank custom entry resolves to [`FALLBACK_CATEGORY`] so that the
    /// stored category is never empty.
    pub fn resolve(self) -> String {
        match self {
            CategoryChoice::Preset(name) => name,
            CategoryChoice::Custom(text) if text.trim().is_empty() => FALLBACK_CATEGORY.to_string(),
            CategoryChoice::Custom(text) => text,
        }
    }
}

/// A piece of brewing equipment, grouped by category for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrewingKit {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// At most one photo per kit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
    /// Never empty; grouping is by exact string equality.
    pub category: String,
}

impl BrewingKit {
    pub fn new(
        name: String,
        description: String,
        image_name: Option<String>,
        category: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            image_name,
            category,
        }
    }
}
