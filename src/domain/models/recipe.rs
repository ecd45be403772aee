use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of tags a recipe may carry; surplus tags are dropped.
pub const MAX_TAGS: usize = 5;

/// Domain model representing a recipe in the system.
/// This model contains the core business information for a single recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Ingredient lines in display order; blank lines are stripped before storage
    pub ingredients: Vec<String>,
    /// Instruction lines in display order; blank lines are stripped before storage
    pub instructions: Vec<String>,
    /// Preparation time in minutes
    pub prep_time: u32,
    /// Cooking time in minutes
    pub cook_time: u32,
    /// Number of servings, always at least 1
    pub servings: u32,
    /// Free-text labels, insertion-ordered, deduplicated, at most [`MAX_TAGS`]
    pub tags: Vec<String>,
    /// Optional image URL
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub likes: u32,
    pub is_liked: bool,
    /// Display name of the owning user, snapshotted when the recipe is created
    pub author: String,
    /// ID of the user this recipe belongs to
    pub user_id: String,
}

impl Recipe {
    /// Generate a unique ID for a recipe
    pub fn generate_id() -> String {
        format!("recipe::{}", Uuid::new_v4())
    }
}

/// Draft for a recipe that has not been stored yet.
///
/// The recipe service fills in identity, ownership, and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    pub tags: Vec<String>,
    pub image: Option<String>,
}

/// Partial update for an existing recipe.
///
/// `None` fields are left unchanged. A blank `image` clears the stored one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<Vec<String>>,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub servings: Option<u32>,
    pub tags: Option<Vec<String>>,
    pub image: Option<String>,
}

/// Drop lines that are empty after trimming, keeping the rest as typed.
pub fn strip_blank_lines(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .cloned()
        .collect()
}

/// Normalize tags: trim, drop blanks, deduplicate preserving insertion
/// order, and cap the set at [`MAX_TAGS`].
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() || normalized.iter().any(|t| t == tag) {
            continue;
        }
        normalized.push(tag.to_string());
        if normalized.len() == MAX_TAGS {
            break;
        }
    }
    normalized
}

/// Treat a blank image URL as no image at all.
pub fn normalize_image(image: Option<String>) -> Option<String> {
    image
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
}
