//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;

use crate::domain::models::recipe::Recipe;
use crate::domain::models::session::Session;

/// Trait defining the interface for recipe storage operations
///
/// This trait abstracts away the specific storage implementation details,
/// allowing the domain layer to work with different storage backends
/// (flat files, SQL databases, hosted services, etc.) without modification.
///
/// Every operation is scoped by the owning user's id: a recipe that belongs
/// to another user reads as absent and cannot be mutated.
pub trait RecipeStorage: Send + Sync {
    /// Store a new recipe
    fn store_recipe(&self, recipe: &Recipe) -> Result<()>;

    /// Retrieve a specific recipe by ID for the given user
    fn get_recipe(&self, user_id: &str, recipe_id: &str) -> Result<Option<Recipe>>;

    /// List all recipes for a user, ordered most recently created first
    fn list_recipes(&self, user_id: &str) -> Result<Vec<Recipe>>;

    /// Update an existing recipe as a whole record
    ///
    /// The record lands in a single write, so paired fields such as
    /// `likes`/`is_liked` are never persisted apart.
    fn update_recipe(&self, recipe: &Recipe) -> Result<()>;

    /// Delete a recipe for the given user
    /// Returns true if the recipe was found and deleted, false otherwise
    fn delete_recipe(&self, user_id: &str, recipe_id: &str) -> Result<bool>;

    /// Remove every stored recipe, across all users
    ///
    /// Backs the logout cascade of the file-backed variant; see
    /// `SessionService::logout`.
    fn purge_all(&self) -> Result<()>;
}

/// Trait defining the interface for session storage operations
///
/// The session is a singleton record: storing a new one replaces whatever
/// was persisted before.
pub trait SessionStorage: Send + Sync {
    /// Persist the session, replacing any previous one
    fn store_session(&self, session: &Session) -> Result<()>;

    /// Load the persisted session, if any
    fn load_session(&self) -> Result<Option<Session>>;

    /// Remove the persisted session
    fn clear_session(&self) -> Result<()>;
}
