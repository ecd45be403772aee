use chrono::Utc;
use log::{info, warn};
use std::sync::{Arc, Mutex};

use crate::domain::error::DomainError;
use crate::domain::models::recipe::{
    normalize_image, normalize_tags, strip_blank_lines, NewRecipe, Recipe, RecipeUpdate,
};
use crate::domain::models::session::Session;
use crate::domain::session_service::SessionHandle;
use crate::storage::traits::RecipeStorage;

/// In-memory copy of the current user's recipes, tagged with the session
/// it was loaded for so a session change forces a reload.
struct Mirror {
    user_id: Option<String>,
    recipes: Vec<Recipe>,
}

/// Service managing recipes for the current session.
///
/// Reads answer from an in-memory mirror of the store; mutations write
/// to the store first and only then touch the mirror, so a persistence
/// failure never leaves the mirror ahead of the store. Mutations without
/// an active session fail with [`DomainError::NoSession`].
#[derive(Clone)]
pub struct RecipeService {
    recipe_repository: Arc<dyn RecipeStorage>,
    session: SessionHandle,
    mirror: Arc<Mutex<Mirror>>,
}

impl RecipeService {
    /// Create a new RecipeService over a storage backend and the shared
    /// session slot
    pub fn new(recipe_repository: Arc<dyn RecipeStorage>, session: SessionHandle) -> Self {
        Self {
            recipe_repository,
            session,
            mirror: Arc::new(Mutex::new(Mirror {
                user_id: None,
                recipes: Vec::new(),
            })),
        }
    }

    fn current_session(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }

    fn require_session(&self) -> Result<Session, DomainError> {
        self.current_session().ok_or(DomainError::NoSession)
    }

    /// Recipes of the current session, most recently created first.
    ///
    /// When the mirror was built for a different session than the current
    /// one it reloads from storage, scoped to the new user. A failed
    /// reload leaves the mirror empty rather than stale: the failure is
    /// returned once, and subsequent calls answer empty until the session
    /// changes again. Without a session the list is empty.
    pub fn list(&self) -> Result<Vec<Recipe>, DomainError> {
        let user_id = self.current_session().map(|s| s.id);
        let mut mirror = self.mirror.lock().unwrap();

        if mirror.user_id != user_id {
            mirror.recipes.clear();
            mirror.user_id = user_id.clone();

            if let Some(uid) = &user_id {
                match self.recipe_repository.list_recipes(uid) {
                    Ok(recipes) => mirror.recipes = recipes,
                    Err(e) => {
                        warn!("Failed to load recipes for {}: {:#}", uid, e);
                        return Err(DomainError::Storage(e));
                    }
                }
            }
        }

        Ok(mirror.recipes.clone())
    }

    /// Create a recipe from a draft
    pub fn add(&self, draft: NewRecipe) -> Result<Recipe, DomainError> {
        let session = self.require_session()?;

        let title = draft.title.trim();
        if title.is_empty() {
            return Err(DomainError::Validation("Title cannot be empty".to_string()));
        }

        let now = Utc::now();
        let recipe = Recipe {
            id: Recipe::generate_id(),
            title: title.to_string(),
            description: draft.description,
            ingredients: strip_blank_lines(&draft.ingredients),
            instructions: strip_blank_lines(&draft.instructions),
            prep_time: draft.prep_time,
            cook_time: draft.cook_time,
            servings: draft.servings.max(1),
            tags: normalize_tags(&draft.tags),
            image: normalize_image(draft.image),
            created_at: now,
            updated_at: now,
            likes: 0,
            is_liked: false,
            author: session.name.clone(),
            user_id: session.id.clone(),
        };

        self.recipe_repository.store_recipe(&recipe)?;

        let mut mirror = self.mirror.lock().unwrap();
        if mirror.user_id.as_deref() == Some(session.id.as_str()) {
            mirror.recipes.insert(0, recipe.clone());
        }

        info!("Added recipe '{}' ({})", recipe.title, recipe.id);
        Ok(recipe)
    }

    /// Merge a partial update into an existing recipe, re-stamping
    /// `updated_at`
    pub fn update(&self, recipe_id: &str, update: RecipeUpdate) -> Result<Recipe, DomainError> {
        let session = self.require_session()?;

        let mut recipe = self
            .recipe_repository
            .get_recipe(&session.id, recipe_id)?
            .ok_or_else(|| DomainError::NotFound(recipe_id.to_string()))?;

        if let Some(title) = update.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(DomainError::Validation("Title cannot be empty".to_string()));
            }
            recipe.title = title;
        }
        if let Some(description) = update.description {
            recipe.description = description;
        }
        if let Some(ingredients) = update.ingredients {
            recipe.ingredients = strip_blank_lines(&ingredients);
        }
        if let Some(instructions) = update.instructions {
            recipe.instructions = strip_blank_lines(&instructions);
        }
        if let Some(prep_time) = update.prep_time {
            recipe.prep_time = prep_time;
        }
        if let Some(cook_time) = update.cook_time {
            recipe.cook_time = cook_time;
        }
        if let Some(servings) = update.servings {
            recipe.servings = servings.max(1);
        }
        if let Some(tags) = update.tags {
            recipe.tags = normalize_tags(&tags);
        }
        if let Some(image) = update.image {
            recipe.image = normalize_image(Some(image));
        }
        recipe.updated_at = Utc::now();

        self.recipe_repository.update_recipe(&recipe)?;
        self.patch_mirror(&session.id, &recipe);

        info!("Updated recipe {}", recipe.id);
        Ok(recipe)
    }

    /// Delete a recipe
    ///
    /// Returns whether anything was removed; deleting an unknown id is a
    /// no-op, so a repeated delete answers `false`.
    pub fn delete(&self, recipe_id: &str) -> Result<bool, DomainError> {
        let session = self.require_session()?;

        let deleted = self.recipe_repository.delete_recipe(&session.id, recipe_id)?;
        if deleted {
            let mut mirror = self.mirror.lock().unwrap();
            if mirror.user_id.as_deref() == Some(session.id.as_str()) {
                mirror.recipes.retain(|r| r.id != recipe_id);
            }
            info!("Deleted recipe {}", recipe_id);
        }

        Ok(deleted)
    }

    /// Flip the like flag, moving the counter by exactly 1 in lock-step.
    ///
    /// Both fields land in one whole-record write, so they can never be
    /// persisted apart.
    pub fn toggle_like(&self, recipe_id: &str) -> Result<Recipe, DomainError> {
        let session = self.require_session()?;

        let mut recipe = self
            .recipe_repository
            .get_recipe(&session.id, recipe_id)?
            .ok_or_else(|| DomainError::NotFound(recipe_id.to_string()))?;

        recipe.is_liked = !recipe.is_liked;
        if recipe.is_liked {
            recipe.likes += 1;
        } else {
            recipe.likes = recipe.likes.saturating_sub(1);
        }
        recipe.updated_at = Utc::now();

        self.recipe_repository.update_recipe(&recipe)?;
        self.patch_mirror(&session.id, &recipe);

        Ok(recipe)
    }

    /// Replace a recipe in the mirror, keeping its position
    fn patch_mirror(&self, user_id: &str, recipe: &Recipe) {
        let mut mirror = self.mirror.lock().unwrap();
        if mirror.user_id.as_deref() == Some(user_id) {
            if let Some(slot) = mirror.recipes.iter_mut().find(|r| r.id == recipe.id) {
                *slot = recipe.clone();
            }
        }
    }
}
