use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use csv::{Reader, Writer};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use super::connection::CsvConnection;
use crate::domain::models::recipe::Recipe;
use crate::storage::traits::RecipeStorage;

/// Row shape of `recipes.csv`.
///
/// List-valued fields are JSON-encoded so each recipe stays one flat
/// record; timestamps are RFC 3339 strings. An empty `image` cell means
/// the recipe has no image.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRecipe {
    id: String,
    user_id: String,
    title: String,
    description: String,
    ingredients: String,
    instructions: String,
    prep_time: u32,
    cook_time: u32,
    servings: u32,
    tags: String,
    image: String,
    author: String,
    likes: u32,
    is_liked: bool,
    created_at: String,
    updated_at: String,
}

impl CsvRecipe {
    fn from_domain(recipe: &Recipe) -> Result<Self> {
        Ok(Self {
            id: recipe.id.clone(),
            user_id: recipe.user_id.clone(),
            title: recipe.title.clone(),
            description: recipe.description.clone(),
            ingredients: serde_json::to_string(&recipe.ingredients)?,
            instructions: serde_json::to_string(&recipe.instructions)?,
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            servings: recipe.servings,
            tags: serde_json::to_string(&recipe.tags)?,
            image: recipe.image.clone().unwrap_or_default(),
            author: recipe.author.clone(),
            likes: recipe.likes,
            is_liked: recipe.is_liked,
            created_at: recipe.created_at.to_rfc3339(),
            updated_at: recipe.updated_at.to_rfc3339(),
        })
    }

    fn into_domain(self) -> Result<Recipe> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .with_context(|| format!("Failed to parse created_at for recipe {}", self.id))?
            .with_timezone(&Utc);
        let updated_at = DateTime::parse_from_rfc3339(&self.updated_at)
            .with_context(|| format!("Failed to parse updated_at for recipe {}", self.id))?
            .with_timezone(&Utc);

        Ok(Recipe {
            ingredients: serde_json::from_str(&self.ingredients)
                .with_context(|| format!("Failed to parse ingredients for recipe {}", self.id))?,
            instructions: serde_json::from_str(&self.instructions)
                .with_context(|| format!("Failed to parse instructions for recipe {}", self.id))?,
            tags: serde_json::from_str(&self.tags)
                .with_context(|| format!("Failed to parse tags for recipe {}", self.id))?,
            image: if self.image.is_empty() {
                None
            } else {
                Some(self.image)
            },
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            servings: self.servings,
            author: self.author,
            likes: self.likes,
            is_liked: self.is_liked,
            created_at,
            updated_at,
        })
    }
}

/// CSV-based recipe repository
///
/// All recipes live in a single shared file; reads filter down to the
/// requesting user. Sharing one file across users is what makes the
/// logout purge a whole-store wipe (see `SessionService::logout`).
#[derive(Clone)]
pub struct RecipeRepository {
    connection: CsvConnection,
}

impl RecipeRepository {
    /// Create a new CSV recipe repository
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read every stored recipe, across all users
    fn read_all(&self) -> Result<Vec<Recipe>> {
        let file_path = self.connection.recipes_file_path();
        if !file_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&file_path)?;
        let reader = BufReader::new(file);
        let mut csv_reader = Reader::from_reader(reader);

        let mut recipes = Vec::new();
        for result in csv_reader.deserialize() {
            let record: CsvRecipe = result?;
            recipes.push(record.into_domain()?);
        }

        Ok(recipes)
    }

    /// Write the full recipe collection back to disk
    fn write_all(&self, recipes: &[Recipe]) -> Result<()> {
        let file_path = self.connection.recipes_file_path();

        // Write to a temporary file first so readers never see a torn file
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;

            let writer = BufWriter::new(file);
            let mut csv_writer = Writer::from_writer(writer);

            for recipe in recipes {
                csv_writer.serialize(CsvRecipe::from_domain(recipe)?)?;
            }

            csv_writer.flush()?;
        }

        // Atomic move from temp to final file
        std::fs::rename(&temp_path, &file_path)?;

        Ok(())
    }
}

impl RecipeStorage for RecipeRepository {
    fn store_recipe(&self, recipe: &Recipe) -> Result<()> {
        let mut recipes = self.read_all()?;
        recipes.push(recipe.clone());
        self.write_all(&recipes)?;
        info!("Stored recipe {} for user {}", recipe.id, recipe.user_id);
        Ok(())
    }

    fn get_recipe(&self, user_id: &str, recipe_id: &str) -> Result<Option<Recipe>> {
        let recipes = self.read_all()?;
        Ok(recipes
            .into_iter()
            .find(|r| r.user_id == user_id && r.id == recipe_id))
    }

    fn list_recipes(&self, user_id: &str) -> Result<Vec<Recipe>> {
        let mut recipes: Vec<Recipe> = self
            .read_all()?
            .into_iter()
            .filter(|r| r.user_id == user_id)
            .collect();

        // Most recently created first
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(recipes)
    }

    fn update_recipe(&self, recipe: &Recipe) -> Result<()> {
        let mut recipes = self.read_all()?;
        let slot = recipes
            .iter_mut()
            .find(|r| r.user_id == recipe.user_id && r.id == recipe.id)
            .ok_or_else(|| anyhow::anyhow!("Recipe not found for update: {}", recipe.id))?;
        *slot = recipe.clone();
        self.write_all(&recipes)
    }

    fn delete_recipe(&self, user_id: &str, recipe_id: &str) -> Result<bool> {
        let mut recipes = self.read_all()?;
        let before = recipes.len();
        recipes.retain(|r| !(r.user_id == user_id && r.id == recipe_id));

        if recipes.len() == before {
            return Ok(false);
        }

        self.write_all(&recipes)?;
        info!("Deleted recipe {} for user {}", recipe_id, user_id);
        Ok(true)
    }

    fn purge_all(&self) -> Result<()> {
        let file_path = self.connection.recipes_file_path();
        if file_path.exists() {
            std::fs::remove_file(&file_path)?;
            info!("Purged recipe store at {}", file_path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    fn setup_test_repo() -> (RecipeRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        (RecipeRepository::new(connection), temp_dir)
    }

    fn sample_recipe(user_id: &str, title: &str, created_at: DateTime<Utc>) -> Recipe {
        Recipe {
            id: Recipe::generate_id(),
            title: title.to_string(),
            description: "A test recipe".to_string(),
            ingredients: vec!["1 cup flour".to_string(), "2 eggs".to_string()],
            instructions: vec!["Mix".to_string(), "Bake".to_string()],
            prep_time: 10,
            cook_time: 20,
            servings: 4,
            tags: vec!["test".to_string()],
            image: None,
            created_at,
            updated_at: created_at,
            likes: 0,
            is_liked: false,
            author: "Tester".to_string(),
            user_id: user_id.to_string(),
        }
    }

    #[test]
    fn test_store_and_get_round_trip() {
        let (repo, _temp_dir) = setup_test_repo();
        let recipe = sample_recipe("user::a", "Pancakes", Utc::now());

        repo.store_recipe(&recipe).unwrap();

        let loaded = repo.get_recipe("user::a", &recipe.id).unwrap().unwrap();
        assert_eq!(loaded, recipe);
    }

    #[test]
    fn test_get_is_ownership_scoped() {
        let (repo, _temp_dir) = setup_test_repo();
        let recipe = sample_recipe("user::a", "Pancakes", Utc::now());
        repo.store_recipe(&recipe).unwrap();

        assert!(repo.get_recipe("user::b", &recipe.id).unwrap().is_none());
    }

    #[test]
    fn test_list_filters_by_user_and_orders_newest_first() {
        let (repo, _temp_dir) = setup_test_repo();
        let base = Utc::now();
        let old = sample_recipe("user::a", "Old", base - Duration::hours(2));
        let new = sample_recipe("user::a", "New", base);
        let other = sample_recipe("user::b", "Other", base - Duration::hours(1));

        repo.store_recipe(&old).unwrap();
        repo.store_recipe(&other).unwrap();
        repo.store_recipe(&new).unwrap();

        let listed = repo.list_recipes("user::a").unwrap();
        let titles: Vec<&str> = listed.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Old"]);
    }

    #[test]
    fn test_update_replaces_whole_record() {
        let (repo, _temp_dir) = setup_test_repo();
        let mut recipe = sample_recipe("user::a", "Stew", Utc::now());
        repo.store_recipe(&recipe).unwrap();

        recipe.title = "Hearty Stew".to_string();
        recipe.likes = 1;
        recipe.is_liked = true;
        repo.update_recipe(&recipe).unwrap();

        let loaded = repo.get_recipe("user::a", &recipe.id).unwrap().unwrap();
        assert_eq!(loaded.title, "Hearty Stew");
        assert_eq!(loaded.likes, 1);
        assert!(loaded.is_liked);
    }

    #[test]
    fn test_update_unknown_recipe_fails() {
        let (repo, _temp_dir) = setup_test_repo();
        let recipe = sample_recipe("user::a", "Ghost", Utc::now());
        assert!(repo.update_recipe(&recipe).is_err());
    }

    #[test]
    fn test_delete_reports_whether_anything_was_removed() {
        let (repo, _temp_dir) = setup_test_repo();
        let recipe = sample_recipe("user::a", "Toast", Utc::now());
        repo.store_recipe(&recipe).unwrap();

        assert!(repo.delete_recipe("user::a", &recipe.id).unwrap());
        assert!(!repo.delete_recipe("user::a", &recipe.id).unwrap());
        assert!(repo.get_recipe("user::a", &recipe.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_ignores_foreign_recipes() {
        let (repo, _temp_dir) = setup_test_repo();
        let recipe = sample_recipe("user::a", "Toast", Utc::now());
        repo.store_recipe(&recipe).unwrap();

        assert!(!repo.delete_recipe("user::b", &recipe.id).unwrap());
        assert!(repo.get_recipe("user::a", &recipe.id).unwrap().is_some());
    }

    #[test]
    fn test_purge_all_drops_every_user() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.store_recipe(&sample_recipe("user::a", "A", Utc::now()))
            .unwrap();
        repo.store_recipe(&sample_recipe("user::b", "B", Utc::now()))
            .unwrap();

        repo.purge_all().unwrap();

        assert!(repo.list_recipes("user::a").unwrap().is_empty());
        assert!(repo.list_recipes("user::b").unwrap().is_empty());
    }

    #[test]
    fn test_data_survives_a_new_repository_instance() {
        let temp_dir = TempDir::new().unwrap();
        let recipe = sample_recipe("user::a", "Keeper", Utc::now());

        {
            let connection = CsvConnection::new(temp_dir.path()).unwrap();
            let repo = RecipeRepository::new(connection);
            repo.store_recipe(&recipe).unwrap();
        }

        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        let repo = RecipeRepository::new(connection);
        let listed = repo.list_recipes("user::a").unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], recipe);
    }

    #[test]
    fn test_image_cell_round_trips() {
        let (repo, _temp_dir) = setup_test_repo();
        let mut recipe = sample_recipe("user::a", "Pie", Utc::now());
        recipe.image = Some("https://example.com/pie.png".to_string());
        repo.store_recipe(&recipe).unwrap();

        let loaded = repo.get_recipe("user::a", &recipe.id).unwrap().unwrap();
        assert_eq!(loaded.image.as_deref(), Some("https://example.com/pie.png"));
    }
}
