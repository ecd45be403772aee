//! # CSV Storage Module
//!
//! File-backed storage implementation. Recipes live in a single
//! `recipes.csv` shared by every user (reads filter by user id); the
//! session is a separate `session.yaml` record. All writes go through a
//! temp file and an atomic rename.
//!
//! ## File Format
//!
//! ```csv
//! id,user_id,title,description,ingredients,instructions,prep_time,cook_time,servings,tags,image,author,likes,is_liked,created_at,updated_at
//! recipe::9be0...,user::4f21...,Pancakes,Fluffy breakfast pancakes,"[""1 cup flour"",""2 eggs""]","[""Mix"",""Fry""]",10,15,4,"[""breakfast""]",,Alice,0,false,2024-01-15T10:30:00+00:00,2024-01-15T10:30:00+00:00
//! ```

pub mod connection;
pub mod recipe_repository;
pub mod session_repository;

pub use connection::CsvConnection;
pub use recipe_repository::RecipeRepository;
pub use session_repository::SessionRepository;
