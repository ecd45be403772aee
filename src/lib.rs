//! # Recipe Logger Backend
//!
//! Contains all non-UI logic for the recipe logger application.
//!
//! This crate is the orchestration layer that brings together:
//! - **Domain**: Business logic and rules for recipe management
//! - **Storage**: Data persistence mechanisms behind narrow traits
//!
//! The backend is UI-agnostic: any shell (mobile, desktop, CLI) can sit on
//! top of it by calling the services and rendering their results.
//!
//! ## Architecture
//!
//! ```text
//! UI Layer (external shell)
//!     ↓
//! Domain Layer (SessionService, RecipeService, ShareService)
//!     ↓
//! Storage Layer (RecipeStorage / SessionStorage traits, CSV backend)
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use recipe_logger::storage::csv::CsvConnection;
//! use recipe_logger::domain::models::recipe::NewRecipe;
//!
//! # fn main() -> anyhow::Result<()> {
//! let connection = CsvConnection::new_default()?;
//! let app = recipe_logger::initialize_backend(connection)?;
//!
//! app.session_service.login("Alice", None)?;
//! app.recipe_service.add(NewRecipe {
//!     title: "Tomato Soup".to_string(),
//!     ..Default::default()
//! })?;
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod storage;

use anyhow::Result;
use log::info;
use std::sync::Arc;

use domain::{RecipeService, SessionService};
use storage::csv::{CsvConnection, RecipeRepository, SessionRepository};

pub use domain::models::recipe::{NewRecipe, Recipe, RecipeUpdate};
pub use domain::models::session::Session;
pub use domain::{Clipboard, DomainError, ShareOutcome, ShareService, ShareTarget};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub session_service: SessionService,
    pub recipe_service: RecipeService,
}

/// Initialize the backend with all required services
///
/// Wires the CSV backend through the storage traits; a different backend
/// only needs its own wiring function.
pub fn initialize_backend(connection: CsvConnection) -> Result<AppState> {
    info!("Setting up storage");
    let recipe_repository = Arc::new(RecipeRepository::new(connection.clone()));
    let session_repository = Arc::new(SessionRepository::new(connection));

    info!("Setting up domain model");
    let session_service = SessionService::new(session_repository, recipe_repository.clone())?;
    let recipe_service = RecipeService::new(recipe_repository, session_service.handle());

    Ok(AppState {
        session_service,
        recipe_service,
    })
}
