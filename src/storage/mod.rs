//! # Storage Module
//!
//! Handles all data persistence for the recipe logger.
//!
//! The domain layer only ever sees the traits in [`traits`]; the concrete
//! backend is chosen at wiring time and can be swapped (flat files, SQL,
//! hosted service) without touching repository logic.
//!
//! ## Key Responsibilities
//!
//! - **Data Persistence**: Saving recipes and the current session to disk
//! - **Data Retrieval**: Loading stored data back into memory
//! - **Storage Abstraction**: One consistent API regardless of backend
//! - **Ownership Scoping**: Every recipe query is filtered by its owner

pub mod csv;
pub mod traits;

// Re-export the main types that other modules need
pub use csv::{CsvConnection, RecipeRepository, SessionRepository};
pub use traits::{RecipeStorage, SessionStorage};
