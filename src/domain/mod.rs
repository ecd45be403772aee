//! # Domain Module
//!
//! Contains all business logic for the recipe logger.
//!
//! This module encapsulates the entities, rules, and services that define
//! how recipes are created, owned, and managed. It operates independently
//! of any specific UI framework or storage mechanism.
//!
//! ## Module Organization
//!
//! - **session_service**: The authenticated identity and its transitions
//! - **recipe_service**: Recipe CRUD over a session-scoped in-memory mirror
//! - **share_service**: Sending a recipe outside the app (share sheet or
//!   clipboard)
//! - **models**: The `Recipe` and `Session` entities and their drafts
//! - **error**: The explicit failure taxonomy surfaced to callers
//!
//! ## Business Rules
//!
//! - Recipes must have a non-empty title
//! - Blank ingredient and instruction lines are stripped before storage
//! - Tags are deduplicated and capped at five
//! - Servings are clamped to at least one
//! - Every mutation re-stamps `updated_at`
//! - All recipe access is scoped to the owning session

pub mod error;
pub mod models;
pub mod recipe_service;
pub mod session_service;
pub mod share_service;

pub use error::DomainError;
pub use recipe_service::RecipeService;
pub use session_service::{SessionHandle, SessionService};
pub use share_service::{Clipboard, ShareOutcome, ShareService, ShareTarget};
