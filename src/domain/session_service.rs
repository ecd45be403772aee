use anyhow::Result;
use log::info;
use std::sync::{Arc, Mutex};

use crate::domain::error::DomainError;
use crate::domain::models::session::Session;
use crate::storage::traits::{RecipeStorage, SessionStorage};

/// Shared handle onto the current session slot.
///
/// The session service writes it; the recipe service reads it to scope
/// its mirror and mutations.
pub type SessionHandle = Arc<Mutex<Option<Session>>>;

/// Service managing the authenticated identity.
///
/// Two states exist: anonymous (no session) and authenticated. `login`
/// and `logout` are the only transitions.
#[derive(Clone)]
pub struct SessionService {
    session_repository: Arc<dyn SessionStorage>,
    recipe_repository: Arc<dyn RecipeStorage>,
    current: SessionHandle,
}

impl SessionService {
    /// Create the service, restoring a previously persisted session if one
    /// exists
    pub fn new(
        session_repository: Arc<dyn SessionStorage>,
        recipe_repository: Arc<dyn RecipeStorage>,
    ) -> Result<Self> {
        let restored = session_repository.load_session()?;
        if let Some(session) = &restored {
            info!("Restored session for {} ({})", session.name, session.id);
        }

        Ok(Self {
            session_repository,
            recipe_repository,
            current: Arc::new(Mutex::new(restored)),
        })
    }

    /// Handle onto the session slot, for services that scope by session
    pub fn handle(&self) -> SessionHandle {
        self.current.clone()
    }

    /// Log in, replacing any prior session
    pub fn login(&self, name: &str, email: Option<&str>) -> Result<Session, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("Name cannot be empty".to_string()));
        }

        let session = Session {
            id: Session::generate_id(),
            name: name.to_string(),
            email: email
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty()),
        };

        self.session_repository.store_session(&session)?;
        *self.current.lock().unwrap() = Some(session.clone());

        info!("Logged in as {} ({})", session.name, session.id);
        Ok(session)
    }

    /// Log out and clear the persisted session.
    ///
    /// Also purges the recipe store. All users' recipes share one file,
    /// so this wipes everyone's data, not just the departing user's —
    /// long-standing app behavior, kept until product decides otherwise.
    /// Tests pin it.
    pub fn logout(&self) -> Result<(), DomainError> {
        self.session_repository.clear_session()?;
        self.recipe_repository.purge_all()?;
        *self.current.lock().unwrap() = None;

        info!("Logged out");
        Ok(())
    }

    /// The current session, if any
    pub fn current_session(&self) -> Option<Session> {
        self.current.lock().unwrap().clone()
    }

    /// Rename the current identity.
    ///
    /// Recipes created afterwards snapshot the new name; existing recipes
    /// keep the author they were created with.
    pub fn update_profile(&self, name: &str) -> Result<Session, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("Name cannot be empty".to_string()));
        }

        let mut slot = self.current.lock().unwrap();
        let mut updated = slot.clone().ok_or(DomainError::NoSession)?;
        updated.name = name.to_string();

        self.session_repository.store_session(&updated)?;
        *slot = Some(updated.clone());

        info!("Updated profile name to {}", updated.name);
        Ok(updated)
    }
}
