use anyhow::Result;
use log::{info, warn};
use std::fs;

use super::connection::CsvConnection;
use crate::domain::models::session::Session;
use crate::storage::traits::SessionStorage;

/// YAML-backed session repository
///
/// The session is a singleton record stored next to, but separately from,
/// the recipe collection.
#[derive(Clone)]
pub struct SessionRepository {
    connection: CsvConnection,
}

impl SessionRepository {
    /// Create a new session repository
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

impl SessionStorage for SessionRepository {
    fn store_session(&self, session: &Session) -> Result<()> {
        let path = self.connection.session_file_path();
        let yaml = serde_yaml::to_string(session)?;

        // Atomic write using temp file
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, yaml)?;
        fs::rename(&temp_path, &path)?;

        info!("Persisted session for {}", session.name);
        Ok(())
    }

    fn load_session(&self) -> Result<Option<Session>> {
        let path = self.connection.session_file_path();
        if !path.exists() {
            return Ok(None);
        }

        let yaml = fs::read_to_string(&path)?;
        match serde_yaml::from_str(&yaml) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                // An unreadable record is useless; drop it and start anonymous
                warn!("Discarding unreadable session file: {}", e);
                fs::remove_file(&path)?;
                Ok(None)
            }
        }
    }

    fn clear_session(&self) -> Result<()> {
        let path = self.connection.session_file_path();
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_repo() -> (SessionRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        (SessionRepository::new(connection), temp_dir)
    }

    #[test]
    fn test_store_and_load_round_trip() {
        let (repo, _temp_dir) = setup_test_repo();
        let session = Session {
            id: Session::generate_id(),
            name: "Alice".to_string(),
            email: Some("alice@example.com".to_string()),
        };

        repo.store_session(&session).unwrap();

        let loaded = repo.load_session().unwrap().unwrap();
        assert_eq!(loaded, session);
    }

    #[test]
    fn test_load_without_a_stored_session() {
        let (repo, _temp_dir) = setup_test_repo();
        assert!(repo.load_session().unwrap().is_none());
    }

    #[test]
    fn test_store_replaces_previous_session() {
        let (repo, _temp_dir) = setup_test_repo();
        let first = Session {
            id: Session::generate_id(),
            name: "Alice".to_string(),
            email: None,
        };
        let second = Session {
            id: Session::generate_id(),
            name: "Bob".to_string(),
            email: None,
        };

        repo.store_session(&first).unwrap();
        repo.store_session(&second).unwrap();

        let loaded = repo.load_session().unwrap().unwrap();
        assert_eq!(loaded.name, "Bob");
    }

    #[test]
    fn test_clear_session() {
        let (repo, _temp_dir) = setup_test_repo();
        let session = Session {
            id: Session::generate_id(),
            name: "Alice".to_string(),
            email: None,
        };
        repo.store_session(&session).unwrap();

        repo.clear_session().unwrap();
        assert!(repo.load_session().unwrap().is_none());

        // Clearing again is a no-op
        repo.clear_session().unwrap();
    }

    #[test]
    fn test_corrupt_session_file_is_discarded() {
        let (repo, temp_dir) = setup_test_repo();
        let path = temp_dir.path().join("session.yaml");
        fs::write(&path, ": not : valid : yaml : [").unwrap();

        assert!(repo.load_session().unwrap().is_none());
        assert!(!path.exists());
    }
}
