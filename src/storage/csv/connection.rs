use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// CsvConnection manages the data directory holding the recipe and session
/// files. Cloning is cheap; all repositories over the same connection see
/// the same files.
#[derive(Debug, Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a new connection in the default data directory
    ///
    /// Honors `RECIPE_LOGGER_DATA_DIR` when set, otherwise uses
    /// `~/Documents/Recipe Logger`.
    pub fn new_default() -> Result<Self> {
        if let Ok(dir) = std::env::var("RECIPE_LOGGER_DATA_DIR") {
            return Self::new(dir);
        }

        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;

        let documents_dir = PathBuf::from(home_dir).join("Documents");
        Self::new(documents_dir.join("Recipe Logger"))
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Get the path of the recipes file
    ///
    /// One file holds every user's recipes together; reads filter by user id.
    pub fn recipes_file_path(&self) -> PathBuf {
        self.base_directory.join("recipes.csv")
    }

    /// Get the path of the session file
    pub fn session_file_path(&self) -> PathBuf {
        self.base_directory.join("session.yaml")
    }
}
