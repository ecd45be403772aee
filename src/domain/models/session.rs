use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated identity, present between login and logout.
/// Recipes are owned by the session id that created them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Session {
    /// Generate a unique ID for a session
    pub fn generate_id() -> String {
        format!("user::{}", Uuid::new_v4())
    }
}
