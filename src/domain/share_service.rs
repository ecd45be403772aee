use anyhow::Result;
use log::info;
use std::sync::Arc;

use crate::domain::models::recipe::Recipe;

/// Native share sheet of the embedding shell, when the platform has one.
pub trait ShareTarget: Send + Sync {
    /// Hand a title and a short teaser to the platform share UI
    fn share(&self, title: &str, text: &str) -> Result<()>;
}

/// Clipboard of the embedding shell.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// How a share request was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The platform share sheet took the recipe
    Shared,
    /// No share sheet available; the full text went to the clipboard
    CopiedToClipboard,
}

/// Service for sending a recipe outside the app.
///
/// Side-effect only: sharing never touches the stored data. Both
/// capabilities are injected by the shell, since only it knows what the
/// platform offers.
#[derive(Clone)]
pub struct ShareService {
    target: Option<Arc<dyn ShareTarget>>,
    clipboard: Arc<dyn Clipboard>,
}

impl ShareService {
    /// Create a share service with only the clipboard fallback
    pub fn new(clipboard: Arc<dyn Clipboard>) -> Self {
        Self {
            target: None,
            clipboard,
        }
    }

    /// Prefer a native share sheet over the clipboard fallback
    pub fn with_target(mut self, target: Arc<dyn ShareTarget>) -> Self {
        self.target = Some(target);
        self
    }

    /// Share a recipe through the platform, or copy its plain-text form
    /// to the clipboard when no share sheet exists
    pub fn share_recipe(&self, recipe: &Recipe) -> Result<ShareOutcome> {
        if let Some(target) = &self.target {
            let teaser = format!("Check out this recipe: {}", recipe.description);
            target.share(&recipe.title, &teaser)?;
            info!("Shared recipe {} via the platform target", recipe.id);
            return Ok(ShareOutcome::Shared);
        }

        let text = render_share_text(recipe);
        self.clipboard.write_text(&text)?;
        info!("Copied recipe {} to the clipboard", recipe.id);
        Ok(ShareOutcome::CopiedToClipboard)
    }
}

/// Plain-text rendering of a recipe, used by the clipboard fallback
pub fn render_share_text(recipe: &Recipe) -> String {
    format!(
        "{}\n\n{}\n\nIngredients:\n{}\n\nInstructions:\n{}",
        recipe.title,
        recipe.description,
        recipe.ingredients.join("\n"),
        recipe.instructions.join("\n"),
    )
}
