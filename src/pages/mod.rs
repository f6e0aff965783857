//! Page loaders: one per dashboard tab, plus the helpers they share.
//!
//! Every loader follows the same shape: fetch (jointly when it needs more than
//! one resource), build a view model, replace its render target wholesale.
//! Mutating actions confirm through [`Dialogs`], report failures in an alert
//! and refresh the page on success.

pub mod access;
pub mod console;
pub mod format;
pub mod logs;
pub mod players;
pub mod plugins;
pub mod recipes;
pub mod server;
pub mod settings;
pub mod status;

use std::sync::Arc;

use uuid::Uuid;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::modal::Dialogs;
use crate::surface::Surface;

pub use access::AccessListPage;
pub use console::FeedPage;
pub use logs::LogsPage;
pub use players::PlayersPage;
pub use plugins::PluginsPage;
pub use recipes::RecipesPage;
pub use server::ServerPage;
pub use settings::SettingsPage;
pub use status::StatusPage;

/// How a user action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The backend accepted the change.
    Completed,
    /// The user declined a confirmation or cancelled a prompt.
    Cancelled,
    /// Input was rejected before any request was sent.
    Rejected,
    /// The request failed; the user has been told.
    Failed,
}

/// What every page needs to talk to the backend and the user.
#[derive(Clone)]
pub struct PageContext {
    pub api: ApiClient,
    pub surface: Arc<dyn Surface>,
    pub dialogs: Arc<dyn Dialogs>,
}

impl PageContext {
    pub fn new(api: ApiClient, surface: Arc<dyn Surface>, dialogs: Arc<dyn Dialogs>) -> Self {
        Self { api, surface, dialogs }
    }

    /// Alerts the user about a failed action and logs it with an id that can
    /// be matched against the log file.
    pub async fn report_failure(&self, what: &str, err: &ClientError) -> ActionOutcome {
        if let ClientError::Validation { message, .. } = err {
            self.dialogs.alert(message).await;
            return ActionOutcome::Rejected;
        }
        let error_id = Uuid::new_v4();
        tracing::warn!(%error_id, error = %err, "failed to {}", what);
        self.dialogs.alert(&format!("Failed to {}: {}", what, err.user_message())).await;
        ActionOutcome::Failed
    }
}
