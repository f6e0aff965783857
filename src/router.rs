//! Page selection and the single polling slot.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{ClientError, ClientResult};
use crate::lifecycle::{lock, PollTask};
use crate::surface::Surface;

/// A navigation tab of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageId {
    Status,
    Players,
    Whitelist,
    Blacklist,
    Ops,
    Plugins,
    Server,
    Console,
    Chat,
    Settings,
    Recipes,
    Logs,
    Files,
}

impl PageId {
    pub const ALL: [PageId; 13] = [
        PageId::Status,
        PageId::Players,
        PageId::Whitelist,
        PageId::Blacklist,
        PageId::Ops,
        PageId::Plugins,
        PageId::Server,
        PageId::Console,
        PageId::Chat,
        PageId::Settings,
        PageId::Recipes,
        PageId::Logs,
        PageId::Files,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageId::Status => "status",
            PageId::Players => "players",
            PageId::Whitelist => "whitelist",
            PageId::Blacklist => "blacklist",
            PageId::Ops => "ops",
            PageId::Plugins => "plugins",
            PageId::Server => "server",
            PageId::Console => "console",
            PageId::Chat => "chat",
            PageId::Settings => "settings",
            PageId::Recipes => "recipes",
            PageId::Logs => "logs",
            PageId::Files => "files",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PageId::Status => "Status",
            PageId::Players => "Players",
            PageId::Whitelist => "Whitelist",
            PageId::Blacklist => "Blacklist",
            PageId::Ops => "Operators",
            PageId::Plugins => "Plugins",
            PageId::Server => "Server Info",
            PageId::Console => "Console",
            PageId::Chat => "Chat",
            PageId::Settings => "Settings",
            PageId::Recipes => "Custom Recipes",
            PageId::Logs => "Logs",
            PageId::Files => "File Manager",
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageId {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let page = match s.trim().to_ascii_lowercase().as_str() {
            "status" | "metrics" => PageId::Status,
            "players" => PageId::Players,
            "whitelist" => PageId::Whitelist,
            "blacklist" => PageId::Blacklist,
            "ops" | "operators" => PageId::Ops,
            "plugins" => PageId::Plugins,
            "server" => PageId::Server,
            "console" => PageId::Console,
            "chat" => PageId::Chat,
            "settings" => PageId::Settings,
            "recipes" | "custom-recipes" => PageId::Recipes,
            "logs" => PageId::Logs,
            "files" | "file-manager" => PageId::Files,
            other => return Err(ClientError::validation("page", format!("Unknown page: {}", other))),
        };
        Ok(page)
    }
}

/// Fetches and renders one page.
///
/// `load` is called with tick 0 when the page is selected and with increasing
/// ticks on every refresh while it stays selected.
#[async_trait]
pub trait PageLoader: Send + Sync {
    fn page(&self) -> PageId;

    /// `None` for pages that load once on selection.
    fn refresh_interval(&self) -> Option<Duration>;

    async fn load(&self, tick: u64) -> ClientResult<()>;

    /// Called when another page is selected.
    fn unmount(&self) {}
}

#[derive(Default)]
struct RouterState {
    current: Option<PageId>,
    poll: Option<PollTask>,
}

/// Maps tabs to loaders and owns the one live polling task.
pub struct PageRouter {
    surface: Arc<dyn Surface>,
    loaders: HashMap<PageId, Arc<dyn PageLoader>>,
    state: Mutex<RouterState>,
}

impl PageRouter {
    pub fn new(surface: Arc<dyn Surface>) -> Self {
        Self { surface, loaders: HashMap::new(), state: Mutex::default() }
    }

    pub fn register(&mut self, loader: Arc<dyn PageLoader>) {
        self.loaders.insert(loader.page(), loader);
    }

    pub fn current_page(&self) -> Option<PageId> {
        lock(&self.state).current
    }

    /// True while a polling task is registered and not cancelled.
    pub fn has_active_poll(&self) -> bool {
        lock(&self.state).poll.as_ref().is_some_and(|p| !p.is_cancelled())
    }

    /// Cancels the current page's polling, then loads `page` and starts its own.
    pub async fn select_page(&self, page: PageId) -> ClientResult<()> {
        let loader = self
            .loaders
            .get(&page)
            .cloned()
            .ok_or_else(|| ClientError::validation("page", format!("No loader registered for {}", page)))?;

        let previous = {
            let mut state = lock(&self.state);
            if let Some(poll) = state.poll.take() {
                tracing::debug!(task = %poll.name(), finished = poll.is_finished(), "cancelling page poll");
                poll.cancel();
            }
            state.current.replace(page)
        };
        if let Some(prev) = previous.and_then(|p| self.loaders.get(&p)) {
            prev.unmount();
        }
        self.surface.set_active_page(page);
        tracing::info!(page = %page, "page selected");

        let initial = loader.load(0).await;
        if let Err(err) = &initial {
            tracing::warn!(page = %page, error = %err, "initial page load failed");
        }

        if let Some(period) = loader.refresh_interval() {
            let mut state = lock(&self.state);
            // Another selection may have happened while we were loading.
            if state.current == Some(page) {
                let job_loader = loader.clone();
                let task = PollTask::spawn_after(format!("page:{}", page), period, move |tick| {
                    let loader = job_loader.clone();
                    async move {
                        if let Err(err) = loader.load(tick + 1).await {
                            tracing::warn!(page = %loader.page(), error = %err, "page refresh failed");
                        }
                    }
                });
                state.poll = Some(task);
            }
        }
        initial
    }

    /// Leaves the current page without selecting another (page unload).
    pub fn deactivate(&self) {
        let previous = {
            let mut state = lock(&self.state);
            if let Some(poll) = state.poll.take() {
                poll.cancel();
            }
            state.current.take()
        };
        if let Some(prev) = previous.and_then(|p| self.loaders.get(&p)) {
            prev.unmount();
        }
    }

    /// Reloads the current page out of band (after a mutation).
    pub async fn refresh(&self) -> ClientResult<()> {
        let Some(page) = self.current_page() else {
            return Ok(());
        };
        match self.loaders.get(&page) {
            Some(loader) => loader.load(0).await,
            None => Ok(()),
        }
    }
}
