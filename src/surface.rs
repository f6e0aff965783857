use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;

use crate::lifecycle::lock;
use crate::router::PageId;
use crate::view::{Table, Target, View};

/// Visible area used to keep popups on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1280, height: 720 }
    }
}

/// Where the dashboard draws.
///
/// Implementations replace the whole target on every `render` call.
pub trait Surface: Send + Sync {
    fn render(&self, target: Target, view: View);

    /// Shows or hides the full-screen "backend offline" overlay.
    fn set_offline_overlay(&self, visible: bool);

    /// Navigates the browser to `url` (downloads).
    fn navigate(&self, url: &str);

    fn set_active_page(&self, _page: PageId) {}

    fn viewport(&self) -> Viewport {
        Viewport::default()
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    views: HashMap<Target, View>,
    render_counts: HashMap<Target, usize>,
    overlay_visible: bool,
    overlay_writes: usize,
    navigations: Vec<String>,
    active_page: Option<PageId>,
}

/// A surface that keeps the latest view of every target in memory.
#[derive(Debug, Default)]
pub struct MemorySurface {
    state: Mutex<MemoryState>,
    viewport: Viewport,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewport(viewport: Viewport) -> Self {
        Self { state: Mutex::default(), viewport }
    }

    pub fn view(&self, target: Target) -> Option<View> {
        lock(&self.state).views.get(&target).cloned()
    }

    pub fn table(&self, target: Target) -> Option<Table> {
        self.view(target).and_then(|v| v.as_table().cloned())
    }

    pub fn render_count(&self, target: Target) -> usize {
        lock(&self.state).render_counts.get(&target).copied().unwrap_or(0)
    }

    pub fn overlay_visible(&self) -> bool {
        lock(&self.state).overlay_visible
    }

    /// Number of times the overlay was actually shown or hidden.
    pub fn overlay_writes(&self) -> usize {
        lock(&self.state).overlay_writes
    }

    pub fn navigations(&self) -> Vec<String> {
        lock(&self.state).navigations.clone()
    }

    pub fn active_page(&self) -> Option<PageId> {
        lock(&self.state).active_page
    }
}

impl Surface for MemorySurface {
    fn render(&self, target: Target, view: View) {
        let mut state = lock(&self.state);
        *state.render_counts.entry(target).or_insert(0) += 1;
        state.views.insert(target, view);
    }

    fn set_offline_overlay(&self, visible: bool) {
        let mut state = lock(&self.state);
        state.overlay_visible = visible;
        state.overlay_writes += 1;
    }

    fn navigate(&self, url: &str) {
        lock(&self.state).navigations.push(url.to_string());
    }

    fn set_active_page(&self, page: PageId) {
        lock(&self.state).active_page = Some(page);
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

/// Prints targets to stdout, but only when their content changed.
pub struct TextSurface {
    last: Mutex<HashMap<Target, View>>,
    viewport: Viewport,
}

impl TextSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self { last: Mutex::new(HashMap::new()), viewport }
    }

    fn print(&self, text: &str) {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }
}

impl Surface for TextSurface {
    fn render(&self, target: Target, view: View) {
        {
            let mut last = lock(&self.last);
            if last.get(&target) == Some(&view) {
                return;
            }
            last.insert(target, view.clone());
        }
        if view == View::Empty {
            return;
        }
        self.print(&format!("\n[{:?}]\n{}", target, view));
    }

    fn set_offline_overlay(&self, visible: bool) {
        if visible {
            self.print("\n!! Backend offline, waiting for it to come back...\n");
        } else {
            self.print("\n-- Backend reachable again.\n");
        }
    }

    fn navigate(&self, url: &str) {
        self.print(&format!("\nOpen in a browser: {}\n", url));
    }

    fn set_active_page(&self, page: PageId) {
        lock(&self.last).clear();
        self.print(&format!("\n===== {} =====\n", page.title()));
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}
