use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::PageContext;
use crate::error::ClientResult;
use crate::lifecycle::lock;
use crate::router::{PageId, PageLoader};
use crate::view::{Line, Target, View};

#[derive(Default)]
struct LogsState {
    all: Vec<String>,
    search: String,
}

/// Lines containing `term` (case-insensitive), highlighted. An empty term keeps
/// every line and highlights none.
pub fn filter_logs(lines: &[String], term: &str) -> Vec<Line> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return lines.iter().map(|text| Line { text: text.clone(), highlight: false }).collect();
    }
    lines
        .iter()
        .filter(|line| line.to_lowercase().contains(&term))
        .map(|text| Line { text: text.clone(), highlight: true })
        .collect()
}

pub struct LogsPage {
    ctx: PageContext,
    period: Duration,
    state: Mutex<LogsState>,
}

impl LogsPage {
    pub fn new(ctx: PageContext, period: Duration) -> Self {
        Self { ctx, period, state: Mutex::default() }
    }

    fn render(&self) {
        let lines = {
            let state = lock(&self.state);
            filter_logs(&state.all, &state.search)
        };
        let view = if lines.is_empty() { View::Message("No logs available".into()) } else { View::Lines(lines) };
        self.ctx.surface.render(Target::Logs, view);
    }

    pub fn search(&self, term: &str) {
        lock(&self.state).search = term.to_string();
        self.render();
    }
}

#[async_trait]
impl PageLoader for LogsPage {
    fn page(&self) -> PageId {
        PageId::Logs
    }

    fn refresh_interval(&self) -> Option<Duration> {
        Some(self.period)
    }

    async fn load(&self, _tick: u64) -> ClientResult<()> {
        let fetched = self.ctx.api.logs().await;
        let result = match fetched {
            Ok(logs) => {
                lock(&self.state).all = logs.logs;
                Ok(())
            }
            Err(err) => {
                lock(&self.state).all.clear();
                Err(err)
            }
        };
        self.render();
        result
    }
}
