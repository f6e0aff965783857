use std::time::Duration;

use async_trait::async_trait;

use super::{ActionOutcome, PageContext};
use crate::error::ClientResult;
use crate::router::{PageId, PageLoader};
use crate::view::{Line, Target, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    Console,
    Chat,
}

/// A scrolling line feed with an input box: the server console or the chat.
pub struct FeedPage {
    ctx: PageContext,
    kind: FeedKind,
    period: Duration,
    settle: Duration,
}

impl FeedPage {
    pub fn new(ctx: PageContext, kind: FeedKind, period: Duration, settle: Duration) -> Self {
        Self { ctx, kind, period, settle }
    }

    fn target(&self) -> Target {
        match self.kind {
            FeedKind::Console => Target::Console,
            FeedKind::Chat => Target::Chat,
        }
    }

    /// Sends a console command or a chat message, then refreshes the feed once
    /// the server had a moment to act on it.
    pub async fn send(&self, text: &str) -> ActionOutcome {
        let text = text.trim();
        if text.is_empty() {
            return ActionOutcome::Rejected;
        }
        let (sent, what) = match self.kind {
            FeedKind::Console => (self.ctx.api.send_command(text).await, "execute command"),
            FeedKind::Chat => (self.ctx.api.send_chat(text).await, "send message"),
        };
        if let Err(err) = sent {
            return self.ctx.report_failure(what, &err).await;
        }
        tracing::info!(feed = ?self.kind, "{} sent", if self.kind == FeedKind::Console { "command" } else { "message" });

        tokio::time::sleep(self.settle).await;
        if let Err(err) = self.load(0).await {
            tracing::warn!(feed = ?self.kind, error = %err, "feed refresh failed");
        }
        ActionOutcome::Completed
    }
}

#[async_trait]
impl PageLoader for FeedPage {
    fn page(&self) -> PageId {
        match self.kind {
            FeedKind::Console => PageId::Console,
            FeedKind::Chat => PageId::Chat,
        }
    }

    fn refresh_interval(&self) -> Option<Duration> {
        Some(self.period)
    }

    async fn load(&self, _tick: u64) -> ClientResult<()> {
        let feed = match self.kind {
            FeedKind::Console => self.ctx.api.console().await?,
            FeedKind::Chat => self.ctx.api.chat().await?,
        };
        // An empty answer keeps what is already shown.
        if !feed.logs.is_empty() {
            let lines = feed.logs.into_iter().map(|text| Line { text, highlight: false }).collect();
            self.ctx.surface.render(self.target(), View::Lines(lines));
        }
        Ok(())
    }
}
