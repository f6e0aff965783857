use std::time::Duration;

use async_trait::async_trait;

use super::PageContext;
use crate::error::ClientResult;
use crate::router::{PageId, PageLoader};
use crate::view::{Cell, Table, Target, Tone, View};

pub struct PluginsPage {
    ctx: PageContext,
    period: Duration,
}

impl PluginsPage {
    pub fn new(ctx: PageContext, period: Duration) -> Self {
        Self { ctx, period }
    }
}

#[async_trait]
impl PageLoader for PluginsPage {
    fn page(&self) -> PageId {
        PageId::Plugins
    }

    fn refresh_interval(&self) -> Option<Duration> {
        Some(self.period)
    }

    async fn load(&self, _tick: u64) -> ClientResult<()> {
        let plugins = self.ctx.api.plugins().await?;
        let mut table = Table::new(&["Name", "Version", "Author", "Status"], "No plugins found");
        for plugin in plugins.plugins {
            let status = if plugin.enabled {
                Cell::badge("Enabled", Tone::Good)
            } else {
                Cell::badge("Disabled", Tone::Danger)
            };
            let key = plugin.name.clone();
            table.push(
                key,
                vec![Cell::plain(plugin.name), Cell::plain(plugin.version), Cell::plain(plugin.author), status],
                Vec::new(),
            );
        }
        self.ctx.surface.render(Target::Plugins, View::Table(table));
        Ok(())
    }
}
