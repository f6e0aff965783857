use std::time::Duration;

use async_trait::async_trait;

use super::{format, PageContext};
use crate::error::ClientResult;
use crate::router::{PageId, PageLoader};
use crate::types::{GeyserInfo, ServerInfo};
use crate::view::{Card, Target, View};

/// Live metrics every tick; server identity in the sidebar every
/// `identity_every` ticks.
pub struct StatusPage {
    ctx: PageContext,
    period: Duration,
    identity_every: u64,
}

impl StatusPage {
    pub fn new(ctx: PageContext, period: Duration, identity_every: u64) -> Self {
        Self { ctx, period, identity_every: identity_every.max(1) }
    }

    fn render_identity(&self, server: &ServerInfo, geyser: &GeyserInfo) {
        let mut card = Card::new("Server")
            .field("Address", server.ip.as_deref().filter(|ip| !ip.is_empty()).unwrap_or("localhost"))
            .field("Java Port", server.port)
            .field("MOTD", if server.motd.is_empty() { "A Minecraft Server" } else { server.motd.as_str() });
        if geyser.detected {
            card = card.field(
                "GeyserMC",
                geyser.bedrock_port.map(|p| format!("Bedrock Port: {}", p)).unwrap_or_else(|| "Detected".to_string()),
            );
        }
        card.image = Some(self.ctx.api.server_icon_url());
        self.ctx.surface.render(Target::Sidebar, View::Cards(vec![card]));
    }
}

#[async_trait]
impl PageLoader for StatusPage {
    fn page(&self) -> PageId {
        PageId::Status
    }

    fn refresh_interval(&self) -> Option<Duration> {
        Some(self.period)
    }

    async fn load(&self, tick: u64) -> ClientResult<()> {
        let api = &self.ctx.api;
        let (metrics, server, players) = tokio::try_join!(api.metrics(), api.server_info(), api.players())?;

        match metrics.metrics.last() {
            Some(latest) => {
                let online = players.players.iter().filter(|p| p.online).count();
                let card = Card::new("Status")
                    .field("Players", online)
                    .field("TPS", format!("{:.1}", latest.tps))
                    .field("Memory", format!("{:.1}%", latest.memory))
                    .field("CPU", format!("{:.1}%", latest.cpu))
                    .field("Uptime", server.uptime.filter(|u| *u > 0).map(format::uptime).unwrap_or_else(|| "-".into()))
                    .field("Max Players", server.max_players)
                    .field("History", format!("{} samples", metrics.metrics.len()));
                self.ctx.surface.render(Target::Status, View::Cards(vec![card]));
            }
            None => self.ctx.surface.render(Target::Status, View::Message("No metrics recorded yet".into())),
        }

        if tick % self.identity_every == 0 {
            match api.geyser().await {
                Ok(geyser) => self.render_identity(&server, &geyser),
                Err(err) => tracing::warn!(error = %err, "could not refresh server identity"),
            }
        }
        Ok(())
    }
}
