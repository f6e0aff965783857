use std::time::Duration;

use async_trait::async_trait;

use super::{format, PageContext};
use crate::error::ClientResult;
use crate::router::{PageId, PageLoader};
use crate::types::{GeyserInfo, ServerInfo};
use crate::view::{Card, Target, View};

pub struct ServerPage {
    ctx: PageContext,
    period: Duration,
}

pub(crate) fn server_cards(server: &ServerInfo, geyser: &GeyserInfo) -> Vec<Card> {
    let mut cards = vec![
        Card::new("Server Information")
            .field("Name", &server.name)
            .field("Version", &server.version)
            .field("Bukkit Version", &server.bukkit_version)
            .field("Minecraft Version", &server.minecraft_version)
            .field("Online Mode", format::yes_no(server.online_mode))
            .field("Players", format!("{}/{}", server.current_players, server.max_players))
            .field("IP", server.ip.as_deref().filter(|ip| !ip.is_empty()).unwrap_or("Not set"))
            .field("Port", server.port)
            .field("MOTD", &server.motd),
        Card::new("Settings")
            .field("Whitelist", format::enabled(server.whitelist_enabled))
            .field("Allow Flight", format::yes_no(server.allow_flight))
            .field("Allow Nether", format::yes_no(server.allow_nether))
            .field("Allow End", format::yes_no(server.allow_end)),
    ];

    if geyser.detected {
        let mut card = Card::new("GeyserMC (Bedrock Support)")
            .field("Version", geyser.version.as_deref().unwrap_or("Unknown"))
            .field(
                "Bedrock Port",
                geyser.bedrock_port.map(|p| p.to_string()).unwrap_or_else(|| "Not configured".into()),
            );
        if let Some(address) = geyser.bedrock_address.as_deref().filter(|a| !a.is_empty() && *a != "0.0.0.0") {
            card = card.field("Bedrock Address", address);
        }
        if let Some(motd) = geyser.motd1.as_deref().filter(|m| !m.is_empty()) {
            card = card.field("MOTD Line 1", motd);
        }
        if let Some(motd) = geyser.motd2.as_deref().filter(|m| !m.is_empty()) {
            card = card.field("MOTD Line 2", motd);
        }
        cards.push(card);
    }
    cards
}

impl ServerPage {
    pub fn new(ctx: PageContext, period: Duration) -> Self {
        Self { ctx, period }
    }
}

#[async_trait]
impl PageLoader for ServerPage {
    fn page(&self) -> PageId {
        PageId::Server
    }

    fn refresh_interval(&self) -> Option<Duration> {
        Some(self.period)
    }

    async fn load(&self, _tick: u64) -> ClientResult<()> {
        let api = &self.ctx.api;
        let (server, geyser) = tokio::try_join!(api.server_info(), api.geyser())?;

        let worlds = server
            .worlds
            .iter()
            .map(|world| {
                Card::new(format!("World: {}", world.name))
                    .field("Environment", &world.environment)
                    .field("Difficulty", &world.difficulty)
                    .field("PvP", format::enabled(world.pvp))
                    .field("Seed", world.seed)
            })
            .collect();

        self.ctx.surface.render(Target::ServerInfo, View::Cards(server_cards(&server, &geyser)));
        self.ctx.surface.render(Target::Worlds, View::Cards(worlds));
        Ok(())
    }
}
