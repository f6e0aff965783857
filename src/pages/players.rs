use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{format, ActionOutcome, PageContext};
use crate::command::Command;
use crate::error::ClientResult;
use crate::lifecycle::lock;
use crate::router::{PageId, PageLoader};
use crate::types::{Player, PlayerAction};
use crate::view::{Action, Card, Cell, Table, Target, Tone, View};

#[derive(Default)]
struct PlayersState {
    all: Vec<Player>,
    search: String,
}

/// Player table with moderation actions and client-side search.
pub struct PlayersPage {
    ctx: PageContext,
    period: Duration,
    state: Mutex<PlayersState>,
}

/// Case-insensitive match on name or UUID; an empty term matches everything.
pub fn filter_players<'a>(players: &'a [Player], term: &str) -> Vec<&'a Player> {
    let term = term.trim().to_lowercase();
    players
        .iter()
        .filter(|p| term.is_empty() || p.name.to_lowercase().contains(&term) || p.uuid.to_lowercase().contains(&term))
        .collect()
}

impl PlayersPage {
    pub fn new(ctx: PageContext, period: Duration) -> Self {
        Self { ctx, period, state: Mutex::default() }
    }

    fn render(&self) {
        let table = {
            let state = lock(&self.state);
            let mut table = Table::new(&["Player", "Status", "Play time", "Actions"], "No players found");
            for player in filter_players(&state.all, &state.search) {
                table.push(player.uuid.clone(), self.cells(player), Self::actions(player));
            }
            table
        };
        self.ctx.surface.render(Target::Players, View::Table(table));
    }

    fn cells(&self, player: &Player) -> Vec<Cell> {
        let status = if player.online {
            Cell::badge("Online", Tone::Good)
        } else {
            Cell::badge("Offline", Tone::Neutral)
        };
        vec![
            Cell::plain(player.name.clone()).with_image(self.ctx.api.player_head_url(&player.uuid)),
            status,
            Cell::plain(format::play_time(player.play_time)),
        ]
    }

    fn actions(player: &Player) -> Vec<Action> {
        let act = |action| Command::PlayerAction { uuid: player.uuid.clone(), name: player.name.clone(), action };
        let mut actions =
            vec![Action::new("Inventory", Command::ShowInventory { uuid: player.uuid.clone(), name: player.name.clone() })];
        if player.online {
            actions.push(Action::warning("Kick", act(PlayerAction::Kick)));
        }
        if player.banned {
            actions.push(Action::danger("Unban", act(PlayerAction::Unban)));
        } else {
            actions.push(Action::danger("Ban", act(PlayerAction::Ban)));
        }
        if player.op {
            actions.push(Action::new("DeOP", act(PlayerAction::Deop)));
        } else {
            actions.push(Action::new("OP", act(PlayerAction::Op)));
        }
        actions
    }

    /// Re-filters the last fetched list without a request.
    pub fn search(&self, term: &str) {
        lock(&self.state).search = term.to_string();
        self.render();
    }

    pub async fn player_action(&self, uuid: &str, name: &str, action: PlayerAction) -> ActionOutcome {
        if action == PlayerAction::Kick
            && !self.ctx.dialogs.confirm(&format!("Are you sure you want to kick {} from the server?", name)).await
        {
            return ActionOutcome::Cancelled;
        }
        if let Err(err) = self.ctx.api.player_action(uuid, action).await {
            let what = match action {
                PlayerAction::Kick => "kick player",
                PlayerAction::Ban => "ban player",
                PlayerAction::Unban => "unban player",
                PlayerAction::Op => "op player",
                PlayerAction::Deop => "de-op player",
            };
            return self.ctx.report_failure(what, &err).await;
        }
        tracing::info!(player = %name, action = action.as_str(), "player action applied");
        if action == PlayerAction::Kick {
            self.ctx.dialogs.alert(&format!("{} has been kicked from the server", name)).await;
        }
        if let Err(err) = self.load(0).await {
            tracing::warn!(error = %err, "player list refresh failed");
        }
        ActionOutcome::Completed
    }

    pub async fn show_inventory(&self, uuid: &str, name: &str) -> ActionOutcome {
        let detail = match self.ctx.api.player_detail(uuid).await {
            Ok(detail) => detail,
            Err(err) => return self.ctx.report_failure("load player inventory", &err).await,
        };
        let mut card = Card::new(format!("{}'s Inventory", name));
        if detail.inventory.is_empty() {
            card = card.field("Items", "Inventory is empty or unavailable");
        }
        for item in &detail.inventory {
            card = card.field(&item.name, format!("{} ×{}", item.id, item.count));
        }
        self.ctx.surface.render(Target::PlayerInventory, View::Cards(vec![card]));
        ActionOutcome::Completed
    }
}

#[async_trait]
impl PageLoader for PlayersPage {
    fn page(&self) -> PageId {
        PageId::Players
    }

    fn refresh_interval(&self) -> Option<Duration> {
        Some(self.period)
    }

    async fn load(&self, _tick: u64) -> ClientResult<()> {
        let players = self.ctx.api.players().await?;
        lock(&self.state).all = players.players;
        self.render();
        Ok(())
    }

    fn unmount(&self) {
        self.ctx.surface.render(Target::PlayerInventory, View::Empty);
    }
}
