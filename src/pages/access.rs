use std::time::Duration;

use async_trait::async_trait;

use super::{ActionOutcome, PageContext};
use crate::command::Command;
use crate::error::{validation, ClientError, ClientResult};
use crate::router::{PageId, PageLoader};
use crate::types::{AccessEntry, AccessListKind};
use crate::view::{Action, Cell, Table, Target, View};

/// One of whitelist, blacklist or operators: a table keyed by UUID plus an
/// add form.
pub struct AccessListPage {
    ctx: PageContext,
    kind: AccessListKind,
    period: Duration,
}

impl AccessListPage {
    pub fn new(ctx: PageContext, kind: AccessListKind, period: Duration) -> Self {
        Self { ctx, kind, period }
    }

    pub fn kind(&self) -> AccessListKind {
        self.kind
    }

    fn target(&self) -> Target {
        match self.kind {
            AccessListKind::Whitelist => Target::Whitelist,
            AccessListKind::Blacklist => Target::Blacklist,
            AccessListKind::Ops => Target::Ops,
        }
    }

    fn empty_text(&self) -> &'static str {
        match self.kind {
            AccessListKind::Whitelist => "Whitelist is empty",
            AccessListKind::Blacklist => "Blacklist is empty",
            AccessListKind::Ops => "No operators",
        }
    }

    fn render(&self, entries: &[AccessEntry]) {
        let mut table = Table::new(&["Player", "UUID", "Actions"], self.empty_text());
        for entry in entries {
            let remove = Command::AccessRemove { kind: self.kind, uuid: entry.uuid.clone(), name: entry.name.clone() };
            table.push(
                entry.uuid.clone(),
                vec![
                    Cell::plain(entry.name.clone()).with_image(self.ctx.api.player_head_url(&entry.uuid)),
                    Cell::mono(entry.uuid.clone()),
                ],
                vec![Action::danger("Remove", remove)],
            );
        }
        self.ctx.surface.render(self.target(), View::Table(table));
    }

    fn add_failure(&self) -> String {
        match self.kind {
            AccessListKind::Ops => "add operator".to_string(),
            kind => format!("add player to {}", kind.label()),
        }
    }

    /// Adds a player. Without a UUID the name is resolved through the backend.
    pub async fn add(&self, name: &str, uuid: Option<&str>) -> ActionOutcome {
        let name = name.trim();
        if let Err(err) = validation::require_non_empty(name, "name") {
            return self.ctx.report_failure(&self.add_failure(), &err).await;
        }

        let uuid = match uuid.map(str::trim).filter(|u| !u.is_empty()) {
            Some(raw) => match validation::normalize_uuid(raw) {
                Ok(uuid) => uuid,
                Err(err) => return self.ctx.report_failure(&self.add_failure(), &err).await,
            },
            None => match self.ctx.api.uuid_lookup(name).await {
                Ok(Some(uuid)) => uuid,
                Ok(None) | Err(ClientError::Http { .. }) | Err(ClientError::Backend(_)) => {
                    self.ctx.dialogs.alert(&format!("Could not find UUID for player: {}", name)).await;
                    return ActionOutcome::Rejected;
                }
                Err(err) => return self.ctx.report_failure("look up player UUID", &err).await,
            },
        };

        if let Err(err) = self.ctx.api.access_add(self.kind, name, &uuid).await {
            return self.ctx.report_failure(&self.add_failure(), &err).await;
        }
        tracing::info!(list = self.kind.key(), player = %name, %uuid, "access list entry added");
        if let Err(err) = self.load(0).await {
            tracing::warn!(list = self.kind.key(), error = %err, "access list refresh failed");
        }
        ActionOutcome::Completed
    }

    pub async fn remove(&self, uuid: &str, name: &str) -> ActionOutcome {
        if !self.ctx.dialogs.confirm(&format!("Remove {} from {}?", name, self.kind.label())).await {
            return ActionOutcome::Cancelled;
        }
        if let Err(err) = self.ctx.api.access_remove(self.kind, uuid).await {
            let what = match self.kind {
                AccessListKind::Ops => "remove operator".to_string(),
                kind => format!("remove player from {}", kind.label()),
            };
            return self.ctx.report_failure(&what, &err).await;
        }
        tracing::info!(list = self.kind.key(), player = %name, "access list entry removed");
        if let Err(err) = self.load(0).await {
            tracing::warn!(list = self.kind.key(), error = %err, "access list refresh failed");
        }
        ActionOutcome::Completed
    }
}

#[async_trait]
impl PageLoader for AccessListPage {
    fn page(&self) -> PageId {
        match self.kind {
            AccessListKind::Whitelist => PageId::Whitelist,
            AccessListKind::Blacklist => PageId::Blacklist,
            AccessListKind::Ops => PageId::Ops,
        }
    }

    fn refresh_interval(&self) -> Option<Duration> {
        Some(self.period)
    }

    async fn load(&self, _tick: u64) -> ClientResult<()> {
        let entries = self.ctx.api.access_list(self.kind).await?;
        self.render(&entries);
        Ok(())
    }
}
