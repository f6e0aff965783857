use std::sync::{Arc, Mutex};

use crate::api::{ApiClient, Transport};
use crate::command::Command;
use crate::config::AppConfig;
use crate::connectivity::{Connectivity, ConnectivityMonitor};
use crate::filemanager::FileManager;
use crate::lifecycle::{lock, PollTask, SetupOnce};
use crate::modal::Dialogs;
use crate::pages::console::FeedKind;
use crate::pages::*;
use crate::router::{PageId, PageRouter};
use crate::surface::Surface;
use crate::types::AccessListKind;

/// The whole dashboard.
///
/// This struct wires the API client, connectivity monitor, router, every page
/// and the file manager together, and routes user intents to them. It is
/// shared behind an `Arc` by the shell, which dispatches each command on its
/// own task so that dialogs can be answered while an action waits on them.
pub struct Dashboard {
    /// The configuration the dashboard was built from.
    config: Arc<AppConfig>,
    api: ApiClient,
    monitor: ConnectivityMonitor,
    /// The running connectivity probe, once started.
    monitor_task: Mutex<Option<PollTask>>,
    monitor_setup: SetupOnce,
    router: PageRouter,
    players: Arc<PlayersPage>,
    whitelist: Arc<AccessListPage>,
    blacklist: Arc<AccessListPage>,
    ops: Arc<AccessListPage>,
    console: Arc<FeedPage>,
    chat: Arc<FeedPage>,
    settings: Arc<SettingsPage>,
    recipes: Arc<RecipesPage>,
    logs: Arc<LogsPage>,
    files: Arc<FileManager>,
}

impl Dashboard {
    /// Creates the dashboard and registers a loader for every page.
    ///
    /// Nothing is fetched until a page is selected, and the connectivity
    /// probe only runs after [`start_monitor`](Self::start_monitor).
    pub fn new(
        config: AppConfig,
        transport: Arc<dyn Transport>,
        surface: Arc<dyn Surface>,
        dialogs: Arc<dyn Dialogs>,
    ) -> Self {
        let connectivity = Connectivity::new(surface.clone());
        let api = ApiClient::new(
            transport.clone(),
            connectivity.clone(),
            &config.backend.base_url,
            &config.backend.api_prefix,
            config.backend.request_timeout(),
        );
        let monitor = ConnectivityMonitor::new(
            transport,
            connectivity,
            std::time::Duration::from_millis(config.polling.connectivity_ms),
            config.backend.request_timeout(),
        );
        let ctx = PageContext::new(api.clone(), surface.clone(), dialogs);
        let p = &config.polling;
        let ms = std::time::Duration::from_millis;

        let status = Arc::new(StatusPage::new(ctx.clone(), ms(p.status_ms), p.status_identity_every));
        let players = Arc::new(PlayersPage::new(ctx.clone(), ms(p.players_ms)));
        let whitelist = Arc::new(AccessListPage::new(ctx.clone(), AccessListKind::Whitelist, ms(p.access_lists_ms)));
        let blacklist = Arc::new(AccessListPage::new(ctx.clone(), AccessListKind::Blacklist, ms(p.access_lists_ms)));
        let ops = Arc::new(AccessListPage::new(ctx.clone(), AccessListKind::Ops, ms(p.access_lists_ms)));
        let plugins = Arc::new(PluginsPage::new(ctx.clone(), ms(p.plugins_ms)));
        let server = Arc::new(ServerPage::new(ctx.clone(), ms(p.server_ms)));
        let settle = ms(p.command_settle_ms);
        let console = Arc::new(FeedPage::new(ctx.clone(), FeedKind::Console, ms(p.console_ms), settle));
        let chat = Arc::new(FeedPage::new(ctx.clone(), FeedKind::Chat, ms(p.chat_ms), settle));
        let settings = Arc::new(SettingsPage::new(ctx.clone()));
        let recipes = Arc::new(RecipesPage::new(ctx.clone()));
        let logs = Arc::new(LogsPage::new(ctx.clone(), ms(p.logs_ms)));
        let files = Arc::new(FileManager::new(ctx, config.ui.changelog_capacity));

        let mut router = PageRouter::new(surface);
        router.register(status);
        router.register(players.clone());
        router.register(whitelist.clone());
        router.register(blacklist.clone());
        router.register(ops.clone());
        router.register(plugins);
        router.register(server);
        router.register(console.clone());
        router.register(chat.clone());
        router.register(settings.clone());
        router.register(recipes.clone());
        router.register(logs.clone());
        router.register(files.clone());

        Self {
            config: Arc::new(config),
            api,
            monitor,
            monitor_task: Mutex::new(None),
            monitor_setup: SetupOnce::new(),
            router,
            players,
            whitelist,
            blacklist,
            ops,
            console,
            chat,
            settings,
            recipes,
            logs,
            files,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn router(&self) -> &PageRouter {
        &self.router
    }

    pub fn files(&self) -> &FileManager {
        &self.files
    }

    pub fn players(&self) -> &PlayersPage {
        &self.players
    }

    pub fn recipes(&self) -> &RecipesPage {
        &self.recipes
    }

    pub fn is_offline(&self) -> bool {
        self.api.connectivity().is_offline()
    }

    pub fn current_page(&self) -> Option<PageId> {
        self.router.current_page()
    }

    /// Starts the connectivity probe. Returns false if it was already running.
    pub fn start_monitor(&self) -> bool {
        self.monitor_setup.run(|| {
            *lock(&self.monitor_task) = Some(self.monitor.spawn());
        })
    }

    pub async fn select_page(&self, page: PageId) -> ActionOutcome {
        match self.router.select_page(page).await {
            Ok(()) => ActionOutcome::Completed,
            Err(_) => ActionOutcome::Failed,
        }
    }

    fn access_page(&self, kind: AccessListKind) -> &AccessListPage {
        match kind {
            AccessListKind::Whitelist => self.whitelist.as_ref(),
            AccessListKind::Blacklist => self.blacklist.as_ref(),
            AccessListKind::Ops => self.ops.as_ref(),
        }
    }

    /// Routes one user intent to the page or component that handles it.
    pub async fn dispatch(&self, command: Command) -> ActionOutcome {
        // Any click other than on the menu itself closes the context menu.
        if !matches!(command, Command::ContextMenu { .. } | Command::MenuAction(_)) {
            self.files.dismiss_menu();
        }
        tracing::debug!(?command, "dispatch");

        match command {
            Command::SelectPage(page) => self.select_page(page).await,

            Command::SearchPlayers(term) => {
                self.players.search(&term);
                ActionOutcome::Completed
            }
            Command::PlayerAction { uuid, name, action } => self.players.player_action(&uuid, &name, action).await,
            Command::ShowInventory { uuid, name } => self.players.show_inventory(&uuid, &name).await,

            Command::AccessAdd { kind, name, uuid } => self.access_page(kind).add(&name, uuid.as_deref()).await,
            Command::AccessRemove { kind, uuid, name } => self.access_page(kind).remove(&uuid, &name).await,

            Command::SendCommand(text) => self.console.send(&text).await,
            Command::SendChat(text) => self.chat.send(&text).await,

            Command::SaveProperties(values) => self.settings.save_properties(&values).await,
            Command::SaveGameRules(values) => self.settings.save_gamerules(&values).await,

            Command::EditRecipe(id) => self.recipes.edit(&id).await,
            Command::DeleteRecipe(id) => self.recipes.delete(&id).await,
            Command::SaveRecipe(draft) => self.recipes.save(&draft).await,
            Command::ClearRecipeForm => {
                self.recipes.clear_form();
                ActionOutcome::Completed
            }

            Command::SearchLogs(term) => {
                self.logs.search(&term);
                ActionOutcome::Completed
            }

            Command::Browse(path) => self.files.browse(&path).await,
            Command::RefreshFiles => self.files.refresh().await,
            Command::SearchFiles(term) => {
                self.files.search(&term);
                ActionOutcome::Completed
            }
            Command::SortFiles(column) => {
                self.files.sort_by(column);
                ActionOutcome::Completed
            }
            Command::OpenEntry(path) => self.files.open(&path).await,
            Command::Download(path) => self.files.download(&path),
            Command::EditFile(path) => self.files.edit(&path).await,
            Command::SaveFile(content) => self.files.save_edit(&content).await,
            Command::CloseEditor => {
                self.files.close_editor();
                ActionOutcome::Completed
            }
            Command::Rename(path) => self.files.rename(&path).await,
            Command::Delete { path, is_directory } => self.files.delete(&path, is_directory).await,
            Command::CreateFolder => self.files.create_folder().await,
            Command::Upload(files) if files.is_empty() => ActionOutcome::Cancelled,
            Command::Upload(files) => {
                if self.files.upload(files).await.all_succeeded() {
                    ActionOutcome::Completed
                } else {
                    ActionOutcome::Failed
                }
            }
            Command::ShowChangeLog => self.files.show_changelog().await,
            Command::ContextMenu { path, x, y } => self.files.context_menu(&path, x, y),
            Command::MenuAction(item) => self.files.menu_action(item).await,
            Command::DismissMenu => ActionOutcome::Completed,
        }
    }

    /// Stops page polling and the connectivity probe.
    pub fn shutdown(&self) {
        tracing::debug!(page_polling = self.router.has_active_poll(), "stopping dashboard");
        self.router.deactivate();
        if let Some(task) = lock(&self.monitor_task).take() {
            task.cancel();
        }
        tracing::info!("dashboard stopped");
    }
}
