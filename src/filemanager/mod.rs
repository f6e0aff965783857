//! File manager: browse, edit and manage the backend's server directory.
//!
//! All state lives in a [`Session`] owned by one [`FileManager`]. The backend
//! is the authority on which paths are allowed; nothing here restricts them.
//! Every successful mutation is mirrored into the local [`ChangeLog`] and
//! followed by a refresh of the directory that is current at that moment.

mod changelog;
mod listing;
mod menu;

pub use changelog::ChangeLog;
pub use listing::{
    breadcrumb, file_name, is_image, join_path, visible_entries, Session, SortColumn, SortDirection, SortState,
};
pub use menu::{clamp_position, menu_items, MenuItem, MENU_HEIGHT, MENU_WIDTH};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;

use crate::command::Command;
use crate::error::{ClientError, ClientResult};
use crate::lifecycle::{lock, SetupOnce};
use crate::pages::{format, ActionOutcome, PageContext};
use crate::router::{PageId, PageLoader};
use crate::types::{FileEntry, UploadFile};
use crate::view::{Action, Cell, CellStyle, EditorView, Line, MenuView, Table, Target, View};

/// Per-file result of [`FileManager::upload`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadReport {
    /// Names of the files the backend accepted, in selection order.
    pub succeeded: Vec<String>,
    /// Names of the files that failed, with the reason.
    pub failed: Vec<(String, ClientError)>,
}

impl UploadReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone)]
struct OpenEditor {
    path: String,
}

pub struct FileManager {
    ctx: PageContext,
    session: Mutex<Session>,
    changelog: Mutex<ChangeLog>,
    editor: Mutex<Option<OpenEditor>>,
    menu_target: Mutex<Option<FileEntry>>,
    toolbar: SetupOnce,
    generation: AtomicU64,
}

impl FileManager {
    pub fn new(ctx: PageContext, changelog_capacity: usize) -> Self {
        Self {
            ctx,
            session: Mutex::default(),
            changelog: Mutex::new(ChangeLog::new(changelog_capacity)),
            editor: Mutex::new(None),
            menu_target: Mutex::new(None),
            toolbar: SetupOnce::new(),
            generation: AtomicU64::new(0),
        }
    }

    pub fn session(&self) -> Session {
        lock(&self.session).clone()
    }

    pub fn current_path(&self) -> String {
        lock(&self.session).current_path.clone()
    }

    /// Entries as currently shown (filtered and sorted).
    pub fn visible(&self) -> Vec<FileEntry> {
        let session = lock(&self.session);
        visible_entries(&session.entries, &session.search, session.sort)
    }

    pub fn changelog(&self) -> Vec<String> {
        lock(&self.changelog).entries()
    }

    pub fn editor_path(&self) -> Option<String> {
        lock(&self.editor).as_ref().map(|e| e.path.clone())
    }

    pub fn menu_open(&self) -> bool {
        lock(&self.menu_target).is_some()
    }

    fn log_change(&self, action: String) {
        tracing::info!(action = %action, "file change");
        lock(&self.changelog).record(&action);
    }

    fn find_entry(&self, path: &str) -> Option<FileEntry> {
        lock(&self.session).entries.iter().find(|e| e.path == path).cloned()
    }

    // ----- Lifecycle -----

    /// Draws the toolbar (once per instance) and lists the current directory.
    pub async fn mount(&self) -> ClientResult<()> {
        self.toolbar.run(|| self.render_toolbar());
        let path = self.current_path();
        match self.browse(&path).await {
            ActionOutcome::Failed => Err(ClientError::Backend(format!("could not list {:?}", path))),
            _ => Ok(()),
        }
    }

    /// Closes everything that floats over the page.
    pub fn unmount(&self) {
        self.dismiss_menu();
        if lock(&self.editor).take().is_some() {
            self.ctx.surface.render(Target::FileEditor, View::Empty);
        }
        self.ctx.surface.render(Target::ImageViewer, View::Empty);
    }

    fn render_toolbar(&self) {
        let actions = vec![
            Action::new("Refresh", Command::RefreshFiles),
            Action::new("New Folder", Command::CreateFolder),
            Action::new("Upload", Command::Upload(Vec::new())),
            Action::new("Change Log", Command::ShowChangeLog),
            Action::new("Sort: Name", Command::SortFiles(SortColumn::Name)),
            Action::new("Sort: Size", Command::SortFiles(SortColumn::Size)),
            Action::new("Sort: Modified", Command::SortFiles(SortColumn::Modified)),
        ];
        self.ctx.surface.render(Target::FileToolbar, View::Toolbar(actions));
    }

    // ----- Listing -----

    /// Lists `path`. On failure the previous listing stays on screen.
    pub async fn browse(&self, path: &str) -> ActionOutcome {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        lock(&self.session).loading = true;

        let result = self.ctx.api.browse(path).await;
        if self.generation.load(Ordering::Acquire) != generation {
            // A newer browse owns the session now.
            return ActionOutcome::Cancelled;
        }

        match result {
            Ok(listing) => {
                {
                    let mut session = lock(&self.session);
                    session.current_path = if listing.current_path.is_empty() {
                        path.trim_matches('/').to_string()
                    } else {
                        listing.current_path
                    };
                    session.entries = listing.items;
                    session.loading = false;
                }
                tracing::debug!(path = %self.current_path(), "directory listed");
                self.render_breadcrumb();
                self.render_list();
                ActionOutcome::Completed
            }
            Err(err) => {
                lock(&self.session).loading = false;
                self.ctx.report_failure("load files", &err).await
            }
        }
    }

    /// Lists the directory that is current now.
    pub async fn refresh(&self) -> ActionOutcome {
        let path = self.current_path();
        self.browse(&path).await
    }

    pub fn search(&self, term: &str) {
        lock(&self.session).search = term.to_string();
        self.render_list();
    }

    pub fn sort_by(&self, column: SortColumn) {
        lock(&self.session).sort.toggle(column);
        self.render_list();
    }

    fn render_breadcrumb(&self) {
        let crumbs = breadcrumb(&self.current_path());
        self.ctx.surface.render(Target::FileBreadcrumb, View::Breadcrumb(crumbs));
    }

    fn render_list(&self) {
        let mut table = Table::new(&["Name", "Size", "Modified", "Actions"], "No files found");
        for entry in self.visible() {
            let name = if entry.is_directory {
                Cell { text: entry.name.clone(), style: CellStyle::Directory, image: None }
            } else {
                Cell::plain(entry.name.clone())
            };
            let size = if entry.is_directory { "-".to_string() } else { format::file_size(entry.size) };
            let modified = Cell::plain(format::file_date(entry.modified));
            let actions = Self::row_actions(&entry);
            table.push(entry.path.clone(), vec![name, Cell::plain(size), modified], actions);
        }
        self.ctx.surface.render(Target::FileList, View::Table(table));
    }

    fn row_actions(entry: &FileEntry) -> Vec<Action> {
        let path = entry.path.clone();
        let mut actions = Vec::new();
        if entry.is_directory {
            actions.push(Action::new("Open", Command::Browse(path.clone())));
        } else {
            if entry.editable {
                actions.push(Action::new("Edit", Command::EditFile(path.clone())));
            }
            if is_image(&entry.name) {
                actions.push(Action::new("Open Picture", Command::OpenEntry(path.clone())));
            }
            actions.push(Action::new("Download", Command::Download(path.clone())));
        }
        actions.push(Action::new("Rename", Command::Rename(path.clone())));
        actions.push(Action::danger("Delete", Command::Delete { path, is_directory: entry.is_directory }));
        actions
    }

    // ----- Opening -----

    /// Double-click: enter directories, view images, edit editable files.
    pub async fn open(&self, path: &str) -> ActionOutcome {
        let Some(entry) = self.find_entry(path) else {
            return ActionOutcome::Rejected;
        };
        if entry.is_directory {
            self.browse(&entry.path).await
        } else if is_image(&entry.name) {
            self.view_image(&entry.path)
        } else if entry.editable {
            self.edit(&entry.path).await
        } else {
            ActionOutcome::Rejected
        }
    }

    pub fn view_image(&self, path: &str) -> ActionOutcome {
        self.ctx.surface.render(Target::ImageViewer, View::Image(self.ctx.api.download_url(path)));
        self.log_change(format!("View image /{}", path));
        ActionOutcome::Completed
    }

    pub fn download(&self, path: &str) -> ActionOutcome {
        self.ctx.surface.navigate(&self.ctx.api.download_url(path));
        ActionOutcome::Completed
    }

    // ----- Editing -----

    pub async fn edit(&self, path: &str) -> ActionOutcome {
        let file = match self.ctx.api.read_file(path).await {
            Ok(file) => file,
            Err(err) => return self.ctx.report_failure("load file", &err).await,
        };
        *lock(&self.editor) = Some(OpenEditor { path: path.to_string() });
        let view = EditorView {
            path: path.to_string(),
            title: format!("Edit: {}", file_name(path)),
            line_count: file.content.split('\n').count(),
            content: file.content,
        };
        self.ctx.surface.render(Target::FileEditor, View::Editor(view));
        ActionOutcome::Completed
    }

    /// Writes the editor content back. The editor stays open when saving fails.
    pub async fn save_edit(&self, content: &str) -> ActionOutcome {
        let Some(path) = self.editor_path() else {
            return ActionOutcome::Rejected;
        };
        if let Err(err) = self.ctx.api.write_file(&path, content).await {
            return self.ctx.report_failure("save file", &err).await;
        }
        self.log_change(format!("Edit /{}", path));
        self.ctx.dialogs.alert("File saved successfully").await;
        self.close_editor();
        self.refresh().await;
        ActionOutcome::Completed
    }

    pub fn close_editor(&self) {
        lock(&self.editor).take();
        self.ctx.surface.render(Target::FileEditor, View::Empty);
        self.ctx.surface.render(Target::ImageViewer, View::Empty);
    }

    // ----- Mutations -----

    pub async fn rename(&self, path: &str) -> ActionOutcome {
        let old_name = self.find_entry(path).map(|e| e.name).unwrap_or_else(|| file_name(path).to_string());
        let new_name = match self.ctx.dialogs.prompt("Enter new name:", &old_name).await {
            Some(name) if !name.is_empty() && name != old_name => name,
            _ => return ActionOutcome::Cancelled,
        };
        if let Err(err) = self.ctx.api.rename_path(path, &new_name).await {
            return self.ctx.report_failure("rename", &err).await;
        }
        self.log_change(format!("Rename /{} to {}", path, new_name));
        self.refresh().await;
        ActionOutcome::Completed
    }

    /// Files need a yes/no confirmation; folders need their exact name typed.
    pub async fn delete(&self, path: &str, is_directory: bool) -> ActionOutcome {
        let name = file_name(path).to_string();
        if is_directory {
            let typed = self
                .ctx
                .dialogs
                .prompt(&format!("To delete this folder, please type its name to confirm: \"{}\"", name), "")
                .await;
            match typed {
                None => return ActionOutcome::Cancelled,
                Some(typed) if typed.is_empty() => return ActionOutcome::Cancelled,
                Some(typed) if typed != name => {
                    self.ctx.dialogs.alert("Folder name did not match. Deletion cancelled.").await;
                    return ActionOutcome::Rejected;
                }
                Some(_) => {}
            }
        } else if !self.ctx.dialogs.confirm(&format!("Are you sure you want to delete this file? {}", name)).await {
            return ActionOutcome::Cancelled;
        }

        if let Err(err) = self.ctx.api.delete_path(path).await {
            let what = if is_directory { "delete folder" } else { "delete file" };
            return self.ctx.report_failure(what, &err).await;
        }
        self.log_change(format!("Delete /{}", path));
        self.refresh().await;
        ActionOutcome::Completed
    }

    pub async fn create_folder(&self) -> ActionOutcome {
        let name = match self.ctx.dialogs.prompt("Enter folder name:", "").await {
            Some(name) if !name.is_empty() => name,
            _ => return ActionOutcome::Cancelled,
        };
        let folder = join_path(&self.current_path(), &name);
        if let Err(err) = self.ctx.api.mkdir(&folder).await {
            return self.ctx.report_failure("create folder", &err).await;
        }
        self.log_change(format!("Create folder /{}", folder));
        self.refresh().await;
        ActionOutcome::Completed
    }

    /// Uploads every file into the directory current at call time. Transfers run
    /// concurrently and fail independently; the listing is refreshed once after
    /// all of them settled, then each failure is reported.
    pub async fn upload(&self, files: Vec<UploadFile>) -> UploadReport {
        let mut report = UploadReport::default();
        if files.is_empty() {
            return report;
        }
        let directory = self.current_path();
        let names: Vec<String> = files.iter().map(|f| f.name.clone()).collect();
        let transfers = files.into_iter().map(|file| self.ctx.api.upload_file(&directory, file));
        let results = join_all(transfers).await;

        for (name, result) in names.into_iter().zip(results) {
            match result {
                Ok(()) => {
                    self.log_change(format!("Upload /{}", join_path(&directory, &name)));
                    report.succeeded.push(name);
                }
                Err(err) => {
                    tracing::warn!(file = %name, error = %err, "upload failed");
                    report.failed.push((name, err));
                }
            }
        }

        self.refresh().await;
        for (name, err) in &report.failed {
            self.ctx.dialogs.alert(&format!("Failed to upload {}: {}", name, err.user_message())).await;
        }
        report
    }

    /// Shows the backend's change log, or the local mirror when it is unavailable.
    pub async fn show_changelog(&self) -> ActionOutcome {
        let entries = match self.ctx.api.file_changelog().await {
            Ok(log) => log.entries,
            Err(err) => {
                tracing::warn!(error = %err, "backend change log unavailable, showing local entries");
                self.changelog()
            }
        };
        let view = if entries.is_empty() {
            View::Message("No actions recorded yet".into())
        } else {
            View::Lines(entries.into_iter().map(|text| Line { text, highlight: false }).collect())
        };
        self.ctx.surface.render(Target::ChangeLog, view);
        ActionOutcome::Completed
    }

    // ----- Context menu -----

    pub fn context_menu(&self, path: &str, x: i32, y: i32) -> ActionOutcome {
        let Some(entry) = self.find_entry(path) else {
            return ActionOutcome::Rejected;
        };
        let (x, y) = clamp_position(x, y, self.ctx.surface.viewport());
        let actions = menu_items(&entry)
            .into_iter()
            .map(|item| match item {
                MenuItem::Delete => Action::danger(item.label(), Command::MenuAction(item)),
                _ => Action::new(item.label(), Command::MenuAction(item)),
            })
            .collect();
        *lock(&self.menu_target) = Some(entry);
        self.ctx.surface.render(Target::ContextMenu, View::Menu(MenuView { x, y, actions }));
        ActionOutcome::Completed
    }

    pub fn dismiss_menu(&self) {
        if lock(&self.menu_target).take().is_some() {
            self.ctx.surface.render(Target::ContextMenu, View::Empty);
        }
    }

    /// Runs a menu entry against the row the menu was opened on.
    pub async fn menu_action(&self, item: MenuItem) -> ActionOutcome {
        let Some(entry) = lock(&self.menu_target).clone() else {
            return ActionOutcome::Rejected;
        };
        self.dismiss_menu();
        match item {
            MenuItem::Edit => self.edit(&entry.path).await,
            MenuItem::OpenPicture => self.view_image(&entry.path),
            MenuItem::Download => self.download(&entry.path),
            MenuItem::Rename => self.rename(&entry.path).await,
            MenuItem::Delete => self.delete(&entry.path, entry.is_directory).await,
        }
    }
}

#[async_trait]
impl PageLoader for FileManager {
    fn page(&self) -> PageId {
        PageId::Files
    }

    fn refresh_interval(&self) -> Option<Duration> {
        None
    }

    async fn load(&self, _tick: u64) -> ClientResult<()> {
        self.mount().await
    }

    fn unmount(&self) {
        FileManager::unmount(self);
    }
}
