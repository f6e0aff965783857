use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use crate::filemanager::{MenuItem, SortColumn};
use crate::router::PageId;
use crate::types::{AccessListKind, PlayerAction, RecipeDraft, UploadFile};

/// A user intent, produced by clicking an [`Action`](crate::view::Action) or by
/// the shell, and routed by [`Dashboard::dispatch`](crate::state::Dashboard::dispatch).
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SelectPage(PageId),

    // Players
    SearchPlayers(String),
    PlayerAction { uuid: String, name: String, action: PlayerAction },
    ShowInventory { uuid: String, name: String },

    // Whitelist / blacklist / ops
    AccessAdd { kind: AccessListKind, name: String, uuid: Option<String> },
    AccessRemove { kind: AccessListKind, uuid: String, name: String },

    // Console and chat
    SendCommand(String),
    SendChat(String),

    // Settings
    SaveProperties(BTreeMap<String, JsonValue>),
    SaveGameRules(BTreeMap<String, JsonValue>),

    // Recipes
    EditRecipe(String),
    DeleteRecipe(String),
    SaveRecipe(RecipeDraft),
    ClearRecipeForm,

    // Logs
    SearchLogs(String),

    // File manager
    Browse(String),
    RefreshFiles,
    SearchFiles(String),
    SortFiles(SortColumn),
    OpenEntry(String),
    Download(String),
    EditFile(String),
    SaveFile(String),
    CloseEditor,
    Rename(String),
    Delete { path: String, is_directory: bool },
    CreateFolder,
    Upload(Vec<UploadFile>),
    ShowChangeLog,
    ContextMenu { path: String, x: i32, y: i32 },
    MenuAction(MenuItem),
    DismissMenu,
}
