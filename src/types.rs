//! Type definitions for the backend API.
//!
//! These structures mirror the JSON the game-server backend returns. They are
//! displayed, never owned: every fetch replaces the previous copy wholesale.
//!
//! ## Main Categories
//!
//! - **Server Types**: server identity, metrics samples, GeyserMC bridge info
//! - **Player Types**: players, inventories and the access-control lists
//! - **Content Types**: plugins, settings, recipes and log feeds
//! - **File Types**: directory listings and file contents for the file manager

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Static information about the game server.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
    pub bukkit_version: String,
    pub minecraft_version: String,
    pub online_mode: bool,
    pub current_players: u32,
    pub max_players: u32,
    pub ip: Option<String>,
    pub port: u16,
    pub motd: String,
    pub whitelist_enabled: bool,
    pub allow_flight: bool,
    pub allow_nether: bool,
    pub allow_end: bool,
    /// Uptime in milliseconds.
    pub uptime: Option<u64>,
    pub worlds: Vec<World>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct World {
    pub name: String,
    pub environment: String,
    pub difficulty: String,
    pub pvp: bool,
    pub seed: i64,
}

/// One sample of the backend's performance history.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct MetricSample {
    pub timestamp: i64,
    pub tps: f64,
    /// Memory usage in percent.
    pub memory: f64,
    /// CPU usage in percent.
    pub cpu: f64,
    pub players: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct MetricsResponse {
    pub metrics: Vec<MetricSample>,
}

/// Presence and configuration of the GeyserMC bedrock bridge.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GeyserInfo {
    pub detected: bool,
    pub version: Option<String>,
    pub bedrock_port: Option<u16>,
    pub bedrock_address: Option<String>,
    pub motd1: Option<String>,
    pub motd2: Option<String>,
}

/// A player row as shown on the players page.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Player {
    pub uuid: String,
    pub name: String,
    pub online: bool,
    pub banned: bool,
    pub op: bool,
    /// Total play time in seconds.
    pub play_time: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PlayersResponse {
    pub players: Vec<Player>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PlayerDetail {
    pub inventory: Vec<InventoryItem>,
}

/// Moderation actions accepted by `POST /player/{uuid}/action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerAction {
    Kick,
    Ban,
    Unban,
    Op,
    Deop,
}

impl PlayerAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerAction::Kick => "kick",
            PlayerAction::Ban => "ban",
            PlayerAction::Unban => "unban",
            PlayerAction::Op => "op",
            PlayerAction::Deop => "deop",
        }
    }
}

/// The three backend-maintained access-control lists keyed by player UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessListKind {
    Whitelist,
    Blacklist,
    Ops,
}

impl AccessListKind {
    /// Endpoint segment, which is also the key of the list in the response body.
    pub fn key(&self) -> &'static str {
        match self {
            AccessListKind::Whitelist => "whitelist",
            AccessListKind::Blacklist => "blacklist",
            AccessListKind::Ops => "ops",
        }
    }

    /// Human-readable name used in confirmations and empty-table texts.
    pub fn label(&self) -> &'static str {
        match self {
            AccessListKind::Whitelist => "whitelist",
            AccessListKind::Blacklist => "blacklist",
            AccessListKind::Ops => "operators",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AccessEntry {
    pub name: String,
    pub uuid: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct UuidLookup {
    pub uuid: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Plugin {
    pub name: String,
    pub version: String,
    pub author: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PluginsResponse {
    pub plugins: Vec<Plugin>,
}

/// Console, chat and server logs all arrive as `{"logs": [line, ...]}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LogLines {
    pub logs: Vec<String>,
}

/// `server.properties` values and game rules, keyed by their backend names.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub properties: BTreeMap<String, JsonValue>,
    pub gamerules: BTreeMap<String, JsonValue>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RecipeResult {
    pub item: String,
    pub count: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Recipe {
    pub id: String,
    pub shaped: bool,
    /// Crafting grid slots, row-major; `None` is an empty slot.
    pub ingredients: Vec<Option<String>>,
    pub result: RecipeResult,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RecipesResponse {
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RecipeResponse {
    pub recipe: Option<Recipe>,
}

/// A recipe as submitted from the recipe form.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct RecipeDraft {
    pub shaped: bool,
    pub ingredients: Vec<Option<String>>,
    pub result: RecipeResult,
}

/// An item in a file-manager directory listing.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FileEntry {
    pub name: String,
    pub path: String,
    pub is_directory: bool,
    pub size: Option<u64>,
    /// Modification time in epoch milliseconds.
    pub modified: Option<i64>,
    pub editable: bool,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DirectoryListing {
    pub current_path: String,
    pub items: Vec<FileEntry>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FileContent {
    pub path: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ChangeLogResponse {
    pub entries: Vec<String>,
}

/// A local file selected for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self { name: name.into(), bytes: bytes.into() }
    }
}
