//! Client for the dashboard's backend REST API.
//!
//! [`ApiClient`] is the only way the dashboard talks to the backend. It adds the
//! `/api` prefix, bounds every request with a timeout, shows the offline
//! overlay on any failed request and hides it on the next success, and turns
//! `{"error": ...}` bodies into typed errors. The actual I/O happens behind the [`Transport`] trait.

mod http;

pub use http::HttpTransport;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value as JsonValue};

use crate::connectivity::Connectivity;
use crate::error::{ClientError, ClientResult};
use crate::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(JsonValue),
    /// Multipart upload: a `path` text field plus one `file` part.
    Upload { directory: String, file: UploadFile },
}

/// A request with its path already carrying the API prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: RequestBody,
}

/// Moves requests to the backend and back.
///
/// Non-2xx responses must be reported as [`ClientError::Http`] with the
/// backend's `error` message when it sent one.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ClientResult<JsonValue>;

    /// Lightweight existence check (`HEAD <prefix>/server`).
    async fn probe(&self) -> ClientResult<()>;
}

fn query(path: &str) -> String {
    urlencoding::encode(path).into_owned()
}

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    connectivity: Connectivity,
    base_url: String,
    prefix: String,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        connectivity: Connectivity,
        base_url: &str,
        prefix: &str,
        timeout: Duration,
    ) -> Self {
        Self {
            transport,
            connectivity,
            base_url: base_url.trim_end_matches('/').to_string(),
            prefix: prefix.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    /// Absolute URL of an API endpoint, for links the browser follows itself.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}{}", self.base_url, self.prefix, endpoint)
    }

    async fn execute(&self, method: Method, endpoint: &str, body: RequestBody) -> ClientResult<JsonValue> {
        let request = ApiRequest { method, path: format!("{}{}", self.prefix, endpoint), body };
        tracing::debug!(method = ?request.method, path = %request.path, "api request");
        let result = match tokio::time::timeout(self.timeout, self.transport.send(request)).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout { after_ms: self.timeout.as_millis() as u64 }),
        };
        match result {
            Ok(value) => {
                self.connectivity.mark_online();
                match value.get("error").and_then(|e| e.as_str()) {
                    Some(message) => Err(ClientError::Backend(message.to_string())),
                    None => Ok(value),
                }
            }
            Err(err) => {
                self.connectivity.mark_offline();
                tracing::debug!(endpoint, error = %err, "api request failed");
                Err(err)
            }
        }
    }

    pub async fn get(&self, endpoint: &str) -> ClientResult<JsonValue> {
        self.execute(Method::Get, endpoint, RequestBody::Empty).await
    }

    pub async fn post(&self, endpoint: &str, body: JsonValue) -> ClientResult<JsonValue> {
        self.execute(Method::Post, endpoint, RequestBody::Json(body)).await
    }

    pub async fn delete(&self, endpoint: &str) -> ClientResult<JsonValue> {
        self.execute(Method::Delete, endpoint, RequestBody::Empty).await
    }

    pub async fn upload(&self, endpoint: &str, directory: &str, file: UploadFile) -> ClientResult<JsonValue> {
        let body = RequestBody::Upload { directory: directory.to_string(), file };
        self.execute(Method::Post, endpoint, body).await
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> ClientResult<T> {
        let value = self.get(endpoint).await?;
        Ok(serde_json::from_value(value)?)
    }

    // ----- Server -----

    pub async fn server_info(&self) -> ClientResult<ServerInfo> {
        self.get_json("/server").await
    }

    pub async fn metrics(&self) -> ClientResult<MetricsResponse> {
        self.get_json("/metrics").await
    }

    pub async fn geyser(&self) -> ClientResult<GeyserInfo> {
        self.get_json("/geysermc").await
    }

    pub fn server_icon_url(&self) -> String {
        self.url("/server-icon")
    }

    // ----- Players -----

    pub async fn players(&self) -> ClientResult<PlayersResponse> {
        self.get_json("/players").await
    }

    pub async fn player_detail(&self, uuid: &str) -> ClientResult<PlayerDetail> {
        self.get_json(&format!("/player/{}", query(uuid))).await
    }

    pub async fn player_action(&self, uuid: &str, action: PlayerAction) -> ClientResult<()> {
        self.post(&format!("/player/{}/action", query(uuid)), json!({ "action": action.as_str() }))
            .await
            .map(|_| ())
    }

    pub fn player_head_url(&self, uuid: &str) -> String {
        self.url(&format!("/player-head/{}", query(uuid)))
    }

    /// Resolves a player name to a dashed UUID; `None` when the name is unknown.
    pub async fn uuid_lookup(&self, username: &str) -> ClientResult<Option<String>> {
        let lookup: UuidLookup = self.get_json(&format!("/uuid-lookup?username={}", query(username))).await?;
        Ok(lookup.uuid.filter(|u| !u.is_empty()))
    }

    // ----- Access lists -----

    pub async fn access_list(&self, kind: AccessListKind) -> ClientResult<Vec<AccessEntry>> {
        let value = self.get(&format!("/{}", kind.key())).await?;
        match value.get(kind.key()) {
            Some(list) if !list.is_null() => Ok(serde_json::from_value(list.clone())?),
            _ => Ok(Vec::new()),
        }
    }

    pub async fn access_add(&self, kind: AccessListKind, name: &str, uuid: &str) -> ClientResult<()> {
        self.post(&format!("/{}/add", kind.key()), json!({ "name": name, "uuid": uuid })).await.map(|_| ())
    }

    pub async fn access_remove(&self, kind: AccessListKind, uuid: &str) -> ClientResult<()> {
        self.delete(&format!("/{}/remove?uuid={}", kind.key(), query(uuid))).await.map(|_| ())
    }

    // ----- Plugins, console, chat, logs -----

    pub async fn plugins(&self) -> ClientResult<PluginsResponse> {
        self.get_json("/plugins").await
    }

    pub async fn console(&self) -> ClientResult<LogLines> {
        self.get_json("/console").await
    }

    pub async fn send_command(&self, command: &str) -> ClientResult<()> {
        self.post("/command", json!({ "command": command })).await.map(|_| ())
    }

    pub async fn chat(&self) -> ClientResult<LogLines> {
        self.get_json("/chat").await
    }

    pub async fn send_chat(&self, message: &str) -> ClientResult<()> {
        self.post("/chat", json!({ "message": message })).await.map(|_| ())
    }

    pub async fn logs(&self) -> ClientResult<LogLines> {
        self.get_json("/logs").await
    }

    // ----- Settings -----

    pub async fn settings(&self) -> ClientResult<Settings> {
        self.get_json("/settings").await
    }

    pub async fn save_properties(&self, properties: &std::collections::BTreeMap<String, JsonValue>) -> ClientResult<()> {
        self.post("/settings/properties", json!({ "properties": properties })).await.map(|_| ())
    }

    pub async fn save_gamerules(&self, gamerules: &std::collections::BTreeMap<String, JsonValue>) -> ClientResult<()> {
        self.post("/settings/gamerules", json!({ "gamerules": gamerules })).await.map(|_| ())
    }

    // ----- Recipes -----

    pub async fn recipes(&self) -> ClientResult<RecipesResponse> {
        self.get_json("/recipes").await
    }

    pub async fn recipe(&self, id: &str) -> ClientResult<Option<Recipe>> {
        let resp: RecipeResponse = self.get_json(&format!("/recipe/{}", query(id))).await?;
        Ok(resp.recipe)
    }

    pub async fn create_recipe(&self, draft: &RecipeDraft) -> ClientResult<()> {
        self.post("/recipes", serde_json::to_value(draft)?).await.map(|_| ())
    }

    pub async fn update_recipe(&self, id: &str, draft: &RecipeDraft) -> ClientResult<()> {
        self.post(&format!("/recipe/{}", query(id)), serde_json::to_value(draft)?).await.map(|_| ())
    }

    pub async fn delete_recipe(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("/recipe/{}", query(id))).await.map(|_| ())
    }

    // ----- File manager -----

    pub async fn browse(&self, path: &str) -> ClientResult<DirectoryListing> {
        self.get_json(&format!("/filemanager/browse?path={}", query(path))).await
    }

    pub async fn read_file(&self, path: &str) -> ClientResult<FileContent> {
        self.get_json(&format!("/filemanager/content?path={}", query(path))).await
    }

    pub async fn write_file(&self, path: &str, content: &str) -> ClientResult<()> {
        self.post("/filemanager/content", json!({ "path": path, "content": content })).await.map(|_| ())
    }

    pub async fn upload_file(&self, directory: &str, file: UploadFile) -> ClientResult<()> {
        self.upload("/filemanager/upload", directory, file).await.map(|_| ())
    }

    pub async fn rename_path(&self, path: &str, new_name: &str) -> ClientResult<()> {
        self.post("/filemanager/rename", json!({ "path": path, "newName": new_name })).await.map(|_| ())
    }

    pub async fn delete_path(&self, path: &str) -> ClientResult<()> {
        self.delete(&format!("/filemanager/delete?path={}", query(path))).await.map(|_| ())
    }

    pub async fn mkdir(&self, path: &str) -> ClientResult<()> {
        self.post("/filemanager/mkdir", json!({ "path": path })).await.map(|_| ())
    }

    pub async fn file_changelog(&self) -> ClientResult<ChangeLogResponse> {
        self.get_json("/filemanager/changelog").await
    }

    pub fn download_url(&self, path: &str) -> String {
        self.url(&format!("/filemanager/download?path={}", query(path)))
    }
}
