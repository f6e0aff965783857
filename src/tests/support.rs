//! Test doubles shared by the test modules: a scripted transport, scripted
//! dialogs and a harness that wires them to a [`MemorySurface`].

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};

use crate::api::{ApiClient, ApiRequest, Method, RequestBody, Transport};
use crate::connectivity::Connectivity;
use crate::error::{ClientError, ClientResult};
use crate::modal::Dialogs;
use crate::pages::PageContext;
use crate::surface::{MemorySurface, Viewport};
use crate::types::FileEntry;

pub const BASE_URL: &str = "http://mc.local:8080";

fn strip_query(path: &str) -> &str {
    path.split('?').next().unwrap_or(path)
}

/// Transport that answers from a script and records every request.
///
/// Responses are looked up by method and full path first, then by the path
/// without its query string. The last scripted response for a key repeats;
/// unscripted requests answer `{}`.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<(Method, String), VecDeque<ClientResult<JsonValue>>>>,
    requests: Mutex<Vec<ApiRequest>>,
    delays: Mutex<HashMap<String, Duration>>,
    failing_uploads: Mutex<HashSet<String>>,
    probes: Mutex<VecDeque<ClientResult<()>>>,
    probe_count: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, method: Method, path: &str, result: ClientResult<JsonValue>) {
        self.responses.lock().unwrap().entry((method, path.to_string())).or_default().push_back(result);
    }

    pub fn ok(&self, method: Method, path: &str, body: JsonValue) {
        self.respond(method, path, Ok(body));
    }

    pub fn fail(&self, method: Method, path: &str, err: ClientError) {
        self.respond(method, path, Err(err));
    }

    /// Requests to `path` wait `delay` first. `path` may carry a query string
    /// to delay only that exact request.
    pub fn delay(&self, path: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(path.to_string(), delay);
    }

    /// Uploads of a file with this name fail with HTTP 500.
    pub fn fail_upload(&self, name: &str) {
        self.failing_uploads.lock().unwrap().insert(name.to_string());
    }

    /// Queues probe outcomes; once drained, probes succeed.
    pub fn script_probes(&self, outcomes: Vec<ClientResult<()>>) {
        self.probes.lock().unwrap().extend(outcomes);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }

    /// Number of requests sent to `path` (compared without query string).
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests().iter().filter(|r| r.method == method && strip_query(&r.path) == path).count()
    }

    pub fn last(&self, method: Method, path: &str) -> Option<ApiRequest> {
        self.requests().into_iter().rev().find(|r| r.method == method && strip_query(&r.path) == path)
    }

    pub fn probe_count(&self) -> usize {
        self.probe_count.load(Ordering::SeqCst)
    }

    fn scripted(&self, method: Method, path: &str) -> ClientResult<JsonValue> {
        let mut responses = self.responses.lock().unwrap();
        for key in [(method, path.to_string()), (method, strip_query(path).to_string())] {
            if let Some(queue) = responses.get_mut(&key) {
                let next = if queue.len() > 1 { queue.pop_front() } else { queue.front().cloned() };
                if let Some(result) = next {
                    return result;
                }
            }
        }
        Ok(json!({}))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<JsonValue> {
        self.requests.lock().unwrap().push(request.clone());
        let delay = {
            let delays = self.delays.lock().unwrap();
            delays.get(&request.path).or_else(|| delays.get(strip_query(&request.path))).copied()
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let RequestBody::Upload { file, .. } = &request.body {
            if self.failing_uploads.lock().unwrap().contains(&file.name) {
                return Err(ClientError::Http { status: 500, message: "Disk full".to_string() });
            }
        }
        self.scripted(request.method, &request.path)
    }

    async fn probe(&self) -> ClientResult<()> {
        self.probe_count.fetch_add(1, Ordering::SeqCst);
        self.probes.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DialogCall {
    Alert(String),
    Confirm(String),
    Prompt { message: String, placeholder: String },
}

/// Dialogs answered from queues. Unanswered confirmations decline and
/// unanswered prompts cancel.
#[derive(Default)]
pub struct ScriptedDialogs {
    confirms: Mutex<VecDeque<bool>>,
    prompts: Mutex<VecDeque<Option<String>>>,
    calls: Mutex<Vec<DialogCall>>,
}

impl ScriptedDialogs {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn answer_confirm(&self, accept: bool) {
        self.confirms.lock().unwrap().push_back(accept);
    }

    pub fn answer_prompt(&self, text: Option<&str>) {
        self.prompts.lock().unwrap().push_back(text.map(str::to_string));
    }

    pub fn calls(&self) -> Vec<DialogCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                DialogCall::Alert(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn confirmations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                DialogCall::Confirm(m) => Some(m),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Dialogs for ScriptedDialogs {
    async fn alert(&self, message: &str) {
        self.calls.lock().unwrap().push(DialogCall::Alert(message.to_string()));
    }

    async fn confirm(&self, message: &str) -> bool {
        self.calls.lock().unwrap().push(DialogCall::Confirm(message.to_string()));
        self.confirms.lock().unwrap().pop_front().unwrap_or(false)
    }

    async fn prompt(&self, message: &str, placeholder: &str) -> Option<String> {
        self.calls
            .lock()
            .unwrap()
            .push(DialogCall::Prompt { message: message.to_string(), placeholder: placeholder.to_string() });
        self.prompts.lock().unwrap().pop_front().flatten()
    }
}

/// Everything a page needs, backed by test doubles.
pub struct Harness {
    pub transport: Arc<MockTransport>,
    pub surface: Arc<MemorySurface>,
    pub dialogs: Arc<ScriptedDialogs>,
    pub connectivity: Connectivity,
    pub ctx: PageContext,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(10))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::build(timeout, Viewport::default())
    }

    pub fn with_viewport(viewport: Viewport) -> Self {
        Self::build(Duration::from_secs(10), viewport)
    }

    fn build(timeout: Duration, viewport: Viewport) -> Self {
        let transport = MockTransport::new();
        let surface = Arc::new(MemorySurface::with_viewport(viewport));
        let dialogs = ScriptedDialogs::new();
        let connectivity = Connectivity::new(surface.clone());
        let api = ApiClient::new(transport.clone(), connectivity.clone(), BASE_URL, "/api", timeout);
        let ctx = PageContext::new(api, surface.clone(), dialogs.clone());
        Self { transport, surface, dialogs, connectivity, ctx }
    }
}

pub fn dir(name: &str, path: &str) -> FileEntry {
    FileEntry {
        name: name.to_string(),
        path: path.to_string(),
        is_directory: true,
        size: None,
        modified: Some(0),
        editable: false,
        kind: None,
    }
}

pub fn file(name: &str, path: &str, size: u64, modified: i64) -> FileEntry {
    FileEntry {
        name: name.to_string(),
        path: path.to_string(),
        is_directory: false,
        size: Some(size),
        modified: Some(modified),
        editable: name.ends_with(".yml") || name.ends_with(".txt") || name.ends_with(".properties"),
        kind: None,
    }
}

/// A listing body as the backend sends it.
pub fn listing(current_path: &str, items: &[FileEntry]) -> JsonValue {
    json!({ "currentPath": current_path, "items": items })
}
