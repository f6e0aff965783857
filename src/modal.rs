//! Promise-style replacements for blocking alert/confirm/prompt dialogs.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::lifecycle::lock;
use crate::surface::Surface;
use crate::view::{Target, View};

/// Asynchronous user dialogs. Every mutating action goes through these for
/// confirmation, input and error reporting.
#[async_trait]
pub trait Dialogs: Send + Sync {
    /// Resolves once the message was acknowledged.
    async fn alert(&self, message: &str);
    /// Resolves `true` on accept, `false` on cancel.
    async fn confirm(&self, message: &str) -> bool;
    /// Resolves with the entered text, or `None` if cancelled.
    async fn prompt(&self, message: &str, placeholder: &str) -> Option<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Alert,
    Confirm,
    Prompt,
}

impl DialogKind {
    fn title(&self) -> &'static str {
        match self {
            DialogKind::Alert => "Information",
            DialogKind::Confirm => "Confirmation",
            DialogKind::Prompt => "Input Required",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKey {
    Enter,
    Escape,
}

/// What the dialog currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogSnapshot {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
    pub placeholder: String,
    pub input: String,
}

#[derive(Debug)]
enum Outcome {
    Accepted(String),
    Cancelled,
}

struct OpenDialog {
    snapshot: DialogSnapshot,
    responder: oneshot::Sender<Outcome>,
}

/// The singleton dialog shared by the whole dashboard.
///
/// Only one dialog is shown at a time; concurrent callers queue on `turn`.
pub struct DialogHost {
    surface: Arc<dyn Surface>,
    turn: tokio::sync::Mutex<()>,
    open: Mutex<Option<OpenDialog>>,
}

/// Detaches the responder and clears the dialog when the wait ends, including
/// when the waiting future is dropped.
struct Listener<'a> {
    host: &'a DialogHost,
}

impl Drop for Listener<'_> {
    fn drop(&mut self) {
        lock(&self.host.open).take();
        self.host.surface.render(Target::Modal, View::Empty);
    }
}

impl DialogHost {
    pub fn new(surface: Arc<dyn Surface>) -> Self {
        Self { surface, turn: tokio::sync::Mutex::new(()), open: Mutex::new(None) }
    }

    pub fn is_open(&self) -> bool {
        lock(&self.open).is_some()
    }

    pub fn current(&self) -> Option<DialogSnapshot> {
        lock(&self.open).as_ref().map(|d| d.snapshot.clone())
    }

    /// Replaces the prompt input. Ignored for alerts and confirmations.
    pub fn type_text(&self, text: &str) {
        let snapshot = {
            let mut open = lock(&self.open);
            match open.as_mut() {
                Some(dialog) if dialog.snapshot.kind == DialogKind::Prompt => {
                    dialog.snapshot.input = text.to_string();
                    dialog.snapshot.clone()
                }
                _ => return,
            }
        };
        self.surface.render(Target::Modal, View::Dialog(snapshot));
    }

    /// Enter accepts, Escape cancels. Returns false when no dialog is open.
    pub fn press(&self, key: DialogKey) -> bool {
        let Some(dialog) = lock(&self.open).take() else {
            return false;
        };
        let outcome = match key {
            DialogKey::Enter => Outcome::Accepted(dialog.snapshot.input),
            DialogKey::Escape => Outcome::Cancelled,
        };
        let _ = dialog.responder.send(outcome);
        true
    }

    /// Types `text` into the open prompt and accepts it.
    pub fn submit(&self, text: &str) -> bool {
        self.type_text(text);
        self.press(DialogKey::Enter)
    }

    async fn show(&self, kind: DialogKind, message: &str, placeholder: &str) -> Outcome {
        let _turn = self.turn.lock().await;
        let (tx, rx) = oneshot::channel();
        let snapshot = DialogSnapshot {
            kind,
            title: kind.title().to_string(),
            message: message.to_string(),
            placeholder: placeholder.to_string(),
            input: String::new(),
        };
        *lock(&self.open) = Some(OpenDialog { snapshot: snapshot.clone(), responder: tx });
        let _listener = Listener { host: self };
        self.surface.render(Target::Modal, View::Dialog(snapshot));
        rx.await.unwrap_or(Outcome::Cancelled)
    }
}

#[async_trait]
impl Dialogs for DialogHost {
    async fn alert(&self, message: &str) {
        self.show(DialogKind::Alert, message, "").await;
    }

    async fn confirm(&self, message: &str) -> bool {
        matches!(self.show(DialogKind::Confirm, message, "").await, Outcome::Accepted(_))
    }

    async fn prompt(&self, message: &str, placeholder: &str) -> Option<String> {
        match self.show(DialogKind::Prompt, message, placeholder).await {
            Outcome::Accepted(text) => Some(text),
            Outcome::Cancelled => None,
        }
    }
}
