//! # MCControl Dashboard Library
//!
//! This is the client core of the MCControl admin dashboard. It talks to the
//! MCControl backend plugin over its REST API and keeps every dashboard page
//! (status, players, access lists, plugins, server, console, chat, settings,
//! recipes, logs and the file manager) up to date while it is shown.
//!
//! ## Architecture
//!
//! The library is built using:
//! - **Tokio**: Async runtime for polling tasks, timeouts and concurrent uploads
//! - **Reqwest**: HTTP client for the backend API, including multipart uploads
//! - **Serde**: Deserialization of the backend's JSON payloads
//! - **Tracing**: Structured logging of loads, failures and file operations
//!
//! Rendering is abstracted behind [`surface::Surface`], which receives typed
//! [`view::View`] models, and user dialogs behind [`modal::Dialogs`]. The
//! binary drives both from a terminal; tests drive them from memory.
//!
//! ## Core Components
//!
//! - [`api`]: Typed backend endpoints on top of a pluggable transport
//! - [`command`]: User intents routed by the dashboard
//! - [`config`]: Application configuration management
//! - [`connectivity`]: Offline detection and the recovery probe
//! - [`error`]: Client error type and input validation
//! - [`filemanager`]: Remote file browsing, editing, uploads and the change log
//! - [`lifecycle`]: Cancellable polling tasks and one-time setup guards
//! - [`modal`]: Asynchronous alert, confirm and prompt dialogs
//! - [`pages`]: Loaders and actions for every dashboard page
//! - [`router`]: Page selection with a single live polling task
//! - [`shell`]: Line-oriented input parsing for the binary
//! - [`state`]: The dashboard that wires everything together
//! - [`surface`]: Render targets and their in-memory and terminal backends
//! - [`types`]: Backend payloads and shared type definitions
//! - [`view`]: Render models produced by the pages

pub mod api;
pub mod command;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod filemanager;
pub mod lifecycle;
pub mod modal;
pub mod pages;
pub mod router;
pub mod shell;
pub mod state;
pub mod surface;
pub mod types;
pub mod view;

#[cfg(test)]
mod tests;
