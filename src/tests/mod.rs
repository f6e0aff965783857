//! Unit and integration tests for the MCControl dashboard.
//!
//! Most modules drive pages through [`support::Harness`], which pairs a
//! scripted transport with in-memory surface and dialogs, so no backend is
//! needed. Polling and timeout tests run on tokio's paused clock.
//!
//! ## Test Modules
//!
//! - **support**: Scripted transport, scripted dialogs and the page harness
//! - **pages_tests**: Page loaders, user actions and formatting helpers
//! - **filemanager_tests**: Browsing, sorting, uploads, editing and the context menu
//! - **router_tests**: Page selection and the single polling slot
//! - **connectivity_tests**: Offline overlay, recovery probe and request timeouts
//! - **modal_tests**: Alert, confirm and prompt dialogs
//! - **shell_tests**: Parsing of typed commands
//! - **state_tests**: Command dispatch through the dashboard
//! - **config_tests**: Configuration loading and validation
//! - **error_tests**: Error classification and input validation
//! - **transport_tests**: The HTTP transport against a local axum backend
//!
//! ## Running Tests
//!
//! Tests can be run using:
//! ```bash
//! cargo test
//! ```
//!
//! Individual test modules can be run with:
//! ```bash
//! cargo test filemanager_tests
//! cargo test router_tests
//! # etc.
//! ```

pub mod support;

pub mod modal_tests;
pub mod shell_tests;
pub mod config_tests;
pub mod error_tests;
pub mod transport_tests;
