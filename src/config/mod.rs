//! Configuration module for the clinical prep assistant.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the backend,
//! export and conversation, `AppPaths` for cross-platform directories, and
//! TOML persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, BackendConfig, ConversationConfig, ExportConfig};
