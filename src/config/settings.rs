//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across tasks.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::report::PageGeometry;

// ---------------------------------------------------------------------------
// BackendConfig
// ---------------------------------------------------------------------------

/// Connection settings for the chat / report backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL; `/chat` and `/generate_report` are appended.
    pub base_url: String,
    /// Maximum seconds to wait for any backend response.  Report generation
    /// on a local model can take several minutes.
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".into(),
            timeout_secs: 600,
        }
    }
}

// ---------------------------------------------------------------------------
// ExportConfig
// ---------------------------------------------------------------------------

/// Downloadable-document settings.  Lengths are millimetres.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// File name of the exported document.
    pub file_name: String,
    /// Target directory — `None` means the platform documents directory.
    pub output_dir: Option<PathBuf>,
    /// Physical page width (A4 = 210).
    pub page_width: f32,
    /// Physical page height (A4 = 297).
    pub page_height: f32,
    /// Top/left inset and initial cursor on each page.
    pub margin: f32,
    /// Width text is wrapped to.
    pub wrap_width: f32,
    /// Vertical advance per line.
    pub line_height: f32,
    /// Cursor position past which a new page is started.
    pub page_break: f32,
    /// Font size in points.
    pub font_size: f32,
    /// Approximate advance of one character, used by the wrapper.
    pub char_width: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: "Clinical-Prep-Report.pdf".into(),
            output_dir: None,
            page_width: 210.0,
            page_height: 297.0,
            margin: 10.0,
            wrap_width: 180.0,
            line_height: 7.0,
            page_break: 280.0,
            font_size: 11.0,
            char_width: 2.0,
        }
    }
}

impl ExportConfig {
    /// Geometry consumed by [`paginate`](crate::report::paginate).
    ///
    /// Falls back to [`PageGeometry::default`] when the configured values
    /// are unusable.
    pub fn geometry(&self) -> PageGeometry {
        if self.is_valid() {
            self.raw_geometry()
        } else {
            log::warn!("Invalid export geometry in settings; using defaults");
            PageGeometry::default()
        }
    }

    /// `true` when the layout fits on the physical page and the PDF
    /// backend can draw it.
    pub fn is_valid(&self) -> bool {
        self.raw_geometry().is_valid()
            && self.page_width.is_finite()
            && self.page_height.is_finite()
            && self.page_break <= self.page_height
            && self.margin + self.wrap_width <= self.page_width
            && self.font_size > 0.0
            && self.char_width > 0.0
    }

    fn raw_geometry(&self) -> PageGeometry {
        PageGeometry {
            page_width: self.wrap_width,
            page_height: self.page_break,
            line_height: self.line_height,
            margin: self.margin,
        }
    }

    /// Full path of the exported document.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| AppPaths::new().export_dir)
            .join(&self.file_name)
    }
}

// ---------------------------------------------------------------------------
// ConversationConfig
// ---------------------------------------------------------------------------

/// Conversation front-end behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// First assistant message.  The backend's interview keys its first
    /// transition on the phrase "To start, please type".
    pub greeting: String,
    /// Play every assistant reply through text-to-speech.
    pub speak_replies: bool,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            greeting: "Hello! I'm your AI nurse assistant. I'll ask a few questions to \
                       prepare a report for your clinician. To start, please type 'hi'."
                .into(),
            speak_replies: false,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use clinical_prep::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend connection settings.
    pub backend: BackendConfig,
    /// PDF export settings.
    pub export: ExportConfig,
    /// Conversation settings.
    pub conversation: ConversationConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        if !config.export.is_valid() {
            log::warn!(
                "Export settings in {} are invalid; using default page layout",
                path.display()
            );
            config.export = ExportConfig {
                file_name: config.export.file_name,
                output_dir: config.export.output_dir,
                ..ExportConfig::default()
            };
        }
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.backend.base_url, loaded.backend.base_url);
        assert_eq!(original.backend.timeout_secs, loaded.backend.timeout_secs);
        assert_eq!(original.export.file_name, loaded.export.file_name);
        assert_eq!(original.export.output_dir, loaded.export.output_dir);
        assert_eq!(original.export.geometry(), loaded.export.geometry());
        assert_eq!(original.conversation.greeting, loaded.conversation.greeting);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        assert_eq!(config.backend.base_url, BackendConfig::default().base_url);
        assert_eq!(config.export.file_name, "Clinical-Prep-Report.pdf");
    }

    #[test]
    fn default_export_geometry() {
        let geometry = AppConfig::default().export.geometry();
        assert_eq!(geometry.margin, 10.0);
        assert_eq!(geometry.page_width, 180.0);
        assert_eq!(geometry.line_height, 7.0);
        assert_eq!(geometry.page_height, 280.0);
        assert_eq!(geometry, PageGeometry::default());
    }

    #[test]
    fn invalid_geometry_falls_back_to_defaults() {
        let mut cfg = ExportConfig::default();
        cfg.margin = 290.0;
        assert!(!cfg.is_valid());
        assert_eq!(cfg.geometry(), PageGeometry::default());

        cfg = ExportConfig::default();
        cfg.line_height = 0.0;
        assert_eq!(cfg.geometry(), PageGeometry::default());

        cfg = ExportConfig::default();
        cfg.page_break = 400.0;
        assert!(!cfg.is_valid());
    }

    #[test]
    fn paginating_with_invalid_settings_keeps_lines_on_page() {
        use crate::report::{paginate, MonospaceWrapper};

        let mut cfg = ExportConfig::default();
        cfg.margin = 290.0;
        let geometry = cfg.geometry();
        let pages = paginate("a\nb\nc", &geometry, &MonospaceWrapper::default());
        for line in pages.iter().flat_map(|p| &p.lines) {
            assert!(line.y <= geometry.page_height, "y = {}", line.y);
        }
    }

    #[test]
    fn load_rejects_invalid_export_section() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("bad.toml");

        let mut cfg = AppConfig::default();
        cfg.backend.timeout_secs = 42;
        cfg.export.margin = 290.0;
        cfg.export.file_name = "intake.pdf".into();
        cfg.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");
        assert_eq!(loaded.backend.timeout_secs, 42);
        assert_eq!(loaded.export.margin, 10.0);
        assert_eq!(loaded.export.file_name, "intake.pdf");
        assert!(loaded.export.is_valid());
    }

    #[test]
    fn greeting_starts_the_backend_interview() {
        let cfg = ConversationConfig::default();
        assert!(cfg.greeting.to_lowercase().contains("to start, please type"));
    }

    #[test]
    fn output_path_uses_configured_dir() {
        let mut cfg = ExportConfig::default();
        cfg.output_dir = Some(PathBuf::from("/tmp/reports"));
        assert_eq!(
            cfg.output_path(),
            PathBuf::from("/tmp/reports/Clinical-Prep-Report.pdf")
        );
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.backend.base_url = "http://10.0.0.5:9000".into();
        cfg.backend.timeout_secs = 30;
        cfg.export.output_dir = Some(dir.path().to_path_buf());
        cfg.export.page_break = 250.0;
        cfg.conversation.speak_replies = true;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.backend.base_url, "http://10.0.0.5:9000");
        assert_eq!(loaded.backend.timeout_secs, 30);
        assert_eq!(loaded.export.output_dir, Some(dir.path().to_path_buf()));
        assert_eq!(loaded.export.page_break, 250.0);
        assert!(loaded.conversation.speak_replies);
    }
}
