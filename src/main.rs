//! Application entry point — Clinical Prep terminal front-end.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk; on first run write the defaults out so
//!    they can be edited.
//! 3. Create [`tokio`] runtime.
//! 4. Build the HTTP transport and PDF exporter from config.
//! 5. Run the read-eval loop on stdin until `/quit` or EOF.
//!
//! # Commands
//!
//! | Input     | Action                                                   |
//! |-----------|----------------------------------------------------------|
//! | any text  | one user turn                                            |
//! | `/report` | generate the report, write the HTML fragment, print text |
//! | `/speak`  | read the current report aloud                            |
//! | `/export` | write `Clinical-Prep-Report.pdf`                         |
//! | `/quit`   | exit                                                     |

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use clinical_prep::{
    app::{Conversation, TurnOutcome},
    config::{AppConfig, AppPaths},
    export::PdfExporter,
    speech::{LogPlayback, SpeechPlayback},
    transport::{ChatTransport, HttpTransport, Role},
};

const HTML_FILE_NAME: &str = "Clinical-Prep-Report.html";

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Clinical Prep starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });
    let settings_file = AppPaths::new().settings_file;
    if !settings_file.exists() {
        match config.save() {
            Ok(()) => log::info!("Wrote default settings to {}", settings_file.display()),
            Err(e) => log::warn!("Could not write default settings: {e:#}"),
        }
    }

    // 3. Tokio runtime
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    rt.block_on(run(config))
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    // 4. Collaborators
    let transport: Arc<dyn ChatTransport> = Arc::new(HttpTransport::from_config(&config.backend));
    let exporter = PdfExporter::from_config(&config.export);
    let playback = LogPlayback;
    let export_path = config.export.output_path();

    let mut convo = Conversation::new(transport, config.conversation.greeting.clone());
    say(&config, &playback, &config.conversation.greeting);

    // 5. Read-eval loop
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" | "/exit" => break,
            "/report" => {
                println!("(generating report, this may take a few minutes)");
                match convo.request_report().await {
                    TurnOutcome::Report(rendered) => {
                        let html_path = export_path.with_file_name(HTML_FILE_NAME);
                        match write_html(&html_path, &rendered.html) {
                            Ok(()) => println!("report: {}", html_path.display()),
                            Err(e) => log::warn!("Could not write HTML report: {e:#}"),
                        }
                        println!("{}", rendered.speech_text);
                    }
                    TurnOutcome::Reply(text) => say(&config, &playback, &text),
                    TurnOutcome::Failed(e) => println!("error: {e}"),
                    TurnOutcome::Ignored => {}
                }
            }
            "/speak" => match convo.speak_report(&playback) {
                Ok(true) => {}
                Ok(false) => println!("No report yet. Type /report first."),
                Err(e) => println!("error: {e}"),
            },
            "/export" => match convo.export_report(&exporter, &export_path) {
                Ok(pages) => println!("exported {pages} page(s) to {}", export_path.display()),
                Err(e) => println!("error: {e}"),
            },
            text => match convo.submit_user_turn(text).await {
                TurnOutcome::Reply(reply) => say(&config, &playback, &reply),
                TurnOutcome::Failed(e) => println!("error: {e}"),
                TurnOutcome::Report(_) | TurnOutcome::Ignored => {}
            },
        }
        log::debug!("phase: {}", convo.phase().label());
    }

    log::info!("Clinical Prep shutting down");
    Ok(())
}

/// Print an assistant line and optionally read it aloud.
fn say(config: &AppConfig, playback: &dyn SpeechPlayback, text: &str) {
    println!("{}: {text}", Role::Assistant.label());
    if config.conversation.speak_replies {
        if let Err(e) = playback.speak(text) {
            log::warn!("Playback failed: {e}");
        }
    }
}

fn write_html(path: &Path, fragment: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, fragment)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
