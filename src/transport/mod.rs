//! Chat and report transport.
//!
//! * [`ChatTransport`] — async trait over the interview backend.
//! * [`HttpTransport`] — JSON-over-HTTP implementation.
//! * [`ChatMessage`] / [`Role`] — role-tagged history turns.
//! * [`TransportError`] — error variants for backend calls.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use clinical_prep::config::AppConfig;
//! use clinical_prep::transport::{ChatMessage, ChatTransport, HttpTransport};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let transport = HttpTransport::from_config(&config.backend);
//!
//!     let history = vec![ChatMessage::user("hi")];
//!     let reply = transport.send_chat(&history).await.unwrap();
//!     println!("{reply}");
//! }
//! ```

pub mod client;
pub mod message;

pub use client::{ChatTransport, HttpTransport, TransportError};
pub use message::{ChatMessage, Role};
