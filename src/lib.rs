//! Clinical prep assistant — conversational intake front-end that renders
//! and exports the clinical prep report produced by the interview backend.

pub mod app;
pub mod config;
pub mod export;
pub mod report;
pub mod speech;
pub mod transport;
