//! A small HTTP service relaying signup form submissions to the Subscriber API
//! of an email-marketing service and answering with a uniform JSON envelope.

pub mod app;
pub mod config;
mod error;
pub mod subscriber_client;
pub mod web;

pub use app::{App, AppState};
pub use error::{Error, Result};
pub use subscriber_client::SubscriberClient;
pub use web::serve::serve;

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "signup_relay=debug,tower_http=info,info";

/// Pretty, colored output for local development. Honors `RUST_LOG`.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(env_filter())
        .pretty()
        .init();
}

/// Compact output without ANSI colors for production. Honors `RUST_LOG`.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(env_filter())
        .compact()
        .init();
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
