use crate::analysis::dispatcher::Dispatcher;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Owns the completion backend and the one-in-flight flag.
    pub dispatcher: Dispatcher,
    pub config: Config,
}
