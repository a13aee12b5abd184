//! services/web/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use std::sync::Arc;
use wishlist_core::ports::GameService;

/// The shared application state, created once at startup and passed to all
/// handlers. Per-request values (the visitor identity, game snapshots)
/// never live here.
#[derive(Clone)]
pub struct AppState {
    pub games: Arc<dyn GameService>,
    pub config: Arc<Config>,
}
