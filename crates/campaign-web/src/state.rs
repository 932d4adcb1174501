//! Application state shared across handlers.

use std::sync::Arc;

use campaign_core::{CopyWriter, MessageDispatcher};
use database::Database;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection (message log).
    pub db: Database,
    /// Copy generator.
    pub writer: Arc<dyn CopyWriter>,
    /// Message dispatcher.
    pub dispatcher: Arc<dyn MessageDispatcher>,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        db: Database,
        writer: Arc<dyn CopyWriter>,
        dispatcher: Arc<dyn MessageDispatcher>,
    ) -> Self {
        Self {
            db,
            writer,
            dispatcher,
        }
    }
}
