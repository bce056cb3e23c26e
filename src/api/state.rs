//! Application state for the earnings engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::ledger::Ledger;
use crate::store::RecordStore;

/// Shared application state.
///
/// Holds the ledger every handler works against.
#[derive(Clone)]
pub struct AppState {
    /// Session and holiday operations.
    ledger: Arc<Ledger>,
}

impl AppState {
    /// Creates the state, building a ledger over `store` with the loaded rules.
    pub fn new(config: ConfigLoader, store: Arc<dyn RecordStore>) -> Self {
        Self {
            ledger: Arc::new(Ledger::new(store, config.config())),
        }
    }

    /// Returns the shared ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}
