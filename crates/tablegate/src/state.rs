use std::sync::Arc;

use tablegate_core::storage::TableStore;

use crate::config::Config;

/// Per-process state shared by every invocation: the store backend and the
/// resolved configuration. Request-scoped data (table name, batch queue,
/// response accumulator) lives on the handler call, never here.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TableStore>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn TableStore>, config: Config) -> Self {
        Self { store, config }
    }
}
