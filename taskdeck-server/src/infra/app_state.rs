use std::{fmt, sync::Arc};

use taskdeck_config::Config;

use crate::infra::store::TaskStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TaskStore>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("tasks", &self.store.len())
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        Self::with_store(config, Arc::new(TaskStore::new()))
    }

    pub fn with_store(config: Arc<Config>, store: Arc<TaskStore>) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
