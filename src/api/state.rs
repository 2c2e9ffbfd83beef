use std::sync::Arc;

use super::router::MovieRouter;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub router: Arc<MovieRouter>,
}

impl AppState {
    pub fn new(config: Config, router: Arc<MovieRouter>) -> Self {
        Self {
            config: Arc::new(config),
            router,
        }
    }
}
