use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::PullRequestHost;

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub host: Arc<dyn PullRequestHost>,
}

impl AppContext {
    pub fn new(config: AppConfig, host: Arc<dyn PullRequestHost>) -> Self {
        Self { config, host }
    }
}
