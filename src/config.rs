use std::env;
use std::path::PathBuf;

use crate::infra::github::DEFAULT_API_URL;

/// Token sources, in priority order. Actions exposes a `github-token` input as
/// `INPUT_GITHUB-TOKEN`; some runners normalise the dash.
const TOKEN_VARS: [&str; 3] = ["INPUT_GITHUB-TOKEN", "INPUT_GITHUB_TOKEN", "GITHUB_TOKEN"];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub token: Option<String>,
    pub api_url: String,
    pub repository: Option<String>,
    pub event_name: Option<String>,
    pub event_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            token: TOKEN_VARS.iter().find_map(|key| get(*key)),
            api_url: get("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            repository: get("GITHUB_REPOSITORY"),
            event_name: get("GITHUB_EVENT_NAME"),
            event_path: get("GITHUB_EVENT_PATH").map(PathBuf::from),
            output_path: get("GITHUB_OUTPUT").map(PathBuf::from),
        }
    }
}
