use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use rand::Rng;
use serde::Deserialize;
use tracing::info;

use crate::domain::pull_request::{PullRequestRef, RepositoryRef, Trigger};
use crate::error::{AppError, AppResult};

/// The parts of a webhook payload (`GITHUB_EVENT_PATH`) the labeler reads.
#[derive(Debug, Deserialize)]
pub struct EventPayload {
    pull_request: Option<PullRequestPayload>,
    repository: Option<RepositoryPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: u64,
}

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    name: String,
    owner: OwnerPayload,
}

#[derive(Debug, Deserialize)]
struct OwnerPayload {
    login: String,
}

impl EventPayload {
    pub fn read(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|err| {
            AppError::Event(format!("failed to read {}: {err}", path.display()))
        })?;
        Self::parse(&contents).map_err(|err| match err {
            AppError::Event(message) => {
                AppError::Event(format!("{}: {message}", path.display()))
            }
            other => other,
        })
    }

    pub fn parse(contents: &str) -> AppResult<Self> {
        serde_json::from_str(contents)
            .map_err(|err| AppError::Event(format!("invalid event payload: {err}")))
    }

    /// Classifies the event. Only payloads carrying a `pull_request` object
    /// count as pull-request runs; the repository falls back to `fallback_repo`
    /// (normally `GITHUB_REPOSITORY`) when the payload has none.
    pub fn into_trigger(
        self,
        event_name: Option<String>,
        fallback_repo: Option<&str>,
    ) -> AppResult<Trigger> {
        let Some(pull_request) = self.pull_request else {
            return Ok(Trigger::Other { event_name });
        };

        let repository = match (self.repository, fallback_repo) {
            (Some(repo), _) => RepositoryRef::new(repo.owner.login, repo.name),
            (None, Some(slug)) => RepositoryRef::parse(slug)?,
            (None, None) => {
                return Err(AppError::Event(
                    "payload has no repository and GITHUB_REPOSITORY is not set".to_string(),
                ));
            }
        };

        Ok(Trigger::PullRequest(PullRequestRef::new(
            repository,
            pull_request.number,
        )))
    }
}

/// Step outputs, appended to the `GITHUB_OUTPUT` file when the runner provides one.
pub struct StepOutputs {
    path: Option<PathBuf>,
}

impl StepOutputs {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn set(&self, name: &str, value: &str) -> AppResult<()> {
        info!("output {name}={value}");
        let Some(path) = &self.path else {
            return Ok(());
        };

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        if value.contains('\n') || value.contains('\r') {
            let delimiter = heredoc_delimiter(value);
            writeln!(file, "{name}<<{delimiter}\n{value}\n{delimiter}")?;
        } else {
            writeln!(file, "{name}={value}")?;
        }
        Ok(())
    }
}

/// Multiline outputs use the `name<<DELIM` form; the delimiter must not occur in the value.
fn heredoc_delimiter(value: &str) -> String {
    let mut rng = rand::thread_rng();
    loop {
        let delimiter = format!("ghadelimiter_{:016x}", rng.gen_range(0..u64::MAX));
        if !value.contains(&delimiter) {
            return delimiter;
        }
    }
}
