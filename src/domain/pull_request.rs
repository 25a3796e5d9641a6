use std::fmt;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parses an `owner/name` slug such as `GITHUB_REPOSITORY`.
    pub fn parse(slug: &str) -> AppResult<Self> {
        match slug.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(owner, name))
            }
            _ => Err(AppError::Configuration(format!(
                "repository must look like 'owner/name', got '{slug}'"
            ))),
        }
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    pub repository: RepositoryRef,
    pub number: u64,
}

impl PullRequestRef {
    pub fn new(repository: RepositoryRef, number: u64) -> Self {
        Self { repository, number }
    }

    pub fn owner(&self) -> &str {
        &self.repository.owner
    }

    pub fn repo(&self) -> &str {
        &self.repository.name
    }
}

impl fmt::Display for PullRequestRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PR #{} in {}", self.number, self.repository)
    }
}

/// What started the run, as far as labeling is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    PullRequest(PullRequestRef),
    Other { event_name: Option<String> },
}
