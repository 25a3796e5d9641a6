use async_trait::async_trait;

use crate::domain::change::ChangedFile;
use crate::domain::label::Label;
use crate::domain::pull_request::{PullRequestRef, RepositoryRef};
use crate::error::AppResult;

/// The slice of a source-control host the labeler needs.
#[async_trait]
pub trait PullRequestHost: Send + Sync {
    /// Every file changed by the pull request, across all pages.
    async fn list_changed_files(&self, pr: &PullRequestRef) -> AppResult<Vec<ChangedFile>>;
    /// Names of the labels currently attached to the pull request.
    async fn list_issue_labels(&self, pr: &PullRequestRef) -> AppResult<Vec<String>>;
    /// Fails with [`AppError::NotFound`](crate::error::AppError::NotFound) when the
    /// repository has no label with that name.
    async fn get_label(&self, repo: &RepositoryRef, name: &str) -> AppResult<Label>;
    async fn create_label(&self, repo: &RepositoryRef, label: &Label) -> AppResult<Label>;
    async fn add_labels(&self, pr: &PullRequestRef, labels: &[String]) -> AppResult<()>;
}
