use tracing::info;

use crate::context::AppContext;
use crate::domain::change::ChangedFile;
use crate::domain::directory::{DirectorySet, derive_directories};
use crate::domain::label::Label;
use crate::domain::pull_request::{PullRequestRef, Trigger};
use crate::error::{AppError, AppResult};
use crate::services::PullRequestHost;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelOutcome {
    pub directories: DirectorySet,
    pub labels_added: Vec<String>,
}

/// Labels the pull request behind `trigger`. Returns `None`, without touching
/// the hosting API, when the run was not started by a pull request.
pub async fn label_triggering_pull_request(
    ctx: &AppContext,
    trigger: &Trigger,
) -> AppResult<Option<LabelOutcome>> {
    let pr = match trigger {
        Trigger::PullRequest(pr) => pr,
        Trigger::Other { event_name } => {
            info!(
                "This action only runs on pull requests (event: {})",
                event_name.as_deref().unwrap_or("unknown")
            );
            return Ok(None);
        }
    };

    info!("Processing {pr}");
    let files = ctx.host.list_changed_files(pr).await?;
    info!("Found {} changed files", files.len());

    label_pull_request(ctx.host.as_ref(), pr, &files)
        .await
        .map(Some)
}

pub async fn label_pull_request(
    host: &dyn PullRequestHost,
    pr: &PullRequestRef,
    files: &[ChangedFile],
) -> AppResult<LabelOutcome> {
    let directories = derive_directories(files);
    if directories.is_empty() {
        info!("No files below a top-level directory; nothing to label");
        return Ok(LabelOutcome {
            directories,
            labels_added: Vec::new(),
        });
    }
    info!("Top-level directories affected: {}", directories.joined());

    let existing = host.list_issue_labels(pr).await?;
    info!("Existing labels: {}", existing.join(", "));

    let labels_added = directories.missing_from(existing.iter().map(String::as_str));
    if labels_added.is_empty() {
        info!("No new labels to add");
        return Ok(LabelOutcome {
            directories,
            labels_added,
        });
    }

    for name in &labels_added {
        ensure_label(host, pr, name).await?;
    }

    host.add_labels(pr, &labels_added).await?;
    info!("Added labels: {}", labels_added.join(", "));

    Ok(LabelOutcome {
        directories,
        labels_added,
    })
}

/// Makes sure the repository has a label called `name`, creating it when the
/// lookup reports it missing.
async fn ensure_label(
    host: &dyn PullRequestHost,
    pr: &PullRequestRef,
    name: &str,
) -> AppResult<()> {
    match host.get_label(&pr.repository, name).await {
        Ok(_) => {
            info!("Label '{name}' already exists");
            Ok(())
        }
        Err(AppError::NotFound(_)) => {
            let created = host
                .create_label(&pr.repository, &Label::for_directory(name))
                .await?;
            info!("Created new label '{}' (#{})", created.name, created.color);
            Ok(())
        }
        Err(err) => Err(err),
    }
}
