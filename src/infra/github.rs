use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder, Response, StatusCode, Url,
    header::{ACCEPT, AUTHORIZATION, USER_AGENT},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::domain::change::ChangedFile;
use crate::domain::label::Label;
use crate::domain::pull_request::{PullRequestRef, RepositoryRef};
use crate::error::{AppError, AppResult};
use crate::services::PullRequestHost;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const PER_PAGE: usize = 100;
// GitHub stops listing pull request files after 3000 entries.
const MAX_PAGES: u32 = 30;

pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(api_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into(),
            token,
        }
    }

    fn token(&self) -> AppResult<&str> {
        self.token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::Configuration("GitHub token not configured".to_string()))
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = Url::parse(&self.api_url).map_err(|err| {
            AppError::Configuration(format!("invalid API URL '{}': {err}", self.api_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                AppError::Configuration(format!("API URL '{}' cannot be a base", self.api_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> AppResult<RequestBuilder> {
        let token = self.token()?;
        Ok(request
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .header(
                USER_AGENT,
                concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),
            ))
    }

    async fn send(&self, request: RequestBuilder, action: &str) -> AppResult<Response> {
        self.authorized(request)?
            .send()
            .await
            .map_err(|err| AppError::Hosting(format!("failed to {action}: {err}")))
    }

    async fn get_paginated<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        action: &str,
    ) -> AppResult<Vec<T>> {
        let mut items = Vec::new();
        for page in 1..=MAX_PAGES {
            let mut url = self.endpoint(segments)?;
            url.query_pairs_mut()
                .append_pair("per_page", &PER_PAGE.to_string())
                .append_pair("page", &page.to_string());
            debug!(url = %url, "GET");

            let response = self.send(self.http.get(url), action).await?;
            let batch: Vec<T> = Self::handle_response(response, action).await?;
            let exhausted = batch.len() < PER_PAGE;
            items.extend(batch);
            if exhausted {
                break;
            }
        }
        Ok(items)
    }

    async fn handle_response<T: DeserializeOwned>(
        response: Response,
        action: &str,
    ) -> AppResult<T> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(|err| {
                AppError::Hosting(format!("failed to parse response to {action}: {err}"))
            });
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unable to read response>".to_string());
        if status == StatusCode::NOT_FOUND {
            Err(AppError::NotFound(format!("{action}: {body}")))
        } else {
            Err(AppError::Hosting(format!(
                "failed to {action}: GitHub responded with {status}: {body}"
            )))
        }
    }
}

#[async_trait]
impl PullRequestHost for GitHubClient {
    async fn list_changed_files(&self, pr: &PullRequestRef) -> AppResult<Vec<ChangedFile>> {
        let number = pr.number.to_string();
        self.get_paginated(
            &["repos", pr.owner(), pr.repo(), "pulls", &number, "files"],
            "list pull request files",
        )
        .await
    }

    async fn list_issue_labels(&self, pr: &PullRequestRef) -> AppResult<Vec<String>> {
        let number = pr.number.to_string();
        let labels: Vec<Label> = self
            .get_paginated(
                &["repos", pr.owner(), pr.repo(), "issues", &number, "labels"],
                "list pull request labels",
            )
            .await?;
        Ok(labels.into_iter().map(|label| label.name).collect())
    }

    async fn get_label(&self, repo: &RepositoryRef, name: &str) -> AppResult<Label> {
        let url = self.endpoint(&["repos", &repo.owner, &repo.name, "labels", name])?;
        debug!(url = %url, "GET");
        let action = format!("get label '{name}'");
        let response = self.send(self.http.get(url), &action).await?;
        Self::handle_response(response, &action).await
    }

    async fn create_label(&self, repo: &RepositoryRef, label: &Label) -> AppResult<Label> {
        let url = self.endpoint(&["repos", &repo.owner, &repo.name, "labels"])?;
        debug!(url = %url, name = %label.name, "POST");
        let action = format!("create label '{}'", label.name);
        let body = CreateLabelRequest {
            name: &label.name,
            color: &label.color,
            description: label.description.as_deref(),
        };
        let response = self.send(self.http.post(url).json(&body), &action).await?;
        Self::handle_response(response, &action).await
    }

    async fn add_labels(&self, pr: &PullRequestRef, labels: &[String]) -> AppResult<()> {
        let number = pr.number.to_string();
        let url = self.endpoint(&["repos", pr.owner(), pr.repo(), "issues", &number, "labels"])?;
        debug!(url = %url, count = labels.len(), "POST");
        let action = "add labels to pull request";
        let response = self
            .send(self.http.post(url).json(&AddLabelsRequest { labels }), action)
            .await?;
        let _attached: serde_json::Value = Self::handle_response(response, action).await?;
        Ok(())
    }
}

#[derive(Serialize)]
struct CreateLabelRequest<'a> {
    name: &'a str,
    color: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Serialize)]
struct AddLabelsRequest<'a> {
    labels: &'a [String],
}
