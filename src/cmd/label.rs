use std::path::PathBuf;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::pull_request::{PullRequestRef, RepositoryRef, Trigger};
use crate::error::{AppError, AppResult};
use crate::infra::actions::{EventPayload, StepOutputs};
use crate::workflow::label::{LabelOutcome, label_triggering_pull_request};

#[derive(Debug, Clone, Default)]
pub struct LabelCommandArgs {
    pub pull_request: Option<u64>,
    pub repository: Option<String>,
    pub event_path: Option<PathBuf>,
}

pub async fn run(ctx: &AppContext, args: LabelCommandArgs) -> AppResult<Option<LabelOutcome>> {
    let trigger = resolve_trigger(&ctx.config, &args)?;
    let outcome = label_triggering_pull_request(ctx, &trigger).await?;

    if let Some(outcome) = &outcome {
        let outputs = StepOutputs::new(ctx.config.output_path.clone());
        outputs.set("labels-added", &outcome.labels_added.join(","))?;
        outputs.set("directories", &outcome.directories.joined())?;
    }

    Ok(outcome)
}

/// An explicit `--pull-request` wins; otherwise the runner's event payload decides.
fn resolve_trigger(config: &AppConfig, args: &LabelCommandArgs) -> AppResult<Trigger> {
    let repository = args.repository.as_deref().or(config.repository.as_deref());

    if let Some(number) = args.pull_request {
        let slug = repository.ok_or_else(|| {
            AppError::Configuration(
                "--pull-request needs --repository or GITHUB_REPOSITORY".to_string(),
            )
        })?;
        return Ok(Trigger::PullRequest(PullRequestRef::new(
            RepositoryRef::parse(slug)?,
            number,
        )));
    }

    let event_path = args
        .event_path
        .as_ref()
        .or(config.event_path.as_ref())
        .ok_or_else(|| {
            AppError::Configuration(
                "GITHUB_EVENT_PATH not set; pass --pull-request to run outside Actions"
                    .to_string(),
            )
        })?;

    EventPayload::read(event_path)?.into_trigger(config.event_name.clone(), repository)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::infra::github::GitHubClient;

    fn config(vars: &[(&str, String)]) -> AppConfig {
        let vars = vars.to_vec();
        AppConfig::from_lookup(move |key| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.clone())
        })
    }

    #[test]
    fn explicit_pull_request_needs_a_repository() {
        let args = LabelCommandArgs {
            pull_request: Some(5),
            ..Default::default()
        };
        assert!(matches!(
            resolve_trigger(&config(&[]), &args),
            Err(AppError::Configuration(_))
        ));

        let cfg = config(&[("GITHUB_REPOSITORY", "octo-org/quiz-app".to_string())]);
        let trigger = resolve_trigger(&cfg, &args).unwrap();
        assert_eq!(
            trigger,
            Trigger::PullRequest(PullRequestRef::new(
                RepositoryRef::new("octo-org", "quiz-app"),
                5
            ))
        );
    }

    #[test]
    fn missing_event_path_is_a_configuration_error() {
        let result = resolve_trigger(&config(&[]), &LabelCommandArgs::default());
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn event_path_flag_overrides_environment() {
        let dir = tempfile::tempdir().unwrap();
        let event = dir.path().join("push.json");
        fs::write(&event, r#"{ "ref": "refs/heads/main" }"#).unwrap();
        let cfg = config(&[
            ("GITHUB_EVENT_PATH", "/nonexistent/event.json".to_string()),
            ("GITHUB_EVENT_NAME", "push".to_string()),
        ]);
        let args = LabelCommandArgs {
            event_path: Some(event),
            ..Default::default()
        };

        let trigger = resolve_trigger(&cfg, &args).unwrap();

        assert_eq!(
            trigger,
            Trigger::Other {
                event_name: Some("push".to_string())
            }
        );
    }

    #[tokio::test]
    async fn labels_pull_request_from_event_and_writes_outputs() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo-org/quiz-app/pulls/12/files"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "filename": "backend/config/index.js" },
                { "filename": "frontend/src/components/SocialShare.jsx" },
                { "filename": "README.md" }
            ])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octo-org/quiz-app/issues/12/labels"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "name": "backend", "color": "1d76db" }
            ])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/octo-org/quiz-app/labels/frontend"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/repos/octo-org/quiz-app/labels"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "name": "frontend",
                "color": "c5def5",
                "description": "Changes in frontend/ directory"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/repos/octo-org/quiz-app/issues/12/labels"))
            .and(body_json(json!({ "labels": ["frontend"] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "name": "backend", "color": "1d76db" },
                { "name": "frontend", "color": "c5def5" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let event = dir.path().join("event.json");
        let output = dir.path().join("output");
        fs::write(
            &event,
            json!({
                "action": "opened",
                "pull_request": { "number": 12 },
                "repository": { "name": "quiz-app", "owner": { "login": "octo-org" } }
            })
            .to_string(),
        )
        .unwrap();

        let cfg = config(&[
            ("GITHUB_TOKEN", "ghs_test".to_string()),
            ("GITHUB_API_URL", server.uri()),
            ("GITHUB_EVENT_NAME", "pull_request".to_string()),
            ("GITHUB_EVENT_PATH", event.display().to_string()),
            ("GITHUB_OUTPUT", output.display().to_string()),
        ]);
        let host = Arc::new(GitHubClient::new(cfg.api_url.clone(), cfg.token.clone()));
        let ctx = AppContext::new(cfg, host);

        let outcome = run(&ctx, LabelCommandArgs::default())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(outcome.labels_added, vec!["frontend"]);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "labels-added=frontend\ndirectories=backend,frontend\n"
        );
    }
}
