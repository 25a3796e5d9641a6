use std::path::Path;

use clap::{Args, Subcommand};

use crate::config::AppConfig;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the resolved configuration (token masked).
    Show,
}

pub fn run(command: ConfigCommand, config: &AppConfig) -> Vec<String> {
    match command {
        ConfigCommand::Show => show_lines(config),
    }
}

fn show_lines(config: &AppConfig) -> Vec<String> {
    vec![
        format!("GitHub token: {}", mask_secret(&config.token)),
        format!("API URL: {}", config.api_url),
        format!("Repository: {}", display_value(&config.repository)),
        format!("Event name: {}", display_value(&config.event_name)),
        format!("Event payload: {}", display_path(config.event_path.as_deref())),
        format!("Outputs file: {}", display_path(config.output_path.as_deref())),
    ]
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn display_path(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.len() > 8 && token.is_ascii() => {
            let prefix = &token[..4];
            let suffix = &token[token.len() - 3..];
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_tokens() {
        assert_eq!(
            mask_secret(&Some("ghs_abcdefghijklmnop".to_string())),
            "ghs_***nop"
        );
        assert_eq!(mask_secret(&Some("short".to_string())), "***");
        assert_eq!(mask_secret(&None), "<not set>");
    }

    #[test]
    fn show_never_prints_the_raw_token() {
        let config = AppConfig::from_lookup(|key| match key {
            "GITHUB_TOKEN" => Some("ghs_supersecretvalue".to_string()),
            "GITHUB_REPOSITORY" => Some("octo-org/quiz-app".to_string()),
            _ => None,
        });

        let lines = run(ConfigCommand::Show, &config);

        assert!(lines.iter().all(|line| !line.contains("supersecret")));
        assert!(lines.contains(&"Repository: octo-org/quiz-app".to_string()));
        assert!(lines.contains(&"Event payload: <not set>".to_string()));
    }
}
