//! Token resolution and client construction
//!
//! Resolves a GitHub token for a host and builds an authenticated
//! `OctocrabClient` for it (github.com or GitHub Enterprise).

use crate::{OctocrabClient, DEFAULT_HOST};
use anyhow::{Context, Result};
use log::{debug, info};
use octocrab::Octocrab;
use std::sync::Arc;

/// Resolves GitHub tokens for different hosts
///
/// Tries multiple sources in order:
/// 1. Host-specific env var (e.g., `GITHUB_TOKEN_GHE_EXAMPLE_COM`)
/// 2. `gh auth token --hostname {host}` command
/// 3. Generic `GITHUB_TOKEN` or `GH_TOKEN` (github.com only)
#[derive(Debug, Clone)]
pub struct TokenResolver {
    /// Cached default token from GITHUB_TOKEN/GH_TOKEN
    default_token: Option<String>,
}

impl Default for TokenResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenResolver {
    /// Create a new token resolver
    pub fn new() -> Self {
        let default_token = std::env::var("GITHUB_TOKEN")
            .or_else(|_| std::env::var("GH_TOKEN"))
            .ok();

        Self { default_token }
    }

    /// Get a token for the given host (None = github.com)
    pub async fn get_token(&self, host: Option<&str>) -> Result<String> {
        let host = host.unwrap_or(DEFAULT_HOST);

        let env_key = host_env_key(host);
        if let Ok(token) = std::env::var(&env_key) {
            debug!("Using token from env var {} for host {}", env_key, host);
            return Ok(token);
        }

        debug!("Trying gh auth token for host {}", host);
        match tokio::process::Command::new("gh")
            .args(["auth", "token", "--hostname", host])
            .output()
            .await
        {
            Ok(output) if output.status.success() => {
                let token = String::from_utf8(output.stdout)
                    .context("Invalid UTF-8 in gh auth token output")?
                    .trim()
                    .to_string();
                if !token.is_empty() {
                    debug!("Using token from gh CLI for host {}", host);
                    return Ok(token);
                }
            }
            Ok(_) => debug!("gh auth token returned a failure status"),
            Err(e) => debug!("Could not run gh CLI: {}", e),
        }

        if host == DEFAULT_HOST {
            if let Some(ref token) = self.default_token {
                debug!("Using default token (GITHUB_TOKEN/GH_TOKEN) for github.com");
                return Ok(token.clone());
            }
        }

        Err(anyhow::anyhow!(
            "No token found for host '{}'. \
             Set {} or run 'gh auth login --hostname {}'",
            host,
            env_key,
            host
        ))
    }
}

/// Environment variable holding a host-specific token
fn host_env_key(host: &str) -> String {
    format!(
        "GITHUB_TOKEN_{}",
        host.replace(['.', '-'], "_").to_uppercase()
    )
}

/// API base URL for a host
pub fn api_base_url(host: Option<&str>) -> String {
    match host {
        Some(h) if h != DEFAULT_HOST && !h.is_empty() => format!("https://{}/api/v3", h),
        _ => "https://api.github.com".to_string(),
    }
}

/// Build an authenticated client for the given host
pub async fn connect(tokens: &TokenResolver, host: Option<&str>) -> Result<OctocrabClient> {
    let effective_host = host.unwrap_or(DEFAULT_HOST);
    info!("Creating GitHub client for host: {}", effective_host);

    let token = tokens.get_token(host).await?;

    let mut builder = Octocrab::builder().personal_token(token);
    if host.is_some_and(|h| h != DEFAULT_HOST && !h.is_empty()) {
        builder = builder
            .base_uri(api_base_url(host))
            .context("Failed to set base URI")?;
    }

    let octocrab = builder.build().context("Failed to build Octocrab client")?;
    info!("GitHub client created for host: {}", effective_host);
    Ok(OctocrabClient::new(Arc::new(octocrab)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_env_key_generation() {
        let hosts = [
            ("github.com", "GITHUB_TOKEN_GITHUB_COM"),
            ("ghe.example.com", "GITHUB_TOKEN_GHE_EXAMPLE_COM"),
            (
                "github-enterprise.corp.com",
                "GITHUB_TOKEN_GITHUB_ENTERPRISE_CORP_COM",
            ),
        ];

        for (host, expected_key) in hosts {
            assert_eq!(
                host_env_key(host),
                expected_key,
                "Host '{}' should produce key '{}'",
                host,
                expected_key
            );
        }
    }

    #[test]
    fn test_api_base_url() {
        assert_eq!(api_base_url(None), "https://api.github.com");
        assert_eq!(api_base_url(Some("github.com")), "https://api.github.com");
        assert_eq!(api_base_url(Some("")), "https://api.github.com");
        assert_eq!(
            api_base_url(Some("ghe.example.com")),
            "https://ghe.example.com/api/v3"
        );
    }
}
