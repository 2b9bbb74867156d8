use reelflow_core::error::CoreError;
use reelflow_core::policy::WorkflowPolicy;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT verification settings.
    pub jwt: JwtConfig,
    /// Business constants for the workflow engine.
    pub policy: WorkflowPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                          | Default                 |
    /// |----------------------------------|-------------------------|
    /// | `HOST`                           | `0.0.0.0`               |
    /// | `PORT`                           | `3000`                  |
    /// | `CORS_ORIGINS`                   | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`           | `30`                    |
    /// | `WORKFLOW_DISSOLUTION_THRESHOLD` | `4`                     |
    /// | `WORKFLOW_AUTO_APPROVE_TRUSTED`  | `true`                  |
    ///
    /// # Panics
    ///
    /// Panics on unparseable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let policy = parse_policy(
            std::env::var("WORKFLOW_DISSOLUTION_THRESHOLD").ok().as_deref(),
            std::env::var("WORKFLOW_AUTO_APPROVE_TRUSTED").ok().as_deref(),
        )
        .unwrap_or_else(|e| panic!("Invalid workflow policy: {e}"));

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            policy,
        }
    }
}

/// Build a [`WorkflowPolicy`] from optional raw overrides.
pub fn parse_policy(
    dissolution_threshold: Option<&str>,
    auto_approve_trusted: Option<&str>,
) -> Result<WorkflowPolicy, CoreError> {
    let mut policy = WorkflowPolicy::default();

    if let Some(raw) = dissolution_threshold {
        policy.dissolution_threshold = raw.trim().parse().map_err(|_| {
            CoreError::Validation(format!(
                "WORKFLOW_DISSOLUTION_THRESHOLD must be an integer, got '{raw}'"
            ))
        })?;
    }

    if let Some(raw) = auto_approve_trusted {
        policy.auto_approve_trusted = match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                return Err(CoreError::Validation(format!(
                    "WORKFLOW_AUTO_APPROVE_TRUSTED must be a boolean, got '{raw}'"
                )))
            }
        };
    }

    policy.validate()?;
    Ok(policy)
}
