//! Run configuration, built once at startup from the environment and the command line.
//!
//! Nothing below `main` reads the process environment: callers pass a lookup
//! function so tests can supply their own values. Every problem is collected and
//! returned together as a single `AppError::Validation`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::header::HeaderValue;
use reqwest::Url;

use crate::cli::CliArgs;
use crate::error::{AppError, AppResult};
use crate::resolver::ResolvePolicy;

pub const ENV_API_KEY: &str = "POSTMAN_API_KEY";
pub const ENV_WORKSPACE_ID: &str = "POSTMAN_WORKSPACE_ID";
pub const ENV_API_BASE: &str = "POSTMAN_API_BASE";
pub const ENV_TIMEOUT_SECS: &str = "POSTMAN_TIMEOUT_SECS";

pub const DEFAULT_API_BASE: &str = "https://api.getpostman.com";
pub const DEFAULT_FILENAME: &str = "default.json";

#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub workspace_id: String,
    pub base_url: Url,
    pub dest_dir: PathBuf,
    pub filename: String,
    /// Requested fork label; empty selects the root collection.
    pub branch: String,
    pub policy: ResolvePolicy,
    pub timeout: Option<Duration>,
}

impl Config {
    /// Build and validate. `env` returns the value of a variable, if set.
    pub fn from_sources<F>(args: &CliArgs, env: F) -> AppResult<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors: Vec<String> = Vec::new();
        let get = |name: &str| env(name).filter(|v| !v.is_empty());

        let api_key = get(ENV_API_KEY).unwrap_or_default();
        if api_key.is_empty() {
            errors.push(format!("env {} required", ENV_API_KEY));
        } else if HeaderValue::from_str(&api_key).is_err() {
            errors.push(format!("env {} contains characters not allowed in an HTTP header", ENV_API_KEY));
        }

        let workspace_id = get(ENV_WORKSPACE_ID).unwrap_or_default();
        if workspace_id.is_empty() {
            errors.push(format!("env {} required", ENV_WORKSPACE_ID));
        }

        let base_raw = get(ENV_API_BASE).unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let base_url = match Url::parse(&base_raw) {
            Ok(u) if u.scheme() == "http" || u.scheme() == "https" => Some(u),
            _ => {
                errors.push(format!("env {} must be an http(s) URL", ENV_API_BASE));
                None
            }
        };

        let timeout = match get(ENV_TIMEOUT_SECS) {
            None => None,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(n) if n > 0 => Some(Duration::from_secs(n)),
                _ => {
                    errors.push(format!("env {} must be a positive integer", ENV_TIMEOUT_SECS));
                    None
                }
            },
        };

        let dest_dir = match args.path.as_deref().filter(|p| !p.is_empty()) {
            None => {
                errors.push("path is required".to_string());
                PathBuf::new()
            }
            Some(p) => {
                let dir = PathBuf::from(p);
                if !is_dir_writable(&dir) {
                    errors.push(format!("path {} must be an existing directory writable by the current user", p));
                }
                dir
            }
        };

        let filename = args
            .filename
            .clone()
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string());
        if !is_plain_file_name(&filename) {
            errors.push(format!("filename {} must be a plain file name", filename));
        }

        let policy = match args.policy.as_deref() {
            None => ResolvePolicy::default(),
            Some(raw) => ResolvePolicy::parse(raw).unwrap_or_else(|| {
                errors.push(format!("unknown policy {} (expected short-circuit or full-scan)", raw));
                ResolvePolicy::default()
            }),
        };

        match base_url {
            Some(base_url) if errors.is_empty() => Ok(Config {
                api_key,
                workspace_id,
                base_url,
                dest_dir,
                filename,
                branch: args.branch.clone().unwrap_or_default(),
                policy,
                timeout,
            }),
            _ => Err(AppError::validation(errors)),
        }
    }

    pub fn destination(&self) -> PathBuf { self.dest_dir.join(&self.filename) }
}

// The API key never reaches logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("workspace_id", &self.workspace_id)
            .field("base_url", &self.base_url.as_str())
            .field("dest_dir", &self.dest_dir)
            .field("filename", &self.filename)
            .field("branch", &self.branch)
            .field("policy", &self.policy)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// True when `dir` is a directory in which the current user can create files.
pub fn is_dir_writable(dir: &Path) -> bool {
    if !dir.is_dir() {
        return false;
    }
    tempfile::NamedTempFile::new_in(dir).is_ok()
}

fn is_plain_file_name(name: &str) -> bool {
    name != "." && name != ".." && !name.contains('/') && !name.contains('\\')
}
