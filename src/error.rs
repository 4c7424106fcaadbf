//! Unified error model for the pull pipeline.
//! Every stage (validation, transport, decode, resolution, write) reports through
//! `AppError`, and the binary maps each kind to a process exit status.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Error)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppError {
    /// One or more configuration problems, collected before any network call.
    #[error("{code}: {}", .messages.join("; "))]
    Validation { code: String, messages: Vec<String> },
    #[error("{code}: {message}")]
    Transport { code: String, message: String },
    #[error("{code}: {message}")]
    Decode { code: String, message: String },
    #[error("{code}: {message}")]
    Resolution { code: String, message: String },
    #[error("{code}: {message}")]
    Write { code: String, message: String },
}

impl AppError {
    pub fn code_str(&self) -> &str {
        match self {
            AppError::Validation { code, .. }
            | AppError::Transport { code, .. }
            | AppError::Decode { code, .. }
            | AppError::Resolution { code, .. }
            | AppError::Write { code, .. } => code.as_str(),
        }
    }

    /// Human readable message. Validation errors are joined one per line.
    pub fn message(&self) -> String {
        match self {
            AppError::Validation { messages, .. } => messages.join("\n"),
            AppError::Transport { message, .. }
            | AppError::Decode { message, .. }
            | AppError::Resolution { message, .. }
            | AppError::Write { message, .. } => message.clone(),
        }
    }

    pub fn validation(messages: Vec<String>) -> Self { AppError::Validation { code: "invalid_config".into(), messages } }
    pub fn transport(code: impl Into<String>, msg: impl Into<String>) -> Self { AppError::Transport { code: code.into(), message: msg.into() } }
    pub fn decode(code: impl Into<String>, msg: impl Into<String>) -> Self { AppError::Decode { code: code.into(), message: msg.into() } }
    pub fn resolution(code: impl Into<String>, msg: impl Into<String>) -> Self { AppError::Resolution { code: code.into(), message: msg.into() } }
    pub fn write(code: impl Into<String>, msg: impl Into<String>) -> Self { AppError::Write { code: code.into(), message: msg.into() } }

    /// Map to process exit status. All kinds are terminal and non-zero.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Validation { .. } => 1,
            AppError::Transport { .. } => 3,
            AppError::Decode { .. } => 4,
            AppError::Resolution { .. } => 5,
            AppError::Write { .. } => 6,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let code = if err.is_timeout() {
            "timeout"
        } else if err.is_connect() {
            "connect_failed"
        } else if err.is_status() {
            "http_status"
        } else {
            "request_failed"
        };
        AppError::Transport { code: code.into(), message: err.to_string() }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
