//! Fork resolution: pick one collection uid out of a workspace listing.
//!
//! An entry whose fork label equals the requested fork wins. When none does, the
//! entry labelled `staging` is used instead. Scan order matters: with the default
//! policy the first exact match ends the scan.

use crate::error::{AppError, AppResult};
use crate::model::Collection;

/// Fork label used when the requested fork has no collection of its own.
pub const STAGING_LABEL: &str = "staging";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResolvePolicy {
    /// Stop at the first exact match.
    #[default]
    ShortCircuit,
    /// Scan everything; the last exact match wins, else the last staging entry.
    FullScan,
}

impl ResolvePolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "short-circuit" | "short_circuit" | "first" => Some(ResolvePolicy::ShortCircuit),
            "full-scan" | "full_scan" | "last" => Some(ResolvePolicy::FullScan),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResolvePolicy::ShortCircuit => "short-circuit",
            ResolvePolicy::FullScan => "full-scan",
        }
    }
}

/// How a uid was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Exact(String),
    StagingFallback(String),
}

impl Resolution {
    pub fn uid(&self) -> &str {
        match self {
            Resolution::Exact(uid) | Resolution::StagingFallback(uid) => uid,
        }
    }

    pub fn into_uid(self) -> String {
        match self {
            Resolution::Exact(uid) | Resolution::StagingFallback(uid) => uid,
        }
    }
}

/// Resolve `requested_fork` with the default short-circuit policy.
pub fn resolve(collections: &[Collection], requested_fork: &str) -> AppResult<String> {
    resolve_with(collections, requested_fork, ResolvePolicy::ShortCircuit).map(Resolution::into_uid)
}

pub fn resolve_with(collections: &[Collection], requested_fork: &str, policy: ResolvePolicy) -> AppResult<Resolution> {
    let mut exact: Option<&str> = None;
    let mut staging: Option<&str> = None;

    for c in collections {
        // an entry without a uid cannot be fetched
        if c.uid.is_empty() {
            continue;
        }
        let label = c.fork_label();
        if label == requested_fork {
            exact = Some(c.uid.as_str());
            if policy == ResolvePolicy::ShortCircuit {
                break;
            }
        } else if label == STAGING_LABEL {
            staging = Some(c.uid.as_str());
        }
    }

    match (exact, staging) {
        (Some(uid), _) => Ok(Resolution::Exact(uid.to_string())),
        (None, Some(uid)) => Ok(Resolution::StagingFallback(uid.to_string())),
        (None, None) => Err(AppError::resolution("collection_not_found", "collection not found")),
    }
}
