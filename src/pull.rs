//! One pull: list the workspace, resolve the fork, fetch the document, write it.
//! Each step runs only if the previous one succeeded.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::client::ApiSession;
use crate::config::Config;
use crate::error::AppResult;
use crate::fetcher::fetch_collection;
use crate::lister::list_collections;
use crate::resolver::{resolve_with, Resolution, STAGING_LABEL};
use crate::writer::write_atomic;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullReport {
    pub resolution: Resolution,
    pub destination: PathBuf,
    pub bytes: usize,
}

impl PullReport {
    pub fn uid(&self) -> &str { self.resolution.uid() }
}

pub async fn pull(config: &Config) -> AppResult<PullReport> {
    let session = ApiSession::connect(config)?;
    info!(
        target: "forkpull",
        "pulling branch '{}' from workspace {} via {} (policy {})",
        config.branch, config.workspace_id, session.base(), config.policy.as_str()
    );

    let collections = list_collections(&session, &config.workspace_id).await?;
    let resolution = resolve_with(&collections, &config.branch, config.policy)?;
    if let Resolution::StagingFallback(uid) = &resolution {
        warn!("no collection forked as '{}'; falling back to {} fork {}", config.branch, STAGING_LABEL, uid);
    }

    let data = fetch_collection(&session, resolution.uid()).await?;
    let destination = config.destination();
    write_atomic(&destination, &data)?;
    info!(target: "forkpull", uid = resolution.uid(), bytes = data.len(), path = %destination.display(), "collection written");

    Ok(PullReport { resolution, destination, bytes: data.len() })
}
