//! Collection listing for a workspace.

use tracing::debug;

use crate::client::ApiSession;
use crate::error::{AppError, AppResult};
use crate::model::{Collection, CollectionList};

/// One `GET /collections?workspace=<id>`, decoded in the order the API returned it.
pub async fn list_collections(session: &ApiSession, workspace_id: &str) -> AppResult<Vec<Collection>> {
    let body = session.get_bytes(&["collections"], &[("workspace", workspace_id)]).await?;
    let list = decode_listing(&body)?;
    debug!(workspace = workspace_id, count = list.len(), "listed collections");
    Ok(list)
}

pub fn decode_listing(body: &[u8]) -> AppResult<Vec<Collection>> {
    let list: CollectionList = serde_json::from_slice(body)
        .map_err(|e| AppError::decode("bad_listing", format!("unexpected collections listing: {}", e)))?;
    if let Some(pos) = list.collections.iter().position(|c| c.uid.is_empty()) {
        let c = &list.collections[pos];
        return Err(AppError::decode(
            "bad_listing",
            format!("collection #{} (id '{}', fork '{}') has an empty uid", pos, c.id, c.fork_label()),
        ));
    }
    Ok(list.collections)
}
