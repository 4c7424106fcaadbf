use tracing::debug;

use crate::client::ApiSession;
use crate::error::AppResult;

/// Fetch the full collection document for `uid`. The body is returned untouched.
pub async fn fetch_collection(session: &ApiSession, uid: &str) -> AppResult<Vec<u8>> {
    let bytes = session.get_bytes(&["collections", uid], &[]).await?;
    debug!(uid, bytes = bytes.len(), "fetched collection");
    Ok(bytes)
}
