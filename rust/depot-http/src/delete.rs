use async_trait::async_trait;
use depot_storage::{Key, Storage};

use crate::{DepotHttpError, Request, Response, Slice};

/// Deletes the value addressed by the request path.
///
/// The percent-decoded path is normalized into a [Key]; if storage holds no
/// value for it the response is `404 Not Found`, otherwise the value is
/// deleted and the response is `204 No Content`. No locking happens between the existence
/// check and the delete: if the value disappears in between, the storage's own
/// not-found failure propagates as `Err`.
#[derive(Clone, Debug)]
pub struct SliceDelete<S> {
    storage: S,
}

impl<S> SliceDelete<S>
where
    S: Storage,
{
    /// Delete values from `storage`
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<S> Slice for SliceDelete<S>
where
    S: Storage,
{
    async fn response(&self, request: Request) -> Result<Response, DepotHttpError> {
        let key = Key::from_path(&request.request_line()?.decoded_path()?);

        if !self.storage.exists(&key).await? {
            tracing::debug!(%key, "Nothing to delete");
            return Ok(Response::not_found());
        }

        self.storage.delete(&key).await?;
        tracing::debug!(%key, "Deleted");
        Ok(Response::no_content())
    }
}
