//! Port for contact picture files.
//!
//! Unlike the repository, the picture store reports failures as domain
//! [`Error`](crate::domain::Error)s directly: the status class of an upload
//! or removal failure is part of the store contract.
//!
//! - Rejected extensions and write failures are `Forbidden`.
//! - Removal failures, including a missing file, are `InternalError`.

use async_trait::async_trait;

use crate::domain::{Outcome, PictureName, PictureUpload};

/// Message returned by a successful [`PictureStore::remove`].
pub const FILE_REMOVED_MESSAGE: &str = "File removed";

/// Port for writing and removing picture files.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PictureStore: Send + Sync {
    /// Validate the upload's extension and write it under a fresh unique
    /// name, returned with `Created`.
    async fn upload(&self, upload: PictureUpload) -> Outcome<PictureName>;

    /// Delete a stored picture, returning [`FILE_REMOVED_MESSAGE`] with `Ok`.
    async fn remove(&self, name: &PictureName) -> Outcome<String>;
}
