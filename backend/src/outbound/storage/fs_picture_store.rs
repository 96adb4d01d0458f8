//! Filesystem-backed `PictureStore` using capability-scoped directory access.
//!
//! All file operations go through a `cap_std` [`Dir`] handle opened on the
//! picture directory, so stored names can never resolve outside it. Writes go
//! to a hidden temporary file first and are renamed into place once synced,
//! so a failed upload never leaves a visible partial picture.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::ports::{FILE_REMOVED_MESSAGE, PictureStore};
use crate::domain::{Completed, Error, Outcome, PictureName, PictureStoreConfig, PictureUpload};

/// Errors raised while opening the picture directory.
#[derive(Debug, thiserror::Error)]
#[error("failed to open picture directory {path}: {source}")]
pub struct PictureDirectoryError {
    path: PathBuf,
    #[source]
    source: io::Error,
}

/// Picture store writing files into one directory.
#[derive(Debug, Clone)]
pub struct FsPictureStore {
    dir: Arc<Dir>,
    config: PictureStoreConfig,
}

impl FsPictureStore {
    /// Open the configured picture directory, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`PictureDirectoryError`] when the directory cannot be created
    /// or opened.
    pub fn open(config: PictureStoreConfig) -> Result<Self, PictureDirectoryError> {
        let path = config.picture_directory().clone();
        let wrap = |source| PictureDirectoryError {
            path: path.clone(),
            source,
        };
        Dir::create_ambient_dir_all(&path, ambient_authority()).map_err(wrap)?;
        let dir = Dir::open_ambient_dir(&path, ambient_authority()).map_err(wrap)?;
        debug!(path = %path.display(), "picture directory opened");
        Ok(Self {
            dir: Arc::new(dir),
            config,
        })
    }

    pub fn config(&self) -> &PictureStoreConfig {
        &self.config
    }
}

fn generate_name(extension: &str) -> Result<PictureName, Error> {
    let name = format!("{}.{extension}", Uuid::new_v4().simple());
    PictureName::new(name).map_err(|err| Error::forbidden(err.to_string()))
}

fn write_new_file(dir: &Dir, name: &PictureName, bytes: &[u8]) -> io::Result<()> {
    let tmp_name = format!(".{name}.tmp");
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(&tmp_name, &options)?;

    let written = file.write_all(bytes).and_then(|()| file.sync_all());
    drop(file);
    if let Err(err) = written.and_then(|()| dir.rename(&tmp_name, dir, name.as_str())) {
        drop(dir.remove_file(&tmp_name));
        return Err(err);
    }
    Ok(())
}

#[async_trait]
impl PictureStore for FsPictureStore {
    async fn upload(&self, upload: PictureUpload) -> Outcome<PictureName> {
        if !self.config.allows(upload.extension()) {
            debug!(extension = upload.extension(), "picture type rejected");
            return Err(Error::forbidden(self.config.invalid_type_message()));
        }

        let name = generate_name(upload.extension())?;
        let dir = Arc::clone(&self.dir);
        let target = name.clone();
        let result =
            tokio::task::spawn_blocking(move || write_new_file(&dir, &target, upload.bytes()))
                .await;

        match result {
            Ok(Ok(())) => {
                debug!(picture = %name, "picture stored");
                Ok(Completed::created(name))
            }
            Ok(Err(err)) => {
                warn!(picture = %name, error = %err, "picture write failed");
                Err(Error::forbidden(err.to_string()))
            }
            Err(err) => Err(Error::forbidden(format!("picture write aborted: {err}"))),
        }
    }

    async fn remove(&self, name: &PictureName) -> Outcome<String> {
        let dir = Arc::clone(&self.dir);
        let target = name.clone();
        let result = tokio::task::spawn_blocking(move || dir.remove_file(target.as_str())).await;

        match result {
            Ok(Ok(())) => {
                debug!(picture = %name, "picture removed");
                Ok(Completed::ok(FILE_REMOVED_MESSAGE.to_owned()))
            }
            Ok(Err(err)) => {
                warn!(picture = %name, error = %err, "picture removal failed");
                Err(Error::internal(err.to_string()))
            }
            Err(err) => Err(Error::internal(format!("picture removal aborted: {err}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, SuccessStatus};
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    struct Harness {
        _tmp: TempDir,
        root: PathBuf,
        store: FsPictureStore,
    }

    impl Harness {
        fn file_names(&self) -> Vec<String> {
            let mut names: Vec<String> = std::fs::read_dir(&self.root)
                .expect("read picture dir")
                .map(|entry| {
                    entry
                        .expect("dir entry")
                        .file_name()
                        .to_string_lossy()
                        .into_owned()
                })
                .collect();
            names.sort();
            names
        }
    }

    #[fixture]
    fn harness() -> Harness {
        let tmp = TempDir::new().expect("temp dir");
        let root = tmp.path().join("pictures");
        let store = FsPictureStore::open(PictureStoreConfig::new(&root, ["jpg", "jpeg", "png"]))
            .expect("open store");
        Harness {
            _tmp: tmp,
            root,
            store,
        }
    }

    #[rstest]
    fn open_creates_missing_directory(harness: Harness) {
        assert!(harness.root.is_dir());
    }

    #[rstest]
    #[case("jpg")]
    #[case("jpeg")]
    #[case("PNG")]
    #[tokio::test]
    async fn allowed_extensions_are_stored(harness: Harness, #[case] extension: &str) {
        let done = harness
            .store
            .upload(PictureUpload::new(extension, b"image-bytes".to_vec()))
            .await
            .expect("upload succeeds");

        assert_eq!(done.status(), SuccessStatus::Created);
        let name = done.into_payload();
        assert!(
            name.as_str()
                .ends_with(&format!(".{}", extension.to_ascii_lowercase()))
        );
        let stored = std::fs::read(harness.root.join(name.as_str())).expect("read picture");
        assert_eq!(stored, b"image-bytes");
        assert_eq!(harness.file_names(), vec![name.to_string()]);
    }

    #[rstest]
    #[case("gif")]
    #[case("exe")]
    #[case("")]
    #[tokio::test]
    async fn other_extensions_are_rejected_without_writing(
        harness: Harness,
        #[case] extension: &str,
    ) {
        let err = harness
            .store
            .upload(PictureUpload::new(extension, vec![1, 2, 3]))
            .await
            .expect_err("upload rejected");

        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(
            err.message(),
            "Invalid type, supported types are : jpg, jpeg, png"
        );
        assert!(harness.file_names().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn write_failure_is_forbidden(harness: Harness) {
        std::fs::remove_dir_all(&harness.root).expect("remove picture dir");

        let err = harness
            .store
            .upload(PictureUpload::new("png", vec![1, 2, 3]))
            .await
            .expect_err("directory is gone");

        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert!(!err.message().is_empty());
        assert!(!harness.root.exists(), "no partial file left behind");
    }

    #[rstest]
    #[tokio::test]
    async fn uploads_get_distinct_names(harness: Harness) {
        let first = harness
            .store
            .upload(PictureUpload::new("png", vec![1]))
            .await
            .expect("first upload")
            .into_payload();
        let second = harness
            .store
            .upload(PictureUpload::new("png", vec![2]))
            .await
            .expect("second upload")
            .into_payload();

        assert_ne!(first, second);
        assert_eq!(harness.file_names().len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn remove_deletes_existing_file(harness: Harness) {
        let name = harness
            .store
            .upload(PictureUpload::new("jpg", vec![9]))
            .await
            .expect("upload")
            .into_payload();

        let done = harness.store.remove(&name).await.expect("remove succeeds");

        assert_eq!(done.status(), SuccessStatus::Ok);
        assert_eq!(done.payload(), FILE_REMOVED_MESSAGE);
        assert!(harness.file_names().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn removing_missing_file_is_internal_error(harness: Harness) {
        let name = PictureName::new("missing.png").expect("valid name");

        let err = harness.store.remove(&name).await.expect_err("missing file");

        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(!err.message().is_empty());
    }
}
