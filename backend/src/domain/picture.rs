//! Contact picture values: stored file names, uploads, and store settings.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Maximum length of a stored picture file name.
pub const PICTURE_NAME_MAX: usize = 255;

/// Extensions accepted when no allow-list is configured.
pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Directory used when none is configured.
pub const DEFAULT_PICTURE_DIRECTORY: &str = "uploads/pictures";

/// Validation errors raised by [`PictureName::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PictureValidationError {
    #[error("picture name must not be empty")]
    EmptyName,
    #[error("picture name must be at most {max} characters")]
    NameTooLong { max: usize },
    /// Path separators, `..`, NUL bytes, or a leading dot.
    #[error("picture name must be a single plain file name")]
    InvalidName,
}

/// File name of a picture written by the picture store.
///
/// The name is always a single path component so it can be opened relative
/// to the picture directory without escaping it.
///
/// # Examples
/// ```
/// use address_book::domain::PictureName;
///
/// assert!(PictureName::new("3f2a.png").is_ok());
/// assert!(PictureName::new("../etc/passwd").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PictureName(String);

impl PictureName {
    pub fn new(name: impl Into<String>) -> Result<Self, PictureValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(PictureValidationError::EmptyName);
        }
        if name.chars().count() > PICTURE_NAME_MAX {
            return Err(PictureValidationError::NameTooLong {
                max: PICTURE_NAME_MAX,
            });
        }
        if name.starts_with('.') || name.contains(['/', '\\', '\0']) {
            return Err(PictureValidationError::InvalidName);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PictureName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PictureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PictureName> for String {
    fn from(value: PictureName) -> Self {
        value.0
    }
}

impl TryFrom<String> for PictureName {
    type Error = PictureValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// An uploaded picture awaiting storage.
#[derive(Clone, PartialEq, Eq)]
pub struct PictureUpload {
    extension: String,
    bytes: Vec<u8>,
}

impl PictureUpload {
    /// Wrap uploaded bytes with their claimed extension.
    ///
    /// The extension is trimmed, stripped of a leading `.`, and lowercased so
    /// `".PNG"` and `"png"` compare equal against the allow-list.
    pub fn new(extension: impl AsRef<str>, bytes: Vec<u8>) -> Self {
        let extension = extension.as_ref().trim();
        let extension = extension.strip_prefix('.').unwrap_or(extension);
        Self {
            extension: extension.to_ascii_lowercase(),
            bytes,
        }
    }

    pub fn extension(&self) -> &str {
        self.extension.as_str()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for PictureUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PictureUpload")
            .field("extension", &self.extension)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Where pictures are stored and which extensions are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureStoreConfig {
    picture_directory: PathBuf,
    allowed_extensions: Vec<String>,
}

impl PictureStoreConfig {
    /// Build a config, normalising each extension the way uploads are.
    ///
    /// Configured order is kept for messages. Blank and repeated entries are
    /// dropped; an allow-list that ends up empty falls back to
    /// [`DEFAULT_ALLOWED_EXTENSIONS`].
    pub fn new<I, S>(picture_directory: impl Into<PathBuf>, allowed_extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut allowed: Vec<String> = Vec::new();
        for ext in allowed_extensions {
            let ext = PictureUpload::new(ext, Vec::new()).extension;
            if !ext.is_empty() && !allowed.contains(&ext) {
                allowed.push(ext);
            }
        }
        if allowed.is_empty() {
            allowed = default_extensions();
        }
        Self {
            picture_directory: picture_directory.into(),
            allowed_extensions: allowed,
        }
    }

    pub fn picture_directory(&self) -> &PathBuf {
        &self.picture_directory
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    pub fn allows(&self, extension: &str) -> bool {
        self.allowed_extensions.iter().any(|ext| ext == extension)
    }

    /// Message returned when an upload uses an extension outside the list.
    pub fn invalid_type_message(&self) -> String {
        let joined = self
            .allowed_extensions
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        format!("Invalid type, supported types are : {joined}")
    }
}

impl Default for PictureStoreConfig {
    fn default() -> Self {
        Self {
            picture_directory: PathBuf::from(DEFAULT_PICTURE_DIRECTORY),
            allowed_extensions: default_extensions(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    DEFAULT_ALLOWED_EXTENSIONS
        .iter()
        .map(|ext| (*ext).to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", PictureValidationError::EmptyName)]
    #[case(".hidden.png", PictureValidationError::InvalidName)]
    #[case("../up.png", PictureValidationError::InvalidName)]
    #[case("dir/pic.png", PictureValidationError::InvalidName)]
    #[case("dir\\pic.png", PictureValidationError::InvalidName)]
    fn invalid_picture_names_are_rejected(
        #[case] name: &str,
        #[case] expected: PictureValidationError,
    ) {
        assert_eq!(PictureName::new(name), Err(expected));
    }

    #[rstest]
    fn overlong_picture_names_are_rejected() {
        let name = format!("{}.png", "a".repeat(PICTURE_NAME_MAX));
        assert_eq!(
            PictureName::new(name),
            Err(PictureValidationError::NameTooLong {
                max: PICTURE_NAME_MAX
            })
        );
    }

    #[rstest]
    #[case(PictureValidationError::EmptyName, "picture name must not be empty")]
    #[case(
        PictureValidationError::NameTooLong { max: 8 },
        "picture name must be at most 8 characters"
    )]
    fn validation_errors_render_messages(
        #[case] err: PictureValidationError,
        #[case] expected: &str,
    ) {
        assert_eq!(err.to_string(), expected);
    }

    #[rstest]
    #[case("png", "png")]
    #[case(".PNG", "png")]
    #[case("  Jpeg ", "jpeg")]
    fn upload_extension_is_normalised(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(PictureUpload::new(raw, vec![1]).extension(), expected);
    }

    #[rstest]
    fn default_config_lists_extensions_in_order() {
        let config = PictureStoreConfig::default();
        assert_eq!(
            config.invalid_type_message(),
            "Invalid type, supported types are : jpg, jpeg, png"
        );
    }

    #[rstest]
    fn config_normalises_and_falls_back() {
        let config = PictureStoreConfig::new("pics", [" .GIF", "webp", "gif"]);
        assert_eq!(config.allowed_extensions(), ["gif", "webp"]);
        assert!(config.allows("gif"));
        assert!(config.allows("webp"));
        assert!(!config.allows("png"));

        let empty = PictureStoreConfig::new("pics", ["", "  "]);
        assert_eq!(empty.allowed_extensions(), default_extensions().as_slice());
    }
}
