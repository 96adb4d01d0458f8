//! File storage adapters.

mod fs_picture_store;

pub use fs_picture_store::{FsPictureStore, PictureDirectoryError};
