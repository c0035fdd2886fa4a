//! Artifact storage
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`file_store`] | JSON files in a cache directory |
//! | [`lock`] | Exclusive lock + temp file + rename writes |

pub mod file_store;
pub mod lock;

pub use file_store::FileArtifactStore;
pub use lock::{ArtifactLock, write_exclusive};
