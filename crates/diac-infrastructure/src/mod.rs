//! # Infrastructure Layer
//!
//! Technical concerns around the compilation engine.
//!
//! ## Module Categories
//!
//! ### Storage
//! | Module | Description |
//! |--------|-------------|
//! | [`storage`] | File artifact store with exclusive writes |
//!
//! ### Configuration & Composition
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration: defaults, TOML, environment |
//! | [`bootstrap`] | Composition root |
//! | [`constants`] | Centralized file names and defaults |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;
pub mod storage;

pub use bootstrap::{AppContext, init_app};
pub use error_ext::ErrorContext;
pub use storage::FileArtifactStore;
