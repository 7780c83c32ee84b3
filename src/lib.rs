//! # FileBrowser Core
//!
//! Sandboxed file service core: a constrained view of a single home
//! directory with listing, search, upload, download, create, move and
//! delete. Every caller-supplied path is confined to the home directory
//! subtree; no operation can escape it.
//!
//! The crate deliberately ends at the domain boundary. HTTP routing,
//! request parsing, status-code mapping, multipart handling and UI serving
//! belong to the embedding service, which consumes this core through
//! [`FileBrowser`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use filebrowser::{FileBrowser, SearchQuery};
//!
//! fn main() -> anyhow::Result<()> {
//!     let browser = FileBrowser::new("/srv/files")?;
//!
//!     let listing = browser.list_directory("documents");
//!     println!("{} files, {} bytes", listing.file_count, listing.total_size);
//!
//!     let query = SearchQuery::new("report")?.match_contents(true);
//!     for entry in browser.search(&query) {
//!         println!("{}", entry.path());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`config`]: TOML configuration loading, env overrides and validation
//! - [`error`]: the operation error taxonomy
//! - [`fs`]: path confinement, listing, search and mutations
//! - [`logging`]: tracing subscriber setup for embedders
//! - [`service`]: the [`FileBrowser`] facade
//! - [`types`]: request-scoped value objects

pub mod config;
pub mod error;
pub mod fs;
pub mod logging;
pub mod service;
pub mod types;

// Re-export config types for convenience
pub use config::{Config, ConfigError};

// Re-export error types for convenience
pub use error::{Error, Result};

// Re-export core components for convenience
pub use fs::{
    DirectoryLister, FileOperations, PathResolver, SearchEngine, SearchOptions,
    DEFAULT_TEXT_EXTENSIONS,
};

// Re-export the facade
pub use service::FileBrowser;

// Re-export value objects for convenience
pub use types::{
    DirectoryListing, FileSystemEntry, HomeDirectoryStatus, SearchQuery, UploadOutcome,
    DEFAULT_MAX_RESULTS,
};
