//! Sandboxed filesystem core: resolution, listing, search and mutation.
//!
//! Every component here funnels caller-supplied paths through
//! [`PathResolver`] before touching the filesystem, so no operation can
//! reach outside the configured home directory.

pub mod listing;
pub mod ops;
pub mod resolver;
pub mod search;

pub use listing::DirectoryLister;
pub use ops::{FileOperations, COPY_BUFFER_SIZE};
pub use resolver::PathResolver;
pub use search::{SearchEngine, SearchOptions, DEFAULT_TEXT_EXTENSIONS};
