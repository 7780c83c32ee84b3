//! Value objects exchanged with the outer service layer.
//!
//! Every type here is a request-scoped value: built fresh for a single
//! operation, never mutated afterwards, and serializable so the consuming
//! layer can shape it into a response. Timestamps are Unix epoch seconds.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default result cap for searches.
pub const DEFAULT_MAX_RESULTS: usize = 100;

/// Convert a filesystem timestamp to Unix epoch seconds.
///
/// Timestamps before the epoch collapse to 0.
pub(crate) fn unix_seconds(time: SystemTime) -> u64 {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// A single entry in the sandboxed tree, either a file or a directory.
///
/// `path` is always relative to the home directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileSystemEntry {
    /// A regular file.
    File {
        /// Base name of the file.
        name: String,
        /// Path relative to the home directory.
        path: String,
        /// Size in bytes.
        size: u64,
        /// Last modification time, Unix epoch seconds.
        modified: u64,
        /// Extension including the leading dot (e.g. ".txt"), or empty.
        extension: String,
    },
    /// A directory.
    Directory {
        /// Base name of the directory.
        name: String,
        /// Path relative to the home directory.
        path: String,
        /// Last modification time, Unix epoch seconds.
        modified: u64,
    },
}

impl FileSystemEntry {
    /// Base name of the entry.
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Directory { name, .. } => name,
        }
    }

    /// Path relative to the home directory.
    pub fn path(&self) -> &str {
        match self {
            Self::File { path, .. } | Self::Directory { path, .. } => path,
        }
    }

    /// Whether this entry is a directory.
    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory { .. })
    }

    /// File size in bytes; `None` for directories.
    pub fn size(&self) -> Option<u64> {
        match self {
            Self::File { size, .. } => Some(*size),
            Self::Directory { .. } => None,
        }
    }
}

/// Contents and aggregate statistics of a single directory.
///
/// Either `exists` is true and `items` is populated, or `exists` is false
/// with empty `items` and a non-empty `error_message`; never a mix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryListing {
    /// The requested path, relative to the home directory.
    pub path: String,
    /// Entries: directories first, then files, each group sorted by name
    /// case-insensitively.
    pub items: Vec<FileSystemEntry>,
    /// Number of file entries.
    pub file_count: usize,
    /// Number of directory entries.
    pub directory_count: usize,
    /// Sum of file sizes in bytes; directories contribute nothing.
    pub total_size: u64,
    /// Parent directory as a relative path, `None` at the home directory.
    pub parent: Option<String>,
    /// Whether the directory exists and was listed.
    pub exists: bool,
    /// Reason the listing is empty, when `exists` is false.
    pub error_message: Option<String>,
}

impl DirectoryListing {
    /// Build a listing for an existing directory, deriving the aggregates
    /// from `items`.
    pub fn existing(
        path: impl Into<String>,
        items: Vec<FileSystemEntry>,
        parent: Option<String>,
    ) -> Self {
        let file_count = items.iter().filter(|i| !i.is_directory()).count();
        let directory_count = items.len() - file_count;
        let total_size = items.iter().filter_map(|i| i.size()).sum();

        Self {
            path: path.into(),
            items,
            file_count,
            directory_count,
            total_size,
            parent,
            exists: true,
            error_message: None,
        }
    }

    /// Build the reported-not-fatal result for a directory that does not
    /// exist or could not be read.
    pub fn missing(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            items: Vec::new(),
            file_count: 0,
            directory_count: 0,
            total_size: 0,
            parent: None,
            exists: false,
            error_message: Some(message.into()),
        }
    }
}

/// Criteria for a file search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Trimmed, non-empty substring to look for.
    pub query: String,
    /// Starting directory relative to home; `None` starts at home itself.
    pub path: Option<String>,
    /// Descend into subdirectories.
    pub recurse: bool,
    /// Match the query against file names.
    pub match_names: bool,
    /// Match the query against the contents of text-like files.
    pub match_contents: bool,
    /// Maximum number of entries returned; always positive.
    pub max_results: usize,
}

impl SearchQuery {
    /// Create a query with the defaults: recurse, match names only, cap at
    /// [`DEFAULT_MAX_RESULTS`].
    ///
    /// Fails with [`Error::InvalidQuery`] if `query` is empty after trimming.
    pub fn new(query: impl Into<String>) -> Result<Self> {
        let query = query.into().trim().to_string();
        if query.is_empty() {
            return Err(Error::InvalidQuery("query must not be empty".to_string()));
        }

        Ok(Self {
            query,
            path: None,
            recurse: true,
            match_names: true,
            match_contents: false,
            max_results: DEFAULT_MAX_RESULTS,
        })
    }

    /// Set the starting directory, relative to home.
    pub fn in_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into().trim().to_string());
        self
    }

    /// Set whether the search descends into subdirectories.
    pub fn recurse(mut self, recurse: bool) -> Self {
        self.recurse = recurse;
        self
    }

    /// Set whether file names are matched.
    pub fn match_names(mut self, enabled: bool) -> Self {
        self.match_names = enabled;
        self
    }

    /// Set whether text file contents are matched.
    pub fn match_contents(mut self, enabled: bool) -> Self {
        self.match_contents = enabled;
        self
    }

    /// Set the result cap.
    ///
    /// Fails with [`Error::InvalidQuery`] if `max_results` is zero.
    pub fn max_results(mut self, max_results: usize) -> Result<Self> {
        if max_results == 0 {
            return Err(Error::InvalidQuery(
                "max_results must be greater than zero".to_string(),
            ));
        }
        self.max_results = max_results;
        Ok(self)
    }
}

/// Result of an upload operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOutcome {
    /// Whether the upload completed.
    pub success: bool,
    /// Human-readable status message.
    pub message: String,
    /// Final path relative to home; absent on failure.
    pub path: Option<String>,
    /// Bytes written; absent on failure.
    pub size: Option<u64>,
}

impl UploadOutcome {
    /// Successful upload of `size` bytes to `path`.
    pub fn success(path: impl Into<String>, size: u64) -> Self {
        Self {
            success: true,
            message: "file uploaded successfully".to_string(),
            path: Some(path.into()),
            size: Some(size),
        }
    }

    /// Failed upload with a caller-facing reason.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            path: None,
            size: None,
        }
    }
}

/// State of the configured home directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeDirectoryStatus {
    /// Absolute path of the home directory.
    pub path: String,
    /// Whether the directory currently exists.
    pub exists: bool,
    /// Reason it is unavailable, when `exists` is false.
    pub error_message: Option<String>,
}
