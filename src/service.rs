//! The single contract consumed by the outer request-handling layer.
//!
//! [`FileBrowser`] composes the resolver, lister, search engine and mutation
//! operations over one home directory. Routing, request parsing, status-code
//! mapping and UI serving all live outside this crate and call in through
//! these methods.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Context;

use crate::config::Config;
use crate::error::Result;
use crate::fs::{DirectoryLister, FileOperations, PathResolver, SearchEngine, SearchOptions};
use crate::types::{DirectoryListing, FileSystemEntry, HomeDirectoryStatus, SearchQuery, UploadOutcome};

/// Facade over the sandboxed filesystem core.
///
/// Cheap to clone; every clone serves the same home directory. Methods carry
/// no state across calls, so a single instance can be shared freely between
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct FileBrowser {
    resolver: PathResolver,
    lister: DirectoryLister,
    search: SearchEngine,
    ops: FileOperations,
}

impl FileBrowser {
    /// Serve `home` with default policies and no upload limit.
    ///
    /// The directory is created if absent.
    pub fn new(home: impl AsRef<Path>) -> anyhow::Result<Self> {
        let home = home.as_ref();
        let resolver = PathResolver::new(home)
            .with_context(|| format!("failed to open home directory: {}", home.display()))?;

        Ok(Self {
            lister: DirectoryLister::new(resolver.clone()),
            search: SearchEngine::new(resolver.clone()),
            ops: FileOperations::new(resolver.clone()),
            resolver,
        })
    }

    /// Build a browser from a validated [`Config`].
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let resolver = PathResolver::new(&config.general.home_dir).with_context(|| {
            format!(
                "failed to open home directory: {}",
                config.general.home_dir.display()
            )
        })?;

        let options = SearchOptions {
            content_extensions: config.search.content_extensions.clone(),
        };

        Ok(Self {
            lister: DirectoryLister::new(resolver.clone()),
            search: SearchEngine::with_options(resolver.clone(), options),
            ops: FileOperations::new(resolver.clone())
                .with_max_upload_size(config.upload.max_size),
            resolver,
        })
    }

    /// Absolute path of the served home directory.
    pub fn home_directory(&self) -> &Path {
        self.resolver.home()
    }

    /// Current availability of the home directory.
    pub fn home_directory_status(&self) -> HomeDirectoryStatus {
        let exists = self.resolver.home().is_dir();
        HomeDirectoryStatus {
            path: self.resolver.home().to_string_lossy().into_owned(),
            exists,
            error_message: (!exists).then(|| "home directory does not exist".to_string()),
        }
    }

    /// List the immediate children of a directory. Never fails; missing or
    /// denied paths produce a listing with `exists: false`.
    pub fn list_directory(&self, relative: &str) -> DirectoryListing {
        self.lister.list(relative)
    }

    /// Search for files by name and/or contents, bounded by the query's
    /// result cap.
    pub fn search(&self, query: &SearchQuery) -> Vec<FileSystemEntry> {
        self.search.search(query)
    }

    /// Open a file for streaming download.
    pub fn open_for_read(&self, relative: &str) -> Result<File> {
        self.ops.open_for_read(relative)
    }

    /// Upload: stream `source` into the file at `relative`.
    ///
    /// Failures are folded into the outcome rather than returned as errors,
    /// since the outcome is shaped directly into the caller's response.
    pub fn write(&self, relative: &str, source: &mut dyn Read, declared_len: u64) -> UploadOutcome {
        match self.ops.write(relative, source, declared_len) {
            Ok((path, written)) => UploadOutcome::success(path, written),
            Err(err) => UploadOutcome::failure(err.to_string()),
        }
    }

    /// Create a directory, including missing parents.
    pub fn create_directory(&self, relative: &str) -> Result<()> {
        self.ops.create_dir(relative)
    }

    /// Move a file or directory to a new location inside the sandbox.
    pub fn move_entry(&self, source: &str, destination: &str) -> Result<()> {
        self.ops.rename(source, destination)
    }

    /// Delete a file, or a directory with all of its contents.
    pub fn delete(&self, relative: &str) -> Result<()> {
        self.ops.delete(relative)
    }

    /// Whether `relative` resolves to an existing file. False when the path
    /// is denied.
    pub fn file_exists(&self, relative: &str) -> bool {
        self.resolver
            .resolve(relative)
            .map(|path| path.is_file())
            .unwrap_or(false)
    }

    /// Whether `relative` resolves to an existing directory. False when the
    /// path is denied.
    pub fn directory_exists(&self, relative: &str) -> bool {
        self.resolver
            .resolve(relative)
            .map(|path| path.is_dir())
            .unwrap_or(false)
    }
}
