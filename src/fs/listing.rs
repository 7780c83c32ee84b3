//! Directory listing with aggregate statistics.
//!
//! Listing failures are routine, reportable outcomes: a missing directory, a
//! denied path or an enumeration error all produce a
//! [`DirectoryListing`] with `exists: false` and a message, never an `Err`.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use tracing::warn;

use crate::fs::resolver::PathResolver;
use crate::types::{unix_seconds, DirectoryListing, FileSystemEntry};

/// Lists the immediate children of directories inside the sandbox.
#[derive(Debug, Clone)]
pub struct DirectoryLister {
    resolver: PathResolver,
}

impl DirectoryLister {
    /// Create a lister over the given resolver.
    pub fn new(resolver: PathResolver) -> Self {
        Self { resolver }
    }

    /// List the immediate children of `relative`.
    ///
    /// Entries are sorted directories first, then files, each group
    /// ascending by name case-insensitively. Children that cannot be
    /// inspected are skipped with a warning.
    pub fn list(&self, relative: &str) -> DirectoryListing {
        let resolved = match self.resolver.resolve(relative) {
            Ok(path) => path,
            Err(err) => return DirectoryListing::missing(relative, err.to_string()),
        };

        if !resolved.is_dir() {
            return DirectoryListing::missing(relative, "directory does not exist");
        }

        match self.enumerate(&resolved) {
            Ok(items) => {
                DirectoryListing::existing(relative, items, self.parent_of(&resolved))
            }
            Err(err) => {
                warn!(path = relative, error = %err, "directory enumeration failed");
                DirectoryListing::missing(relative, err.to_string())
            }
        }
    }

    fn enumerate(&self, directory: &Path) -> std::io::Result<Vec<FileSystemEntry>> {
        let mut items = Vec::new();

        for entry in fs::read_dir(directory)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(directory = %directory.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(err) => {
                    warn!(path = %entry.path().display(), error = %err, "skipping entry without metadata");
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy().into_owned();
            let path = self.resolver.relative_string(&entry.path());
            let modified = unix_seconds(metadata.modified().unwrap_or(std::time::UNIX_EPOCH));

            if metadata.is_dir() {
                items.push(FileSystemEntry::Directory {
                    name,
                    path,
                    modified,
                });
            } else if metadata.is_file() {
                let extension = extension_of(&entry.path());
                items.push(FileSystemEntry::File {
                    name,
                    path,
                    size: metadata.len(),
                    modified,
                    extension,
                });
            }
            // Sockets, devices and dangling symlinks are not part of the
            // browsing model and are left out of the listing.
        }

        items.sort_by(|a, b| match (a.is_directory(), b.is_directory()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
        });

        Ok(items)
    }

    /// Parent of `resolved` as a relative path, when it lies under home.
    fn parent_of(&self, resolved: &Path) -> Option<String> {
        if resolved == self.resolver.home() {
            return None;
        }
        let parent = resolved.parent()?;
        if parent.starts_with(self.resolver.home()) {
            Some(self.resolver.relative_string(parent))
        } else {
            None
        }
    }
}

/// File extension including the leading dot, or empty when absent.
pub(crate) fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}
