//! Mutating operations: upload, create, rename, delete, plus download open.
//!
//! Every operation is a single resolve-validate-act sequence; no state is
//! carried between calls. Uploads stream through a fixed-size buffer so peak
//! memory stays bounded regardless of file size.

use std::fs::{self, File};
use std::io::{Read, Write};

use tracing::debug;

use crate::error::{Error, Result};
use crate::fs::resolver::PathResolver;

/// Buffer size for streaming copies (64 KiB).
pub const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Sandboxed filesystem mutations.
#[derive(Debug, Clone)]
pub struct FileOperations {
    resolver: PathResolver,
    /// Upload size limit in bytes; `None` disables the check.
    max_upload_size: Option<u64>,
}

impl FileOperations {
    /// Create operations over the given resolver, without an upload limit.
    pub fn new(resolver: PathResolver) -> Self {
        Self {
            resolver,
            max_upload_size: None,
        }
    }

    /// Set the maximum accepted upload size.
    pub fn with_max_upload_size(mut self, limit: u64) -> Self {
        self.max_upload_size = Some(limit);
        self
    }

    /// Create the directory at `relative`, including missing parents.
    ///
    /// Fails with [`Error::AlreadyExists`] if something is already there.
    pub fn create_dir(&self, relative: &str) -> Result<()> {
        let resolved = self.resolver.resolve(relative)?;

        if resolved.exists() {
            return Err(Error::AlreadyExists(relative.to_string()));
        }

        fs::create_dir_all(&resolved)?;
        debug!(path = relative, "directory created");
        Ok(())
    }

    /// Write `source` to the file at `relative`, overwriting any existing
    /// file and creating missing parent directories.
    ///
    /// `declared_len` is the caller-announced size, checked against the
    /// configured limit before any byte is written. Returns the final
    /// relative path and the number of bytes actually written.
    pub fn write(
        &self,
        relative: &str,
        source: &mut dyn Read,
        declared_len: u64,
    ) -> Result<(String, u64)> {
        if let Some(limit) = self.max_upload_size {
            if declared_len > limit {
                return Err(Error::TooLarge {
                    size: declared_len,
                    limit,
                });
            }
        }

        let resolved = self.resolver.resolve(relative)?;
        if let Some(parent) = resolved.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut target = File::create(&resolved)?;
        let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
        let mut written: u64 = 0;
        loop {
            let read = source.read(&mut buffer)?;
            if read == 0 {
                break;
            }
            target.write_all(&buffer[..read])?;
            written += read as u64;
        }

        let relative = self.resolver.relative_string(&resolved);
        debug!(path = %relative, bytes = written, "file written");
        Ok((relative, written))
    }

    /// Open the file at `relative` for streaming reads.
    ///
    /// Fails with [`Error::NotFound`] unless an existing regular file.
    pub fn open_for_read(&self, relative: &str) -> Result<File> {
        let resolved = self.resolver.resolve(relative)?;

        if !resolved.is_file() {
            return Err(Error::NotFound(relative.to_string()));
        }

        Ok(File::open(&resolved)?)
    }

    /// Move a file or directory from `source` to `destination`.
    ///
    /// Both endpoints are independently confined to the sandbox. The
    /// destination's parent chain is created if missing; the move itself is
    /// a single rename, so its atomicity is whatever the filesystem
    /// provides and a cross-device move surfaces the OS error.
    pub fn rename(&self, source: &str, destination: &str) -> Result<()> {
        let resolved_source = self.resolver.resolve(source)?;
        let resolved_destination = self.resolver.resolve(destination)?;

        if !resolved_source.exists() {
            return Err(Error::NotFound(source.to_string()));
        }
        if resolved_destination.exists() {
            return Err(Error::AlreadyExists(destination.to_string()));
        }

        if let Some(parent) = resolved_destination.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::rename(&resolved_source, &resolved_destination)?;
        debug!(from = source, to = destination, "entry moved");
        Ok(())
    }

    /// Delete the file or directory at `relative`.
    ///
    /// Directories are removed recursively with all of their contents.
    pub fn delete(&self, relative: &str) -> Result<()> {
        let resolved = self.resolver.resolve(relative)?;

        if resolved.is_file() {
            fs::remove_file(&resolved)?;
        } else if resolved.is_dir() {
            fs::remove_dir_all(&resolved)?;
        } else {
            return Err(Error::NotFound(relative.to_string()));
        }

        debug!(path = relative, "entry deleted");
        Ok(())
    }
}
