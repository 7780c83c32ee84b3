//! Path confinement for the home directory sandbox.
//!
//! Every path accepted from a caller passes through [`PathResolver::resolve`]
//! before any filesystem call. The resolver joins the caller-supplied
//! relative path onto the canonical home directory, normalizes it lexically
//! and rejects any result that would leave the home subtree. This is the
//! single security boundary of the whole service.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Resolves caller-supplied relative paths against a fixed home directory.
///
/// The home directory is created if absent and canonicalized once at
/// construction; it never changes afterwards. The boundary check compares
/// normalized path components case-sensitively, which diverges from
/// case-insensitive filesystems' own semantics but is the only comparison
/// that is correct on case-sensitive ones.
#[derive(Debug, Clone)]
pub struct PathResolver {
    /// Canonical absolute path of the home directory.
    home: PathBuf,
}

impl PathResolver {
    /// Create a resolver rooted at `home`, creating the directory if needed.
    pub fn new(home: impl AsRef<Path>) -> Result<Self> {
        let home = home.as_ref();
        fs::create_dir_all(home)?;
        let home = fs::canonicalize(home)?;
        Ok(Self { home })
    }

    /// The canonical home directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Resolve a relative path to an absolute path inside the home directory.
    ///
    /// Empty input resolves to the home directory itself. The result is
    /// normalized lexically (`.` removed, `..` applied, separators
    /// collapsed) rather than through the filesystem, because mutation
    /// targets may not exist yet. Fails with [`Error::AccessDenied`] if the
    /// normalized result is not inside the home directory.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf> {
        // A join with an absolute right-hand side discards the home prefix,
        // so absolute input is only accepted when it already points inside.
        let joined = self.home.join(relative.trim());
        let normalized = normalize(&joined);

        if !normalized.starts_with(&self.home) {
            return Err(Error::AccessDenied);
        }

        Ok(normalized)
    }

    /// Convert an absolute path back into a home-relative one.
    ///
    /// Paths outside the home directory are returned unchanged; callers that
    /// only hand in outputs of [`resolve`](Self::resolve) never hit that
    /// branch.
    pub fn to_relative(&self, absolute: &Path) -> PathBuf {
        absolute
            .strip_prefix(&self.home)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| absolute.to_path_buf())
    }

    /// Home-relative path as a display string.
    pub fn relative_string(&self, absolute: &Path) -> String {
        self.to_relative(absolute).to_string_lossy().into_owned()
    }
}

/// Lexically normalize a path: drop `.`, apply `..`, collapse separators.
///
/// `..` at the filesystem root stays at the root, matching how operating
/// systems resolve it.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}
