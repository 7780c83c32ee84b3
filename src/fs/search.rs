//! Name and content search over the sandboxed tree.
//!
//! Search is a live directory walk, not an index. It degrades gracefully: a
//! missing or denied start path yields an empty result, and individual files
//! that cannot be read are skipped with a warning.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::fs::listing::extension_of;
use crate::fs::resolver::PathResolver;
use crate::types::{unix_seconds, FileSystemEntry, SearchQuery};

/// Extensions treated as text for content matching. Anything else is never
/// opened, so binary files are not decoded even when their bytes happen to
/// contain the query.
pub const DEFAULT_TEXT_EXTENSIONS: &[&str] = &[
    ".txt", ".md", ".json", ".xml", ".html", ".css", ".js", ".rs", ".py", ".java", ".cpp", ".h",
    ".log",
];

/// Tunable search policy.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Lowercase extensions (leading dot included) eligible for content
    /// matching.
    pub content_extensions: Vec<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            content_extensions: DEFAULT_TEXT_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

/// Walks a subtree matching file names and/or contents against a query.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    resolver: PathResolver,
    options: SearchOptions,
}

impl SearchEngine {
    /// Create an engine with the default text-extension allow-list.
    pub fn new(resolver: PathResolver) -> Self {
        Self::with_options(resolver, SearchOptions::default())
    }

    /// Create an engine with an explicit policy.
    pub fn with_options(resolver: PathResolver, options: SearchOptions) -> Self {
        Self { resolver, options }
    }

    /// Run a search, returning at most `query.max_results` file entries.
    ///
    /// Only files are ever returned. Results follow filesystem enumeration
    /// order; name matches are collected before content matches and a file
    /// is never reported twice.
    pub fn search(&self, query: &SearchQuery) -> Vec<FileSystemEntry> {
        let start = match self.resolver.resolve(query.path.as_deref().unwrap_or("")) {
            Ok(path) => path,
            Err(err) => {
                debug!(error = %err, "search start path rejected");
                return Vec::new();
            }
        };
        if !start.is_dir() {
            return Vec::new();
        }

        let mut files = Vec::new();
        self.collect_files(&start, query.recurse, &mut files);

        let needle = query.query.to_lowercase();
        let mut results = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        if query.match_names {
            for path in &files {
                if results.len() >= query.max_results {
                    break;
                }
                let name_matches = path
                    .file_name()
                    .map(|name| name.to_string_lossy().to_lowercase().contains(&needle))
                    .unwrap_or(false);
                if name_matches {
                    self.push_file(path, &mut results, &mut seen);
                }
            }
        }

        if query.match_contents {
            for path in &files {
                if results.len() >= query.max_results {
                    break;
                }
                if !self.is_text_file(path) || seen.contains(&self.resolver.relative_string(path))
                {
                    continue;
                }
                match fs::read_to_string(path) {
                    Ok(contents) => {
                        if contents.to_lowercase().contains(&needle) {
                            self.push_file(path, &mut results, &mut seen);
                        }
                    }
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "could not read file contents");
                    }
                }
            }
        }

        results.truncate(query.max_results);
        results
    }

    /// Gather files under `dir`, descending when `recurse` is set.
    fn collect_files(&self, dir: &Path, recurse: bool, out: &mut Vec<PathBuf>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(directory = %dir.display(), error = %err, "skipping unreadable directory");
                return;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(directory = %dir.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(_) => continue,
            };

            if file_type.is_file() {
                out.push(entry.path());
            } else if file_type.is_dir() && recurse {
                self.collect_files(&entry.path(), recurse, out);
            }
        }
    }

    /// Append a result entry for `path`, skipping files whose metadata
    /// disappeared between the walk and the match.
    fn push_file(
        &self,
        path: &Path,
        results: &mut Vec<FileSystemEntry>,
        seen: &mut HashSet<String>,
    ) {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping match without metadata");
                return;
            }
        };

        let relative = self.resolver.relative_string(path);
        if !seen.insert(relative.clone()) {
            return;
        }

        results.push(FileSystemEntry::File {
            name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: relative,
            size: metadata.len(),
            modified: unix_seconds(metadata.modified().unwrap_or(std::time::UNIX_EPOCH)),
            extension: extension_of(path),
        });
    }

    fn is_text_file(&self, path: &Path) -> bool {
        let extension = extension_of(path).to_lowercase();
        self.options
            .content_extensions
            .iter()
            .any(|allowed| allowed == &extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn engine() -> (TempDir, SearchEngine) {
        let temp_dir = TempDir::new().unwrap();
        let resolver = PathResolver::new(temp_dir.path()).unwrap();
        (temp_dir, SearchEngine::new(resolver))
    }

    fn create_tree(dir: &Path) {
        fs::create_dir_all(dir.join("reports")).unwrap();
        fs::write(dir.join("reports/report.txt"), "quarterly numbers").unwrap();
        fs::write(dir.join("reports/summary.txt"), "Hello World summary").unwrap();
        fs::write(dir.join("notes.md"), "plain notes").unwrap();
        fs::write(dir.join("data.bin"), b"hello world in a binary").unwrap();
    }

    #[test]
    fn test_name_match_is_exact_to_basename() {
        let (temp_dir, engine) = engine();
        create_tree(temp_dir.path());

        let query = SearchQuery::new("report").unwrap();
        let results = engine.search(&query);

        // "reports/" is a directory and never a hit; only report.txt matches.
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name(), "report.txt");
        assert_eq!(results[0].path(), "reports/report.txt");
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let (temp_dir, engine) = engine();
        fs::write(temp_dir.path().join("README.md"), "x").unwrap();

        let results = engine.search(&SearchQuery::new("readme").unwrap());

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name(), "README.md");
    }

    #[test]
    fn test_content_match_skips_binaries() {
        let (temp_dir, engine) = engine();
        create_tree(temp_dir.path());

        let query = SearchQuery::new("hello")
            .unwrap()
            .match_names(false)
            .match_contents(true);
        let results = engine.search(&query);

        // summary.txt contains "Hello World"; data.bin contains the bytes
        // but is not a text extension and is never opened.
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name(), "summary.txt");
    }

    #[test]
    fn test_name_and_content_matches_do_not_duplicate() {
        let (temp_dir, engine) = engine();
        fs::write(temp_dir.path().join("hello.txt"), "hello there").unwrap();

        let query = SearchQuery::new("hello").unwrap().match_contents(true);
        let results = engine.search(&query);

        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_non_recursive_search_stays_shallow() {
        let (temp_dir, engine) = engine();
        create_tree(temp_dir.path());

        let query = SearchQuery::new("report").unwrap().recurse(false);
        let results = engine.search(&query);

        assert!(results.is_empty());
    }

    #[test]
    fn test_search_scoped_to_subdirectory() {
        let (temp_dir, engine) = engine();
        create_tree(temp_dir.path());

        let query = SearchQuery::new("summary").unwrap().in_path("reports");
        let results = engine.search(&query);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path(), "reports/summary.txt");
    }

    #[test]
    fn test_missing_start_path_yields_empty() {
        let (_t, engine) = engine();

        let query = SearchQuery::new("anything").unwrap().in_path("nope");
        assert!(engine.search(&query).is_empty());
    }

    #[test]
    fn test_denied_start_path_yields_empty() {
        let (_t, engine) = engine();

        let query = SearchQuery::new("anything").unwrap().in_path("../..");
        assert!(engine.search(&query).is_empty());
    }

    #[test]
    fn test_max_results_caps_output() {
        let (temp_dir, engine) = engine();
        for i in 0..10 {
            fs::write(temp_dir.path().join(format!("match{i}.txt")), "x").unwrap();
        }

        let query = SearchQuery::new("match").unwrap().max_results(3).unwrap();
        assert_eq!(engine.search(&query).len(), 3);
    }

    #[test]
    fn test_both_flags_off_yields_empty() {
        let (temp_dir, engine) = engine();
        create_tree(temp_dir.path());

        let query = SearchQuery::new("report").unwrap().match_names(false);
        assert!(engine.search(&query).is_empty());
    }

    #[test]
    fn test_custom_extension_allow_list() {
        let temp_dir = TempDir::new().unwrap();
        let resolver = PathResolver::new(temp_dir.path()).unwrap();
        let options = SearchOptions {
            content_extensions: vec![".conf".to_string()],
        };
        let engine = SearchEngine::with_options(resolver, options);

        fs::write(temp_dir.path().join("app.conf"), "listen 8080").unwrap();
        fs::write(temp_dir.path().join("app.txt"), "listen 8080").unwrap();

        let query = SearchQuery::new("listen")
            .unwrap()
            .match_names(false)
            .match_contents(true);
        let results = engine.search(&query);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name(), "app.conf");
    }
}
