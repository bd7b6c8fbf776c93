//! Extension-filtered directory traversal.
//!
//! The walk is sequential and stops at the first error, whether it comes from
//! reading the tree or from the per-file callback.

use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

use crate::Result;

/// Walk `root` and call `run` for every non-directory entry whose extension
/// equals `extension` (including the leading dot, case-sensitive)
pub fn walk_files_with_ext<F>(root: &Path, extension: &str, run: F) -> Result<()>
where
    F: FnMut(&Path) -> Result<()>,
{
    FileWalker::new(root).for_each_with_ext(extension, run)
}

/// Recursive walker with optional glob exclusions
#[derive(Debug, Clone)]
pub struct FileWalker {
    root: PathBuf,
    exclude: Vec<Pattern>,
}

impl FileWalker {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileWalker {
            root: root.into(),
            exclude: Vec::new(),
        }
    }

    /// Skip entries matching any of `patterns`
    #[must_use]
    pub fn with_exclude(mut self, patterns: Vec<Pattern>) -> Self {
        self.exclude = patterns;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Visit matching files in file-name order, aborting on the first error
    pub fn for_each_with_ext<F>(&self, extension: &str, mut run: F) -> Result<()>
    where
        F: FnMut(&Path) -> Result<()>,
    {
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded(entry));

        for entry in walker {
            let entry =
                entry.with_context(|| format!("failed to walk {}", self.root.display()))?;
            if entry.file_type().is_dir() {
                continue;
            }
            if has_extension(entry.path(), extension) {
                run(entry.path())?;
            }
        }
        Ok(())
    }

    /// Collect matching files without invoking anything
    pub fn files_with_ext(&self, extension: &str) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        self.for_each_with_ext(extension, |path| {
            files.push(path.to_path_buf());
            Ok(())
        })?;
        Ok(files)
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        if self.exclude.is_empty() || entry.depth() == 0 {
            return false;
        }
        let relative = entry
            .path()
            .strip_prefix(&self.root)
            .unwrap_or(entry.path());
        is_excluded(relative, &self.exclude)
    }
}

/// Check if a path matches any exclusion pattern
///
/// A pattern matches the whole relative path, the file name, or any single
/// component (so `build` excludes every directory named `build`).
#[must_use]
pub fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    let path_str = path.to_string_lossy();

    for pattern in patterns {
        if pattern.matches(&path_str) {
            return true;
        }

        if let Some(file_name) = path.file_name() {
            if pattern.matches(&file_name.to_string_lossy()) {
                return true;
            }
        }

        for component in path.components() {
            if let Component::Normal(c) = component {
                if pattern.matches(&c.to_string_lossy()) {
                    return true;
                }
            }
        }
    }

    false
}

/// Compile glob patterns, failing on the first invalid one
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("invalid exclude pattern '{p}'")))
        .collect()
}

/// `true` when the extension of `path`, with a leading dot, equals `extension`
fn has_extension(path: &Path, extension: &str) -> bool {
    let Some(wanted) = extension.strip_prefix('.') else {
        return false;
    };
    path.extension().is_some_and(|ext| ext == wanted)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn relative_names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("a/b.proto"), ".proto"));
        assert!(!has_extension(Path::new("a/b.proto"), "proto"));
        assert!(!has_extension(Path::new("a/b.PROTO"), ".proto"));
        assert!(!has_extension(Path::new("a/proto"), ".proto"));
        assert!(!has_extension(Path::new("a/b.proto.bak"), ".proto"));
    }

    #[test]
    fn test_walk_finds_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.proto");
        touch(dir.path(), "nested/deep/b.proto");
        touch(dir.path(), "nested/c.cpp");
        touch(dir.path(), "README.md");

        let files = FileWalker::new(dir.path()).files_with_ext(".proto").unwrap();
        assert_eq!(
            relative_names(dir.path(), &files),
            vec!["a.proto", "nested/deep/b.proto"]
        );
    }

    #[test]
    fn test_walk_skips_directories_with_matching_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("schema.proto")).unwrap();
        touch(dir.path(), "schema.proto/inner.proto");

        let files = FileWalker::new(dir.path()).files_with_ext(".proto").unwrap();
        assert_eq!(
            relative_names(dir.path(), &files),
            vec!["schema.proto/inner.proto"]
        );
    }

    #[test]
    fn test_walk_missing_root_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let result = walk_files_with_ext(&missing, ".proto", |_| Ok(()));
        assert!(result.is_err());
    }

    #[test]
    fn test_walk_stops_on_first_error() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.h");
        touch(dir.path(), "b.h");
        touch(dir.path(), "c.h");

        let mut seen = Vec::new();
        let result = walk_files_with_ext(dir.path(), ".h", |path| {
            seen.push(path.to_path_buf());
            if path.ends_with("b.h") {
                anyhow::bail!("boom");
            }
            Ok(())
        });

        assert_eq!(result.unwrap_err().to_string(), "boom");
        assert_eq!(relative_names(dir.path(), &seen), vec!["a.h", "b.h"]);
    }

    #[test]
    fn test_exclude_directory_component() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "src/a.cc");
        touch(dir.path(), "build/gen/b.cc");
        touch(dir.path(), "third_party/c.cc");

        let patterns = compile_patterns(&["build".to_string(), "third_*".to_string()]).unwrap();
        let files = FileWalker::new(dir.path())
            .with_exclude(patterns)
            .files_with_ext(".cc")
            .unwrap();
        assert_eq!(relative_names(dir.path(), &files), vec!["src/a.cc"]);
    }

    #[test]
    fn test_exclude_file_name() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "api.proto");
        touch(dir.path(), "api_generated.proto");

        let patterns = compile_patterns(&["*_generated.proto".to_string()]).unwrap();
        let files = FileWalker::new(dir.path())
            .with_exclude(patterns)
            .files_with_ext(".proto")
            .unwrap();
        assert_eq!(relative_names(dir.path(), &files), vec!["api.proto"]);
    }

    #[test]
    fn test_exclude_never_matches_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("build");
        touch(&root, "a.c");

        let patterns = compile_patterns(&["build".to_string()]).unwrap();
        let files = FileWalker::new(&root)
            .with_exclude(patterns)
            .files_with_ext(".c")
            .unwrap();
        assert_eq!(relative_names(&root, &files), vec!["a.c"]);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = compile_patterns(&["[".to_string()]).unwrap_err();
        assert!(err.to_string().contains("invalid exclude pattern"));
    }

    #[test]
    fn test_is_excluded_empty_patterns() {
        assert!(!is_excluded(Path::new("a/b.c"), &[]));
    }
}
