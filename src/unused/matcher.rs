//! Source file matcher for the unused-label scan.

use std::path::{
    Component,
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};
use ignore::WalkBuilder;

/// Files searched for label usages, relative to the source root.
pub const SOURCE_PATTERNS: [&str; 2] = ["**/*.js", "**/*.json"];

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid source pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),

    #[error("Source directory not found: {}", .0.display())]
    MissingSourceRoot(PathBuf),
}

/// Selects the source files under a root, leaving out the locales directory.
#[derive(Debug, Clone)]
pub struct SourceMatcher {
    source_root: PathBuf,
    excluded_dir: PathBuf,
    include_set: GlobSet,
}

impl SourceMatcher {
    /// # Errors
    /// Returns [`MatcherError`] if a source pattern does not compile.
    pub fn new(
        source_root: impl Into<PathBuf>,
        excluded_dir: impl AsRef<Path>,
    ) -> Result<Self, MatcherError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in SOURCE_PATTERNS {
            let glob = Glob::new(pattern).map_err(|source| MatcherError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
            builder.add(glob);
        }

        Ok(Self {
            source_root: source_root.into(),
            excluded_dir: normalize(excluded_dir.as_ref()),
            include_set: builder.build()?,
        })
    }

    #[must_use]
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// True if `path` lies in the excluded directory.
    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        normalize(path).starts_with(&self.excluded_dir)
    }

    /// True if `path` is under the source root, outside the excluded
    /// directory and has a source extension.
    #[must_use]
    pub fn is_source_file(&self, path: &Path) -> bool {
        let Ok(relative_path) = path.strip_prefix(&self.source_root) else {
            return false;
        };

        self.include_set.is_match(relative_path) && !self.is_excluded(path)
    }

    /// Walks the source root and returns the matching files in walk order.
    ///
    /// Hidden files are included and ignore files are not consulted. Entries
    /// that cannot be read are logged and skipped.
    ///
    /// # Errors
    /// Returns [`MatcherError::MissingSourceRoot`] if the root is not a directory.
    pub fn find_source_files(&self) -> Result<Vec<PathBuf>, MatcherError> {
        if !self.source_root.is_dir() {
            return Err(MatcherError::MissingSourceRoot(self.source_root.clone()));
        }

        let excluded_dir = self.excluded_dir.clone();
        let mut found_files = Vec::new();
        for result in WalkBuilder::new(&self.source_root)
            .standard_filters(false)
            .follow_links(false)
            .filter_entry(move |entry| !normalize(entry.path()).starts_with(&excluded_dir))
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(%err, "Skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            if self.is_source_file(path) {
                found_files.push(path.to_path_buf());
            }
        }

        tracing::debug!(root = %self.source_root.display(), files = found_files.len(), "Found source files");
        Ok(found_files)
    }
}

/// Drops `.` components so `./a/b` and `a/b` compare equal.
fn normalize(path: &Path) -> PathBuf {
    path.components().filter(|component| *component != Component::CurDir).collect()
}
