//! Maps request paths under the store prefix onto the storage root.
//!
//! Containment is checked lexically after `.`/`..` normalization. Symlinks
//! living inside the root are not resolved, so a link pointing outside the
//! root is still followed by later filesystem calls.

use crate::errors::{AppError, AppResult};
use std::path::PathBuf;

/// A request target that is known to sit inside the storage root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub absolute: PathBuf,
    /// Slash-joined path below the root; empty for the root itself.
    pub relative: String,
}

impl ResolvedPath {
    pub fn is_root(&self) -> bool {
        self.relative.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
    prefix: String,
}

impl PathResolver {
    /// `root` must already be absolute; `prefix` is the route prefix without a trailing slash.
    pub fn new(root: PathBuf, prefix: &str) -> Self {
        Self { root, prefix: prefix.trim_end_matches('/').to_string() }
    }

    pub fn resolve(&self, url_path: &str) -> AppResult<ResolvedPath> {
        let rest = url_path.strip_prefix(&self.prefix).ok_or(AppError::InvalidPath)?;
        if !rest.is_empty() && !rest.starts_with('/') {
            return Err(AppError::InvalidPath);
        }
        let decoded = urlencoding::decode(rest).map_err(|_| AppError::InvalidPath)?;
        if decoded.contains('\0') {
            return Err(AppError::InvalidPath);
        }

        let mut candidate = self.root.clone();
        for segment in decoded.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    candidate.pop();
                }
                name => candidate.push(name),
            }
        }

        let relative = candidate.strip_prefix(&self.root).map_err(|_| AppError::InvalidPath)?;
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        Ok(ResolvedPath { absolute: candidate, relative })
    }
}
