use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
}

/// One node of a listing; `path` is relative to the storage root and always slash-separated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Entry>>,
}

#[derive(Debug, Clone)]
pub struct TreeBuilder {
    root: PathBuf,
    max_depth: usize,
}

impl TreeBuilder {
    pub fn new(root: PathBuf, max_depth: usize) -> Self {
        Self { root, max_depth }
    }

    /// Lists `dir` recursively. Any unreadable directory fails the whole walk.
    pub fn build(&self, dir: &Path) -> io::Result<Vec<Entry>> {
        let rel = dir.strip_prefix(&self.root).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "directory outside storage root")
        })?;
        let rel = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        self.walk(dir, &rel, 0)
    }

    fn walk(&self, dir: &Path, rel: &str, depth: usize) -> io::Result<Vec<Entry>> {
        if depth >= self.max_depth {
            return Err(io::Error::other(format!(
                "directory tree deeper than {} levels",
                self.max_depth
            )));
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = if rel.is_empty() { name.clone() } else { format!("{rel}/{name}") };

            // file_type() does not follow symlinks, so links are never recursed into
            let node = if entry.file_type()?.is_dir() {
                let children = self.walk(&entry.path(), &path, depth + 1)?;
                Entry { name, kind: EntryKind::Dir, path, children: Some(children) }
            } else {
                Entry { name, kind: EntryKind::File, path, children: None }
            };
            entries.push(node);
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}
