//! Image folder scanning and lookup maps.

use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use std::path::Path;

use crate::models::IMAGE_EXTENSIONS;

/// The set of image filenames available for linking.
///
/// Keys are lowercased; values keep the on-disk spelling. Names are inserted in
/// sorted order, so when two files collide on a key the later one wins.
#[derive(Debug, Default, Clone)]
pub struct ImageIndex {
    files: Vec<String>,
    by_name: FxHashMap<String, String>,
    by_stem: FxHashMap<String, String>,
}

/// Return the recognized extension `name` ends with, compared case-insensitively.
pub fn image_extension(name: &str) -> Option<&'static str> {
    let lower = name.to_lowercase();
    IMAGE_EXTENSIONS.iter().copied().find(|ext| lower.ends_with(ext))
}

impl ImageIndex {
    /// Build an index from filenames, ignoring anything without an image extension.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut files: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|name| image_extension(name).is_some())
            .collect();
        files.sort();
        files.dedup();

        let mut by_name = FxHashMap::default();
        let mut by_stem = FxHashMap::default();
        for file in &files {
            let lower = file.to_lowercase();
            if let Some(ext) = image_extension(&lower) {
                by_stem.insert(lower[..lower.len() - ext.len()].to_string(), file.clone());
            }
            by_name.insert(lower, file.clone());
        }

        Self {
            files,
            by_name,
            by_stem,
        }
    }

    /// List `dir` (non-recursively) and index the image files in it.
    pub fn scan(dir: &Path) -> Result<Self> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to list image folder {}", dir.display()))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
            // Follows symlinks, so linked posters count too
            if !entry.path().is_file() {
                continue;
            }
            // Non-UTF-8 names can never equal a normalized core
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }

        Ok(Self::from_names(names))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// All indexed filenames, sorted.
    #[cfg(test)]
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Look up a full filename, case-insensitively.
    pub fn get_by_name(&self, name: &str) -> Option<&str> {
        self.by_name.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Look up an extension-less lowercased basename.
    pub fn get_by_stem(&self, stem: &str) -> Option<&str> {
        self.by_stem.get(stem).map(String::as_str)
    }

    /// Lowercased extension-less basenames, for similarity search.
    pub fn stems(&self) -> impl Iterator<Item = &str> {
        self.by_stem.keys().map(String::as_str)
    }
}
