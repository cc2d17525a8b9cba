use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use trendcast_core::CoreError;

pub const IDEAS_DIR: &str = "ideas";
pub const SCRIPTS_DIR: &str = "scripts";
pub const METADATA_DIR: &str = "metadata";

/// Lowercase ASCII file stem built from a keyword. Runs of anything else
/// become a single underscore.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_end_matches('_');
    if slug.is_empty() {
        "video".to_string()
    } else {
        slug.to_string()
    }
}

/// JSON records under one output directory.
#[derive(Debug, Clone)]
pub struct RunStore {
    root: PathBuf,
}

impl RunStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `value` as pretty JSON to `{root}/{dir}/{stem}.json`. An
    /// existing file is never replaced; a numeric suffix is added instead.
    pub fn write_json<T: Serialize>(&self, dir: &str, stem: &str, value: &T) -> Result<PathBuf, CoreError> {
        let directory = self.root.join(dir);
        fs::create_dir_all(&directory)?;

        let path = Self::available_path(&directory, stem);
        let contents = serde_json::to_string_pretty(value)?;
        fs::write(&path, contents)?;

        debug!("Wrote {}", path.display());
        Ok(path)
    }

    fn available_path(directory: &Path, stem: &str) -> PathBuf {
        let mut path = directory.join(format!("{}.json", stem));
        let mut suffix = 2;
        while path.exists() {
            path = directory.join(format!("{}_{}.json", stem, suffix));
            suffix += 1;
        }
        path
    }
}
