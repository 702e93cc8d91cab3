//! Library file and mutation trail locations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

fn default_path() -> PathBuf {
    PathBuf::from("library.json")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// CSL-JSON array holding the library.
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Whether saved mutations are appended to a JSONL trail.
    #[serde(default)]
    pub trail: bool,

    /// Trail location. Defaults to `<path>.trail.jsonl` next to the library.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trail_path: Option<PathBuf>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            trail: false,
            trail_path: None,
        }
    }
}

impl LibraryConfig {
    /// Trail file to write, or `None` when the trail is disabled.
    #[must_use]
    pub fn trail_file(&self) -> Option<PathBuf> {
        if !self.trail {
            return None;
        }
        Some(
            self.trail_path
                .clone()
                .unwrap_or_else(|| default_trail_path(&self.path)),
        )
    }
}

fn default_trail_path(library: &Path) -> PathBuf {
    let mut name = library
        .file_stem()
        .map_or_else(|| "library".into(), ToOwned::to_owned);
    name.push(".trail.jsonl");
    library.with_file_name(name)
}
