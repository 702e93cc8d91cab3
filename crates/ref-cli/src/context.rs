use std::path::{Path, PathBuf};

use anyhow::Context;
use ref_config::RefConfig;
use ref_match::MetadataComparator;
use ref_schema::SchemaRegistry;
use ref_store::{JsonLibrary, MutationTrail};

/// Shared state handed to every command handler.
pub struct AppContext {
    pub config: RefConfig,
    pub schemas: SchemaRegistry,
}

impl AppContext {
    pub fn new(config: RefConfig) -> Self {
        Self {
            config,
            schemas: SchemaRegistry::new(),
        }
    }

    /// Library file: `--library` if given, else `library.path`.
    pub fn library_path(&self, flag: Option<&Path>) -> PathBuf {
        flag.map_or_else(|| self.config.library.path.clone(), Path::to_path_buf)
    }

    /// Open the library, attaching the mutation trail when configured.
    ///
    /// The trail path is derived from the library actually opened, so
    /// `--library` moves the trail along with it.
    pub fn open_library(&self, flag: Option<&Path>) -> anyhow::Result<JsonLibrary> {
        let path = self.library_path(flag);
        let library = JsonLibrary::open(&path)
            .with_context(|| format!("failed to open library {}", path.display()))?;

        let mut library_config = self.config.library.clone();
        library_config.path = path;
        match library_config.trail_file() {
            Some(trail_path) => {
                let trail = MutationTrail::new(&trail_path).with_context(|| {
                    format!("failed to prepare mutation trail {}", trail_path.display())
                })?;
                Ok(library.with_trail(trail))
            }
            None => Ok(library),
        }
    }

    pub fn comparator(&self) -> MetadataComparator {
        MetadataComparator::new(self.config.matching.thresholds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_library(dir: &Path) -> PathBuf {
        let path = dir.join("refs.json");
        std::fs::write(&path, r#"[{"id":"a","title":"A"}]"#).unwrap();
        path
    }

    #[test]
    fn flag_overrides_configured_path() {
        let ctx = AppContext::new(RefConfig::default());
        assert_eq!(ctx.library_path(None), PathBuf::from("library.json"));
        assert_eq!(
            ctx.library_path(Some(Path::new("other.json"))),
            PathBuf::from("other.json")
        );
    }

    #[test]
    fn missing_library_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = AppContext::new(RefConfig::default());
        let missing = dir.path().join("missing.json");
        let err = ctx.open_library(Some(&missing)).unwrap_err();
        assert!(format!("{err:#}").contains("missing.json"));
    }

    #[test]
    fn trail_follows_the_opened_library() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_library(dir.path());

        let mut config = RefConfig::default();
        config.library.trail = true;
        let ctx = AppContext::new(config);

        let library = ctx.open_library(Some(&path)).unwrap();
        assert_eq!(library.records().len(), 1);
        assert_eq!(library.path(), path.as_path());
    }
}
