use std::path::PathBuf;

use figment::Jail;
use pretty_assertions::assert_eq;
use ref_config::RefConfig;

#[test]
fn env_overrides_nested_values() {
    Jail::expect_with(|jail| {
        jail.set_env("REFKEEP_MATCHING__TITLE_JACCARD", "0.65");
        jail.set_env("REFKEEP_LIBRARY__PATH", "/srv/refs/library.json");
        jail.set_env("REFKEEP_LIBRARY__TRAIL", "true");

        let config = RefConfig::load().expect("config loads");
        assert!((config.matching.title_jaccard - 0.65).abs() < f64::EPSILON);
        assert_eq!(config.library.path, PathBuf::from("/srv/refs/library.json"));
        assert_eq!(
            config.library.trail_file(),
            Some(PathBuf::from("/srv/refs/library.trail.jsonl"))
        );
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_dir(".refkeep")?;
        jail.create_file(
            ".refkeep/config.toml",
            r#"
[general]
default_format = "raw"
"#,
        )?;
        jail.set_env("REFKEEP_GENERAL__DEFAULT_FORMAT", "json");

        let config = RefConfig::load().expect("config loads");
        assert_eq!(config.general.default_format, "json");
        Ok(())
    });
}

#[test]
fn invalid_env_threshold_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("REFKEEP_MATCHING__AUTHOR_OVERLAP", "-0.1");
        assert!(RefConfig::load().is_err());
        Ok(())
    });
}
