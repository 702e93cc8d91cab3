use anyhow::Context;
use ref_config::RefConfig;

/// Load layered configuration, reading `.env` from the working directory first.
pub fn load_config() -> anyhow::Result<RefConfig> {
    let config = RefConfig::load_with_dotenv().context("failed to load refkeep configuration")?;
    tracing::debug!(
        library = %config.library.path.display(),
        trail = config.library.trail,
        "configuration loaded"
    );
    Ok(config)
}
