use super::models::Config;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::PathBuf;

const CONFIG_ENV_VAR: &str = "MOVIEBOX_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/moviebox.toml";
const ENV_PREFIX: &str = "MOVIEBOX";
const ENV_SEPARATOR: &str = "__";

/// Load configuration from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. `MOVIEBOX__*` environment variables
/// 5. Well-known deployment variables (`TABLE_NAME`, `AWS_REGION`, ...)
pub fn load() -> Result<Config, ConfigError> {
    // Load .env file if it exists (ignore errors if file doesn't exist)
    let _ = dotenvy::dotenv();

    let config_path = env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

    let mut config = load_from_sources(config_path)?;
    apply_deployment_env(&mut config, |name| env::var(name).ok());

    Ok(config)
}

/// Apply the variables the function deployment sets on the process.
///
/// `TABLE_NAME` always wins over file/prefixed values since it is what the
/// infrastructure template wires to the provisioned table. Region and
/// endpoint only fill gaps.
pub(crate) fn apply_deployment_env<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(table_name) = lookup("TABLE_NAME").filter(|value| !value.is_empty()) {
        config.storage.table_name = Some(table_name);
    }

    if config.storage.region.is_none() {
        config.storage.region = lookup("AWS_REGION").filter(|value| !value.is_empty());
    }

    if config.storage.endpoint.is_none() {
        config.storage.endpoint = lookup("AWS_ENDPOINT_URL_DYNAMODB")
            .or_else(|| lookup("AWS_ENDPOINT_URL"))
            .filter(|value| !value.is_empty());
    }
}

/// Load configuration from a specific path and environment
/// Useful for testing with custom config files
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if config_path.exists() {
        tracing::info!("Loading configuration from: {}", config_path.display());
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::debug!(
            "Configuration file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    // MOVIEBOX__STORAGE__TABLE_NAME -> storage.table_name
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    );

    let config = builder.build()?;
    config.try_deserialize()
}
