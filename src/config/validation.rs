use super::models::{Config, StorageProvider};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Storage provider is DynamoDB but no table name is set (TABLE_NAME)")]
    MissingTableName,

    #[error("Storage provider is fjall but fjall_path is empty")]
    EmptyFjallPath,

    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidLogFilter { filter: String, reason: String },
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_storage(config)?;
    validate_telemetry(config)?;
    Ok(())
}

fn validate_storage(config: &Config) -> Result<(), ValidationError> {
    match config.storage.provider {
        StorageProvider::DynamoDb => {
            let has_table = config
                .storage
                .table_name
                .as_deref()
                .is_some_and(|name| !name.trim().is_empty());
            if !has_table {
                return Err(ValidationError::MissingTableName);
            }
        }
        StorageProvider::Fjall => {
            if config.storage.fjall_path.as_os_str().is_empty() {
                return Err(ValidationError::EmptyFjallPath);
            }
        }
        StorageProvider::Memory => {}
    }
    Ok(())
}

fn validate_telemetry(config: &Config) -> Result<(), ValidationError> {
    let filter = &config.telemetry.log_filter;
    tracing_subscriber::EnvFilter::try_new(filter).map_err(|err| {
        ValidationError::InvalidLogFilter {
            filter: filter.clone(),
            reason: err.to_string(),
        }
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn create_test_config() -> Config {
        let mut config = Config::default();
        config.storage.table_name = Some("Movies".to_string());
        config
    }

    #[test]
    fn test_valid_config() {
        let config = create_test_config();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_missing_table_name() {
        let mut config = create_test_config();
        config.storage.table_name = None;

        let result = validate(&config);
        assert!(matches!(result, Err(ValidationError::MissingTableName)));
    }

    #[test]
    fn test_blank_table_name() {
        let mut config = create_test_config();
        config.storage.table_name = Some("  ".to_string());

        assert!(matches!(
            validate(&config),
            Err(ValidationError::MissingTableName)
        ));
    }

    #[test]
    fn test_memory_provider_needs_no_table() {
        let mut config = Config::default();
        config.storage.provider = StorageProvider::Memory;

        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_fjall_path() {
        let mut config = Config::default();
        config.storage.provider = StorageProvider::Fjall;
        config.storage.fjall_path = PathBuf::new();

        assert!(matches!(
            validate(&config),
            Err(ValidationError::EmptyFjallPath)
        ));
    }

    #[test]
    fn test_invalid_log_filter() {
        let mut config = create_test_config();
        config.telemetry.log_filter = "moviebox=loud".to_string();

        assert!(matches!(
            validate(&config),
            Err(ValidationError::InvalidLogFilter { .. })
        ));
    }
}
