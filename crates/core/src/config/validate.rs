use super::{
    types::{Config, StoreBackend},
    ConfigError,
};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Generator counts are positive and `default_count <= max_count`
/// - Generator project key is uppercase alphanumeric, starting with a letter
/// - SQLite store has a path
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Generator validation
    let generator = &config.generator;
    if generator.max_count == 0 {
        return Err(ConfigError::ValidationError(
            "generator.max_count must be greater than 0".to_string(),
        ));
    }
    if generator.default_count > generator.max_count {
        return Err(ConfigError::ValidationError(format!(
            "generator.default_count ({}) exceeds generator.max_count ({})",
            generator.default_count, generator.max_count
        )));
    }
    if !is_valid_project_key(&generator.project_key) {
        return Err(ConfigError::ValidationError(format!(
            "generator.project_key must be uppercase alphanumeric: {:?}",
            generator.project_key
        )));
    }

    // Store validation
    if config.store.backend == StoreBackend::Sqlite && config.store.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "store.path is required for the sqlite backend".to_string(),
        ));
    }

    Ok(())
}

fn is_valid_project_key(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}
