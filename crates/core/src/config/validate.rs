use super::{types::Config, ConfigError, SearcherBackend};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Jackett section is present and usable when the backend is "jackett"
/// - Tracker list URL is not blank
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if let Some(searcher) = &config.searcher {
        match searcher.backend {
            SearcherBackend::Jackett => {
                let Some(jackett) = &searcher.jackett else {
                    return Err(ConfigError::ValidationError(
                        "searcher.jackett is required when backend = \"jackett\"".to_string(),
                    ));
                };
                if jackett.url.trim().is_empty() {
                    return Err(ConfigError::ValidationError(
                        "searcher.jackett.url cannot be empty".to_string(),
                    ));
                }
                if jackett.api_key.trim().is_empty() {
                    return Err(ConfigError::ValidationError(
                        "searcher.jackett.api_key cannot be empty".to_string(),
                    ));
                }
            }
        }
    }

    if config.trackers.url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "trackers.url cannot be empty".to_string(),
        ));
    }

    Ok(())
}
