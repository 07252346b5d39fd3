//! Validate loaded configuration before anything is bound or connected.

use crate::config::AppConfig;
use crate::error::ConfigError;
use crate::response::Alerts;

pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.body_limit == 0 {
        return Err(ConfigError::Validation("server.body_limit must be positive".into()));
    }
    if config.database.max_connections == 0 {
        return Err(ConfigError::Validation(
            "database.max_connections must be positive".into(),
        ));
    }
    Alerts::new(&config.app.name)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn rejects_zero_pool() {
        let mut cfg = AppConfig::default();
        cfg.database.max_connections = 0;
        assert!(matches!(validate(&cfg), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn rejects_header_unsafe_app_name() {
        let mut cfg = AppConfig::default();
        cfg.app.name = "demo app".into();
        assert!(matches!(validate(&cfg), Err(ConfigError::InvalidAppName(_))));
    }
}
