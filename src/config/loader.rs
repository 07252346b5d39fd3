//! Load configuration: defaults, optional `config` file, then `SHOP__*` environment variables.

use crate::config::{validate, AppConfig};
use crate::error::ConfigError;

/// Environment prefix; nested keys use `__` (e.g. `SHOP__SERVER__PORT=9000`).
pub const ENV_PREFIX: &str = "SHOP";

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Some("config"))
    }

    /// Like [`AppConfig::load`] with an explicit file stem (`None` skips the file).
    pub fn load_from(file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = ::config::Config::builder()
            .add_source(::config::Config::try_from(&AppConfig::default())?);
        if let Some(name) = file {
            builder = builder.add_source(::config::File::with_name(name).required(false));
        }
        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );
        let app_config: AppConfig = builder.build()?.try_deserialize()?;
        validate(&app_config)?;
        tracing::debug!(
            address = %app_config.server_address(),
            backend = ?app_config.storage.backend,
            app = %app_config.app.name,
            "configuration loaded"
        );
        Ok(app_config)
    }
}
