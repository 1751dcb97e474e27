// ============================================================
// CONFIGURATION LOADER
// ============================================================
// Detection settings resolve in three layers: compiled defaults,
// an optional Transplant.toml, then TRANSPLANT_-prefixed env vars

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use tracing::debug;

use crate::domain::column::DetectionConfig;
use crate::domain::error::{ImportError, Result};

pub const CONFIG_FILE: &str = "Transplant.toml";
pub const ENV_PREFIX: &str = "TRANSPLANT_";

/// Load detection settings from the environment, falling back to defaults
pub fn load_config() -> Result<DetectionConfig> {
    // A .env next to the binary participates like any other env var
    let _ = dotenvy::dotenv();

    let config: DetectionConfig = Figment::from(Serialized::defaults(DetectionConfig::default()))
        .merge(Toml::file(CONFIG_FILE))
        .merge(Env::prefixed(ENV_PREFIX))
        .extract()
        .map_err(|e| ImportError::ConfigError(format!("Failed to load settings: {}", e)))?;

    config.validate().map_err(ImportError::ConfigError)?;

    debug!(
        sample_size = config.sample_size,
        required_matches = config.required_matches,
        parse_dms = config.parse_dms,
        "Detection settings loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load_without_environment() {
        figment::Jail::expect_with(|_jail| {
            let config = load_config().expect("defaults should load");
            assert_eq!(config.sample_size, 5);
            assert_eq!(config.required_matches, 3);
            assert!(!config.parse_dms);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, "sample_size = 7\nmin_decimal_places = 3\n")?;
            jail.set_env("TRANSPLANT_SAMPLE_SIZE", "9");

            let config = load_config().expect("layered settings should load");
            assert_eq!(config.sample_size, 9);
            assert_eq!(config.min_decimal_places, 3);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TRANSPLANT_REQUIRED_MATCHES", "99");
            assert!(load_config().is_err());
            Ok(())
        });
    }
}
