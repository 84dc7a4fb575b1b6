use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::Serialize;

use super::SearchConfig;
use super::smart_load;
use crate::error::ConfigError;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

const ENV_PREFIX: &str = "SEARCH_";

impl SearchConfig {
    /// Load the merged configuration.
    ///
    /// With `custom_config` set, that file replaces the user config and must
    /// exist. `cli_overrides` is merged last and should only carry the
    /// settings actually given on the command line.
    pub fn load<T: Serialize>(
        custom_config: Option<&Path>,
        cli_overrides: Option<T>,
    ) -> Result<Self, ConfigError> {
        let figment = Self::figment(custom_config, cli_overrides)?;
        Self::from_figment(&figment)
    }

    /// Build the provider chain without extracting it
    pub fn figment<T: Serialize>(
        custom_config: Option<&Path>,
        cli_overrides: Option<T>,
    ) -> Result<Figment, ConfigError> {
        Self::figment_with_env(custom_config, cli_overrides, Self::env())
    }

    /// `SEARCH_*` variables, `__` separating nested keys
    pub(crate) fn env() -> Env {
        Env::prefixed(ENV_PREFIX).split("__")
    }

    pub(crate) fn figment_with_env<T: Serialize>(
        custom_config: Option<&Path>,
        cli_overrides: Option<T>,
        env: Env,
    ) -> Result<Figment, ConfigError> {
        tracing::trace!("CONFIG LOAD: Starting");

        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        if let Some(custom_path) = custom_config {
            if !custom_path.is_file() {
                return Err(ConfigError::MissingFile(custom_path.to_path_buf()));
            }
            tracing::debug!("Using config file {}", custom_path.display());
            figment = figment.merge(smart_load::auto(custom_path));
        } else if let Some(base) = Self::user_config_base_path() {
            figment = figment
                .merge(Toml::file(base.with_extension("toml")))
                .merge(Json::file(base.with_extension("json")))
                .merge(Yaml::file(base.with_extension("yaml")))
                .merge(Yaml::file(base.with_extension("yml")));
        }

        // Environment variables outrank files
        figment = figment.merge(env);

        if let Some(overrides) = cli_overrides {
            tracing::trace!("CONFIG LOAD: Applying CLI overrides");
            figment = figment.merge(Serialized::defaults(overrides));
        }

        Ok(figment)
    }

    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        figment
            .extract()
            .map_err(|e| ConfigError::Load(e.to_string()))
    }

    fn user_config_base_path() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".config").join("search").join("config"))
    }
}
