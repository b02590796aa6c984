// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use tokio::fs;

use baatasari_core::{APP_NAME, Config as CoreConfig, get_config_dir};

const BAATASARI_CONFIG_ENV: &str = "BAATASARI_CONFIG";
const BAATASARI_DEV_ENV: &str = "BAATASARI_DEV";

const BAATASARI_DEV_VALID_TRUE: &[&str] = &["1", "true", "yes"];
const BAATASARI_DEV_VALID_FALSE: &[&str] = &["0", "false", "no"];

/// Resolves and reads the configuration.
///
/// The path comes from the flag, then `BAATASARI_CONFIG`, then the user config
/// directory. Only a missing file at the implicit default path yields defaults.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<(CoreConfig, Config), Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(BAATASARI_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        if let Some(true) = is_dev_mode() {
            return Err(format!(
                "Development environment detected ({BAATASARI_DEV_ENV} is set): config must be explicitly specified via --config or {BAATASARI_CONFIG_ENV} environment variable",
            ).into());
        }

        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            tracing::info!(path = %config.display(), "no config file, using defaults");
            return Ok((CoreConfig::default(), Config::default()));
        }
        config
    };

    fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()
        .map(|a| (a.core, a.cli))
}

/// Configuration of the command-line front end.
#[derive(Debug, Clone, Copy, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Show the welcome screen before the event wizard.
    pub splash: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { splash: true }
    }
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigRaw {
    core: CoreConfig,
    cli: Config,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn is_dev_mode() -> Option<bool> {
    if let Ok(val) = std::env::var(BAATASARI_DEV_ENV) {
        let lower = val.to_lowercase();
        if BAATASARI_DEV_VALID_TRUE.contains(&lower.as_str()) {
            Some(true)
        } else if BAATASARI_DEV_VALID_FALSE.contains(&lower.as_str()) {
            Some(false)
        } else {
            tracing::warn!(
                "Unrecognized value for {}: '{}'. Expected one of: {}. Treating as unset.",
                BAATASARI_DEV_ENV,
                val,
                format!(
                    "true: {}, false: {}",
                    BAATASARI_DEV_VALID_TRUE.join(", "),
                    BAATASARI_DEV_VALID_FALSE.join(", ")
                )
            );
            None
        }
    } else {
        None
    }
}
