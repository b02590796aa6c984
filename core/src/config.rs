// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de;

use crate::error::Error;
use crate::session::DEFAULT_DRAFT_DEBOUNCE;

/// The name of the application.
pub const APP_NAME: &str = "baatasari";

const DATABASE_FILE: &str = "baatasari.db";

/// Configuration of the organizer core.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Config {
    /// Directory for storing application state.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,

    /// Delay before a draft change is written to local storage.
    #[serde(default)]
    pub draft_debounce: ConfigDuration,

    /// Keep local storage in memory only, nothing survives the process.
    #[serde(default)]
    pub in_memory: bool,
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<(), Error> {
        match &self.state_dir {
            Some(a) => {
                let expanded = expand_path(a).map_err(|e| {
                    Error::Config(format!("Failed to expand state directory path: {e}"))
                })?;
                self.state_dir = Some(expanded);
            }

            None => match get_state_dir() {
                Ok(a) => self.state_dir = Some(a.join(APP_NAME)),
                Err(e) => tracing::warn!(err = %e, "failed to get state directory"),
            },
        };

        Ok(())
    }

    /// Location of the local storage database, `None` for an in-memory store.
    pub fn database_path(&self) -> Option<PathBuf> {
        if self.in_memory {
            return None;
        }
        self.state_dir.as_ref().map(|a| a.join(DATABASE_FILE))
    }
}

/// A duration read from a string like "500ms", "1s" or "1m".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigDuration(Duration);

impl ConfigDuration {
    pub fn get(self) -> Duration {
        self.0
    }
}

impl Default for ConfigDuration {
    fn default() -> Self {
        Self(DEFAULT_DRAFT_DEBOUNCE)
    }
}

impl<'de> serde::Deserialize<'de> for ConfigDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DurationVisitor;

        impl<'de> de::Visitor<'de> for DurationVisitor {
            type Value = ConfigDuration;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(r#"a duration string like "500ms", "1s" or "1m""#)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                parse_duration(value)
                    .map(ConfigDuration)
                    .map_err(|e| de::Error::custom(e.to_string()))
            }
        }

        deserializer.deserialize_str(DurationVisitor)
    }
}

/// Handle tilde (~) and environment variables in the path
fn expand_path(path: &Path) -> Result<PathBuf, Error> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path
        .to_str()
        .ok_or_else(|| Error::Config("Invalid path".to_string()))?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle config directories
    let config_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in config_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_config_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, Error> {
    dirs::home_dir()
        .ok_or_else(|| Error::Config("User-specific home directory not found".to_string()))
}

/// User-specific configuration directory, e.g. `$XDG_CONFIG_HOME`.
pub fn get_config_dir() -> Result<PathBuf, Error> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| Error::Config("User-specific config directory not found".to_string()))
}

fn get_state_dir() -> Result<PathBuf, Error> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_dir();
    state_dir.ok_or_else(|| Error::Config("User-specific state directory not found".to_string()))
}

/// Parse a duration string in the format "1m" / "1800s" / "500ms".
fn parse_duration(s: &str) -> Result<Duration, Error> {
    let number = |text: &str| {
        text.trim()
            .parse::<u64>()
            .map_err(|e| Error::Config(format!("Invalid duration {s:?}: {e}")))
    };

    // Milliseconds before minutes and seconds, they share the suffix
    if let Some(rest) = s.strip_suffix("ms") {
        Ok(Duration::from_millis(number(rest)?))
    } else if let Some(rest) = s.strip_suffix("m") {
        number(rest)?
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(|| Error::Config(format!("Invalid duration {s:?}: too large")))
    } else if let Some(rest) = s.strip_suffix("s") {
        Ok(Duration::from_secs(number(rest)?))
    } else {
        Err(Error::Config(format!("Invalid duration format: {s}")))
    }
}
