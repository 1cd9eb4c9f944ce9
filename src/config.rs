//! Configuration for the default font manager.
//!
//! Values come from an optional JSON file named by `FONTMGR_CONFIG`, then
//! individual environment variables override them:
//!
//! | Variable | Effect |
//! |---|---|
//! | `FONTMGR_BACKEND` | `system` or `empty` |
//! | `FONTMGR_FONT_DIRS` | extra font directories, platform path-list syntax |
//! | `FONTMGR_SKIP_SYSTEM_FONTS` | `1`/`true` to skip the platform font directories |

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_ENV: &str = "FONTMGR_CONFIG";
pub const BACKEND_ENV: &str = "FONTMGR_BACKEND";
pub const FONT_DIRS_ENV: &str = "FONTMGR_FONT_DIRS";
pub const SKIP_SYSTEM_FONTS_ENV: &str = "FONTMGR_SKIP_SYSTEM_FONTS";

/// Which backend the platform factory builds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// fontdb-backed system fonts (needs the `system-fonts` feature).
    #[default]
    System,
    /// No platform backend; the default manager has no families.
    Empty,
}

impl BackendKind {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "system" => Some(BackendKind::System),
            "empty" | "none" => Some(BackendKind::Empty),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct FontManagerConfig {
    pub backend: BackendKind,
    pub load_system_fonts: bool,
    pub font_dirs: Vec<PathBuf>,
}

impl Default for FontManagerConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::System,
            load_system_fonts: true,
            font_dirs: Vec::new(),
        }
    }
}

impl FontManagerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    /// Reads the configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let mut config = match lookup(CONFIG_ENV) {
            Some(path) => Self::from_file(PathBuf::from(path))?,
            None => Self::default(),
        };

        if let Some(value) = lookup(BACKEND_ENV) {
            let value = value.to_string_lossy();
            config.backend = BackendKind::parse(&value).ok_or_else(|| ConfigError::InvalidEnv {
                variable: BACKEND_ENV,
                value: value.to_string(),
            })?;
        }

        if let Some(dirs) = lookup(FONT_DIRS_ENV) {
            config
                .font_dirs
                .extend(std::env::split_paths(&dirs).filter(|p| !p.as_os_str().is_empty()));
        }

        if let Some(value) = lookup(SKIP_SYSTEM_FONTS_ENV) {
            let skip = parse_flag(SKIP_SYSTEM_FONTS_ENV, &value.to_string_lossy())?;
            config.load_system_fonts = !skip;
        }

        log::debug!("Font manager config: {:?}", config);
        Ok(config)
    }

    #[cfg(feature = "system-fonts")]
    pub fn system_options(&self) -> fontmgr_system::SystemFontOptions {
        fontmgr_system::SystemFontOptions {
            load_system_fonts: self.load_system_fonts,
            font_dirs: self.font_dirs.clone(),
        }
    }
}

fn parse_flag(variable: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            variable,
            value: value.to_string(),
        }),
    }
}
