//! Configuration loading for identigen.
//!
//! Configuration is loaded from TOML files with environment variable overrides,
//! e.g. `IDENTIGEN_AVATAR__MAX_SIZE=512` or `IDENTIGEN_SERVER__PORT=9000`.

use crate::generator::digest::HashAlgorithm;
use anyhow::{ensure, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "config.default.toml";

/// Largest accepted `max_size` and `max_grid`. Keeps `grid * half_width` and
/// the pixel buffer well inside `u32` and memory limits.
pub const SIZE_LIMIT: u32 = 8192;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct IdentigenConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub avatar: AvatarSettings,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// What to do when a caller asks for a resolution above `max_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OversizePolicy {
    /// Refuse the request (HTTP 413).
    #[default]
    Reject,
    /// Quietly render at `max_size` instead.
    Clamp,
}

/// Immutable settings shared by every generation call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AvatarSettings {
    #[serde(default = "default_name")]
    pub default_name: String,

    #[serde(default = "default_size")]
    pub default_size: u32,

    #[serde(default = "default_grid")]
    pub default_grid: u32,

    #[serde(default = "default_max_size")]
    pub max_size: u32,

    /// Larger grids are rejected rather than rendered.
    #[serde(default = "default_max_grid")]
    pub max_grid: u32,

    /// Keep each color channel within [30, 225].
    #[serde(default)]
    pub clamp_color: bool,

    #[serde(default)]
    pub oversize: OversizePolicy,

    #[serde(default)]
    pub hash: HashAlgorithm,
}

impl Default for AvatarSettings {
    fn default() -> Self {
        Self {
            default_name: default_name(),
            default_size: default_size(),
            default_grid: default_grid(),
            max_size: default_max_size(),
            max_grid: default_max_grid(),
            clamp_color: false,
            oversize: OversizePolicy::default(),
            hash: HashAlgorithm::default(),
        }
    }
}

fn default_name() -> String {
    "saitama".to_string()
}

fn default_size() -> u32 {
    256
}

fn default_grid() -> u32 {
    6
}

fn default_max_size() -> u32 {
    1080
}

fn default_max_grid() -> u32 {
    1080
}

impl AvatarSettings {
    /// Check the bounds every resolved request relies on.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.max_size > 0, "avatar.max_size must be positive");
        ensure!(
            self.max_size <= SIZE_LIMIT,
            "avatar.max_size must be at most {SIZE_LIMIT}, got {}",
            self.max_size
        );
        ensure!(
            self.default_size > 0 && self.default_size <= self.max_size,
            "avatar.default_size must be within 1..={}, got {}",
            self.max_size,
            self.default_size
        );
        ensure!(
            self.max_grid > 0 && self.max_grid <= SIZE_LIMIT,
            "avatar.max_grid must be within 1..={SIZE_LIMIT}, got {}",
            self.max_grid
        );
        ensure!(
            self.default_grid > 0 && self.default_grid <= self.max_grid,
            "avatar.default_grid must be within 1..={}, got {}",
            self.max_grid,
            self.default_grid
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
        }
    }
}

fn default_directory() -> String {
    "output".to_string()
}

impl IdentigenConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("IDENTIGEN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?;

        let config: IdentigenConfig = config
            .try_deserialize()
            .context("invalid identigen configuration")?;
        config.avatar.validate()?;
        Ok(config)
    }
}
