//! Turning loosely-typed caller input into validated generation parameters.
//!
//! Parameter problems are settled here and never reach the generator:
//! unparseable or non-positive integers fall back to defaults. Only an
//! oversized resolution under [`OversizePolicy::Reject`] or a grid above
//! `max_grid` is reported. Settings are assumed to have passed
//! [`AvatarSettings::validate`].

use crate::config::{AvatarSettings, OversizePolicy};
use crate::error::{AvatarError, Result};

/// Raw request as received from a query string or the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvatarRequest {
    pub name: Option<String>,
    pub resolution: Option<i64>,
    pub grid: Option<i64>,
}

/// Fully resolved parameters. `size` and `grid` are always positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarParams {
    pub name: String,
    pub size: u32,
    pub grid: u32,
}

/// Parse an optional integer, treating anything unparseable as absent.
pub fn parse_int_param(value: Option<&str>) -> Option<i64> {
    value.filter(|v| !v.is_empty())?.parse().ok()
}

impl AvatarRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_resolution(mut self, resolution: i64) -> Self {
        self.resolution = Some(resolution);
        self
    }

    pub fn with_grid(mut self, grid: i64) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Read `name`, `resolution` (or its alias `size`) and `grid` from query pairs.
    /// When a key repeats, its first value is used.
    pub fn from_query(pairs: &[(String, String)]) -> Self {
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        Self {
            name: get("name").map(str::to_string),
            resolution: parse_int_param(get("resolution"))
                .or_else(|| parse_int_param(get("size"))),
            grid: parse_int_param(get("grid")),
        }
    }

    pub fn resolve(&self, settings: &AvatarSettings) -> Result<AvatarParams> {
        let name = match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => settings.default_name.clone(),
        };

        let max = settings.max_size;
        let size = match self.resolution {
            Some(requested) if requested > i64::from(max) => match settings.oversize {
                OversizePolicy::Reject => {
                    return Err(AvatarError::PayloadTooLarge { requested, max })
                }
                OversizePolicy::Clamp => max,
            },
            // Bounded by `max` above, so the conversion cannot truncate.
            Some(requested) if requested > 0 => requested as u32,
            _ => settings.default_size,
        };

        let grid = match self.grid {
            Some(requested) if requested > i64::from(settings.max_grid) => {
                return Err(AvatarError::GridTooLarge {
                    requested,
                    max: settings.max_grid,
                })
            }
            Some(grid) if grid > 0 => grid as u32,
            _ => settings.default_grid,
        };

        Ok(AvatarParams { name, size, grid })
    }
}
