//! Configuration types for the waypoint file tool.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::geo::GeoPoint;
use crate::processors::convert::HomeLocationProvider;

/// Configuration for output file naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Prefix ensured on every output file name
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Suffix ensured on every output file name (before the counter)
    #[serde(default)]
    pub suffix: String,
}

fn default_prefix() -> String {
    "zz_".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            suffix: String::new(),
        }
    }
}

/// A configured lat/lng/alt position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct Position {
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
    #[serde(default)]
    pub alt: f64,
}

impl Position {
    fn to_point(self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng, self.alt)
    }
}

/// Home location settings for waypoint output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeConfig {
    /// Live home location, if the host has set one
    #[serde(default)]
    pub home: Position,

    /// Fallback used when no live home location is set
    #[serde(default = "default_planned_home")]
    pub planned_home: Position,
}

fn default_planned_home() -> Position {
    Position {
        lat: 33.31256,
        lng: -111.68366,
        alt: 1335.7,
    }
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            home: Position::default(),
            planned_home: default_planned_home(),
        }
    }
}

impl HomeLocationProvider for HomeConfig {
    /// An unset home location reads as (0, 0, 0); anything summing below 1
    /// is treated as unset and the planned home is used instead.
    fn home_location(&self) -> GeoPoint {
        let h = &self.home;
        if h.lat + h.lng + h.alt < 1.0 {
            self.planned_home.to_point()
        } else {
            h.to_point()
        }
    }
}

/// Main tool configuration combining all sub-configs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub output: OutputConfig,

    /// Altitude in meters for points read from formats without one
    #[serde(default = "default_altitude")]
    pub default_altitude: f64,

    #[serde(default)]
    pub home: HomeConfig,
}

fn default_altitude() -> f64 {
    30.48 // 100 ft
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            default_altitude: default_altitude(),
            home: HomeConfig::default(),
        }
    }
}

impl ToolConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: ToolConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
