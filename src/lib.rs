//! Mission Planner waypoint/polygon file conversion.
//!
//! This crate provides tools for:
//! - Classifying and parsing `.waypoints` (QGC WPL) and `.poly` mission files
//! - Converting point sequences between the two formats
//! - Re-ordering a closed-loop path into back-and-forth mowing passes
//! - Writing output under collision-free derived file names
//!
//! # Example
//!
//! ```no_run
//! use waypoint_tool::config::ToolConfig;
//! use waypoint_tool::core::formats::MissionFormat;
//! use waypoint_tool::processors::convert::{convert, ConversionRequest};
//!
//! let config = ToolConfig::default();
//! let request = ConversionRequest {
//!     input: "field.poly".into(),
//!     target: MissionFormat::Waypoint,
//!     reverse_passes: 2,
//!     default_alt: 30.48,
//! };
//! let output = convert(&request, &config, &config.home).unwrap();
//! println!("wrote {}", output.display());
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod processors;

pub use config::ToolConfig;
pub use core::formats::MissionFormat;
pub use core::geo::GeoPoint;
pub use processors::convert::{ConversionRequest, ConvertError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
