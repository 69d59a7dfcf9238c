//! Mission file format descriptors and content-based classification.
//!
//! Two tabular formats are supported:
//! - Mission Planner `.waypoints` (QGC WPL): 12 whitespace-separated fields
//!   per data line, field 3 is the MAVLink command id and must be `16`
//!   (NAV_WAYPOINT) for the line to carry a navigable point.
//! - `.poly` boundary files: two fields per data line, `<lat> <lng>`.
//!
//! Classification inspects the second line of the file (the first possible
//! data line in either format) and picks the format whose field count
//! matches.

use serde::{Deserialize, Serialize};

/// MAVLink command id for a plain navigation waypoint.
pub const NAV_WAYPOINT_CMD: &str = "16";

/// The two supported mission file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MissionFormat {
    /// QGC WPL waypoint mission file.
    Waypoint,
    /// Plain lat/lng polygon boundary file.
    Polygon,
}

impl MissionFormat {
    /// File extension used when writing this format, including the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            MissionFormat::Waypoint => ".waypoints",
            MissionFormat::Polygon => ".poly",
        }
    }
}

/// Field layout of one mission file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSpec {
    /// Which format this spec describes.
    pub format: MissionFormat,
    /// Whitespace-token index of the latitude field.
    pub lat_index: usize,
    /// Whitespace-token index of the longitude field.
    pub lng_index: usize,
    /// Token index of the altitude field, if the format carries one.
    pub alt_index: Option<usize>,
    /// Line index at which data lines begin.
    pub first_data_line: usize,
}

const WAYPOINT_SPEC: FormatSpec = FormatSpec {
    format: MissionFormat::Waypoint,
    lat_index: 8,
    lng_index: 9,
    alt_index: Some(10),
    first_data_line: 2,
};

const POLYGON_SPEC: FormatSpec = FormatSpec {
    format: MissionFormat::Polygon,
    lat_index: 0,
    lng_index: 1,
    alt_index: None,
    first_data_line: 1,
};

impl FormatSpec {
    /// Returns the fixed descriptor for a format.
    pub fn for_format(format: MissionFormat) -> &'static FormatSpec {
        match format {
            MissionFormat::Waypoint => &WAYPOINT_SPEC,
            MissionFormat::Polygon => &POLYGON_SPEC,
        }
    }

    /// Whether a raw line is a valid data line for this format.
    ///
    /// Non-conforming lines (trailing blanks, header remnants, non-waypoint
    /// commands) are simply not data lines; they are skipped, not errors.
    pub fn is_valid_line(&self, line: &str) -> bool {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match self.format {
            MissionFormat::Waypoint => tokens.len() == 12 && tokens[3] == NAV_WAYPOINT_CMD,
            MissionFormat::Polygon => tokens.len() == 2,
        }
    }
}

/// Classifies raw file lines, picking the format whose field count matches
/// line index 1. Returns `None` when neither format matches (the caller
/// turns that into an invalid-file error with the path attached).
///
/// Requires at least 2 lines; any file worth processing has more than one.
pub fn classify(lines: &[String]) -> Option<&'static FormatSpec> {
    if lines.len() < 2 {
        return None;
    }
    match lines[1].split_whitespace().count() {
        12 => Some(&WAYPOINT_SPEC),
        2 => Some(&POLYGON_SPEC),
        _ => None,
    }
}
