//! Mission file writers for the waypoint and polygon formats.
//!
//! Both writers produce the complete file in one call: open, write, flush,
//! return. The output path comes from [`super::naming`], so a successful
//! write always creates a file that did not exist before.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use super::formats::NAV_WAYPOINT_CMD;
use super::geo::GeoPoint;

/// Header line written to polygon output.
pub const POLYGON_HEADER: &str = "# saved by Waypoint File Tool";

/// Header line written to waypoint output.
pub const WAYPOINT_HEADER: &str = "QGC WPL 110";

/// Errors that can occur during write operations.
#[derive(Error, Debug)]
pub enum WriteError {
    /// Failed to create the output file.
    #[error("failed to create file '{path}': {source}")]
    CreateFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write data to the output file.
    #[error("failed to write to file '{path}': {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Tab-delimited record writing error.
    #[error("record write error for '{path}': {source}")]
    CsvError {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Result type for write operations.
pub type Result<T> = std::result::Result<T, WriteError>;

fn create_buffered_writer(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| WriteError::CreateFile {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(BufWriter::new(file))
}

/// Write points as a polygon boundary file.
///
/// One comment header line, then `"<lat> <lng>"` per point.
pub fn write_polygon_file(path: &Path, points: &[GeoPoint]) -> Result<()> {
    let mut writer = create_buffered_writer(path)?;
    let path_str = path.display().to_string();

    writeln!(writer, "{}", POLYGON_HEADER).map_err(|e| WriteError::WriteFile {
        path: path_str.clone(),
        source: e,
    })?;
    for point in points {
        writeln!(writer, "{} {}", point.lat, point.lng).map_err(|e| WriteError::WriteFile {
            path: path_str.clone(),
            source: e,
        })?;
    }

    writer.flush().map_err(|e| WriteError::WriteFile {
        path: path_str,
        source: e,
    })?;

    Ok(())
}

/// Write points as a QGC WPL waypoint mission file.
///
/// Writes the fixed header, a synthetic home record as waypoint 0 (frame 0,
/// current flag 1), then one NAV_WAYPOINT record per point with sequence
/// numbers starting at 1 (frame 3, relative altitude). Records are
/// tab-delimited.
pub fn write_waypoint_file(path: &Path, points: &[GeoPoint], home: &GeoPoint) -> Result<()> {
    let mut writer = create_buffered_writer(path)?;
    let path_str = path.display().to_string();

    writeln!(writer, "{}", WAYPOINT_HEADER).map_err(|e| WriteError::WriteFile {
        path: path_str.clone(),
        source: e,
    })?;

    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer);

    csv_writer
        .write_record(waypoint_record(0, "1", "0", home))
        .map_err(|e| WriteError::CsvError {
            path: path_str.clone(),
            source: e,
        })?;

    for (i, point) in points.iter().enumerate() {
        csv_writer
            .write_record(waypoint_record(i + 1, "0", "3", point))
            .map_err(|e| WriteError::CsvError {
                path: path_str.clone(),
                source: e,
            })?;
    }

    csv_writer.flush().map_err(|e| WriteError::WriteFile {
        path: path_str,
        source: e,
    })?;

    Ok(())
}

fn waypoint_record(seq: usize, current: &str, frame: &str, point: &GeoPoint) -> Vec<String> {
    vec![
        seq.to_string(),
        current.to_string(),
        frame.to_string(),
        NAV_WAYPOINT_CMD.to_string(),
        "0".to_string(),
        "0".to_string(),
        "0".to_string(),
        "0".to_string(),
        point.lat.to_string(),
        point.lng.to_string(),
        point.alt.to_string(),
        "1".to_string(),
    ]
}
