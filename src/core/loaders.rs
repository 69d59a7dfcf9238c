//! Mission file loading and point extraction.
//!
//! Loading is a two-step pipeline: read the whole file into ordered lines
//! and classify the format from line 1, then walk the data lines and extract
//! `GeoPoint`s according to the format's field layout.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use super::formats::{self, FormatSpec};
use super::geo::GeoPoint;

/// Errors that can occur while loading a mission file.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// The file is missing, too short, or matches neither format.
    #[error("invalid mission file: {path}")]
    InvalidFile { path: PathBuf },

    /// Underlying read failure after the file was opened.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A structurally valid data line carried a non-numeric coordinate.
    #[error("bad coordinate '{field}' on line {line_no} of {path}")]
    BadCoordinate {
        path: PathBuf,
        line_no: usize,
        field: String,
    },
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Reads a mission file fully into ordered lines and classifies its format.
///
/// # Errors
///
/// Returns [`LoaderError::InvalidFile`] when the file does not exist, has
/// fewer than 2 lines, or line index 1 matches neither the 12-field waypoint
/// shape nor the 2-field polygon shape.
pub fn read_mission_file(path: &Path) -> Result<(Vec<String>, &'static FormatSpec)> {
    let file = File::open(path).map_err(|_| LoaderError::InvalidFile {
        path: path.to_path_buf(),
    })?;

    let reader = BufReader::new(file);
    let lines = reader
        .lines()
        .collect::<std::io::Result<Vec<String>>>()
        .map_err(|e| LoaderError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

    let spec = formats::classify(&lines).ok_or_else(|| LoaderError::InvalidFile {
        path: path.to_path_buf(),
    })?;

    debug!(
        "classified {} as {:?} ({} lines)",
        path.display(),
        spec.format,
        lines.len()
    );

    Ok((lines, spec))
}

/// Extracts the ordered point sequence from classified lines.
///
/// Data lines start at `spec.first_data_line`. Lines that fail the format's
/// per-line validator (blank trailers, non-waypoint commands) are skipped
/// silently. When the format has no altitude field, `default_alt` is used.
///
/// # Errors
///
/// Returns [`LoaderError::BadCoordinate`] when a line that passed the
/// validator carries a lat/lng/alt field that does not parse as a number.
/// A corrupted coordinate aborts the conversion rather than silently
/// dropping part of the path.
pub fn parse_points(
    lines: &[String],
    spec: &FormatSpec,
    default_alt: f64,
    path: &Path,
) -> Result<Vec<GeoPoint>> {
    let mut points = Vec::new();

    for (line_no, line) in lines.iter().enumerate().skip(spec.first_data_line) {
        if !spec.is_valid_line(line) {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let lat = parse_coord(tokens[spec.lat_index], path, line_no)?;
        let lng = parse_coord(tokens[spec.lng_index], path, line_no)?;
        let alt = match spec.alt_index {
            Some(i) => parse_coord(tokens[i], path, line_no)?,
            None => default_alt,
        };

        points.push(GeoPoint::new(lat, lng, alt));
    }

    debug!("parsed {} points from {}", points.len(), path.display());
    Ok(points)
}

fn parse_coord(field: &str, path: &Path, line_no: usize) -> Result<f64> {
    field.parse().map_err(|_| LoaderError::BadCoordinate {
        path: path.to_path_buf(),
        line_no,
        field: field.to_string(),
    })
}
