//! The conversion service: the one entry point callers use.
//!
//! Orchestrates the pipeline: read and classify the source file, extract the
//! point sequence, optionally run perimeter reversal, then serialize to a
//! collision-free output path next to the source.

use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use crate::config::ToolConfig;
use crate::core::formats::MissionFormat;
use crate::core::geo::GeoPoint;
use crate::core::loaders::{self, LoaderError};
use crate::core::naming;
use crate::core::writers::{self, WriteError};
use crate::processors::reverse;

/// Errors that can occur during a conversion.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Loader(#[from] LoaderError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// One conversion invocation. Not persisted; built per call.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// Source mission file.
    pub input: PathBuf,
    /// Format to write.
    pub target: MissionFormat,
    /// Perimeter reversal passes; ignored for polygon targets.
    pub reverse_passes: usize,
    /// Altitude in meters for points from formats without an altitude field.
    pub default_alt: f64,
}

/// Supplies the home position written as waypoint 0 in waypoint output.
///
/// The host environment owns the home location; the conversion core only
/// consumes it. The config-backed implementation lives in [`crate::config`].
pub trait HomeLocationProvider {
    fn home_location(&self) -> GeoPoint;
}

/// Runs one conversion and returns the created output path.
///
/// Perimeter reversal only applies when the target is a waypoint file and at
/// least one reverse pass was requested; polygon output always preserves the
/// source point order.
///
/// # Errors
///
/// Returns [`ConvertError::Loader`] when the source is missing, matches
/// neither format, or carries a corrupt coordinate, and
/// [`ConvertError::Write`] when the output file cannot be created or
/// written.
pub fn convert(
    request: &ConversionRequest,
    config: &ToolConfig,
    home: &dyn HomeLocationProvider,
) -> Result<PathBuf> {
    let (lines, spec) = loaders::read_mission_file(&request.input)?;
    let mut points = loaders::parse_points(&lines, spec, request.default_alt, &request.input)?;

    if request.target == MissionFormat::Waypoint && request.reverse_passes > 0 {
        points = reverse::reverse_perimeter(points, request.reverse_passes);
    }

    let output = naming::output_path(
        &request.input,
        request.target.extension(),
        &config.output.prefix,
        &config.output.suffix,
    );

    match request.target {
        MissionFormat::Polygon => writers::write_polygon_file(&output, &points)?,
        MissionFormat::Waypoint => {
            writers::write_waypoint_file(&output, &points, &home.home_location())?
        }
    }

    info!(
        "converted {} -> {} ({} points)",
        request.input.display(),
        output.display(),
        points.len()
    );

    Ok(output)
}

/// Classifies a mission file and counts its points without writing output.
///
/// Backs the `inspect` command; uses the same loader pipeline as `convert`.
pub fn inspect(path: &Path, default_alt: f64) -> Result<(MissionFormat, usize)> {
    let (lines, spec) = loaders::read_mission_file(path)?;
    let points = loaders::parse_points(&lines, spec, default_alt, path)?;
    Ok((spec.format, points.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    struct FixedHome(GeoPoint);

    impl HomeLocationProvider for FixedHome {
        fn home_location(&self) -> GeoPoint {
            self.0.clone()
        }
    }

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    fn request(input: PathBuf, target: MissionFormat) -> ConversionRequest {
        ConversionRequest {
            input,
            target,
            reverse_passes: 0,
            default_alt: 30.48,
        }
    }

    fn home() -> FixedHome {
        FixedHome(GeoPoint::new(33.31256, -111.68366, 1335.7))
    }

    const POLY_CONTENT: &str = "# boundary\n33.0 -111.0\n33.1 -111.0\n33.1 -111.1\n";

    #[test]
    fn test_polygon_to_waypoint() {
        let dir = tempdir().unwrap();
        let input = write_file(dir.path(), "field.poly", POLY_CONTENT);
        let config = ToolConfig::default();

        let out = convert(&request(input, MissionFormat::Waypoint), &config, &home()).unwrap();

        assert_eq!(out, dir.path().join("zz_field_00.waypoints"));
        let content = fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "QGC WPL 110");
        // Home record plus one record per point.
        assert_eq!(lines.len(), 5);
        assert!(lines[2].starts_with("1\t0\t3\t16\t"));
    }

    #[test]
    fn test_waypoint_to_polygon() {
        let dir = tempdir().unwrap();
        let input = write_file(
            dir.path(),
            "mission.waypoints",
            "QGC WPL 110\n\
             0\t1\t0\t16\t0\t0\t0\t0\t33.0\t-111.0\t1335.7\t1\n\
             1\t0\t3\t16\t0\t0\t0\t0\t33.1\t-111.1\t30\t1\n\
             2\t0\t3\t16\t0\t0\t0\t0\t33.2\t-111.2\t30\t1\n",
        );
        let config = ToolConfig::default();

        let out = convert(&request(input, MissionFormat::Polygon), &config, &home()).unwrap();

        assert_eq!(out, dir.path().join("zz_mission_00.poly"));
        let content = fs::read_to_string(&out).unwrap();
        assert_eq!(content, "# saved by Waypoint File Tool\n33.1 -111.1\n33.2 -111.2\n");
    }

    #[test]
    fn test_reclassifying_output_is_idempotent() {
        let dir = tempdir().unwrap();
        let input = write_file(dir.path(), "field.poly", POLY_CONTENT);
        let config = ToolConfig::default();

        let out = convert(&request(input, MissionFormat::Waypoint), &config, &home()).unwrap();
        let (format, count) = inspect(&out, 30.48).unwrap();

        assert_eq!(format, MissionFormat::Waypoint);
        // The synthetic home record uses frame 0 on line 1, which sits before
        // the first data line and is not counted.
        assert_eq!(count, 3);
    }

    #[test]
    fn test_second_conversion_gets_next_name() {
        let dir = tempdir().unwrap();
        let input = write_file(dir.path(), "field.poly", POLY_CONTENT);
        let config = ToolConfig::default();

        let first = convert(&request(input.clone(), MissionFormat::Waypoint), &config, &home())
            .unwrap();
        let second = convert(&request(input, MissionFormat::Waypoint), &config, &home()).unwrap();

        assert_eq!(first, dir.path().join("zz_field_00.waypoints"));
        assert_eq!(second, dir.path().join("zz_field_01.waypoints"));
        assert!(first.exists() && second.exists());
    }

    #[test]
    fn test_missing_input_fails() {
        let dir = tempdir().unwrap();
        let config = ToolConfig::default();
        let result = convert(
            &request(dir.path().join("absent.poly"), MissionFormat::Polygon),
            &config,
            &home(),
        );
        assert!(matches!(
            result,
            Err(ConvertError::Loader(LoaderError::InvalidFile { .. }))
        ));
    }

    #[test]
    fn test_reverse_passes_ignored_for_polygon_target() {
        let dir = tempdir().unwrap();
        let input = write_file(dir.path(), "field.poly", POLY_CONTENT);
        let config = ToolConfig::default();

        let mut req = request(input, MissionFormat::Polygon);
        req.reverse_passes = 3;
        let out = convert(&req, &config, &home()).unwrap();

        let content = fs::read_to_string(&out).unwrap();
        // Source order preserved, no bridge or rotation points added.
        assert_eq!(content.lines().count(), 4);
    }
}
