//! Core data types and mission file I/O.

pub mod formats;
pub mod geo;
pub mod loaders;
pub mod naming;
pub mod writers;

pub use formats::{FormatSpec, MissionFormat};
pub use geo::GeoPoint;
pub use loaders::{parse_points, read_mission_file, LoaderError};
pub use writers::{write_polygon_file, write_waypoint_file, WriteError};
