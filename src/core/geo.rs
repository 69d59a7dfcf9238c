//! Geographic point type and great-circle math.
//!
//! All calculations use the spherical approximation (haversine distance,
//! spherical midpoint) on a mean Earth radius. Mission files cover at most
//! a few kilometres, so ellipsoidal corrections are irrelevant here.

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A single mission point: latitude/longitude in degrees, altitude in meters.
///
/// Identity along a path is positional (the sequence order is the path
/// order); two distinct path entries may carry identical coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Altitude in meters.
    pub alt: f64,
    /// Free-form label, empty for derived points.
    pub tag: String,
}

impl GeoPoint {
    /// Creates an untagged point.
    pub fn new(lat: f64, lng: f64, alt: f64) -> Self {
        Self {
            lat,
            lng,
            alt,
            tag: String::new(),
        }
    }
}

/// Great-circle distance between two points in meters (haversine formula).
///
/// Symmetric, and zero exactly when the two points share latitude and
/// longitude. Altitude is ignored.
pub fn distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let delta_phi = (b.lat - a.lat).to_radians();
    let delta_lambda = (b.lng - a.lng).to_radians();

    let h = (delta_phi / 2.0).sin() * (delta_phi / 2.0).sin()
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin() * (delta_lambda / 2.0).sin();
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Spherical midpoint of two points.
///
/// The returned altitude is the arithmetic mean of the two altitudes and the
/// tag is empty. Antipodal inputs are a degenerate case and not supported.
pub fn midpoint(a: &GeoPoint, b: &GeoPoint) -> GeoPoint {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let lambda1 = a.lng.to_radians();
    let delta_lambda = (b.lng - a.lng).to_radians();

    let bx = phi2.cos() * delta_lambda.cos();
    let by = phi2.cos() * delta_lambda.sin();
    let phi_mid = (phi1.sin() + phi2.sin())
        .atan2(((phi1.cos() + bx) * (phi1.cos() + bx) + by * by).sqrt());
    let lambda_mid = lambda1 + by.atan2(phi1.cos() + bx);

    GeoPoint::new(
        phi_mid.to_degrees(),
        lambda_mid.to_degrees(),
        (a.alt + b.alt) / 2.0,
    )
}
