//! Latitude/longitude ↔ Cartesian conversion on a fixed-radius sphere.
//!
//! Point sets are usually produced from geographic coordinates and
//! selected positions are presented back in geographic form. Both
//! directions use [`EARTH_RADIUS_KM`], so Cartesian distances (and view
//! radii) are in kilometres.

use crate::error::CoreError;
use crate::id::PointId;
use crate::point::Point;

/// Sphere radius used for every conversion.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated geographic coordinate in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoCoord {
    lat: f64,
    lon: f64,
}

impl GeoCoord {
    /// Create a coordinate, rejecting latitudes outside `[-90, 90]` and
    /// longitudes outside `[-180, 180]` (including NaN).
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoreError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoreError::LatitudeOutOfRange { value: lat });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoreError::LongitudeOutOfRange { value: lon });
        }
        Ok(Self { lat, lon })
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

/// Project a geographic coordinate onto the sphere surface.
pub fn lat_lon_to_cartesian(coord: GeoCoord) -> [f64; 3] {
    let lat = coord.lat.to_radians();
    let lon = coord.lon.to_radians();
    [
        EARTH_RADIUS_KM * lat.cos() * lon.cos(),
        EARTH_RADIUS_KM * lat.cos() * lon.sin(),
        EARTH_RADIUS_KM * lat.sin(),
    ]
}

/// Recover latitude/longitude from a Cartesian position.
///
/// Positions off the sphere (grid-search candidates, for instance) are
/// projected radially. For any finite position the result lies within
/// the ranges [`GeoCoord::new`] accepts; the origin maps to `(0, 0)`.
/// Non-finite input yields NaN components and is not checked.
pub fn cartesian_to_lat_lon(position: [f64; 3]) -> GeoCoord {
    let [x, y, z] = position;
    let lat = z.atan2(x.hypot(y)).to_degrees();
    let lon = y.atan2(x).to_degrees();
    GeoCoord { lat, lon }
}

impl Point {
    /// Create a point on the sphere from a geographic coordinate.
    pub fn from_geo(id: impl Into<PointId>, coord: GeoCoord) -> Self {
        let [x, y, z] = lat_lon_to_cartesian(coord);
        Point::new(id, x, y, z)
    }

    /// Geographic form of this point's position.
    pub fn to_geo(&self) -> GeoCoord {
        cartesian_to_lat_lon(self.coords())
    }
}
