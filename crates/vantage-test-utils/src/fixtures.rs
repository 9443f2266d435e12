//! Reusable point-set fixtures.
//!
//! Every generator takes an explicit seed and draws from a ChaCha8 RNG, so
//! a failing test reproduces from its seed alone.
//!
//! - [`random_geo_points`]: points on the Earth sphere from uniform lat/lon.
//! - [`random_cube_points`]: points uniform in an axis-aligned cube.
//! - [`cluster`] / [`disjoint_clusters`]: tight groups far apart.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use vantage_core::{GeoCoord, Point, PointId, PointSet};

/// `n` points at uniformly drawn latitudes in `[-90, 90]` and longitudes
/// in `[-180, 180]`, with ids `0..n`.
pub fn random_geo_points(n: usize, seed: u64) -> PointSet {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let points = (0..n).map(|i| {
        let lat = rng.random_range(-90.0..=90.0);
        let lon = rng.random_range(-180.0..=180.0);
        let coord = GeoCoord::new(lat, lon).expect("sampled inside valid ranges");
        Point::from_geo(PointId(i as i64), coord)
    });
    PointSet::new(points.collect::<Vec<_>>()).expect("ids are unique")
}

/// `n` points uniform in `[-half_extent, half_extent]^3`, with ids `0..n`.
pub fn random_cube_points(n: usize, half_extent: f64, seed: u64) -> PointSet {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut coord = || rng.random_range(-half_extent..=half_extent);
    let points: Vec<_> = (0..n)
        .map(|i| Point::new(PointId(i as i64), coord(), coord(), coord()))
        .collect();
    PointSet::new(points).expect("ids are unique")
}

/// `count` points within `spread` of `center` on every axis, with ids
/// starting at `first_id`.
pub fn cluster(
    first_id: i64,
    center: [f64; 3],
    count: usize,
    spread: f64,
    seed: u64,
) -> Vec<Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let [x, y, z] = center.map(|c| c + rng.random_range(-spread..=spread));
            Point::new(PointId(first_id + i as i64), x, y, z)
        })
        .collect()
}

/// Two clusters 1000 units apart: ids `0..small` around the origin and
/// ids `100..100 + large` around `(1000, 0, 0)`. Each cluster fits inside
/// a radius-8 neighbourhood of any of its members.
pub fn disjoint_clusters(small: usize, large: usize) -> PointSet {
    let mut points = cluster(0, [0.0; 3], small, 1.0, 1);
    points.extend(cluster(100, [1000.0, 0.0, 0.0], large, 1.0, 2));
    PointSet::new(points).expect("cluster ids do not overlap")
}
