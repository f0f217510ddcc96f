//! Equirectangular projection centred on the observer, giving renderer
//! coordinates in meters.

use std::f64::consts::PI;

use glam::DVec3;

use crate::constants::EARTH_RADIUS;
use crate::types::GeoPoint;

/// Meters per degree of latitude on the simulation sphere.
const METERS_PER_DEGREE: f64 = EARTH_RADIUS * PI / 180.0;

/// East/north/up offsets from the observer, in meters.
///
/// Longitude differences take the short way round the antimeridian, so
/// vessels just across 180° stay next to an observer on the other side.
#[derive(Debug, Clone)]
pub struct GeoProjection {
    observer: GeoPoint,
    /// Meters per degree of longitude at the observer's latitude.
    east_scale: f64,
}

impl GeoProjection {
    pub fn new(observer: GeoPoint) -> Self {
        Self {
            observer,
            east_scale: METERS_PER_DEGREE * observer.lat.to_radians().cos(),
        }
    }

    /// Offset of `point` at altitude `alt` from the observer.
    pub fn to_local(&self, point: GeoPoint, alt: f64) -> DVec3 {
        let dlon = (point.lon - self.observer.lon + 180.0).rem_euclid(360.0) - 180.0;
        DVec3::new(
            dlon * self.east_scale,
            (point.lat - self.observer.lat) * METERS_PER_DEGREE,
            alt,
        )
    }

    /// Ground distance from the observer, ignoring altitude.
    pub fn horizontal_range(&self, point: GeoPoint) -> f64 {
        self.to_local(point, 0.0).truncate().length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_north_offset_and_altitude() {
        let proj = GeoProjection::new(GeoPoint::new(50.8, -1.3));
        let local = proj.to_local(GeoPoint::new(50.9, -1.3), 12.0);
        assert!(local.x.abs() < 1e-6);
        assert!((local.y - 0.1 * METERS_PER_DEGREE).abs() < 1e-6);
        assert_eq!(local.z, 12.0);
    }

    #[test]
    fn test_horizontal_range_ignores_altitude() {
        let proj = GeoProjection::new(GeoPoint::new(0.0, 0.0));
        let range = proj.horizontal_range(GeoPoint::new(0.0, 0.1));
        assert!((range - 0.1 * METERS_PER_DEGREE).abs() < 1e-6, "got {range}");
    }

    #[test]
    fn test_origin_maps_to_zero() {
        let proj = GeoProjection::new(GeoPoint::new(-33.86, 151.21));
        let local = proj.to_local(GeoPoint::new(-33.86, 151.21), 0.0);
        assert!(local.length() < 1e-6);
    }

    #[test]
    fn test_longitude_scale_at_sixty_north() {
        let proj = GeoProjection::new(GeoPoint::new(60.0, 0.0));
        let local = proj.to_local(GeoPoint::new(60.0, 1.0), 0.0);
        let expected = METERS_PER_DEGREE * 60.0_f64.to_radians().cos();
        assert!((local.x - expected).abs() < 1.0, "{} vs {expected}", local.x);
    }

    #[test]
    fn test_short_way_across_antimeridian() {
        let proj = GeoProjection::new(GeoPoint::new(0.0, 179.9));
        let local = proj.to_local(GeoPoint::new(0.0, -179.9), 0.0);
        assert!(local.x > 0.0 && local.x < 30_000.0, "got {}", local.x);

        let proj = GeoProjection::new(GeoPoint::new(0.0, -179.9));
        let local = proj.to_local(GeoPoint::new(0.0, 179.9), 0.0);
        assert!(local.x < 0.0 && local.x > -30_000.0, "got {}", local.x);
    }
}
