//! Great-circle navigation on a sphere of radius `EARTH_RADIUS`.
//!
//! Distances are in meters, bearings in radians clockwise from true north,
//! normalised into [0, 2π).

use std::f64::consts::{PI, TAU};

use crate::constants::EARTH_RADIUS;
use crate::types::GeoPoint;

/// Great-circle distance using the haversine formula.
pub fn distance_to(a: impl Into<GeoPoint>, b: impl Into<GeoPoint>) -> f64 {
    let (a, b) = (a.into(), b.into());
    let slat = ((b.lat - a.lat).to_radians() / 2.0).sin();
    let slon = ((b.lon - a.lon).to_radians() / 2.0).sin();
    let aa = slat * slat + a.lat.to_radians().cos() * b.lat.to_radians().cos() * slon * slon;
    EARTH_RADIUS * 2.0 * aa.sqrt().atan2((1.0 - aa).sqrt())
}

/// Initial true bearing of `b` as seen from `a`.
pub fn heading_to(a: impl Into<GeoPoint>, b: impl Into<GeoPoint>) -> f64 {
    let (a, b) = (a.into(), b.into());
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlon = (b.lon - a.lon).to_radians();
    let clat2 = lat2.cos();
    let y = dlon.sin() * clat2;
    let x = lat1.cos() * lat2.sin() - lat1.sin() * clat2 * dlon.cos();
    y.atan2(x).rem_euclid(TAU)
}

/// Point `distance` meters from `a` along `heading`.
///
/// Assumes `distance` is well under a quarter of the circumference.
pub fn displaced(a: impl Into<GeoPoint>, heading: f64, distance: f64) -> GeoPoint {
    let a = a.into();
    let lat1 = a.lat.to_radians();
    let lon1 = a.lon.to_radians();
    let dang = distance / EARTH_RADIUS;
    let sang = dang.sin();
    let lat = (lat1.sin() * dang.cos() + lat1.cos() * sang * heading.cos()).asin();
    let lon = (lon1 + (heading.sin() * sang / lat1.cos()).asin() + PI).rem_euclid(TAU) - PI;
    GeoPoint::new(lat.to_degrees(), lon.to_degrees())
}
