//! Fundamental geographic types.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_SOUTH, MAX_WEST, MIN_SOUTH, MIN_WEST};

/// Route waypoint in degrees, single precision. Live vessel positions use
/// `GeoPoint`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f32,
    pub lon: f32,
}

/// Live position in degrees, double precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// A 1°×1° tile, identified by its south and west integer boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileKey {
    pub south: i32,
    pub west: i32,
}

/// Static description of a kind of ship.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipClass {
    /// Cruising speed (m/s).
    pub speed: f64,
    /// Half the hull length (meters).
    pub semilen: f64,
}

impl Location {
    pub fn new(lat: f32, lon: f32) -> Self {
        Self { lat, lon }
    }

    /// Tile this waypoint falls in.
    pub fn tile(&self) -> TileKey {
        TileKey::containing(self.lat as f64, self.lon as f64)
    }
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn tile(&self) -> TileKey {
        TileKey::containing(self.lat, self.lon)
    }
}

impl From<Location> for GeoPoint {
    fn from(loc: Location) -> Self {
        Self {
            lat: loc.lat as f64,
            lon: loc.lon as f64,
        }
    }
}

impl TileKey {
    pub const fn new(south: i32, west: i32) -> Self {
        Self { south, west }
    }

    /// Tile containing the given coordinate. Latitude 90 belongs to the
    /// northernmost tile; longitude 180 wraps to -180.
    pub fn containing(lat: f64, lon: f64) -> Self {
        Self {
            south: (lat.floor() as i32).clamp(MIN_SOUTH, MAX_SOUTH),
            west: wrap_west(lon.floor() as i32),
        }
    }

    /// Whether the key lies on the 180×360 grid.
    pub fn is_valid(&self) -> bool {
        (MIN_SOUTH..=MAX_SOUTH).contains(&self.south) && (MIN_WEST..=MAX_WEST).contains(&self.west)
    }

    /// Chebyshev test: both the south and west offsets are within `range` tiles.
    /// Longitude offsets wrap across the antimeridian.
    pub fn within(&self, other: TileKey, range: i32) -> bool {
        (self.south - other.south).abs() <= range && west_offset(self.west, other.west) <= range
    }

    /// Whether a waypoint lies within `range` tiles of this tile.
    pub fn in_range(&self, loc: Location, range: i32) -> bool {
        self.within(loc.tile(), range)
    }

    /// Every tile in the (2·range+1)² window centred here, south-major.
    /// Rows beyond the poles are skipped; columns wrap across the antimeridian.
    pub fn window(&self, range: i32) -> impl Iterator<Item = TileKey> {
        let centre = *self;
        (centre.south - range..=centre.south + range)
            .filter(|south| (MIN_SOUTH..=MAX_SOUTH).contains(south))
            .flat_map(move |south| {
                (centre.west - range..=centre.west + range)
                    .map(move |west| TileKey::new(south, wrap_west(west)))
            })
    }
}

impl ShipClass {
    /// Seconds the ship takes to cover its own half-length.
    pub fn semilen_secs(&self) -> f64 {
        self.semilen / self.speed
    }
}

/// Fold a west boundary into [-180, 179].
pub fn wrap_west(west: i32) -> i32 {
    (west - MIN_WEST).rem_euclid(360) + MIN_WEST
}

/// Shortest longitudinal distance between two west boundaries, in tiles.
fn west_offset(a: i32, b: i32) -> i32 {
    let d = (a - b).rem_euclid(360);
    d.min(360 - d)
}
