//! Interfaces to the collaborators the simulation does not own: terrain
//! height queries and 3D model resolution.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use seatraffic_core::enums::ShipKind;
use seatraffic_core::types::{GeoPoint, TileKey};

/// Terrain query at a point did not hit the ground.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("terrain probe missed at {lat:.5}, {lon:.5}")]
pub struct ProbeFailure {
    pub lat: f64,
    pub lon: f64,
}

/// The terrain service could not hand out another probe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no terrain probe available")]
pub struct ProbeUnavailable;

/// A terrain-height probe owned by one active vessel.
///
/// Implementations release whatever the probe holds in `Drop`; the vessel's
/// components are dropped exactly once when it is retired.
pub trait TerrainProbe: Send + Sync {
    /// Ground altitude in metres relative to `reference` at `point`.
    fn probe_height(&mut self, point: GeoPoint, reference: f64) -> Result<f64, ProbeFailure>;
}

pub trait TerrainService {
    fn create_probe(&mut self) -> Result<Box<dyn TerrainProbe>, ProbeUnavailable>;
}

/// Opaque model reference. `name` is the grouping key for batched drawing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelHandle {
    pub id: u32,
    pub name: String,
}

impl ModelHandle {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

pub trait ModelProvider {
    /// Visual variants for a ship kind. `tile` is `None` for the default
    /// set and `Some` for a per-tile override, which may be empty.
    fn resolve_variants(&mut self, kind: ShipKind, tile: Option<TileKey>) -> Vec<ModelHandle>;
}
