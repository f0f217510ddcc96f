//! ECS components carried by every active vessel.

use seatraffic_core::enums::{Direction, ShipKind};
use seatraffic_core::route::{Route, RouteId};
use seatraffic_core::types::GeoPoint;

use crate::services::{ModelHandle, TerrainProbe};

/// Progress along the route.
#[derive(Debug, Clone, PartialEq)]
pub struct Voyage {
    pub route: RouteId,
    pub ship_kind: ShipKind,
    pub direction: Direction,
    /// Waypoint most recently departed (or the terminus being lingered at).
    pub last_node: usize,
    /// Departure time from `last_node`.
    pub last_time: f64,
    /// Predicted arrival at the next node, or end of linger.
    pub next_time: f64,
    /// Bearing in radians, fixed when leaving `last_node`.
    pub last_heading: f64,
    /// Heading, position and next arrival need recomputing this tick.
    pub new_node: bool,
}

impl Voyage {
    /// The node being sailed towards, or `None` while lingering at a terminus.
    pub fn next_node(&self, route: &Route) -> Option<usize> {
        self.direction.step(self.last_node, route.path_len())
    }

    pub fn is_lingering(&self, route: &Route) -> bool {
        self.next_node(route).is_none()
    }
}

/// Where the vessel is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub location: GeoPoint,
    /// Metres above sea level.
    pub altitude: f64,
    /// Displayed heading in radians. Refreshed on the heading cadence, so it
    /// can lag `Voyage::last_heading`.
    pub heading: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    pub model: ModelHandle,
}

/// Terrain probe owned by the vessel. Released when the entity is despawned.
pub struct Probe(pub Box<dyn TerrainProbe>);

impl Probe {
    /// Altitude of the water surface at `location`; 0 if the probe misses.
    pub fn altitude_at(&mut self, location: GeoPoint) -> f64 {
        match self.0.probe_height(location, 0.0) {
            Ok(height) => height,
            Err(err) => {
                tracing::debug!(%err, "terrain probe failed, assuming sea level");
                0.0
            }
        }
    }
}
