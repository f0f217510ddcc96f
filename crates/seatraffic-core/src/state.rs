//! Per-frame output handed to the renderer.

use serde::{Deserialize, Serialize};

use crate::enums::{ShipKind, WakeSize};
use crate::route::RouteId;
use crate::types::TileKey;

/// Where and how to draw one active vessel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselPose {
    pub route: RouteId,
    pub name: String,
    pub ship_kind: ShipKind,
    /// Visual variant chosen at promotion.
    pub model: String,
    pub lat: f64,
    pub lon: f64,
    /// Altitude above mean sea level (meters).
    pub altitude: f64,
    /// True heading in degrees.
    pub heading_deg: f64,
    pub lingering: bool,
    /// Offset from the observer: x = East, y = North, z = Up (meters).
    pub local: [f64; 3],
    pub in_draw_range: bool,
    pub in_reflect_range: bool,
    pub wake: Option<WakeSize>,
}

/// Complete traffic state for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficSnapshot {
    /// Simulation clock (seconds).
    pub time: f64,
    pub tile: TileKey,
    pub capacity: usize,
    pub vessels: Vec<VesselPose>,
}
