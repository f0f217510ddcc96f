//! Snapshot system: builds a `TrafficSnapshot` from the active pool.
//!
//! Read-only; never modifies the world.

use glam::DVec3;

use seatraffic_core::constants::{
    DRAW_DISTANCE, DRAW_REFLECT, DRAW_WAKE, WAKE_BIG_SEMILEN, WAKE_MIN_SPEED,
};
use seatraffic_core::enums::WakeSize;
use seatraffic_core::projection::GeoProjection;
use seatraffic_core::route::Route;
use seatraffic_core::state::{TrafficSnapshot, VesselPose};
use seatraffic_core::types::{GeoPoint, TileKey};
use seatraffic_routes::RouteStore;

use crate::components::{Pose, Visual, Voyage};
use crate::pool::ActivePool;

/// Poses of every active vessel in pool order, relative to `observer`.
pub fn build_snapshot(
    pool: &ActivePool,
    store: &RouteStore,
    observer: GeoPoint,
    time: f64,
    tile: TileKey,
    capacity: usize,
) -> TrafficSnapshot {
    let projection = GeoProjection::new(observer);
    let world = pool.world();

    let vessels = pool
        .entities()
        .iter()
        .filter_map(|&entity| {
            let voyage = world.get::<&Voyage>(entity).ok()?;
            let pose = world.get::<&Pose>(entity).ok()?;
            let visual = world.get::<&Visual>(entity).ok()?;
            let route = store.get(voyage.route)?;
            let local = projection.to_local(pose.location, pose.altitude);
            let range = projection.horizontal_range(pose.location);
            Some(build_pose(&voyage, &pose, &visual, route, local, range))
        })
        .collect();

    TrafficSnapshot {
        time,
        tile,
        capacity,
        vessels,
    }
}

fn build_pose(
    voyage: &Voyage,
    pose: &Pose,
    visual: &Visual,
    route: &Route,
    local: DVec3,
    range: f64,
) -> VesselPose {
    let class = route.class();
    let lingering = voyage.is_lingering(route);
    let wake = (class.speed >= WAKE_MIN_SPEED && !lingering && range <= DRAW_WAKE).then(|| {
        if class.semilen >= WAKE_BIG_SEMILEN {
            WakeSize::Big
        } else {
            WakeSize::Medium
        }
    });

    VesselPose {
        route: voyage.route,
        name: route.display_name().to_string(),
        ship_kind: voyage.ship_kind,
        model: visual.model.name.clone(),
        lat: pose.location.lat,
        lon: pose.location.lon,
        altitude: pose.altitude,
        heading_deg: pose.heading.to_degrees(),
        lingering,
        local: local.to_array(),
        in_draw_range: range <= DRAW_DISTANCE,
        in_reflect_range: range <= DRAW_REFLECT,
        wake,
    }
}
