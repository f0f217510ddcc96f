//! Navigation system: advances every active vessel along its route.
//!
//! Per vessel, each tick:
//! - before `next_time`, interpolate along the current leg (or hold while
//!   lingering at a terminus);
//! - at `next_time`, either arrive at the next node, start lingering at a
//!   terminus, or turn round once the linger is over;
//! - on a new node, recompute the leg heading, position and arrival time.
//!
//! Positions lead the departed node by the ship's semilen, so hulls start
//! clear of the dock.

use hecs::World;

use seatraffic_core::geo::{displaced, distance_to, heading_to};
use seatraffic_core::route::Route;
use seatraffic_core::types::TileKey;
use seatraffic_routes::RouteStore;

use crate::components::{Pose, Probe, Voyage};

/// Per-tick inputs shared by every vessel.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    pub now: f64,
    pub tile: TileKey,
    pub range: i32,
    /// Refresh displayed heading and altitude this tick.
    pub heading_update: bool,
    pub heading_hold_secs: f64,
    pub linger_secs: f64,
}

/// Advance every vessel. Returns `true` if any vessel reached a node outside
/// observer range and the pool needs recalculating.
pub fn run(world: &mut World, store: &RouteStore, tick: &Tick) -> bool {
    let mut need_recalc = false;
    for (_entity, (voyage, pose, probe)) in
        world.query_mut::<(&mut Voyage, &mut Pose, &mut Probe)>()
    {
        match store.get(voyage.route) {
            Some(route) => {
                if !advance(voyage, pose, probe, route, tick) {
                    need_recalc = true;
                }
            }
            None => need_recalc = true,
        }
    }
    need_recalc
}

/// Advance one vessel. Returns `false` if it arrived at a node outside
/// observer range.
pub fn advance(
    voyage: &mut Voyage,
    pose: &mut Pose,
    probe: &mut Probe,
    route: &Route,
    tick: &Tick,
) -> bool {
    let class = route.class();
    let now = tick.now;
    let mut in_range = true;

    if now >= voyage.next_time {
        match voyage.next_node(route) {
            None => {
                // Linger over: turn round at the terminus.
                voyage.direction = voyage.direction.reversed();
                voyage.last_time = now - class.semilen_secs();
                voyage.new_node = true;
            }
            Some(next) => {
                let prev = voyage.last_node;
                voyage.last_node = next;
                in_range = tick.tile.in_range(route.node(next), tick.range);
                if route.is_terminus(next) {
                    // Hold position and heading at the dock.
                    voyage.last_time = now;
                    voyage.next_time = now + tick.linger_secs;
                    if voyage.new_node {
                        // Docked on the spawn tick; the pose was never laid on the leg.
                        let dock = route.node(next);
                        voyage.last_heading = heading_to(route.node(prev), dock);
                        pose.heading = voyage.last_heading;
                        pose.location =
                            displaced(dock, heading_to(dock, route.node(prev)), class.semilen);
                        voyage.new_node = false;
                    }
                    pose.altitude = probe.altitude_at(pose.location);
                } else {
                    voyage.last_time = now;
                    voyage.new_node = true;
                }
            }
        }
    } else if let Some(next) = voyage.next_node(route) {
        pose.location = displaced(
            route.node(voyage.last_node),
            voyage.last_heading,
            class.semilen + (now - voyage.last_time) * class.speed,
        );
        // No heading refresh on final approach to a node.
        if tick.heading_update && voyage.next_time - now > tick.heading_hold_secs {
            pose.heading = heading_to(pose.location, route.node(next));
        }
    }

    if voyage.new_node {
        if let Some(next) = voyage.next_node(route) {
            let from = route.node(voyage.last_node);
            let to = route.node(next);
            voyage.last_heading = heading_to(from, to);
            pose.heading = voyage.last_heading;
            pose.location = displaced(
                from,
                voyage.last_heading,
                class.semilen + (now - voyage.last_time) * class.speed,
            );
            voyage.next_time = voyage.last_time + distance_to(from, to) / class.speed;
            if route.is_terminus(next) {
                // Stop short of the dock.
                voyage.next_time -= class.semilen_secs();
            }
        }
    }

    if tick.heading_update || voyage.new_node {
        pose.altitude = probe.altitude_at(pose.location);
    }
    voyage.new_node = false;

    in_range
}
