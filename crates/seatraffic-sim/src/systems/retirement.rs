//! Retirement: removes vessels that left observer range or exceed capacity.

use hecs::Entity;
use rand::Rng;
use tracing::debug;

use seatraffic_core::enums::RetireReason;
use seatraffic_core::events::TrafficEvent;
use seatraffic_core::types::TileKey;
use seatraffic_routes::RouteStore;

use crate::components::Voyage;
use crate::pool::ActivePool;

/// Retire every vessel whose last visited node is outside `range` tiles of
/// `tile`. Live position is not checked, so a vessel may sail up to one
/// segment out of range before it goes.
pub fn retire_out_of_range(
    pool: &mut ActivePool,
    store: &RouteStore,
    tile: TileKey,
    range: i32,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<TrafficEvent>,
) {
    despawn_buffer.clear();

    for (entity, voyage) in pool.world_mut().query_mut::<&Voyage>() {
        let in_range = store
            .get(voyage.route)
            .is_some_and(|route| tile.in_range(route.node(voyage.last_node), range));
        if !in_range {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        if let Some(route) = pool.remove(entity) {
            debug!(?route, "retired out of range");
            events.push(TrafficEvent::Retired {
                route,
                reason: RetireReason::OutOfRange,
            });
        }
    }
}

/// Retire uniformly random vessels until the pool fits `capacity`.
pub fn retire_surplus(
    pool: &mut ActivePool,
    capacity: usize,
    rng: &mut impl Rng,
    events: &mut Vec<TrafficEvent>,
) {
    while pool.len() > capacity {
        let index = rng.gen_range(0..pool.len());
        if let Some(route) = pool.remove_at(index) {
            debug!(?route, "retired surplus");
            events.push(TrafficEvent::Retired {
                route,
                reason: RetireReason::Surplus,
            });
        }
    }
}
