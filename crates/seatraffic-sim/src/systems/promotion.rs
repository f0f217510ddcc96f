//! Promotion: turns candidate routes near the observer into active vessels.

use std::collections::HashSet;

use rand::Rng;
use tracing::{debug, warn};

use seatraffic_core::enums::Direction;
use seatraffic_core::events::TrafficEvent;
use seatraffic_core::geo::distance_to;
use seatraffic_core::route::{Route, RouteId};
use seatraffic_core::types::{GeoPoint, TileKey};
use seatraffic_routes::{RouteStore, TileIndex};

use crate::catalog::ModelCatalog;
use crate::components::{Pose, Probe, Visual, Voyage};
use crate::pool::ActivePool;
use crate::services::TerrainService;

/// Where and when vessels are being placed in this pass.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub tile: TileKey,
    pub range: i32,
    /// Minimum start separation, in multiples of the candidate's semilen.
    pub spacing: f64,
    pub now: f64,
}

/// Initial navigation state for a promoted vessel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Start {
    pub node: usize,
    pub direction: Direction,
    pub last_time: f64,
}

/// Routes crossing the observer's tile window that aren't already active.
/// Each route appears once, in window then index order.
pub fn discover_candidates(
    pool: &ActivePool,
    index: &TileIndex,
    tile: TileKey,
    range: i32,
) -> Vec<RouteId> {
    let active = pool.routes();
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    for key in tile.window(range) {
        for &id in index.lookup(key) {
            if !active.contains(&id) && seen.insert(id) {
                candidates.push(id);
            }
        }
    }
    candidates
}

/// Positions other vessels occupy for spacing purposes. A vessel whose
/// state hasn't been computed yet is taken to be at its last node.
pub fn occupied_positions(pool: &ActivePool, store: &RouteStore) -> Vec<GeoPoint> {
    pool.world()
        .query::<(&Voyage, &Pose)>()
        .iter()
        .map(|(_, (voyage, pose))| match store.get(voyage.route) {
            Some(route) if voyage.new_node => GeoPoint::from(route.node(voyage.last_node)),
            _ => pose.location,
        })
        .collect()
}

/// Pick a starting node: the path start, then the path end, then the first
/// in-range interior node, skipping any within spacing of `occupied`. If
/// every in-range node is crowded, take the first in-range one anyway and
/// push the ship further along its path.
///
/// Returns `None` only if no node of the route is in range.
pub fn choose_start(route: &Route, placement: &Placement, occupied: &[GeoPoint]) -> Option<Start> {
    let class = route.class();
    let clearance = placement.spacing * class.semilen;
    let in_range = |node: usize| placement.tile.in_range(route.node(node), placement.range);
    let crowded = |node: usize| {
        occupied
            .iter()
            .any(|&other| distance_to(route.node(node), other) <= clearance)
    };
    let first = route.first_node();
    let last = route.last_node();
    let undock = placement.now - class.semilen_secs();

    if in_range(first) && !crowded(first) {
        return Some(Start {
            node: first,
            direction: Direction::Forward,
            last_time: undock,
        });
    }
    if in_range(last) && !crowded(last) {
        return Some(Start {
            node: last,
            direction: Direction::Reverse,
            last_time: undock,
        });
    }
    if let Some(node) = (first + 1..last).find(|&node| in_range(node) && !crowded(node)) {
        return Some(Start {
            node,
            direction: Direction::Forward,
            last_time: placement.now,
        });
    }

    let last_time = placement.now - clearance / class.speed;
    let (node, direction) = if in_range(first) {
        (first, Direction::Forward)
    } else if in_range(last) {
        (last, Direction::Reverse)
    } else {
        ((first + 1..last).find(|&node| in_range(node))?, Direction::Forward)
    };
    Some(Start {
        node,
        direction,
        last_time,
    })
}

/// Fill the pool up to `capacity` from uniformly random candidates.
/// Returns how many vessels were promoted.
#[allow(clippy::too_many_arguments)]
pub fn run(
    pool: &mut ActivePool,
    store: &RouteStore,
    index: &TileIndex,
    catalog: &mut ModelCatalog,
    terrain: &mut dyn TerrainService,
    rng: &mut impl Rng,
    placement: &Placement,
    capacity: usize,
    events: &mut Vec<TrafficEvent>,
) -> usize {
    if pool.len() >= capacity {
        return 0;
    }

    let mut candidates = discover_candidates(pool, index, placement.tile, placement.range);
    let mut occupied = occupied_positions(pool, store);
    let mut promoted = 0;

    while pool.len() < capacity && !candidates.is_empty() {
        let id = candidates.swap_remove(rng.gen_range(0..candidates.len()));
        let Some(route) = store.get(id) else {
            continue;
        };

        let Some(model) = catalog.pick(route.ship_kind, placement.tile, rng) else {
            continue;
        };
        let probe = match terrain.create_probe() {
            Ok(probe) => probe,
            Err(err) => {
                warn!(route = ?id, %err, "abandoned promotion");
                events.push(TrafficEvent::PromotionAbandoned { route: id });
                continue;
            }
        };
        let Some(start) = choose_start(route, placement, &occupied) else {
            continue;
        };

        let origin = route.node(start.node);
        let class = route.class();
        let next_time = start
            .direction
            .step(start.node, route.path_len())
            .map_or(start.last_time, |next| {
                start.last_time + distance_to(origin, route.node(next)) / class.speed
            });

        pool.add(
            Voyage {
                route: id,
                ship_kind: route.ship_kind,
                direction: start.direction,
                last_node: start.node,
                last_time: start.last_time,
                next_time,
                last_heading: 0.0,
                new_node: true,
            },
            Pose {
                location: origin.into(),
                ..Pose::default()
            },
            Visual { model },
            Probe(probe),
        );
        occupied.push(origin.into());
        promoted += 1;

        debug!(
            route = ?id,
            node = start.node,
            direction = ?start.direction,
            "promoted"
        );
        events.push(TrafficEvent::Promoted {
            route: id,
            start_node: start.node,
            direction: start.direction,
        });
    }

    if promoted > 0 {
        pool.sort_by_visual_key();
    }
    promoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatraffic_core::enums::ShipKind;
    use seatraffic_core::types::Location;

    fn placement(tile: TileKey) -> Placement {
        Placement {
            tile,
            range: 1,
            spacing: 8.0,
            now: 1000.0,
        }
    }

    fn route(kind: ShipKind, path: &[(f32, f32)]) -> Route {
        Route::new(
            kind,
            None,
            path.iter().map(|&(lat, lon)| Location::new(lat, lon)).collect(),
        )
    }

    #[test]
    fn test_start_prefers_path_start() {
        let r = route(ShipKind::Hgv, &[(0.5, 0.5), (0.5, 5.5)]);
        let start = choose_start(&r, &placement(TileKey::new(0, 0)), &[]).unwrap();
        assert_eq!(start.node, 0);
        assert_eq!(start.direction, Direction::Forward);
        assert!((start.last_time - (1000.0 - 76.0 / 10.0)).abs() < 1e-9);
    }

    #[test]
    fn test_start_at_path_end_reverses() {
        let r = route(ShipKind::Hgv, &[(0.5, 5.5), (0.5, 0.5)]);
        let start = choose_start(&r, &placement(TileKey::new(0, 0)), &[]).unwrap();
        assert_eq!(start.node, 1);
        assert_eq!(start.direction, Direction::Reverse);
    }

    #[test]
    fn test_start_interior_node() {
        let r = route(
            ShipKind::Cargo,
            &[(0.5, -5.5), (0.5, -3.5), (0.5, 0.5), (0.5, 1.5), (0.5, 5.5)],
        );
        let start = choose_start(&r, &placement(TileKey::new(0, 1)), &[]).unwrap();
        assert_eq!(start.node, 2);
        assert_eq!(start.direction, Direction::Forward);
        assert_eq!(start.last_time, 1000.0);
    }

    #[test]
    fn test_crowded_start_moves_to_end() {
        let r = route(ShipKind::Car, &[(0.5, 0.5), (0.5, 0.9)]);
        let occupied = [GeoPoint::new(0.5, 0.5001)];
        let start = choose_start(&r, &placement(TileKey::new(0, 0)), &occupied).unwrap();
        assert_eq!(start.node, 1);
        assert_eq!(start.direction, Direction::Reverse);
    }

    #[test]
    fn test_all_crowded_shoves_along_path() {
        let r = route(ShipKind::Car, &[(0.5, 0.5), (0.5, 0.501)]);
        let occupied = [GeoPoint::new(0.5, 0.5005)];
        let start = choose_start(&r, &placement(TileKey::new(0, 0)), &occupied).unwrap();
        assert_eq!(start.node, 0);
        assert_eq!(start.direction, Direction::Forward);
        assert!((start.last_time - (1000.0 - 8.0 * 76.0 / 11.0)).abs() < 1e-9);
    }

    #[test]
    fn test_nothing_in_range() {
        let r = route(ShipKind::Car, &[(40.5, 0.5), (40.5, 0.9)]);
        assert_eq!(choose_start(&r, &placement(TileKey::new(0, 0)), &[]), None);
    }
}
