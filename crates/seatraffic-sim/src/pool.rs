//! ActivePool: the bounded set of vessels currently simulated.
//!
//! Vessels are hecs entities. `order` gives them a stable index for the
//! scheduler and the renderer; the world owns their components, so
//! despawning an entity drops its `Probe` and releases the terrain probe.

use std::collections::HashSet;

use hecs::{Entity, World};

use seatraffic_core::route::RouteId;

use crate::components::{Pose, Probe, Visual, Voyage};

#[derive(Default)]
pub struct ActivePool {
    world: World,
    order: Vec<Entity>,
}

impl ActivePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a vessel at the end of the pool.
    pub fn add(&mut self, voyage: Voyage, pose: Pose, visual: Visual, probe: Probe) -> Entity {
        let entity = self.world.spawn((voyage, pose, visual, probe));
        self.order.push(entity);
        entity
    }

    /// Retire the vessel at `index`. Returns its route, or `None` if the
    /// index is past the end.
    pub fn remove_at(&mut self, index: usize) -> Option<RouteId> {
        if index >= self.order.len() {
            return None;
        }
        let entity = self.order.remove(index);
        let route = self.world.get::<&Voyage>(entity).ok().map(|v| v.route);
        if self.world.despawn(entity).is_err() {
            tracing::warn!(?entity, "pooled vessel was already gone from the world");
        }
        route
    }

    /// Retire a vessel by entity. A second call for the same entity is a no-op.
    pub fn remove(&mut self, entity: Entity) -> Option<RouteId> {
        let index = self.order.iter().position(|&e| e == entity)?;
        self.remove_at(index)
    }

    pub fn get(&self, index: usize) -> Option<Entity> {
        self.order.get(index).copied()
    }

    pub fn find_by_route(&self, route: RouteId) -> Option<Entity> {
        self.order.iter().copied().find(|&entity| {
            self.world
                .get::<&Voyage>(entity)
                .is_ok_and(|voyage| voyage.route == route)
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entities in pool order.
    pub fn entities(&self) -> &[Entity] {
        &self.order
    }

    /// Routes of every active vessel.
    pub fn routes(&self) -> HashSet<RouteId> {
        self.order
            .iter()
            .filter_map(|&entity| self.world.get::<&Voyage>(entity).ok().map(|v| v.route))
            .collect()
    }

    /// Group vessels sharing a model next to each other. Only call between
    /// scheduler passes; indices taken before the sort are invalidated.
    pub fn sort_by_visual_key(&mut self) {
        let world = &self.world;
        self.order.sort_by_cached_key(|&entity| {
            world
                .get::<&Visual>(entity)
                .map(|visual| visual.model.name.clone())
                .unwrap_or_default()
        });
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Drop every vessel and its probe.
    pub fn clear(&mut self) {
        self.order.clear();
        self.world.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use seatraffic_core::enums::{Direction, ShipKind};
    use seatraffic_core::types::GeoPoint;

    use super::*;
    use crate::services::{ModelHandle, ProbeFailure, TerrainProbe};

    struct CountedProbe(Arc<AtomicUsize>);

    impl TerrainProbe for CountedProbe {
        fn probe_height(&mut self, _point: GeoPoint, _reference: f64) -> Result<f64, ProbeFailure> {
            Ok(0.0)
        }
    }

    impl Drop for CountedProbe {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn spawn(pool: &mut ActivePool, route: u32, model: &str, released: &Arc<AtomicUsize>) -> Entity {
        pool.add(
            Voyage {
                route: RouteId(route),
                ship_kind: ShipKind::Car,
                direction: Direction::Forward,
                last_node: 0,
                last_time: 0.0,
                next_time: 0.0,
                last_heading: 0.0,
                new_node: true,
            },
            Pose::default(),
            Visual {
                model: ModelHandle::new(0, model),
            },
            Probe(Box::new(CountedProbe(released.clone()))),
        )
    }

    #[test]
    fn test_add_get_find() {
        let released = Arc::new(AtomicUsize::new(0));
        let mut pool = ActivePool::new();
        let a = spawn(&mut pool, 3, "a.obj", &released);
        let b = spawn(&mut pool, 7, "b.obj", &released);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get(0), Some(a));
        assert_eq!(pool.get(1), Some(b));
        assert_eq!(pool.get(2), None);
        assert_eq!(pool.find_by_route(RouteId(7)), Some(b));
        assert_eq!(pool.find_by_route(RouteId(8)), None);
    }

    #[test]
    fn test_remove_releases_probe_once() {
        let released = Arc::new(AtomicUsize::new(0));
        let mut pool = ActivePool::new();
        let a = spawn(&mut pool, 1, "a.obj", &released);
        spawn(&mut pool, 2, "b.obj", &released);

        assert_eq!(pool.remove(a), Some(RouteId(1)));
        assert_eq!(released.load(Ordering::SeqCst), 1);
        assert_eq!(pool.remove(a), None);
        assert_eq!(released.load(Ordering::SeqCst), 1);
        assert_eq!(pool.remove_at(5), None);

        assert_eq!(pool.remove_at(0), Some(RouteId(2)));
        assert_eq!(released.load(Ordering::SeqCst), 2);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_remove_tolerates_entity_despawned_elsewhere() {
        let released = Arc::new(AtomicUsize::new(0));
        let mut pool = ActivePool::new();
        let a = spawn(&mut pool, 1, "a.obj", &released);
        pool.world_mut().despawn(a).unwrap();
        assert_eq!(released.load(Ordering::SeqCst), 1);

        assert_eq!(pool.remove_at(0), None);
        assert!(pool.is_empty());
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_sort_groups_by_model() {
        let released = Arc::new(AtomicUsize::new(0));
        let mut pool = ActivePool::new();
        spawn(&mut pool, 0, "tanker.obj", &released);
        spawn(&mut pool, 1, "ferry.obj", &released);
        spawn(&mut pool, 2, "tanker.obj", &released);
        spawn(&mut pool, 3, "ferry.obj", &released);
        pool.sort_by_visual_key();

        let routes: Vec<u32> = (0..pool.len())
            .map(|i| {
                let entity = pool.get(i).unwrap();
                pool.world().get::<&Voyage>(entity).unwrap().route.0
            })
            .collect();
        assert_eq!(routes, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_clear_releases_everything() {
        let released = Arc::new(AtomicUsize::new(0));
        let mut pool = ActivePool::new();
        for route in 0..5 {
            spawn(&mut pool, route, "x.obj", &released);
        }
        pool.clear();
        assert_eq!(released.load(Ordering::SeqCst), 5);
        assert!(pool.routes().is_empty());
    }
}
