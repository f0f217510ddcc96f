//! Traffic engine: the core of the simulation.
//!
//! `TrafficEngine` owns the routes, the tile index and the pool of active
//! vessels. The host calls `update` once per frame with the clock and the
//! observer position; the engine recalculates the pool when the observer
//! changes tile or the capacity changes, then advances every vessel.
//! Completely headless, so runs are deterministic for a given seed.

use std::path::Path;

use hecs::Entity;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use seatraffic_core::config::{capacity_for_density, SimConfig};
use seatraffic_core::events::TrafficEvent;
use seatraffic_core::state::TrafficSnapshot;
use seatraffic_core::types::{GeoPoint, TileKey};
use seatraffic_routes::{RouteStore, TileIndex};

use crate::catalog::ModelCatalog;
use crate::error::TrafficError;
use crate::pool::ActivePool;
use crate::services::{ModelProvider, TerrainService};
use crate::systems;
use crate::systems::navigation::Tick;
use crate::systems::promotion::Placement;

pub struct TrafficEngine {
    config: SimConfig,
    store: RouteStore,
    index: TileIndex,
    pool: ActivePool,
    catalog: ModelCatalog,
    terrain: Box<dyn TerrainService>,
    rng: ChaCha8Rng,
    capacity: usize,
    current_tile: Option<TileKey>,
    need_recalc: bool,
    /// Clock value of the last processed frame.
    last_frame: Option<f64>,
    next_heading_update: f64,
    despawn_buffer: Vec<Entity>,
    events: Vec<TrafficEvent>,
}

impl TrafficEngine {
    /// Build an engine over already loaded routes.
    ///
    /// Fails if the config is invalid or any ship kind has no models.
    pub fn new(
        config: SimConfig,
        store: RouteStore,
        models: Box<dyn ModelProvider>,
        terrain: Box<dyn TerrainService>,
    ) -> Result<Self, TrafficError> {
        config.validate()?;
        let catalog = ModelCatalog::new(models)?;
        let index = TileIndex::build(&store);
        let capacity = config.capacity();
        info!(
            routes = store.len(),
            capacity,
            seed = config.seed,
            "traffic engine ready"
        );
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            store,
            index,
            pool: ActivePool::new(),
            catalog,
            terrain,
            capacity,
            current_tile: None,
            need_recalc: false,
            last_frame: None,
            next_heading_update: 0.0,
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Load a route file and build an engine over it.
    pub fn from_route_file(
        config: SimConfig,
        path: impl AsRef<Path>,
        models: Box<dyn ModelProvider>,
        terrain: Box<dyn TerrainService>,
    ) -> Result<Self, TrafficError> {
        let store = RouteStore::load_path(path)?;
        Self::new(config, store, models, terrain)
    }

    /// Run one frame at clock `now` with the observer at `observer`.
    ///
    /// Returns `false` without doing anything if `now` is the same clock
    /// value as the previous frame.
    pub fn update(&mut self, now: f64, observer: GeoPoint) -> bool {
        if self.last_frame == Some(now) {
            return false;
        }
        self.last_frame = Some(now);

        let tile = observer.tile();
        if self.need_recalc || self.current_tile != Some(tile) {
            self.current_tile = Some(tile);
            self.recalculate(now);
        }

        if self.pool.is_empty() {
            return true;
        }

        // Headings change slowly, so only refresh them periodically.
        let heading_update = now >= self.next_heading_update;
        if heading_update {
            self.next_heading_update = now + self.config.heading_hold_secs;
        }

        let tick = Tick {
            now,
            tile,
            range: self.config.tile_range,
            heading_update,
            heading_hold_secs: self.config.heading_hold_secs,
            linger_secs: self.config.linger_secs,
        };
        if systems::navigation::run(self.pool.world_mut(), &self.store, &tick) {
            self.need_recalc = true;
        }
        true
    }

    /// Retire out-of-range and surplus vessels, then promote candidates
    /// around the current tile. Does nothing before the first `update`.
    pub fn recalculate(&mut self, now: f64) {
        self.need_recalc = false;
        let Some(tile) = self.current_tile else {
            return;
        };
        let range = self.config.tile_range;
        let before = self.events.len();

        systems::retirement::retire_out_of_range(
            &mut self.pool,
            &self.store,
            tile,
            range,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        systems::retirement::retire_surplus(
            &mut self.pool,
            self.capacity,
            &mut self.rng,
            &mut self.events,
        );
        let placement = Placement {
            tile,
            range,
            spacing: self.config.ship_spacing,
            now,
        };
        let promoted = systems::promotion::run(
            &mut self.pool,
            &self.store,
            &self.index,
            &mut self.catalog,
            self.terrain.as_mut(),
            &mut self.rng,
            &placement,
            self.capacity,
            &mut self.events,
        );

        debug!(
            ?tile,
            active = self.pool.len(),
            promoted,
            changes = self.events.len() - before,
            "recalculated active vessels"
        );
    }

    /// Set capacity from the object density setting.
    pub fn set_object_density(&mut self, density: u32) {
        self.set_capacity(capacity_for_density(density));
    }

    /// Set the maximum number of active vessels. Applied on the next update.
    pub fn set_capacity(&mut self, capacity: usize) {
        if capacity != self.capacity {
            self.capacity = capacity;
            self.need_recalc = true;
        }
    }

    /// Render hand-off for the current frame.
    pub fn snapshot(&self, observer: GeoPoint) -> TrafficSnapshot {
        systems::snapshot::build_snapshot(
            &self.pool,
            &self.store,
            observer,
            self.last_frame.unwrap_or_default(),
            self.current_tile.unwrap_or_else(|| observer.tile()),
            self.capacity,
        )
    }

    /// Promotions and retirements since the last call.
    pub fn drain_events(&mut self) -> Vec<TrafficEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pool(&self) -> &ActivePool {
        &self.pool
    }

    pub fn store(&self) -> &RouteStore {
        &self.store
    }

    pub fn index(&self) -> &TileIndex {
        &self.index
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn current_tile(&self) -> Option<TileKey> {
        self.current_tile
    }

    pub fn needs_recalc(&self) -> bool {
        self.need_recalc
    }
}
