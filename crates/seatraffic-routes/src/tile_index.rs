//! TileIndex: which routes pass through each 1°×1° tile.

use tracing::info;

use seatraffic_core::constants::{MIN_SOUTH, MIN_WEST, TILE_COLS, TILE_ROWS};
use seatraffic_core::route::{Route, RouteId};
use seatraffic_core::types::TileKey;

use crate::store::RouteStore;

/// Sparse 180×360 grid of route lists. Immutable once built.
#[derive(Debug, Clone)]
pub struct TileIndex {
    /// Row-major by south then west; most buckets are empty.
    buckets: Vec<Vec<RouteId>>,
}

impl TileIndex {
    /// Index every route in the store by every tile its waypoints fall in.
    pub fn build(store: &RouteStore) -> Self {
        let mut index = Self {
            buckets: vec![Vec::new(); TILE_ROWS * TILE_COLS],
        };
        for (id, route) in store.iter() {
            index.add_route(id, route);
        }
        info!(
            routes = store.len(),
            tiles = index.populated_tiles(),
            "built tile index"
        );
        index
    }

    fn add_route(&mut self, id: RouteId, route: &Route) {
        for loc in route.path() {
            let Some(slot) = slot(loc.tile()) else {
                continue;
            };
            let bucket = &mut self.buckets[slot];
            // Routes are added one at a time, so a repeat can only be the last entry.
            if bucket.last() != Some(&id) {
                bucket.push(id);
            }
        }
    }

    /// Routes crossing the tile, in indexing order. Empty off the grid.
    pub fn lookup(&self, tile: TileKey) -> &[RouteId] {
        match slot(tile) {
            Some(slot) => self.buckets[slot].as_slice(),
            None => &[],
        }
    }

    /// Number of tiles crossed by at least one route.
    pub fn populated_tiles(&self) -> usize {
        self.buckets.iter().filter(|bucket| !bucket.is_empty()).count()
    }

    /// The `n` tiles with the most routes, busiest first.
    pub fn busiest(&self, n: usize) -> Vec<(TileKey, usize)> {
        let mut tiles: Vec<(TileKey, usize)> = self
            .buckets
            .iter()
            .enumerate()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(slot, bucket)| (key_for_slot(slot), bucket.len()))
            .collect();
        tiles.sort_by(|(a_key, a_count), (b_key, b_count)| {
            b_count
                .cmp(a_count)
                .then(a_key.south.cmp(&b_key.south))
                .then(a_key.west.cmp(&b_key.west))
        });
        tiles.truncate(n);
        tiles
    }
}

fn slot(tile: TileKey) -> Option<usize> {
    tile.is_valid().then(|| {
        (tile.south - MIN_SOUTH) as usize * TILE_COLS + (tile.west - MIN_WEST) as usize
    })
}

fn key_for_slot(slot: usize) -> TileKey {
    TileKey::new(
        (slot / TILE_COLS) as i32 + MIN_SOUTH,
        (slot % TILE_COLS) as i32 + MIN_WEST,
    )
}
