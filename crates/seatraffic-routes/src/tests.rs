//! Tests for loading routes and indexing them by tile.

use std::collections::HashSet;

use seatraffic_core::enums::ShipKind;
use seatraffic_core::route::RouteId;
use seatraffic_core::types::TileKey;

use crate::error::RouteFileError;
use crate::store::RouteStore;
use crate::tile_index::TileIndex;

const SOLENT: &str = "\u{feff}# OSM export\n\
\n\
car\tSouthampton - Cowes\n\
50.8957 -1.3966\n\
50.8300 -1.3100\n\
50.7636 -1.2978\n\
\n\
foot\tPortsmouth - Ryde\n\
50.7968 -1.1077\n\
50.7330 -1.1600\n\
\n\
tanker\tFawley - Channel\n\
50.8400 -1.3300\n\
50.5000 -0.9000\n\
49.9000 0.2000\n\
50.1000 0.4000\n";

fn build() -> (RouteStore, TileIndex) {
    let store = RouteStore::parse(SOLENT).unwrap();
    let index = TileIndex::build(&store);
    (store, index)
}

#[test]
fn test_store_assigns_ids_in_file_order() {
    let (store, _) = build();
    assert_eq!(store.len(), 3);
    assert_eq!(store[RouteId(0)].display_name(), "Southampton - Cowes");
    assert_eq!(store[RouteId(2)].ship_kind, ShipKind::Tanker);
    assert!(store.get(RouteId(3)).is_none());

    let counts = store.count_by_kind();
    assert!(counts.contains(&(ShipKind::Car, 1)));
    assert!(counts.contains(&(ShipKind::Cargo, 0)));
}

#[test]
fn test_lookup_contains_route_iff_waypoint_in_tile() {
    let (store, index) = build();

    let mut expected: HashSet<(TileKey, RouteId)> = HashSet::new();
    for (id, route) in store.iter() {
        for loc in route.path() {
            expected.insert((loc.tile(), id));
        }
    }

    for south in 48..=52 {
        for west in -3..=2 {
            let tile = TileKey::new(south, west);
            for (id, _) in store.iter() {
                let listed = index.lookup(tile).contains(&id);
                assert_eq!(
                    listed,
                    expected.contains(&(tile, id)),
                    "route {id:?} in tile {tile:?}"
                );
            }
        }
    }
}

#[test]
fn test_route_listed_once_per_tile() {
    let (_, index) = build();
    // All three Southampton-Cowes nodes share tile (50, -2).
    let solent = index.lookup(TileKey::new(50, -2));
    let unique: HashSet<_> = solent.iter().collect();
    assert_eq!(unique.len(), solent.len());
    assert_eq!(solent.len(), 3);
}

#[test]
fn test_revisited_tile_is_not_duplicated() {
    let text = "cruise Loop\n10.1 10.1\n11.5 10.5\n10.9 10.9\n10.2 10.3\n";
    let store = RouteStore::parse(text).unwrap();
    let index = TileIndex::build(&store);
    assert_eq!(index.lookup(TileKey::new(10, 10)), &[RouteId(0)]);
    assert_eq!(index.lookup(TileKey::new(11, 10)), &[RouteId(0)]);
    assert_eq!(index.populated_tiles(), 2);
}

#[test]
fn test_lookup_off_grid_is_empty() {
    let (_, index) = build();
    assert!(index.lookup(TileKey::new(90, 0)).is_empty());
    assert!(index.lookup(TileKey::new(0, -181)).is_empty());
    assert!(index.lookup(TileKey::new(0, 0)).is_empty());
}

#[test]
fn test_busiest_tiles() {
    let (_, index) = build();
    let busiest = index.busiest(1);
    assert_eq!(busiest, vec![(TileKey::new(50, -2), 3)]);
}

#[test]
fn test_load_path_missing_file() {
    let err = RouteStore::load_path("/nonexistent/routes.txt").unwrap_err();
    assert!(matches!(err, RouteFileError::Io { .. }));
    assert!(err.to_string().contains("routes.txt"));
}

#[test]
fn test_sample_route_file() {
    let store = RouteStore::parse(include_str!("../../../data/solent.txt")).unwrap();
    assert_eq!(store.len(), 9);
    let index = TileIndex::build(&store);
    assert_eq!(index.lookup(TileKey::new(50, -2)).len(), 9);
    assert!(index.lookup(TileKey::new(50, 0)).contains(&RouteId(8)));
}
