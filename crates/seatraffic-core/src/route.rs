//! Routes: immutable paths traversed back and forth by one kind of ship.

use serde::{Deserialize, Serialize};

use crate::enums::ShipKind;
use crate::types::{Location, ShipClass};

/// Stable identity of a route within its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RouteId(pub u32);

impl RouteId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A route from the route file. Never mutated after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub ship_kind: ShipKind,
    pub name: Option<String>,
    path: Vec<Location>,
}

impl Route {
    /// Callers guarantee at least two waypoints; the route loader enforces it.
    pub fn new(ship_kind: ShipKind, name: Option<String>, path: Vec<Location>) -> Self {
        debug_assert!(path.len() >= 2, "a route needs at least two waypoints");
        Self {
            ship_kind,
            name,
            path,
        }
    }

    pub fn path(&self) -> &[Location] {
        &self.path
    }

    pub fn path_len(&self) -> usize {
        self.path.len()
    }

    pub fn node(&self, index: usize) -> Location {
        self.path[index]
    }

    pub fn first_node(&self) -> usize {
        0
    }

    pub fn last_node(&self) -> usize {
        self.path.len() - 1
    }

    /// Whether `index` is the first or last waypoint.
    pub fn is_terminus(&self, index: usize) -> bool {
        index == 0 || index + 1 == self.path.len()
    }

    pub fn class(&self) -> &'static ShipClass {
        self.ship_kind.class()
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}
