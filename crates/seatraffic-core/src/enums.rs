//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::SHIP_CLASSES;
use crate::types::ShipClass;

/// Kinds of ships we recognise. The token is what appears in the route file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipKind {
    Leisure,
    Tourist,
    Cruise,
    /// Foot passenger ferry.
    Foot,
    /// Car ferry.
    Car,
    /// Heavy goods vehicle ferry.
    Hgv,
    Cargo,
    Tanker,
}

impl ShipKind {
    pub const ALL: [ShipKind; 8] = [
        ShipKind::Leisure,
        ShipKind::Tourist,
        ShipKind::Cruise,
        ShipKind::Foot,
        ShipKind::Car,
        ShipKind::Hgv,
        ShipKind::Cargo,
        ShipKind::Tanker,
    ];

    /// Token used for this kind in the route file.
    pub fn token(self) -> &'static str {
        match self {
            ShipKind::Leisure => "leisure",
            ShipKind::Tourist => "tourist",
            ShipKind::Cruise => "cruise",
            ShipKind::Foot => "foot",
            ShipKind::Car => "car",
            ShipKind::Hgv => "hgv",
            ShipKind::Cargo => "cargo",
            ShipKind::Tanker => "tanker",
        }
    }

    /// Exact, case-sensitive token lookup.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.token() == token)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Speed and size of this kind of ship.
    pub fn class(self) -> &'static ShipClass {
        &SHIP_CLASSES[self.index()]
    }
}

/// Direction of travel along a route's path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards the last waypoint (+1).
    #[default]
    Forward,
    /// Towards the first waypoint (-1).
    Reverse,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }

    /// The node one step from `node` in this direction, if the path has one.
    pub fn step(self, node: usize, path_len: usize) -> Option<usize> {
        match self {
            Direction::Forward => (node + 1 < path_len).then_some(node + 1),
            Direction::Reverse => node.checked_sub(1),
        }
    }
}

/// Why a vessel left the active pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetireReason {
    /// Its last node is no longer within range of the observer's tile.
    OutOfRange,
    /// The pool was over capacity.
    Surplus,
}

/// Wake model to draw behind a moving vessel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WakeSize {
    Medium,
    Big,
}
