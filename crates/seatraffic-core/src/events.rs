//! Events emitted by the scheduler for hosts and tests.

use serde::{Deserialize, Serialize};

use crate::enums::{Direction, RetireReason};
use crate::route::RouteId;

/// Changes to the active pool, in the order they happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TrafficEvent {
    /// A candidate route became an active vessel.
    Promoted {
        route: RouteId,
        start_node: usize,
        direction: Direction,
    },
    /// An active vessel was removed from the pool.
    Retired { route: RouteId, reason: RetireReason },
    /// A candidate could not be instantiated and was skipped for this pass.
    PromotionAbandoned { route: RouteId },
}
