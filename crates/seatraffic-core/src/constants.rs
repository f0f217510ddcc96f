//! Simulation constants and tuning parameters.

use crate::types::ShipClass;

// --- Geography ---

/// Earth radius used for all great-circle math (meters).
pub const EARTH_RADIUS: f64 = 6_378_145.0;

/// Southernmost tile boundary.
pub const MIN_SOUTH: i32 = -90;

/// Northernmost tile boundary (the tile spans 89°N to 90°N).
pub const MAX_SOUTH: i32 = 89;

/// Westernmost tile boundary.
pub const MIN_WEST: i32 = -180;

/// Easternmost tile boundary (the tile spans 179°E to 180°E).
pub const MAX_WEST: i32 = 179;

/// Number of tile rows (latitude bands).
pub const TILE_ROWS: usize = 180;

/// Number of tile columns (longitude bands).
pub const TILE_COLS: usize = 360;

// --- Scheduling ---

/// How many tiles away from the observer's tile vessels are simulated.
pub const TILE_RANGE: i32 = 1;

/// Largest accepted tile range; wider windows already cover every column.
pub const MAX_TILE_RANGE: i32 = 180;

/// Multiplied by the object density setting to give the maximum number of active vessels.
pub const RENDERING_SCALE: usize = 16;

/// Active vessel capacity when no density setting has been supplied.
pub const ACTIVE_DEFAULT: usize = 2 * RENDERING_SCALE;

/// Hard ceiling on active vessels.
pub const ACTIVE_MAX: usize = 4 * RENDERING_SCALE;

/// Try to space ships out by this many times their semilen (meters per meter).
pub const SHIP_SPACING: f64 = 8.0;

// --- Navigation ---

/// Headings and altitudes are only refreshed this often (seconds).
pub const HDG_HOLD_TIME: f64 = 10.0;

/// How long a ship hangs around at the dock at the end of its route (seconds).
pub const LINGER_TIME: f64 = 300.0;

// --- Rendering hand-off ---

/// Ships further than this from the observer are not drawn (meters).
pub const DRAW_DISTANCE: f64 = 20_000.0;

/// Reflection pass cut-off (meters).
pub const DRAW_REFLECT: f64 = 16_000.0;

/// Wake cut-off (meters).
pub const DRAW_WAKE: f64 = 12_000.0;

/// Only ships at least this fast leave a wake (m/s).
pub const WAKE_MIN_SPEED: f64 = 7.0;

/// Ships at least this large (semilen) get the big wake (meters).
pub const WAKE_BIG_SEMILEN: f64 = 40.0;

// --- Ship classes ---

/// Class descriptors, indexed by `ShipKind as usize`.
pub const SHIP_CLASSES: [ShipClass; 8] = [
    ShipClass { speed: 2.0, semilen: 8.0 },    // leisure, ~4 knots
    ShipClass { speed: 3.0, semilen: 15.0 },   // tourist, ~6 knots
    ShipClass { speed: 12.0, semilen: 80.0 },  // cruise, ~23.5 knots
    ShipClass { speed: 16.0, semilen: 21.0 },  // foot, ~31 knots
    ShipClass { speed: 11.0, semilen: 76.0 },  // car, ~21.5 knots
    ShipClass { speed: 10.0, semilen: 76.0 },  // hgv, ~19.5 knots
    ShipClass { speed: 8.0, semilen: 95.0 },   // cargo, ~15.5 knots
    ShipClass { speed: 8.0, semilen: 125.0 },  // tanker, ~15.5 knots
];
