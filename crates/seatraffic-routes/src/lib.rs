//! Route data for SeaTraffic.
//!
//! Route file parsing, the route store, and the per-tile spatial index
//! used to find candidate routes near the observer.

pub use seatraffic_core as core;

pub mod error;
pub mod parser;
pub mod store;
pub mod tile_index;

// Re-export key types for convenience.
pub use error::RouteFileError;
pub use parser::parse_routes;
pub use store::RouteStore;
pub use tile_index::TileIndex;

#[cfg(test)]
mod tests;
