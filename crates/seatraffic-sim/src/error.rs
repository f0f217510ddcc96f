use thiserror::Error;

use seatraffic_core::enums::ShipKind;
use seatraffic_core::error::ConfigError;
use seatraffic_routes::RouteFileError;

/// Startup failure. The engine is not created when any of these occur.
#[derive(Debug, Error)]
pub enum TrafficError {
    #[error(transparent)]
    Routes(#[from] RouteFileError),

    #[error("no usable models for ship type \"{}\"", kind.token())]
    UnresolvedAsset { kind: ShipKind },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
