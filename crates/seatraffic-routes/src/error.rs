use std::io;
use std::path::PathBuf;

use thiserror::Error;

use seatraffic_core::error::ParseError;

/// Failure loading a route file from disk.
#[derive(Debug, Error)]
pub enum RouteFileError {
    #[error("Can't read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Parse(#[from] ParseError),
}
