//! RouteStore: owns every route loaded at startup.

use std::ops::Index;
use std::path::Path;

use tracing::info;

use seatraffic_core::enums::ShipKind;
use seatraffic_core::error::ParseError;
use seatraffic_core::route::{Route, RouteId};

use crate::error::RouteFileError;
use crate::parser::parse_routes;

/// All routes, in file order. A route's `RouteId` is its position here.
#[derive(Debug, Clone, Default)]
pub struct RouteStore {
    routes: Vec<Route>,
}

impl RouteStore {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Parse route file text.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        parse_routes(text).map(Self::new)
    }

    /// Read and parse a route file.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self, RouteFileError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RouteFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::parse(&text)?;
        info!(routes = store.len(), path = %path.display(), "loaded route file");
        Ok(store)
    }

    pub fn get(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RouteId, &Route)> {
        self.routes
            .iter()
            .enumerate()
            .map(|(i, route)| (RouteId(i as u32), route))
    }

    /// Number of routes of each ship kind, in `ShipKind::ALL` order.
    pub fn count_by_kind(&self) -> Vec<(ShipKind, usize)> {
        let mut counts = [0usize; ShipKind::ALL.len()];
        for route in &self.routes {
            counts[route.ship_kind.index()] += 1;
        }
        ShipKind::ALL.into_iter().zip(counts).collect()
    }
}

impl Index<RouteId> for RouteStore {
    type Output = Route;

    fn index(&self, id: RouteId) -> &Route {
        &self.routes[id.index()]
    }
}
