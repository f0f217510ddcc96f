//! Stock services for hosts without scenery: a flat sea and the default
//! model library.

use seatraffic_core::enums::ShipKind;
use seatraffic_core::types::{GeoPoint, TileKey};

use crate::services::{
    ModelHandle, ModelProvider, ProbeFailure, ProbeUnavailable, TerrainProbe, TerrainService,
};

/// Library paths of the default models for each ship kind.
pub fn default_models(kind: ShipKind) -> &'static [&'static str] {
    match kind {
        ShipKind::Leisure => &["opensceneryx/objects/vehicles/boats_ships/power.obj"],
        ShipKind::Tourist => &["opensceneryx/objects/vehicles/boats_ships/tour.obj"],
        ShipKind::Cruise => &["opensceneryx/objects/vehicles/boats_ships/cruise.obj"],
        ShipKind::Foot => &[
            "Damen_2006_Green.obj",
            "Damen_2006_Red.obj",
            "Damen_2006_Sky.obj",
            "Damen_2006_White.obj",
            "Damen_4212_Blue.obj",
            "Damen_4212_Green.obj",
            "Damen_4212_Orange.obj",
            "Damen_4212_Sky.obj",
        ],
        ShipKind::Car => &["Damen_2010.obj", "River_crossing.obj"],
        ShipKind::Hgv => &["opensceneryx/objects/vehicles/boats_ships/ferries.obj"],
        ShipKind::Cargo => &["opensceneryx/objects/vehicles/boats_ships/container.obj"],
        ShipKind::Tanker => &[
            "Aframax_tanker_Black.obj",
            "Aframax_tanker_Blue.obj",
            "Aframax_tanker_Grey.obj",
            "Aframax_tanker_Sky.obj",
        ],
    }
}

/// Default library for every kind; no per-tile overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct StockModels;

impl ModelProvider for StockModels {
    fn resolve_variants(&mut self, kind: ShipKind, tile: Option<TileKey>) -> Vec<ModelHandle> {
        if tile.is_some() {
            return Vec::new();
        }
        let base = kind.index() as u32 * 100;
        default_models(kind)
            .iter()
            .enumerate()
            .map(|(i, name)| ModelHandle::new(base + i as u32, *name))
            .collect()
    }
}

/// Terrain that is sea level everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatSea;

struct FlatProbe;

impl TerrainProbe for FlatProbe {
    fn probe_height(&mut self, _point: GeoPoint, reference: f64) -> Result<f64, ProbeFailure> {
        Ok(-reference)
    }
}

impl TerrainService for FlatSea {
    fn create_probe(&mut self) -> Result<Box<dyn TerrainProbe>, ProbeUnavailable> {
        Ok(Box::new(FlatProbe))
    }
}
