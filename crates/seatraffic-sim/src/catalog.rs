//! Per-kind model variants, with lazily resolved per-tile overrides.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use seatraffic_core::enums::ShipKind;
use seatraffic_core::types::TileKey;

use crate::error::TrafficError;
use crate::services::{ModelHandle, ModelProvider};

type VariantSets = [Vec<ModelHandle>; ShipKind::ALL.len()];

pub struct ModelCatalog {
    provider: Box<dyn ModelProvider>,
    defaults: VariantSets,
    /// Override sets per tile, resolved on first use. Empty means "use default".
    tiles: HashMap<TileKey, VariantSets>,
}

impl ModelCatalog {
    /// Resolve the default variants for every ship kind.
    ///
    /// Fails with `UnresolvedAsset` if any kind has nothing to draw.
    pub fn new(mut provider: Box<dyn ModelProvider>) -> Result<Self, TrafficError> {
        let mut defaults = VariantSets::default();
        for kind in ShipKind::ALL {
            let variants = provider.resolve_variants(kind, None);
            if variants.is_empty() {
                return Err(TrafficError::UnresolvedAsset { kind });
            }
            defaults[kind.index()] = variants;
        }
        info!(
            models = defaults.iter().map(Vec::len).sum::<usize>(),
            "resolved default ship models"
        );
        Ok(Self {
            provider,
            defaults,
            tiles: HashMap::new(),
        })
    }

    /// Variants eligible in `tile`. Never empty.
    pub fn variants(&mut self, kind: ShipKind, tile: TileKey) -> &[ModelHandle] {
        let provider = &mut self.provider;
        let overrides = self.tiles.entry(tile).or_insert_with(|| {
            let mut sets = VariantSets::default();
            for each in ShipKind::ALL {
                sets[each.index()] = provider.resolve_variants(each, Some(tile));
            }
            debug!(?tile, "resolved tile models");
            sets
        });
        let chosen = &overrides[kind.index()];
        if chosen.is_empty() {
            &self.defaults[kind.index()]
        } else {
            chosen
        }
    }

    /// Uniformly random variant for `kind` in `tile`.
    pub fn pick(
        &mut self,
        kind: ShipKind,
        tile: TileKey,
        rng: &mut impl Rng,
    ) -> Option<ModelHandle> {
        self.variants(kind, tile).choose(rng).cloned()
    }
}
