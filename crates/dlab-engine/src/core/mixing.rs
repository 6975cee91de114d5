//! Beaker mixing: per-vessel composition plus the pH and color heuristics.
//!
//! No engine or rendering dependencies. The heuristics are linear clamps,
//! not a concentration model.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::api::config::MixConfig;
use crate::api::summary::Summary;
use crate::api::types::MixError;
use crate::assets::reagents::ChemicalTable;
use crate::components::color::LiquidColor;
use crate::core::vessel::VesselState;

fn amount(components: &BTreeMap<String, f64>, id: &str) -> f64 {
    components.get(id).copied().unwrap_or(0.0)
}

/// Estimate pH from the acid/base balance.
/// Each `ph_slope` mL of excess moves the reading one unit, clamped to the floor/ceiling.
pub fn estimate_ph(components: &BTreeMap<String, f64>, config: &MixConfig) -> f64 {
    let acid = amount(components, &config.acid);
    let base = amount(components, &config.base);
    if acid > base {
        (config.neutral_ph - (acid - base) / config.ph_slope).max(config.ph_floor)
    } else if base > acid {
        (config.neutral_ph + (base - acid) / config.ph_slope).min(config.ph_ceiling)
    } else {
        config.neutral_ph
    }
}

/// Pick the liquid color. Every rule is checked in order and a later
/// match overwrites an earlier one.
pub fn mix_color(components: &BTreeMap<String, f64>, config: &MixConfig) -> LiquidColor {
    let acid = amount(components, &config.acid);
    let base = amount(components, &config.base);

    let mut color = LiquidColor::Water;
    if amount(components, &config.indicator) != 0.0 && base > acid {
        color = LiquidColor::Indicator;
    }
    let precipitant = config
        .precipitants
        .iter()
        .any(|id| amount(components, id) != 0.0);
    if precipitant && amount(components, &config.salt) > 0.0 {
        color = LiquidColor::Precipitate;
    }
    if acid != 0.0 && base != 0.0 {
        color = LiquidColor::Neutralized;
    }
    color
}

/// Owns the state of every vessel on the bench.
pub struct MixingEngine {
    vessels: HashMap<String, VesselState>,
    table: Arc<ChemicalTable>,
    config: MixConfig,
}

impl MixingEngine {
    /// Engine with no reference table and default reagent roles.
    pub fn new() -> Self {
        Self {
            vessels: HashMap::new(),
            table: Arc::new(ChemicalTable::empty()),
            config: MixConfig::default(),
        }
    }

    /// Attach the shared reagent table.
    pub fn with_table(mut self, table: Arc<ChemicalTable>) -> Self {
        self.table = table;
        self
    }

    pub fn with_config(mut self, config: MixConfig) -> Self {
        self.config = config;
        self
    }

    pub fn table(&self) -> &ChemicalTable {
        &self.table
    }

    /// Pour `amount` mL of `chemical_id` into `vessel_id`.
    ///
    /// The vessel is created on first use. Chemicals missing from the
    /// reference table are accepted and only add volume. A pour that would
    /// push the volume past `f64::MAX` is refused.
    pub fn pour(
        &mut self,
        vessel_id: &str,
        chemical_id: &str,
        amount: f64,
    ) -> Result<&VesselState, MixError> {
        MixError::check(vessel_id, amount)?;

        let volume = self.vessels.get(vessel_id).map_or(0.0, |s| s.volume);
        if !(volume + amount).is_finite() {
            return Err(MixError::VolumeOverflow { volume, amount });
        }

        if !self.table.is_empty()
            && !self.table.contains(chemical_id)
            && !self.config.is_reactive(chemical_id)
        {
            log::debug!("unknown reagent '{}' poured into {}", chemical_id, vessel_id);
        }

        let neutral_ph = self.config.neutral_ph;
        let state = self
            .vessels
            .entry(vessel_id.to_string())
            .or_insert_with(|| VesselState::new(neutral_ph));

        state.add(chemical_id, amount);
        state.ph = estimate_ph(&state.components, &self.config);
        state.color = mix_color(&state.components, &self.config);
        Ok(state)
    }

    /// Current state of a vessel, if anything has been poured into it.
    pub fn state(&self, vessel_id: &str) -> Option<&VesselState> {
        self.vessels.get(vessel_id)
    }

    /// Readout for a vessel. A vessel that never received a pour reports
    /// the empty state instead of failing.
    pub fn summarize(&self, vessel_id: &str) -> Summary {
        match self.vessels.get(vessel_id) {
            Some(state) => Summary::from_state(vessel_id, state),
            None => Summary::empty(vessel_id, self.config.neutral_ph),
        }
    }

    /// Ids of all vessels with recorded state, sorted.
    pub fn vessel_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.vessels.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.vessels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vessels.is_empty()
    }
}

impl Default for MixingEngine {
    fn default() -> Self {
        Self::new()
    }
}
