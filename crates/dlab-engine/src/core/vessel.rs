use std::collections::BTreeMap;

use crate::components::color::LiquidColor;

/// Accumulated contents of one vessel.
///
/// `volume` always equals the sum of `components`; `ph` and `color` are
/// recomputed from `components` after every pour.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselState {
    /// Total poured volume in mL.
    pub volume: f64,
    /// Chemical id to cumulative poured mL, in key order.
    pub components: BTreeMap<String, f64>,
    /// Heuristic pH estimate.
    pub ph: f64,
    /// Display color of the liquid.
    pub color: LiquidColor,
}

impl VesselState {
    /// An empty vessel reading the given neutral pH.
    pub fn new(neutral_ph: f64) -> Self {
        Self {
            volume: 0.0,
            components: BTreeMap::new(),
            ph: neutral_ph,
            color: LiquidColor::Water,
        }
    }

    /// Cumulative amount of a chemical, zero if never poured.
    pub fn amount(&self, chemical_id: &str) -> f64 {
        self.components.get(chemical_id).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Add a pour to both the composition and the running volume.
    pub(crate) fn add(&mut self, chemical_id: &str, amount: f64) {
        *self.components.entry(chemical_id.to_string()).or_insert(0.0) += amount;
        self.volume += amount;
    }
}

impl Default for VesselState {
    fn default() -> Self {
        Self::new(7.0)
    }
}
