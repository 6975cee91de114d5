use std::collections::HashMap;
use std::sync::Arc;

use dlab_engine::{
    ChemicalTable, Lab, MixConfig, MixError, MixingEngine,
    PourTrigger, Summary, TriggerConfig,
};
use glam::Vec3;
use serde::Deserialize;

/// A vessel's world position as sent by the page.
#[derive(Debug, Clone, Deserialize)]
pub struct VesselAnchor {
    pub id: String,
    pub pos: [f32; 3],
}

/// Parse the page's vessel list.
pub fn parse_anchors(json: &str) -> Result<Vec<(String, Vec3)>, serde_json::Error> {
    let anchors: Vec<VesselAnchor> = serde_json::from_str(json)?;
    Ok(anchors
        .into_iter()
        .map(|a| (a.id, Vec3::from_array(a.pos)))
        .collect())
}

/// Holds the lab and one pour trigger per instrument.
///
/// The page keeps a single `thread_local!` LabRunner and calls it through
/// the free functions exported in `lib.rs`. The runner's lab has no store:
/// `lib.rs` saves readouts itself once the runner is no longer borrowed,
/// so a page callback may call back into the lab.
pub struct LabRunner {
    lab: Lab,
    trigger_config: TriggerConfig,
    triggers: HashMap<String, PourTrigger>,
}

impl LabRunner {
    /// Build a runner around the embedded reagent table.
    pub fn new(config: MixConfig) -> Result<Self, serde_json::Error> {
        let table = Arc::new(ChemicalTable::builtin()?);
        let engine = MixingEngine::new()
            .with_table(table)
            .with_config(config);
        Ok(Self {
            lab: Lab::new(engine),
            trigger_config: TriggerConfig::default(),
            triggers: HashMap::new(),
        })
    }

    pub fn pour(&mut self, vessel_id: &str, chemical_id: &str, amount: f64) -> Result<Summary, MixError> {
        self.lab.pour(vessel_id, chemical_id, amount)
    }

    pub fn summarize(&self, vessel_id: &str) -> Summary {
        self.lab.summarize(vessel_id)
    }

    /// Feed one frame of an instrument's pose. Returns the readout when the
    /// pose registered a pour of `chemical_id`.
    #[allow(clippy::too_many_arguments)]
    pub fn tick_instrument(
        &mut self,
        instrument_id: &str,
        chemical_id: &str,
        now_ms: f64,
        held: bool,
        tilt_rad: f32,
        pos: Vec3,
        vessels: &[(String, Vec3)],
    ) -> Option<Result<Summary, MixError>> {
        let config = &self.trigger_config;
        let trigger = self
            .triggers
            .entry(instrument_id.to_string())
            .or_insert_with(|| PourTrigger::new(config.clone()));

        let event = trigger.update(now_ms, held, tilt_rad, pos, vessels)?;
        Some(self.lab.pour(&event.vessel_id, chemical_id, event.amount))
    }

    /// Drop an instrument's rate-limit history when it is let go.
    pub fn release_instrument(&mut self, instrument_id: &str) {
        if let Some(trigger) = self.triggers.get_mut(instrument_id) {
            trigger.reset();
        }
    }

    pub fn chemicals_json(&self) -> Result<String, serde_json::Error> {
        self.lab.engine().table().to_json()
    }

    /// sRGB color of a vessel's liquid for the host material.
    pub fn color_rgb(&self, vessel_id: &str) -> [f32; 3] {
        self.lab.summarize(vessel_id).color.rgb().to_array()
    }

    pub fn lab(&self) -> &Lab {
        &self.lab
    }
}
