use crate::api::summary::Summary;
use crate::api::types::MixError;
use crate::bridge::persist::Persister;
use crate::core::mixing::MixingEngine;

/// Routes pours into the engine and forwards each readout to an optional store.
pub struct Lab {
    engine: MixingEngine,
    persister: Option<Box<dyn Persister>>,
}

impl Lab {
    pub fn new(engine: MixingEngine) -> Self {
        Self {
            engine,
            persister: None,
        }
    }

    pub fn with_persister(engine: MixingEngine, persister: Box<dyn Persister>) -> Self {
        Self {
            engine,
            persister: Some(persister),
        }
    }

    /// Apply a pour and return the fresh readout.
    /// A failing store is logged and never affects the result.
    pub fn pour(
        &mut self,
        vessel_id: &str,
        chemical_id: &str,
        amount: f64,
    ) -> Result<Summary, MixError> {
        let state = self.engine.pour(vessel_id, chemical_id, amount)?;
        let summary = Summary::from_state(vessel_id, state);

        if let Some(persister) = self.persister.as_mut() {
            if let Err(e) = persister.save(vessel_id, &summary) {
                log::warn!("{}", e);
            }
        }
        Ok(summary)
    }

    pub fn summarize(&self, vessel_id: &str) -> Summary {
        self.engine.summarize(vessel_id)
    }

    pub fn engine(&self) -> &MixingEngine {
        &self.engine
    }
}

impl Default for Lab {
    fn default() -> Self {
        Self::new(MixingEngine::new())
    }
}
