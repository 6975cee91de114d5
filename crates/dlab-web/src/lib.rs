pub mod persist;
pub mod runner;

use std::cell::RefCell;

use dlab_engine::{MixConfig, MixError, Persister, Summary};
use glam::Vec3;
use wasm_bindgen::prelude::*;

pub use persist::JsPersister;
pub use runner::LabRunner;

// The store lives outside the runner so its callback can reach the lab.
thread_local! {
    static RUNNER: RefCell<Option<LabRunner>> = RefCell::new(None);
    static STORE: RefCell<Option<Box<dyn Persister>>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut LabRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Lab not initialized. Call lab_init() first.");
        f(runner)
    })
}

fn install_runner(runner: LabRunner) {
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
}

/// Replace the store. Returns false while the store is busy saving.
fn install_store(store: Option<Box<dyn Persister>>) -> bool {
    STORE.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => {
            *slot = store;
            true
        }
        Err(_) => false,
    })
}

/// Best-effort save. Runs with the runner released; a save issued from
/// inside the store's own callback is skipped.
fn store_summary(summary: &Summary) {
    STORE.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => {
            if let Some(store) = slot.as_mut() {
                if let Err(e) = store.save(&summary.vessel_id, summary) {
                    log::warn!("{}", e);
                }
            }
        }
        Err(_) => log::warn!("dlab: store busy, readout for {} not saved", summary.vessel_id),
    });
}

fn pour_and_store(vessel_id: &str, chemical_id: &str, amount: f64) -> Result<Summary, MixError> {
    let summary = with_runner(|r| r.pour(vessel_id, chemical_id, amount))?;
    store_summary(&summary);
    Ok(summary)
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Set up logging and the lab. `config_json` may override reagent roles.
#[wasm_bindgen]
pub fn lab_init(config_json: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json.as_deref() {
        Some(json) => MixConfig::from_json(json).map_err(js_err)?,
        None => MixConfig::default(),
    };
    install_runner(LabRunner::new(config).map_err(js_err)?);

    log::info!("dlab: initialized");
    Ok(())
}

/// Install a `(vesselId, summaryJson)` callback as the remote store, or
/// remove it by passing `undefined`. Throws when called from inside the
/// store callback itself.
#[wasm_bindgen]
pub fn lab_set_persister(callback: Option<js_sys::Function>) -> Result<(), JsValue> {
    let store = callback.map(|f| Box::new(JsPersister::new(f)) as Box<dyn Persister>);
    if install_store(store) {
        Ok(())
    } else {
        Err(JsValue::from_str("dlab: cannot replace the store while it is saving"))
    }
}

/// Pour into a vessel. Returns the summary JSON; throws on a refused pour.
#[wasm_bindgen]
pub fn lab_pour(vessel_id: &str, chemical_id: &str, amount: f64) -> Result<String, JsValue> {
    let summary = pour_and_store(vessel_id, chemical_id, amount).map_err(js_err)?;
    summary.to_json().map_err(js_err)
}

/// Monitor text for a vessel.
#[wasm_bindgen]
pub fn lab_summarize(vessel_id: &str) -> String {
    with_runner(|r| r.summarize(vessel_id).to_string())
}

#[wasm_bindgen]
pub fn lab_summary_json(vessel_id: &str) -> Result<String, JsValue> {
    with_runner(|r| r.summarize(vessel_id).to_json().map_err(js_err))
}

/// sRGB `[r, g, b]` of a vessel's liquid, for the host material.
#[wasm_bindgen]
pub fn lab_color_rgb(vessel_id: &str) -> Vec<f32> {
    with_runner(|r| r.color_rgb(vessel_id).to_vec())
}

/// Per-frame pose of a held instrument. `vessels_json` is
/// `[{ "id": "beaker1", "pos": [x, y, z] }, ...]`.
/// Returns the summary JSON when a pour registered, otherwise "".
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn lab_tick_instrument(
    instrument_id: &str,
    chemical_id: &str,
    now_ms: f64,
    held: bool,
    tilt_rad: f32,
    x: f32,
    y: f32,
    z: f32,
    vessels_json: &str,
) -> Result<String, JsValue> {
    let vessels = runner::parse_anchors(vessels_json).map_err(js_err)?;
    let poured = with_runner(|r| {
        r.tick_instrument(instrument_id, chemical_id, now_ms, held, tilt_rad, Vec3::new(x, y, z), &vessels)
    });
    match poured {
        Some(result) => {
            let summary = result.map_err(js_err)?;
            store_summary(&summary);
            summary.to_json().map_err(js_err)
        }
        None => Ok(String::new()),
    }
}

#[wasm_bindgen]
pub fn lab_release_instrument(instrument_id: &str) {
    with_runner(|r| r.release_instrument(instrument_id));
}

/// The reagent table for the page's picker.
#[wasm_bindgen]
pub fn lab_chemicals_json() -> Result<String, JsValue> {
    with_runner(|r| r.chemicals_json().map_err(js_err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dlab_engine::PersistError;
    use std::rc::Rc;

    fn fresh_lab() {
        install_runner(LabRunner::new(MixConfig::default()).unwrap());
        install_store(None);
    }

    /// Store that reads the monitor text back from the lab while saving.
    struct MonitorStore(Rc<RefCell<Vec<String>>>);

    impl Persister for MonitorStore {
        fn save(&mut self, vessel_id: &str, _summary: &Summary) -> Result<(), PersistError> {
            self.0.borrow_mut().push(lab_summarize(vessel_id));
            Ok(())
        }
    }

    /// Store that pours again from inside its own save.
    struct TopUpStore(Rc<RefCell<u32>>);

    impl Persister for TopUpStore {
        fn save(&mut self, vessel_id: &str, _summary: &Summary) -> Result<(), PersistError> {
            *self.0.borrow_mut() += 1;
            pour_and_store(vessel_id, "water", 1.0).map_err(|e| PersistError::new(vessel_id, e.to_string()))?;
            Ok(())
        }
    }

    /// Store that tries to replace itself while saving.
    struct SwappingStore(Rc<RefCell<Vec<bool>>>);

    impl Persister for SwappingStore {
        fn save(&mut self, _vessel_id: &str, _summary: &Summary) -> Result<(), PersistError> {
            self.0.borrow_mut().push(install_store(None));
            Ok(())
        }
    }

    #[test]
    fn store_callback_can_read_the_lab() {
        fresh_lab();
        let seen = Rc::new(RefCell::new(Vec::new()));
        install_store(Some(Box::new(MonitorStore(seen.clone()))));

        let json = match lab_pour("B1", "hcl", 1.0) {
            Ok(json) => json,
            Err(_) => panic!("pour refused"),
        };
        assert!(json.contains("\"vessel_id\":\"B1\""));
        assert_eq!(
            *seen.borrow(),
            vec!["Reaction Monitor:\nVolume: 1.0 ml\npH ~ 6.80\nComponents: hcl:1".to_string()]
        );
    }

    #[test]
    fn store_callback_can_pour_again() {
        fresh_lab();
        let saves = Rc::new(RefCell::new(0));
        install_store(Some(Box::new(TopUpStore(saves.clone()))));

        let summary = pour_and_store("B1", "hcl", 2.0).unwrap();
        assert_eq!(summary.volume, 2.0);
        // The nested pour lands but its own save is skipped.
        assert_eq!(*saves.borrow(), 1);
        assert_eq!(with_runner(|r| r.summarize("B1").volume), 3.0);
    }

    #[test]
    fn store_cannot_be_replaced_while_saving() {
        fresh_lab();
        let results = Rc::new(RefCell::new(Vec::new()));
        install_store(Some(Box::new(SwappingStore(results.clone()))));

        pour_and_store("B1", "salt", 1.0).unwrap();
        pour_and_store("B1", "salt", 1.0).unwrap();
        assert_eq!(*results.borrow(), vec![false, false]);
        assert!(install_store(None));
    }

    #[test]
    fn refused_pour_skips_store() {
        fresh_lab();
        let seen = Rc::new(RefCell::new(Vec::new()));
        install_store(Some(Box::new(MonitorStore(seen.clone()))));

        assert_eq!(pour_and_store("B1", "hcl", -1.0), Err(MixError::InvalidAmount { amount: -1.0 }));
        assert!(seen.borrow().is_empty());
    }
}
