use dlab_engine::{PersistError, Persister, Summary};
use js_sys::Function;
use wasm_bindgen::JsValue;

/// Hands each readout to a page callback `(vesselId, summaryJson)`.
///
/// The callback owns the remote write. A returned promise is not awaited;
/// only a synchronous throw is reported back as a failure.
pub struct JsPersister {
    callback: Function,
}

impl JsPersister {
    pub fn new(callback: Function) -> Self {
        Self { callback }
    }
}

impl Persister for JsPersister {
    fn save(&mut self, vessel_id: &str, summary: &Summary) -> Result<(), PersistError> {
        let json = summary
            .to_json()
            .map_err(|e| PersistError::new(vessel_id, e.to_string()))?;

        self.callback
            .call2(
                &JsValue::NULL,
                &JsValue::from_str(vessel_id),
                &JsValue::from_str(&json),
            )
            .map(|_| ())
            .map_err(|e| {
                let reason = e.as_string().unwrap_or_else(|| format!("{:?}", e));
                PersistError::new(vessel_id, reason)
            })
    }
}
