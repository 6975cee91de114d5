use glam::Vec3;

/// Thresholds deciding when a held instrument pours.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerConfig {
    /// Minimum |tilt| in degrees before liquid leaves the instrument (default: 45).
    pub tilt_threshold_deg: f32,
    /// Maximum distance in metres from instrument to vessel (default: 0.45).
    pub reach: f32,
    /// Minimum time between pours from one instrument in ms (default: 120).
    pub interval_ms: f64,
    /// Volume of a single pour in mL (default: 1).
    pub unit_ml: f64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            tilt_threshold_deg: 45.0,
            reach: 0.45,
            interval_ms: 120.0,
            unit_ml: 1.0,
        }
    }
}

/// A pour the trigger decided should happen.
#[derive(Debug, Clone, PartialEq)]
pub struct PourEvent {
    pub vessel_id: String,
    pub amount: f64,
}

/// Per-instrument pour gate: tilt, proximity and a rate limit.
///
/// Call `update` once per frame with the instrument's pose. At most one
/// vessel receives a pour per interval, the first in range in list order.
#[derive(Debug, Clone)]
pub struct PourTrigger {
    config: TriggerConfig,
    last_pour_ms: Option<f64>,
}

impl PourTrigger {
    pub fn new(config: TriggerConfig) -> Self {
        Self {
            config,
            last_pour_ms: None,
        }
    }

    pub fn config(&self) -> &TriggerConfig {
        &self.config
    }

    /// Whether the instrument is tipped far enough to pour.
    pub fn is_tilted(&self, tilt_rad: f32) -> bool {
        tilt_rad.to_degrees().abs() > self.config.tilt_threshold_deg
    }

    /// Check the pose at `now_ms` and return the pour to register, if any.
    pub fn update(
        &mut self,
        now_ms: f64,
        held: bool,
        tilt_rad: f32,
        source: Vec3,
        vessels: &[(String, Vec3)],
    ) -> Option<PourEvent> {
        if !held || !self.is_tilted(tilt_rad) {
            return None;
        }

        let (vessel_id, _) = vessels
            .iter()
            .find(|(_, pos)| pos.distance(source) < self.config.reach)?;

        if let Some(last) = self.last_pour_ms {
            if now_ms - last <= self.config.interval_ms {
                return None;
            }
        }
        self.last_pour_ms = Some(now_ms);

        Some(PourEvent {
            vessel_id: vessel_id.clone(),
            amount: self.config.unit_ml,
        })
    }

    /// Forget the rate-limit history (e.g., after the instrument is released).
    pub fn reset(&mut self) {
        self.last_pour_ms = None;
    }
}

impl Default for PourTrigger {
    fn default() -> Self {
        Self::new(TriggerConfig::default())
    }
}
