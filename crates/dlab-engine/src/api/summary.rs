use std::fmt;

use serde::Serialize;

use crate::components::color::LiquidColor;
use crate::core::vessel::VesselState;

/// Reaction readout for one vessel, detached from engine state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub vessel_id: String,
    /// Total volume in mL.
    pub volume: f64,
    pub ph: f64,
    pub color: LiquidColor,
    /// Name of the color token (e.g., "neutralized").
    pub color_label: &'static str,
    /// `(chemical id, mL)` pairs in key order.
    pub components: Vec<(String, f64)>,
}

impl Summary {
    pub fn from_state(vessel_id: &str, state: &VesselState) -> Self {
        Self {
            vessel_id: vessel_id.to_string(),
            volume: state.volume,
            ph: state.ph,
            color: state.color,
            color_label: state.color.label(),
            components: state
                .components
                .iter()
                .map(|(id, amount)| (id.clone(), *amount))
                .collect(),
        }
    }

    /// Readout of a vessel nothing was poured into, reading `neutral_ph`.
    pub fn empty(vessel_id: &str, neutral_ph: f64) -> Self {
        Self::from_state(vessel_id, &VesselState::new(neutral_ph))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Monitor text shown next to the bench.
impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reaction Monitor:")?;
        writeln!(f, "Volume: {:.1} ml", self.volume)?;
        writeln!(f, "pH ~ {:.2}", self.ph)?;
        write!(f, "Components: ")?;
        for (i, (id, amount)) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:{}", id, amount)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_summary_text() {
        let text = Summary::empty("EMPTY", 7.0).to_string();
        assert_eq!(text, "Reaction Monitor:\nVolume: 0.0 ml\npH ~ 7.00\nComponents: ");
    }

    #[test]
    fn components_listed_in_key_order() {
        let mut state = VesselState::default();
        state.add("naoh", 10.0);
        state.add("hcl", 2.5);
        state.ph = 8.5;
        let summary = Summary::from_state("B1", &state);
        assert_eq!(
            summary.components,
            vec![("hcl".to_string(), 2.5), ("naoh".to_string(), 10.0)]
        );
        assert_eq!(
            summary.to_string(),
            "Reaction Monitor:\nVolume: 12.5 ml\npH ~ 8.50\nComponents: hcl:2.5, naoh:10"
        );
    }

    #[test]
    fn empty_summary_uses_given_neutral_ph() {
        let summary = Summary::empty("EMPTY", 6.5);
        assert_eq!(summary.ph, 6.5);
        assert_eq!(summary.color_label, "water");
        assert!(summary.to_string().contains("pH ~ 6.50"));
    }

    #[test]
    fn json_payload() {
        let mut state = VesselState::default();
        state.add("hcl", 1.0);
        let json = Summary::from_state("B1", &state).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["vessel_id"], "B1");
        assert_eq!(value["volume"], 1.0);
        assert_eq!(value["color"], "#7fc8ff");
        assert_eq!(value["color_label"], "water");
        assert_eq!(value["components"][0][0], "hcl");
        assert_eq!(value["components"][0][1], 1.0);
    }
}
