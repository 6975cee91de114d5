use serde::Deserialize;

/// Reagent roles and pH constants used by the mixing derivations.
/// Deserializable so the page can override single fields from JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MixConfig {
    /// Identifier of the strong acid (default: "hcl").
    pub acid: String,
    /// Identifier of the strong base (default: "naoh").
    pub base: String,
    /// Identifier of the indicator that turns pink in base (default: "phenolph").
    pub indicator: String,
    /// Identifiers that precipitate with salt (default: "silver", "agno3").
    pub precipitants: Vec<String>,
    /// Identifier of the salt (default: "salt").
    pub salt: String,
    /// Millilitres of excess acid or base per pH unit (default: 5.0).
    pub ph_slope: f64,
    /// Lowest reported pH (default: 0.5).
    pub ph_floor: f64,
    /// Highest reported pH (default: 13.5).
    pub ph_ceiling: f64,
    /// pH of a balanced or empty vessel (default: 7.0).
    pub neutral_ph: f64,
}

impl Default for MixConfig {
    fn default() -> Self {
        Self {
            acid: "hcl".to_string(),
            base: "naoh".to_string(),
            indicator: "phenolph".to_string(),
            precipitants: vec!["silver".to_string(), "agno3".to_string()],
            salt: "salt".to_string(),
            ph_slope: 5.0,
            ph_floor: 0.5,
            ph_ceiling: 13.5,
            neutral_ph: 7.0,
        }
    }
}

impl MixConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Whether `id` plays a role in pH or color derivation.
    pub fn is_reactive(&self, id: &str) -> bool {
        id == self.acid
            || id == self.base
            || id == self.indicator
            || id == self.salt
            || self.precipitants.iter().any(|p| p == id)
    }
}
