//! Chemical reference table.
//!
//! The bench ships an embedded JSON table; pages may supply their own with
//! the same schema. Loaded once and shared read-only.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};

/// Embed the bench reagent table at compile time.
const CHEMICALS_JSON: &str = include_str!("../../data/chemicals.json");

/// One reagent as listed in the reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemicalDescriptor {
    /// Lookup key used by pour events (e.g., "hcl").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Chemical formula (e.g., "HCl").
    pub formula: String,
    /// Density in g/mL.
    pub density: f64,
    /// Molar mass in g/mol.
    pub molar_mass: f64,
    /// Free-form hazard statement.
    #[serde(default)]
    pub hazard: String,
}

/// Root structure for the JSON file.
#[derive(Debug, Deserialize)]
struct ChemicalTableJSON {
    chemicals: Vec<ChemicalDescriptor>,
}

/// Reagent registry with O(1) lookup by identifier.
#[derive(Debug, Clone, Default)]
pub struct ChemicalTable {
    chemicals: BTreeMap<String, ChemicalDescriptor>,
}

impl ChemicalTable {
    /// An empty table. Every identifier is unknown.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the table embedded in the crate.
    pub fn builtin() -> Result<Self, serde_json::Error> {
        Self::from_json(CHEMICALS_JSON)
    }

    /// Parse a table from a JSON string. A repeated id replaces the earlier entry.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: ChemicalTableJSON = serde_json::from_str(json)?;
        let mut chemicals = BTreeMap::new();
        for chem in raw.chemicals {
            chemicals.insert(chem.id.clone(), chem);
        }
        Ok(Self { chemicals })
    }

    pub fn get(&self, id: &str) -> Option<&ChemicalDescriptor> {
        self.chemicals.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.chemicals.contains_key(id)
    }

    /// Iterate over all reagents in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &ChemicalDescriptor> {
        self.chemicals.values()
    }

    pub fn len(&self) -> usize {
        self.chemicals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chemicals.is_empty()
    }

    /// Serialize the table for the page's reagent picker.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let list: Vec<&ChemicalDescriptor> = self.iter().collect();
        serde_json::to_string(&list)
    }
}
