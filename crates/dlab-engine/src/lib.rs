pub mod api;
pub mod core;
pub mod components;
pub mod bridge;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::config::MixConfig;
pub use api::lab::Lab;
pub use api::summary::Summary;
pub use api::types::MixError;
pub use assets::reagents::{ChemicalDescriptor, ChemicalTable};
pub use bridge::persist::{MemoryPersister, PersistError, Persister};
pub use components::color::LiquidColor;
pub use crate::core::mixing::{estimate_ph, mix_color, MixingEngine};
pub use crate::core::vessel::VesselState;
pub use input::trigger::{PourEvent, PourTrigger, TriggerConfig};
