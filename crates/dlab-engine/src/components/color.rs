use glam::Vec3;
use serde::{Serialize, Serializer};

/// Display color of the liquid in a vessel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiquidColor {
    /// Cool blue, plain water look.
    #[default]
    Water,
    /// Pink, indicator in excess base.
    Indicator,
    /// Gray, silver chloride precipitate.
    Precipitate,
    /// Pale green, acid and base both present.
    Neutralized,
}

impl LiquidColor {
    /// CSS hex token for the host material.
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Water => "#7fc8ff",
            Self::Indicator => "#ff88c3",
            Self::Precipitate => "#d9d9d9",
            Self::Neutralized => "#bfffbf",
        }
    }

    /// The hex token as 0..1 sRGB components (gamma-encoded, not linear).
    pub fn rgb(&self) -> Vec3 {
        let (r, g, b) = match self {
            Self::Water => (0x7f, 0xc8, 0xff),
            Self::Indicator => (0xff, 0x88, 0xc3),
            Self::Precipitate => (0xd9, 0xd9, 0xd9),
            Self::Neutralized => (0xbf, 0xff, 0xbf),
        };
        Vec3::new(r as f32, g as f32, b as f32) / 255.0
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Water => "water",
            Self::Indicator => "indicator",
            Self::Precipitate => "precipitate",
            Self::Neutralized => "neutralized",
        }
    }
}

impl Serialize for LiquidColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.hex())
    }
}
