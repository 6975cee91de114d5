use thiserror::Error;

/// Reasons a pour is refused. A refused pour never touches vessel state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MixError {
    #[error("vessel id must not be empty")]
    EmptyVesselId,
    #[error("pour amount must be a positive finite volume, got {amount}")]
    InvalidAmount { amount: f64 },
    #[error("pouring {amount} into a vessel holding {volume} would overflow its volume")]
    VolumeOverflow { volume: f64, amount: f64 },
}

impl MixError {
    /// Validate a pour request before it reaches vessel state.
    pub fn check(vessel_id: &str, amount: f64) -> Result<(), MixError> {
        if vessel_id.is_empty() {
            return Err(MixError::EmptyVesselId);
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(MixError::InvalidAmount { amount });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_amount() {
        assert_eq!(MixError::check("B1", 0.25), Ok(()));
    }

    #[test]
    fn rejects_empty_vessel() {
        assert_eq!(MixError::check("", 1.0), Err(MixError::EmptyVesselId));
    }

    #[test]
    fn rejects_zero_negative_and_nan() {
        assert!(matches!(
            MixError::check("B1", 0.0),
            Err(MixError::InvalidAmount { .. })
        ));
        assert!(matches!(
            MixError::check("B1", -3.0),
            Err(MixError::InvalidAmount { .. })
        ));
        assert!(matches!(
            MixError::check("B1", f64::NAN),
            Err(MixError::InvalidAmount { .. })
        ));
        assert!(matches!(
            MixError::check("B1", f64::INFINITY),
            Err(MixError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            MixError::InvalidAmount { amount: -2.0 }.to_string(),
            "pour amount must be a positive finite volume, got -2"
        );
    }
}
