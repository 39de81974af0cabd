use crate::error::AppError;

/// Rounds a target weight down to the nearest multiple of `increment`.
/// The only approved way to compute any weight field written to a plan.
pub fn round_down(target: f64, increment: f64) -> Result<f64, AppError> {
    if increment <= 0.0 {
        return Err(AppError::Validation(
            "smallest_increment must be positive".to_string(),
        ));
    }
    Ok((target / increment).floor() * increment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_non_positive_increment() {
        assert!(round_down(100.0, 0.0).is_err());
        assert!(round_down(100.0, -1.0).is_err());
    }

    #[test]
    fn floors_to_multiple() {
        assert_eq!(round_down(107.0, 2.5).unwrap(), 105.0);
        assert_eq!(round_down(105.0, 2.5).unwrap(), 105.0);
    }

    proptest! {
        #[test]
        fn round_trip_law(x in 0.0f64..10_000.0, i in 0.01f64..50.0) {
            let rounded = round_down(x, i).unwrap();
            prop_assert!(rounded <= x);
            prop_assert!(rounded >= x - i);
            let ratio = rounded / i;
            prop_assert!((ratio - ratio.round()).abs() < 1e-6);
        }
    }
}
