//! Random input generation

use rand::Rng;

use crate::error::{AppError, AppResult};
use crate::models::Value;

use super::validation::validate_input_bounds;

/// Generate `size` values drawn uniformly from `min..=max`
pub fn random_sequence(size: usize, min: Value, max: Value) -> AppResult<Vec<Value>> {
    validate_input_bounds(size, min, max)
        .map_err(|reason| AppError::InvalidInput(reason.to_string()))?;

    let mut rng = rand::rng();
    Ok((0..size).map(|_| rng.random_range(min..=max)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_sequence_respects_bounds() {
        let values = random_sequence(200, -5, 5).unwrap();
        assert_eq!(values.len(), 200);
        assert!(values.iter().all(|v| (-5..=5).contains(v)));
    }

    #[test]
    fn test_random_sequence_degenerate_range() {
        let values = random_sequence(10, 7, 7).unwrap();
        assert!(values.iter().all(|&v| v == 7));
    }

    #[test]
    fn test_random_sequence_rejects_inverted_range() {
        assert!(matches!(
            random_sequence(10, 5, 1),
            Err(AppError::InvalidInput(_))
        ));
    }
}
