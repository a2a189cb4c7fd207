//! Input validation utilities

use crate::constants;

/// Validate the bounds used to generate a random input
pub fn validate_input_bounds(size: usize, min_value: i64, max_value: i64) -> Result<(), &'static str> {
    if size > constants::MAX_ARRAY_SIZE {
        return Err("Array size must be at most 3000 elements");
    }
    if min_value > max_value {
        return Err("Minimum value must not exceed maximum value");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_input_bounds() {
        assert!(validate_input_bounds(50, 0, 1000).is_ok());
        assert!(validate_input_bounds(0, 5, 5).is_ok());
        assert!(validate_input_bounds(3001, 0, 1000).is_err()); // Too large
        assert!(validate_input_bounds(50, 10, -10).is_err()); // Inverted range
    }
}
