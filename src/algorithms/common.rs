//! Helpers shared by the producers

use crate::error::{AppError, AppResult};
use crate::models::Value;

/// True when `a` must end up after `b` in the requested order
pub(crate) fn misordered<T: PartialOrd>(a: &T, b: &T, ascending: bool) -> bool {
    if ascending { a > b } else { a < b }
}

/// Smallest and largest value of a non-empty sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueRange {
    pub min: Value,
    pub max: Value,
}

impl ValueRange {
    /// `max - min`, exact for every pair of `i64`
    pub fn span(&self) -> u64 {
        self.max.abs_diff(self.min)
    }

    pub fn is_flat(&self) -> bool {
        self.min == self.max
    }
}

/// Compute the value range, failing on an empty sequence
pub fn value_range(values: &[Value]) -> AppResult<ValueRange> {
    let (&first, rest) = values.split_first().ok_or(AppError::InvalidRange)?;

    Ok(rest.iter().fold(ValueRange { min: first, max: first }, |range, &v| ValueRange {
        min: range.min.min(v),
        max: range.max.max(v),
    }))
}

/// Overwrite `values` with `placed` followed by the `pending` elements in original order
pub(crate) fn lay_out(values: &mut Vec<Value>, placed: &[Value], pending: impl Iterator<Item = Value>) {
    values.clear();
    values.extend_from_slice(placed);
    values.extend(pending);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range() {
        let range = value_range(&[5, -3, 5, 0, -3]).unwrap();
        assert_eq!(range, ValueRange { min: -3, max: 5 });
        assert_eq!(range.span(), 8);
        assert!(!range.is_flat());
    }

    #[test]
    fn test_value_range_empty() {
        assert!(matches!(value_range(&[]), Err(AppError::InvalidRange)));
    }

    #[test]
    fn test_span_does_not_overflow() {
        let range = value_range(&[i64::MIN, i64::MAX]).unwrap();
        assert_eq!(range.span(), u64::MAX);
    }

    #[test]
    fn test_misordered() {
        assert!(misordered(&3, &1, true));
        assert!(!misordered(&1, &1, true));
        assert!(misordered(&1, &3, false));
    }
}
