//! Counting sort
//!
//! Small value ranges use a dense frequency table indexed by `value - min`;
//! wider ranges fall back to an ordered map so memory stays proportional to
//! the input. Both are walked in ascending key order.

use std::collections::BTreeMap;

use crate::constants::COUNTING_DENSE_RANGE_LIMIT;
use crate::models::{Highlight, Step, Value};

use super::common::{ValueRange, lay_out, value_range};

/// Frequency of every value seen
#[derive(Debug)]
enum FrequencyTable {
    Dense { min: Value, counts: Vec<usize> },
    Sparse(BTreeMap<Value, usize>),
}

impl FrequencyTable {
    fn for_range(range: ValueRange) -> Self {
        // k = max - min + 1
        match range.span().checked_add(1) {
            Some(k) if k <= COUNTING_DENSE_RANGE_LIMIT => Self::Dense {
                min: range.min,
                counts: vec![0; k as usize],
            },
            _ => Self::Sparse(BTreeMap::new()),
        }
    }

    fn tally(&mut self, value: Value) {
        match self {
            Self::Dense { min, counts } => counts[value.abs_diff(*min) as usize] += 1,
            Self::Sparse(counts) => *counts.entry(value).or_insert(0) += 1,
        }
    }

    /// Non-zero `(value, frequency)` pairs in ascending value order
    fn into_entries(self) -> Vec<(Value, usize)> {
        match self {
            Self::Dense { min, counts } => counts
                .into_iter()
                .enumerate()
                .filter(|&(_, count)| count > 0)
                .map(|(index, count)| (min + index as Value, count))
                .collect(),
            Self::Sparse(counts) => counts.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum State {
    Tally { i: usize },
    Rebuild { entry: usize },
    CopyBack { i: usize },
    Finish,
    Exhausted,
}

pub struct CountingSort {
    input: Vec<Value>,
    values: Vec<Value>,
    ascending: bool,
    table: Option<FrequencyTable>,
    entries: Vec<(Value, usize)>,
    output: Vec<Value>,
    state: State,
}

impl CountingSort {
    pub fn new(input: &[Value], ascending: bool) -> Self {
        let table = value_range(input).ok().map(FrequencyTable::for_range);
        let state = if table.is_some() {
            State::Tally { i: 0 }
        } else {
            State::Finish
        };

        Self {
            input: input.to_vec(),
            values: input.to_vec(),
            ascending,
            table,
            entries: Vec::new(),
            output: Vec::with_capacity(input.len()),
            state,
        }
    }
}

impl Iterator for CountingSort {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let n = self.values.len();

        loop {
            match self.state {
                State::Tally { i } if i < n => {
                    if let Some(table) = self.table.as_mut() {
                        table.tally(self.input[i]);
                    }
                    self.state = State::Tally { i: i + 1 };
                    return Some(Step::marked(&self.values, [(i, Highlight::Red)]));
                }
                State::Tally { .. } => {
                    self.entries = self
                        .table
                        .take()
                        .map(FrequencyTable::into_entries)
                        .unwrap_or_default();
                    self.state = State::Rebuild { entry: 0 };
                }
                State::Rebuild { entry } if entry < self.entries.len() => {
                    let (value, count) = self.entries[entry];
                    self.output.extend(std::iter::repeat_n(value, count));

                    let pending = self.input.iter().copied().filter(|&v| v > value);
                    lay_out(&mut self.values, &self.output, pending);

                    self.state = State::Rebuild { entry: entry + 1 };
                    return Some(Step::marked(
                        &self.values,
                        [(self.output.len() - 1, Highlight::Green)],
                    ));
                }
                State::Rebuild { .. } => self.state = State::CopyBack { i: 0 },
                State::CopyBack { i } if i < n => {
                    if !self.ascending {
                        self.values[i..].rotate_right(1);
                    }
                    self.state = State::CopyBack { i: i + 1 };
                    return Some(Step::marked(&self.values, [(i, Highlight::Green)]));
                }
                State::CopyBack { .. } => self.state = State::Finish,
                State::Finish => {
                    self.state = State::Exhausted;
                    return Some(Step::plain(&self.values));
                }
                State::Exhausted => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_range_indexing() {
        let steps: Vec<Step> = CountingSort::new(&[5, -3, 5, 0, -3], true).collect();

        // tally, three distinct keys, copy-back, terminal
        assert_eq!(steps.len(), 5 + 3 + 5 + 1);
        assert_eq!(steps[5].snapshot, vec![-3, -3, 5, 5, 0]);
        assert_eq!(steps[5].highlight(1), Some(Highlight::Green));
        assert_eq!(steps[6].snapshot, vec![-3, -3, 0, 5, 5]);
        assert_eq!(steps[6].highlight(2), Some(Highlight::Green));
        assert_eq!(steps.last().unwrap().snapshot, vec![-3, -3, 0, 5, 5]);
    }

    #[test]
    fn test_dense_table_for_small_range() {
        let table = FrequencyTable::for_range(ValueRange { min: -2, max: 2 });
        assert!(matches!(table, FrequencyTable::Dense { ref counts, .. } if counts.len() == 5));
    }

    #[test]
    fn test_sparse_table_for_wide_range() {
        let input = [i64::MAX, 0, i64::MIN, 0];
        let table = FrequencyTable::for_range(value_range(&input).unwrap());
        assert!(matches!(table, FrequencyTable::Sparse(_)));

        let last = CountingSort::new(&input, false).last().unwrap();
        assert_eq!(last.snapshot, vec![i64::MAX, 0, 0, i64::MIN]);
    }

    #[test]
    fn test_entries_are_ascending() {
        let mut table = FrequencyTable::for_range(ValueRange { min: 1, max: 4 });
        for v in [4, 1, 4, 2] {
            table.tally(v);
        }
        assert_eq!(table.into_entries(), vec![(1, 1), (2, 1), (4, 2)]);
    }
}
