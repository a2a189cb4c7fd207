//! Bucket sort with one bucket per element
//!
//! While buckets are gathered, the working array shows the gathered prefix
//! followed by the elements of the buckets not gathered yet, in input order.

use crate::models::{Highlight, Step, Value};

use super::common::{ValueRange, lay_out, value_range};

#[derive(Debug, Clone, Copy)]
enum State {
    Assign { i: usize },
    /// Look for the next non-empty bucket from `bucket` on
    Gather { bucket: usize },
    /// Final copy-back; descending rotates the next largest element into `i`
    CopyBack { i: usize },
    Finish,
    Exhausted,
}

pub struct BucketSort {
    input: Vec<Value>,
    values: Vec<Value>,
    ascending: bool,
    range: Option<ValueRange>,
    /// Bucket chosen for each input index
    assigned: Vec<usize>,
    buckets: Vec<Vec<Value>>,
    gathered: Vec<Value>,
    state: State,
}

impl BucketSort {
    pub fn new(input: &[Value], ascending: bool) -> Self {
        let range = value_range(input).ok();
        // no range to divide by when every value is equal
        let state = match range {
            Some(range) if !range.is_flat() => State::Assign { i: 0 },
            _ => State::Finish,
        };

        Self {
            input: input.to_vec(),
            values: input.to_vec(),
            ascending,
            range,
            assigned: Vec::with_capacity(input.len()),
            buckets: vec![Vec::new(); input.len()],
            gathered: Vec::with_capacity(input.len()),
            state,
        }
    }

    /// `floor((value - min) / (max - min) * n)`, clamped to the last bucket
    fn bucket_of(&self, value: Value, range: ValueRange) -> usize {
        let n = self.buckets.len();
        let normalized = value.abs_diff(range.min) as f64 / range.span() as f64;
        ((normalized * n as f64) as usize).min(n - 1)
    }
}

impl Iterator for BucketSort {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let n = self.values.len();

        loop {
            match self.state {
                State::Assign { i } if i < n => {
                    if let Some(range) = self.range {
                        let bucket = self.bucket_of(self.input[i], range);
                        self.buckets[bucket].push(self.input[i]);
                        self.assigned.push(bucket);
                    }
                    self.state = State::Assign { i: i + 1 };
                    return Some(Step::marked(&self.values, [(i, Highlight::Red)]));
                }
                State::Assign { .. } => self.state = State::Gather { bucket: 0 },
                State::Gather { bucket } if bucket < n => {
                    self.state = State::Gather { bucket: bucket + 1 };
                    if self.buckets[bucket].is_empty() {
                        continue;
                    }

                    let mut contents = std::mem::take(&mut self.buckets[bucket]);
                    contents.sort_unstable();
                    self.gathered.extend(contents);

                    let pending = self
                        .input
                        .iter()
                        .zip(&self.assigned)
                        .filter(|&(_, &b)| b > bucket)
                        .map(|(&v, _)| v);
                    lay_out(&mut self.values, &self.gathered, pending);
                    return Some(Step::plain(&self.values));
                }
                State::Gather { .. } => self.state = State::CopyBack { i: 0 },
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
    fn test_all_equal_short_circuits() {
        let steps: Vec<Step> = BucketSort::new(&[4, 4, 4], true).collect();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].snapshot, vec![4, 4, 4]);
    }

    #[test]
    fn test_step_phases() {
        let input = [3, 0, 2, 1];
        let steps: Vec<Step> = BucketSort::new(&input, true).collect();
        let n = input.len();

        // one red per assignment
        assert!(steps[..n].iter().all(|s| s.highlights.len() == 1
            && s.highlights.values().all(|h| *h == Highlight::Red)));

        // every value lands in its own bucket: four gather steps without highlights
        assert!(steps[n..2 * n].iter().all(|s| s.highlights.is_empty()));
        assert_eq!(steps[n].snapshot, vec![0, 3, 2, 1]);

        // green copy-back, then terminal
        assert!(steps[2 * n..3 * n].iter().all(|s| s.highlights.len() == 1));
        assert_eq!(steps.len(), 3 * n + 1);
        assert_eq!(steps.last().unwrap().snapshot, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_max_value_uses_last_bucket() {
        let sort = BucketSort::new(&[0, 10], true);
        let range = sort.range.unwrap();
        assert_eq!(sort.bucket_of(10, range), 1);
        assert_eq!(sort.bucket_of(0, range), 0);
    }

    #[test]
    fn test_descending_copy_back_rotates() {
        let steps: Vec<Step> = BucketSort::new(&[1, 3, 2], false).collect();
        let copy_back = &steps[steps.len() - 4..steps.len() - 1];
        assert_eq!(copy_back[0].snapshot, vec![3, 1, 2]);
        assert_eq!(copy_back[1].snapshot, vec![3, 2, 1]);
        assert_eq!(steps.last().unwrap().snapshot, vec![3, 2, 1]);
    }
}
