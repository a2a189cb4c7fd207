//! Bubble sort

use crate::models::{Highlight, Step, Value};

use super::common::misordered;

#[derive(Debug, Clone, Copy)]
enum State {
    /// About to compare `j` and `j + 1` during pass `i`
    Scan { i: usize, j: usize, swapped: bool },
    /// Comparison announced; swap if needed
    Compare { i: usize, j: usize, swapped: bool },
    Finish,
    Exhausted,
}

/// Adjacent-swap sweep that stops after a pass without swaps
pub struct BubbleSort {
    values: Vec<Value>,
    ascending: bool,
    state: State,
}

impl BubbleSort {
    pub fn new(input: &[Value], ascending: bool) -> Self {
        Self {
            values: input.to_vec(),
            ascending,
            state: State::Scan { i: 0, j: 0, swapped: false },
        }
    }
}

impl Iterator for BubbleSort {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let n = self.values.len();

        loop {
            match self.state {
                State::Scan { i, j, swapped } => {
                    if i >= n {
                        self.state = State::Finish;
                    } else if j + i + 1 < n {
                        self.state = State::Compare { i, j, swapped };
                        return Some(Step::marked(
                            &self.values,
                            [(j, Highlight::Red), (j + 1, Highlight::Red)],
                        ));
                    } else if swapped {
                        self.state = State::Scan { i: i + 1, j: 0, swapped: false };
                    } else {
                        self.state = State::Finish;
                    }
                }
                State::Compare { i, j, swapped } => {
                    if misordered(&self.values[j], &self.values[j + 1], self.ascending) {
                        self.values.swap(j, j + 1);
                        self.state = State::Scan { i, j: j + 1, swapped: true };
                        return Some(Step::marked(
                            &self.values,
                            [(j, Highlight::Green), (j + 1, Highlight::Green)],
                        ));
                    }
                    self.state = State::Scan { i, j: j + 1, swapped };
                }
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
    fn test_sorted_input_stops_after_one_pass() {
        let steps: Vec<Step> = BubbleSort::new(&[1, 2, 3, 4], true).collect();
        // three comparisons, no swaps, then the terminal step
        assert_eq!(steps.len(), 4);
        assert!(steps[..3].iter().all(|s| s.highlights.values().all(|h| *h == Highlight::Red)));
    }

    #[test]
    fn test_swap_is_followed_by_green_step() {
        let steps: Vec<Step> = BubbleSort::new(&[2, 1], true).collect();
        assert_eq!(steps[0].snapshot, vec![2, 1]);
        assert_eq!(steps[0].highlight(0), Some(Highlight::Red));
        assert_eq!(steps[1].snapshot, vec![1, 2]);
        assert_eq!(steps[1].highlight(1), Some(Highlight::Green));
        assert_eq!(steps.last().unwrap().snapshot, vec![1, 2]);
    }

    #[test]
    fn test_descending() {
        let last = BubbleSort::new(&[1, 3, 2], false).last().unwrap();
        assert_eq!(last.snapshot, vec![3, 2, 1]);
    }
}
