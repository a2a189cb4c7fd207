//! Selection sort

use crate::models::{Highlight, Step, Value};

use super::common::misordered;

#[derive(Debug, Clone, Copy)]
enum State {
    Outer { i: usize },
    Scan { i: usize, j: usize, best: usize },
    Exhausted,
}

pub struct SelectionSort {
    values: Vec<Value>,
    ascending: bool,
    state: State,
}

impl SelectionSort {
    pub fn new(input: &[Value], ascending: bool) -> Self {
        Self {
            values: input.to_vec(),
            ascending,
            state: State::Outer { i: 0 },
        }
    }
}

impl Iterator for SelectionSort {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let n = self.values.len();

        loop {
            match self.state {
                State::Outer { i } => {
                    if i >= n {
                        self.state = State::Exhausted;
                        return Some(Step::plain(&self.values));
                    }
                    self.state = State::Scan { i, j: i + 1, best: i };
                }
                State::Scan { i, j, best } if j < n => {
                    // the current best wins the highlight when it is `i` itself
                    let step = Step::marked(
                        &self.values,
                        [(i, Highlight::Red), (j, Highlight::Red), (best, Highlight::Green)],
                    );
                    let best = if misordered(&self.values[best], &self.values[j], self.ascending) {
                        j
                    } else {
                        best
                    };
                    self.state = State::Scan { i, j: j + 1, best };
                    return Some(step);
                }
                State::Scan { i, best, .. } => {
                    self.state = State::Outer { i: i + 1 };
                    if best != i {
                        self.values.swap(i, best);
                        return Some(Step::marked(
                            &self.values,
                            [(i, Highlight::Green), (best, Highlight::Green)],
                        ));
                    }
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
    fn test_scan_marks_best_green() {
        let steps: Vec<Step> = SelectionSort::new(&[3, 1, 2], true).collect();
        let first = &steps[0];
        assert_eq!(first.highlight(0), Some(Highlight::Green));
        assert_eq!(first.highlight(1), Some(Highlight::Red));

        // after seeing 1 at index 1 it becomes the best
        let second = &steps[1];
        assert_eq!(second.highlight(1), Some(Highlight::Green));
        assert_eq!(second.highlight(2), Some(Highlight::Red));
    }

    #[test]
    fn test_no_step_without_swap() {
        let steps: Vec<Step> = SelectionSort::new(&[1, 2], true).collect();
        // one comparison, no swap, terminal
        assert_eq!(steps.len(), 2);
    }
}
