//! Iterative quick sort with Lomuto partitioning

use crate::models::{Highlight, Step, Value};

#[derive(Debug, Clone, Copy)]
enum State {
    /// Take the next range off the work stack
    Pop,
    /// Announce candidate `j` against the pivot at `high`
    Scan { low: usize, high: usize, store: usize, j: usize },
    /// Move candidate `j` into the low partition if it qualifies
    Check { low: usize, high: usize, store: usize, j: usize },
    Exhausted,
}

pub struct QuickSort {
    values: Vec<Value>,
    ascending: bool,
    stack: Vec<(usize, usize)>,
    state: State,
}

impl QuickSort {
    pub fn new(input: &[Value], ascending: bool) -> Self {
        let mut stack = Vec::new();
        if !input.is_empty() {
            stack.push((0, input.len() - 1));
        }

        Self {
            values: input.to_vec(),
            ascending,
            stack,
            state: State::Pop,
        }
    }

    fn goes_low(&self, candidate: Value, pivot: Value) -> bool {
        if self.ascending {
            candidate <= pivot
        } else {
            candidate > pivot
        }
    }
}

impl Iterator for QuickSort {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            match self.state {
                State::Pop => {
                    let Some((low, high)) = self.stack.pop() else {
                        self.state = State::Exhausted;
                        return Some(Step::plain(&self.values));
                    };
                    if low >= high {
                        continue;
                    }
                    self.state = State::Scan { low, high, store: low, j: low };
                    return Some(Step::marked(&self.values, [(high, Highlight::Green)]));
                }
                State::Scan { low, high, store, j } if j < high => {
                    self.state = State::Check { low, high, store, j };
                    return Some(Step::marked(
                        &self.values,
                        [(j, Highlight::Red), (high, Highlight::Green)],
                    ));
                }
                State::Scan { low, high, store, .. } => {
                    self.values.swap(store, high);
                    let pivot = store;
                    // the right range is popped first
                    if pivot > low {
                        self.stack.push((low, pivot - 1));
                    }
                    if pivot + 1 < high {
                        self.stack.push((pivot + 1, high));
                    }
                    self.state = State::Pop;
                    return Some(Step::marked(
                        &self.values,
                        [(pivot, Highlight::Green), (high, Highlight::Green)],
                    ));
                }
                State::Check { low, high, store, j } => {
                    if self.goes_low(self.values[j], self.values[high]) {
                        self.values.swap(store, j);
                        self.state = State::Scan { low, high, store: store + 1, j: j + 1 };
                        return Some(Step::marked(
                            &self.values,
                            [(store, Highlight::Green), (j, Highlight::Green), (high, Highlight::Green)],
                        ));
                    }
                    self.state = State::Scan { low, high, store, j: j + 1 };
                }
                State::Exhausted => return None,
            }
        }
    }
}
