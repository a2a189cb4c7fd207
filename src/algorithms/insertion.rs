//! Insertion sort
//!
//! The key travels left by adjacent swaps, so it stays visible in every
//! snapshot while larger predecessors shift right.

use crate::models::{Highlight, Step, Value};

use super::common::misordered;

#[derive(Debug, Clone, Copy)]
enum State {
    /// Pick up the key at `i`
    Pick { i: usize },
    /// Key sits at `hole`; shift it left or settle it
    Shift { i: usize, hole: usize },
    Exhausted,
}

pub struct InsertionSort {
    values: Vec<Value>,
    ascending: bool,
    state: State,
}

impl InsertionSort {
    pub fn new(input: &[Value], ascending: bool) -> Self {
        Self {
            values: input.to_vec(),
            ascending,
            state: State::Pick { i: 1 },
        }
    }
}

impl Iterator for InsertionSort {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        match self.state {
            State::Pick { i } => {
                if i >= self.values.len() {
                    self.state = State::Exhausted;
                    return Some(Step::plain(&self.values));
                }
                self.state = State::Shift { i, hole: i };
                Some(Step::marked(
                    &self.values,
                    [(i, Highlight::Red), (i - 1, Highlight::Red)],
                ))
            }
            State::Shift { i, hole } => {
                if hole > 0 && misordered(&self.values[hole - 1], &self.values[hole], self.ascending) {
                    self.values.swap(hole - 1, hole);
                    let hole = hole - 1;
                    self.state = State::Shift { i, hole };

                    let mut marks = vec![(hole, Highlight::Red)];
                    if hole > 0 {
                        marks.push((hole - 1, Highlight::Red));
                    }
                    return Some(Step::marked(&self.values, marks));
                }
                self.state = State::Pick { i: i + 1 };
                Some(Step::marked(&self.values, [(hole, Highlight::Green)]))
            }
            State::Exhausted => None,
        }
    }
}
