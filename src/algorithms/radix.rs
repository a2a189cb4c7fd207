//! LSD radix sort, base 10
//!
//! Negative inputs are shifted by `-min` first and shifted back at the end.
//! Shifted values are held with wrapping arithmetic and read as `u64`, which
//! is the exact distance from the minimum for every `i64` input.

use crate::constants::RADIX_BASE;
use crate::models::{Highlight, Step, Value};

#[derive(Debug, Clone, Copy)]
enum State {
    Offset { i: usize },
    /// Decide whether another digit pass is needed
    NextPass,
    Tally { i: usize },
    /// Backward scan; `remaining` elements still to place
    Place { remaining: usize },
    CopyBack { i: usize },
    Reverse,
    Unoffset { i: usize },
    Finish,
    Exhausted,
}

pub struct RadixSort {
    values: Vec<Value>,
    ascending: bool,
    /// Minimum subtracted from every value, when the input has negatives
    offset: Option<Value>,
    max_key: u64,
    exp: u64,
    count: [usize; RADIX_BASE as usize],
    /// `sources[p]` is the pre-pass index of the element bound for slot `p`
    sources: Vec<usize>,
    /// Current slot of each pre-pass index, and its inverse
    location: Vec<usize>,
    occupant: Vec<usize>,
    state: State,
}

impl RadixSort {
    pub fn new(input: &[Value], ascending: bool) -> Self {
        let offset = input.iter().copied().min().filter(|&min| min < 0);
        let state = if input.is_empty() {
            State::Finish
        } else if offset.is_some() {
            State::Offset { i: 0 }
        } else {
            State::NextPass
        };

        Self {
            values: input.to_vec(),
            ascending,
            offset,
            max_key: input.iter().map(|&v| key(v, offset)).max().unwrap_or(0),
            exp: 1,
            count: [0; RADIX_BASE as usize],
            sources: vec![0; input.len()],
            location: Vec::new(),
            occupant: Vec::new(),
            state,
        }
    }

    fn digit(&self, index: usize) -> usize {
        // values are already shifted here
        let key = self.values[index] as u64;
        ((key / self.exp) % RADIX_BASE) as usize
    }

    fn after_passes(&self) -> State {
        if !self.ascending {
            State::Reverse
        } else if self.offset.is_some() {
            State::Unoffset { i: 0 }
        } else {
            State::Finish
        }
    }
}

/// Distance of `value` from the shift origin
fn key(value: Value, offset: Option<Value>) -> u64 {
    match offset {
        Some(min) => value.abs_diff(min),
        None => value as u64,
    }
}

impl Iterator for RadixSort {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let n = self.values.len();

        loop {
            match self.state {
                State::Offset { i } if i < n => {
                    if let Some(min) = self.offset {
                        self.values[i] = self.values[i].wrapping_sub(min);
                    }
                    self.state = State::Offset { i: i + 1 };
                    return Some(Step::marked(&self.values, [(i, Highlight::Red)]));
                }
                State::Offset { .. } => self.state = State::NextPass,
                State::NextPass => {
                    if self.max_key / self.exp == 0 {
                        self.state = self.after_passes();
                        continue;
                    }
                    self.count = [0; RADIX_BASE as usize];
                    self.state = State::Tally { i: 0 };
                    return Some(Step::uniform(&self.values, Highlight::Yellow));
                }
                State::Tally { i } if i < n => {
                    let digit = self.digit(i);
                    self.count[digit] += 1;
                    self.state = State::Tally { i: i + 1 };
                    return Some(Step::marked(&self.values, [(i, Highlight::Red)]));
                }
                State::Tally { .. } => {
                    for d in 1..self.count.len() {
                        self.count[d] += self.count[d - 1];
                    }
                    self.state = State::Place { remaining: n };
                }
                State::Place { remaining } if remaining > 0 => {
                    let index = remaining - 1;
                    let digit = self.digit(index);
                    self.count[digit] -= 1;
                    self.sources[self.count[digit]] = index;
                    self.state = State::Place { remaining: index };
                    return Some(Step::marked(&self.values, [(index, Highlight::Green)]));
                }
                State::Place { .. } => {
                    self.location = (0..n).collect();
                    self.occupant = (0..n).collect();
                    self.state = State::CopyBack { i: 0 };
                }
                State::CopyBack { i } if i < n => {
                    // swap the element bound for slot `i` into place
                    let source = self.sources[i];
                    let from = self.location[source];
                    let displaced = self.occupant[i];
                    self.values.swap(i, from);
                    self.occupant[from] = displaced;
                    self.location[displaced] = from;
                    self.occupant[i] = source;
                    self.location[source] = i;

                    self.state = State::CopyBack { i: i + 1 };
                    return Some(Step::marked(&self.values, [(i, Highlight::Blue)]));
                }
                State::CopyBack { .. } => {
                    self.state = match self.exp.checked_mul(RADIX_BASE) {
                        Some(exp) => {
                            self.exp = exp;
                            State::NextPass
                        }
                        None => self.after_passes(),
                    };
                }
                State::Reverse => {
                    self.values.reverse();
                    self.state = if self.offset.is_some() {
                        State::Unoffset { i: 0 }
                    } else {
                        State::Finish
                    };
                    return Some(Step::uniform(&self.values, Highlight::Purple));
                }
                State::Unoffset { i } if i < n => {
                    if let Some(min) = self.offset {
                        self.values[i] = self.values[i].wrapping_add(min);
                    }
                    self.state = State::Unoffset { i: i + 1 };
                    return Some(Step::marked(&self.values, [(i, Highlight::Green)]));
                }
                State::Unoffset { .. } => self.state = State::Finish,
                State::Finish => {
                    self.state = State::Exhausted;
                    return Some(Step::plain(&self.values));
                }
                State::Exhausted => return None,
            }
        }
    }
}
