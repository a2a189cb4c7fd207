//! Heap sort: max-heap when ascending, min-heap when descending

use crate::models::{Highlight, Step, Value};

use super::common::misordered;

/// Where to continue once a sift-down settles
#[derive(Debug, Clone, Copy)]
enum Resume {
    /// Heapify nodes `remaining - 1` down to `0`
    Build { remaining: usize },
    /// Extract into `end`
    Extract { end: usize },
}

#[derive(Debug, Clone, Copy)]
enum State {
    Build { remaining: usize },
    /// Show `node` and its children within `len`
    Inspect { node: usize, len: usize, then: Resume },
    /// Swap `node` with its preferred child, if any
    Sift { node: usize, len: usize, then: Resume },
    Extract { end: usize },
    Swap { end: usize },
    Finish,
    Exhausted,
}

impl From<Resume> for State {
    fn from(resume: Resume) -> Self {
        match resume {
            Resume::Build { remaining } => State::Build { remaining },
            Resume::Extract { end } => State::Extract { end },
        }
    }
}

pub struct HeapSort {
    values: Vec<Value>,
    ascending: bool,
    state: State,
}

impl HeapSort {
    pub fn new(input: &[Value], ascending: bool) -> Self {
        Self {
            values: input.to_vec(),
            ascending,
            state: State::Build {
                remaining: input.len() / 2,
            },
        }
    }

    /// Child that must replace `node` at the top of its subtree, if any
    fn preferred(&self, node: usize, len: usize) -> usize {
        let mut best = node;
        for child in [2 * node + 1, 2 * node + 2] {
            if child < len && misordered(&self.values[child], &self.values[best], self.ascending) {
                best = child;
            }
        }
        best
    }
}

impl Iterator for HeapSort {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        let n = self.values.len();

        loop {
            match self.state {
                State::Build { remaining: 0 } => {
                    self.state = if n > 1 {
                        State::Extract { end: n - 1 }
                    } else {
                        State::Finish
                    };
                }
                State::Build { remaining } => {
                    let node = remaining - 1;
                    self.state = State::Inspect {
                        node,
                        len: n,
                        then: Resume::Build { remaining: node },
                    };
                }
                State::Inspect { node, len, then } => {
                    let mut marks = vec![(node, Highlight::Green)];
                    marks.extend(
                        [2 * node + 1, 2 * node + 2]
                            .into_iter()
                            .filter(|&child| child < len)
                            .map(|child| (child, Highlight::Red)),
                    );
                    self.state = State::Sift { node, len, then };
                    return Some(Step::marked(&self.values, marks));
                }
                State::Sift { node, len, then } => {
                    let best = self.preferred(node, len);
                    if best == node {
                        self.state = then.into();
                        continue;
                    }
                    self.values.swap(node, best);
                    self.state = State::Inspect { node: best, len, then };
                    return Some(Step::marked(
                        &self.values,
                        [(node, Highlight::Green), (best, Highlight::Green)],
                    ));
                }
                State::Extract { end: 0 } => self.state = State::Finish,
                State::Extract { end } => {
                    self.state = State::Swap { end };
                    return Some(Step::marked(
                        &self.values,
                        [(end, Highlight::Green), (0, Highlight::Red)],
                    ));
                }
                State::Swap { end } => {
                    self.values.swap(0, end);
                    self.state = State::Inspect {
                        node: 0,
                        len: end,
                        then: Resume::Extract { end: end - 1 },
                    };
                    return Some(Step::marked(
                        &self.values,
                        [(end, Highlight::Green), (0, Highlight::Green)],
                    ));
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
    fn test_inspection_marks_children() {
        let steps: Vec<Step> = HeapSort::new(&[1, 2, 3], true).collect();
        let first = &steps[0];
        assert_eq!(first.highlight(0), Some(Highlight::Green));
        assert_eq!(first.highlight(1), Some(Highlight::Red));
        assert_eq!(first.highlight(2), Some(Highlight::Red));

        // 3 is promoted to the root
        assert_eq!(steps[1].snapshot, vec![3, 2, 1]);
        assert_eq!(steps[1].highlight(2), Some(Highlight::Green));
    }

    #[test]
    fn test_extraction_steps() {
        let steps: Vec<Step> = HeapSort::new(&[1, 2], true).collect();
        // inspect, promote, inspect leaf, announce extraction, swap, inspect root, terminal
        assert_eq!(steps.len(), 7);
        assert_eq!(steps[3].highlight(0), Some(Highlight::Red));
        assert_eq!(steps[3].highlight(1), Some(Highlight::Green));
        assert_eq!(steps[4].snapshot, vec![1, 2]);
    }

    #[test]
    fn test_min_heap_when_descending() {
        let steps: Vec<Step> = HeapSort::new(&[3, 2, 1], false).collect();
        assert_eq!(steps[1].snapshot, vec![1, 2, 3]);
        assert_eq!(steps.last().unwrap().snapshot, vec![3, 2, 1]);
    }
}
