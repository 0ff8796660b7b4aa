//! Run summary counters and the finished run result

use super::step::Step;
use std::fmt;

/// Countable operations an algorithm may report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    Comparisons,
    Swaps,
    Operations,
    RecursiveCalls,
    NodesExpanded,
}

impl Counter {
    pub fn label(self) -> &'static str {
        match self {
            Counter::Comparisons => "Comparisons",
            Counter::Swaps => "Swaps",
            Counter::Operations => "Operations",
            Counter::RecursiveCalls => "Recursive calls",
            Counter::NodesExpanded => "Nodes expanded",
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregate counters for one run.
///
/// Optional counters are `None` when the algorithm does not track them,
/// which is different from a tracked counter that stayed at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub comparisons: u64,
    pub swaps: Option<u64>,
    pub operations: Option<u64>,
    pub recursive_calls: Option<u64>,
    pub nodes_expanded: Option<u64>,
}

impl Summary {
    pub fn get(&self, counter: Counter) -> Option<u64> {
        match counter {
            Counter::Comparisons => Some(self.comparisons),
            Counter::Swaps => self.swaps,
            Counter::Operations => self.operations,
            Counter::RecursiveCalls => self.recursive_calls,
            Counter::NodesExpanded => self.nodes_expanded,
        }
    }

    pub(crate) fn slot(&mut self, counter: Counter) -> Option<&mut Option<u64>> {
        match counter {
            Counter::Comparisons => None,
            Counter::Swaps => Some(&mut self.swaps),
            Counter::Operations => Some(&mut self.operations),
            Counter::RecursiveCalls => Some(&mut self.recursive_calls),
            Counter::NodesExpanded => Some(&mut self.nodes_expanded),
        }
    }

    /// Tracked counters as `(label, value)` pairs in display order
    pub fn entries(&self) -> Vec<(&'static str, u64)> {
        [
            Counter::Comparisons,
            Counter::Swaps,
            Counter::Operations,
            Counter::RecursiveCalls,
            Counter::NodesExpanded,
        ]
        .into_iter()
        .filter_map(|c| self.get(c).map(|v| (c.label(), v)))
        .collect()
    }
}

/// The ordered steps of one run plus its summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunResult {
    steps: Vec<Step>,
    summary: Summary,
}

impl RunResult {
    pub fn new(steps: Vec<Step>, summary: Summary) -> Self {
        RunResult { steps, summary }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_skip_untracked_counters() {
        let summary = Summary {
            comparisons: 4,
            swaps: Some(0),
            ..Summary::default()
        };
        assert_eq!(summary.entries(), vec![("Comparisons", 4), ("Swaps", 0)]);
    }

    #[test]
    fn comparisons_are_always_reported() {
        assert_eq!(Summary::default().entries(), vec![("Comparisons", 0)]);
    }
}
