//! The side-effect channel algorithms push steps and counters into

use super::step::Step;
use super::summary::{Counter, RunResult, Summary};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Collects steps and counters for a single run.
///
/// The recorder is passed explicitly through every recursive helper. It also
/// owns the run's random source so a seeded run replays identically.
#[derive(Debug)]
pub struct Recorder {
    steps: Vec<Step>,
    summary: Summary,
    rng: StdRng,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Recorder {
    pub fn new() -> Self {
        Recorder {
            steps: Vec::new(),
            summary: Summary::default(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Recorder {
            rng: StdRng::seed_from_u64(seed),
            ..Self::new()
        }
    }

    /// Declare optional counters so they are reported even if never incremented
    pub fn track(&mut self, counters: &[Counter]) {
        for &counter in counters {
            if let Some(slot) = self.summary.slot(counter) {
                slot.get_or_insert(0);
            }
        }
    }

    pub fn count(&mut self, counter: Counter) {
        match self.summary.slot(counter) {
            Some(slot) => *slot.get_or_insert(0) += 1,
            None => self.summary.comparisons += 1,
        }
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Counters so far, for narrating running totals
    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn finish(self) -> RunResult {
        RunResult::new(self.steps, self.summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::ArrayView;

    #[test]
    fn tracked_counter_reports_zero() {
        let mut rec = Recorder::new();
        rec.track(&[Counter::Swaps]);
        let summary = rec.finish().summary();
        assert_eq!(summary.swaps, Some(0));
        assert_eq!(summary.operations, None);
    }

    #[test]
    fn counting_an_undeclared_counter_tracks_it() {
        let mut rec = Recorder::new();
        rec.count(Counter::NodesExpanded);
        rec.count(Counter::NodesExpanded);
        rec.count(Counter::Comparisons);
        let summary = rec.finish().summary();
        assert_eq!(summary.nodes_expanded, Some(2));
        assert_eq!(summary.comparisons, 1);
    }

    #[test]
    fn steps_keep_push_order() {
        let mut rec = Recorder::new();
        rec.push(Step::new("a", ArrayView::capture(&[])));
        rec.push(Step::new("b", ArrayView::capture(&[])));
        assert_eq!(rec.len(), 2);
        let result = rec.finish();
        let messages: Vec<&str> = result.steps().iter().map(|s| s.message.as_str()).collect();
        assert_eq!(messages, vec!["a", "b"]);
    }
}
