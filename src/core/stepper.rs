/// How a single step relates to the stepper's current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Active,
    Upcoming,
}

/// Forward-only progress over a fixed list of labelled steps.
///
/// Starts at index 0. The last index is terminal: advancing past it does nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stepper {
    labels: &'static [&'static str],
    current: usize,
}

impl Stepper {
    pub fn new(labels: &'static [&'static str]) -> Self {
        Self { labels, current: 0 }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn labels(&self) -> &'static [&'static str] {
        self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn current_label(&self) -> Option<&'static str> {
        self.labels.get(self.current).copied()
    }

    pub fn is_terminal(&self) -> bool {
        self.current + 1 >= self.labels.len()
    }

    /// Move to the next step. Returns `false` when already on the last step.
    pub fn advance(&mut self) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.current += 1;
        tracing::debug!(step = self.current, label = ?self.current_label(), "stepper advanced");
        true
    }

    /// Advance until `index` is reached. Indices behind the current step are ignored.
    pub fn advance_to(&mut self, index: usize) {
        while self.current < index && self.advance() {}
    }

    pub fn status(&self, index: usize) -> StepStatus {
        use std::cmp::Ordering::*;
        match index.cmp(&self.current) {
            Less => StepStatus::Completed,
            Equal => StepStatus::Active,
            Greater => StepStatus::Upcoming,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &'static str, StepStatus)> + '_ {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| (i, *label, self.status(i)))
    }
}
