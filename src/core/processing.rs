//! Progress screens shown while a loan is disbursed or an asset is fractionalized.

use std::time::Duration;

use crate::core::{
    config::{Timings, millis},
    sim::Timeline,
    stepper::Stepper,
};

pub const LOAN_STEPS: &[&str] = &[
    "Processing your loan application...",
    "Locking your digital asset...",
    "Activating the contract...",
    "Done!",
];

pub const FRACTION_STEPS: &[&str] = &[
    "Verify asset status",
    "Lock the original NFT",
    "Mint asset fragments",
    "Issue fNFT tokens",
];

/// Upper bound on progress ticks, whatever the configured cadence.
const MAX_TICKS: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProcessingEvent {
    /// Move the stepper to this index.
    Step(usize),
    /// Progress bar value in percent.
    Progress(f32),
    Finished,
}

/// Step cadence and progress cadence of one processing screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingPlan {
    pub labels: &'static [&'static str],
    pub step_every: Duration,
    pub tick_every: Duration,
    /// Number of ticks that take the bar from 0 to 100.
    pub ticks: u32,
    pub finish_after: Duration,
}

impl ProcessingPlan {
    /// Steps every `loan_step_ms`; the bar fills exactly when the last step
    /// would be left, and the redirect follows `loan_redirect_ms` later.
    pub fn loan(timings: &Timings) -> Self {
        let steps = LOAN_STEPS.len() as u64;
        let total = timings.loan_step_ms.saturating_mul(steps);
        let wanted = total / timings.loan_tick_ms.max(1);
        let ticks = wanted.clamp(1, MAX_TICKS);
        // too many ticks: stretch them so the bar still fills at `total`
        let tick_ms = if wanted > MAX_TICKS && timings.loan_tick_ms > 0 {
            total / MAX_TICKS
        } else {
            timings.loan_tick_ms
        };
        Self {
            labels: LOAN_STEPS,
            step_every: millis(timings.loan_step_ms),
            tick_every: millis(tick_ms),
            ticks: u32::try_from(ticks).unwrap_or(u32::MAX),
            finish_after: millis(total.saturating_add(timings.loan_redirect_ms)),
        }
    }

    /// The bar gains one percent per tick; the redirect follows the tick after
    /// it reaches 100.
    pub fn fraction(timings: &Timings) -> Self {
        let tick = timings.fraction_tick_ms;
        Self {
            labels: FRACTION_STEPS,
            step_every: millis(timings.fraction_step_ms),
            tick_every: millis(tick),
            ticks: 100,
            finish_after: millis(
                tick.saturating_mul(101)
                    .saturating_add(timings.fraction_redirect_ms),
            ),
        }
    }

    /// Progress added per tick.
    pub fn increment(&self) -> f32 {
        100.0 / self.ticks.max(1) as f32
    }

    pub fn stepper(&self) -> Stepper {
        Stepper::new(self.labels)
    }

    pub fn timeline(&self) -> Timeline<ProcessingEvent> {
        let mut timeline = Timeline::new();
        for step in 1..self.labels.len() {
            timeline.push(
                self.step_every.saturating_mul(step as u32),
                ProcessingEvent::Step(step),
            );
        }
        if !self.tick_every.is_zero() {
            for tick in 1..=self.ticks {
                let value = 100.0 * tick as f32 / self.ticks as f32;
                timeline.push(
                    self.tick_every.saturating_mul(tick),
                    ProcessingEvent::Progress(value),
                );
            }
        }
        timeline.push(self.finish_after, ProcessingEvent::Finished);
        timeline
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingState {
    stepper: Stepper,
    progress: f32,
    finished: bool,
}

impl ProcessingState {
    pub fn new(plan: &ProcessingPlan) -> Self {
        Self {
            stepper: plan.stepper(),
            progress: 0.0,
            finished: false,
        }
    }

    pub fn stepper(&self) -> &Stepper {
        &self.stepper
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns `true` when the event finishes processing.
    pub fn apply(&mut self, event: ProcessingEvent) -> bool {
        match event {
            ProcessingEvent::Step(index) => self.stepper.advance_to(index),
            ProcessingEvent::Progress(value) => self.progress = self.progress.max(value.min(100.0)),
            ProcessingEvent::Finished => {
                self.finished = true;
                self.progress = 100.0;
                tracing::info!(label = ?self.stepper.current_label(), "processing finished");
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loan_plan_fills_in_six_seconds_and_finishes_at_seven() {
        let plan = ProcessingPlan::loan(&Timings::default());
        let timeline = plan.timeline();
        let last_progress = timeline
            .entries()
            .iter()
            .filter(|(_, e)| matches!(e, ProcessingEvent::Progress(_)))
            .last()
            .map(|(at, _)| *at);
        assert_eq!(last_progress, Some(millis(6000)));
        assert_eq!(timeline.duration(), millis(7000));
    }

    #[test]
    fn fraction_plan_finishes_after_full_bar() {
        let plan = ProcessingPlan::fraction(&Timings::default());
        assert_eq!(plan.finish_after, millis(8580));
        let steps: Vec<_> = plan
            .timeline()
            .entries()
            .iter()
            .filter_map(|(at, e)| match e {
                ProcessingEvent::Step(i) => Some((*at, *i)),
                _ => None,
            })
            .collect();
        assert_eq!(
            steps,
            vec![(millis(2000), 1), (millis(4000), 2), (millis(6000), 3)]
        );
    }

    #[test]
    fn huge_timings_saturate() {
        let timings = Timings {
            loan_step_ms: u64::MAX,
            loan_tick_ms: 1,
            loan_redirect_ms: u64::MAX,
            fraction_tick_ms: u64::MAX,
            fraction_redirect_ms: 1,
            ..Timings::default()
        };

        let loan = ProcessingPlan::loan(&timings);
        assert_eq!(loan.ticks, MAX_TICKS as u32);
        assert_eq!(loan.tick_every, millis(u64::MAX / MAX_TICKS));
        assert_eq!(loan.finish_after, millis(u64::MAX));
        assert_eq!(loan.timeline().len(), 3 + MAX_TICKS as usize + 1);

        let fraction = ProcessingPlan::fraction(&timings);
        assert_eq!(fraction.finish_after, millis(u64::MAX));
        assert_eq!(fraction.timeline().len(), 3 + 100 + 1);
    }

    #[test]
    fn state_applies_events() {
        let plan = ProcessingPlan::loan(&Timings::default());
        let mut state = ProcessingState::new(&plan);
        let mut finished = false;
        for (_, event) in plan.timeline().entries() {
            finished = state.apply(*event);
        }
        assert!(finished);
        assert_eq!(state.stepper().current(), 3);
        assert_eq!(state.progress(), 100.0);
    }
}
