//! Simulated asynchronous operations.
//!
//! Every fake "network" operation in the app (wallet connection, KYC review,
//! custody tracking, loan processing) is a [`Timeline`]: a list of events
//! with their offsets from the start. A timeline is played either as a
//! [`Stream`] (for the GUI runtime) or on a spawned tokio task through
//! [`SimulatedRun`], which stops delivering events once dropped.

use std::{future, time::Duration};

use futures::{Stream, stream};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{Instant, sleep_until},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline<E> {
    entries: Vec<(Duration, E)>,
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E> Timeline<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` at `offset` from the start. Entries are kept in offset
    /// order; events sharing an offset keep insertion order.
    pub fn at(mut self, offset: Duration, event: E) -> Self {
        self.push(offset, event);
        self
    }

    pub fn push(&mut self, offset: Duration, event: E) {
        let index = self.entries.partition_point(|(at, _)| *at <= offset);
        self.entries.insert(index, (offset, event));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Offset of the last event.
    pub fn duration(&self) -> Duration {
        self.entries.last().map(|(at, _)| *at).unwrap_or_default()
    }

    pub fn entries(&self) -> &[(Duration, E)] {
        &self.entries
    }

    pub fn map<F, T>(self, mut f: F) -> Timeline<T>
    where
        F: FnMut(E) -> T,
    {
        Timeline {
            entries: self
                .entries
                .into_iter()
                .map(|(at, event)| (at, f(event)))
                .collect(),
        }
    }
}

impl<E: Send + 'static> Timeline<E> {
    /// Yield each event once its offset has elapsed. The clock starts on first poll.
    pub fn into_stream(self) -> impl Stream<Item = E> + Send + 'static {
        stream::unfold(
            (self.entries.into_iter(), None::<Instant>),
            |(mut entries, start)| async move {
                let (offset, event) = entries.next()?;
                let start = start.unwrap_or_else(Instant::now);
                wait_until(start, offset).await;
                Some((event, (entries, Some(start))))
            },
        )
    }

    /// Play the timeline on a tokio task. Must be called inside a runtime.
    pub fn spawn(self) -> SimulatedRun<E> {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(async move {
            let start = Instant::now();
            for (offset, event) in self.entries {
                wait_until(start, offset).await;
                if tx.send(event).is_err() {
                    break;
                }
            }
        });
        SimulatedRun { rx, handle }
    }
}

/// Sleep until `offset` after `start`. A deadline past the clock's range never comes.
async fn wait_until(start: Instant, offset: Duration) {
    match start.checked_add(offset) {
        Some(deadline) => sleep_until(deadline).await,
        None => future::pending::<()>().await,
    }
}

/// A timeline playing in the background. Dropping it aborts the playback,
/// so an abandoned screen never receives late events.
#[derive(Debug)]
pub struct SimulatedRun<E> {
    rx: mpsc::UnboundedReceiver<E>,
    handle: JoinHandle<()>,
}

impl<E> SimulatedRun<E> {
    /// Next event, or `None` once the timeline is exhausted or cancelled.
    pub async fn next(&mut self) -> Option<E> {
        self.rx.recv().await
    }

    pub fn cancel(&mut self) {
        self.handle.abort();
        self.rx.close();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<E> Drop for SimulatedRun<E> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_offset_order() {
        let timeline = Timeline::new()
            .at(Duration::from_millis(300), "c")
            .at(Duration::from_millis(100), "a")
            .at(Duration::from_millis(300), "d")
            .at(Duration::from_millis(200), "b");
        let events: Vec<_> = timeline.entries().iter().map(|(_, e)| *e).collect();
        assert_eq!(events, vec!["a", "b", "c", "d"]);
        assert_eq!(timeline.duration(), Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn unreachable_offset_stays_pending() {
        let mut run = Timeline::new()
            .at(Duration::from_millis(100), 1)
            .at(Duration::MAX, 2)
            .spawn();
        assert_eq!(run.next().await, Some(1));

        let late = tokio::time::timeout(Duration::from_secs(3600), run.next()).await;
        assert!(late.is_err());
        assert!(!run.is_finished());
    }

    #[test]
    fn empty_timeline_has_zero_duration() {
        let timeline: Timeline<()> = Timeline::new();
        assert!(timeline.is_empty());
        assert_eq!(timeline.duration(), Duration::ZERO);
    }
}
