//! Dialog gates: the contract must be read and a signature drawn before
//! the user may confirm. Both gates reset every time their dialog opens.

use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("Please scroll to the end of the contract to confirm you have read every clause")]
    NotScrolledToBottom,
    #[error("Please sign in the signature area to complete the contract")]
    NotSigned,
}

/// Scroll position of the contract text container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Distance scrolled from the top.
    pub offset: f32,
    /// Full height of the scrolled content.
    pub content_height: f32,
    /// Visible height of the container.
    pub viewport_height: f32,
}

impl ScrollMetrics {
    pub fn remaining(&self) -> f32 {
        (self.content_height - self.offset - self.viewport_height).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadGate {
    threshold_px: f32,
    scrolled_to_bottom: bool,
}

impl ReadGate {
    pub fn new(threshold_px: f32) -> Self {
        Self {
            threshold_px,
            scrolled_to_bottom: false,
        }
    }

    /// Reset for a fresh dialog session.
    pub fn open(&mut self) {
        self.scrolled_to_bottom = false;
    }

    pub fn has_scrolled_to_bottom(&self) -> bool {
        self.scrolled_to_bottom
    }

    /// Record a scroll event. Returns `true` only on the event that first reaches the bottom.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> bool {
        if self.scrolled_to_bottom || metrics.remaining() > self.threshold_px {
            return false;
        }
        self.scrolled_to_bottom = true;
        tracing::debug!(offset = metrics.offset, "contract read to the bottom");
        true
    }

    pub fn confirm(&self) -> Result<(), GateError> {
        if self.scrolled_to_bottom {
            Ok(())
        } else {
            Err(GateError::NotScrolledToBottom)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Free-hand signature capture. Only tracks whether something was drawn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignatureGate {
    strokes: Vec<Vec<Point>>,
    pending: Option<Vec<Point>>,
    auto_filled: bool,
    signed: bool,
}

impl SignatureGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for a fresh dialog session.
    pub fn open(&mut self) {
        *self = Self::default();
    }

    pub fn has_signed(&self) -> bool {
        self.signed
    }

    pub fn is_drawing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn strokes(&self) -> &[Vec<Point>] {
        &self.strokes
    }

    pub fn pending_stroke(&self) -> Option<&[Point]> {
        self.pending.as_deref()
    }

    pub fn is_auto_filled(&self) -> bool {
        self.auto_filled
    }

    pub fn pen_down(&mut self, at: Point) {
        self.pending = Some(vec![at]);
    }

    pub fn pen_move(&mut self, to: Point) {
        if let Some(stroke) = self.pending.as_mut() {
            stroke.push(to);
        }
    }

    /// Finish the current stroke. Returns `true` when a stroke was completed.
    pub fn pen_up(&mut self) -> bool {
        let Some(stroke) = self.pending.take() else {
            return false;
        };
        self.strokes.push(stroke);
        if !self.signed {
            tracing::debug!("signature captured");
        }
        self.signed = true;
        true
    }

    pub fn auto_fill(&mut self) {
        self.pending = None;
        self.auto_filled = true;
        self.signed = true;
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.pending = None;
        self.auto_filled = false;
        self.signed = false;
    }

    pub fn confirm(&self) -> Result<(), GateError> {
        if self.signed {
            Ok(())
        } else {
            Err(GateError::NotSigned)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(offset: f32) -> ScrollMetrics {
        ScrollMetrics {
            offset,
            content_height: 1000.0,
            viewport_height: 400.0,
        }
    }

    #[test]
    fn confirm_rejected_until_bottom_reached() {
        let mut gate = ReadGate::new(10.0);
        for _ in 0..5 {
            assert_eq!(gate.confirm(), Err(GateError::NotScrolledToBottom));
        }
        assert!(!gate.on_scroll(metrics(100.0)));
        assert!(!gate.on_scroll(metrics(589.0)));
        assert!(gate.on_scroll(metrics(590.0)));
        assert!(gate.confirm().is_ok());
    }

    #[test]
    fn read_gate_stays_satisfied_within_session() {
        let mut gate = ReadGate::new(10.0);
        assert!(gate.on_scroll(metrics(600.0)));
        // scrolling back up does not revoke
        assert!(!gate.on_scroll(metrics(0.0)));
        assert!(gate.confirm().is_ok());
    }

    #[test]
    fn reopening_resets_read_gate() {
        let mut gate = ReadGate::new(10.0);
        gate.on_scroll(metrics(600.0));
        gate.open();
        assert!(!gate.has_scrolled_to_bottom());
        assert_eq!(gate.confirm(), Err(GateError::NotScrolledToBottom));
    }

    #[test]
    fn short_content_counts_as_read_on_first_event() {
        let mut gate = ReadGate::new(10.0);
        let fits = ScrollMetrics {
            offset: 0.0,
            content_height: 300.0,
            viewport_height: 400.0,
        };
        assert!(gate.on_scroll(fits));
    }

    #[test]
    fn stroke_signs_and_clear_resets() {
        let mut gate = SignatureGate::new();
        assert_eq!(gate.confirm(), Err(GateError::NotSigned));
        assert!(!gate.pen_up());

        gate.pen_down(Point::new(1.0, 1.0));
        gate.pen_move(Point::new(5.0, 3.0));
        assert!(!gate.has_signed());
        assert!(gate.pen_up());
        assert!(gate.confirm().is_ok());
        assert_eq!(gate.strokes().len(), 1);

        gate.clear();
        assert!(!gate.has_signed());
        assert!(gate.strokes().is_empty());
    }

    #[test]
    fn auto_fill_signs_and_open_resets() {
        let mut gate = SignatureGate::new();
        gate.auto_fill();
        assert!(gate.confirm().is_ok());
        gate.open();
        assert_eq!(gate.confirm(), Err(GateError::NotSigned));
    }
}
