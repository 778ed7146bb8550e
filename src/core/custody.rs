use serde::{Deserialize, Serialize};

use crate::core::{
    asset::AssetKind,
    config::{Timings, millis},
    sim::Timeline,
    stepper::StepStatus,
};

/// How the asset is secured. Real estate is encumbered by a registered
/// mortgage; everything else is handed over to the vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustodyKind {
    RealEstate,
    Valuables,
}

impl From<AssetKind> for CustodyKind {
    fn from(kind: AssetKind) -> Self {
        match kind {
            AssetKind::RealEstate => CustodyKind::RealEstate,
            _ => CustodyKind::Valuables,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CustodyMethod {
    Pickup,
    Delivery,
}

impl CustodyMethod {
    pub const ALL: [CustodyMethod; 2] = [CustodyMethod::Pickup, CustodyMethod::Delivery];

    pub fn label(self) -> &'static str {
        match self {
            CustodyMethod::Pickup => "Schedule a pickup",
            CustodyMethod::Delivery => "Deliver to the custody center",
        }
    }

    pub fn confirmation(self) -> &'static str {
        match self {
            CustodyMethod::Pickup => "Pickup scheduled",
            CustodyMethod::Delivery => "Delivery appointment confirmed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackingStatus {
    Pending,
    InTransit,
    Inspecting,
    Completed,
}

impl TrackingStatus {
    pub const ALL: [TrackingStatus; 4] = [
        TrackingStatus::Pending,
        TrackingStatus::InTransit,
        TrackingStatus::Inspecting,
        TrackingStatus::Completed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TrackingStatus::Pending => "Processing",
            TrackingStatus::InTransit => "In transit",
            TrackingStatus::Inspecting => "Inspecting",
            TrackingStatus::Completed => "Completed",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustodyStage {
    Intro,
    MethodSelection,
    Tracking,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustodyEvent {
    Status(TrackingStatus),
    Finished,
}

/// Tracking events at their configured offsets.
pub fn tracking_timeline(timings: &Timings) -> Timeline<CustodyEvent> {
    Timeline::new()
        .at(
            millis(timings.custody_in_transit_ms),
            CustodyEvent::Status(TrackingStatus::InTransit),
        )
        .at(
            millis(timings.custody_inspecting_ms),
            CustodyEvent::Status(TrackingStatus::Inspecting),
        )
        .at(
            millis(timings.custody_completed_ms),
            CustodyEvent::Status(TrackingStatus::Completed),
        )
        .at(millis(timings.custody_finish_ms), CustodyEvent::Finished)
}

/// The custody step of the tokenization flow. Tracking cannot be cancelled
/// by the user once started.
#[derive(Debug, Clone, PartialEq)]
pub struct CustodyProcess {
    kind: CustodyKind,
    stage: CustodyStage,
    method: Option<CustodyMethod>,
    status: TrackingStatus,
    timings: Timings,
}

impl CustodyProcess {
    pub fn new(kind: CustodyKind, timings: &Timings) -> Self {
        Self {
            kind,
            stage: CustodyStage::Intro,
            method: None,
            status: TrackingStatus::Pending,
            timings: timings.clone(),
        }
    }

    pub fn kind(&self) -> CustodyKind {
        self.kind
    }

    pub fn stage(&self) -> CustodyStage {
        self.stage
    }

    pub fn method(&self) -> Option<CustodyMethod> {
        self.method
    }

    pub fn status(&self) -> TrackingStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.stage == CustodyStage::Complete
    }

    /// Leave the intro. Real estate goes straight to tracking and returns the
    /// tracking timeline; valuables first ask for a hand-over method.
    pub fn start(&mut self) -> Option<Timeline<CustodyEvent>> {
        if self.stage != CustodyStage::Intro {
            return None;
        }
        match self.kind {
            CustodyKind::RealEstate => Some(self.begin_tracking()),
            CustodyKind::Valuables => {
                self.stage = CustodyStage::MethodSelection;
                None
            }
        }
    }

    pub fn select_method(&mut self, method: CustodyMethod) -> Option<Timeline<CustodyEvent>> {
        if self.stage != CustodyStage::MethodSelection {
            return None;
        }
        self.method = Some(method);
        tracing::debug!(?method, "custody method selected");
        Some(self.begin_tracking())
    }

    fn begin_tracking(&mut self) -> Timeline<CustodyEvent> {
        self.stage = CustodyStage::Tracking;
        self.status = TrackingStatus::Pending;
        tracking_timeline(&self.timings)
    }

    pub fn apply(&mut self, event: CustodyEvent) {
        if self.stage != CustodyStage::Tracking {
            return;
        }
        match event {
            CustodyEvent::Status(status) => self.status = self.status.max(status),
            CustodyEvent::Finished => {
                self.stage = CustodyStage::Complete;
                tracing::info!("custody completed");
            }
        }
    }

    /// Status of tracking row `index` in [`TrackingStatus::ALL`].
    pub fn step_status(&self, index: usize) -> StepStatus {
        let current = self.status.index();
        if index < current || self.is_complete() {
            StepStatus::Completed
        } else if index == current {
            StepStatus::Active
        } else {
            StepStatus::Upcoming
        }
    }
}
