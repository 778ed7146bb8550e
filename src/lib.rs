pub mod core;

pub use core::{
    Config, Notice, NoticeLevel, StepStatus, Stepper,
    asset::{AssetDraft, AssetKind, SubmissionError, UploadPolicy, UploadedFile},
    fraction::{FractionCalculator, FractionPlan},
    gate::{GateError, ReadGate, ScrollMetrics, SignatureGate},
    loan::{LoanCalculator, LoanQuote, LoanTerm},
    route::{NavPayload, Route, Router},
    sim::{SimulatedRun, Timeline},
};

#[cfg(feature = "gui")]
pub mod gui;
