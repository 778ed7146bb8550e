mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from rwa_lend for tests
pub use rwa_lend::core::{
    Config,
    asset::{AssetDraft, AssetKind, FileRejection, SubmissionError, UploadPolicy, UploadedFile},
    config::{Timings, millis},
    fraction::{FractionCalculator, FractionPlan},
    gate::{GateError, Point, ReadGate, ScrollMetrics, SignatureGate},
    loan::{LoanCalculator, LoanQuote, LoanTerm},
    route::{NavPayload, Route, RouteError, Router},
    sim::Timeline,
};
