//! Integration tests for the simulated operations, run on a paused tokio clock.
//!
//! Tests cover:
//! - Timelines deliver events in order, at their offsets
//! - Cancelled or dropped runs deliver nothing further
//! - Custody, loan processing and fractionalization finish on schedule

mod common;

use std::{pin::pin, sync::Arc, time::Duration};

use futures::StreamExt;
use rwa_lend::core::{
    custody::{
        CustodyEvent, CustodyKind, CustodyMethod, CustodyProcess, CustodyStage, TrackingStatus,
    },
    kyc::{IdType, KycEvent, KycFlow, KycStatus},
    processing::{ProcessingEvent, ProcessingPlan, ProcessingState},
    session::{WalletConnection, WalletEvent, WalletKind},
};
use tokio::time::Instant;

use common::*;

#[tokio::test(start_paused = true)]
async fn test_stream_delivers_events_at_their_offsets() {
    let timeline = Timeline::new()
        .at(millis(300), "second")
        .at(millis(100), "first");
    let start = Instant::now();
    let mut stream = pin!(timeline.into_stream());

    assert_eq!(stream.next().await, Some("first"));
    assert_eq!(start.elapsed(), millis(100));
    assert_eq!(stream.next().await, Some("second"));
    assert_eq!(start.elapsed(), millis(300));
    assert_eq!(stream.next().await, None);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_run_goes_quiet() {
    let mut run = Timeline::new()
        .at(millis(100), 1)
        .at(millis(200), 2)
        .at(millis(300), 3)
        .spawn();

    assert_eq!(run.next().await, Some(1));
    run.cancel();
    assert_eq!(run.next().await, None);

    tokio::time::sleep(millis(1_000)).await;
    assert!(run.is_finished());
}

#[tokio::test(start_paused = true)]
async fn test_dropped_run_releases_pending_events() {
    // 1. Events hold a shared token; pending ones live inside the playback task
    let token = Arc::new(());
    let mut run = Timeline::new()
        .at(millis(100), Arc::clone(&token))
        .at(millis(10_000), Arc::clone(&token))
        .spawn();
    assert!(run.next().await.is_some());
    assert_eq!(Arc::strong_count(&token), 2);

    // 2. Dropping the run aborts the task long before the second event is due
    drop(run);
    tokio::time::sleep(millis(10)).await;
    assert_eq!(Arc::strong_count(&token), 1);
}

#[tokio::test(start_paused = true)]
async fn test_wallet_connects_then_redirects() {
    let timings = Timings::default();
    let mut connection = WalletConnection::default();
    let timeline = connection
        .begin(WalletKind::MetaMask, &timings)
        .expect("idle connection");

    // a second click while connecting is ignored
    assert!(connection.begin(WalletKind::Coinbase, &timings).is_none());

    let start = Instant::now();
    let mut run = timeline.spawn();
    assert_eq!(run.next().await, Some(WalletEvent::Connected));
    assert_eq!(start.elapsed(), millis(2_000));
    let wallet = connection.complete().expect("connecting");
    assert_eq!(wallet.kind, WalletKind::MetaMask);
    assert_eq!(wallet.short_address(), "0x0062...C466");

    assert_eq!(run.next().await, Some(WalletEvent::Redirect));
    assert_eq!(start.elapsed(), millis(3_000));
}

#[tokio::test(start_paused = true)]
async fn test_kyc_review_then_redirect() -> anyhow::Result<()> {
    // 1. Fill both pages
    let mut flow = KycFlow::new(&Timings::default());
    flow.form.full_name = "Zoe Shih".to_string();
    flow.form.id_type = Some(IdType::Passport);
    flow.form.id_number = "A123456789".to_string();
    flow.form.birth_date = "1995-03-14".to_string();
    flow.next_from_basic_info()?;
    flow.form.id_document = Some(photo_png(1024));
    flow.form.selfie = Some(photo_png(2048));

    // 2. Submit and play the review
    let start = Instant::now();
    let mut run = flow.submit()?.spawn();
    assert!(flow.is_submitting());
    assert!(flow.submit().is_err());

    assert_eq!(run.next().await, Some(KycEvent::Reviewed));
    assert!(!flow.apply(KycEvent::Reviewed));
    assert_eq!(flow.status(), KycStatus::Submitted);
    assert_eq!(flow.stepper().current(), 2);

    assert_eq!(run.next().await, Some(KycEvent::Redirect));
    assert!(flow.apply(KycEvent::Redirect));
    assert_eq!(start.elapsed(), millis(3_500));

    Ok(())
}

/// Play a custody timeline to the end, returning when the stage became `Complete`.
async fn track(process: &mut CustodyProcess, timeline: Timeline<CustodyEvent>) -> Duration {
    let start = Instant::now();
    let mut run = timeline.spawn();
    while let Some(event) = run.next().await {
        process.apply(event);
        if start.elapsed() < millis(6_500) {
            assert_eq!(process.stage(), CustodyStage::Tracking);
        }
    }
    start.elapsed()
}

#[tokio::test(start_paused = true)]
async fn test_real_estate_custody_completes_after_6500ms() {
    let timings = Timings::default();
    let mut process = CustodyProcess::new(CustodyKind::RealEstate, &timings);
    let timeline = process.start().expect("real estate skips method selection");
    assert_eq!(process.stage(), CustodyStage::Tracking);

    let elapsed = track(&mut process, timeline).await;
    assert_eq!(elapsed, millis(6_500));
    assert_eq!(process.stage(), CustodyStage::Complete);
    assert_eq!(process.status(), TrackingStatus::Completed);
}

#[tokio::test(start_paused = true)]
async fn test_valuables_pick_a_method_first() {
    let timings = Timings::default();
    let mut process = CustodyProcess::new(CustodyKind::from(AssetKind::Jewelry), &timings);
    assert!(process.start().is_none());
    assert_eq!(process.stage(), CustodyStage::MethodSelection);

    let timeline = process
        .select_method(CustodyMethod::Delivery)
        .expect("method selection");
    let elapsed = track(&mut process, timeline).await;
    assert_eq!(elapsed, millis(6_500));
    assert!(process.is_complete());
    assert_eq!(process.method(), Some(CustodyMethod::Delivery));
}

#[tokio::test(start_paused = true)]
async fn test_loan_processing_schedule() {
    let plan = ProcessingPlan::loan(&Timings::default());
    let mut state = ProcessingState::new(&plan);
    let start = Instant::now();
    let mut run = plan.timeline().spawn();

    let mut ticks = 0;
    while let Some(event) = run.next().await {
        if let ProcessingEvent::Progress(_) = event {
            ticks += 1;
        }
        if state.apply(event) {
            break;
        }
    }

    // 1. Four steps, one every 1500 ms; the bar fills in 120 ticks of 50 ms
    assert_eq!(ticks, 120);
    assert!(state.stepper().is_terminal());
    assert_eq!(state.progress(), 100.0);

    // 2. The redirect follows 1000 ms after the bar is full
    assert_eq!(start.elapsed(), millis(7_000));
}

#[tokio::test(start_paused = true)]
async fn test_fraction_processing_schedule() {
    let plan = ProcessingPlan::fraction(&Timings::default());
    let mut state = ProcessingState::new(&plan);
    let start = Instant::now();
    let mut events = pin!(plan.timeline().into_stream());

    let mut last_progress = 0.0;
    while let Some(event) = events.next().await {
        if let ProcessingEvent::Progress(value) = event {
            assert!(value >= last_progress);
            last_progress = value;
        }
        if state.apply(event) {
            break;
        }
    }

    assert_eq!(last_progress, 100.0);
    assert_eq!(start.elapsed(), millis(80 * 101 + 500));
    assert!(state.is_finished());
}

#[tokio::test(start_paused = true)]
async fn test_accelerated_config_shortens_the_journey() {
    let config = fast_config(10);
    let plan = ProcessingPlan::loan(&config.timings);
    let start = Instant::now();
    let mut run = plan.timeline().spawn();
    let mut finished = false;
    while let Some(event) = run.next().await {
        finished = matches!(event, ProcessingEvent::Finished);
    }
    assert!(finished);
    assert_eq!(start.elapsed(), millis(700));
}
