//! Integration tests for routing and navigation payloads.
//!
//! Tests cover:
//! - Every known route parses back from its own path
//! - Payload-only pages redirect to /my-assets when opened bare
//! - Payloads travel with the navigation and come back with history

mod common;

use rwa_lend::core::{
    catalog::{default_loan_asset, find_asset},
    route::{LoanPayload, Navigation, PayloadKind},
};

use common::*;

#[test]
fn test_routes_parse_their_own_paths() {
    for route in Route::table() {
        let path = route.path();
        assert_eq!(Route::parse(&path), Ok(route.clone()), "path {path}");
        assert_eq!(route.to_string(), path);
    }
    assert_eq!(Route::parse("/"), Ok(Route::WalletConnect));
    assert_eq!(Route::parse("/my-loans/"), Ok(Route::MyLoans));
}

#[test]
fn test_unknown_and_relative_paths() {
    assert_eq!(
        Route::parse("/loan-setup/a/b"),
        Ok(Route::NotFound {
            path: "/loan-setup/a/b".to_string()
        })
    );
    assert!(matches!(
        "kyc-verification".parse::<Route>(),
        Err(RouteError::NotAbsolute(_))
    ));
}

#[test]
fn test_payload_requirements() {
    assert_eq!(Route::LoanSuccess.required_payload(), Some(PayloadKind::Loan));
    assert_eq!(
        Route::FractionalizationSuccess.required_payload(),
        Some(PayloadKind::Fraction)
    );
    assert_eq!(Route::MyAssets.required_payload(), None);

    // a fraction payload does not satisfy a loan page
    let nav = Navigation::new(
        Route::LoanProcessing,
        NavPayload::Asset(default_loan_asset()),
    );
    assert!(matches!(nav.check(), Err(RouteError::MissingPayload { .. })));
}

#[test]
fn test_bare_payload_pages_redirect_to_assets() {
    let mut router = Router::new();
    for route in [
        Route::LoanConfirm,
        Route::LoanProcessing,
        Route::LoanSuccess,
        Route::FractionalizationProcessing,
        Route::FractionalizationSuccess,
    ] {
        let nav = router.push(route, NavPayload::None);
        assert_eq!(nav.route, Route::MyAssets);
        assert_eq!(nav.payload, NavPayload::None);
    }
}

#[test]
fn test_loan_payload_survives_navigation() -> anyhow::Result<()> {
    // 1. Quote a loan on the watch
    let asset = find_asset("nft-002").expect("catalog asset");
    let calculator = LoanCalculator::new(asset.valuation, &Config::default().lending)?;
    let quote = calculator.default_quote();
    let payload = NavPayload::Loan(LoanPayload {
        asset: asset.clone(),
        quote,
    });

    // 2. Walk setup -> confirm -> processing
    let mut router = Router::new();
    router.push(Route::MyAssets, NavPayload::None);
    router.push(
        Route::LoanSetup {
            asset_id: asset.id.clone(),
        },
        NavPayload::Asset(asset.clone()),
    );
    router.push(Route::LoanConfirm, payload.clone());
    let current = router.push(Route::LoanProcessing, payload.clone());
    assert_eq!(current.route, Route::LoanProcessing);
    assert_eq!(current.payload, payload);

    // 3. Going back restores the confirm page with its payload
    let previous = router.back()?;
    assert_eq!(previous.route, Route::LoanConfirm);
    assert_eq!(previous.payload, payload);
    assert_eq!(router.depth(), 3);

    Ok(())
}
