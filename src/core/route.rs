use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{catalog::AssetRecord, fraction::FractionPlan, loan::LoanQuote};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    WalletConnect,
    KycVerification,
    AssetTokenization,
    MyAssets,
    LoanSetup { asset_id: String },
    LoanConfirm,
    LoanProcessing,
    LoanSuccess,
    MyLoans,
    Fractionalization { asset_id: String },
    FractionalizationProcessing,
    FractionalizationSuccess,
    NotFound { path: String },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("route path must start with '/': {0:?}")]
    NotAbsolute(String),
    #[error("{route} requires a navigation payload")]
    MissingPayload { route: String },
    #[error("navigation history is empty")]
    NoHistory,
}

impl Route {
    /// Parse an absolute path. Unknown paths become [`Route::NotFound`].
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let Some(rest) = path.strip_prefix('/') else {
            return Err(RouteError::NotAbsolute(path.to_string()));
        };
        let segments: Vec<&str> = rest.trim_end_matches('/').split('/').collect();
        let route = match segments.as_slice() {
            [""] => Route::WalletConnect,
            ["kyc-verification"] => Route::KycVerification,
            ["asset-tokenization"] => Route::AssetTokenization,
            ["my-assets"] => Route::MyAssets,
            ["loan-setup", id] if !id.is_empty() => Route::LoanSetup {
                asset_id: id.to_string(),
            },
            ["loan-confirm"] => Route::LoanConfirm,
            ["loan-processing"] => Route::LoanProcessing,
            ["loan-success"] => Route::LoanSuccess,
            ["my-loans"] => Route::MyLoans,
            ["fractionalization", id] if !id.is_empty() => Route::Fractionalization {
                asset_id: id.to_string(),
            },
            ["fractionalization-processing"] => Route::FractionalizationProcessing,
            ["fractionalization-success"] => Route::FractionalizationSuccess,
            _ => Route::NotFound {
                path: path.to_string(),
            },
        };
        Ok(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::WalletConnect => "/".to_string(),
            Route::KycVerification => "/kyc-verification".to_string(),
            Route::AssetTokenization => "/asset-tokenization".to_string(),
            Route::MyAssets => "/my-assets".to_string(),
            Route::LoanSetup { asset_id } => format!("/loan-setup/{asset_id}"),
            Route::LoanConfirm => "/loan-confirm".to_string(),
            Route::LoanProcessing => "/loan-processing".to_string(),
            Route::LoanSuccess => "/loan-success".to_string(),
            Route::MyLoans => "/my-loans".to_string(),
            Route::Fractionalization { asset_id } => format!("/fractionalization/{asset_id}"),
            Route::FractionalizationProcessing => "/fractionalization-processing".to_string(),
            Route::FractionalizationSuccess => "/fractionalization-success".to_string(),
            Route::NotFound { path } => path.clone(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::WalletConnect => "Connect Wallet",
            Route::KycVerification => "Identity Verification",
            Route::AssetTokenization => "Asset Tokenization",
            Route::MyAssets => "My Assets",
            Route::LoanSetup { .. } => "Loan Setup",
            Route::LoanConfirm => "Confirm Loan",
            Route::LoanProcessing => "Processing Loan",
            Route::LoanSuccess => "Loan Approved",
            Route::MyLoans => "My Loans",
            Route::Fractionalization { .. } => "Fractionalization",
            Route::FractionalizationProcessing => "Fractionalizing",
            Route::FractionalizationSuccess => "Fractionalization Complete",
            Route::NotFound { .. } => "Page Not Found",
        }
    }

    /// The kind of payload the page needs, if any.
    pub fn required_payload(&self) -> Option<PayloadKind> {
        match self {
            Route::LoanConfirm | Route::LoanProcessing | Route::LoanSuccess => {
                Some(PayloadKind::Loan)
            }
            Route::FractionalizationProcessing | Route::FractionalizationSuccess => {
                Some(PayloadKind::Fraction)
            }
            _ => None,
        }
    }

    /// One sample of every page, for listings.
    pub fn table() -> Vec<Route> {
        vec![
            Route::WalletConnect,
            Route::KycVerification,
            Route::AssetTokenization,
            Route::MyAssets,
            Route::LoanSetup {
                asset_id: ":assetId".to_string(),
            },
            Route::LoanConfirm,
            Route::LoanProcessing,
            Route::LoanSuccess,
            Route::MyLoans,
            Route::Fractionalization {
                asset_id: ":assetId".to_string(),
            },
            Route::FractionalizationProcessing,
            Route::FractionalizationSuccess,
        ]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Loan,
    Fraction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPayload {
    pub asset: AssetRecord,
    pub quote: LoanQuote,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FractionPayload {
    pub asset: AssetRecord,
    pub plan: FractionPlan,
}

/// In-memory state handed to the next page. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum NavPayload {
    #[default]
    None,
    Asset(AssetRecord),
    Loan(LoanPayload),
    Fraction(FractionPayload),
}

impl NavPayload {
    fn satisfies(&self, kind: PayloadKind) -> bool {
        matches!(
            (kind, self),
            (PayloadKind::Loan, NavPayload::Loan(_))
                | (PayloadKind::Fraction, NavPayload::Fraction(_))
        )
    }
}

/// A resolved page and the payload it was opened with.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub route: Route,
    pub payload: NavPayload,
}

impl Navigation {
    pub fn new(route: Route, payload: NavPayload) -> Self {
        Self { route, payload }
    }

    /// Check the payload against the route's requirement.
    pub fn check(&self) -> Result<(), RouteError> {
        match self.route.required_payload() {
            Some(kind) if !self.payload.satisfies(kind) => Err(RouteError::MissingPayload {
                route: self.route.path(),
            }),
            _ => Ok(()),
        }
    }
}

/// Current page plus the back stack.
#[derive(Debug, Clone)]
pub struct Router {
    current: Navigation,
    history: Vec<Navigation>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            current: Navigation::new(Route::WalletConnect, NavPayload::None),
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &Navigation {
        &self.current
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Pages missing their payload land on the asset list instead.
    pub fn resolve(route: Route, payload: NavPayload) -> Navigation {
        let navigation = Navigation::new(route, payload);
        match navigation.check() {
            Ok(()) => navigation,
            Err(err) => {
                tracing::warn!(%err, "redirecting to /my-assets");
                Navigation::new(Route::MyAssets, NavPayload::None)
            }
        }
    }

    pub fn push(&mut self, route: Route, payload: NavPayload) -> &Navigation {
        let next = Self::resolve(route, payload);
        tracing::debug!(from = %self.current.route, to = %next.route, "navigate");
        let previous = std::mem::replace(&mut self.current, next);
        self.history.push(previous);
        &self.current
    }

    pub fn back(&mut self) -> Result<&Navigation, RouteError> {
        let previous = self.history.pop().ok_or(RouteError::NoHistory)?;
        tracing::debug!(from = %self.current.route, to = %previous.route, "navigate back");
        self.current = previous;
        Ok(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_parameterised_routes() {
        assert_eq!(
            Route::parse("/loan-setup/nft-002"),
            Ok(Route::LoanSetup {
                asset_id: "nft-002".into()
            })
        );
        assert_eq!(
            Route::parse("/loan-setup/"),
            Ok(Route::NotFound {
                path: "/loan-setup/".into()
            })
        );
        assert!(matches!(Route::parse("my-assets"), Err(RouteError::NotAbsolute(_))));
    }

    #[test]
    fn unknown_paths_are_not_found() {
        let route: Route = "/nowhere".parse().unwrap();
        assert_eq!(route.path(), "/nowhere");
        assert_eq!(route.title(), "Page Not Found");
    }

    #[test]
    fn missing_payload_redirects_to_assets() {
        let nav = Router::resolve(Route::LoanConfirm, NavPayload::None);
        assert_eq!(nav.route, Route::MyAssets);
        let nav = Router::resolve(Route::MyLoans, NavPayload::None);
        assert_eq!(nav.route, Route::MyLoans);
    }

    #[test]
    fn back_pops_history() {
        let mut router = Router::new();
        assert_eq!(router.back().err(), Some(RouteError::NoHistory));
        router.push(Route::KycVerification, NavPayload::None);
        router.push(Route::AssetTokenization, NavPayload::None);
        assert_eq!(router.depth(), 2);
        assert_eq!(router.back().map(|n| n.route.clone()), Ok(Route::KycVerification));
    }
}
