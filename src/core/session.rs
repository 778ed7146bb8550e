use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{
    config::{Timings, millis},
    kyc::KycStatus,
    sim::Timeline,
};

/// Address shown for every mock wallet.
pub const MOCK_ADDRESS: &str = "0x0062a6b7C4dF2f3a9E1B5d8c7A4e9F0b1C2dC466";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WalletKind {
    MetaMask,
    WalletConnect,
    Coinbase,
}

impl WalletKind {
    pub const ALL: [WalletKind; 3] = [
        WalletKind::MetaMask,
        WalletKind::WalletConnect,
        WalletKind::Coinbase,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WalletKind::MetaMask => "MetaMask",
            WalletKind::WalletConnect => "WalletConnect",
            WalletKind::Coinbase => "Coinbase Wallet",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WalletKind::MetaMask => "The most popular Ethereum wallet",
            WalletKind::WalletConnect => "Connect one of many mobile wallets",
            WalletKind::Coinbase => "The official Coinbase wallet",
        }
    }
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedWallet {
    pub kind: WalletKind,
    pub address: String,
}

impl ConnectedWallet {
    pub fn short_address(&self) -> String {
        shorten_address(&self.address)
    }
}

/// `0x0062...C466` style: first six and last four characters.
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            username: "zoeshih".to_string(),
        }
    }
}

/// Everything known about the user for the lifetime of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub wallet: Option<ConnectedWallet>,
    pub kyc: KycStatus,
    pub profile: Profile,
}

impl Session {
    pub fn is_connected(&self) -> bool {
        self.wallet.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletEvent {
    Connected,
    Redirect,
}

pub fn connect_timeline(timings: &Timings) -> Timeline<WalletEvent> {
    Timeline::new()
        .at(millis(timings.wallet_connect_ms), WalletEvent::Connected)
        .at(
            millis(timings.wallet_connect_ms + timings.wallet_redirect_ms),
            WalletEvent::Redirect,
        )
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WalletConnection {
    #[default]
    Idle,
    Connecting(WalletKind),
    Connected(WalletKind),
}

impl WalletConnection {
    pub fn is_busy(&self) -> bool {
        !matches!(self, WalletConnection::Idle)
    }

    pub fn connecting(&self) -> Option<WalletKind> {
        match self {
            WalletConnection::Connecting(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Start connecting. Clicks are ignored while a connection is in flight.
    pub fn begin(&mut self, kind: WalletKind, timings: &Timings) -> Option<Timeline<WalletEvent>> {
        if self.is_busy() {
            return None;
        }
        *self = WalletConnection::Connecting(kind);
        tracing::debug!(wallet = kind.name(), "connecting wallet");
        Some(connect_timeline(timings))
    }

    pub fn complete(&mut self) -> Option<ConnectedWallet> {
        let WalletConnection::Connecting(kind) = *self else {
            return None;
        };
        *self = WalletConnection::Connected(kind);
        tracing::info!(wallet = kind.name(), "wallet connected");
        Some(ConnectedWallet {
            kind,
            address: MOCK_ADDRESS.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortens_long_addresses() {
        assert_eq!(shorten_address(MOCK_ADDRESS), "0x0062...C466");
        assert_eq!(shorten_address("0x1234"), "0x1234");
    }

    #[test]
    fn clicks_ignored_while_connecting() {
        let timings = Timings::default();
        let mut connection = WalletConnection::default();
        assert!(connection.begin(WalletKind::MetaMask, &timings).is_some());
        assert!(connection.begin(WalletKind::Coinbase, &timings).is_none());
        assert_eq!(connection.connecting(), Some(WalletKind::MetaMask));

        let wallet = connection.complete().unwrap();
        assert_eq!(wallet.kind, WalletKind::MetaMask);
        assert!(connection.complete().is_none());
    }

    #[test]
    fn redirect_follows_connection() {
        let timeline = connect_timeline(&Timings::default());
        assert_eq!(timeline.duration(), millis(3000));
    }
}
