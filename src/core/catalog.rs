//! Fixed sample data: the user's tokenized assets, their loans and the
//! NFT minted at the end of the tokenization flow.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, macros::date};

use crate::core::{asset::AssetKind, fraction::FractionPlan};

/// Appraised value quoted on the valuation screen.
pub const VALUATION_ESTIMATE: u64 = 6_400_000;

/// LTV quoted on the minting success screen.
pub const MINTED_LTV: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub id: String,
    pub name: String,
    pub kind: AssetKind,
    pub valuation: u64,
    pub token_id: String,
    /// Set once the asset has been split into fNFTs.
    pub fragment_count: Option<u64>,
}

impl AssetRecord {
    fn new(id: &str, name: &str, kind: AssetKind, valuation: u64, token_id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            valuation,
            token_id: token_id.to_string(),
            fragment_count: None,
        }
    }

    pub fn fractionalized(mut self, plan: &FractionPlan) -> Self {
        self.fragment_count = Some(plan.fragment_count);
        self
    }
}

pub fn my_assets() -> Vec<AssetRecord> {
    vec![
        AssetRecord::new(
            "nft-001",
            "Taipei Zhongzheng luxury residence",
            AssetKind::RealEstate,
            15_000_000,
            "0x1234...5678",
        ),
        AssetRecord::new(
            "nft-002",
            "Rolex limited edition watch",
            AssetKind::Jewelry,
            800_000,
            "0x8765...4321",
        ),
        AssetRecord::new(
            "nft-003",
            "Porsche 911 GT3",
            AssetKind::Vehicle,
            6_500_000,
            "0xabcd...efgh",
        ),
    ]
}

pub fn find_asset(id: &str) -> Option<AssetRecord> {
    my_assets().into_iter().find(|asset| asset.id == id)
}

/// Asset used by the loan setup screen when the id is unknown.
pub fn default_loan_asset() -> AssetRecord {
    AssetRecord::new(
        "nft-001",
        "Taipei Zhongzheng luxury residence",
        AssetKind::RealEstate,
        15_000_000,
        "0x1234...5678",
    )
}

/// Asset used by the fractionalization screen when the id is unknown.
pub fn default_fraction_asset(id: &str) -> AssetRecord {
    AssetRecord::new(
        id,
        "Taipei Xinyi luxury residence",
        AssetKind::RealEstate,
        VALUATION_ESTIMATE,
        "#RWA-2025-001",
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoanStatus {
    Active,
    Repaid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub id: String,
    pub asset: AssetRecord,
    pub principal: u64,
    pub received: u64,
    pub interest: u64,
    pub start: Date,
    pub due: Date,
    pub term_days: u32,
    pub status: LoanStatus,
}

impl LoanRecord {
    /// Whole days until the due date, rounding partial days up.
    pub fn days_remaining(&self, now: OffsetDateTime) -> i64 {
        let due = self.due.midnight().assume_utc();
        let seconds = (due - now).whole_seconds();
        let day = 86_400;
        seconds.div_euclid(day) + i64::from(seconds.rem_euclid(day) != 0)
    }

    /// Share of the term elapsed, in percent, clamped to `[0, 100]`.
    pub fn progress(&self, now: OffsetDateTime) -> f64 {
        let start = self.start.midnight().assume_utc();
        let due = self.due.midnight().assume_utc();
        let total = (due - start).as_seconds_f64();
        if total <= 0.0 {
            return 100.0;
        }
        let elapsed = (now - start).as_seconds_f64();
        (elapsed / total * 100.0).clamp(0.0, 100.0)
    }

    pub fn is_urgent(&self, now: OffsetDateTime) -> bool {
        self.days_remaining(now) <= 30
    }
}

pub fn my_loans() -> Vec<LoanRecord> {
    vec![LoanRecord {
        id: "loan-001".to_string(),
        asset: default_loan_asset(),
        principal: 5_000_000,
        received: 4_750_000,
        interest: 250_000,
        start: date!(2025 - 10 - 28),
        due: date!(2026 - 04 - 26),
        term_days: 180,
        status: LoanStatus::Active,
    }]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NftPreview {
    pub token_id: &'static str,
    pub name: &'static str,
    pub kind: AssetKind,
    pub estimated_value: u64,
    pub location: &'static str,
    pub size: &'static str,
    pub completion: &'static str,
    pub contract_hash: &'static str,
}

pub fn nft_preview() -> NftPreview {
    NftPreview {
        token_id: "#RWA-2025-001",
        name: "Taipei Xinyi luxury residence",
        kind: AssetKind::RealEstate,
        estimated_value: VALUATION_ESTIMATE,
        location: "No. 200, Sec. 1, Keelung Rd., Xinyi Dist., Taipei",
        size: "120 ping",
        completion: "May 2020",
        contract_hash: "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb",
    }
}

pub struct ContractSection {
    pub title: &'static str,
    pub body: &'static str,
}

/// Clauses of the tokenization agreement shown in the contract dialogs.
pub const CONTRACT_SECTIONS: &[ContractSection] = &[
    ContractSection {
        title: "Article 1: Purpose",
        body: "This agreement governs the tokenization of the physical asset (the \"Asset\"). \
               The Asset is minted as a non-fungible token so that its ownership is recorded \
               digitally and can be traced.",
    },
    ContractSection {
        title: "Article 2: Description and Valuation",
        body: "The owner has provided the Asset details, valuation report and supporting \
               documents, which the platform has reviewed. The valuation is issued by an \
               independent appraiser for reference only and is not investment advice.",
    },
    ContractSection {
        title: "Article 3: NFT Minting and Ownership",
        body: "Once both parties confirm, the platform mints an ERC-721 NFT for the Asset. \
               The NFT belongs to the owner, who may transfer, sell or pledge it.",
    },
    ContractSection {
        title: "Article 4: Platform Fees",
        body: "The owner pays a review fee depending on the asset type, a minting fee \
               covering contract deployment and transaction costs, and a yearly maintenance fee.",
    },
    ContractSection {
        title: "Article 5: Data Protection",
        body: "The platform protects the owner's personal data and asset information and \
               discloses it only where the law requires or the owner consents. Public on-chain \
               data follows the principle of minimal disclosure.",
    },
    ContractSection {
        title: "Article 6: Disclaimer",
        body: "The platform is not liable for network outages or force majeure, for changes \
               in the market value of the Asset, for losses caused by lost or leaked private \
               keys, or for failures of third-party services.",
    },
    ContractSection {
        title: "Article 7: Dispute Resolution",
        body: "Disputes are first settled by negotiation in good faith. Failing that, the \
               Taipei District Court has jurisdiction in the first instance.",
    },
    ContractSection {
        title: "Article 8: Validity",
        body: "This agreement takes effect once digitally signed by both parties and has the \
               same force as a paper contract. Amendments require written consent of both parties.",
    },
    ContractSection {
        title: "Article 9: Confidentiality",
        body: "Both parties keep confidential any business or technical information learned \
               while performing this agreement. The obligation survives termination.",
    },
    ContractSection {
        title: "Article 10: Intellectual Property",
        body: "Intellectual property in the Asset stays with the owner and is unaffected by \
               minting. The platform retains all rights in its technology and software.",
    },
    ContractSection {
        title: "Article 11: Termination",
        body: "This agreement ends by mutual written consent, after a material breach left \
               uncured, if the Asset is destroyed or no longer eligible for tokenization, or \
               by order of law or a regulator.",
    },
];
