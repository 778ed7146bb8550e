use std::{fmt, path::Path, str::FromStr};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::core::config::UploadConfig;

pub const TOKENIZATION_STEPS: &[&str] = &[
    "Submit Asset",
    "Valuation",
    "Custody",
    "NFT Preview",
    "Minted",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetKind {
    RealEstate,
    Art,
    Jewelry,
    Vehicle,
    Other,
}

impl AssetKind {
    pub const ALL: [AssetKind; 5] = [
        AssetKind::RealEstate,
        AssetKind::Art,
        AssetKind::Jewelry,
        AssetKind::Vehicle,
        AssetKind::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AssetKind::RealEstate => "Real Estate",
            AssetKind::Art => "Art",
            AssetKind::Jewelry => "Jewelry",
            AssetKind::Vehicle => "Vehicle",
            AssetKind::Other => "Other Asset",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            AssetKind::RealEstate => "real-estate",
            AssetKind::Art => "art",
            AssetKind::Jewelry => "jewelry",
            AssetKind::Vehicle => "vehicle",
            AssetKind::Other => "other",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown asset kind {0:?}")]
pub struct UnknownAssetKind(String);

impl FromStr for AssetKind {
    type Err = UnknownAssetKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        AssetKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == normalized)
            .ok_or_else(|| UnknownAssetKind(s.to_string()))
    }
}

/// Metadata of a document attached to an asset. The content is never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    pub mime: String,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, size: u64, mime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime: mime.into(),
        }
    }

    /// Describe a file on disk, deriving its MIME type from the extension.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let metadata = std::fs::metadata(path)
            .with_context(|| format!("Failed to read file metadata {:?}", path))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime = mime_from_extension(path).unwrap_or("application/octet-stream");
        Ok(Self::new(name, metadata.len(), mime))
    }
}

pub fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "pdf" => Some("application/pdf"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "txt" => Some("text/plain"),
        _ => None,
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FileRejection {
    #[error("{name} is {size} bytes, above the {max} byte limit")]
    TooLarge { name: String, size: u64, max: u64 },
    #[error("{name} has unsupported type {mime}")]
    UnsupportedType { name: String, mime: String },
}

/// Size and type restrictions on uploaded documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    max_bytes: u64,
    allowed_mime: Vec<String>,
}

impl UploadPolicy {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            max_bytes: config.max_file_bytes,
            allowed_mime: config.allowed_mime.clone(),
        }
    }

    pub fn check(&self, file: &UploadedFile) -> Result<(), FileRejection> {
        if file.size > self.max_bytes {
            return Err(FileRejection::TooLarge {
                name: file.name.clone(),
                size: file.size,
                max: self.max_bytes,
            });
        }
        if !self.allowed_mime.iter().any(|m| m == &file.mime) {
            return Err(FileRejection::UnsupportedType {
                name: file.name.clone(),
                mime: file.mime.clone(),
            });
        }
        Ok(())
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(&UploadConfig::default())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Please select an asset type")]
    MissingKind,
    #[error("Please enter the asset name")]
    MissingName,
    #[error("Please describe the asset")]
    MissingDescription,
    #[error("Please upload at least one supporting document")]
    MissingDocuments,
    #[error("Files must be under 10MB and in JPG, PNG or PDF format")]
    InvalidDocument(#[source] FileRejection),
}

/// Outcome of adding a batch of files to a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileIntake {
    pub accepted: usize,
    pub rejected: Vec<FileRejection>,
}

impl FileIntake {
    pub fn has_rejections(&self) -> bool {
        !self.rejected.is_empty()
    }
}

/// An asset being described by the user before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDraft {
    pub id: Uuid,
    pub kind: Option<AssetKind>,
    pub name: String,
    pub description: String,
    pub files: Vec<UploadedFile>,
}

impl Default for AssetDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetDraft {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: None,
            name: String::new(),
            description: String::new(),
            files: Vec::new(),
        }
    }

    pub fn with_kind(kind: AssetKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::new()
        }
    }

    pub fn select_kind(&mut self, kind: AssetKind) {
        self.kind = Some(kind);
    }

    /// Keep the files that pass `policy`; report the rest.
    pub fn add_files(
        &mut self,
        files: impl IntoIterator<Item = UploadedFile>,
        policy: &UploadPolicy,
    ) -> FileIntake {
        let mut intake = FileIntake::default();
        for file in files {
            match policy.check(&file) {
                Ok(()) => {
                    self.files.push(file);
                    intake.accepted += 1;
                }
                Err(rejection) => {
                    tracing::warn!(%rejection, "document rejected");
                    intake.rejected.push(rejection);
                }
            }
        }
        intake
    }

    pub fn remove_file(&mut self, index: usize) -> Option<UploadedFile> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    pub fn validate(&self, policy: &UploadPolicy) -> Result<AssetKind, SubmissionError> {
        let kind = self.kind.ok_or(SubmissionError::MissingKind)?;
        if self.name.trim().is_empty() {
            return Err(SubmissionError::MissingName);
        }
        if self.description.trim().is_empty() {
            return Err(SubmissionError::MissingDescription);
        }
        if self.files.is_empty() {
            return Err(SubmissionError::MissingDocuments);
        }
        for file in &self.files {
            policy.check(file).map_err(SubmissionError::InvalidDocument)?;
        }
        Ok(kind)
    }
}

/// Progress of a submitted asset through platform review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    Completed,
    InProgress,
    Pending,
}

impl ReviewState {
    pub fn label(self) -> &'static str {
        match self {
            ReviewState::Completed => "Completed",
            ReviewState::InProgress => "In progress",
            ReviewState::Pending => "Pending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewStage {
    pub name: &'static str,
    pub description: &'static str,
    pub state: ReviewState,
    pub estimated_value: Option<u64>,
}

/// Review timeline shown after submission; the valuation is the step awaiting the user.
pub fn review_stages(estimated_value: u64) -> Vec<ReviewStage> {
    vec![
        ReviewStage {
            name: "Asset submitted",
            description: "Asset details received",
            state: ReviewState::Completed,
            estimated_value: None,
        },
        ReviewStage {
            name: "Preliminary review",
            description: "The platform approved the preliminary review",
            state: ReviewState::Completed,
            estimated_value: None,
        },
        ReviewStage {
            name: "Professional valuation",
            description: "Appraisers are valuing the asset",
            state: ReviewState::InProgress,
            estimated_value: Some(estimated_value),
        },
        ReviewStage {
            name: "Contract signing",
            description: "Starts once the valuation is accepted",
            state: ReviewState::Pending,
            estimated_value: None,
        },
        ReviewStage {
            name: "NFT minting",
            description: "Starts once the contract is signed",
            state: ReviewState::Pending,
            estimated_value: None,
        },
    ]
}
