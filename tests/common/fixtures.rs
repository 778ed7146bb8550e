use rwa_lend::core::{
    asset::{AssetDraft, AssetKind, UploadedFile},
    config::{Config, MIB},
    gate::ScrollMetrics,
};
use tempfile::NamedTempFile;

/// Height of the contract text used by the gate tests.
pub const CONTENT_HEIGHT: f32 = 2400.0;
/// Visible height of the contract container.
pub const VIEWPORT_HEIGHT: f32 = 400.0;

/// Scroll position `remaining` pixels above the end of the contract.
pub fn scrolled_to(remaining: f32) -> ScrollMetrics {
    ScrollMetrics {
        offset: CONTENT_HEIGHT - VIEWPORT_HEIGHT - remaining,
        content_height: CONTENT_HEIGHT,
        viewport_height: VIEWPORT_HEIGHT,
    }
}

pub fn deed_pdf() -> UploadedFile {
    UploadedFile::new("deed.pdf", 2 * MIB, "application/pdf")
}

pub fn photo_png(size: u64) -> UploadedFile {
    UploadedFile::new("photo.png", size, "image/png")
}

/// A draft that passes every submission rule.
pub fn complete_draft() -> AssetDraft {
    let mut draft = AssetDraft::with_kind(AssetKind::RealEstate);
    draft.name = "Taipei Xinyi luxury residence".to_string();
    draft.description = "120 ping, completed May 2020".to_string();
    draft.files.push(deed_pdf());
    draft
}

/// Default settings with every simulated delay shortened `factor` times.
pub fn fast_config(factor: u64) -> Config {
    let mut config = Config::default();
    config.timings = config.timings.accelerated(factor);
    config
}

/// Writes `contents` to a temporary `.toml` file.
/// The file will be automatically cleaned up when dropped.
pub fn write_config(contents: &str) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("Failed to create temp config file");
    std::fs::write(file.path(), contents).expect("Failed to write temp config file");
    file
}

/// Creates a file of `size` bytes with the given extension and returns it.
pub fn create_upload(extension: &str, size: usize) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(&format!(".{extension}"))
        .tempfile()
        .expect("Failed to create temp upload");
    std::fs::write(file.path(), vec![0u8; size]).expect("Failed to write temp upload");
    file
}
