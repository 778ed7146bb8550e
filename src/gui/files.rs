use rfd::AsyncFileDialog;

use crate::core::asset::UploadedFile;

const DOCUMENT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "pdf"];
const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// What a file picker is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// Supporting documents of an asset; several at once.
    Documents,
    /// A single identity photo.
    Photo,
}

/// Ask the user for files and describe them. `Err` carries a printable reason
/// so it can travel inside a message.
pub async fn pick(kind: Pick) -> Result<Vec<UploadedFile>, String> {
    let dialog = match kind {
        Pick::Documents => AsyncFileDialog::new()
            .set_title("Upload supporting documents")
            .add_filter("Documents", DOCUMENT_EXTENSIONS),
        Pick::Photo => AsyncFileDialog::new()
            .set_title("Upload a photo")
            .add_filter("Images", PHOTO_EXTENSIONS),
    };
    let handles = match kind {
        Pick::Documents => dialog.pick_files().await.unwrap_or_default(),
        Pick::Photo => dialog.pick_file().await.into_iter().collect(),
    };
    handles
        .iter()
        .map(|handle| UploadedFile::from_path(handle.path()).map_err(|err| format!("{err:#}")))
        .collect()
}
