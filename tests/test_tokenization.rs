//! Integration tests for the tokenization flow's validators and dialog gates.
//!
//! Tests cover:
//! - Submission rules are checked in order and name the failing category
//! - File intake keeps valid files and reports rejections
//! - Contract read gate and signature gate reset on every open

mod common;

use common::*;

#[test]
fn test_submission_rules_are_checked_in_order() {
    let policy = UploadPolicy::default();

    // 1. Empty draft: the kind is reported first
    let mut draft = AssetDraft::new();
    assert_eq!(draft.validate(&policy), Err(SubmissionError::MissingKind));

    // 2. Whitespace-only name counts as missing
    draft.select_kind(AssetKind::Art);
    draft.name = "   ".to_string();
    assert_eq!(draft.validate(&policy), Err(SubmissionError::MissingName));

    // 3. Description next
    draft.name = "Sanyu, Chrysanthemums".to_string();
    assert_eq!(
        draft.validate(&policy),
        Err(SubmissionError::MissingDescription)
    );

    // 4. Then at least one document
    draft.description = "Oil on canvas".to_string();
    assert_eq!(draft.validate(&policy), Err(SubmissionError::MissingDocuments));

    // 5. A complete draft yields its kind
    draft.files.push(deed_pdf());
    assert_eq!(draft.validate(&policy), Ok(AssetKind::Art));
}

#[test]
fn test_invalid_document_fails_submission() {
    let policy = UploadPolicy::default();
    let mut draft = complete_draft();
    draft.files.push(UploadedFile::new("notes.txt", 10, "text/plain"));

    let result = draft.validate(&policy);
    assert!(
        matches!(
            result,
            Err(SubmissionError::InvalidDocument(FileRejection::UnsupportedType { .. }))
        ),
        "got {result:?}"
    );
}

#[test]
fn test_file_intake_keeps_valid_files() {
    let policy = UploadPolicy::default();
    let mut draft = AssetDraft::new();

    let intake = draft.add_files(
        [
            deed_pdf(),
            photo_png(10 * 1024 * 1024),
            photo_png(10 * 1024 * 1024 + 1),
            UploadedFile::new("clip.gif", 100, "image/gif"),
        ],
        &policy,
    );

    assert_eq!(intake.accepted, 2);
    assert_eq!(intake.rejected.len(), 2);
    assert!(intake.has_rejections());
    assert_eq!(draft.files.len(), 2);
    assert!(matches!(
        intake.rejected[0],
        FileRejection::TooLarge { size, .. } if size == 10 * 1024 * 1024 + 1
    ));
}

#[test]
fn test_files_from_disk_get_mime_from_extension() -> anyhow::Result<()> {
    // 1. Create a small PDF and an oversized PNG on disk
    let pdf = create_upload("pdf", 1024);
    let png = create_upload("PNG", 10 * 1024 * 1024 + 1);

    // 2. Describe them
    let pdf = UploadedFile::from_path(pdf.path())?;
    let png = UploadedFile::from_path(png.path())?;
    assert_eq!(pdf.mime, "application/pdf");
    assert_eq!(pdf.size, 1024);
    assert_eq!(png.mime, "image/png");

    // 3. Only the PDF passes the policy
    let policy = UploadPolicy::default();
    assert!(policy.check(&pdf).is_ok());
    assert!(policy.check(&png).is_err());

    Ok(())
}

#[test]
fn test_read_gate_threshold_and_reset() {
    let mut gate = ReadGate::new(10.0);

    // 1. Confirming before reading fails, however often it is tried
    for _ in 0..3 {
        assert_eq!(gate.confirm(), Err(GateError::NotScrolledToBottom));
    }

    // 2. 11px above the end is not enough, 10px is
    assert!(!gate.on_scroll(scrolled_to(11.0)));
    assert!(gate.on_scroll(scrolled_to(10.0)));
    assert_eq!(gate.confirm(), Ok(()));

    // 3. Scrolling back up keeps the gate satisfied and reports nothing new
    assert!(!gate.on_scroll(scrolled_to(1500.0)));
    assert!(!gate.on_scroll(scrolled_to(0.0)));
    assert!(gate.has_scrolled_to_bottom());

    // 4. Reopening the dialog starts over
    gate.open();
    assert_eq!(gate.confirm(), Err(GateError::NotScrolledToBottom));
}

#[test]
fn test_signature_gate_session() {
    let mut gate = SignatureGate::new();
    assert_eq!(gate.confirm(), Err(GateError::NotSigned));

    // 1. Pen up without pen down does nothing
    assert!(!gate.pen_up());
    assert!(!gate.has_signed());

    // 2. A full stroke signs
    gate.pen_down(Point::new(10.0, 10.0));
    gate.pen_move(Point::new(40.0, 25.0));
    assert!(!gate.has_signed());
    assert!(gate.pen_up());
    assert_eq!(gate.confirm(), Ok(()));
    assert_eq!(gate.strokes().len(), 1);

    // 3. Clearing disables confirm again
    gate.clear();
    assert_eq!(gate.confirm(), Err(GateError::NotSigned));
    assert!(gate.strokes().is_empty());

    // 4. Auto-fill signs without strokes; reopening resets
    gate.auto_fill();
    assert!(gate.has_signed());
    gate.open();
    assert!(!gate.has_signed());
    assert!(!gate.is_auto_filled());
}
