use std::fs;

use tailor_engine::{export_filename, normalize_plain_text, ExportError, ResumeExporter};
use tempfile::TempDir;

#[test]
fn default_export_name_derives_from_upload() {
    let temp = TempDir::new().unwrap();
    let exporter = ResumeExporter::new(temp.path().join("out"));

    let path = exporter
        .export(None, Some("Jane Doe CV.pdf"), "# Jane")
        .unwrap();
    assert_eq!(path.parent().unwrap(), temp.path().join("out"));
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("Jane_Doe_CV--tailored--"), "{name}");
    assert!(name.ends_with(".md"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "# Jane\n");
}

#[test]
fn explicit_target_is_replaced_atomically() {
    let temp = TempDir::new().unwrap();
    let exporter = ResumeExporter::new(temp.path().to_path_buf());
    let target = temp.path().join("final.md");

    exporter.export(Some(&target), None, "first\n").unwrap();
    let written = exporter.export(Some(&target), None, "second\n").unwrap();
    assert_eq!(written, target);
    assert_eq!(fs::read_to_string(&target).unwrap(), "second\n");

    let leftovers = fs::read_dir(temp.path()).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[test]
fn output_dir_that_is_a_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not_a_dir");
    fs::write(&blocker, "x").unwrap();

    let exporter = ResumeExporter::new(blocker.clone());
    let err = exporter.export(None, None, "data").unwrap_err();
    assert!(matches!(err, ExportError::OutputDir(_)));
}

#[test]
fn export_name_is_stable_for_same_text() {
    assert_eq!(
        export_filename(None, "same"),
        export_filename(Some("resume.docx"), "same")
    );
    assert_ne!(export_filename(None, "a"), export_filename(None, "b"));
}

#[test]
fn utf8_bom_is_stripped() {
    let decoded = normalize_plain_text(b"\xEF\xBB\xBFHello").unwrap();
    assert_eq!(decoded.text, "Hello");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn utf16_bom_is_honoured() {
    let bytes = [0xFF, 0xFE, b'H', 0, b'i', 0];
    let decoded = normalize_plain_text(&bytes).unwrap();
    assert_eq!(decoded.text, "Hi");
    assert_eq!(decoded.encoding_label, "UTF-16LE");
}

#[test]
fn legacy_bytes_fall_back_to_detection() {
    let decoded = normalize_plain_text(b"Caf\xe9 r\xe9sum\xe9 for the na\xefve").unwrap();
    assert_eq!(decoded.text, "Café résumé for the naïve");
}
