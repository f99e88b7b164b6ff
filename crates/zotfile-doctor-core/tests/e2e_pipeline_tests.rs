mod common;

use common::{create_zotero_db, touch, DJVU, PDF};
use std::fs;
use tempfile::tempdir;
use zotfile_doctor_core::{
    AppConfig, CaseSensitivity, DoctorEngine, Error, NormalizedPath, PathNormalizer,
    SilentReporter,
};

fn strs(keys: &[NormalizedPath]) -> Vec<&str> {
    keys.iter().map(NormalizedPath::as_str).collect()
}

/// Layout:
///   zotfile/
///     a/x.pdf        (in DB)
///     c/z.pdf        (not in DB)
///     c/notes.txt    (ignored)
///     d/w.PDF        (not in DB)
///   DB also lists b/y.djvu, which is missing on disk.
fn create_library(root: &std::path::Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let managed = root.join("zotfile");
    touch(&managed, "a/x.pdf");
    touch(&managed, "c/z.pdf");
    touch(&managed, "c/notes.txt");
    touch(&managed, "d/w.PDF");

    let db_path = create_zotero_db(
        root,
        &[
            (2, PDF, Some("attachments:a/x.pdf")),
            (2, DJVU, Some("attachments:b/y.djvu")),
            (0, PDF, Some("storage:imported.pdf")),
        ],
    );
    (db_path, managed)
}

#[test]
fn test_full_reconciliation() {
    let tmp = tempdir().unwrap();
    let (db_path, managed) = create_library(tmp.path());

    let engine = DoctorEngine::new(AppConfig::default());
    let normalizer = PathNormalizer::new(CaseSensitivity::Sensitive);
    let result = engine
        .run_with(&db_path, &managed, normalizer, &SilentReporter)
        .unwrap();

    let report = &result.discrepancies;
    assert_eq!(strs(&report.in_db_not_dir), vec!["b/y.djvu"]);
    assert_eq!(strs(&report.in_dir_not_db), vec!["c/z.pdf", "d/w.PDF"]);
    assert_eq!(report.db_total, 2);
    assert_eq!(report.dir_total, 3);
    assert_eq!(result.db_skipped, 1);
}

#[test]
fn test_case_insensitive_run_matches_differently_cased_records() {
    let tmp = tempdir().unwrap();
    let managed = tmp.path().join("zotfile");
    touch(&managed, "Papers/Smith2020.PDF");
    let db_path = create_zotero_db(
        tmp.path(),
        &[(2, PDF, Some("attachments:papers/smith2020.pdf"))],
    );

    let engine = DoctorEngine::new(AppConfig::default());
    let result = engine
        .run_with(
            &db_path,
            &managed,
            PathNormalizer::new(CaseSensitivity::Insensitive),
            &SilentReporter,
        )
        .unwrap();
    assert!(result.discrepancies.is_consistent());

    let result = engine
        .run_with(
            &db_path,
            &managed,
            PathNormalizer::new(CaseSensitivity::Sensitive),
            &SilentReporter,
        )
        .unwrap();
    assert_eq!(result.discrepancies.in_db_not_dir.len(), 1);
    assert_eq!(result.discrepancies.in_dir_not_db.len(), 1);
}

#[test]
fn test_unicode_composition_does_not_cause_discrepancies() {
    let tmp = tempdir().unwrap();
    let managed = tmp.path().join("zotfile");
    touch(&managed, "Gödel/Unvollständigkeit.pdf");
    let db_path = create_zotero_db(
        tmp.path(),
        &[(
            2,
            PDF,
            Some("attachments:Go\u{308}del/Unvollsta\u{308}ndigkeit.pdf"),
        )],
    );

    let engine = DoctorEngine::new(AppConfig::default());
    let result = engine
        .run_with(
            &db_path,
            &managed,
            PathNormalizer::new(CaseSensitivity::Sensitive),
            &SilentReporter,
        )
        .unwrap();
    assert!(result.discrepancies.is_consistent());
}

#[test]
fn test_probed_run_is_repeatable() {
    let tmp = tempdir().unwrap();
    let (db_path, managed) = create_library(tmp.path());

    let engine = DoctorEngine::new(AppConfig::default());
    let first = engine.run(&db_path, &managed, &SilentReporter).unwrap();
    let second = engine.run(&db_path, &managed, &SilentReporter).unwrap();

    assert_eq!(first.discrepancies, second.discrepancies);
    assert_eq!(
        first.discrepancies.to_string(),
        second.discrepancies.to_string()
    );
    // The probe file must not show up or linger.
    assert_eq!(fs::read_dir(&managed).unwrap().count(), 3);
}

#[test]
fn test_invalid_managed_directory() {
    let tmp = tempdir().unwrap();
    let db_path = create_zotero_db(tmp.path(), &[]);
    let engine = DoctorEngine::new(AppConfig::default());

    let result = engine.run(&db_path, &tmp.path().join("missing"), &SilentReporter);
    assert!(matches!(result, Err(Error::InvalidManagedDirectory(_))));
}

#[test]
fn test_missing_database_is_fatal() {
    let tmp = tempdir().unwrap();
    let managed = tmp.path().join("zotfile");
    fs::create_dir_all(&managed).unwrap();
    let engine = DoctorEngine::new(AppConfig::default());

    let result = engine.run(&tmp.path().join("zotero.sqlite"), &managed, &SilentReporter);
    assert!(matches!(result, Err(Error::Database(_))));
}

#[test]
fn test_null_link_mode_row_is_skipped() {
    let tmp = tempdir().unwrap();
    let managed = tmp.path().join("zotfile");
    touch(&managed, "a/x.pdf");
    let db_path = create_zotero_db(tmp.path(), &[(2, PDF, Some("attachments:a/x.pdf"))]);
    rusqlite::Connection::open(&db_path)
        .unwrap()
        .execute(
            "INSERT INTO itemAttachments (linkMode, contentType, path) VALUES (NULL, 'text/html', NULL)",
            [],
        )
        .unwrap();

    let engine = DoctorEngine::new(AppConfig::default());
    let result = engine
        .run_with(
            &db_path,
            &managed,
            PathNormalizer::new(CaseSensitivity::Sensitive),
            &SilentReporter,
        )
        .unwrap();

    assert!(result.discrepancies.is_consistent());
    assert_eq!(result.discrepancies.db_total, 1);
    assert_eq!(result.db_skipped, 1);
}
