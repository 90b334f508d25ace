use std::fs;

use clerk_engine::{decree_file_regex, find_decree_file, DocumentStore, NullSink};
use tempfile::TempDir;

fn touch(dir: &TempDir, name: &str) {
    fs::write(dir.path().join(name), b"x").unwrap();
}

#[test]
fn matches_only_the_expected_name_shape() {
    let pattern = decree_file_regex("123");
    assert!(pattern.is_match("SPMT_PPPK_T1_2024_123_Budi.pdf"));
    assert!(!pattern.is_match("SPMT_PPPK_T1_2024_1234_Budi.pdf"));
    assert!(!pattern.is_match("SPMT_PPPK_T2_2024_123_Budi.pdf"));
    assert!(!pattern.is_match("draft_SPMT_PPPK_T1_2024_123_Budi.pdf"));
    // The batch segment must be digits.
    assert!(!pattern.is_match("SPMT_PPPK_T1_x_123_Budi.pdf"));
}

#[test]
fn file_codes_are_matched_literally() {
    // "B.1" must not match "B91" even though "." is a regex wildcard.
    let pattern = decree_file_regex("B.1");
    assert!(pattern.is_match("SPMT_PPPK_T1_2024_B.1_Budi.pdf"));
    assert!(!pattern.is_match("SPMT_PPPK_T1_2024_B91_Budi.pdf"));
}

#[test]
fn finds_the_decree_for_a_code() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "SPMT_PPPK_T1_2024_123_Budi.pdf");
    touch(&dir, "SPMT_PPPK_T1_2024_456_Sari.pdf");
    touch(&dir, "unrelated.txt");

    let found = find_decree_file(dir.path(), "123").unwrap();
    assert_eq!(
        found.unwrap().file_name().unwrap(),
        "SPMT_PPPK_T1_2024_123_Budi.pdf"
    );
}

#[test]
fn no_match_is_none_not_an_error() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "SPMT_PPPK_T1_2024_456_Sari.pdf");
    assert!(find_decree_file(dir.path(), "123").unwrap().is_none());
}

#[test]
fn several_matches_pick_the_lexicographic_first() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "SPMT_PPPK_T1_9_123_Zed.pdf");
    touch(&dir, "SPMT_PPPK_T1_1_123_Adi.pdf");

    let found = find_decree_file(dir.path(), "123").unwrap().unwrap();
    assert_eq!(found.file_name().unwrap(), "SPMT_PPPK_T1_1_123_Adi.pdf");
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    assert!(find_decree_file(&missing, "123").is_err());
}

#[test]
fn store_writes_bytes_under_the_url_filename() {
    let dir = TempDir::new().unwrap();
    let store = DocumentStore::new(dir.path().to_path_buf());

    let path = store
        .store("https://files/surat_123.pdf", b"%PDF-1.4", &NullSink)
        .unwrap();

    assert_eq!(path.file_name().unwrap(), "surat_123.pdf");
    assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.4");
}
