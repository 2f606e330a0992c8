use crate::config::ID_COLUMN;
use crate::pipeline::{fetch_all_pages, run_list_fetch};
use crate::store::read_table;
use crate::tests::utils::{test_settings, FakeListApi};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn fetches_three_pages_for_250_records() {
    let dir = TempDir::new().unwrap();
    let settings = test_settings(dir.path());
    let api = FakeListApi::new(250);

    let written = run_list_fetch(&api, &settings).unwrap();

    assert_eq!(written, 250);
    assert_eq!(api.requests(), vec![1, 2, 3]);

    let table = read_table(&settings.list_file).unwrap().unwrap();
    assert_eq!(table.header, vec!["kaptCode", "kaptName", "bjdCode"]);
    assert_eq!(table.rows.len(), 250);
    assert_eq!(table.rows[249][0], "A00250");
}

#[test]
fn stops_at_first_short_page() {
    // Declares 500 but only 230 exist: page 4 comes back empty
    let mut api = FakeListApi::new(500);
    api.available = 230;

    let records = fetch_all_pages(&api, 100, Duration::ZERO);

    assert_eq!(records.len(), 230);
    assert_eq!(api.requests(), vec![1, 2, 3, 4]);
}

#[test]
fn failed_page_ends_with_partial_result() {
    let mut api = FakeListApi::new(400);
    api.fail_page = Some(3);

    let records = fetch_all_pages(&api, 100, Duration::ZERO);

    assert_eq!(records.len(), 200);
    assert_eq!(api.requests(), vec![1, 2, 3]);
}

#[test]
fn row_count_never_exceeds_declared_total() {
    // Endpoint hands out more than it declares
    let mut api = FakeListApi::new(150);
    api.available = 1000;

    let records = fetch_all_pages(&api, 100, Duration::ZERO);

    assert_eq!(records.len(), 150);
    assert_eq!(api.requests(), vec![1, 2]);
}

#[test]
fn failed_first_page_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let settings = test_settings(dir.path());
    fs::write(&settings.list_file, "previous run").unwrap();

    let mut api = FakeListApi::new(250);
    api.fail_page = Some(1);

    let written = run_list_fetch(&api, &settings).unwrap();

    assert_eq!(written, 0);
    assert_eq!(api.requests(), vec![1]);
    assert_eq!(fs::read_to_string(&settings.list_file).unwrap(), "previous run");
}

#[test]
fn zero_total_writes_no_file() {
    let dir = TempDir::new().unwrap();
    let settings = test_settings(dir.path());
    let api = FakeListApi::new(0);

    assert_eq!(run_list_fetch(&api, &settings).unwrap(), 0);
    assert!(!settings.list_file.exists());
}

#[test]
fn rerun_overwrites_instead_of_merging() {
    let dir = TempDir::new().unwrap();
    let settings = test_settings(dir.path());

    run_list_fetch(&FakeListApi::new(120), &settings).unwrap();
    run_list_fetch(&FakeListApi::new(30), &settings).unwrap();

    let table = read_table(&settings.list_file).unwrap().unwrap();
    assert_eq!(table.rows.len(), 30);
    assert_eq!(table.column(&settings.list_file, ID_COLUMN).unwrap()[0], "A00001");
}
