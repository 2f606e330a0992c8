// src/tests/router_tests/dashboard_tests.rs

use crate::domain::apartment::load_apartments;
use crate::router::{handle, parse_filter, Dataset};
use astra::{Body, Request, Response};
use std::fs;
use std::io::Read;
use tempfile::TempDir;

const DETAIL_CSV: &str = "\u{feff}kaptCode,kaptName,kaptAddr,codeAptNm,codeHeatNm,kaptBcompany,kaptUsedate,kaptdaCnt,kaptTopFloor\r\n\
A1,경희궁의아침4단지,서울특별시 종로구 내수동 73,주상복합,개별난방,쌍용건설,20040615,128,17\r\n\
A2,공덕래미안,서울특별시 마포구 공덕동 1,아파트,지역난방,삼성물산,19991120,500,25\r\n\
A3,마포자이,서울특별시 마포구 아현동 2,아파트,지역난방,GS건설,20141030,300,\r\n\
A4,옛날아파트,서울특별시 마포구 신수동 3,아파트,중앙난방,삼성물산,19750101,90,5\r\n";

/// Load the fixture through the same path the server uses at startup.
fn make_dataset() -> (TempDir, Dataset) {
    let dir = TempDir::new().expect("create tempdir");
    let path = dir.path().join("apt_detail.csv");
    fs::write(&path, DETAIL_CSV).unwrap();

    let apartments = load_apartments(&path).expect("load fixture");
    (dir, Dataset::new("apt_detail.csv", apartments))
}

fn get(uri: &str) -> Request {
    http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn body_string(mut resp: Response) -> String {
    let mut body_bytes = Vec::new();
    resp.body_mut()
        .reader()
        .read_to_end(&mut body_bytes)
        .unwrap();
    String::from_utf8(body_bytes).unwrap()
}

#[test]
fn dataset_lists_districts_sorted_and_unique() {
    let (_dir, data) = make_dataset();
    assert_eq!(data.apartments.len(), 4);
    assert_eq!(data.districts, vec!["마포구", "종로구"]);
}

#[test]
fn dashboard_renders_default_filter() {
    let (_dir, data) = make_dataset();

    let resp = handle(get("/"), &data).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    // 1975 falls outside the default 1980..=2025 range
    assert!(body.contains("3 개"), "expected three complexes in: {body}");
    assert!(body.contains("경희궁의아침4단지"));
    assert!(!body.contains("옛날아파트"));
    assert!(body.contains("최다 건설사"));
}

#[test]
fn dashboard_filters_by_district() {
    let (_dir, data) = make_dataset();

    // district=마포구, percent-encoded
    let resp = handle(
        get("/?district=%EB%A7%88%ED%8F%AC%EA%B5%AC&year_from=1970&year_to=2025"),
        &data,
    )
    .unwrap();
    let body = body_string(resp);

    assert!(body.contains("3 개"));
    assert!(body.contains("옛날아파트"));
    assert!(!body.contains("경희궁의아침4단지"));
    // Most common builder among the Mapo rows
    assert!(body.contains("삼성물산"));
}

#[test]
fn export_returns_xlsx() {
    let (_dir, data) = make_dataset();

    let resp = handle(get("/export?year_from=1900"), &data).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );

    let body = {
        let mut resp = resp;
        let mut bytes = Vec::new();
        resp.body_mut().reader().read_to_end(&mut bytes).unwrap();
        bytes
    };
    // XLSX is a zip archive
    assert!(body.starts_with(b"PK"));
}

#[test]
fn unknown_route_is_not_found() {
    let (_dir, data) = make_dataset();
    let err = handle(get("/admin"), &data).unwrap_err();
    assert!(matches!(err, crate::errors::ServerError::NotFound));

    let resp = crate::responses::html_error_response(err);
    assert_eq!(resp.status(), 404);
}

#[test]
fn bad_year_is_bad_request() {
    assert!(parse_filter("year_from=abc").is_err());
    assert!(parse_filter("year_from=2020&year_to=2000").is_err());

    let f = parse_filter("district=%EC%A2%85%EB%A1%9C%EA%B5%AC&district=&year_to=").unwrap();
    assert_eq!(f.districts, vec!["종로구"]);
    assert_eq!(f.year_to, 2025);
}
