use crate::config::{Settings, PAGE_SIZE};
use crate::registry::{FetchError, ListPage, Record, RegistryApi};
use serde_json::json;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::time::Duration;

/// Settings pointing at files inside `dir`, with no delays.
pub fn test_settings(dir: &Path) -> Settings {
    Settings {
        service_key: "test-key".into(),
        list_url: "http://localhost/list".into(),
        detail_url: "http://localhost/detail".into(),
        list_file: dir.join("apt_list.csv"),
        detail_file: dir.join("apt_detail.csv"),
        page_size: PAGE_SIZE,
        list_delay: Duration::ZERO,
        detail_delay: Duration::ZERO,
        request_timeout: Duration::from_secs(1),
    }
}

pub fn list_record(code: &str) -> Record {
    json!({ "kaptCode": code, "kaptName": format!("{code} 아파트"), "bjdCode": "1111010100" })
        .as_object()
        .cloned()
        .unwrap()
}

pub fn detail_record(code: &str) -> Record {
    json!({
        "kaptCode": code,
        "kaptName": format!("{code} 아파트"),
        "kaptAddr": "서울특별시 종로구 내수동 73",
        "kaptdaCnt": 120,
        "kaptUsedate": "20040615"
    })
    .as_object()
    .cloned()
    .unwrap()
}

/// In-memory list endpoint: `total` records served in pages, optionally
/// failing at one page. Records every page number requested.
pub struct FakeListApi {
    pub total: u64,
    pub available: usize,
    pub fail_page: Option<u32>,
    pub requested: RefCell<Vec<u32>>,
}

impl FakeListApi {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            available: total as usize,
            fail_page: None,
            requested: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<u32> {
        self.requested.borrow().clone()
    }
}

impl RegistryApi for FakeListApi {
    fn list_page(&self, page_no: u32, num_of_rows: u32) -> Result<ListPage, FetchError> {
        self.requested.borrow_mut().push(page_no);

        if self.fail_page == Some(page_no) {
            return Err(FetchError::Status(500));
        }

        let start = (page_no as usize - 1) * num_of_rows as usize;
        let end = (start + num_of_rows as usize).min(self.available);
        let items = (start..end.max(start))
            .map(|i| list_record(&format!("A{:05}", i + 1)))
            .collect();

        Ok(ListPage {
            total_count: self.total,
            items,
        })
    }

    fn detail(&self, _kapt_code: &str) -> Result<Record, FetchError> {
        Err(FetchError::EmptyItem)
    }
}

/// In-memory detail endpoint. Codes in `failing` error out; codes in
/// `overrides` return that record instead of the standard one.
#[derive(Default)]
pub struct FakeDetailApi {
    pub failing: HashSet<String>,
    pub overrides: HashMap<String, Record>,
    pub requested: RefCell<Vec<String>>,
}

impl FakeDetailApi {
    pub fn failing(codes: &[&str]) -> Self {
        Self {
            failing: codes.iter().map(|c| c.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl RegistryApi for FakeDetailApi {
    fn list_page(&self, _page_no: u32, _num_of_rows: u32) -> Result<ListPage, FetchError> {
        Err(FetchError::EmptyItem)
    }

    fn detail(&self, kapt_code: &str) -> Result<Record, FetchError> {
        self.requested.borrow_mut().push(kapt_code.to_string());

        if self.failing.contains(kapt_code) {
            return Err(FetchError::Network("connection reset".into()));
        }
        Ok(self
            .overrides
            .get(kapt_code)
            .cloned()
            .unwrap_or_else(|| detail_record(kapt_code)))
    }
}

/// Write a minimal list file with the given codes.
pub fn write_list_file(path: &Path, codes: &[&str]) {
    let mut text = String::from("\u{feff}kaptCode,kaptName\r\n");
    for code in codes {
        text.push_str(&format!("{code},{code} 아파트\r\n"));
    }
    std::fs::write(path, text).unwrap();
}
