// src/domain/apartment.rs

use crate::errors::PipelineError;
use crate::store::{read_table, Table};
use chrono::{Datelike, NaiveDate};
use std::path::Path;

pub const UNKNOWN_DISTRICT: &str = "알수없음";

/// One detail-file row with the columns the dashboard derives from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Apartment {
    pub kapt_code: String,
    pub name: String,
    pub address: String,
    pub apt_type: String,
    pub heating: String,
    pub builder: String,

    pub built_year: Option<i32>,
    pub households: f64,
    pub total_area: f64,
    pub top_floor: f64,
    pub district: String,
}

/// Approval date comes as `YYYYMMDD`; anything else yields no year.
pub fn parse_built_year(raw: &str) -> Option<i32> {
    NaiveDate::parse_from_str(raw.trim(), "%Y%m%d")
        .ok()
        .map(|d| d.year())
}

/// Numeric columns default to 0 when blank or unparsable.
pub fn parse_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// "서울특별시 종로구 내수동 73" -> "종로구"
pub fn district_of(address: &str) -> String {
    address
        .split_whitespace()
        .nth(1)
        .unwrap_or(UNKNOWN_DISTRICT)
        .to_string()
}

impl Apartment {
    pub fn from_row(table: &Table, row: &[String]) -> Self {
        let cell = |name: &str| -> String {
            table
                .column_index(name)
                .and_then(|i| row.get(i))
                .cloned()
                .unwrap_or_default()
        };

        let address = cell("kaptAddr");

        Apartment {
            kapt_code: cell("kaptCode"),
            name: cell("kaptName"),
            apt_type: cell("codeAptNm"),
            heating: cell("codeHeatNm"),
            builder: cell("kaptBcompany"),
            built_year: parse_built_year(&cell("kaptUsedate")),
            households: parse_number(&cell("kaptdaCnt")),
            total_area: parse_number(&cell("kaptTarea")),
            top_floor: parse_number(&cell("kaptTopFloor")),
            district: district_of(&address),
            address,
        }
    }
}

/// Load the detail file for the dashboard. A missing file is fatal.
pub fn load_apartments(path: &Path) -> Result<Vec<Apartment>, PipelineError> {
    let table =
        read_table(path)?.ok_or_else(|| PipelineError::MissingInput(path.to_path_buf()))?;

    Ok(table
        .rows
        .iter()
        .map(|row| Apartment::from_row(&table, row))
        .collect())
}
