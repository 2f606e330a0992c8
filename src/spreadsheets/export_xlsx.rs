use crate::domain::apartment::Apartment;
use crate::errors::ServerError;
use crate::responses::xlsx_response;
use crate::responses::ResultResp;
use rust_xlsxwriter::{Workbook, XlsxError};

const HEADERS: [&str; 9] = [
    "단지코드",
    "단지명",
    "주소",
    "구",
    "단지분류",
    "준공연도",
    "세대수",
    "시공사",
    "연면적",
];

fn xlsx_err(what: &str) -> impl Fn(XlsxError) -> ServerError + '_ {
    move |e| ServerError::XlsxError(format!("Failed to write {what}: {e}"))
}

/// Build the workbook for the filtered rows.
pub fn workbook_bytes(rows: &[&Apartment]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(xlsx_err("header"))?;
    }

    for (i, apt) in rows.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet
            .write_string(r, 0, &apt.kapt_code)
            .map_err(xlsx_err("code"))?;
        worksheet
            .write_string(r, 1, &apt.name)
            .map_err(xlsx_err("name"))?;
        worksheet
            .write_string(r, 2, &apt.address)
            .map_err(xlsx_err("address"))?;
        worksheet
            .write_string(r, 3, &apt.district)
            .map_err(xlsx_err("district"))?;
        worksheet
            .write_string(r, 4, &apt.apt_type)
            .map_err(xlsx_err("type"))?;

        if let Some(year) = apt.built_year {
            worksheet
                .write_number(r, 5, year as f64)
                .map_err(xlsx_err("built year"))?;
        }

        worksheet
            .write_number(r, 6, apt.households)
            .map_err(xlsx_err("households"))?;
        worksheet
            .write_string(r, 7, &apt.builder)
            .map_err(xlsx_err("builder"))?;
        worksheet
            .write_number(r, 8, apt.total_area)
            .map_err(xlsx_err("total area"))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {e}")))
}

pub fn export_apartments_xlsx(rows: &[&Apartment]) -> ResultResp {
    let buffer = workbook_bytes(rows)?;
    xlsx_response(buffer, "apt_detail.xlsx")
}
