use crate::domain::apartment::Apartment;
use crate::domain::summary::{Filter, Summary};
use crate::errors::ServerError;
use crate::responses::{html_response, ResultResp};
use crate::spreadsheets::export_apartments_xlsx;
use crate::templates::pages::{dashboard_page, DashboardVm};
use astra::Request;
use std::collections::BTreeSet;
use url::form_urlencoded;

/// The detail file as loaded at startup. Read-only for the life of the server.
pub struct Dataset {
    pub source: String,
    pub apartments: Vec<Apartment>,
    pub districts: Vec<String>,
}

impl Dataset {
    pub fn new(source: impl Into<String>, apartments: Vec<Apartment>) -> Self {
        let districts: BTreeSet<String> = apartments.iter().map(|a| a.district.clone()).collect();
        Self {
            source: source.into(),
            apartments,
            districts: districts.into_iter().collect(),
        }
    }
}

pub fn handle(req: Request, data: &Dataset) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();

    match (method, path) {
        ("GET", "/") => {
            let query = req.uri().query().unwrap_or("");
            let filter = parse_filter(query)?;
            let rows = filter.apply(&data.apartments);

            let vm = DashboardVm {
                source: data.source.clone(),
                districts: data.districts.clone(),
                summary: Summary::build(&rows),
                export_href: if query.is_empty() {
                    "/export".to_string()
                } else {
                    format!("/export?{query}")
                },
                filter,
                rows,
            };
            html_response(dashboard_page(&vm))
        }
        ("GET", "/export") => {
            let filter = parse_filter(req.uri().query().unwrap_or(""))?;
            export_apartments_xlsx(&filter.apply(&data.apartments))
        }
        _ => Err(ServerError::NotFound),
    }
}

/// `district` may repeat; years fall back to the defaults when absent or blank.
pub fn parse_filter(query: &str) -> Result<Filter, ServerError> {
    let mut filter = Filter::default();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let value = value.trim();
        match key.as_ref() {
            "district" if !value.is_empty() => filter.districts.push(value.to_string()),
            "year_from" if !value.is_empty() => filter.year_from = parse_year(value)?,
            "year_to" if !value.is_empty() => filter.year_to = parse_year(value)?,
            _ => {}
        }
    }

    if filter.year_from > filter.year_to {
        return Err(ServerError::BadRequest(format!(
            "year_from {} is after year_to {}",
            filter.year_from, filter.year_to
        )));
    }
    Ok(filter)
}

fn parse_year(value: &str) -> Result<i32, ServerError> {
    value
        .parse()
        .map_err(|_| ServerError::BadRequest(format!("not a year: {value}")))
}
