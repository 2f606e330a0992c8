// client.rs
use crate::config::Settings;
use crate::errors::PipelineError;
use crate::registry::models::{parse_detail_body, parse_list_body};
use crate::registry::{FetchError, ListPage, Record};
use reqwest::blocking::Client;

const USER_AGENT: &str = concat!("apt_registry/", env!("CARGO_PKG_VERSION"));

/// The two registry calls the fetchers need. `RegistryClient` talks to the
/// real portal; tests substitute in-memory fakes.
pub trait RegistryApi {
    fn list_page(&self, page_no: u32, num_of_rows: u32) -> Result<ListPage, FetchError>;
    fn detail(&self, kapt_code: &str) -> Result<Record, FetchError>;
}

pub struct RegistryClient {
    client: Client,
    service_key: String,
    list_url: String,
    detail_url: String,
}

impl RegistryClient {
    pub fn new(settings: &Settings) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| PipelineError::Client(e.to_string()))?;

        Ok(Self {
            client,
            service_key: settings.service_key.clone(),
            list_url: settings.list_url.clone(),
            detail_url: settings.detail_url.clone(),
        })
    }

    fn get_text(&self, url: &str, params: &[(&str, String)]) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(url)
            .query(&[("serviceKey", self.service_key.as_str())])
            .query(params)
            .query(&[("_type", "json")])
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        resp.text().map_err(|e| FetchError::Network(e.to_string()))
    }
}

impl RegistryApi for RegistryClient {
    fn list_page(&self, page_no: u32, num_of_rows: u32) -> Result<ListPage, FetchError> {
        let text = self.get_text(
            &self.list_url,
            &[
                ("pageNo", page_no.to_string()),
                ("numOfRows", num_of_rows.to_string()),
            ],
        )?;
        parse_list_body(&text)
    }

    fn detail(&self, kapt_code: &str) -> Result<Record, FetchError> {
        let text = self.get_text(&self.detail_url, &[("kaptCode", kapt_code.to_string())])?;
        parse_detail_body(&text)
    }
}
