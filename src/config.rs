// config.rs
use crate::errors::PipelineError;
use percent_encoding::percent_decode_str;
use std::path::PathBuf;
use std::time::Duration;

pub const LIST_ENDPOINT: &str = "https://apis.data.go.kr/1613000/AptListService3/getTotalAptList3";
pub const DETAIL_ENDPOINT: &str =
    "https://apis.data.go.kr/1613000/AptBasisInfoServiceV4/getAphusBassInfoV4";

pub const DEFAULT_LIST_FILE: &str = "apt_list.csv";
pub const DEFAULT_DETAIL_FILE: &str = "apt_detail.csv";

/// Column holding the complex identifier in both files.
pub const ID_COLUMN: &str = "kaptCode";

pub const PAGE_SIZE: u32 = 100;
pub const LIST_DELAY: Duration = Duration::from_millis(100);
pub const DETAIL_DELAY: Duration = Duration::from_millis(50);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything a fetch run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub service_key: String,
    pub list_url: String,
    pub detail_url: String,
    pub list_file: PathBuf,
    pub detail_file: PathBuf,
    pub page_size: u32,
    pub list_delay: Duration,
    pub detail_delay: Duration,
    pub request_timeout: Duration,
}

impl Settings {
    /// Reads `SERVICE_KEY` (and the optional endpoint overrides) from the
    /// environment. `.env` must already have been loaded by the caller.
    pub fn from_env(list_file: PathBuf, detail_file: PathBuf) -> Result<Self, PipelineError> {
        let raw_key = std::env::var("SERVICE_KEY").map_err(|_| {
            PipelineError::Config("SERVICE_KEY environment variable not set".into())
        })?;

        Ok(Self {
            service_key: decode_service_key(&raw_key)?,
            list_url: env_or("APT_LIST_URL", LIST_ENDPOINT),
            detail_url: env_or("APT_DETAIL_URL", DETAIL_ENDPOINT),
            list_file,
            detail_file,
            page_size: PAGE_SIZE,
            list_delay: LIST_DELAY,
            detail_delay: DETAIL_DELAY,
            request_timeout: REQUEST_TIMEOUT,
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// The portal hands out keys already percent-encoded. The HTTP client
/// encodes query values again, so decode first. `+` stays a literal plus.
pub fn decode_service_key(raw: &str) -> Result<String, PipelineError> {
    let key = percent_decode_str(raw.trim())
        .decode_utf8()
        .map_err(|e| PipelineError::Config(format!("SERVICE_KEY is not valid UTF-8: {e}")))?
        .into_owned();

    if key.is_empty() {
        return Err(PipelineError::Config("SERVICE_KEY is empty".into()));
    }
    Ok(key)
}
