/// Everything that can go wrong with a single registry request.
///
/// Callers in `pipeline` do not branch on the variant; every kind is logged
/// and treated as "no data for this page/item".
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("JSON parse error: {0}")]
    Decode(String),
    #[error("API error {code}: {message}")]
    Api { code: String, message: String },
    #[error("Unexpected data shape: {0}")]
    UnexpectedShape(String),
    #[error("response carried no item")]
    EmptyItem,
}
