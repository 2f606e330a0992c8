use crate::registry::FetchError;
use serde::Deserialize;
use serde_json::{Map, Value};

// response
//  ├── header
//  │    ├── resultCode
//  │    └── resultMsg
//  └── body
//       ├── totalCount          (list only)
//       ├── items               (list only: [..] | {item: [..]} | {item: {..}} | "")
//       └── item                (detail only)

/// One registry row, field order as the API sent it.
pub type Record = Map<String, Value>;

#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub response: Option<ResponseEnvelope>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseEnvelope {
    pub header: Option<Header>,
    pub body: Option<Body>,
}

#[derive(Debug, Deserialize)]
pub struct Header {
    #[serde(rename = "resultCode")]
    pub result_code: Option<Value>,
    #[serde(rename = "resultMsg")]
    pub result_msg: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Body {
    #[serde(rename = "totalCount")]
    pub total_count: Option<Value>,
    pub items: Option<Value>,
    pub item: Option<Value>,
}

#[derive(Debug, Default, PartialEq)]
pub struct ListPage {
    pub total_count: u64,
    pub items: Vec<Record>,
}

/// Decode one list-endpoint response body.
pub fn parse_list_body(text: &str) -> Result<ListPage, FetchError> {
    let body = open_envelope(text)?;

    let total_count = body
        .total_count
        .as_ref()
        .and_then(as_u64)
        .ok_or_else(|| FetchError::UnexpectedShape("totalCount missing".into()))?;

    let items = normalize_items(body.items.unwrap_or(Value::Null));

    Ok(ListPage { total_count, items })
}

/// Decode one detail-endpoint response body into its single item.
pub fn parse_detail_body(text: &str) -> Result<Record, FetchError> {
    let body = open_envelope(text)?;

    match body.item {
        Some(Value::Object(item)) if !item.is_empty() => Ok(item),
        Some(Value::Object(_)) | Some(Value::Null) | None => Err(FetchError::EmptyItem),
        Some(Value::String(s)) if s.is_empty() => Err(FetchError::EmptyItem),
        Some(other) => Err(FetchError::UnexpectedShape(format!(
            "item is not an object: {other}"
        ))),
    }
}

fn open_envelope(text: &str) -> Result<Body, FetchError> {
    let envelope: Envelope =
        serde_json::from_str(text).map_err(|e| FetchError::Decode(e.to_string()))?;

    let response = envelope
        .response
        .ok_or_else(|| FetchError::UnexpectedShape("response missing".into()))?;

    if let Some(header) = response.header {
        check_result_code(&header)?;
    }

    response
        .body
        .ok_or_else(|| FetchError::UnexpectedShape("body missing".into()))
}

/// "00", "000" and 0 all mean success; anything else is an API-level error.
fn check_result_code(header: &Header) -> Result<(), FetchError> {
    let code = match &header.result_code {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return Ok(()),
    };

    if code.chars().all(|c| c == '0') {
        return Ok(());
    }

    Err(FetchError::Api {
        code,
        message: header.result_msg.clone().unwrap_or_default(),
    })
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// The list endpoint wraps its rows differently depending on how many there are.
pub fn normalize_items(items: Value) -> Vec<Record> {
    match items {
        Value::Array(arr) => arr
            .into_iter()
            .filter_map(|v| match v {
                Value::Object(obj) => Some(obj),
                _ => None,
            })
            .collect(),
        Value::Object(mut obj) => match obj.remove("item") {
            Some(inner) => normalize_items(inner),
            // A bare record rather than a wrapper
            None if !obj.is_empty() => vec![obj],
            None => Vec::new(),
        },
        _ => Vec::new(),
    }
}
