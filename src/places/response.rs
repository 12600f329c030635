//! Provider response bodies.
//!
//! Search records are kept as raw JSON so that one malformed record can be
//! dropped without failing the whole batch.

use serde_json::Value;

use crate::error::NetworkError;
use crate::models::PlaceDetail;

/// Provider statuses that mean "answered successfully".
const OK_STATUSES: &[&str] = &["OK", "ZERO_RESULTS"];

/// Ordered raw records from a nearby search
#[derive(Debug, Clone, Default)]
pub struct SearchResponse {
    pub results: Vec<Value>,
}

impl SearchResponse {
    pub fn new(results: Vec<Value>) -> Self {
        Self { results }
    }

    /// Parse a `{status?, results: [...]}` body.
    pub fn from_json(body: Value) -> Result<Self, NetworkError> {
        check_status(&body)?;

        let results = match body.get("results") {
            Some(Value::Array(results)) => results.clone(),
            // ZERO_RESULTS bodies may omit the array
            None | Some(Value::Null) => Vec::new(),
            Some(other) => {
                return Err(NetworkError::Decode(format!(
                    "`results` is not an array: {}",
                    other
                )))
            }
        };

        Ok(Self { results })
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Optional detail fields for one place
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailResponse {
    pub phone_number: Option<String>,
    pub website: Option<String>,
}

impl DetailResponse {
    /// Parse a `{status?, result: {formatted_phone_number?, website?}}` body.
    pub fn from_json(body: Value) -> Result<Self, NetworkError> {
        check_status(&body)?;

        let result = body
            .get("result")
            .filter(|r| r.is_object())
            .ok_or_else(|| NetworkError::Decode("missing `result` object".to_string()))?;

        Ok(Self {
            phone_number: result["formatted_phone_number"].as_str().map(String::from),
            website: result["website"].as_str().map(String::from),
        })
    }
}

impl From<DetailResponse> for PlaceDetail {
    fn from(r: DetailResponse) -> Self {
        PlaceDetail {
            phone_number: r.phone_number,
            website: r.website,
        }
    }
}

fn check_status(body: &Value) -> Result<(), NetworkError> {
    match body["status"].as_str() {
        None => Ok(()),
        Some(status) if OK_STATUSES.contains(&status) => Ok(()),
        Some(status) => Err(NetworkError::Api {
            status: status.to_string(),
            message: body["error_message"].as_str().unwrap_or_default().to_string(),
        }),
    }
}
