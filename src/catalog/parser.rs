//! Catalog JSON parsing
//!
//! Accepted document shapes:
//! - a bare array of star records
//! - an object with a `stars` array
//! - an object with a `catalog` array

use serde_json::{Map, Value};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::types::StarRecord;

/// Object keys that may hold the star array, in lookup order.
const CATALOG_ARRAY_KEYS: [&str; 2] = ["stars", "catalog"];

/// Reasons a catalog file cannot be used. All of them are recovered by the fallback catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no file provider available")]
    ProviderUnavailable,
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unrecognized catalog shape ({0})")]
    UnrecognizedShape(String),
    #[error("catalog contains no stars")]
    Empty,
}

/// Parse catalog text into records.
pub fn parse_catalog(text: &str) -> Result<Vec<StarRecord>, CatalogError> {
    let value: Value = serde_json::from_str(text)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(obj) => extract_star_array(obj)?,
        other => {
            return Err(CatalogError::UnrecognizedShape(
                json_kind(&other).to_string(),
            ));
        }
    };

    if items.is_empty() {
        return Err(CatalogError::Empty);
    }

    let records = items
        .into_iter()
        .map(serde_json::from_value::<StarRecord>)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

fn extract_star_array(mut obj: Map<String, Value>) -> Result<Vec<Value>, CatalogError> {
    for key in CATALOG_ARRAY_KEYS {
        if let Some(Value::Array(items)) = obj.get_mut(key).map(Value::take) {
            return Ok(items);
        }
    }
    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    Err(CatalogError::UnrecognizedShape(format!(
        "object keys: {}",
        keys.join(", ")
    )))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
