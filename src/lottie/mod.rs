//! Lottie pipeline: a parsed JSON animation tree, fill/stroke paint discovery, and `cl`
//! token annotation.

pub mod extract;
pub mod node;
pub mod rewrite;

use serde_json::Value;

use crate::foundation::error::{TokenError, TokenResult};

pub use extract::{extract, paint_sites};
pub use node::{LottieNode, PaintRole, PaintSite};
pub use rewrite::{DEFAULT_REFERENCE_FIELD, rewrite};

/// Parse Lottie JSON text.
pub fn parse(text: &str) -> TokenResult<Value> {
    serde_json::from_str(text).map_err(|e| TokenError::parse(format!("invalid lottie json: {e}")))
}

/// Compact serialization, the export format.
pub fn to_string(doc: &Value) -> TokenResult<String> {
    serde_json::to_string(doc).map_err(|e| TokenError::serde(e.to_string()))
}
