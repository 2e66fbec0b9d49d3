use serde_json::Value;

use crate::lottie::node;
use crate::palette::Bindings;

/// Lottie's per-element CSS class field, used as the token reference.
pub const DEFAULT_REFERENCE_FIELD: &str = "cl";

/// Annotate every bound paint node of a copy of `original` with its token name.
///
/// The numeric color is left alone, so players without token support render the document
/// exactly as before. The result depends only on `original` and `bindings`.
#[tracing::instrument(skip_all, fields(bound = bindings.len()))]
pub fn rewrite(original: &Value, bindings: &Bindings, field: &str) -> Value {
    let mut doc = original.clone();
    if bindings.is_empty() {
        return doc;
    }

    let mut annotated = 0usize;
    node::walk_mut(&mut doc, &mut |site, fields| {
        if let Some(name) = bindings.get(site.rgb.key()) {
            fields.insert(field.to_owned(), Value::String(name.to_owned()));
            annotated += 1;
        }
    });
    tracing::debug!(annotated, "annotated lottie paint nodes");
    doc
}

#[cfg(test)]
#[path = "../../tests/unit/lottie/rewrite.rs"]
mod tests;
