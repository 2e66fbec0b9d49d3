use serde_json::Value;

use crate::lottie::node::{self, PaintSite};
use crate::palette::{DistinctColor, PaletteBuilder};

/// Every distinct fill/stroke color in `doc`, ranked by how many paint nodes use it.
#[tracing::instrument(skip_all)]
pub fn extract(doc: &Value) -> Vec<DistinctColor> {
    let mut palette = PaletteBuilder::new();
    node::walk(doc, &mut |site| palette.add(site.rgb.key()));
    tracing::debug!(sites = palette.total(), "collected lottie paint sites");
    palette.finish()
}

/// Every resolvable paint node, in traversal order.
pub fn paint_sites(doc: &Value) -> Vec<PaintSite> {
    let mut sites = Vec::new();
    node::walk(doc, &mut |site| sites.push(site.clone()));
    sites
}

#[cfg(test)]
#[path = "../../tests/unit/lottie/extract.rs"]
mod tests;
