//! SVG pipeline: the document is opaque markup text scanned with regular expressions.

pub mod rewrite;
pub mod scan;

pub use rewrite::{css_token_name, declaration_block, rewrite};
pub use scan::{ColorMatch, Scanner, SvgCounting, counted_matches, extract, scan};
