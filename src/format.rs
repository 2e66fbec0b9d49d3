use serde_json::Value;

use crate::foundation::error::{TokenError, TokenResult};
use crate::palette::{Bindings, DistinctColor};
use crate::svg::SvgCounting;
use crate::{lottie, svg};

/// Per-format knobs that extraction and rewrite read.
#[derive(Clone, Debug)]
pub struct FormatOptions {
    pub svg_counting: SvgCounting,
    pub lottie_reference_field: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            svg_counting: SvgCounting::default(),
            lottie_reference_field: lottie::DEFAULT_REFERENCE_FIELD.to_owned(),
        }
    }
}

/// A document type the token pipeline can load, scan and rewrite.
pub trait DocumentFormat {
    type Doc: Clone + std::fmt::Debug;

    /// Lowercase extension without the dot.
    const EXTENSION: &'static str;
    /// Base name used when the upload name has nothing left after removing the extension.
    const FALLBACK_STEM: &'static str;

    fn accepts(file_name: &str) -> bool {
        file_name
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(Self::EXTENSION))
    }

    fn load(text: &str) -> TokenResult<Self::Doc>;

    fn extract(doc: &Self::Doc, opts: &FormatOptions) -> Vec<DistinctColor>;

    fn rewrite(
        original: &Self::Doc,
        bindings: &Bindings,
        opts: &FormatOptions,
    ) -> TokenResult<Self::Doc>;

    fn serialize(doc: &Self::Doc) -> TokenResult<String>;
}

/// Lottie JSON animations.
#[derive(Clone, Copy, Debug)]
pub struct Lottie;

impl DocumentFormat for Lottie {
    type Doc = Value;

    const EXTENSION: &'static str = "json";
    const FALLBACK_STEM: &'static str = "lottie";

    fn load(text: &str) -> TokenResult<Value> {
        lottie::parse(text)
    }

    fn extract(doc: &Value, _opts: &FormatOptions) -> Vec<DistinctColor> {
        lottie::extract(doc)
    }

    fn rewrite(original: &Value, bindings: &Bindings, opts: &FormatOptions) -> TokenResult<Value> {
        if opts.lottie_reference_field.is_empty() {
            return Err(TokenError::validation(
                "lottie reference field must be non-empty",
            ));
        }
        Ok(lottie::rewrite(
            original,
            bindings,
            &opts.lottie_reference_field,
        ))
    }

    fn serialize(doc: &Value) -> TokenResult<String> {
        lottie::to_string(doc)
    }
}

/// SVG markup, kept as text.
#[derive(Clone, Copy, Debug)]
pub struct Svg;

impl DocumentFormat for Svg {
    type Doc = String;

    const EXTENSION: &'static str = "svg";
    const FALLBACK_STEM: &'static str = "svg";

    fn load(text: &str) -> TokenResult<String> {
        Ok(text.to_owned())
    }

    fn extract(doc: &String, opts: &FormatOptions) -> Vec<DistinctColor> {
        svg::extract(doc, opts.svg_counting)
    }

    fn rewrite(original: &String, bindings: &Bindings, _opts: &FormatOptions) -> TokenResult<String> {
        svg::rewrite(original, bindings)
    }

    fn serialize(doc: &String) -> TokenResult<String> {
        Ok(doc.clone())
    }
}

/// Output name: the first `.ext` (any case) removed from `file_name`, then `suffix` and `.ext` appended.
pub fn output_file_name<F: DocumentFormat>(file_name: &str, suffix: &str) -> String {
    let dotted = format!(".{}", F::EXTENSION);
    // ASCII lowercasing keeps byte offsets, so the position maps back onto `file_name`.
    let stem = match file_name.to_ascii_lowercase().find(&dotted) {
        Some(at) => format!("{}{}", &file_name[..at], &file_name[at + dotted.len()..]),
        None => file_name.to_owned(),
    };
    let stem = if stem.is_empty() {
        F::FALLBACK_STEM
    } else {
        stem.as_str()
    };
    format!("{stem}{suffix}{dotted}")
}
