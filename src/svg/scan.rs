use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::color::{Rgb8, parse_css_color};
use crate::palette::{DistinctColor, PaletteBuilder};

static HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})\b").unwrap());
static RGB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"rgb\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*\)").unwrap());
static RGBA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"rgba\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*,\s*[\d.]+\s*\)").unwrap()
});
pub(crate) static QUOTED_PAINT_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)((?:fill|stroke)\s*=\s*)(["'])([^"']+)(["'])"#).unwrap()
});
pub(crate) static UNQUOTED_PAINT_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)((?:fill|stroke)\s*=\s*)([^\s>"']+)"#).unwrap());

/// How overlapping scanner hits are counted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SvgCounting {
    /// Every scanner hit counts, so `fill="#fff"` is counted by both the hex scanner and the
    /// attribute scanner.
    #[default]
    PerMatch,
    /// Hits on the same byte span count once.
    PerOccurrence,
}

/// The pattern family that produced a [`ColorMatch`], in scan order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scanner {
    Hex,
    Rgb,
    Rgba,
    QuotedAttr,
    UnquotedAttr,
}

/// One scanner hit that normalized to a color.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ColorMatch {
    pub scanner: Scanner,
    /// Byte span of the color value (attribute values are trimmed).
    pub span: Range<usize>,
    pub rgb: Rgb8,
}

/// Run every scanner over `svg`: hex literals, `rgb()`, `rgba()`, then quoted and unquoted
/// `fill`/`stroke` attributes. Values that do not normalize to a color are dropped.
pub fn scan(svg: &str) -> Vec<ColorMatch> {
    let mut out = Vec::new();

    for (scanner, re) in [
        (Scanner::Hex, &*HEX),
        (Scanner::Rgb, &*RGB),
        (Scanner::Rgba, &*RGBA),
    ] {
        for m in re.find_iter(svg) {
            push_match(&mut out, scanner, m.as_str(), m.start());
        }
    }

    for (scanner, re, group) in [
        (Scanner::QuotedAttr, &*QUOTED_PAINT_ATTR, 3),
        (Scanner::UnquotedAttr, &*UNQUOTED_PAINT_ATTR, 2),
    ] {
        for caps in re.captures_iter(svg) {
            if let Some(value) = caps.get(group) {
                push_match(&mut out, scanner, value.as_str(), value.start());
            }
        }
    }

    out
}

fn push_match(out: &mut Vec<ColorMatch>, scanner: Scanner, raw: &str, start: usize) {
    let lead = raw.len() - raw.trim_start().len();
    let value = raw.trim();
    let Some(rgb) = parse_css_color(value) else {
        tracing::trace!(?scanner, value, "ignoring non-color paint value");
        return;
    };
    let start = start + lead;
    out.push(ColorMatch {
        scanner,
        span: start..start + value.len(),
        rgb,
    });
}

/// The scanner hits that count under `counting`, in scan order.
///
/// `PerOccurrence` keeps only the first hit on each byte span.
pub fn counted_matches(svg: &str, counting: SvgCounting) -> Vec<ColorMatch> {
    let mut matches = scan(svg);
    if counting == SvgCounting::PerOccurrence {
        let mut seen: HashSet<Range<usize>> = HashSet::new();
        matches.retain(|m| seen.insert(m.span.clone()));
    }
    matches
}

/// Every distinct color in `svg`, ranked by count.
#[tracing::instrument(skip(svg), fields(len = svg.len()))]
pub fn extract(svg: &str, counting: SvgCounting) -> Vec<DistinctColor> {
    let matches = counted_matches(svg, counting);
    let mut palette = PaletteBuilder::new();
    for m in &matches {
        palette.add(m.rgb.key());
    }

    tracing::debug!(counted = palette.total(), "collected svg colors");
    palette.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/svg/scan.rs"]
mod tests;
