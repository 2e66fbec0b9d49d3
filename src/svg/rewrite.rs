use std::sync::LazyLock;

use regex::{Captures, Match, Regex};

use crate::foundation::color::ColorKey;
use crate::foundation::error::{TokenError, TokenResult};
use crate::palette::Bindings;
use crate::svg::scan::{QUOTED_PAINT_ATTR, UNQUOTED_PAINT_ATTR};

static STYLE_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<style\b[^>]*>").unwrap());
static DEFS_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<defs\b[^>]*>").unwrap());
static SVG_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<svg\b[^>]*>").unwrap());
static ROOT_RULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":root\s*\{[^}]*").unwrap());

/// Custom property name for a binding: a leading `--` is dropped, the rest must be a plain
/// identifier (letters, digits, `-`, `_`).
pub fn css_token_name(name: &str) -> TokenResult<&str> {
    let trimmed = name.trim();
    let ident = trimmed.strip_prefix("--").unwrap_or(trimmed);
    if ident.is_empty() {
        return Err(TokenError::validation(format!(
            "token name \"{name}\" is empty"
        )));
    }
    if let Some(bad) = ident
        .chars()
        .find(|c| !(c.is_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(TokenError::validation(format!(
            "token name \"{name}\" contains '{bad}'; use letters, digits, '-' or '_'"
        )));
    }
    Ok(ident)
}

/// `--name: #hex;` pairs for every binding, space separated, in binding order.
pub fn declaration_block(bindings: &Bindings) -> TokenResult<String> {
    let decls = bindings
        .iter()
        .map(|(key, name)| Ok(format!("--{}: {key};", css_token_name(name)?)))
        .collect::<TokenResult<Vec<_>>>()?;
    Ok(decls.join(" "))
}

/// Replace bound `fill`/`stroke` values of `original` with `var(--name, #hex)` and declare the
/// tokens once in a `:root` rule.
///
/// Any spelling of a bound color matches (`#0F0`, `rgb(0,255,0)`, `lime`). Values that are
/// unbound, not colors, or already `var()` references are kept verbatim.
#[tracing::instrument(skip_all, fields(bound = bindings.len()))]
pub fn rewrite(original: &str, bindings: &Bindings) -> TokenResult<String> {
    if bindings.is_empty() {
        return Ok(original.to_owned());
    }
    let decls = declaration_block(bindings)?;

    let reference = |value: &str| -> Option<String> {
        let key = ColorKey::parse(value)?;
        let name = bindings.get(key)?;
        // Names were validated by declaration_block.
        let ident = css_token_name(name).ok()?;
        Some(format!("var(--{ident}, {key})"))
    };

    let mut replaced = 0usize;
    let quoted = QUOTED_PAINT_ATTR.replace_all(original, |caps: &Captures| {
        match reference(&caps[3]) {
            Some(var) => {
                replaced += 1;
                format!("{}{}{var}{}", &caps[1], &caps[2], &caps[4])
            }
            None => caps[0].to_owned(),
        }
    });
    let out = UNQUOTED_PAINT_ATTR.replace_all(&quoted, |caps: &Captures| {
        match reference(&caps[2]) {
            Some(var) => {
                replaced += 1;
                format!("{}\"{var}\"", &caps[1])
            }
            None => caps[0].to_owned(),
        }
    });
    tracing::debug!(replaced, "rewrote svg paint attributes");

    Ok(inject_declarations(&out, &decls))
}

/// Insert `decls` exactly once: into an existing `:root` rule, else at the top of the first
/// `<style>`, else in a new `<style>` under `<defs>`, else in a new `<defs><style>` right
/// after `<svg>` (or at the very start when there is no `<svg>` tag).
///
/// Self-closing `<style/>` and `<defs/>` are passed over; a self-closing `<svg/>` is opened
/// up so the block lands inside the root element.
fn inject_declarations(svg: &str, decls: &str) -> String {
    let (at, insert) = if let Some(style) = open_tag(&STYLE_OPEN, svg) {
        match ROOT_RULE.find(svg) {
            Some(rule) => {
                let body = rule.as_str().trim_end();
                (rule.start() + body.len(), format!(" {decls} "))
            }
            None => (style.end(), format!(":root {{ {decls} }}\n")),
        }
    } else if let Some(defs) = open_tag(&DEFS_OPEN, svg) {
        (defs.end(), format!("<style>:root {{ {decls} }}</style>"))
    } else {
        let block = format!("<defs><style>:root {{ {decls} }}</style></defs>");
        match SVG_OPEN.find(svg) {
            Some(root) if is_self_closing(root.as_str()) => {
                let head = root.as_str().strip_suffix("/>").unwrap_or(root.as_str());
                return format!(
                    "{}{}>{block}</svg>{}",
                    &svg[..root.start()],
                    head.trim_end(),
                    &svg[root.end()..]
                );
            }
            Some(root) => (root.end(), block),
            None => (0, block),
        }
    };

    let mut out = String::with_capacity(svg.len() + insert.len());
    out.push_str(&svg[..at]);
    out.push_str(&insert);
    out.push_str(&svg[at..]);
    out
}

fn is_self_closing(tag: &str) -> bool {
    tag.ends_with("/>")
}

/// First match of `re` that opens an element rather than closing itself.
fn open_tag<'a>(re: &Regex, svg: &'a str) -> Option<Match<'a>> {
    re.find_iter(svg).find(|m| !is_self_closing(m.as_str()))
}

#[cfg(test)]
#[path = "../../tests/unit/svg/rewrite.rs"]
mod tests;
