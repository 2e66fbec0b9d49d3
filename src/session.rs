use crate::config::{DEFAULT_OUTPUT_SUFFIX, ToolConfig};
use crate::format::{DocumentFormat, FormatOptions, output_file_name};
use crate::foundation::color::ColorKey;
use crate::foundation::error::{TokenError, TokenResult};
use crate::palette::{Bindings, DistinctColor};

/// A rewritten document ready to be written out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Export {
    pub file_name: String,
    pub contents: String,
}

#[derive(Debug)]
struct Loaded<F: DocumentFormat> {
    file_name: String,
    original: F::Doc,
    working: F::Doc,
    colors: Vec<DistinctColor>,
}

/// One document moving through load, naming, apply and export.
///
/// The original is never mutated; every apply rewrites a fresh copy of it into the working
/// document.
#[derive(Debug)]
pub struct TokenSession<F: DocumentFormat> {
    opts: FormatOptions,
    suffix: String,
    loaded: Option<Loaded<F>>,
    applied: bool,
}

impl<F: DocumentFormat> Default for TokenSession<F> {
    fn default() -> Self {
        Self::new(FormatOptions::default(), DEFAULT_OUTPUT_SUFFIX)
    }
}

impl<F: DocumentFormat> TokenSession<F> {
    pub fn new(opts: FormatOptions, suffix: impl Into<String>) -> Self {
        Self {
            opts,
            suffix: suffix.into(),
            loaded: None,
            applied: false,
        }
    }

    pub fn from_config(config: &ToolConfig) -> Self {
        Self::new(config.format_options(), config.output_suffix.clone())
    }

    /// Replace the current document with `bytes`.
    ///
    /// A rejected file name leaves the session as it was. A document that fails to decode or
    /// parse empties the session.
    pub fn load(&mut self, file_name: &str, bytes: &[u8]) -> TokenResult<&[DistinctColor]> {
        if !F::accepts(file_name) {
            return Err(TokenError::validation(format!(
                "'{file_name}' is not a .{} file",
                F::EXTENSION
            )));
        }
        self.load_as(file_name, bytes)
    }

    /// [`load`](Self::load) without the extension check, for callers that already know the
    /// format of `bytes`.
    #[tracing::instrument(skip(self, bytes), fields(len = bytes.len()))]
    pub fn load_as(&mut self, file_name: &str, bytes: &[u8]) -> TokenResult<&[DistinctColor]> {
        let parsed = std::str::from_utf8(bytes)
            .map_err(|e| TokenError::parse(format!("'{file_name}' is not valid UTF-8: {e}")))
            .and_then(F::load);
        let original = match parsed {
            Ok(doc) => doc,
            Err(e) => {
                self.remove();
                return Err(e);
            }
        };

        let colors = F::extract(&original, &self.opts);
        tracing::debug!(distinct = colors.len(), "document loaded");
        self.applied = false;
        let loaded = self.loaded.insert(Loaded {
            file_name: file_name.to_owned(),
            working: original.clone(),
            original,
            colors,
        });
        Ok(&loaded.colors)
    }

    pub fn remove(&mut self) {
        self.loaded = None;
        self.applied = false;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.loaded.as_ref().map(|l| l.file_name.as_str())
    }

    /// Distinct colors ranked by descending count; empty when nothing is loaded.
    pub fn colors(&self) -> &[DistinctColor] {
        self.loaded.as_ref().map_or(&[], |l| l.colors.as_slice())
    }

    /// Name (or, with an empty name, unname) the color `key`.
    pub fn set_name(&mut self, key: ColorKey, name: &str) -> TokenResult<()> {
        let loaded = self.loaded_mut()?;
        let color = loaded
            .colors
            .iter_mut()
            .find(|c| c.key == key)
            .ok_or_else(|| {
                TokenError::validation(format!("{key} does not occur in the document"))
            })?;
        color.name = name.trim().to_owned();
        self.applied = false;
        Ok(())
    }

    /// Current names as bindings, in palette order.
    pub fn bindings(&self) -> Bindings {
        Bindings::from_colors(self.colors())
    }

    pub fn unbound(&self) -> Vec<ColorKey> {
        self.colors()
            .iter()
            .filter(|c| !c.is_bound())
            .map(|c| c.key)
            .collect()
    }

    pub fn can_apply(&self) -> bool {
        self.is_loaded() && self.unbound().is_empty()
    }

    /// Rewrite the original with every color's name. Fails with [`TokenError::Unbound`] while
    /// any color is unnamed; the working document is then left as it was.
    pub fn apply(&mut self) -> TokenResult<()> {
        self.loaded_mut()?;
        let unbound = self.unbound();
        if !unbound.is_empty() {
            return Err(TokenError::Unbound {
                keys: unbound.into_iter().map(ColorKey::hex).collect(),
            });
        }
        self.rewrite_working()
    }

    /// Rewrite the original with whatever names are set; unnamed colors stay literal.
    pub fn apply_partial(&mut self) -> TokenResult<()> {
        self.loaded_mut()?;
        self.rewrite_working()
    }

    #[tracing::instrument(skip(self))]
    fn rewrite_working(&mut self) -> TokenResult<()> {
        let bindings = self.bindings();
        let loaded = self
            .loaded
            .as_mut()
            .ok_or_else(|| TokenError::validation("no document loaded"))?;
        loaded.working = F::rewrite(&loaded.original, &bindings, &self.opts)?;
        self.applied = true;
        tracing::debug!(bound = bindings.len(), "applied bindings");
        Ok(())
    }

    pub fn is_applied(&self) -> bool {
        self.applied
    }

    pub fn original(&self) -> Option<&F::Doc> {
        self.loaded.as_ref().map(|l| &l.original)
    }

    pub fn working(&self) -> Option<&F::Doc> {
        self.loaded.as_ref().map(|l| &l.working)
    }

    /// The working document under its `_with_variables` name.
    pub fn export(&self) -> TokenResult<Export> {
        let loaded = self
            .loaded
            .as_ref()
            .ok_or_else(|| TokenError::validation("no document loaded"))?;
        Ok(Export {
            file_name: output_file_name::<F>(&loaded.file_name, &self.suffix),
            contents: F::serialize(&loaded.working)?,
        })
    }

    fn loaded_mut(&mut self) -> TokenResult<&mut Loaded<F>> {
        self.loaded
            .as_mut()
            .ok_or_else(|| TokenError::validation("no document loaded"))
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
