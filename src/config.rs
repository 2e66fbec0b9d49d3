use std::path::Path;

use anyhow::Context as _;

use crate::encode::gif::GifSettings;
use crate::format::FormatOptions;
use crate::foundation::error::{TokenError, TokenResult};
use crate::lottie::DEFAULT_REFERENCE_FIELD;
use crate::svg::SvgCounting;

pub const DEFAULT_OUTPUT_SUFFIX: &str = "_with_variables";

/// Tool-wide settings, read from a JSON file. Every field is optional.
///
/// ```json
/// {
///   "svg_counting": "per-occurrence",
///   "lottie_reference_field": "cl",
///   "output_suffix": "_with_variables",
///   "gif": { "width": 480, "fps": 15, "quality": "medium" }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub svg_counting: SvgCounting,
    pub lottie_reference_field: String,
    pub output_suffix: String,
    pub gif: GifSettings,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            svg_counting: SvgCounting::default(),
            lottie_reference_field: DEFAULT_REFERENCE_FIELD.to_owned(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_owned(),
            gif: GifSettings::default(),
        }
    }
}

impl ToolConfig {
    pub fn from_json(text: &str) -> TokenResult<Self> {
        let cfg: Self = serde_json::from_str(text)
            .map_err(|e| TokenError::validation(format!("invalid config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> TokenResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> TokenResult<()> {
        if self.lottie_reference_field.trim().is_empty() {
            return Err(TokenError::validation(
                "lottie_reference_field must be non-empty",
            ));
        }
        if self.output_suffix.is_empty() {
            return Err(TokenError::validation("output_suffix must be non-empty"));
        }
        self.gif.validate()
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            svg_counting: self.svg_counting,
            lottie_reference_field: self.lottie_reference_field.trim().to_owned(),
        }
    }
}
