//! tokenpaint finds the fill and stroke colors of a Lottie animation or an SVG image and rebinds
//! them to named design tokens.
//!
//! # Pipeline overview
//!
//! 1. **Load**: file name + bytes -> parsed document ([`DocumentFormat::load`])
//! 2. **Extract**: document -> distinct canonical colors ranked by use ([`DistinctColor`])
//! 3. **Bind**: the user names each color ([`Bindings`])
//! 4. **Rewrite**: a fresh copy of the original with token references
//!    (`cl` on Lottie paint nodes, `var(--name, #hex)` plus a `:root` block in SVG)
//!
//! [`TokenSession`] owns one document through these steps. The [`encode`] and [`transcript`]
//! modules are the boundaries to the two external collaborators of the tool: ffmpeg for
//! video-to-GIF conversion and a video transcript provider.
#![forbid(unsafe_code)]

pub mod config;
pub mod encode;
pub mod format;
pub mod foundation;
pub mod lottie;
pub mod palette;
pub mod session;
pub mod svg;
pub mod transcript;

pub use config::ToolConfig;
pub use encode::gif::{GifPlan, GifQuality, GifSettings, run_gif_plan};
pub use format::{DocumentFormat, FormatOptions, Lottie, Svg, output_file_name};
pub use foundation::color::{ColorKey, Rgb8};
pub use foundation::error::{TokenError, TokenResult};
pub use palette::{Bindings, DistinctColor, PaletteBuilder};
pub use session::{Export, TokenSession};
pub use svg::SvgCounting;
pub use transcript::{Transcript, TranscriptError, TranscriptProvider, extract_video_id};
