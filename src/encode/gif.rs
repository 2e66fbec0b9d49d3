use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::foundation::error::{TokenError, TokenResult};

/// Palette size and GIF muxer flags, traded against file size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GifQuality {
    Ultra,
    #[default]
    High,
    Medium,
}

impl GifQuality {
    pub fn max_colors(self) -> u32 {
        match self {
            Self::Ultra => 256,
            Self::High => 224,
            Self::Medium => 192,
        }
    }

    /// `palettegen` `stats_mode=diff` favours moving regions over static background.
    pub fn diff_stats(self) -> bool {
        matches!(self, Self::Ultra)
    }

    pub fn gif_flags(self) -> Option<&'static str> {
        match self {
            Self::Ultra => Some("+offsetting"),
            Self::High => Some("+transdiff"),
            Self::Medium => None,
        }
    }
}

/// User-facing conversion settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GifSettings {
    /// Seconds into the source; `None` starts at the beginning.
    pub start_sec: Option<f64>,
    /// Seconds into the source; `None` runs to the end.
    pub end_sec: Option<f64>,
    /// Output width in pixels, height follows the aspect ratio.
    pub width: u32,
    pub fps: u32,
    pub quality: GifQuality,
}

impl Default for GifSettings {
    fn default() -> Self {
        Self {
            start_sec: None,
            end_sec: None,
            width: 720,
            fps: 20,
            quality: GifQuality::High,
        }
    }
}

impl GifSettings {
    pub fn validate(&self) -> TokenResult<()> {
        if self.width == 0 {
            return Err(TokenError::validation("gif width must be non-zero"));
        }
        if self.fps == 0 {
            return Err(TokenError::validation("gif fps must be non-zero"));
        }
        for (label, t) in [("start", self.start_sec), ("end", self.end_sec)] {
            if let Some(t) = t
                && !(t.is_finite() && t >= 0.0)
            {
                return Err(TokenError::validation(format!(
                    "gif {label} time must be a non-negative number of seconds"
                )));
            }
        }
        if let (Some(start), Some(end)) = (self.start_sec, self.end_sec)
            && start >= end
        {
            return Err(TokenError::validation(
                "gif start time must be before end time",
            ));
        }
        Ok(())
    }

    fn scale_chain(&self) -> String {
        format!("fps={},scale={}:-1:flags=lanczos", self.fps, self.width)
    }

    fn trim_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        if let Some(start) = self.start_sec {
            args.push("-ss".into());
            args.push(start.to_string().into());
        }
        if let Some(end) = self.end_sec {
            args.push("-to".into());
            args.push(end.to_string().into());
        }
        args
    }
}

/// The two ffmpeg invocations of a palette-based GIF conversion.
///
/// Pass one builds an optimized palette from the scaled, frame-rate limited clip; pass two
/// maps the clip onto that palette with bayer dithering.
#[derive(Clone, Debug, PartialEq)]
pub struct GifPlan {
    pub palette_args: Vec<OsString>,
    pub gif_args: Vec<OsString>,
    pub output: PathBuf,
}

impl GifPlan {
    pub fn new(
        settings: &GifSettings,
        input: &Path,
        palette: &Path,
        output: &Path,
    ) -> TokenResult<Self> {
        settings.validate()?;

        let quality = settings.quality;
        let mut palettegen = format!(
            "{},palettegen=max_colors={}:reserve_transparent=0",
            settings.scale_chain(),
            quality.max_colors()
        );
        if quality.diff_stats() {
            palettegen.push_str(":stats_mode=diff");
        }

        let mut palette_args = os_args(["-i"]);
        palette_args.push(input.into());
        palette_args.extend(settings.trim_args());
        palette_args.push("-vf".into());
        palette_args.push(palettegen.into());
        palette_args.push(palette.into());

        let paletteuse = format!(
            "{}[x];[x][1:v]paletteuse=dither=bayer:bayer_scale=3:diff_mode=rectangle",
            settings.scale_chain()
        );
        let mut gif_args = os_args(["-i"]);
        gif_args.push(input.into());
        gif_args.push("-i".into());
        gif_args.push(palette.into());
        gif_args.extend(settings.trim_args());
        gif_args.push("-lavfi".into());
        gif_args.push(paletteuse.into());
        gif_args.extend(os_args(["-f", "gif"]));
        if let Some(flags) = quality.gif_flags() {
            gif_args.extend(os_args(["-gifflags", flags]));
        }
        gif_args.push(output.into());

        Ok(Self {
            palette_args,
            gif_args,
            output: output.to_path_buf(),
        })
    }
}

fn os_args<const N: usize>(args: [&str; N]) -> Vec<OsString> {
    args.into_iter().map(OsString::from).collect()
}

/// `clip.mp4` becomes `clip.gif` next to it.
pub fn gif_output_path(input: &Path) -> PathBuf {
    input.with_extension("gif")
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> TokenResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Run both passes with the system `ffmpeg`, then remove the intermediate palette.
#[tracing::instrument(skip(plan), fields(output = %plan.output.display()))]
pub fn run_gif_plan(plan: &GifPlan, palette: &Path) -> TokenResult<()> {
    ensure_parent_dir(&plan.output)?;
    if !is_ffmpeg_on_path() {
        return Err(TokenError::collaborator(
            "ffmpeg is required for GIF conversion, but was not found on PATH",
        ));
    }

    tracing::info!("generating palette");
    run_ffmpeg("palettegen", &plan.palette_args)?;
    tracing::info!("encoding gif");
    let encoded = run_ffmpeg("paletteuse", &plan.gif_args);

    if let Err(e) = std::fs::remove_file(palette) {
        tracing::warn!(palette = %palette.display(), "failed to remove palette: {e}");
    }
    encoded
}

fn run_ffmpeg(pass: &str, args: &[OsString]) -> TokenResult<()> {
    let output = Command::new("ffmpeg")
        .args(["-y", "-loglevel", "error"])
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            TokenError::collaborator(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(TokenError::collaborator(format!(
            "ffmpeg {pass} pass exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
