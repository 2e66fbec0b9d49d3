/// Palette-based video to GIF conversion through the system `ffmpeg`.
pub mod gif;
