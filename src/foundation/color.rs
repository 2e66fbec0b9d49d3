use std::fmt;

/// 8-bit sRGB triple, the canonical color value both pipelines reduce paint to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert 0..1 float channels (Lottie paint) to 0..255.
    ///
    /// Channels are clamped to `[0, 1]` and rounded half away from zero. Extraction and
    /// rewrite both go through here so keys cannot drift apart.
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        Self::new(to_u8(r), to_u8(g), to_u8(b))
    }

    pub fn key(self) -> ColorKey {
        ColorKey(self)
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Canonical color identity: renders as lowercase `#rrggbb`.
///
/// Only constructible from an [`Rgb8`], so non-paint values like `none` never become keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorKey(Rgb8);

impl ColorKey {
    pub fn rgb(self) -> Rgb8 {
        self.0
    }

    pub fn hex(self) -> String {
        self.0.to_hex()
    }

    /// Parse any CSS spelling [`parse_css_color`] accepts into a key.
    pub fn parse(value: &str) -> Option<Self> {
        parse_css_color(value).map(Rgb8::key)
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0.r, self.0.g, self.0.b)
    }
}

impl serde::Serialize for ColorKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for ColorKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ColorKey::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("\"{s}\" is not a paint color")))
    }
}

/// CSS color keywords recognized in SVG paint attributes.
pub const NAMED_COLORS: &[(&str, Rgb8)] = &[
    ("red", Rgb8::new(0xff, 0x00, 0x00)),
    ("blue", Rgb8::new(0x00, 0x00, 0xff)),
    ("green", Rgb8::new(0x00, 0x80, 0x00)),
    ("yellow", Rgb8::new(0xff, 0xff, 0x00)),
    ("orange", Rgb8::new(0xff, 0xa5, 0x00)),
    ("purple", Rgb8::new(0x80, 0x00, 0x80)),
    ("pink", Rgb8::new(0xff, 0xc0, 0xcb)),
    ("brown", Rgb8::new(0xa5, 0x2a, 0x2a)),
    ("black", Rgb8::new(0x00, 0x00, 0x00)),
    ("white", Rgb8::new(0xff, 0xff, 0xff)),
    ("gray", Rgb8::new(0x80, 0x80, 0x80)),
    ("grey", Rgb8::new(0x80, 0x80, 0x80)),
    ("cyan", Rgb8::new(0x00, 0xff, 0xff)),
    ("magenta", Rgb8::new(0xff, 0x00, 0xff)),
    ("lime", Rgb8::new(0x00, 0xff, 0x00)),
    ("navy", Rgb8::new(0x00, 0x00, 0x80)),
    ("maroon", Rgb8::new(0x80, 0x00, 0x00)),
    ("olive", Rgb8::new(0x80, 0x80, 0x00)),
    ("teal", Rgb8::new(0x00, 0x80, 0x80)),
    ("silver", Rgb8::new(0xc0, 0xc0, 0xc0)),
    ("aqua", Rgb8::new(0x00, 0xff, 0xff)),
    ("fuchsia", Rgb8::new(0xff, 0x00, 0xff)),
    ("darkred", Rgb8::new(0x8b, 0x00, 0x00)),
    ("darkgreen", Rgb8::new(0x00, 0x64, 0x00)),
    ("darkblue", Rgb8::new(0x00, 0x00, 0x8b)),
    ("lightgray", Rgb8::new(0xd3, 0xd3, 0xd3)),
    ("lightgrey", Rgb8::new(0xd3, 0xd3, 0xd3)),
];

pub fn named_color(name: &str) -> Option<Rgb8> {
    NAMED_COLORS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, rgb)| rgb)
}

/// Normalize one SVG paint value to an [`Rgb8`].
///
/// Accepts `#rgb`, `#rrggbb`, `rgb(r, g, b)`, `rgba(r, g, b, a)` and the keywords in
/// [`NAMED_COLORS`]. Returns `None` for `none`, `transparent`, anything already holding a
/// `var(` reference, and every other spelling.
pub fn parse_css_color(value: &str) -> Option<Rgb8> {
    let value = value.trim();
    if value.is_empty() || is_non_paint(value) || value.contains("var(") {
        return None;
    }

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(rgb) = parse_rgb_function(value) {
        return Some(rgb);
    }
    named_color(value)
}

/// `none` and `transparent` are valid paint but never tokenized.
pub fn is_non_paint(value: &str) -> bool {
    value.eq_ignore_ascii_case("none") || value.eq_ignore_ascii_case("transparent")
}

fn parse_hex(hex: &str) -> Option<Rgb8> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |pair: &str| u8::from_str_radix(pair, 16).ok();

    match hex.len() {
        3 => {
            let nibble = |i: usize| byte(&hex[i..=i]).map(|n| n * 17);
            Some(Rgb8::new(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        6 => Some(Rgb8::new(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
        )),
        _ => None,
    }
}

fn parse_rgb_function(value: &str) -> Option<Rgb8> {
    let open = value.find('(')?;
    let name = &value[..open];
    let args = value[open + 1..].strip_suffix(')')?;
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();

    let channels = if name.eq_ignore_ascii_case("rgb") && parts.len() == 3 {
        &parts[..]
    } else if name.eq_ignore_ascii_case("rgba") && parts.len() == 4 {
        if !is_alpha_literal(parts[3]) {
            return None;
        }
        &parts[..3]
    } else {
        return None;
    };

    let r = parse_channel(channels[0])?;
    let g = parse_channel(channels[1])?;
    let b = parse_channel(channels[2])?;
    Some(Rgb8::new(r, g, b))
}

/// Decimal integer channel; values above 255 saturate.
fn parse_channel(s: &str) -> Option<u8> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let trimmed = s.trim_start_matches('0');
    if trimmed.len() > 3 {
        return Some(u8::MAX);
    }
    let v: u16 = if trimmed.is_empty() {
        0
    } else {
        trimmed.parse().ok()?
    };
    Some(v.min(255) as u8)
}

fn is_alpha_literal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit() || b == b'.')
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
