use std::collections::HashMap;

use crate::foundation::color::{ColorKey, Rgb8};

/// One deduplicated paint color discovered in a document.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DistinctColor {
    pub key: ColorKey,
    pub rgb: Rgb8,
    pub hex: String,
    /// User-assigned token name, empty until bound.
    pub name: String,
    /// Paint sites that resolved to `key` at extraction time.
    pub count: usize,
}

impl DistinctColor {
    fn new(key: ColorKey, count: usize) -> Self {
        Self {
            key,
            rgb: key.rgb(),
            hex: key.hex(),
            name: String::new(),
            count,
        }
    }

    pub fn is_bound(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Insertion-ordered occurrence counter.
#[derive(Debug, Default)]
pub struct PaletteBuilder {
    order: Vec<(ColorKey, usize)>,
    index: HashMap<ColorKey, usize>,
}

impl PaletteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: ColorKey) {
        match self.index.get(&key) {
            Some(&i) => self.order[i].1 += 1,
            None => {
                self.index.insert(key, self.order.len());
                self.order.push((key, 1));
            }
        }
    }

    pub fn total(&self) -> usize {
        self.order.iter().map(|(_, n)| n).sum()
    }

    /// Rank by descending count. The sort is stable, so equal counts keep discovery order.
    pub fn finish(self) -> Vec<DistinctColor> {
        let mut colors: Vec<DistinctColor> = self
            .order
            .into_iter()
            .map(|(key, count)| DistinctColor::new(key, count))
            .collect();
        colors.sort_by(|a, b| b.count.cmp(&a.count));
        colors
    }
}

/// Ordered `ColorKey -> token name` map.
///
/// Names are stored trimmed; binding an empty name removes the entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bindings {
    entries: Vec<(ColorKey, String)>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, key: ColorKey, name: &str) {
        let name = name.trim();
        let pos = self.entries.iter().position(|(k, _)| *k == key);
        match (pos, name.is_empty()) {
            (Some(i), true) => {
                self.entries.remove(i);
            }
            (Some(i), false) => self.entries[i].1 = name.to_owned(),
            (None, true) => {}
            (None, false) => self.entries.push((key, name.to_owned())),
        }
    }

    pub fn get(&self, key: ColorKey) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, n)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColorKey, &str)> {
        self.entries.iter().map(|(k, n)| (*k, n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bindings for every named color in `colors`, in palette order.
    pub fn from_colors(colors: &[DistinctColor]) -> Self {
        let mut out = Self::new();
        for c in colors {
            out.bind(c.key, &c.name);
        }
        out
    }
}

impl<'a> FromIterator<(ColorKey, &'a str)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (ColorKey, &'a str)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (key, name) in iter {
            out.bind(key, name);
        }
        out
    }
}

impl<'de> serde::Deserialize<'de> for Bindings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Keys may be spelled any way the SVG color parser accepts (`red`, `#F00`, `rgb(...)`).
        let raw = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut out = Self::new();
        for (spelling, name) in raw {
            let key = ColorKey::parse(&spelling).ok_or_else(|| {
                serde::de::Error::custom(format!("binding key \"{spelling}\" is not a paint color"))
            })?;
            let name = name.as_str().ok_or_else(|| {
                serde::de::Error::custom(format!("binding for \"{spelling}\" must be a string"))
            })?;
            out.bind(key, name);
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../tests/unit/palette.rs"]
mod tests;
