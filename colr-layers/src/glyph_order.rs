//! Mapping between glyph names and glyph identifiers

use std::borrow::Cow;

use indexmap::IndexSet;
use write_fonts::types::GlyphId16;

/// Prefix of the names given to glyphs that are not in the glyph order.
const SYNTHETIC_PREFIX: &str = "glyph";

/// The font-wide order of glyphs, by glyph id.
///
/// The name at position `n` is the name of glyph `n`. Glyph ids that are
/// past the end of the order are given synthetic names of the form
/// `glyph00042`, and those names resolve back to their id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlyphOrder {
    names: IndexSet<String>,
}

impl GlyphOrder {
    /// Create a new glyph order from names in glyph id order.
    ///
    /// If a name occurs more than once, later occurrences are renamed by
    /// appending `#1`, `#2`, and so on, so that every glyph id keeps a
    /// unique name.
    pub fn new<T: Into<String>>(names: impl IntoIterator<Item = T>) -> Self {
        let mut order = GlyphOrder::default();
        for name in names {
            let mut name = name.into();
            if order.names.contains(&name) {
                let base = name.clone();
                let mut suffix = 1;
                while order.names.contains(&name) {
                    name = format!("{base}#{suffix}");
                    suffix += 1;
                }
                log::warn!("duplicate glyph name '{base}' in glyph order, renamed to '{name}'");
            }
            order.names.insert(name);
        }
        order
    }

    /// Parse a glyph order from text containing one glyph name per line.
    ///
    /// Surrounding whitespace is trimmed; empty lines and lines starting
    /// with `#` are skipped.
    pub fn from_text(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// The number of glyphs in the order.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// `true` if the order contains no glyphs.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// `true` if this exact name is part of the order.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Returns the id of the glyph with this name.
    ///
    /// Names of the form `glyph00042` that are not part of the order resolve
    /// to the id they encode, but only for ids past the end of the order;
    /// glyphs in the order are only known by their real names.
    pub fn glyph_id(&self, name: &str) -> Option<GlyphId16> {
        match self.names.get_index_of(name) {
            Some(idx) => u16::try_from(idx).ok().map(GlyphId16::new),
            None => parse_synthetic_name(name)
                .filter(|gid| gid.to_u16() as usize >= self.names.len()),
        }
    }

    /// Returns the name of the glyph with this id.
    pub fn glyph_name(&self, gid: GlyphId16) -> Cow<'_, str> {
        match self.names.get_index(gid.to_u16() as usize) {
            Some(name) => Cow::Borrowed(name.as_str()),
            None => Cow::Owned(format!("{SYNTHETIC_PREFIX}{:05}", gid.to_u16())),
        }
    }

    /// Iterate over the glyph names, in glyph id order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }
}

fn parse_synthetic_name(name: &str) -> Option<GlyphId16> {
    let digits = name.strip_prefix(SYNTHETIC_PREFIX)?;
    // only the exact form written by `glyph_name`
    if digits.len() != 5 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u16>().ok().map(GlyphId16::new)
}

impl<'a> FromIterator<&'a str> for GlyphOrder {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        GlyphOrder::new(iter)
    }
}

impl FromIterator<String> for GlyphOrder {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        GlyphOrder::new(iter)
    }
}
