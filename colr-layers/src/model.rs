//! The grouped, in-memory form of the table

use std::collections::BTreeMap;

use write_fonts::types::GlyphId16;

use crate::{
    error::{EncodeError, KeyError},
    tree::Literal,
    GlyphOrder,
};

/// A version 0 COLR table: the color layers of each base glyph.
///
/// Base glyphs are keyed by name. The presence of a key, not the length of
/// its layer list, is what marks a glyph as having a color definition; an
/// empty list is a valid value.
///
/// The table has no notion of order between base glyphs. Whenever it is
/// written out, glyphs are sorted by their id in the provided [`GlyphOrder`].
///
/// There is no internal locking: the table is `Send` and `Sync`, and callers
/// that share one table between threads must provide their own exclusion
/// around mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorTable {
    /// The table version. Only version 0 can be encoded.
    pub version: u16,
    layers: BTreeMap<String, Vec<LayerEntry>>,
}

/// One colored layer of a base glyph.
///
/// Layers are painted in order, so later layers are drawn on top of earlier
/// ones.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerEntry {
    /// The glyph drawn for this layer.
    pub glyph_name: String,
    /// Index of the color in the CPAL palette.
    pub palette_index: u16,
}

/// A key used to access the layers of a [`ColorTable`].
///
/// Only glyph names are valid keys. This trait is also implemented for a
/// handful of types that are *not* glyph names (integers, glyph ids and
/// non-string [`Literal`]s) so that callers working with dynamically typed
/// keys get a [`KeyError::InvalidKeyType`] instead of a silent conversion.
pub trait GlyphKey {
    /// Returns the glyph name, or an error if this key is not a name.
    fn glyph_name(&self) -> Result<&str, KeyError>;
}

impl LayerEntry {
    /// The palette index that means "use the text foreground color".
    ///
    /// This is passed through unchanged like any other index.
    pub const FOREGROUND_PALETTE_INDEX: u16 = 0xFFFF;

    pub fn new(glyph_name: impl Into<String>, palette_index: u16) -> Self {
        LayerEntry {
            glyph_name: glyph_name.into(),
            palette_index,
        }
    }

    /// `true` if this layer is drawn in the foreground color.
    pub fn is_foreground(&self) -> bool {
        self.palette_index == Self::FOREGROUND_PALETTE_INDEX
    }
}

impl ColorTable {
    /// Create a new, empty, version 0 table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of base glyphs with a color definition.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// `true` if no glyph has a color definition.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// `true` if this glyph has a color definition, even an empty one.
    pub fn contains(&self, glyph: &str) -> bool {
        self.layers.contains_key(glyph)
    }

    /// Returns the layers of a base glyph.
    pub fn get(&self, key: impl GlyphKey) -> Result<&[LayerEntry], KeyError> {
        let name = key.glyph_name()?;
        self.layers
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| KeyError::KeyNotFound(name.to_owned()))
    }

    /// Set or clear the layers of a base glyph.
    ///
    /// `Some` (including an empty list) replaces any existing layers. `None`
    /// removes the glyph if it is present, and does nothing otherwise.
    pub fn set(
        &mut self,
        key: impl GlyphKey,
        layers: Option<Vec<LayerEntry>>,
    ) -> Result<(), KeyError> {
        let name = key.glyph_name()?;
        match layers {
            Some(layers) => {
                self.layers.insert(name.to_owned(), layers);
            }
            None => {
                self.layers.remove(name);
            }
        }
        Ok(())
    }

    /// Remove a base glyph, returning its layers.
    pub fn remove(&mut self, key: impl GlyphKey) -> Result<Vec<LayerEntry>, KeyError> {
        let name = key.glyph_name()?;
        self.layers
            .remove(name)
            .ok_or_else(|| KeyError::KeyNotFound(name.to_owned()))
    }

    /// Set the layers of a base glyph, returning the previous layers, if any.
    pub fn insert(
        &mut self,
        glyph: impl Into<String>,
        layers: Vec<LayerEntry>,
    ) -> Option<Vec<LayerEntry>> {
        self.layers.insert(glyph.into(), layers)
    }

    /// Iterate over base glyphs and their layers, sorted by glyph name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[LayerEntry])> + '_ {
        self.layers
            .iter()
            .map(|(name, layers)| (name.as_str(), layers.as_slice()))
    }

    /// Iterate over the names of the base glyphs, sorted by name.
    pub fn glyphs(&self) -> impl Iterator<Item = &str> + '_ {
        self.layers.keys().map(String::as_str)
    }

    /// The base glyphs, sorted by their id in `order`.
    ///
    /// This is the order in which base glyphs are written, both to binary
    /// and to ttx.
    pub(crate) fn sorted_by_glyph_id<'a>(
        &'a self,
        order: &GlyphOrder,
    ) -> Result<Vec<(GlyphId16, &'a str, &'a [LayerEntry])>, EncodeError> {
        let mut sorted = self
            .iter()
            .map(|(name, layers)| {
                order
                    .glyph_id(name)
                    .map(|gid| (gid, name, layers))
                    .ok_or_else(|| EncodeError::UnknownGlyph(name.to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        sorted.sort_by_key(|(gid, ..)| *gid);
        Ok(sorted)
    }
}

impl Extend<(String, Vec<LayerEntry>)> for ColorTable {
    fn extend<T: IntoIterator<Item = (String, Vec<LayerEntry>)>>(&mut self, iter: T) {
        self.layers.extend(iter)
    }
}

impl FromIterator<(String, Vec<LayerEntry>)> for ColorTable {
    fn from_iter<T: IntoIterator<Item = (String, Vec<LayerEntry>)>>(iter: T) -> Self {
        ColorTable {
            version: crate::records::VERSION,
            layers: iter.into_iter().collect(),
        }
    }
}

impl GlyphKey for &str {
    fn glyph_name(&self) -> Result<&str, KeyError> {
        Ok(*self)
    }
}

impl GlyphKey for String {
    fn glyph_name(&self) -> Result<&str, KeyError> {
        Ok(self.as_str())
    }
}

impl GlyphKey for &String {
    fn glyph_name(&self) -> Result<&str, KeyError> {
        Ok(self.as_str())
    }
}

impl GlyphKey for Literal {
    fn glyph_name(&self) -> Result<&str, KeyError> {
        match self {
            Literal::Str(name) => Ok(name.as_str()),
            other => Err(KeyError::InvalidKeyType(other.type_name())),
        }
    }
}

impl GlyphKey for &Literal {
    fn glyph_name(&self) -> Result<&str, KeyError> {
        (*self).glyph_name()
    }
}

impl GlyphKey for GlyphId16 {
    fn glyph_name(&self) -> Result<&str, KeyError> {
        Err(KeyError::InvalidKeyType("GlyphId16"))
    }
}

macro_rules! not_a_glyph_key {
    ($($ty:ty),*) => {
        $(
            impl GlyphKey for $ty {
                fn glyph_name(&self) -> Result<&str, KeyError> {
                    Err(KeyError::InvalidKeyType(stringify!($ty)))
                }
            }
        )*
    };
}

not_a_glyph_key!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table() -> ColorTable {
        let mut table = ColorTable::new();
        table.insert(
            "A",
            vec![LayerEntry::new("A.layer0", 0), LayerEntry::new("A.layer1", 1)],
        );
        table.insert("B", vec![]);
        table
    }

    #[test]
    fn send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ColorTable>();
    }

    #[test]
    fn get() {
        let table = make_table();
        assert_eq!(table.get("A").unwrap().len(), 2);
        assert!(table.get("B").unwrap().is_empty());
        assert_eq!(table.get("C"), Err(KeyError::KeyNotFound("C".into())));
    }

    #[test]
    fn non_string_keys() {
        let mut table = make_table();
        assert_eq!(table.get(42), Err(KeyError::InvalidKeyType("i32")));
        assert_eq!(
            table.get(Literal::Int(42)),
            Err(KeyError::InvalidKeyType("int"))
        );
        assert_eq!(
            table.set(GlyphId16::new(1), None),
            Err(KeyError::InvalidKeyType("GlyphId16"))
        );
        assert_eq!(table.remove(1u16), Err(KeyError::InvalidKeyType("u16")));
        assert_eq!(table, make_table());
        assert!(table.get(Literal::Str("B".into())).unwrap().is_empty());
    }

    #[test]
    fn set_none_missing_is_noop() {
        let mut table = make_table();
        table.set("g", None).unwrap();
        assert!(!table.contains("g"));
        assert_eq!(table, make_table());
    }

    #[test]
    fn set_none_removes() {
        let mut table = make_table();
        table.set("A", None).unwrap();
        assert!(!table.contains("A"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn set_replaces() {
        let mut table = make_table();
        table
            .set("B", Some(vec![LayerEntry::new("B.0", 0xFFFF)]))
            .unwrap();
        assert!(table.get("B").unwrap()[0].is_foreground());
        table.set(String::from("C"), Some(Vec::new())).unwrap();
        assert!(table.contains("C"));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn remove() {
        let mut table = make_table();
        assert_eq!(table.remove("B"), Ok(vec![]));
        assert_eq!(table.remove("B"), Err(KeyError::KeyNotFound("B".into())));
        assert_eq!(table.glyphs().collect::<Vec<_>>(), ["A"]);
    }

    #[test]
    fn sorted_by_glyph_id() {
        let table = make_table();
        let order = GlyphOrder::new([".notdef", "B", "A"]);
        let sorted = table.sorted_by_glyph_id(&order).unwrap();
        let names = sorted.iter().map(|(_, name, _)| *name).collect::<Vec<_>>();
        assert_eq!(names, ["B", "A"]);

        let order = GlyphOrder::new([".notdef", "A"]);
        assert!(matches!(
            table.sorted_by_glyph_id(&order),
            Err(EncodeError::UnknownGlyph(name)) if name == "B"
        ));
    }

    #[test]
    #[cfg(feature = "serde")]
    fn serde_roundtrip() {
        let table = make_table();
        let json = serde_json::to_string(&table).unwrap();
        let loaded: ColorTable = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, table);
    }
}
