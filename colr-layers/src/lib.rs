//! Reading and writing the [COLR] table, version 0.
//!
//! A version 0 `COLR` table maps each base glyph to an ordered list of layers,
//! where each layer is a glyph drawn in a color taken from the `CPAL` palette.
//! On disk this is stored as two flat arrays: one record per base glyph, each
//! pointing at a contiguous run of layer records.
//!
//! This crate converts between three representations of that data:
//!
//! - the binary table ([`ColorTable::decode`] and [`ColorTable::encode`]),
//! - a grouped in-memory model, [`ColorTable`], keyed by glyph name,
//! - a ttx-style XML tree ([`ColorTable::to_tree`], [`ColorTable::from_tree`],
//!   and the text level helpers [`ColorTable::to_xml`] and
//!   [`ColorTable::from_xml`]).
//!
//! Glyph identifiers are resolved to and from names with a [`GlyphOrder`].
//!
//! # Example
//!
//! ```
//! use colr_layers::{ColorTable, GlyphOrder, LayerEntry};
//!
//! let order = GlyphOrder::new([".notdef", "A", "A.red", "A.blue"]);
//! let mut table = ColorTable::new();
//! table.insert(
//!     "A",
//!     vec![LayerEntry::new("A.red", 0), LayerEntry::new("A.blue", 1)],
//! );
//!
//! let bytes = table.encode(&order).unwrap();
//! let decoded = ColorTable::decode(&bytes, &order).unwrap();
//! assert_eq!(decoded, table);
//! ```
//!
//! [COLR]: https://learn.microsoft.com/en-us/typography/opentype/spec/colr

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod decode;
mod encode;
pub mod error;
mod glyph_order;
mod model;
pub mod records;
pub mod tree;

#[cfg(test)]
mod tests;

pub use error::{DecodeError, EncodeError, Error, KeyError, TreeError};
pub use glyph_order::GlyphOrder;
pub use model::{ColorTable, GlyphKey, LayerEntry};
pub use records::RecordArrays;
pub use tree::{Literal, TreeNode};

/// Public re-export of the write-fonts crate.
pub extern crate write_fonts;

/// Public re-export of the font-types crate.
pub use write_fonts::types;
