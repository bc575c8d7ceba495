//! Decoding binary tables into the grouped model

use std::collections::BTreeMap;

use write_fonts::read::FontData;

use crate::{
    error::DecodeError,
    records::{RecordArrays, VERSION},
    ColorTable, GlyphOrder, LayerEntry,
};

impl ColorTable {
    /// Decode a binary COLR table.
    ///
    /// Glyph ids are resolved to names with `order`. Decoding either succeeds
    /// completely or fails; there is no partially decoded table.
    pub fn decode(data: &[u8], order: &GlyphOrder) -> Result<ColorTable, DecodeError> {
        let data = FontData::new(data);
        let version = RecordArrays::read_version(data)?;
        if version != VERSION {
            return Err(DecodeError::UnsupportedVersion(version));
        }
        let records = RecordArrays::read(data)?;
        ColorTable::from_records(&records, order)
    }

    /// Group flat record arrays by base glyph.
    ///
    /// If a base glyph appears in more than one record, the last record wins.
    pub fn from_records(
        records: &RecordArrays,
        order: &GlyphOrder,
    ) -> Result<ColorTable, DecodeError> {
        if records.version != VERSION {
            return Err(DecodeError::UnsupportedVersion(records.version));
        }
        let num_layer_records = records.layer_records.len();
        let mut layers_by_glyph: BTreeMap<String, Vec<LayerEntry>> = BTreeMap::new();

        for base in &records.base_glyph_records {
            let Some(layer_records) = records.layer_records.get(base.layer_range()) else {
                return Err(DecodeError::Malformed {
                    base_glyph: base.glyph_id.to_u16(),
                    first_layer_index: base.first_layer_index,
                    num_layers: base.num_layers,
                    num_layer_records,
                });
            };
            let layers: Vec<_> = layer_records
                .iter()
                .map(|layer| {
                    LayerEntry::new(order.glyph_name(layer.glyph_id), layer.palette_index)
                })
                .collect();
            let name = order.glyph_name(base.glyph_id).into_owned();
            if layers_by_glyph.insert(name, layers).is_some() {
                log::warn!(
                    "base glyph {} appears more than once, keeping the last record",
                    base.glyph_id.to_u16()
                );
            }
        }

        let mut table: ColorTable = layers_by_glyph.into_iter().collect();
        table.version = records.version;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use colr_test_data::{be_buffer, colr};
    use pretty_assertions::assert_eq;

    use super::*;

    fn simple_order() -> GlyphOrder {
        GlyphOrder::from_text(colr::SIMPLE_GLYPHS)
    }

    #[test]
    fn decode_simple() {
        let table = ColorTable::decode(colr::SIMPLE, &simple_order()).unwrap();
        assert_eq!(table.version, 0);
        assert_eq!(
            table.get("A").unwrap(),
            &[LayerEntry::new("A.layer0", 0), LayerEntry::new("A.layer1", 1)]
        );
        // an empty layer list still counts as a color definition
        assert!(table.contains("B"));
        assert!(table.get("B").unwrap().is_empty());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn unsupported_version() {
        assert!(matches!(
            ColorTable::decode(colr::VERSION_1, &simple_order()),
            Err(DecodeError::UnsupportedVersion(1))
        ));
    }

    #[test]
    fn layer_index_out_of_range() {
        let err = ColorTable::decode(colr::LAYER_INDEX_OUT_OF_RANGE, &simple_order()).unwrap_err();
        assert!(
            matches!(
                err,
                DecodeError::Malformed {
                    base_glyph: 4,
                    first_layer_index: 1,
                    num_layers: 3,
                    num_layer_records: 2,
                }
            ),
            "{err}"
        );
    }

    #[test]
    fn exactly_at_the_end_is_fine() {
        let data = be_buffer! {
            0u16, 1u16, 14u32, 20u32, 1u16,
            1u16, 1u16, 0u16,   // glyph 1, first layer 1, zero layers
            2u16, 0u16
        };
        let table = ColorTable::decode(&data, &simple_order()).unwrap();
        assert!(table.get("A").unwrap().is_empty());
    }

    #[test]
    fn duplicate_base_glyph_last_wins() {
        let _ = env_logger::builder().is_test(true).try_init();
        let table = ColorTable::decode(colr::DUPLICATE_BASE_GLYPH, &simple_order()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get("A").unwrap(),
            &[LayerEntry::new("A.layer1", LayerEntry::FOREGROUND_PALETTE_INDEX)]
        );
    }

    #[test]
    fn glyphs_outside_the_order() {
        let order = GlyphOrder::new([".notdef", "A"]);
        let table = ColorTable::decode(colr::SIMPLE, &order).unwrap();
        assert_eq!(table.glyphs().collect::<Vec<_>>(), ["A", "glyph00004"]);
        assert_eq!(
            table.get("A").unwrap(),
            &[
                LayerEntry::new("glyph00002", 0),
                LayerEntry::new("glyph00003", 1)
            ]
        );
    }

    #[test]
    fn truncated() {
        let order = simple_order();
        assert!(matches!(
            ColorTable::decode(&[], &order),
            Err(DecodeError::Read(_))
        ));
        assert!(matches!(
            ColorTable::decode(&colr::SIMPLE[..colr::SIMPLE.len() - 1], &order),
            Err(DecodeError::Read(_))
        ));
    }
}
