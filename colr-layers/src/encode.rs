//! Encoding the grouped model into flat record arrays

use crate::{
    error::EncodeError,
    records::{BaseGlyphRecord, LayerRecord, RecordArrays},
    ColorTable, GlyphOrder,
};

impl ColorTable {
    /// Flatten this table into record arrays.
    ///
    /// Base glyph records are sorted by glyph id, and each one points at a
    /// contiguous run of layer records, in the order the layers are stored.
    pub fn to_records(&self, order: &GlyphOrder) -> Result<RecordArrays, EncodeError> {
        let sorted = self.sorted_by_glyph_id(order)?;
        let mut base_glyph_records = Vec::with_capacity(sorted.len());
        let mut layer_records = Vec::new();

        for (glyph_id, _, layers) in sorted {
            // lengths that don't fit are reported when the arrays are validated
            let first_layer_index = u16::try_from(layer_records.len()).unwrap_or(u16::MAX);
            let num_layers = u16::try_from(layers.len()).unwrap_or(u16::MAX);
            base_glyph_records.push(BaseGlyphRecord::new(
                glyph_id,
                first_layer_index,
                num_layers,
            ));
            for layer in layers {
                let layer_glyph = order
                    .glyph_id(&layer.glyph_name)
                    .ok_or_else(|| EncodeError::UnknownGlyph(layer.glyph_name.clone()))?;
                layer_records.push(LayerRecord::new(layer_glyph, layer.palette_index));
            }
        }

        Ok(RecordArrays {
            version: self.version,
            base_glyph_records,
            layer_records,
        })
    }

    /// Encode this table as a binary COLR table.
    ///
    /// The output only depends on the contents of the table and on `order`,
    /// so encoding the same table twice produces identical bytes.
    pub fn encode(&self, order: &GlyphOrder) -> Result<Vec<u8>, EncodeError> {
        let records = self.to_records(order)?;
        write_fonts::dump_table(&records).map_err(EncodeError::Write)
    }
}

#[cfg(test)]
mod tests {
    use colr_test_data::colr;
    use pretty_assertions::assert_eq;
    use write_fonts::types::GlyphId16;

    use super::*;
    use crate::LayerEntry;

    fn simple_order() -> GlyphOrder {
        GlyphOrder::from_text(colr::SIMPLE_GLYPHS)
    }

    fn simple_table() -> ColorTable {
        let mut table = ColorTable::new();
        table.insert(
            "A",
            vec![LayerEntry::new("A.layer0", 0), LayerEntry::new("A.layer1", 1)],
        );
        table.insert("B", vec![]);
        table
    }

    #[test]
    fn flatten_simple() {
        let records = simple_table().to_records(&simple_order()).unwrap();
        assert_eq!(
            records.base_glyph_records,
            [
                BaseGlyphRecord::new(GlyphId16::new(1), 0, 2),
                BaseGlyphRecord::new(GlyphId16::new(4), 2, 0),
            ]
        );
        assert_eq!(
            records.layer_records,
            [
                LayerRecord::new(GlyphId16::new(2), 0),
                LayerRecord::new(GlyphId16::new(3), 1),
            ]
        );
    }

    #[test]
    fn encode_simple() {
        let bytes = simple_table().encode(&simple_order()).unwrap();
        assert_eq!(bytes, colr::SIMPLE);
    }

    #[test]
    fn sorted_by_glyph_id_not_name() {
        let order = GlyphOrder::new([".notdef", "zebra", "apple", "layer"]);
        let mut table = ColorTable::new();
        table.insert("apple", vec![LayerEntry::new("layer", 1)]);
        table.insert("zebra", vec![LayerEntry::new("layer", 2)]);
        let records = table.to_records(&order).unwrap();
        assert_eq!(
            records.base_glyph_records,
            [
                BaseGlyphRecord::new(GlyphId16::new(1), 0, 1),
                BaseGlyphRecord::new(GlyphId16::new(2), 1, 1),
            ]
        );
        assert_eq!(records.layer_records[0].palette_index, 2);
    }

    #[test]
    fn deterministic() {
        let order = simple_order();
        let table = simple_table();
        let mut reversed = ColorTable::new();
        reversed.insert("B", vec![]);
        reversed.insert(
            "A",
            vec![LayerEntry::new("A.layer0", 0), LayerEntry::new("A.layer1", 1)],
        );
        let first = table.encode(&order).unwrap();
        assert_eq!(first, table.encode(&order).unwrap());
        assert_eq!(first, reversed.encode(&order).unwrap());
    }

    #[test]
    fn unknown_base_glyph() {
        let mut table = simple_table();
        table.insert("C", vec![]);
        assert!(matches!(
            table.encode(&simple_order()),
            Err(EncodeError::UnknownGlyph(name)) if name == "C"
        ));
    }

    #[test]
    fn unknown_layer_glyph() {
        let mut table = simple_table();
        table.insert("B", vec![LayerEntry::new("B.layer0", 0)]);
        assert!(matches!(
            table.encode(&simple_order()),
            Err(EncodeError::UnknownGlyph(name)) if name == "B.layer0"
        ));
    }

    #[test]
    fn synthetic_names_for_named_glyphs_are_unknown() {
        let order = GlyphOrder::new([".notdef", "A", "A.layer0"]);
        let mut table = ColorTable::new();
        table.insert("glyph00001", vec![LayerEntry::new("A.layer0", 0)]);
        assert!(matches!(
            table.encode(&order),
            Err(EncodeError::UnknownGlyph(name)) if name == "glyph00001"
        ));

        let mut table = ColorTable::new();
        table.insert("A", vec![LayerEntry::new("glyph2", 0)]);
        assert!(matches!(
            table.encode(&order),
            Err(EncodeError::UnknownGlyph(name)) if name == "glyph2"
        ));

        // ids past the end of the order still round trip
        let mut table = ColorTable::new();
        table.insert("A", vec![LayerEntry::new("glyph00003", 0)]);
        let bytes = table.encode(&order).unwrap();
        assert_eq!(ColorTable::decode(&bytes, &order).unwrap(), table);
    }

    #[test]
    fn other_versions_are_rejected() {
        let mut table = simple_table();
        table.version = 1;
        let err = table.encode(&simple_order()).unwrap_err();
        assert!(matches!(err, EncodeError::Write(_)));
        assert!(err.to_string().contains("unsupported version 1"), "{err}");
    }

    #[test]
    fn too_many_layers() {
        let order = GlyphOrder::new([".notdef", "A", "dot"]);
        let mut table = ColorTable::new();
        table.insert("A", vec![LayerEntry::new("dot", 0); u16::MAX as usize + 1]);
        assert!(matches!(
            table.encode(&order),
            Err(EncodeError::Write(_))
        ));
    }

    #[test]
    fn empty_table() {
        let bytes = ColorTable::new().encode(&GlyphOrder::default()).unwrap();
        assert_eq!(bytes, [0u8; crate::records::HEADER_LEN]);
    }
}
