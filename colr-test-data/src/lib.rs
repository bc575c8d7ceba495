//! test data shared between the colr crates.

pub mod bebuffer;

pub mod colr {

    /// Glyph order used by [`SIMPLE`] and [`SIMPLE_TTX`].
    pub static SIMPLE_GLYPHS: &str = include_str!("../test_data/glyphs/simple.txt");

    /// `{"A": [("A.layer0", 0), ("A.layer1", 1)], "B": []}`
    #[rustfmt::skip]
    pub static SIMPLE: &[u8] = &[
        0x00, 0x00,             // version 0
        0x00, 0x02,             // numBaseGlyphRecords 2
        0x00, 0x00, 0x00, 0x0E, // baseGlyphRecordsOffset 14
        0x00, 0x00, 0x00, 0x1A, // layerRecordsOffset 26
        0x00, 0x02,             // numLayerRecords 2
                                // base glyph records:
        0x00, 0x01,             // glyph 1 ('A')
        0x00, 0x00,             // firstLayerIndex 0
        0x00, 0x02,             // numLayers 2
        0x00, 0x04,             // glyph 4 ('B')
        0x00, 0x02,             // firstLayerIndex 2
        0x00, 0x00,             // numLayers 0
                                // layer records:
        0x00, 0x02,             // glyph 2 ('A.layer0')
        0x00, 0x00,             // paletteIndex 0
        0x00, 0x03,             // glyph 3 ('A.layer1')
        0x00, 0x01,             // paletteIndex 1
    ];

    pub static SIMPLE_TTX: &str = include_str!("../test_data/ttx/simple.ttx");

    /// Base glyph 1 is listed twice; the second record should win.
    #[rustfmt::skip]
    pub static DUPLICATE_BASE_GLYPH: &[u8] = &[
        0x00, 0x00,             // version 0
        0x00, 0x02,             // numBaseGlyphRecords 2
        0x00, 0x00, 0x00, 0x0E, // baseGlyphRecordsOffset 14
        0x00, 0x00, 0x00, 0x1A, // layerRecordsOffset 26
        0x00, 0x02,             // numLayerRecords 2
        0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // glyph 1, layer 0, 1 layer
        0x00, 0x01, 0x00, 0x01, 0x00, 0x01, // glyph 1, layer 1, 1 layer
        0x00, 0x02, 0x00, 0x05, // glyph 2, palette 5
        0x00, 0x03, 0xFF, 0xFF, // glyph 3, foreground
    ];

    /// The second base glyph claims three layers starting at index 1, but
    /// there are only two layer records.
    #[rustfmt::skip]
    pub static LAYER_INDEX_OUT_OF_RANGE: &[u8] = &[
        0x00, 0x00,             // version 0
        0x00, 0x02,             // numBaseGlyphRecords 2
        0x00, 0x00, 0x00, 0x0E, // baseGlyphRecordsOffset 14
        0x00, 0x00, 0x00, 0x1A, // layerRecordsOffset 26
        0x00, 0x02,             // numLayerRecords 2
        0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // glyph 1, layer 0, 1 layer
        0x00, 0x04, 0x00, 0x01, 0x00, 0x03, // glyph 4, layer 1, 3 layers
        0x00, 0x02, 0x00, 0x00,
        0x00, 0x03, 0x00, 0x01,
    ];

    /// A version 1 header; nothing after the version is meaningful.
    #[rustfmt::skip]
    pub static VERSION_1: &[u8] = &[
        0x00, 0x01,             // version 1
        0xFF, 0xFF,             // garbage
        0xFF, 0xFF, 0xFF, 0xFF,
    ];

    /// Glyph order used by [`HAND_EDITED_TTX`].
    pub static SMILEY_GLYPHS: &str = include_str!("../test_data/glyphs/smiley.txt");

    /// ttx as a person might write it: comments, single quotes, entities,
    /// numeric glyph ids and hex literals.
    pub static HAND_EDITED_TTX: &str = include_str!("../test_data/ttx/hand_edited.ttx");
}
