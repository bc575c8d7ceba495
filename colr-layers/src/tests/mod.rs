//! Tests that move a table through more than one representation.

use colr_test_data::{be_buffer, colr};
use pretty_assertions::assert_eq;

use crate::{tree, ColorTable, GlyphOrder, LayerEntry, Literal};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn simple_order() -> GlyphOrder {
    GlyphOrder::from_text(colr::SIMPLE_GLYPHS)
}

fn smiley_order() -> GlyphOrder {
    GlyphOrder::from_text(colr::SMILEY_GLYPHS)
}

#[test]
fn binary_roundtrip() {
    init_logging();
    let order = simple_order();
    let table = ColorTable::decode(colr::SIMPLE, &order).unwrap();
    assert_eq!(table.encode(&order).unwrap(), colr::SIMPLE);
}

#[test]
fn binary_to_text_and_back() {
    init_logging();
    let order = simple_order();
    let table = ColorTable::decode(colr::SIMPLE, &order).unwrap();
    let text = table.to_xml(&order).unwrap();
    assert_eq!(text, colr::SIMPLE_TTX);

    let reread = ColorTable::from_xml(&text, &order).unwrap();
    assert_eq!(reread, table);
    assert_eq!(reread.encode(&order).unwrap(), colr::SIMPLE);
}

#[test]
fn tree_roundtrip() {
    let order = smiley_order();
    let table = ColorTable::from_xml(colr::HAND_EDITED_TTX, &order).unwrap();
    let tree = table.to_tree(&order).unwrap();
    assert_eq!(ColorTable::from_tree(&tree, &order).unwrap(), table);

    // and once more through text
    let text = tree::to_string(&tree);
    let parsed = tree::parse(&text).unwrap();
    assert_eq!(parsed, tree);
}

#[test]
fn hand_edited_to_binary() {
    init_logging();
    let order = smiley_order();
    let table = ColorTable::from_xml(colr::HAND_EDITED_TTX, &order).unwrap();
    let bytes = table.encode(&order).unwrap();

    let expected = be_buffer! {
        0u16, 2u16, 14u32, 26u32, 4u16,
        // smiley, then 'A & B'
        [1u16, 0, 3],
        [4u16, 3, 1],
        [2u16, 2],
        [3u16, 0],
        [3u16, 0xFFFF],
        [5u16, 1]
    };
    assert_eq!(bytes, expected.as_slice());
    assert_eq!(ColorTable::decode(&bytes, &order).unwrap(), table);
}

#[test]
fn foreground_layers_survive() {
    let order = GlyphOrder::new([".notdef", "a", "a.outline"]);
    let mut table = ColorTable::new();
    table.insert(
        "a",
        vec![LayerEntry::new("a.outline", LayerEntry::FOREGROUND_PALETTE_INDEX)],
    );

    let decoded = ColorTable::decode(&table.encode(&order).unwrap(), &order).unwrap();
    assert!(decoded.get("a").unwrap()[0].is_foreground());

    let text = table.to_xml(&order).unwrap();
    assert!(text.contains("colorID=\"65535\""), "{text}");
    assert_eq!(ColorTable::from_xml(&text, &order).unwrap(), table);
}

#[test]
fn glyphs_without_names_roundtrip() {
    init_logging();
    // glyph ids past the end of the order get generated names
    let order = GlyphOrder::new([".notdef", "A"]);
    let data = be_buffer! {
        0u16, 1u16, 14u32, 20u32, 1u16,
        [1u16, 0, 1],
        [7u16, 0]
    };
    let table = ColorTable::decode(&data, &order).unwrap();
    assert_eq!(table.get("A").unwrap(), &[LayerEntry::new("glyph00007", 0)]);

    let text = table.to_xml(&order).unwrap();
    let reread = ColorTable::from_xml(&text, &order).unwrap();
    assert_eq!(reread.encode(&order).unwrap(), data.as_slice());
}

#[test]
fn edit_then_encode() {
    let order = simple_order();
    let mut table = ColorTable::decode(colr::SIMPLE, &order).unwrap();

    table.set("B", Some(vec![LayerEntry::new("A.layer1", 4)])).unwrap();
    table.set(Literal::from("A"), None).unwrap();
    assert!(table.get(1i64).is_err());

    let decoded = ColorTable::decode(&table.encode(&order).unwrap(), &order).unwrap();
    assert_eq!(decoded.glyphs().collect::<Vec<_>>(), ["B"]);
    assert_eq!(decoded.get("B").unwrap(), &[LayerEntry::new("A.layer1", 4)]);
}

#[test]
fn encoding_is_deterministic() {
    let order = smiley_order();
    let first = ColorTable::from_xml(colr::HAND_EDITED_TTX, &order).unwrap();

    // same content, built in the opposite order
    let mut second = ColorTable::new();
    for (name, layers) in first.iter().collect::<Vec<_>>().into_iter().rev() {
        second.insert(name, layers.to_vec());
    }
    assert_eq!(first.encode(&order).unwrap(), second.encode(&order).unwrap());
    assert_eq!(first.to_xml(&order).unwrap(), second.to_xml(&order).unwrap());
}
