//! Converting between a color table and a ttx tree

use write_fonts::types::GlyphId16;

use super::{reader, writer, Literal, TreeNode};
use crate::{
    error::{EncodeError, TreeError},
    ColorTable, GlyphOrder, LayerEntry,
};

const TABLE_TAG: &str = "COLR";
const VERSION_TAG: &str = "version";
const COLOR_GLYPH_TAG: &str = "ColorGlyph";
const LAYER_TAG: &str = "layer";

const NAME_ATTR: &str = "name";
const COLOR_ID_ATTR: &str = "colorID";
const VALUE_ATTR: &str = "value";

impl ColorTable {
    /// Convert this table to a ttx tree, rooted at a `COLR` element.
    ///
    /// Base glyphs are written in glyph id order. Every base glyph and every
    /// layer glyph must be part of `order`, as when encoding to binary.
    pub fn to_tree(&self, order: &GlyphOrder) -> Result<TreeNode, EncodeError> {
        let mut root = TreeNode::new(TABLE_TAG)
            .with_child(TreeNode::new(VERSION_TAG).with_attribute(VALUE_ATTR, self.version));
        for (_, name, layers) in self.sorted_by_glyph_id(order)? {
            let mut glyph = TreeNode::new(COLOR_GLYPH_TAG).with_attribute(NAME_ATTR, name);
            for layer in layers {
                glyph.children.push(layer.to_tree(order)?);
            }
            root.children.push(glyph);
        }
        Ok(root)
    }

    /// Build a table from the children of a ttx table element.
    ///
    /// `version` and `ColorGlyph` elements are understood; anything else is
    /// skipped. If a base glyph is defined more than once, the last
    /// definition wins.
    pub fn from_tree(node: &TreeNode, order: &GlyphOrder) -> Result<ColorTable, TreeError> {
        let mut table = ColorTable::new();
        for child in &node.children {
            match child.tag.as_str() {
                VERSION_TAG => {
                    let value = required_attribute(child, VALUE_ATTR)?;
                    table.version = eval_u16(child, VALUE_ATTR, value)?;
                }
                COLOR_GLYPH_TAG => {
                    let name = required_attribute(child, NAME_ATTR)?;
                    let layers = child
                        .children
                        .iter()
                        .filter(|layer| {
                            let is_layer = layer.tag == LAYER_TAG;
                            if !is_layer {
                                log::debug!("skipping <{}> in <{COLOR_GLYPH_TAG}>", layer.tag);
                            }
                            is_layer
                        })
                        .map(|layer| LayerEntry::from_tree(layer, order))
                        .collect::<Result<Vec<_>, _>>()?;
                    if table.insert(name, layers).is_some() {
                        log::warn!("'{name}' is defined more than once, keeping the last one");
                    }
                }
                other => log::debug!("skipping unknown element <{other}>"),
            }
        }
        Ok(table)
    }

    /// Write this table as ttx text.
    pub fn to_xml(&self, order: &GlyphOrder) -> Result<String, EncodeError> {
        self.to_tree(order).map(|tree| writer::to_string(&tree))
    }

    /// Read a table from ttx text whose root element is the table.
    pub fn from_xml(text: &str, order: &GlyphOrder) -> Result<ColorTable, TreeError> {
        let root = reader::parse(text)?;
        if root.tag != TABLE_TAG {
            log::debug!("reading <{}> as a {TABLE_TAG} table", root.tag);
        }
        ColorTable::from_tree(&root, order)
    }
}

impl LayerEntry {
    // an unresolvable name could read back as a different glyph
    fn to_tree(&self, order: &GlyphOrder) -> Result<TreeNode, EncodeError> {
        if order.glyph_id(&self.glyph_name).is_none() {
            return Err(EncodeError::UnknownGlyph(self.glyph_name.clone()));
        }
        Ok(TreeNode::new(LAYER_TAG)
            .with_attribute(NAME_ATTR, &self.glyph_name)
            .with_attribute(COLOR_ID_ATTR, self.palette_index))
    }

    fn from_tree(node: &TreeNode, order: &GlyphOrder) -> Result<LayerEntry, TreeError> {
        let mut glyph_name = None;
        let mut palette_index = None;
        for (attr, value) in &node.attributes {
            match attr.as_str() {
                NAME_ATTR => glyph_name = Some(resolve_glyph_name(value, order)),
                COLOR_ID_ATTR => palette_index = Some(eval_u16(node, attr, value)?),
                _ => {
                    let literal = eval(node, attr, value)?;
                    log::debug!("ignoring <{LAYER_TAG}> attribute {attr}={literal}");
                }
            }
        }
        Ok(LayerEntry {
            glyph_name: glyph_name.ok_or_else(|| missing_attribute(node, NAME_ATTR))?,
            palette_index: palette_index.ok_or_else(|| missing_attribute(node, COLOR_ID_ATTR))?,
        })
    }
}

// a layer glyph may be given by glyph id instead of by name
fn resolve_glyph_name(value: &str, order: &GlyphOrder) -> String {
    if !order.contains(value) && !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(gid) = value.parse::<u16>() {
            return order.glyph_name(GlyphId16::new(gid)).into_owned();
        }
    }
    value.to_owned()
}

fn required_attribute<'a>(
    node: &'a TreeNode,
    attribute: &'static str,
) -> Result<&'a str, TreeError> {
    node.attribute(attribute)
        .ok_or_else(|| missing_attribute(node, attribute))
}

fn missing_attribute(node: &TreeNode, attribute: &'static str) -> TreeError {
    TreeError::MissingAttribute {
        tag: node.tag.clone(),
        attribute,
    }
}

fn eval(node: &TreeNode, attribute: &str, value: &str) -> Result<Literal, TreeError> {
    Literal::parse(value).map_err(|_| TreeError::InvalidLiteral {
        tag: node.tag.clone(),
        attribute: attribute.to_owned(),
        value: value.to_owned(),
    })
}

fn eval_u16(node: &TreeNode, attribute: &str, value: &str) -> Result<u16, TreeError> {
    eval(node, attribute, value)?
        .as_u16()
        .ok_or_else(|| TreeError::InvalidValue {
            tag: node.tag.clone(),
            attribute: attribute.to_owned(),
            value: value.to_owned(),
        })
}
