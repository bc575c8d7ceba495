//! The flat record arrays of a version 0 COLR table.
//!
//! This is the binary layer: records here refer to glyphs by id, and base
//! glyph records refer to layers by index. [`ColorTable`] resolves both into
//! an owned, grouped representation.
//!
//! [`ColorTable`]: crate::ColorTable

use write_fonts::{
    read::{FontData, ReadError},
    types::GlyphId16,
    validate::{Validate, ValidationCtx},
    FontWrite, TableWriter,
};

/// The only supported table version.
pub const VERSION: u16 = 0;

/// The size of the table header, in bytes.
pub const HEADER_LEN: usize = 14;

const BASE_GLYPH_RECORD_LEN: usize = 6;
const LAYER_RECORD_LEN: usize = 4;

/// [BaseGlyph](https://learn.microsoft.com/en-us/typography/opentype/spec/colr#baseglyph-and-layer-records) record
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BaseGlyphRecord {
    /// Glyph ID of the base glyph.
    pub glyph_id: GlyphId16,
    /// Index (base 0) into the layer records.
    pub first_layer_index: u16,
    /// Number of color layers associated with this glyph.
    pub num_layers: u16,
}

/// [Layer](https://learn.microsoft.com/en-us/typography/opentype/spec/colr#baseglyph-and-layer-records) record
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerRecord {
    /// Glyph ID of the glyph used for a given layer.
    pub glyph_id: GlyphId16,
    /// Index (base 0) for a palette entry in the CPAL table.
    pub palette_index: u16,
}

/// The contents of a version 0 COLR table, as flat arrays.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordArrays {
    pub version: u16,
    pub base_glyph_records: Vec<BaseGlyphRecord>,
    pub layer_records: Vec<LayerRecord>,
}

impl BaseGlyphRecord {
    pub fn new(glyph_id: GlyphId16, first_layer_index: u16, num_layers: u16) -> Self {
        BaseGlyphRecord {
            glyph_id,
            first_layer_index,
            num_layers,
        }
    }

    fn read(data: FontData, pos: usize) -> Result<Self, ReadError> {
        Ok(BaseGlyphRecord {
            glyph_id: GlyphId16::new(data.read_at::<u16>(pos)?),
            first_layer_index: data.read_at(pos + 2)?,
            num_layers: data.read_at(pos + 4)?,
        })
    }

    /// The range of layer record indices covered by this record.
    pub fn layer_range(&self) -> std::ops::Range<usize> {
        let start = self.first_layer_index as usize;
        start..start + self.num_layers as usize
    }
}

impl LayerRecord {
    pub fn new(glyph_id: GlyphId16, palette_index: u16) -> Self {
        LayerRecord {
            glyph_id,
            palette_index,
        }
    }

    fn read(data: FontData, pos: usize) -> Result<Self, ReadError> {
        Ok(LayerRecord {
            glyph_id: GlyphId16::new(data.read_at::<u16>(pos)?),
            palette_index: data.read_at(pos + 2)?,
        })
    }
}

impl RecordArrays {
    /// Read the version field at the start of the table.
    pub fn read_version(data: FontData) -> Result<u16, ReadError> {
        data.read_at(0)
    }

    /// Read the header and both record arrays.
    ///
    /// This does not check the version, or that base glyph records reference
    /// valid layers; that is the job of the caller.
    pub fn read(data: FontData) -> Result<Self, ReadError> {
        let version = Self::read_version(data)?;
        let num_base_glyph_records: u16 = data.read_at(2)?;
        let base_glyph_records_offset: u32 = data.read_at(4)?;
        let layer_records_offset: u32 = data.read_at(8)?;
        let num_layer_records: u16 = data.read_at(12)?;

        let base_glyph_records = read_array(
            data,
            base_glyph_records_offset,
            num_base_glyph_records,
            BASE_GLYPH_RECORD_LEN,
            BaseGlyphRecord::read,
        )?;
        let layer_records = read_array(
            data,
            layer_records_offset,
            num_layer_records,
            LAYER_RECORD_LEN,
            LayerRecord::read,
        )?;
        Ok(RecordArrays {
            version,
            base_glyph_records,
            layer_records,
        })
    }
}

fn read_array<T>(
    data: FontData,
    offset: u32,
    count: u16,
    record_len: usize,
    read_one: impl Fn(FontData, usize) -> Result<T, ReadError>,
) -> Result<Vec<T>, ReadError> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if offset == 0 {
        return Err(ReadError::NullOffset);
    }
    let start = offset as usize;
    let array = data
        .slice(start..start + count as usize * record_len)
        .ok_or(ReadError::OutOfBounds)?;
    (0..count as usize)
        .map(|i| read_one(array, i * record_len))
        .collect()
}

impl FontWrite for BaseGlyphRecord {
    fn write_into(&self, writer: &mut TableWriter) {
        self.glyph_id.to_u16().write_into(writer);
        self.first_layer_index.write_into(writer);
        self.num_layers.write_into(writer);
    }
}

impl FontWrite for LayerRecord {
    fn write_into(&self, writer: &mut TableWriter) {
        self.glyph_id.to_u16().write_into(writer);
        self.palette_index.write_into(writer);
    }
}

// a record array, written behind an offset
struct RecordArray<'a, T>(&'a [T]);

impl<T: FontWrite> FontWrite for RecordArray<'_, T> {
    fn write_into(&self, writer: &mut TableWriter) {
        self.0.write_into(writer)
    }
}

fn write_array_offset<T: FontWrite>(records: &[T], writer: &mut TableWriter) {
    if records.is_empty() {
        0u32.write_into(writer);
    } else {
        writer.write_offset(&RecordArray(records), 4);
    }
}

impl FontWrite for RecordArrays {
    fn write_into(&self, writer: &mut TableWriter) {
        self.version.write_into(writer);
        (self.base_glyph_records.len() as u16).write_into(writer);
        write_array_offset(&self.base_glyph_records, writer);
        write_array_offset(&self.layer_records, writer);
        (self.layer_records.len() as u16).write_into(writer);
    }
}

impl Validate for RecordArrays {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("COLR", |ctx| {
            ctx.in_field("version", |ctx| {
                if self.version != VERSION {
                    ctx.report(format!(
                        "unsupported version {}, expected {VERSION}",
                        self.version
                    ));
                }
            });
            ctx.in_field("base_glyph_records", |ctx| {
                if self.base_glyph_records.len() > u16::MAX as usize {
                    ctx.report("array exceeds max length");
                }
                if !self
                    .base_glyph_records
                    .windows(2)
                    .all(|pair| pair[0].glyph_id < pair[1].glyph_id)
                {
                    ctx.report("records must be sorted by glyph id, without duplicates");
                }
            });
            ctx.in_field("layer_records", |ctx| {
                if self.layer_records.len() > u16::MAX as usize {
                    ctx.report("array exceeds max length");
                }
            });
            ctx.in_field("base_glyph_records", |ctx| {
                ctx.with_array_items(self.base_glyph_records.iter(), |ctx, record| {
                    if record.layer_range().end > self.layer_records.len() {
                        ctx.report("layer range exceeds number of layer records");
                    }
                })
            });
        })
    }
}
