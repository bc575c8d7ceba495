//! Dump and compile version 0 COLR tables.
//!
//! `dump` reads a raw binary table and writes it as ttx; `compile` goes the
//! other way. Both need the font's glyph order, one glyph name per line.

use std::{io::Write, path::Path};

use colr_layers::{ColorTable, GlyphOrder};

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = flags::ColrTtx::from_env().map_err(Error::new)?;
    match args.subcommand {
        flags::ColrTtxCmd::Dump(cmd) => dump(&cmd),
        flags::ColrTtxCmd::Compile(cmd) => compile(&cmd),
    }
}

fn dump(args: &flags::Dump) -> Result<(), Error> {
    let order = load_glyph_order(&args.glyphs)?;
    let bytes = read_file(&args.input)?;
    let table = ColorTable::decode(&bytes, &order)
        .map_err(|e| Error(format!("{}: {e}", args.input.display())))?;
    log::info!(
        "read {} base glyphs from {}",
        table.len(),
        args.input.display()
    );
    let text = table.to_xml(&order).map_err(Error::new)?;
    match &args.output {
        Some(path) => write_file(path, text.as_bytes()),
        None => std::io::stdout()
            .lock()
            .write_all(text.as_bytes())
            .map_err(Error::new),
    }
}

fn compile(args: &flags::Compile) -> Result<(), Error> {
    let order = load_glyph_order(&args.glyphs)?;
    let text = std::fs::read_to_string(&args.input)
        .map_err(|e| Error(format!("failed to read {}: {e}", args.input.display())))?;
    let table = ColorTable::from_xml(&text, &order)
        .map_err(|e| Error(format!("{}: {e}", args.input.display())))?;
    let bytes = table.encode(&order).map_err(Error::new)?;
    log::info!(
        "wrote {} base glyphs ({} bytes) to {}",
        table.len(),
        bytes.len(),
        args.output.display()
    );
    write_file(&args.output, &bytes)
}

fn load_glyph_order(path: &Path) -> Result<GlyphOrder, Error> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error(format!("failed to read glyph order {}: {e}", path.display())))?;
    let order = GlyphOrder::from_text(&text);
    if order.is_empty() {
        log::warn!("glyph order {} is empty", path.display());
    }
    Ok(order)
}

fn read_file(path: &Path) -> Result<Vec<u8>, Error> {
    std::fs::read(path).map_err(|e| Error(format!("failed to read {}: {e}", path.display())))
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), Error> {
    std::fs::write(path, data)
        .map_err(|e| Error(format!("failed to write {}: {e}", path.display())))
}

#[derive(Debug, Clone)]
struct Error(String);

impl Error {
    fn new(t: impl std::fmt::Display) -> Self {
        Self(t.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for Error {}

mod flags {
    use std::path::PathBuf;

    xflags::xflags! {
        /// Convert version 0 COLR tables to and from ttx
        cmd colr-ttx {
            /// Write a binary COLR table as ttx
            cmd dump {
                /// The raw table data
                required input: PathBuf
                /// Glyph names, one per line, in glyph id order
                required -g, --glyphs glyphs: PathBuf
                /// Where to write the ttx; defaults to stdout
                optional -o, --output output: PathBuf
            }
            /// Compile ttx into a binary COLR table
            cmd compile {
                /// The ttx file, rooted at a COLR element
                required input: PathBuf
                /// Glyph names, one per line, in glyph id order
                required -g, --glyphs glyphs: PathBuf
                /// Where to write the table
                required -o, --output output: PathBuf
            }
        }
    }
}
