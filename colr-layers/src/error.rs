//! Errors that occur when converting color tables

use write_fonts::read::ReadError;

/// An error that occurs while decoding a binary table.
#[derive(Debug, Clone)]
pub enum DecodeError {
    /// The table version is not 0, the only version this crate understands.
    UnsupportedVersion(u16),
    /// A base glyph record references layers past the end of the layer records.
    Malformed {
        base_glyph: u16,
        first_layer_index: u16,
        num_layers: u16,
        num_layer_records: usize,
    },
    /// The underlying data could not be read.
    Read(ReadError),
}

/// An error that occurs while encoding a table to binary or to a tree.
#[derive(Debug)]
pub enum EncodeError {
    /// A glyph name could not be resolved through the glyph order.
    UnknownGlyph(String),
    /// The flat record arrays failed validation or could not be written.
    Write(write_fonts::error::Error),
}

/// An error from the keyed access methods on [`ColorTable`].
///
/// [`ColorTable`]: crate::ColorTable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// The key was not a glyph name; contains the name of the key's type.
    InvalidKeyType(&'static str),
    /// No layers are defined for this glyph.
    KeyNotFound(String),
}

/// An error that occurs while reading a ttx tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeError {
    /// The text is not well-formed.
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },
    /// A required attribute is absent.
    MissingAttribute {
        tag: String,
        attribute: &'static str,
    },
    /// An attribute value is not a valid literal.
    InvalidLiteral {
        tag: String,
        attribute: String,
        value: String,
    },
    /// An attribute value is a valid literal, but has the wrong type or range.
    InvalidValue {
        tag: String,
        attribute: String,
        value: String,
    },
}

/// Any error produced by this crate.
#[derive(Debug)]
pub enum Error {
    Decode(DecodeError),
    Encode(EncodeError),
    Key(KeyError),
    Tree(TreeError),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::UnsupportedVersion(version) => {
                write!(f, "Unsupported COLR version {version} (only version 0 is supported)")
            }
            DecodeError::Malformed {
                base_glyph,
                first_layer_index,
                num_layers,
                num_layer_records,
            } => write!(
                f,
                "Base glyph {base_glyph} references layers {first_layer_index}..{} but there are only {num_layer_records} layer records",
                *first_layer_index as usize + *num_layers as usize
            ),
            DecodeError::Read(e) => write!(f, "Failed to read COLR data: {e}"),
        }
    }
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::UnknownGlyph(name) => {
                write!(f, "Glyph '{name}' is not in the glyph order")
            }
            EncodeError::Write(e) => write!(f, "Failed to write COLR table: {e}"),
        }
    }
}

impl std::fmt::Display for KeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyError::InvalidKeyType(type_) => write!(f, "expected a glyph name, found {type_}"),
            KeyError::KeyNotFound(name) => write!(f, "no color layers for glyph '{name}'"),
        }
    }
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeError::Syntax {
                line,
                column,
                message,
            } => write!(f, "Syntax error at {line}:{column}: {message}"),
            TreeError::MissingAttribute { tag, attribute } => {
                write!(f, "<{tag}> is missing required attribute '{attribute}'")
            }
            TreeError::InvalidLiteral {
                tag,
                attribute,
                value,
            } => write!(f, "<{tag} {attribute}=\"{value}\"> is not a valid literal"),
            TreeError::InvalidValue {
                tag,
                attribute,
                value,
            } => write!(f, "<{tag} {attribute}=\"{value}\"> has an unexpected value"),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Decode(e) => e.fmt(f),
            Error::Encode(e) => e.fmt(f),
            Error::Key(e) => e.fmt(f),
            Error::Tree(e) => e.fmt(f),
        }
    }
}

impl From<ReadError> for DecodeError {
    fn from(src: ReadError) -> DecodeError {
        DecodeError::Read(src)
    }
}

impl From<write_fonts::error::Error> for EncodeError {
    fn from(src: write_fonts::error::Error) -> EncodeError {
        EncodeError::Write(src)
    }
}

impl From<DecodeError> for Error {
    fn from(src: DecodeError) -> Error {
        Error::Decode(src)
    }
}

impl From<EncodeError> for Error {
    fn from(src: EncodeError) -> Error {
        Error::Encode(src)
    }
}

impl From<KeyError> for Error {
    fn from(src: KeyError) -> Error {
        Error::Key(src)
    }
}

impl From<TreeError> for Error {
    fn from(src: TreeError) -> Error {
        Error::Tree(src)
    }
}

impl std::error::Error for DecodeError {}
impl std::error::Error for KeyError {}
impl std::error::Error for TreeError {}
impl std::error::Error for Error {}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EncodeError::Write(e) => Some(e),
            EncodeError::UnknownGlyph(_) => None,
        }
    }
}
