//! The ttx tree representation.
//!
//! A [`ColorTable`](crate::ColorTable) is written to ttx as:
//!
//! ```text
//! <COLR>
//!   <version value="0"/>
//!   <ColorGlyph name="A">
//!     <layer name="A.layer0" colorID="0"/>
//!     <layer name="A.layer1" colorID="1"/>
//!   </ColorGlyph>
//! </COLR>
//! ```

mod convert;
mod literal;
mod node;
mod reader;
mod writer;

pub use literal::{InvalidLiteral, Literal};
pub use node::TreeNode;
pub use reader::parse;
pub use writer::{to_string, TreeWriter};
