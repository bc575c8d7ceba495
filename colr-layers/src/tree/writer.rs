//! Writing ttx trees as text

use std::fmt::Write;

use super::TreeNode;

const INDENT: &str = "  ";

/// Writes elements as indented XML text, one element per line.
#[derive(Debug, Default)]
pub struct TreeWriter {
    out: String,
    depth: usize,
}

impl TreeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write an element and all of its children.
    ///
    /// Elements without children are written as self-closing tags.
    pub fn write_node(&mut self, node: &TreeNode) {
        if node.is_leaf() {
            self.simple_tag(&node.tag, &node.attributes);
            return;
        }
        self.begin_tag(&node.tag, &node.attributes);
        for child in &node.children {
            self.write_node(child);
        }
        self.end_tag(&node.tag);
    }

    /// Write an opening tag and increase the indentation.
    pub fn begin_tag(&mut self, tag: &str, attributes: &[(String, String)]) {
        self.start_line();
        self.write_open(tag, attributes);
        self.out.push_str(">\n");
        self.depth += 1;
    }

    /// Decrease the indentation and write a closing tag.
    pub fn end_tag(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.start_line();
        // writing to a String can't fail
        let _ = writeln!(self.out, "</{tag}>");
    }

    /// Write a self-closing tag.
    pub fn simple_tag(&mut self, tag: &str, attributes: &[(String, String)]) {
        self.start_line();
        self.write_open(tag, attributes);
        self.out.push_str("/>\n");
    }

    /// Return the text written so far.
    pub fn finish(self) -> String {
        self.out
    }

    fn start_line(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }

    fn write_open(&mut self, tag: &str, attributes: &[(String, String)]) {
        self.out.push('<');
        self.out.push_str(tag);
        for (name, value) in attributes {
            let _ = write!(self.out, " {name}=\"");
            escape_into(value, &mut self.out);
            self.out.push('"');
        }
    }
}

fn escape_into(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            c => out.push(c),
        }
    }
}

/// Write a tree as text.
pub fn to_string(node: &TreeNode) -> String {
    let mut writer = TreeWriter::new();
    writer.write_node(node);
    writer.finish()
}
