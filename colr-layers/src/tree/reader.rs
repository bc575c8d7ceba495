//! Reading ttx trees from text
//!
//! This handles the subset of XML that appears in ttx files: elements,
//! attributes, comments, processing instructions and a doctype are
//! understood; text content is skipped.

use crate::error::TreeError;

use super::TreeNode;

/// The deepest nesting of elements that will be read.
const MAX_DEPTH: usize = 64;

/// Parse text containing a single root element.
pub fn parse(text: &str) -> Result<TreeNode, TreeError> {
    let mut parser = Parser { text, pos: 0 };
    parser.parse_document()
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn parse_document(&mut self) -> Result<TreeNode, TreeError> {
        if self.rest().starts_with('\u{feff}') {
            self.pos += '\u{feff}'.len_utf8();
        }
        self.skip_misc()?;
        if !self.rest().starts_with('<') {
            return Err(self.error("expected a root element"));
        }
        let root = self.parse_element(1)?;
        self.skip_misc()?;
        if !self.rest().is_empty() {
            return Err(self.error("unexpected content after the root element"));
        }
        Ok(root)
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn error(&self, message: impl Into<String>) -> TreeError {
        let consumed = &self.text[..self.pos];
        let line = consumed.matches('\n').count() + 1;
        let line_start = consumed.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = consumed[line_start..].chars().count() + 1;
        TreeError::Syntax {
            line,
            column,
            message: message.into(),
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn expect(&mut self, token: &str) -> Result<(), TreeError> {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            Ok(())
        } else {
            Err(self.error(format!("expected '{token}'")))
        }
    }

    // skip everything up to and including `end`
    fn skip_past(&mut self, end: &str, what: &str) -> Result<(), TreeError> {
        match self.rest().find(end) {
            Some(idx) => {
                self.pos += idx + end.len();
                Ok(())
            }
            None => Err(self.error(format!("unterminated {what}"))),
        }
    }

    // whitespace, comments, processing instructions and doctypes outside the root
    fn skip_misc(&mut self) -> Result<(), TreeError> {
        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.starts_with("<!--") {
                self.skip_past("-->", "comment")?;
            } else if rest.starts_with("<?") {
                self.skip_past("?>", "processing instruction")?;
            } else if rest.starts_with("<!DOCTYPE") {
                self.skip_past(">", "doctype")?;
            } else {
                return Ok(());
            }
        }
    }

    fn parse_name(&mut self) -> Result<&'a str, TreeError> {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|(i, c)| !is_name_char(*c, *i == 0))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(self.error("expected a name"));
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.text[start..start + len])
    }

    fn parse_element(&mut self, depth: usize) -> Result<TreeNode, TreeError> {
        self.expect("<")?;
        let mut node = TreeNode::new(self.parse_name()?);

        loop {
            let had_space = !self.rest().starts_with(|c: char| !c.is_whitespace());
            self.skip_whitespace();
            if self.rest().starts_with("/>") {
                self.pos += 2;
                return Ok(node);
            }
            if self.rest().starts_with('>') {
                self.pos += 1;
                break;
            }
            if !had_space {
                return Err(self.error("expected whitespace before attribute"));
            }
            let attr_pos = self.pos;
            let name = self.parse_name()?.to_owned();
            self.skip_whitespace();
            self.expect("=")?;
            self.skip_whitespace();
            let value = self.parse_attribute_value()?;
            if node.attribute(&name).is_some() {
                self.pos = attr_pos;
                return Err(self.error(format!("duplicate attribute '{name}'")));
            }
            node.attributes.push((name, value));
        }

        loop {
            let rest = self.rest();
            if rest.is_empty() {
                return Err(self.error(format!("unclosed element <{}>", node.tag)));
            } else if rest.starts_with("</") {
                self.pos += 2;
                let close_pos = self.pos;
                let name = self.parse_name()?;
                if name != node.tag {
                    let message = format!("expected </{}>, found </{name}>", node.tag);
                    self.pos = close_pos;
                    return Err(self.error(message));
                }
                self.skip_whitespace();
                self.expect(">")?;
                return Ok(node);
            } else if rest.starts_with("<!--") {
                self.skip_past("-->", "comment")?;
            } else if rest.starts_with("<![CDATA[") {
                self.skip_past("]]>", "CDATA section")?;
            } else if rest.starts_with("<?") {
                self.skip_past("?>", "processing instruction")?;
            } else if rest.starts_with('<') {
                if depth >= MAX_DEPTH {
                    return Err(self.error(format!("elements nested more than {MAX_DEPTH} deep")));
                }
                let child = self.parse_element(depth + 1)?;
                node.children.push(child);
            } else {
                let len = rest.find('<').unwrap_or(rest.len());
                let text = &rest[..len];
                if !text.trim().is_empty() {
                    log::debug!("ignoring text content in <{}>: '{}'", node.tag, text.trim());
                }
                self.pos += len;
            }
        }
    }

    fn parse_attribute_value(&mut self) -> Result<String, TreeError> {
        let Some(quote) = self.rest().chars().next().filter(|c| *c == '"' || *c == '\'') else {
            return Err(self.error("expected a quoted attribute value"));
        };
        self.pos += 1;
        let rest = self.rest();
        let Some(len) = rest.find(quote) else {
            return Err(self.error("unterminated attribute value"));
        };
        let raw = &rest[..len];
        if raw.contains('<') {
            return Err(self.error("'<' is not allowed in attribute values"));
        }
        let value = unescape(raw).map_err(|message| self.error(message))?;
        self.pos += len + 1;
        Ok(value)
    }
}

fn is_name_char(c: char, first: bool) -> bool {
    if first {
        c.is_alphabetic() || c == '_' || c == ':'
    } else {
        c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.')
    }
}

fn unescape(raw: &str) -> Result<String, String> {
    if !raw.contains('&') {
        return Ok(raw.to_owned());
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let Some(semi) = rest.find(';') else {
            return Err("unterminated entity reference".into());
        };
        let entity = &rest[1..semi];
        let decoded = match entity {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            _ => entity
                .strip_prefix("#x")
                .map(|hex| u32::from_str_radix(hex, 16))
                .or_else(|| entity.strip_prefix('#').map(str::parse::<u32>))
                .and_then(Result::ok)
                .and_then(char::from_u32)
                .ok_or_else(|| format!("unknown entity '&{entity};'"))?,
        };
        out.push(decoded);
        rest = &rest[semi + 1..];
    }
    out.push_str(rest);
    Ok(out)
}
