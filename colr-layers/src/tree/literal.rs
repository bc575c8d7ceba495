//! Scalar literals in attribute values.
//!
//! ttx files store most attribute values as Python literals. This module
//! evaluates the small subset that can appear there: strings, integers,
//! floats, booleans and `None`.

use std::{fmt::Display, str::FromStr};

/// A scalar literal.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    None,
}

/// An error returned when text is not a valid literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidLiteral(pub String);

impl Literal {
    /// Evaluate a literal.
    ///
    /// Leading and trailing whitespace is ignored.
    pub fn parse(text: &str) -> Result<Literal, InvalidLiteral> {
        let trimmed = text.trim();
        let invalid = || InvalidLiteral(text.to_owned());
        match trimmed {
            "None" => return Ok(Literal::None),
            "True" => return Ok(Literal::Bool(true)),
            "False" => return Ok(Literal::Bool(false)),
            "" => return Err(invalid()),
            _ => (),
        }

        if let Some(quote) = trimmed.chars().next().filter(|c| *c == '\'' || *c == '"') {
            return parse_string(trimmed, quote)
                .map(Literal::Str)
                .ok_or_else(invalid);
        }
        parse_number(trimmed).ok_or_else(invalid)
    }

    /// The name of this literal's type, as it would be reported by Python.
    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::Str(_) => "str",
            Literal::Int(_) => "int",
            Literal::Float(_) => "float",
            Literal::Bool(_) => "bool",
            Literal::None => "NoneType",
        }
    }

    /// Returns the value if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Literal::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value if this is an integer in the range of a `u16`.
    pub fn as_u16(&self) -> Option<u16> {
        self.as_int().and_then(|value| u16::try_from(value).ok())
    }

    /// Returns the value if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::Str(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

fn parse_string(text: &str, quote: char) -> Option<String> {
    let inner = text.strip_prefix(quote)?.strip_suffix(quote)?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next()? {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                '0' => out.push('\0'),
                '\\' => out.push('\\'),
                '\'' => out.push('\''),
                '"' => out.push('"'),
                'x' => {
                    let hex: String = chars.by_ref().take(2).collect();
                    if hex.len() != 2 {
                        return None;
                    }
                    let value = u32::from_str_radix(&hex, 16).ok()?;
                    out.push(char::from_u32(value)?);
                }
                // unknown escapes are kept as written
                other => {
                    out.push('\\');
                    out.push(other);
                }
            },
            c if c == quote => return None,
            c => out.push(c),
        }
    }
    Some(out)
}

fn parse_number(text: &str) -> Option<Literal> {
    let (negative, unsigned) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let digits = strip_underscores(unsigned)?;

    let radix = match digits.get(..2).map(|prefix| prefix.to_ascii_lowercase()) {
        Some(prefix) if prefix == "0x" => Some(16),
        Some(prefix) if prefix == "0o" => Some(8),
        Some(prefix) if prefix == "0b" => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let value = i64::from_str_radix(&digits[2..], radix).ok()?;
        return Some(Literal::Int(if negative { -value } else { value }));
    }

    if digits.is_empty() || !digits.as_bytes()[0].is_ascii_digit() && !digits.starts_with('.') {
        return None;
    }
    if digits.bytes().all(|b| b.is_ascii_digit()) {
        let value: i64 = digits.parse().ok()?;
        return Some(Literal::Int(if negative { -value } else { value }));
    }
    if !digits
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return None;
    }
    let value: f64 = digits.parse().ok()?;
    Some(Literal::Float(if negative { -value } else { value }))
}

// underscores may only separate digits, as in `1_000`
fn strip_underscores(text: &str) -> Option<String> {
    if !text.contains('_') {
        return Some(text.to_owned());
    }
    let bytes = text.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'_' {
            let before = i.checked_sub(1).map(|j| bytes[j]);
            let after = bytes.get(i + 1);
            if !before.is_some_and(|b| b.is_ascii_alphanumeric())
                || !after.is_some_and(|b| b.is_ascii_alphanumeric())
            {
                return None;
            }
        }
    }
    Some(text.replace('_', ""))
}

impl FromStr for Literal {
    type Err = InvalidLiteral;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Literal::parse(s)
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Str(value) => write!(f, "{value:?}"),
            Literal::Int(value) => write!(f, "{value}"),
            Literal::Float(value) => write!(f, "{value:?}"),
            Literal::Bool(true) => f.write_str("True"),
            Literal::Bool(false) => f.write_str("False"),
            Literal::None => f.write_str("None"),
        }
    }
}

impl Display for InvalidLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' is not a valid literal", self.0)
    }
}

impl std::error::Error for InvalidLiteral {}

impl From<&str> for Literal {
    fn from(src: &str) -> Literal {
        Literal::Str(src.to_owned())
    }
}

impl From<i64> for Literal {
    fn from(src: i64) -> Literal {
        Literal::Int(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Literal {
        Literal::parse(text).unwrap()
    }

    #[test]
    fn keywords() {
        assert_eq!(parse("None"), Literal::None);
        assert_eq!(parse(" True "), Literal::Bool(true));
        assert_eq!(parse("False"), Literal::Bool(false));
        assert!(Literal::parse("none").is_err());
    }

    #[test]
    fn integers() {
        assert_eq!(parse("0"), Literal::Int(0));
        assert_eq!(parse("65535"), Literal::Int(65535));
        assert_eq!(parse("-3"), Literal::Int(-3));
        assert_eq!(parse("+7"), Literal::Int(7));
        assert_eq!(parse("0x1F"), Literal::Int(31));
        assert_eq!(parse("0o17"), Literal::Int(15));
        assert_eq!(parse("0b101"), Literal::Int(5));
        assert_eq!(parse("1_000"), Literal::Int(1000));
        assert!(Literal::parse("1__0").is_err());
        assert!(Literal::parse("_1").is_err());
        assert!(Literal::parse("0x").is_err());
        assert!(Literal::parse("99999999999999999999").is_err());
    }

    #[test]
    fn floats() {
        assert_eq!(parse("1.5"), Literal::Float(1.5));
        assert_eq!(parse("-.5"), Literal::Float(-0.5));
        assert_eq!(parse("2e3"), Literal::Float(2000.0));
        assert!(Literal::parse("1.2.3").is_err());
        assert!(Literal::parse("e3").is_err());
    }

    #[test]
    fn strings() {
        assert_eq!(parse("'hello'"), Literal::Str("hello".into()));
        assert_eq!(parse("\"it's\""), Literal::Str("it's".into()));
        assert_eq!(parse(r"'a\nb'"), Literal::Str("a\nb".into()));
        assert_eq!(parse(r"'\x41'"), Literal::Str("A".into()));
        assert_eq!(parse(r"'\q'"), Literal::Str("\\q".into()));
        assert!(Literal::parse("'unterminated").is_err());
        assert!(Literal::parse("'a'b'").is_err());
    }

    #[test]
    fn not_literals() {
        for text in ["", "   ", "A.layer0", "os.system('ls')", "[1, 2]", "--1"] {
            assert!(Literal::parse(text).is_err(), "{text}");
        }
    }

    #[test]
    fn u16_range() {
        assert_eq!(parse("65535").as_u16(), Some(u16::MAX));
        assert_eq!(parse("65536").as_u16(), None);
        assert_eq!(parse("-1").as_u16(), None);
        assert_eq!(parse("'1'").as_u16(), None);
    }

    #[test]
    fn display() {
        assert_eq!(parse("'x'").to_string(), "\"x\"");
        assert_eq!(parse("0x10").to_string(), "16");
        assert_eq!(parse("None").to_string(), "None");
    }
}
