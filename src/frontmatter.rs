//! Restricted frontmatter parsing.
//!
//! A note may open with a metadata block delimited by `---` lines. Only a
//! small key/value subset is understood: `key: scalar` and
//! `key: [a, b, c]` lines. Anything the parser cannot make sense of degrades
//! to "no frontmatter" with the full original text as the body; malformed
//! metadata must never block an upload.

use std::collections::HashMap;

use serde::Serialize;

/// A single frontmatter value: either a scalar string or a list of strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(String),
    List(Vec<String>),
}

impl Value {
    /// Returns the scalar form, if this value is one.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            Value::List(_) => None,
        }
    }
}

/// Parsed metadata block. Keys are case-sensitive and unique; a duplicate
/// source line overwrites the earlier one.
pub type Frontmatter = HashMap<String, Value>;

/// Result of splitting a note into metadata and body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedNote {
    /// `None` when no block was found or the block was unparseable.
    pub frontmatter: Option<Frontmatter>,
    /// The note text with the metadata block stripped. When no block is
    /// recognised this is the whole original text, unchanged.
    pub body: String,
}

/// Splits `content` into frontmatter and body.
///
/// The block must start at the very first byte: a line containing only `---`,
/// the block lines, then a second `---` line followed by a newline. Any
/// deviation yields `frontmatter: None` and the untouched text; this is a
/// graceful-degradation contract, not an error path.
pub fn parse(content: &str) -> ParsedNote {
    match split_block(content) {
        Some((block, body)) => ParsedNote {
            frontmatter: Some(parse_block(block)),
            body: body.to_string(),
        },
        None => ParsedNote {
            frontmatter: None,
            body: content.to_string(),
        },
    }
}

/// Locates the delimited block. Returns `(block, body)` slices on success.
fn split_block(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix("---\n")?;
    // Adjacent delimiters: an empty block is an empty mapping, not absent.
    if let Some(body) = rest.strip_prefix("---\n") {
        return Some(("", body));
    }
    let end = rest.find("\n---\n")?;
    Some((&rest[..end], &rest[end + "\n---\n".len()..]))
}

fn parse_block(block: &str) -> Frontmatter {
    let mut fields = Frontmatter::new();
    for line in block.lines() {
        let colon = match line.find(':') {
            Some(i) if i > 0 => i,
            _ => continue,
        };
        let key = line[..colon].trim().to_string();
        let raw = line[colon + 1..].trim();
        let value = if raw.starts_with('[') && raw.ends_with(']') {
            let inner = &raw[1..raw.len() - 1];
            if inner.trim().is_empty() {
                Value::List(Vec::new())
            } else {
                Value::List(
                    inner
                        .split(',')
                        .map(|item| strip_quotes(item.trim()).to_string())
                        .collect(),
                )
            }
        } else {
            Value::Scalar(strip_quotes(raw).to_string())
        };
        fields.insert(key, value);
    }
    fields
}

/// Strips a single leading and a single trailing quote character.
fn strip_quotes(value: &str) -> &str {
    let value = value
        .strip_prefix('"')
        .or_else(|| value.strip_prefix('\''))
        .unwrap_or(value);
    value
        .strip_suffix('"')
        .or_else(|| value.strip_suffix('\''))
        .unwrap_or(value)
}
