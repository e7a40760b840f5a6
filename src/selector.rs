//! Minimal selector support for event delegation and tree queries.
//!
//! Supports comma separated lists of compound selectors built from a tag
//! (or `*`), `#id`, `.class`, `[attr]` and `[attr=value]` parts. Combinators
//! are not supported; delegation only ever needs to test a single element.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Id(String),
    Class(String),
    Attr { name: String, value: Option<String> },
}

/// A single compound selector, e.g. `div.jtk-overlay[data-kind=label]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Compound {
    tag: Option<String>,
    parts: Vec<Part>,
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    alternatives: Vec<Compound>,
}

/// Read-only view of an element, as needed for matching.
pub trait Matchable {
    fn tag(&self) -> &str;
    fn attribute(&self, name: &str) -> Option<&str>;
    fn has_class(&self, class: &str) -> bool;
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self> {
        let mut alternatives = Vec::new();
        for raw in source.split(',') {
            let raw = raw.trim();
            if raw.is_empty() {
                return Err(Error::invalid_selector(source, "empty selector in list"));
            }
            alternatives.push(Compound::parse(raw).map_err(|reason| Error::invalid_selector(source, reason))?);
        }
        Ok(Self {
            source: source.to_string(),
            alternatives,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, element: &impl Matchable) -> bool {
        self.alternatives.iter().any(|c| c.matches(element))
    }
}

impl FromStr for Selector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Selector::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &[char], mut i: usize) -> (String, usize) {
    let start = i;
    while i < chars.len() && is_ident_char(chars[i]) {
        i += 1;
    }
    (chars[start..i].iter().collect(), i)
}

impl Compound {
    fn parse(raw: &str) -> std::result::Result<Self, String> {
        let chars: Vec<char> = raw.chars().collect();
        let mut compound = Compound::default();
        let mut i = 0;

        if chars[0] == '*' {
            i = 1;
        } else if is_ident_char(chars[0]) {
            let (tag, next) = take_ident(&chars, 0);
            compound.tag = Some(tag.to_ascii_lowercase());
            i = next;
        }

        while i < chars.len() {
            match chars[i] {
                '#' | '.' => {
                    let (name, next) = take_ident(&chars, i + 1);
                    if name.is_empty() {
                        return Err(format!("expected a name after '{}'", chars[i]));
                    }
                    compound.parts.push(if chars[i] == '#' { Part::Id(name) } else { Part::Class(name) });
                    i = next;
                }
                '[' => {
                    let close = chars[i..]
                        .iter()
                        .position(|&c| c == ']')
                        .map(|p| p + i)
                        .ok_or_else(|| "unterminated attribute selector".to_string())?;
                    let body: String = chars[i + 1..close].iter().collect();
                    compound.parts.push(parse_attr(&body)?);
                    i = close + 1;
                }
                c if c.is_whitespace() || c == '>' || c == '+' || c == '~' => {
                    return Err("combinators are not supported".to_string());
                }
                c => return Err(format!("unexpected character '{c}'")),
            }
        }
        Ok(compound)
    }

    fn matches(&self, element: &impl Matchable) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        self.parts.iter().all(|part| match part {
            Part::Id(id) => element.attribute("id") == Some(id.as_str()),
            Part::Class(class) => element.has_class(class),
            Part::Attr { name, value: None } => element.attribute(name).is_some(),
            Part::Attr { name, value: Some(v) } => element.attribute(name) == Some(v.as_str()),
        })
    }
}

fn parse_attr(body: &str) -> std::result::Result<Part, String> {
    let (name, value) = match body.split_once('=') {
        Some((n, v)) => {
            let v = v.trim();
            let v = v
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| v.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(v);
            (n.trim(), Some(v.to_string()))
        }
        None => (body.trim(), None),
    };
    if name.is_empty() || !name.chars().all(is_ident_char) {
        return Err(format!("invalid attribute name {name:?}"));
    }
    Ok(Part::Attr {
        name: name.to_string(),
        value,
    })
}
