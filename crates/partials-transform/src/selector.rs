//! Directive string parsing.
//!
//! Grammar:
//!
//! ```text
//! selector := segment ('.' segment)*
//! segment  := identifier | '*' | '{' identifier (',' identifier)* '}'
//! ```
//!
//! Each segment addresses properties at one nesting level: a single name,
//! every property (`*`), or an explicit group (`{name, artist}`).

use std::fmt;
use std::str::FromStr;

use crate::error::SelectorError;

/// One level of a selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Field(String),
    Wildcard,
    Group(Vec<String>),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Wildcard => f.write_str("*"),
            Self::Group(names) => write!(f, "{{{}}}", names.join(",")),
        }
    }
}

/// A parsed directive such as `songs.{name,artist}` or `nested.*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    segments: Vec<Segment>,
}

impl Selector {
    /// Parse a directive string. Surrounding whitespace is ignored, as is
    /// whitespace around group commas.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut segments = Vec::new();
        let mut start = 0;
        let mut open_group: Option<usize> = None;

        for (position, character) in trimmed.char_indices() {
            match character {
                '{' => {
                    if open_group.is_some() {
                        return Err(SelectorError::UnbalancedBrace {
                            input: trimmed.to_string(),
                            position,
                        });
                    }
                    open_group = Some(position);
                }
                '}' => {
                    if open_group.take().is_none() {
                        return Err(SelectorError::UnbalancedBrace {
                            input: trimmed.to_string(),
                            position,
                        });
                    }
                }
                '.' if open_group.is_none() => {
                    segments.push(parse_segment(trimmed, start, position)?);
                    start = position + 1;
                }
                _ => {}
            }
        }

        if let Some(position) = open_group {
            return Err(SelectorError::UnbalancedBrace {
                input: trimmed.to_string(),
                position,
            });
        }
        segments.push(parse_segment(trimmed, start, trimmed.len())?);

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

fn parse_segment(input: &str, start: usize, end: usize) -> Result<Segment, SelectorError> {
    let raw = &input[start..end];
    let text = raw.trim();
    let offset = start + (raw.len() - raw.trim_start().len());

    if text.is_empty() {
        return Err(SelectorError::EmptySegment {
            input: input.to_string(),
            position: start,
        });
    }
    if text == "*" {
        return Ok(Segment::Wildcard);
    }

    if let Some(inner) = text.strip_prefix('{') {
        let Some(inner) = inner.strip_suffix('}') else {
            return Err(SelectorError::UnbalancedBrace {
                input: input.to_string(),
                position: offset,
            });
        };
        if inner.trim().is_empty() {
            return Err(SelectorError::EmptyGroup {
                input: input.to_string(),
                position: offset,
            });
        }

        let mut names: Vec<String> = Vec::new();
        let mut item_start = offset + 1;
        for item in inner.split(',') {
            let name = item.trim();
            let name_offset = item_start + (item.len() - item.trim_start().len());
            if name.is_empty() {
                return Err(SelectorError::EmptySegment {
                    input: input.to_string(),
                    position: name_offset,
                });
            }
            validate_identifier(input, name, name_offset)?;
            if !names.iter().any(|existing| existing == name) {
                names.push(name.to_string());
            }
            item_start += item.len() + 1;
        }
        return Ok(Segment::Group(names));
    }

    validate_identifier(input, text, offset)?;
    Ok(Segment::Field(text.to_string()))
}

fn validate_identifier(input: &str, name: &str, offset: usize) -> Result<(), SelectorError> {
    match name
        .char_indices()
        .find(|(_, character)| is_reserved(*character))
    {
        Some((index, character)) => Err(SelectorError::InvalidCharacter {
            input: input.to_string(),
            character,
            position: offset + index,
        }),
        None => Ok(()),
    }
}

fn is_reserved(character: char) -> bool {
    matches!(character, '{' | '}' | ',' | '.' | '*') || character.is_whitespace()
}

/// Split a comma-delimited directive list, keeping brace groups intact.
///
/// `songs.{name,artist},year` yields `songs.{name,artist}` and `year`.
/// Empty items are skipped.
pub fn split_list(value: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (position, character) in value.char_indices() {
        match character {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                items.push(&value[start..position]);
                start = position + 1;
            }
            _ => {}
        }
    }
    items.push(&value[start..]);
    items
        .into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}
