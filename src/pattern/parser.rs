use crate::error::PatternError;
use serde::{Deserialize, Serialize};

/// Regex used by placeholders declared without one.
pub const DEFAULT_PLACEHOLDER_REGEX: &str = "[^/]+";

/// One piece of a parsed route pattern.
///
/// Serialized untagged so a literal is a bare string and a placeholder is a
/// `{"name": ..., "regex": ...}` object in the route cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segment {
    /// Text matched verbatim
    Literal(String),
    /// Named capture matched against `regex`
    Placeholder {
        /// Parameter name
        name: String,
        /// Regex fragment the segment must match
        regex: String,
    },
}

impl Segment {
    /// Build a placeholder segment
    pub fn placeholder(name: impl Into<String>, regex: impl Into<String>) -> Self {
        Segment::Placeholder {
            name: name.into(),
            regex: regex.into(),
        }
    }

    /// Placeholder name, if this is a placeholder
    #[must_use]
    pub fn placeholder_name(&self) -> Option<&str> {
        match self {
            Segment::Literal(_) => None,
            Segment::Placeholder { name, .. } => Some(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    Text(&'a str),
    Placeholder { name: &'a str, regex: Option<&'a str> },
    Open,
    Close,
}

/// Parse a route pattern into its alternatives, least specific first.
///
/// # Errors
///
/// Returns a [`PatternError`] when brackets do not pair up, an optional part is
/// not trailing or is empty, or a placeholder is malformed.
pub fn parse(pattern: &str) -> Result<Vec<Vec<Segment>>, PatternError> {
    let tokens = tokenize(pattern)?;

    let trailing_closes = tokens
        .iter()
        .rev()
        .take_while(|t| **t == Token::Close)
        .count();
    let body = &tokens[..tokens.len() - trailing_closes];
    if body.contains(&Token::Close) {
        return Err(PatternError::OptionalNotAtEnd);
    }
    let opens = body.iter().filter(|t| **t == Token::Open).count();
    if opens != trailing_closes {
        return Err(PatternError::UnbalancedOptional);
    }

    let parts: Vec<&[Token<'_>]> = body.split(|t| *t == Token::Open).collect();
    if parts.iter().skip(1).any(|p| p.is_empty()) {
        return Err(PatternError::EmptyOptional);
    }

    let mut alternatives = Vec::with_capacity(parts.len());
    let mut current: Vec<Token<'_>> = Vec::new();
    for part in parts {
        current.extend_from_slice(part);
        alternatives.push(to_segments(&current));
    }
    Ok(alternatives)
}

/// Collapse tokens into segments, merging literals that meet across an
/// optional boundary.
fn to_segments(tokens: &[Token<'_>]) -> Vec<Segment> {
    let mut segments = Vec::with_capacity(tokens.len());
    let mut literal = String::new();
    for token in tokens {
        match token {
            Token::Text(text) => literal.push_str(text),
            Token::Placeholder { name, regex } => {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::placeholder(
                    *name,
                    regex.unwrap_or(DEFAULT_PLACEHOLDER_REGEX),
                ));
            }
            Token::Open | Token::Close => {}
        }
    }
    if !literal.is_empty() || segments.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}

fn tokenize(pattern: &str) -> Result<Vec<Token<'_>>, PatternError> {
    let bytes = pattern.as_bytes();
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'[' | b']' | b'{' => {
                if text_start < i {
                    tokens.push(Token::Text(&pattern[text_start..i]));
                }
                if bytes[i] == b'{' {
                    let (token, end) = placeholder(pattern, i)?;
                    tokens.push(token);
                    i = end;
                } else {
                    tokens.push(if bytes[i] == b'[' { Token::Open } else { Token::Close });
                    i += 1;
                }
                text_start = i;
            }
            _ => i += 1,
        }
    }
    if text_start < bytes.len() {
        tokens.push(Token::Text(&pattern[text_start..]));
    }
    Ok(tokens)
}

/// Scan `{ name [: regex] }` starting at the `{` at `start`. Returns the token
/// and the offset just past the closing `}`.
fn placeholder(pattern: &str, start: usize) -> Result<(Token<'_>, usize), PatternError> {
    let malformed = PatternError::MalformedPlaceholder { offset: start };
    let bytes = pattern.as_bytes();
    let skip_ws = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        i
    };

    let name_start = skip_ws(start + 1);
    let mut i = name_start;
    match bytes.get(i) {
        Some(b) if b.is_ascii_alphabetic() || *b == b'_' => i += 1,
        _ => return Err(malformed),
    }
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'-') {
        i += 1;
    }
    let name = &pattern[name_start..i];
    i = skip_ws(i);

    match bytes.get(i) {
        Some(b'}') => Ok((Token::Placeholder { name, regex: None }, i + 1)),
        Some(b':') => {
            let regex_start = i + 1;
            let mut depth = 0usize;
            let mut j = regex_start;
            while j < bytes.len() {
                match bytes[j] {
                    b'{' => depth += 1,
                    b'}' if depth == 0 => {
                        let regex = pattern[regex_start..j].trim();
                        if regex.is_empty() {
                            return Err(malformed);
                        }
                        return Ok((
                            Token::Placeholder {
                                name,
                                regex: Some(regex),
                            },
                            j + 1,
                        ));
                    }
                    b'}' => depth -= 1,
                    _ => {}
                }
                j += 1;
            }
            Err(malformed)
        }
        _ => Err(malformed),
    }
}
