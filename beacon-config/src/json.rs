//! Minimal JSON parser for configuration documents
//!
//! This is a small recursive-descent parser that handles only the
//! subset needed for device configuration files. It does NOT support
//! the full JSON spec.
//!
//! Supported features:
//! - Top-level object with string keys
//! - String values with the common escapes (\" \\ \/ \n \t \r \b \f)
//! - Integer and floating-point numbers
//! - Booleans and null
//! - Nested objects (bounded depth)
//!
//! NOT supported:
//! - Arrays
//! - \uXXXX unicode escapes
//! - Anything after the closing brace
//!
//! Every allocation the parse makes is bounded by a [`DocumentBudget`];
//! exceeding a bound fails the parse instead of truncating, so a
//! too-large file is indistinguishable from a malformed one at the
//! call site.

use heapless::String;

use crate::document::{Document, DocumentBudget, Key, Value};

/// Maximum object nesting depth
const MAX_DEPTH: usize = 8;

/// Parse failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Input ended mid-document
    UnexpectedEnd,
    /// A character that doesn't belong where it appeared
    UnexpectedCharacter,
    /// Unsupported or malformed string escape
    InvalidEscape,
    /// Malformed number
    InvalidNumber,
    /// Document bytes are not valid UTF-8
    InvalidUtf8,
    /// Raw document longer than the budget allows
    DocumentTooLarge,
    /// More fields than the budget allows
    TooManyFields,
    /// Cumulative string storage over budget
    StringBudgetExceeded,
    /// A single key longer than `MAX_KEY_LEN`
    KeyTooLong,
    /// A single string value longer than `MAX_STRING_LEN`
    StringTooLong,
    /// Objects nested deeper than `MAX_DEPTH`
    TooDeep,
}

impl ParseError {
    /// Human-readable description, for diagnostics
    pub fn description(&self) -> &'static str {
        match self {
            ParseError::UnexpectedEnd => "unexpected end of document",
            ParseError::UnexpectedCharacter => "unexpected character",
            ParseError::InvalidEscape => "invalid string escape",
            ParseError::InvalidNumber => "invalid number",
            ParseError::InvalidUtf8 => "document is not valid UTF-8",
            ParseError::DocumentTooLarge => "document exceeds size budget",
            ParseError::TooManyFields => "too many fields for budget",
            ParseError::StringBudgetExceeded => "string storage over budget",
            ParseError::KeyTooLong => "key too long",
            ParseError::StringTooLong => "string value too long",
            ParseError::TooDeep => "objects nested too deeply",
        }
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.description())
    }
}

/// Parse a JSON document within the given budget
pub fn parse_document(input: &str, budget: DocumentBudget) -> Result<Document, ParseError> {
    if input.len() > budget.max_document_len {
        return Err(ParseError::DocumentTooLarge);
    }

    let mut parser = Parser {
        input,
        pos: 0,
        budget,
        fields: 0,
        string_bytes: 0,
    };

    parser.skip_ws();
    let doc = parser.object(0)?;
    parser.skip_ws();
    if parser.pos != input.len() {
        return Err(ParseError::UnexpectedCharacter);
    }
    Ok(doc)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    budget: DocumentBudget,
    /// Entries decoded so far, nested objects included
    fields: usize,
    /// String bytes stored so far, keys included
    string_bytes: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn expect(&mut self, byte: u8) -> Result<(), ParseError> {
        match self.peek() {
            Some(b) if b == byte => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(ParseError::UnexpectedCharacter),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    fn skip_ws(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    fn object(&mut self, depth: usize) -> Result<Document, ParseError> {
        self.expect(b'{')?;
        let mut doc = Document::new();

        self.skip_ws();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(doc);
        }

        loop {
            self.skip_ws();
            let key: Key = self.string().map_err(|e| match e {
                ParseError::StringTooLong => ParseError::KeyTooLong,
                other => other,
            })?;
            self.skip_ws();
            self.expect(b':')?;
            self.skip_ws();
            let value = self.value(depth)?;

            self.charge(&key, &value)?;
            doc.push(key, value);

            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(doc);
                }
                Some(_) => return Err(ParseError::UnexpectedCharacter),
                None => return Err(ParseError::UnexpectedEnd),
            }
        }
    }

    fn value(&mut self, depth: usize) -> Result<Value, ParseError> {
        match self.peek() {
            Some(b'"') => Ok(Value::Str(self.string()?)),
            Some(b'{') => {
                if depth + 1 >= MAX_DEPTH {
                    return Err(ParseError::TooDeep);
                }
                Ok(Value::Object(self.object(depth + 1)?))
            }
            Some(b't' | b'f') => self.boolean(),
            Some(b'n') => self.null(),
            Some(b'-' | b'0'..=b'9') => self.number(),
            Some(_) => Err(ParseError::UnexpectedCharacter),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    /// Parse a quoted string into a bounded buffer
    ///
    /// Slicing positions are always at ASCII bytes (quote, backslash),
    /// so multi-byte UTF-8 content passes through untouched.
    fn string<const N: usize>(&mut self) -> Result<String<N>, ParseError> {
        self.expect(b'"')?;
        let mut out = String::new();
        let mut start = self.pos;
        loop {
            match self.input.as_bytes().get(self.pos) {
                None => return Err(ParseError::UnexpectedEnd),
                Some(b'"') => {
                    out.push_str(&self.input[start..self.pos])
                        .map_err(|_| ParseError::StringTooLong)?;
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    out.push_str(&self.input[start..self.pos])
                        .map_err(|_| ParseError::StringTooLong)?;
                    self.pos += 1;
                    let escaped = match self.input.as_bytes().get(self.pos) {
                        Some(b'"') => '"',
                        Some(b'\\') => '\\',
                        Some(b'/') => '/',
                        Some(b'n') => '\n',
                        Some(b't') => '\t',
                        Some(b'r') => '\r',
                        Some(b'b') => '\u{0008}',
                        Some(b'f') => '\u{000C}',
                        Some(_) => return Err(ParseError::InvalidEscape),
                        None => return Err(ParseError::UnexpectedEnd),
                    };
                    out.push(escaped).map_err(|_| ParseError::StringTooLong)?;
                    self.pos += 1;
                    start = self.pos;
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn number(&mut self) -> Result<Value, ParseError> {
        let start = self.pos;
        while let Some(b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E') = self.peek() {
            self.pos += 1;
        }
        let text = &self.input[start..self.pos];
        if text.bytes().any(|b| matches!(b, b'.' | b'e' | b'E')) {
            text.parse::<f32>()
                .map(Value::Float)
                .map_err(|_| ParseError::InvalidNumber)
        } else {
            text.parse::<i64>()
                .map(Value::Int)
                .map_err(|_| ParseError::InvalidNumber)
        }
    }

    fn boolean(&mut self) -> Result<Value, ParseError> {
        if self.input[self.pos..].starts_with("true") {
            self.pos += 4;
            Ok(Value::Bool(true))
        } else if self.input[self.pos..].starts_with("false") {
            self.pos += 5;
            Ok(Value::Bool(false))
        } else {
            Err(ParseError::UnexpectedCharacter)
        }
    }

    fn null(&mut self) -> Result<Value, ParseError> {
        if self.input[self.pos..].starts_with("null") {
            self.pos += 4;
            Ok(Value::Null)
        } else {
            Err(ParseError::UnexpectedCharacter)
        }
    }

    /// Charge one decoded entry against the budget
    fn charge(&mut self, key: &Key, value: &Value) -> Result<(), ParseError> {
        self.fields += 1;
        if self.fields > self.budget.max_fields {
            return Err(ParseError::TooManyFields);
        }

        self.string_bytes += key.len();
        if let Value::Str(s) = value {
            self.string_bytes += s.len();
        }
        if self.string_bytes > self.budget.max_string_bytes {
            return Err(ParseError::StringBudgetExceeded);
        }
        Ok(())
    }
}
