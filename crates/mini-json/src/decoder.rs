//! Single-pass JSON text decoder.
//!
//! Everything goes through [`JsonDecoder::step`], which returns either a
//! complete value or one of the structural tokens `]`, `}`, `:` and `,`.
//! Arrays and objects are assembled by calling `step` in a loop and reacting
//! to the tokens, so there is no separate tokenizer and no lookahead.

use crate::error::JsonError;
use crate::options::DecoderOptions;
use crate::value::{Map, Value};

/// Result of one [`JsonDecoder::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Value(Value),
    CloseArray,
    CloseObject,
    Colon,
    Comma,
}

pub struct JsonDecoder {
    data: String,
    x: usize,
    depth: usize,
    options: DecoderOptions,
}

impl Default for JsonDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonDecoder {
    pub fn new() -> Self {
        Self::with_options(DecoderOptions::default())
    }

    pub fn with_options(options: DecoderOptions) -> Self {
        Self {
            data: String::new(),
            x: 0,
            depth: 0,
            options,
        }
    }

    pub fn options(&self) -> DecoderOptions {
        self.options
    }

    /// Cursor position: the byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.x
    }

    /// Loads new input and moves the cursor to its start.
    pub fn reset(&mut self, input: &str) {
        self.data.clear();
        self.data.push_str(input);
        self.x = 0;
        self.depth = 0;
    }

    /// Decodes the first value in `input`.
    pub fn decode(&mut self, input: &str) -> Result<Value, JsonError> {
        self.reset(input);
        self.read_root()
    }

    /// Same as [`decode`](Self::decode) for raw bytes, which must be UTF-8.
    pub fn decode_bytes(&mut self, input: &[u8]) -> Result<Value, JsonError> {
        let input = std::str::from_utf8(input).map_err(|_| JsonError::InvalidUtf8)?;
        self.decode(input)
    }

    fn read_root(&mut self) -> Result<Value, JsonError> {
        let value = self.read_value()?;
        if self.options.reject_trailing {
            self.skip_whitespace();
            if self.x < self.data.len() {
                return Err(JsonError::MalformedInput(self.x));
            }
        }
        Ok(value)
    }

    /// Reads the next value or structural token.
    ///
    /// One run of whitespace before it is skipped. Structural tokens advance
    /// the cursor by exactly one byte.
    pub fn step(&mut self) -> Result<Token, JsonError> {
        self.skip_whitespace();
        let start = self.x;
        match self.peek()? {
            b'n' => {
                self.read_literal(b"null")?;
                Ok(Token::Value(Value::Null))
            }
            b't' => {
                self.read_literal(b"true")?;
                Ok(Token::Value(Value::Bool(true)))
            }
            b'f' => {
                self.read_literal(b"false")?;
                Ok(Token::Value(Value::Bool(false)))
            }
            b'[' => self.read_arr().map(Token::Value),
            b'{' => self.read_obj().map(Token::Value),
            b'"' => self.read_str().map(|s| Token::Value(Value::String(s))),
            b'-' | b'0'..=b'9' => self.read_num().map(|n| Token::Value(Value::Number(n))),
            b']' => self.structural(Token::CloseArray),
            b'}' => self.structural(Token::CloseObject),
            b':' => self.structural(Token::Colon),
            b',' => self.structural(Token::Comma),
            _ => Err(JsonError::MalformedInput(start)),
        }
    }

    /// Reads a token that must be a value.
    pub fn read_value(&mut self) -> Result<Value, JsonError> {
        let token = self.step()?;
        self.expect_value(token)
    }

    fn expect_value(&self, token: Token) -> Result<Value, JsonError> {
        match token {
            Token::Value(value) => Ok(value),
            // A structural token is one byte, just consumed.
            _ => Err(JsonError::MalformedInput(self.x - 1)),
        }
    }

    fn peek(&self) -> Result<u8, JsonError> {
        self.data
            .as_bytes()
            .get(self.x)
            .copied()
            .ok_or(JsonError::MalformedInput(self.data.len()))
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\r' | b'\n') = self.data.as_bytes().get(self.x) {
            self.x += 1;
        }
    }

    fn skip_digits(&mut self) {
        while let Some(b'0'..=b'9') = self.data.as_bytes().get(self.x) {
            self.x += 1;
        }
    }

    fn structural(&mut self, token: Token) -> Result<Token, JsonError> {
        self.x += 1;
        Ok(token)
    }

    fn read_literal(&mut self, literal: &[u8]) -> Result<(), JsonError> {
        if self.options.strict_literals
            && self.data.as_bytes().get(self.x..self.x + literal.len()) != Some(literal)
        {
            return Err(JsonError::MalformedInput(self.x));
        }
        self.x += literal.len();
        Ok(())
    }

    fn enter(&mut self) -> Result<(), JsonError> {
        self.depth += 1;
        match self.options.max_depth {
            Some(max) if self.depth > max => Err(JsonError::DepthLimitExceeded(max)),
            _ => Ok(()),
        }
    }

    fn read_arr(&mut self) -> Result<Value, JsonError> {
        self.enter()?;
        self.x += 1;
        let mut items = Vec::new();
        loop {
            let token = match self.step()? {
                Token::CloseArray => break,
                Token::Comma => self.step()?,
                token => token,
            };
            items.push(self.expect_value(token)?);
        }
        self.depth -= 1;
        Ok(Value::Array(items))
    }

    fn read_obj(&mut self) -> Result<Value, JsonError> {
        self.enter()?;
        self.x += 1;
        let mut map = Map::new();
        loop {
            let token = match self.step()? {
                Token::CloseObject => break,
                Token::Comma => self.step()?,
                token => token,
            };
            let key = self.expect_value(token)?.into_key();
            // Separator; whatever it is, it is not checked.
            self.step()?;
            let value = self.read_value()?;
            map.insert(key, value);
        }
        self.depth -= 1;
        Ok(Value::Object(map))
    }

    /// Reads a string literal. The cursor is on the opening quote and ends
    /// up just past the closing one.
    ///
    /// Unescaped runs are copied as slices of the input. Every run starts and
    /// ends next to an ASCII quote or backslash, which never occur inside a
    /// multi-byte sequence, so each slice lies on character boundaries.
    fn read_str(&mut self) -> Result<String, JsonError> {
        let mut buf = String::new();
        self.x += 1;
        let mut start = self.x;
        loop {
            match self.peek()? {
                b'\\' => {
                    buf.push_str(&self.data[start..self.x]);
                    self.x += 1;
                    match self.peek()? {
                        b'\\' => buf.push('\\'),
                        b'"' => buf.push('"'),
                        b'r' => buf.push('\r'),
                        b'n' => buf.push('\n'),
                        _ => {
                            return Err(JsonError::UnexpectedEscapeCharacter {
                                position: self.x,
                                found: self.char_at(self.x),
                            })
                        }
                    }
                    self.x += 1;
                    start = self.x;
                }
                b'"' => {
                    buf.push_str(&self.data[start..self.x]);
                    self.x += 1;
                    return Ok(buf);
                }
                _ => self.x += 1,
            }
        }
    }

    /// Reads `-?[0-9]*(\.[0-9]*)?`. No exponent and no leading `+`.
    fn read_num(&mut self) -> Result<f64, JsonError> {
        let start = self.x;
        self.x += 1;
        self.skip_digits();
        if self.data.as_bytes().get(self.x) == Some(&b'.') {
            self.x += 1;
            self.skip_digits();
        }
        self.data[start..self.x]
            .parse::<f64>()
            .map_err(|_| JsonError::MalformedInput(start))
    }

    fn char_at(&self, x: usize) -> char {
        self.data
            .get(x..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}
