// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Recursive-descent parser for the JavaScript literal subset Sphinx emits.
//!
//! `searchindex.js` is not JSON: object keys are bare identifiers unless they
//! collide with a reserved word or start with a digit. The grammar accepted
//! here is a superset of JSON:
//!
//! ```text
//! file    := ws [ callee ws "(" ] ws value ws [ ")" ] ws [ ";" ] ws EOF
//! callee  := ident ( "." ident )*
//! value   := object | array | string | number | "true" | "false" | "null"
//! object  := "{" [ key ws ":" ws value ( "," key ws ":" ws value )* [","] ] "}"
//! key     := ident | string | digits
//! array   := "[" [ value ( "," value )* [","] ] "]"
//! string  := '"' ... '"' | "'" ... "'"
//! ```
//!
//! The output is a `serde_json::Value`; turning that into typed data is serde's
//! job. Nesting is capped so hostile input cannot blow the stack.

use serde_json::{Map, Number, Value};

use crate::error::{Error, Result};

/// Maximum nesting of objects and arrays.
pub const MAX_DEPTH: usize = 128;

/// Parse a complete `searchindex.js` text (wrapped or bare) into a value.
pub fn parse_literal(src: &str) -> Result<Value> {
    let mut parser = Parser::new(src);
    parser.skip_ws();

    let wrapped = parser.at_callee();
    if wrapped {
        parser.callee()?;
        parser.skip_ws();
        parser.expect(b'(')?;
    }

    parser.skip_ws();
    let value = parser.value(0)?;
    parser.skip_ws();

    if wrapped {
        parser.expect(b')')?;
        parser.skip_ws();
    }
    if parser.peek() == Some(b';') {
        parser.pos += 1;
        parser.skip_ws();
    }
    if let Some(c) = parser.peek() {
        return Err(parser.error(format!("trailing input starting with {:?}", c as char)));
    }

    Ok(value)
}

struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'$'
}

fn is_ident_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'$'
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::parse(self.pos, message)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn expect(&mut self, want: u8) -> Result<()> {
        match self.peek() {
            Some(c) if c == want => {
                self.pos += 1;
                Ok(())
            }
            Some(c) => Err(self.error(format!(
                "expected {:?}, found {:?}",
                want as char, c as char
            ))),
            None => Err(self.error(format!("expected {:?}, found end of input", want as char))),
        }
    }

    fn ident(&mut self) -> Result<&'a str> {
        let start = self.pos;
        match self.peek() {
            Some(c) if is_ident_start(c) => self.pos += 1,
            _ => return Err(self.error("expected identifier")),
        }
        while self.peek().is_some_and(is_ident_continue) {
            self.pos += 1;
        }
        Ok(&self.src[start..self.pos])
    }

    /// An identifier that is not a literal keyword starts a call wrapper.
    fn at_callee(&self) -> bool {
        let rest = &self.bytes[self.pos..];
        let len = rest.iter().take_while(|c| is_ident_continue(**c)).count();
        match rest.first() {
            Some(&c) if is_ident_start(c) => {
                !matches!(&rest[..len], b"true" | b"false" | b"null")
            }
            _ => false,
        }
    }

    /// `Search.setIndex` or any other dotted call target.
    fn callee(&mut self) -> Result<()> {
        let mut path = vec![self.ident()?];
        while self.peek() == Some(b'.') {
            self.pos += 1;
            path.push(self.ident()?);
        }
        tracing::trace!(callee = %path.join("."), "unwrapping index literal");
        Ok(())
    }

    fn value(&mut self, depth: usize) -> Result<Value> {
        if depth > MAX_DEPTH {
            return Err(self.error(format!("nesting deeper than {}", MAX_DEPTH)));
        }
        match self.peek() {
            Some(b'{') => self.object(depth),
            Some(b'[') => self.array(depth),
            Some(b'"') | Some(b'\'') => self.string().map(Value::String),
            Some(c) if c == b'-' || c == b'+' || c == b'.' || c.is_ascii_digit() => self.number(),
            Some(c) if is_ident_start(c) => {
                let word = self.ident()?;
                match word {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    "null" => Ok(Value::Null),
                    other => Err(Error::parse(
                        self.pos - other.len(),
                        format!("unexpected identifier `{}`", other),
                    )),
                }
            }
            Some(c) => Err(self.error(format!("unexpected character {:?}", c as char))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn object(&mut self, depth: usize) -> Result<Value> {
        self.expect(b'{')?;
        let mut map = Map::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(b'}') {
                self.pos += 1;
                return Ok(Value::Object(map));
            }

            let key = self.key()?;
            self.skip_ws();
            self.expect(b':')?;
            self.skip_ws();
            let value = self.value(depth + 1)?;
            map.insert(key, value);

            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {}
                Some(c) => {
                    return Err(self.error(format!("expected ',' or '}}', found {:?}", c as char)))
                }
                None => return Err(self.error("unterminated object")),
            }
        }
    }

    fn key(&mut self) -> Result<String> {
        match self.peek() {
            Some(b'"') | Some(b'\'') => self.string(),
            Some(c) if is_ident_start(c) => self.ident().map(str::to_string),
            Some(c) if c.is_ascii_digit() => {
                let start = self.pos;
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.pos += 1;
                }
                Ok(self.src[start..self.pos].to_string())
            }
            Some(c) => Err(self.error(format!("expected object key, found {:?}", c as char))),
            None => Err(self.error("unterminated object")),
        }
    }

    fn array(&mut self, depth: usize) -> Result<Value> {
        self.expect(b'[')?;
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(b']') {
                self.pos += 1;
                return Ok(Value::Array(items));
            }

            items.push(self.value(depth + 1)?);

            self.skip_ws();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {}
                Some(c) => {
                    return Err(self.error(format!("expected ',' or ']', found {:?}", c as char)))
                }
                None => return Err(self.error("unterminated array")),
            }
        }
    }

    fn string(&mut self) -> Result<String> {
        let quote = match self.peek() {
            Some(q @ (b'"' | b'\'')) => q,
            _ => return Err(self.error("expected string")),
        };
        self.pos += 1;

        let mut out = String::new();
        let mut run_start = self.pos;
        loop {
            match self.peek() {
                None => return Err(self.error("unterminated string")),
                Some(c) if c == quote => {
                    out.push_str(&self.src[run_start..self.pos]);
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    out.push_str(&self.src[run_start..self.pos]);
                    self.pos += 1;
                    self.escape(&mut out)?;
                    run_start = self.pos;
                }
                Some(b'\n') => return Err(self.error("newline in string literal")),
                // Quotes and backslashes are ASCII, so runs always end on a
                // UTF-8 boundary.
                Some(_) => self.pos += 1,
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Result<()> {
        let c = self
            .peek()
            .ok_or_else(|| self.error("unterminated escape sequence"))?;
        self.pos += 1;
        match c {
            b'"' => out.push('"'),
            b'\'' => out.push('\''),
            b'\\' => out.push('\\'),
            b'/' => out.push('/'),
            b'b' => out.push('\u{8}'),
            b'f' => out.push('\u{c}'),
            b'n' => out.push('\n'),
            b'r' => out.push('\r'),
            b't' => out.push('\t'),
            b'u' => {
                let unit = self.hex4()?;
                out.push(self.code_point(unit)?);
            }
            other => {
                return Err(Error::parse(
                    self.pos - 1,
                    format!("invalid escape \\{}", other as char),
                ))
            }
        }
        Ok(())
    }

    fn hex4(&mut self) -> Result<u16> {
        let digits = self
            .src
            .get(self.pos..self.pos + 4)
            .ok_or_else(|| self.error("truncated \\u escape"))?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(self.error(format!("invalid \\u escape {:?}", digits)));
        }
        let unit = u16::from_str_radix(digits, 16)
            .map_err(|_| self.error(format!("invalid \\u escape {:?}", digits)))?;
        self.pos += 4;
        Ok(unit)
    }

    /// Combine a UTF-16 unit with a trailing low surrogate when needed.
    fn code_point(&mut self, unit: u16) -> Result<char> {
        match unit {
            0xD800..=0xDBFF => {
                if self.src.get(self.pos..self.pos + 2) != Some("\\u") {
                    return Err(self.error("unpaired high surrogate"));
                }
                self.pos += 2;
                let low = self.hex4()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(self.error("invalid low surrogate"));
                }
                let c = 0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                char::from_u32(c).ok_or_else(|| self.error("invalid surrogate pair"))
            }
            0xDC00..=0xDFFF => Err(self.error("unpaired low surrogate")),
            _ => char::from_u32(u32::from(unit)).ok_or_else(|| self.error("invalid code point")),
        }
    }

    fn number(&mut self) -> Result<Value> {
        let start = self.pos;
        if matches!(self.peek(), Some(b'-' | b'+')) {
            self.pos += 1;
        }
        let mut is_float = false;
        let mut digits = 0usize;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
            digits += 1;
        }
        if self.peek() == Some(b'.') {
            is_float = true;
            self.pos += 1;
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1;
                digits += 1;
            }
        }
        if digits == 0 {
            return Err(Error::parse(start, "malformed number"));
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            is_float = true;
            self.pos += 1;
            if matches!(self.peek(), Some(b'-' | b'+')) {
                self.pos += 1;
            }
            let exp_start = self.pos;
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1;
            }
            if self.pos == exp_start {
                return Err(Error::parse(start, "malformed exponent"));
            }
        }

        let text = self.src[start..self.pos].trim_start_matches('+');
        if !is_float {
            if let Ok(n) = text.parse::<u64>() {
                return Ok(Value::Number(n.into()));
            }
            if let Ok(n) = text.parse::<i64>() {
                return Ok(Value::Number(n.into()));
            }
        }
        text.parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| Error::parse(start, format!("number out of range: {}", text)))
    }
}
