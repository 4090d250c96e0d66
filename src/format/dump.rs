// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Writer that reproduces Sphinx's `searchindex.js` layout exactly.
//!
//! Three rules make the output byte-compatible with what Sphinx writes:
//!
//! 1. Keys matching `[A-Za-z_][A-Za-z0-9_]*` are bare unless they are a
//!    JavaScript reserved word; every other key is quoted.
//! 2. Object members are sorted by their rendered `key:value` text, not by key.
//!    That is why `"0":4` precedes `"00":6` and `A` precedes `a`.
//! 3. Strings escape `\` and `"`, use short escapes for `\b \f \n \r \t`, and
//!    write every other character outside printable ASCII as lowercase `\uXXXX`
//!    (UTF-16 surrogate pairs above the BMP).

use std::fmt::Write as _;

use serde_json::Value;

/// Words that may not appear as bare keys.
const RESERVED_WORDS: &[&str] = &[
    "abstract", "else", "instanceof", "switch", "boolean", "enum", "int", "synchronized",
    "break", "export", "interface", "this", "byte", "extends", "long", "throw", "case",
    "false", "native", "throws", "catch", "final", "new", "transient", "char", "finally",
    "null", "true", "class", "float", "package", "try", "const", "for", "private", "typeof",
    "continue", "function", "protected", "var", "debugger", "goto", "public", "void",
    "default", "if", "return", "volatile", "delete", "implements", "short", "while", "do",
    "import", "static", "with", "double", "in", "super",
];

/// Render a value as a JavaScript literal.
pub fn dump_literal(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => {
            let _ = write!(out, "{}", n);
        }
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut members: Vec<String> = map
                .iter()
                .map(|(key, value)| {
                    let mut member = String::new();
                    write_key(&mut member, key);
                    member.push(':');
                    write_value(&mut member, value);
                    member
                })
                .collect();
            members.sort_unstable();

            out.push('{');
            out.push_str(&members.join(","));
            out.push('}');
        }
    }
}

/// Whether `key` can be written without quotes.
pub fn is_bare_key(key: &str) -> bool {
    let mut bytes = key.bytes();
    let first_ok = bytes
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == b'_');
    first_ok
        && bytes.all(|c| c.is_ascii_alphanumeric() || c == b'_')
        && !RESERVED_WORDS.contains(&key)
}

fn write_key(out: &mut String, key: &str) {
    if is_bare_key(key) {
        out.push_str(key);
    } else {
        write_string(out, key);
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' '..='~' => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{:04x}", unit);
                }
            }
        }
    }
    out.push('"');
}
