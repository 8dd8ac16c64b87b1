// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Tolerant, pull-based lexer for SAT text
//!
//! The tokenizer never fails: bytes it does not understand become
//! single-character tokens and malformed numbers read as zero.

use serde::Serialize;

/// Literal identifiers that are reported as flags instead of identifiers
const FLAG_WORDS: &[&str] = &["I", "forward", "reversed", "single", "double", "in", "out"];

/// Normalize raw SAT text: CRLF becomes LF and backslash-newline
/// continuations collapse into a single space.
pub fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n").replace("\\\n", " ")
}

/// Token payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TokenKind {
    /// `@<len> <chars>` counted string
    Str(String),
    /// `#`, no link
    Null,
    /// `$<n>` entity pointer; negative values mean no link
    Pointer(i64),
    /// `#abc`, `$abc`, `-abc`: reference-like text that is not a pointer
    Ref(String),
    Number(f64),
    Bool(bool),
    Flag(String),
    Ident(String),
    Char(char),
}

/// A token together with the line it started on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize) -> Self {
        Self { kind, line }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self.kind {
            TokenKind::Number(n) => Some(n),
            _ => None,
        }
    }
}

/// Pull-based tokenizer over normalized SAT text
pub struct Tokenizer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Tokenizer {
    /// Create a tokenizer. The input is normalized first.
    pub fn new(text: &str) -> Self {
        Self {
            chars: normalize(text).chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_at(0) {
            match c {
                ' ' | '\t' | '\r' => self.pos += 1,
                '\n' => {
                    self.line += 1;
                    self.pos += 1;
                }
                _ => break,
            }
        }
    }

    /// Read the next token, or `None` at end of input
    pub fn read_token(&mut self) -> Option<Token> {
        self.skip_whitespace();
        let c = self.peek_at(0)?;
        let line = self.line;
        let next = self.peek_at(1);

        let kind = match c {
            '@' if next.is_some_and(|n| n.is_ascii_digit()) => self.read_string(),
            '#' if !next.is_some_and(is_word_char) => {
                self.pos += 1;
                TokenKind::Null
            }
            '$' if next.is_some_and(|n| n.is_ascii_digit()) => {
                self.pos += 1;
                TokenKind::Pointer(self.read_integer())
            }
            '$' if next == Some('-') && self.peek_at(2).is_some_and(|n| n.is_ascii_digit()) => {
                self.pos += 2;
                TokenKind::Pointer(-self.read_integer())
            }
            '-' if next.is_some_and(|n| n.is_ascii_digit() || n == '.') => self.read_number(),
            '#' | '$' | '-' if next.is_some_and(is_word_char) => self.read_ref(),
            '0'..='9' | '.' => self.read_number(),
            '+' if next.is_some_and(|n| n.is_ascii_digit() || n == '.') => self.read_number(),
            c if c.is_ascii_alphabetic() || c == '_' => self.read_word(),
            c => {
                self.pos += 1;
                TokenKind::Char(c)
            }
        };

        Some(Token::new(kind, line))
    }

    fn read_integer(&mut self) -> i64 {
        let start = self.pos;
        while self.peek_at(0).is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        let digits: String = self.chars[start..self.pos].iter().collect();
        digits.parse().unwrap_or(0)
    }

    fn read_string(&mut self) -> TokenKind {
        self.pos += 1; // '@'
        let len = usize::try_from(self.read_integer()).unwrap_or(0);
        if self.peek_at(0) == Some(' ') {
            self.pos += 1;
        }
        let end = self.pos.saturating_add(len).min(self.chars.len());
        let value: String = self.chars[self.pos..end].iter().collect();
        self.line += value.matches('\n').count();
        self.pos = end;
        TokenKind::Str(value)
    }

    fn read_ref(&mut self) -> TokenKind {
        let start = self.pos;
        self.pos += 1;
        while self.peek_at(0).is_some_and(is_word_char) {
            self.pos += 1;
        }
        TokenKind::Ref(self.chars[start..self.pos].iter().collect())
    }

    fn read_number(&mut self) -> TokenKind {
        let start = self.pos;
        if matches!(self.peek_at(0), Some('-') | Some('+')) {
            self.pos += 1;
        }

        let mut seen_dot = false;
        while let Some(c) = self.peek_at(0) {
            if c.is_ascii_digit() {
                self.pos += 1;
            } else if c == '.' && !seen_dot {
                seen_dot = true;
                self.pos += 1;
            } else {
                break;
            }
        }

        // Exponent only when digits actually follow
        if matches!(self.peek_at(0), Some('e') | Some('E')) {
            let digit_at = if matches!(self.peek_at(1), Some('-') | Some('+')) { 2 } else { 1 };
            if self.peek_at(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                self.pos += digit_at;
                while self.peek_at(0).is_some_and(|c| c.is_ascii_digit()) {
                    self.pos += 1;
                }
            }
        }

        let text: String = self.chars[start..self.pos].iter().collect();
        TokenKind::Number(text.parse().unwrap_or(0.0))
    }

    fn read_word(&mut self) -> TokenKind {
        let start = self.pos;
        while self.peek_at(0).is_some_and(|c| is_word_char(c) || c == '-') {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().collect();

        if matches!(word.as_str(), "T" | "TRUE" | "true") {
            TokenKind::Bool(true)
        } else if matches!(word.as_str(), "F" | "FALSE" | "false") {
            TokenKind::Bool(false)
        } else if FLAG_WORDS.contains(&word.as_str()) {
            TokenKind::Flag(word)
        } else {
            TokenKind::Ident(word)
        }
    }
}

impl Iterator for Tokenizer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.read_token()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Tokenize a whole text blob
pub fn tokenize(text: &str) -> Vec<Token> {
    Tokenizer::new(text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_negative_number_is_single_token() {
        assert_eq!(kinds("-1.5"), vec![TokenKind::Number(-1.5)]);
    }

    #[test]
    fn test_counted_string() {
        assert_eq!(kinds("@5 hello"), vec![TokenKind::Str("hello".into())]);
        // Content is taken verbatim, including separators
        assert_eq!(kinds("@3 a;b x"), vec![
            TokenKind::Str("a;b".into()),
            TokenKind::Ident("x".into()),
        ]);
    }

    #[test]
    fn test_truncated_string_takes_remaining_input() {
        assert_eq!(kinds("@10 abc"), vec![TokenKind::Str("abc".into())]);
    }

    #[test]
    fn test_pointers_and_null() {
        assert_eq!(
            kinds("$12 # $-1"),
            vec![TokenKind::Pointer(12), TokenKind::Null, TokenKind::Pointer(-1)]
        );
    }

    #[test]
    fn test_generic_refs() {
        assert_eq!(
            kinds("#abc $x1 -foo"),
            vec![
                TokenKind::Ref("#abc".into()),
                TokenKind::Ref("$x1".into()),
                TokenKind::Ref("-foo".into()),
            ]
        );
    }

    #[test]
    fn test_bare_dash_is_char() {
        assert_eq!(kinds("- "), vec![TokenKind::Char('-')]);
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(
            kinds("3 .5 -.25 1e3 2.5E-2 +4"),
            vec![
                TokenKind::Number(3.0),
                TokenKind::Number(0.5),
                TokenKind::Number(-0.25),
                TokenKind::Number(1000.0),
                TokenKind::Number(0.025),
                TokenKind::Number(4.0),
            ]
        );
    }

    #[test]
    fn test_malformed_number_reads_as_zero() {
        assert_eq!(kinds("."), vec![TokenKind::Number(0.0)]);
    }

    #[test]
    fn test_exponent_without_digits_is_not_consumed() {
        assert_eq!(
            kinds("1e"),
            vec![TokenKind::Number(1.0), TokenKind::Ident("e".into())]
        );
    }

    #[test]
    fn test_word_overrides() {
        assert_eq!(
            kinds("T false I forward reversed plane-surface"),
            vec![
                TokenKind::Bool(true),
                TokenKind::Bool(false),
                TokenKind::Flag("I".into()),
                TokenKind::Flag("forward".into()),
                TokenKind::Flag("reversed".into()),
                TokenKind::Ident("plane-surface".into()),
            ]
        );
    }

    #[test]
    fn test_unknown_bytes_become_chars() {
        assert_eq!(
            kinds("{ } ; ~"),
            vec![
                TokenKind::Char('{'),
                TokenKind::Char('}'),
                TokenKind::Char(';'),
                TokenKind::Char('~'),
            ]
        );
    }

    #[test]
    fn test_line_tracking() {
        let tokens = tokenize("body $1\r\nlump\\\n $2\nshell");
        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        // The continuation keeps `$2` on the lump line
        assert_eq!(lines, vec![1, 1, 2, 2, 3]);
    }
}
