//! Token stream builder for script source
//!
//! Tokenizing never fails. Characters the grammar does not know are emitted as
//! [`TokenKind::Unknown`] tokens so the parser can report them with a line
//! number. Whitespace and `//` line comments are dropped.

use crate::scripting::ast::{Token, TokenKind};
use std::str::Chars;

const KEYWORDS: &[&str] = &["fun"];

/// Lazy token iterator over a source string
///
/// Holds no state beyond its cursor; call [`tokenize`] again to restart.
/// The same text always yields the same tokens.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    chars: Chars<'a>,
    line: usize,
}

/// Tokenize script source text
pub fn tokenize(source: &str) -> Tokens<'_> {
    Tokens {
        chars: source.chars(),
        line: 1,
    }
}

impl<'a> Tokens<'a> {
    fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.chars.clone().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(ch) if ch.is_whitespace() => {
                    self.bump();
                }
                Some('/') if self.peek_second() == Some('/') => {
                    while let Some(ch) = self.peek() {
                        if ch == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    fn string_literal(&mut self, line: usize) -> Token {
        // Opening quote
        self.bump();
        let mut text = String::new();
        while let Some(ch) = self.bump() {
            if ch == '"' {
                return Token::new(TokenKind::StringLiteral, text, line);
            }
            text.push(ch);
        }
        Token::new(TokenKind::UnterminatedString, text, line)
    }

    fn number_literal(&mut self, line: usize) -> Token {
        let mut text = String::new();
        if self.peek() == Some('-') {
            self.bump();
            text.push('-');
        }
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() || ch == '.' {
                text.push(ch);
                self.bump();
            } else {
                break;
            }
        }
        Token::new(TokenKind::NumberLiteral, text, line)
    }

    fn word(&mut self, line: usize) -> Token {
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                text.push(ch);
                self.bump();
            } else {
                break;
            }
        }
        let kind = if KEYWORDS.contains(&text.as_str()) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Token::new(kind, text, line)
    }
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.skip_trivia();
        let line = self.line;
        let ch = self.peek()?;

        let token = match ch {
            '"' => self.string_literal(line),
            c if c.is_ascii_digit() => self.number_literal(line),
            '-' if self.peek_second().is_some_and(|c| c.is_ascii_digit()) => {
                self.number_literal(line)
            }
            c if c.is_alphabetic() || c == '_' => self.word(line),
            '+' if self.peek_second() == Some('=') => {
                self.bump();
                self.bump();
                Token::new(TokenKind::PlusAssign, "+=", line)
            }
            other => {
                self.bump();
                let kind = match other {
                    '.' => TokenKind::Dot,
                    '=' => TokenKind::Assign,
                    ';' => TokenKind::Semicolon,
                    '{' => TokenKind::LeftBrace,
                    '}' => TokenKind::RightBrace,
                    '(' => TokenKind::LeftParen,
                    ')' => TokenKind::RightParen,
                    _ => TokenKind::Unknown,
                };
                Token::new(kind, other.to_string(), line)
            }
        };

        Some(token)
    }
}
