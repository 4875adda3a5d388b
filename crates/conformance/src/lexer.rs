use std::iter::Peekable;
use std::str::CharIndices;

use unitmatch_matcher::{text_to_number, CodeUnits};

use crate::error::{ConformanceError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Str(CodeUnits),
    Number(f64),
    Ident(String),
    Pattern { source: String, flags: String },
    Dot,
    Comma,
    LParen,
    RParen,
    Minus,
    Arrow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// 1-indexed character column
    pub column: usize,
}

/// Split one case line into tokens. A `#` outside a literal ends the line.
pub fn tokenize(line: &str, line_no: usize) -> Result<Vec<Token>> {
    Lexer {
        chars: line.char_indices().peekable(),
        line,
        line_no,
    }
    .run()
}

struct Lexer<'a> {
    chars: Peekable<CharIndices<'a>>,
    line: &'a str,
    line_no: usize,
}

impl Lexer<'_> {
    fn run(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        while let Some(&(offset, c)) = self.chars.peek() {
            let column = self.column(offset);
            let kind = match c {
                c if c.is_whitespace() => {
                    self.chars.next();
                    continue;
                }
                '#' => break,
                '.' if !self.next_is_digit(offset) => self.single(TokenKind::Dot),
                ',' => self.single(TokenKind::Comma),
                '(' => self.single(TokenKind::LParen),
                ')' => self.single(TokenKind::RParen),
                '-' => self.single(TokenKind::Minus),
                '=' => self.arrow(column)?,
                '\'' | '"' => self.string(c, column)?,
                '/' => self.pattern(column)?,
                c if c.is_ascii_digit() || c == '.' => self.number(offset, column)?,
                c if is_ident_start(c) => self.ident(offset),
                other => {
                    return Err(self.error(column, format!("unexpected character {other:?}")));
                }
            };
            tokens.push(Token { kind, column });
        }

        Ok(tokens)
    }

    fn column(&self, offset: usize) -> usize {
        self.line[..offset].chars().count() + 1
    }

    fn error(&self, column: usize, message: impl Into<String>) -> ConformanceError {
        ConformanceError::parse(self.line_no, column, message)
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.chars.next();
        kind
    }

    fn next_is_digit(&self, offset: usize) -> bool {
        self.line[offset + 1..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit())
    }

    fn next_is_ident_start(&self, offset: usize) -> bool {
        self.line[offset + 1..].chars().next().is_some_and(is_ident_start)
    }

    fn arrow(&mut self, column: usize) -> Result<TokenKind> {
        self.chars.next();
        match self.chars.next() {
            Some((_, '>')) => Ok(TokenKind::Arrow),
            _ => Err(self.error(column, "expected '=>'")),
        }
    }

    fn string(&mut self, quote: char, column: usize) -> Result<TokenKind> {
        self.chars.next();
        let mut units: Vec<u16> = Vec::new();

        loop {
            let Some((_, c)) = self.chars.next() else {
                return Err(self.error(column, "unterminated string literal"));
            };
            match c {
                c if c == quote => break,
                '\\' => self.escape(&mut units, column)?,
                c => {
                    let mut buf = [0u16; 2];
                    units.extend_from_slice(c.encode_utf16(&mut buf));
                }
            }
        }

        Ok(TokenKind::Str(CodeUnits::from(units)))
    }

    fn escape(&mut self, units: &mut Vec<u16>, column: usize) -> Result<()> {
        let Some((_, c)) = self.chars.next() else {
            return Err(self.error(column, "unterminated escape sequence"));
        };
        let unit = match c {
            'n' => u16::from(b'\n'),
            't' => u16::from(b'\t'),
            'r' => u16::from(b'\r'),
            '0' => 0,
            'u' => {
                let mut value = 0u16;
                for _ in 0..4 {
                    let digit = self
                        .chars
                        .next()
                        .and_then(|(_, d)| d.to_digit(16))
                        .ok_or_else(|| self.error(column, "\\u expects four hex digits"))?;
                    value = value * 16 + digit as u16;
                }
                value
            }
            other => {
                let mut buf = [0u16; 2];
                units.extend_from_slice(other.encode_utf16(&mut buf));
                return Ok(());
            }
        };
        units.push(unit);
        Ok(())
    }

    fn pattern(&mut self, column: usize) -> Result<TokenKind> {
        self.chars.next();
        let mut source = String::new();
        let mut in_class = false;

        loop {
            let Some((_, c)) = self.chars.next() else {
                return Err(self.error(column, "unterminated pattern literal"));
            };
            match c {
                '/' if !in_class => break,
                '\\' => {
                    source.push(c);
                    match self.chars.next() {
                        Some((_, escaped)) => source.push(escaped),
                        None => return Err(self.error(column, "unterminated pattern literal")),
                    }
                }
                '[' => {
                    in_class = true;
                    source.push(c);
                }
                ']' => {
                    in_class = false;
                    source.push(c);
                }
                c => source.push(c),
            }
        }

        if source.is_empty() {
            return Err(self.error(column, "empty pattern literal"));
        }

        let mut flags = String::new();
        while let Some(&(_, c)) = self.chars.peek() {
            if !c.is_ascii_alphabetic() {
                break;
            }
            flags.push(c);
            self.chars.next();
        }

        Ok(TokenKind::Pattern { source, flags })
    }

    fn number(&mut self, start: usize, column: usize) -> Result<TokenKind> {
        let mut end = start;
        let mut prev = '\0';
        while let Some(&(offset, c)) = self.chars.peek() {
            let sign_after_exponent = matches!(c, '+' | '-') && matches!(prev, 'e' | 'E');
            if !(c.is_ascii_alphanumeric() || c == '.' || sign_after_exponent) {
                break;
            }
            // A second dot, or a dot followed by a name, ends the literal
            if c == '.'
                && (self.line[start..offset]
                    .contains(|ch: char| matches!(ch, '.' | 'e' | 'E' | 'x' | 'X'))
                    || self.next_is_ident_start(offset))
            {
                break;
            }
            end = offset + c.len_utf8();
            prev = c;
            self.chars.next();
        }

        let literal = &self.line[start..end];
        let value = text_to_number(&CodeUnits::from(literal));
        if value.is_nan() {
            return Err(self.error(column, format!("invalid number literal {literal:?}")));
        }
        Ok(TokenKind::Number(value))
    }

    fn ident(&mut self, start: usize) -> TokenKind {
        let mut end = start;
        while let Some(&(offset, c)) = self.chars.peek() {
            if !is_ident_continue(c) {
                break;
            }
            end = offset + c.len_utf8();
            self.chars.next();
        }
        TokenKind::Ident(self.line[start..end].to_string())
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}
