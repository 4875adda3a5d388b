//! Parser for the case language.
//!
//! ```text
//! case        := call "=>" expectation
//! call        := receiver "." method "(" [literal ("," literal)*] ")"
//! receiver    := literal | "unbound" | "scope"
//! literal     := string | ["-"] number | ["-"] "Infinity" | "NaN"
//!              | "null" | "undefined" | "true" | "false" | pattern
//! expectation := "true" | "false" | "throws" ErrorKind
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use unitmatch_matcher::{MatchErrorKind, Operation};

use crate::case::{Call, Case, Literal, Outcome, Receiver};
use crate::error::{ConformanceError, Result};
use crate::lexer::{tokenize, Token, TokenKind};

/// Arguments beyond search and position are rejected
const MAX_ARGS: usize = 2;

/// Parse a whole case file
pub fn parse_cases(text: &str) -> Result<Vec<Case>> {
    let mut cases = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        cases.push(parse_case(trimmed, line_no)?);
    }
    log::debug!("Parsed {} cases", cases.len());
    Ok(cases)
}

/// Parse one `call => expectation` line
pub fn parse_case(line: &str, line_no: usize) -> Result<Case> {
    let tokens = tokenize(line, line_no)?;
    let mut parser = Parser::new(&tokens, line_no, line);
    let call = parser.call()?;
    parser.expect(&TokenKind::Arrow, "'=>'")?;
    let expected = parser.expectation()?;
    parser.finish()?;

    Ok(Case {
        line: line_no,
        source: line.to_string(),
        call,
        expected,
    })
}

/// Parse a bare call expression
pub fn parse_call(expression: &str) -> Result<Call> {
    let tokens = tokenize(expression, 1)?;
    let mut parser = Parser::new(&tokens, 1, expression);
    let call = parser.call()?;
    parser.finish()?;
    Ok(call)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    line_no: usize,
    end_column: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], line_no: usize, line: &str) -> Self {
        Self {
            tokens,
            pos: 0,
            line_no,
            end_column: line.chars().count() + 1,
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn column(&self) -> usize {
        self.peek().map_or(self.end_column, |t| t.column)
    }

    fn error(&self, message: impl Into<String>) -> ConformanceError {
        ConformanceError::parse(self.line_no, self.column(), message)
    }

    fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<()> {
        match self.peek() {
            Some(token) if &token.kind == kind => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(self.error(format!("expected {what}"))),
        }
    }

    fn finish(&self) -> Result<()> {
        if self.peek().is_some() {
            return Err(self.error("unexpected trailing input"));
        }
        Ok(())
    }

    fn call(&mut self) -> Result<Call> {
        let receiver = self.receiver()?;
        self.expect(&TokenKind::Dot, "'.'")?;

        let operation = match self.peek().map(|t| &t.kind) {
            Some(TokenKind::Ident(name)) => Operation::from_method_name(name)
                .ok_or_else(|| self.error(format!("unknown method {name:?}")))?,
            _ => return Err(self.error("expected method name")),
        };
        self.pos += 1;

        self.expect(&TokenKind::LParen, "'('")?;
        let mut args = Vec::new();
        if !matches!(self.peek().map(|t| &t.kind), Some(TokenKind::RParen)) {
            loop {
                if args.len() == MAX_ARGS {
                    return Err(self.error(format!("at most {MAX_ARGS} arguments are supported")));
                }
                args.push(self.literal()?);
                if matches!(self.peek().map(|t| &t.kind), Some(TokenKind::Comma)) {
                    self.pos += 1;
                } else {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen, "')'")?;

        Ok(Call {
            receiver,
            operation,
            args,
        })
    }

    fn receiver(&mut self) -> Result<Receiver> {
        match self.peek().map(|t| &t.kind) {
            Some(TokenKind::Ident(name)) if name == "unbound" => {
                self.pos += 1;
                Ok(Receiver::Unbound)
            }
            Some(TokenKind::Ident(name)) if name == "scope" => {
                self.pos += 1;
                Ok(Receiver::Scope)
            }
            _ => self.literal().map(Receiver::Literal),
        }
    }

    fn literal(&mut self) -> Result<Literal> {
        let column = self.column();
        let Some(token) = self.advance() else {
            return Err(self.error("expected literal"));
        };

        let literal = match &token.kind {
            TokenKind::Str(units) => Literal::Str(units.clone()),
            TokenKind::Number(n) => Literal::Number(*n),
            TokenKind::Pattern { source, flags } => Literal::Pattern {
                source: source.clone(),
                flags: flags.clone(),
            },
            TokenKind::Minus => match self.advance().map(|t| &t.kind) {
                Some(TokenKind::Number(n)) => Literal::Number(-n),
                Some(TokenKind::Ident(name)) if name == "Infinity" => {
                    Literal::Number(f64::NEG_INFINITY)
                }
                _ => {
                    return Err(ConformanceError::parse(
                        self.line_no,
                        column,
                        "'-' must precede a number",
                    ))
                }
            },
            TokenKind::Ident(name) => match name.as_str() {
                "undefined" => Literal::Undefined,
                "null" => Literal::Null,
                "true" => Literal::Bool(true),
                "false" => Literal::Bool(false),
                "NaN" => Literal::Number(f64::NAN),
                "Infinity" => Literal::Number(f64::INFINITY),
                other => {
                    return Err(ConformanceError::parse(
                        self.line_no,
                        column,
                        format!("unknown identifier {other:?}"),
                    ))
                }
            },
            _ => {
                return Err(ConformanceError::parse(
                    self.line_no,
                    column,
                    "expected literal",
                ))
            }
        };
        Ok(literal)
    }

    fn expectation(&mut self) -> Result<Outcome> {
        let column = self.column();
        let name = match self.advance().map(|t| &t.kind) {
            Some(TokenKind::Ident(name)) => name.as_str(),
            _ => return Err(ConformanceError::parse(self.line_no, column, "expected outcome")),
        };

        match name {
            "true" => Ok(Outcome::Returned(true)),
            "false" => Ok(Outcome::Returned(false)),
            "throws" => {
                let column = self.column();
                match self.advance().map(|t| &t.kind) {
                    Some(TokenKind::Ident(kind)) => MatchErrorKind::parse(kind)
                        .map(Outcome::Threw)
                        .ok_or_else(|| {
                            ConformanceError::parse(
                                self.line_no,
                                column,
                                format!("unknown error kind {kind:?}"),
                            )
                        }),
                    _ => Err(ConformanceError::parse(
                        self.line_no,
                        column,
                        "expected error kind after 'throws'",
                    )),
                }
            }
            other => Err(ConformanceError::parse(
                self.line_no,
                column,
                format!("unknown outcome {other:?}"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_case_with_arguments() {
        let case = parse_case("'foo bar'.includes('bar', -4) => true", 9).unwrap();
        assert_eq!(case.line, 9);
        assert_eq!(
            case.call,
            Call {
                receiver: Receiver::Literal(Literal::Str("foo bar".into())),
                operation: Operation::Includes,
                args: vec![Literal::Str("bar".into()), Literal::Number(-4.0)],
            }
        );
        assert_eq!(case.expected, Outcome::Returned(true));
    }

    #[test]
    fn parses_throwing_cases() {
        let case = parse_case(r"'foo bar'.endsWith(/\w+/) => throws PatternArgument", 1).unwrap();
        assert_eq!(case.expected, Outcome::Threw(MatchErrorKind::PatternArgument));

        let case = parse_case("unbound.startsWith('a') => throws InvalidReceiver", 1).unwrap();
        assert_eq!(case.call.receiver, Receiver::Unbound);
    }

    #[test]
    fn parses_keyword_literals() {
        let call = parse_call("'x'.startsWith(undefined, -Infinity)").unwrap();
        assert_eq!(
            call.args,
            vec![Literal::Undefined, Literal::Number(f64::NEG_INFINITY)]
        );
        let call = parse_call("1.5.includes(null)").unwrap();
        assert_eq!(call.receiver, Receiver::Literal(Literal::Number(1.5)));
        assert_eq!(call.args, vec![Literal::Null]);
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let text =
            "# header\n\n'a'.includes('a') => true\n  # indented\n'a'.endsWith('b') => false\n";
        let cases = parse_cases(text).unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].line, 3);
        assert_eq!(cases[1].line, 5);
    }

    #[test]
    fn rejects_malformed_lines() {
        for (line, message) in [
            ("'a'.indexOf('a') => true", "unknown method \"indexOf\""),
            ("'a'.includes('a', 1, 2) => true", "at most 2 arguments are supported"),
            ("'a'.includes('a') => maybe", "unknown outcome \"maybe\""),
            ("'a'.includes('a') => throws Oops", "unknown error kind \"Oops\""),
            ("'a'.includes('a')", "expected '=>'"),
            ("'a'.includes('a') => true true", "unexpected trailing input"),
            ("foo.includes('a') => true", "unknown identifier \"foo\""),
        ] {
            match parse_case(line, 1) {
                Err(ConformanceError::ParseError { message: got, .. }) => {
                    assert_eq!(got, message, "{line}");
                }
                other => panic!("expected parse error for {line:?}, got {other:?}"),
            }
        }
    }
}
