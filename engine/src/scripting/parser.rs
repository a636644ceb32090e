//! Function-block parser
//!
//! Locates `fun <Name>() { ... }` in a token stream, finds the matching close
//! brace by depth tracking, and parses the body into [`Statement`]s. Anything
//! that does not match a known statement shape is a [`ParseError`].

use crate::scripting::ast::{FieldPath, FunctionBlock, Lifecycle, Statement, Token, TokenKind};
use crate::scripting::error::ParseError;
use crate::scripting::token::tokenize;
use tracing::{debug, trace};

/// Both lifecycle blocks of one script
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedScript {
    pub start: Option<FunctionBlock>,
    pub update: Option<FunctionBlock>,
}

/// Tokenize `source` and parse its `Start` and `Update` functions
pub fn parse_script(source: &str) -> Result<ParsedScript, ParseError> {
    let tokens: Vec<Token> = tokenize(source).collect();
    let start = parse_function(&tokens, Lifecycle::Start.function_name())?;
    let update = parse_function(&tokens, Lifecycle::Update.function_name())?;

    debug!(
        token_count = tokens.len(),
        start_statements = start.as_ref().map(FunctionBlock::len),
        update_statements = update.as_ref().map(FunctionBlock::len),
        "Parsed script"
    );

    Ok(ParsedScript { start, update })
}

/// Parse the body of `fun <function_name>() { ... }`
///
/// Returns `Ok(None)` when the function is not defined. If it is defined more
/// than once, the first definition wins.
pub fn parse_function(
    tokens: &[Token],
    function_name: &str,
) -> Result<Option<FunctionBlock>, ParseError> {
    let Some(open) = find_header(tokens, function_name) else {
        trace!(function = function_name, "Function not present");
        return Ok(None);
    };

    let close = find_matching_brace(tokens, open, function_name)?;
    let body = &tokens[open + 1..close];
    let statements = StatementParser::new(body, tokens[close].line).parse_all()?;

    Ok(Some(FunctionBlock::new(statements)))
}

/// Index of the opening brace of `fun <name>() {`
fn find_header(tokens: &[Token], name: &str) -> Option<usize> {
    tokens
        .windows(5)
        .position(|w| {
            w[0].is_keyword("fun")
                && w[1].is_ident(name)
                && w[2].kind == TokenKind::LeftParen
                && w[3].kind == TokenKind::RightParen
                && w[4].kind == TokenKind::LeftBrace
        })
        .map(|start| start + 4)
}

fn find_matching_brace(tokens: &[Token], open: usize, name: &str) -> Result<usize, ParseError> {
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate().skip(open) {
        match token.kind {
            TokenKind::LeftBrace => depth += 1,
            TokenKind::RightBrace => {
                depth -= 1;
                if depth == 0 {
                    return Ok(index);
                }
            }
            TokenKind::UnterminatedString => {
                return Err(ParseError::new(token.line, "unterminated string literal"));
            }
            _ => {}
        }
    }

    Err(ParseError::new(
        tokens[open].line,
        format!("unmatched '{{' in function '{name}'"),
    ))
}

fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::StringLiteral => format!("string \"{}\"", token.text),
        TokenKind::UnterminatedString => "unterminated string literal".to_string(),
        _ => format!("'{}'", token.text),
    }
}

struct StatementParser<'a> {
    tokens: &'a [Token],
    pos: usize,
    /// Line of the closing brace, reported when a statement runs off the end
    end_line: usize,
}

impl<'a> StatementParser<'a> {
    fn new(tokens: &'a [Token], end_line: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            end_line,
        }
    }

    fn parse_all(mut self) -> Result<Vec<Statement>, ParseError> {
        let tokens = self.tokens;
        let mut statements = Vec::new();
        while let Some(first) = tokens.get(self.pos) {
            if first.kind == TokenKind::Semicolon {
                // Empty statement
                self.pos += 1;
                continue;
            }

            let statement = if first.is_ident("Debug") {
                self.log_statement()?
            } else if first.is_ident("Camera") {
                self.field_statement()?
            } else {
                return Err(self.unrecognized(first));
            };
            trace!(?statement, "Parsed statement");
            statements.push(statement);
        }
        Ok(statements)
    }

    fn unrecognized(&self, first: &Token) -> ParseError {
        let text = self.tokens[self.pos..]
            .iter()
            .take_while(|t| t.kind != TokenKind::Semicolon)
            .map(|t| match t.kind {
                TokenKind::StringLiteral => format!("\"{}\"", t.text),
                _ => t.text.clone(),
            })
            .collect::<Vec<_>>()
            .join(" ");
        ParseError::new(first.line, format!("unrecognized statement '{text}'"))
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<&'a Token, ParseError> {
        match self.next() {
            Some(token) if token.kind == kind => Ok(token),
            Some(token) => Err(ParseError::new(
                token.line,
                format!("expected {expected}, found {}", describe(token)),
            )),
            None => Err(ParseError::new(
                self.end_line,
                format!("expected {expected}, found end of function"),
            )),
        }
    }

    fn expect_ident(&mut self, name: &str) -> Result<&'a Token, ParseError> {
        let token = self.expect(TokenKind::Identifier, &format!("'{name}'"))?;
        if token.text != name {
            return Err(ParseError::new(
                token.line,
                format!("expected '{name}', found '{}'", token.text),
            ));
        }
        Ok(token)
    }

    /// `Debug.Log("<text>");`
    fn log_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect_ident("Debug")?;
        self.expect(TokenKind::Dot, "'.' after 'Debug'")?;
        let member = self.expect(TokenKind::Identifier, "'Log'")?;
        if member.text != "Log" {
            return Err(ParseError::new(
                member.line,
                format!("unknown function 'Debug.{}'", member.text),
            ));
        }
        self.expect(TokenKind::LeftParen, "'(' after 'Debug.Log'")?;
        let message = self.expect(TokenKind::StringLiteral, "string literal")?;
        self.expect(TokenKind::RightParen, "')'")?;
        self.expect(TokenKind::Semicolon, "';'")?;

        Ok(Statement::Log {
            message: message.text.clone(),
        })
    }

    /// `Camera.position.<x|y|z> (=|+=) <number>;`
    fn field_statement(&mut self) -> Result<Statement, ParseError> {
        self.expect_ident("Camera")?;
        self.expect(TokenKind::Dot, "'.' after 'Camera'")?;
        let object = self.expect(TokenKind::Identifier, "field name")?;
        if object.text != "position" {
            return Err(ParseError::new(
                object.line,
                format!("unknown field path 'Camera.{}'", object.text),
            ));
        }
        self.expect(TokenKind::Dot, "'.' after 'Camera.position'")?;
        let component = self.expect(TokenKind::Identifier, "'x', 'y' or 'z'")?;
        let target = FieldPath::from_component(&component.text).ok_or_else(|| {
            ParseError::new(
                component.line,
                format!("unknown field path 'Camera.position.{}'", component.text),
            )
        })?;

        let operator = match self.next() {
            Some(token) if matches!(token.kind, TokenKind::Assign | TokenKind::PlusAssign) => token,
            Some(token) => {
                return Err(ParseError::new(
                    token.line,
                    format!("expected '=' or '+=', found {}", describe(token)),
                ))
            }
            None => {
                return Err(ParseError::new(
                    self.end_line,
                    "expected '=' or '+=', found end of function",
                ))
            }
        };

        let literal = self.expect(TokenKind::NumberLiteral, "numeric literal")?;
        let value = parse_number(literal)?;
        self.expect(TokenKind::Semicolon, "';'")?;

        Ok(match operator.kind {
            TokenKind::PlusAssign => Statement::FieldIncrement { target, value },
            _ => Statement::FieldAssign { target, value },
        })
    }
}

fn parse_number(token: &Token) -> Result<f32, ParseError> {
    let value: f32 = token.text.parse().map_err(|_| {
        ParseError::new(
            token.line,
            format!("malformed numeric literal '{}'", token.text),
        )
    })?;
    if !value.is_finite() {
        return Err(ParseError::new(
            token.line,
            format!("numeric literal '{}' is out of range", token.text),
        ));
    }
    Ok(value)
}
