//! A cursor over the tokens of one file, with the primitives every grammar
//! rule in the layout checker is written in terms of.

use std::path::Path;

use crate::error::ParsingError;
use crate::language::{Expression, Token, TokenKind};

#[derive(Debug)]
pub struct Parser<'i> {
    tokens: Vec<Token<'i>>,
    position: usize,
    filename: &'i Path,
    source: &'i str,
}

impl<'i> Parser<'i> {
    pub fn new(mut tokens: Vec<Token<'i>>, filename: &'i Path, source: &'i str) -> Parser<'i> {
        // the stream must end in Eos so that running out of input is an
        // ordinary mismatch
        let last = tokens
            .last()
            .copied();
        match last {
            Some(token) if token.kind == TokenKind::Eos => {}
            Some(token) => tokens.push(Token::new(TokenKind::Eos, "", token.line, token.column)),
            None => tokens.push(Token::new(TokenKind::Eos, "", 1, 1)),
        }

        Parser {
            tokens,
            position: 0,
            filename,
            source,
        }
    }

    pub fn filename(&self) -> &'i Path {
        self.filename
    }

    pub fn source(&self) -> &'i str {
        self.source
    }

    /// The next token, without consuming it.
    pub fn peek(&self) -> Token<'i> {
        self.peek_nth(0)
    }

    /// Look further ahead. Anything past the end is the Eos token.
    pub fn peek_nth(&self, n: usize) -> Token<'i> {
        let last = self
            .tokens
            .len()
            - 1;
        self.tokens[(self.position + n).min(last)]
    }

    /// Consume the next token unconditionally. Eos is never consumed.
    pub fn take(&mut self) -> Token<'i> {
        let token = self.peek();
        if token.kind != TokenKind::Eos {
            self.position += 1;
        }
        token
    }

    /// Consume the next token, which must be of the given kind. If it isn't,
    /// the hint (if any) becomes the problem reported.
    pub fn expect(
        &mut self,
        kind: TokenKind,
        hint: Option<&str>,
    ) -> Result<Token<'i>, ParsingError<'i>> {
        let token = self.peek();
        if token.kind == kind {
            return Ok(self.take());
        }

        let error = match hint {
            Some(hint) => self.error_at(&token, hint, &[]),
            None => self.error_at(&token, "Expected {0}, got {1}", &[
                &kind.to_string(),
                &token
                    .kind
                    .to_string(),
            ]),
        };

        Err(ParsingError {
            details: format!("Expected {} but found {}.", kind, describe(&token)),
            ..error
        })
    }

    /// Build an error located at the next unconsumed token. Placeholders
    /// `{0}`, `{1}`, ... in the template are replaced by the arguments.
    pub fn error(&self, template: &str, args: &[&str]) -> ParsingError<'i> {
        let token = self.peek();
        self.error_at(&token, template, args)
    }

    pub fn error_at(&self, token: &Token<'i>, template: &str, args: &[&str]) -> ParsingError<'i> {
        ParsingError {
            problem: substitute(template, args),
            details: String::new(),
            filename: self.filename,
            source: self.source,
            line: token.line,
            column: token.column,
        }
    }

    fn skip_spaces(&mut self) {
        while self
            .peek()
            .kind
            == TokenKind::Space
        {
            self.take();
        }
    }

    /// Inside brackets the line structure carries no meaning, so an array
    /// literal may be spread over several lines.
    fn skip_layout(&mut self) {
        while matches!(
            self.peek()
                .kind,
            TokenKind::Space
                | TokenKind::Newline
                | TokenKind::Blank
                | TokenKind::Indent
                | TokenKind::Outdent
        ) {
            self.take();
        }
    }

    /// Consume one expression as would appear as a default value: a literal,
    /// array, code block, or operators combining them.
    pub fn parse_expression(&mut self) -> Result<Expression<'i>, ParsingError<'i>> {
        let mut left = self.parse_unary()?;

        loop {
            let first = self.peek_nth(0);
            let second = self.peek_nth(1);

            let operator = match (first.kind, second.kind) {
                (TokenKind::Operator, _) => first,
                (TokenKind::Space, TokenKind::Operator) => {
                    self.take();
                    second
                }
                _ => break,
            };
            self.take();
            self.skip_spaces();

            let right = self.parse_unary()?;
            left = Expression::Binary(Box::new(left), operator.value, Box::new(right));
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expression<'i>, ParsingError<'i>> {
        let token = self.peek();
        if token.kind == TokenKind::Operator && matches!(token.value, "-" | "+" | "!") {
            self.take();
            let operand = self.parse_unary()?;
            return Ok(Expression::Unary(token.value, Box::new(operand)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expression<'i>, ParsingError<'i>> {
        let token = self.peek();
        match token.kind {
            TokenKind::Number => Ok(Expression::Number(self.take().value)),
            TokenKind::String => Ok(Expression::String(self.take().value)),
            TokenKind::Command => Ok(Expression::Command(self.take().value)),
            TokenKind::LeftBracket => self.parse_array(),
            TokenKind::LeftBrace => self.parse_code(),
            TokenKind::LeftParen => {
                self.take();
                self.skip_spaces();
                let inner = self.parse_expression()?;
                self.skip_spaces();
                self.expect(TokenKind::RightParen, None)?;
                Ok(inner)
            }
            _ => Err(self.error("Expected an expression, got {0}", &[&token
                .kind
                .to_string()])),
        }
    }

    /// Consume one array literal, `[]` or `[a, b, ...]`.
    pub fn parse_array(&mut self) -> Result<Expression<'i>, ParsingError<'i>> {
        self.expect(TokenKind::LeftBracket, None)?;
        self.skip_layout();

        let mut elements = Vec::new();
        if self
            .peek()
            .kind
            == TokenKind::RightBracket
        {
            self.take();
            return Ok(Expression::Array(elements));
        }

        loop {
            elements.push(self.parse_expression()?);
            self.skip_layout();

            match self
                .peek()
                .kind
            {
                TokenKind::Comma => {
                    self.take();
                    self.skip_layout();
                }
                TokenKind::RightBracket => {
                    self.take();
                    return Ok(Expression::Array(elements));
                }
                _ => return Err(self.error("Expected comma or closing bracket in array", &[])),
            }
        }
    }

    fn parse_code(&mut self) -> Result<Expression<'i>, ParsingError<'i>> {
        let open = self.expect(TokenKind::LeftBrace, None)?;

        let mut body = Vec::new();
        let mut depth = 1;
        loop {
            let token = self.take();
            match token.kind {
                TokenKind::LeftBrace => depth += 1,
                TokenKind::RightBrace => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(Expression::Code(body));
                    }
                }
                TokenKind::Eos => return Err(self.error_at(&open, "Unclosed code block", &[])),
                _ => {}
            }
            body.push(token);
        }
    }
}

fn substitute(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args
        .iter()
        .enumerate()
    {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::Command | TokenKind::Number | TokenKind::Operator => {
            format!("{} '{}'", token.kind, token.value)
        }
        TokenKind::String => format!("string \"{}\"", token.value),
        _ => token
            .kind
            .to_string(),
    }
}
