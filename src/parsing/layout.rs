//! Checking the layout of a file: the include line, the header comment, and
//! the parameter binding statement, which must agree with the parameters
//! the header declares.

use std::path::Path;
use tracing::debug;

use crate::convention::{Convention, Sentinel};
use crate::error::ParsingError;
use crate::language::{Header, ParameterSpec, Token, TokenKind};
use crate::parsing::header::parse_header;
use crate::parsing::parser::Parser;

pub struct LayoutChecker<'c, 'i> {
    parser: Parser<'i>,
    convention: &'c Convention,
}

impl<'c, 'i> LayoutChecker<'c, 'i> {
    pub fn new(
        tokens: Vec<Token<'i>>,
        filename: &'i Path,
        source: &'i str,
        convention: &'c Convention,
    ) -> LayoutChecker<'c, 'i> {
        LayoutChecker {
            parser: Parser::new(tokens, filename, source),
            convention,
        }
    }

    /// Run the whole check, returning the header with each parameter's
    /// variable name and default value filled in.
    pub fn check(&mut self) -> Result<Header<'i>, ParsingError<'i>> {
        self.parser
            .expect(TokenKind::PreprocessorStart, None)?;
        let include = self
            .parser
            .expect(TokenKind::PreprocessorInclude, None)?;
        if include.value != self.convention.include {
            return Err(self
                .parser
                .error_at(&include, "Unknown include path: {0}", &[include.value]));
        }
        self.parser
            .expect(TokenKind::Newline, None)?;

        let comment = self
            .parser
            .expect(TokenKind::BlockComment, None)?;
        let mut header = parse_header(
            &comment,
            self.convention,
            self.parser
                .filename(),
            self.parser
                .source(),
        )?;
        debug!(
            "Header by {} declares {} parameter{}",
            header
                .authors
                .join(", "),
            header
                .parameters
                .len(),
            if header
                .parameters
                .len()
                == 1
            {
                ""
            } else {
                "s"
            }
        );

        self.parser
            .expect(TokenKind::Blank, None)?;
        self.parser
            .expect(TokenKind::Newline, None)?;

        let next = self
            .parser
            .peek();
        let binding = next.is(TokenKind::Command, &self.convention.parameters_command);

        match (binding, header.parameters.is_empty()) {
            (true, true) => Err(self
                .parser
                .error("Missing parameters in header", &[])),
            (false, false) => Err(self
                .parser
                .error("Parameters in header not used", &[])),
            (true, false) => {
                self.check_binding(&mut header.parameters)?;
                Ok(header)
            }
            (false, true) => Ok(header),
        }
    }

    fn check_binding(&mut self, parameters: &mut [ParameterSpec<'i>]) -> Result<(), ParsingError<'i>> {
        self.parser
            .take();
        self.parser
            .expect(TokenKind::Space, None)?;
        self.parser
            .expect(TokenKind::LeftBracket, None)?;
        self.parser
            .expect(TokenKind::Indent, Some("Indent the parameter for readability"))?;

        let count = parameters.len();
        for (index, parameter) in parameters
            .iter_mut()
            .enumerate()
        {
            self.check_parameter(parameter)?;

            if index + 1 < count {
                self.parser
                    .expect(TokenKind::Comma, Some("Header has more parameters"))?;
                self.parser
                    .expect(TokenKind::Newline, None)?;
            }
        }

        self.parser
            .expect(TokenKind::Outdent, Some("Missing parameter in header"))?;

        Ok(())
    }

    /// One `["_name", default, [types], size]` entry.
    fn check_parameter(&mut self, parameter: &mut ParameterSpec<'i>) -> Result<(), ParsingError<'i>> {
        self.parser
            .expect(TokenKind::LeftBracket, Some("Missing type check for parameter"))?;

        let variable = self
            .parser
            .expect(TokenKind::String, None)?;
        parameter.variable = Some(variable.value);

        self.parser
            .expect(TokenKind::Comma, None)?;
        self.parser
            .expect(TokenKind::Space, None)?;
        parameter.value = Some(
            self.parser
                .parse_expression()?,
        );

        self.parser
            .expect(TokenKind::Comma, Some("Missing type check for parameter"))?;
        self.parser
            .expect(TokenKind::Space, None)?;
        self.parser
            .expect(TokenKind::LeftBracket, None)?;
        self.check_types(&parameter.types)?;
        self.parser
            .expect(TokenKind::RightBracket, None)?;

        if self
            .convention
            .needs_size_check(&parameter.types)
        {
            self.parser
                .expect(TokenKind::Comma, Some("Add array size check"))?;
            self.parser
                .expect(TokenKind::Space, None)?;
            if self
                .parser
                .peek()
                .kind
                == TokenKind::LeftBracket
            {
                self.parser
                    .parse_array()?;
            } else {
                self.parser
                    .expect(TokenKind::Number, None)?;
            }
        }

        self.parser
            .expect(TokenKind::RightBracket, None)?;

        debug!(
            "Parameter {} bound to {}",
            parameter.description,
            variable.value
        );
        Ok(())
    }

    fn check_types(&mut self, types: &[&'i str]) -> Result<(), ParsingError<'i>> {
        let convention = self.convention;

        for (index, name) in types
            .iter()
            .enumerate()
        {
            if let Some(sentinel) = convention.sentinel(name) {
                self.check_sentinel(name, sentinel)?;
            }

            if index + 1 < types.len() {
                self.parser
                    .expect(TokenKind::Comma, Some("Parameter has more type in header"))?;
                self.parser
                    .expect(TokenKind::Space, None)?;
            }
        }
        Ok(())
    }

    fn check_sentinel(&mut self, name: &str, sentinel: &Sentinel) -> Result<(), ParsingError<'i>> {
        let problem = format!(
            "Type {} in header, check for {}",
            name.to_lowercase(),
            sentinel.describe()
        );

        let (kind, expected) = match sentinel {
            Sentinel::EmptyArray => {
                self.parser
                    .expect(TokenKind::LeftBracket, Some(&problem))?;
                self.parser
                    .expect(TokenKind::RightBracket, None)?;
                return Ok(());
            }
            Sentinel::EmptyCode => {
                self.parser
                    .expect(TokenKind::LeftBrace, Some(&problem))?;
                self.parser
                    .expect(TokenKind::RightBrace, None)?;
                return Ok(());
            }
            Sentinel::Command(value) => (TokenKind::Command, value),
            Sentinel::Number(value) => (TokenKind::Number, value),
            Sentinel::String(value) => (TokenKind::String, value),
        };

        let token = self
            .parser
            .expect(kind, Some(&problem))?;
        if token.value != expected.as_str() {
            return Err(self
                .parser
                .error_at(&token, &problem, &[]));
        }
        Ok(())
    }
}
