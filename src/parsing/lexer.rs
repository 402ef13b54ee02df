//! Lexer turning SQF source text into the stream of tokens consumed by the
//! layout checker.
//!
//! Line structure is significant. Leading whitespace is not emitted as a
//! token; instead each run of line breaks becomes a Newline, Indent, or one
//! or more Outdent tokens depending on how the indentation of the next line
//! compares with the enclosing lines, preceded by a Blank token if the run
//! contained an empty line.

use std::fmt;

use crate::language::{Token, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexingError {
    pub problem: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for LexingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.line, self.column, self.problem)
    }
}

/// Split the given source into tokens. On success the final token is always
/// Eos.
pub fn lex(content: &str) -> Result<Vec<Token<'_>>, LexingError> {
    let mut lexer = Lexer::new(content);
    lexer.run()?;
    Ok(lexer.tokens)
}

struct Lexer<'i> {
    source: &'i str,
    offset: usize,
    line: usize,
    column: usize,
    levels: Vec<usize>,
    tokens: Vec<Token<'i>>,
}

impl<'i> Lexer<'i> {
    fn new(source: &'i str) -> Lexer<'i> {
        let source = source
            .strip_prefix('\u{feff}')
            .unwrap_or(source);

        Lexer {
            source,
            offset: 0,
            line: 1,
            column: 1,
            levels: Vec::new(),
            tokens: Vec::new(),
        }
    }

    fn run(&mut self) -> Result<(), LexingError> {
        let indent = self.take_indentation();
        self.levels
            .push(indent);

        while let Some(c) = self.peek_char() {
            let second = self.peek_second();

            match c {
                '\n' | '\r' => self.read_line_breaks(),
                ' ' | '\t' => self.read_space(),
                '#' if self.at_line_start() => self.read_preprocessor()?,
                '/' if second == Some('*') => self.read_block_comment()?,
                '/' if second == Some('/') => self.read_line_comment(),
                '"' | '\'' => self.read_string(c)?,
                '.' if second.is_some_and(|d| d.is_ascii_digit()) => self.read_number(),
                '$' if second.is_some_and(|d| d.is_ascii_hexdigit()) => self.read_number(),
                c if c.is_ascii_digit() => self.read_number(),
                c if c.is_alphabetic() || c == '_' => self.read_identifier(),
                '[' => self.read_single(TokenKind::LeftBracket),
                ']' => self.read_single(TokenKind::RightBracket),
                '{' => self.read_single(TokenKind::LeftBrace),
                '}' => self.read_single(TokenKind::RightBrace),
                '(' => self.read_single(TokenKind::LeftParen),
                ')' => self.read_single(TokenKind::RightParen),
                ',' => self.read_single(TokenKind::Comma),
                ';' => self.read_single(TokenKind::Semicolon),
                c if is_operator(c) => self.read_operator(),
                _ => {
                    return Err(LexingError {
                        problem: format!("Unexpected character '{}'", c),
                        line: self.line,
                        column: self.column,
                    })
                }
            }
        }

        while self
            .levels
            .len()
            > 1
        {
            self.levels
                .pop();
            self.push_at(TokenKind::Outdent, "", self.line, self.column);
        }
        self.push_at(TokenKind::Eos, "", self.line, self.column);

        Ok(())
    }

    fn peek_char(&self) -> Option<char> {
        self.source[self.offset..]
            .chars()
            .next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.source[self.offset..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn bump_while<P>(&mut self, predicate: P)
    where
        P: Fn(char) -> bool,
    {
        while let Some(c) = self.peek_char() {
            if !predicate(c) {
                break;
            }
            self.bump();
        }
    }

    fn slice(&self, start: usize, end: usize) -> &'i str {
        &self.source[start..end]
    }

    fn push_at(&mut self, kind: TokenKind, value: &'i str, line: usize, column: usize) {
        self.tokens
            .push(Token::new(kind, value, line, column));
    }

    fn at_line_start(&self) -> bool {
        match self
            .tokens
            .last()
        {
            None => true,
            Some(token) => matches!(
                token.kind,
                TokenKind::Newline | TokenKind::Blank | TokenKind::Indent | TokenKind::Outdent
            ),
        }
    }

    fn current_level(&self) -> usize {
        self.levels
            .last()
            .copied()
            .unwrap_or(0)
    }

    fn take_indentation(&mut self) -> usize {
        let start = self.offset;
        self.bump_while(|c| c == ' ' || c == '\t');
        self.offset - start
    }

    fn read_line_breaks(&mut self) {
        let line = self.line;
        let column = self.column;

        let mut breaks = 0;
        let indent = loop {
            if self.peek_char() == Some('\r') {
                self.bump();
            }
            if self.peek_char() == Some('\n') {
                self.bump();
            }
            breaks += 1;

            let indent = self.take_indentation();
            match self.peek_char() {
                Some('\n') | Some('\r') => continue,
                _ => break indent,
            }
        };

        if breaks > 1 {
            self.push_at(TokenKind::Blank, "", line, column);
        }

        if self
            .peek_char()
            .is_none()
        {
            self.push_at(TokenKind::Newline, "\n", line, column);
            return;
        }

        let mut closed = 0;
        while self
            .levels
            .len()
            > 1
            && self.current_level() > indent
        {
            self.levels
                .pop();
            self.push_at(TokenKind::Outdent, "", line, column);
            closed += 1;
        }

        let level = self.current_level();
        if indent > level {
            self.levels
                .push(indent);
            self.push_at(TokenKind::Indent, "", line, column);
        } else if closed == 0 {
            if indent < level {
                // dedent below where the file started
                self.levels = vec![indent];
            }
            self.push_at(TokenKind::Newline, "\n", line, column);
        }
    }

    fn read_space(&mut self) {
        let (start, line, column) = (self.offset, self.line, self.column);
        self.bump_while(|c| c == ' ' || c == '\t');
        self.push_at(TokenKind::Space, self.slice(start, self.offset), line, column);
    }

    fn read_single(&mut self, kind: TokenKind) {
        let (start, line, column) = (self.offset, self.line, self.column);
        self.bump();
        self.push_at(kind, self.slice(start, self.offset), line, column);
    }

    fn read_preprocessor(&mut self) -> Result<(), LexingError> {
        self.read_single(TokenKind::PreprocessorStart);

        let (start, line, column) = (self.offset, self.line, self.column);
        self.bump_while(|c| c.is_ascii_alphanumeric() || c == '_');

        if self.slice(start, self.offset) == "include" {
            self.bump_while(|c| c == ' ' || c == '\t');

            let close = match self.peek_char() {
                Some('"') => '"',
                Some('<') => '>',
                _ => {
                    return Err(LexingError {
                        problem: "Malformed include directive".to_string(),
                        line: self.line,
                        column: self.column,
                    })
                }
            };
            self.bump();

            let path = self.offset;
            self.bump_while(|c| c != close && c != '\n' && c != '\r');
            if self.peek_char() != Some(close) {
                return Err(LexingError {
                    problem: "Unterminated include path".to_string(),
                    line,
                    column,
                });
            }
            let value = self.slice(path, self.offset);
            self.bump();

            self.push_at(TokenKind::PreprocessorInclude, value, line, column);
            return Ok(());
        }

        // other directives run to the end of the line, honouring trailing
        // backslash continuations as used by multi-line macros
        loop {
            self.bump_while(|c| c != '\n' && c != '\r');
            let text = self.source[start..self.offset].trim_end_matches([' ', '\t']);
            let continued = text.ends_with('\\');
            if !continued
                || self
                    .peek_char()
                    .is_none()
            {
                break;
            }
            if self.peek_char() == Some('\r') {
                self.bump();
            }
            self.bump();
        }

        let value = self.slice(start, self.offset);
        self.push_at(TokenKind::PreprocessorDirective, value, line, column);
        Ok(())
    }

    fn read_block_comment(&mut self) -> Result<(), LexingError> {
        let (line, column) = (self.line, self.column);
        self.bump();
        self.bump();

        let start = self.offset;
        loop {
            if self.source[self.offset..].starts_with("*/") {
                let value = self.slice(start, self.offset);
                self.bump();
                self.bump();
                self.push_at(TokenKind::BlockComment, value, line, column);
                return Ok(());
            }
            if self
                .bump()
                .is_none()
            {
                return Err(LexingError {
                    problem: "Unterminated block comment".to_string(),
                    line,
                    column,
                });
            }
        }
    }

    fn read_line_comment(&mut self) {
        let (start, line, column) = (self.offset, self.line, self.column);
        self.bump_while(|c| c != '\n' && c != '\r');
        self.push_at(TokenKind::LineComment, self.slice(start, self.offset), line, column);
    }

    fn read_string(&mut self, quote: char) -> Result<(), LexingError> {
        let (line, column) = (self.line, self.column);
        self.bump();

        let start = self.offset;
        loop {
            match self.peek_char() {
                None => {
                    return Err(LexingError {
                        problem: "Unterminated string".to_string(),
                        line,
                        column,
                    })
                }
                Some(c) if c == quote => {
                    if self.peek_second() == Some(quote) {
                        self.bump();
                        self.bump();
                        continue;
                    }
                    let value = self.slice(start, self.offset);
                    self.bump();
                    self.push_at(TokenKind::String, value, line, column);
                    return Ok(());
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    fn read_number(&mut self) {
        let (start, line, column) = (self.offset, self.line, self.column);

        let rest = &self.source[start..];
        if rest.starts_with('$') || rest.starts_with("0x") || rest.starts_with("0X") {
            if rest.starts_with('$') {
                self.bump();
            } else {
                self.bump();
                self.bump();
            }
            self.bump_while(|c| c.is_ascii_hexdigit());
        } else {
            self.bump_while(|c| c.is_ascii_digit());
            if self.peek_char() == Some('.')
                && self
                    .peek_second()
                    .is_some_and(|c| c.is_ascii_digit())
            {
                self.bump();
                self.bump_while(|c| c.is_ascii_digit());
            }
            if let Some('e' | 'E') = self.peek_char() {
                let exponent = &self.source[self.offset + 1..];
                let digits = exponent.trim_start_matches(['+', '-']);
                let signs = exponent.len() - digits.len();
                if signs <= 1 && digits.starts_with(|c: char| c.is_ascii_digit()) {
                    self.bump();
                    self.bump_while(|c| c == '+' || c == '-');
                    self.bump_while(|c| c.is_ascii_digit());
                }
            }
        }

        self.push_at(TokenKind::Number, self.slice(start, self.offset), line, column);
    }

    fn read_identifier(&mut self) {
        let (start, line, column) = (self.offset, self.line, self.column);
        self.bump_while(|c| c.is_alphanumeric() || c == '_');
        self.push_at(TokenKind::Command, self.slice(start, self.offset), line, column);
    }

    fn read_operator(&mut self) {
        let (start, line, column) = (self.offset, self.line, self.column);

        let pair = self.source[start..]
            .get(..2)
            .unwrap_or("");
        let width = match pair {
            "==" | "!=" | "<=" | ">=" | "&&" | "||" | ">>" => 2,
            _ => 1,
        };
        for _ in 0..width {
            self.bump();
        }

        self.push_at(TokenKind::Operator, self.slice(start, self.offset), line, column);
    }
}

fn is_operator(c: char) -> bool {
    matches!(
        c,
        '+' | '-' | '*' | '/' | '%' | '^' | '=' | '!' | '<' | '>' | '&' | '|' | ':' | '#'
    )
}
