//! Types representing tokens, file headers, and parameter declarations in SQF
//! source files

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    PreprocessorStart,
    PreprocessorInclude,
    PreprocessorDirective,
    Newline,
    Blank,
    BlockComment,
    LineComment,
    Command,
    String,
    Number,
    Operator,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    Comma,
    Semicolon,
    Space,
    Indent,
    Outdent,
    Eos,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::PreprocessorStart => "preprocessor-start",
            TokenKind::PreprocessorInclude => "preprocessor-include",
            TokenKind::PreprocessorDirective => "preprocessor-directive",
            TokenKind::Newline => "newline",
            TokenKind::Blank => "blank",
            TokenKind::BlockComment => "blockComment",
            TokenKind::LineComment => "lineComment",
            TokenKind::Command => "command",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Operator => "operator",
            TokenKind::LeftBracket => "left-bracket",
            TokenKind::RightBracket => "right-bracket",
            TokenKind::LeftBrace => "left-brace",
            TokenKind::RightBrace => "right-brace",
            TokenKind::LeftParen => "left-paren",
            TokenKind::RightParen => "right-paren",
            TokenKind::Comma => "comma",
            TokenKind::Semicolon => "semicolon",
            TokenKind::Space => "space",
            TokenKind::Indent => "indent",
            TokenKind::Outdent => "outdent",
            TokenKind::Eos => "eos",
        };
        f.write_str(name)
    }
}

/// A classified piece of source text. Lines and columns are 1-origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'i> {
    pub kind: TokenKind,
    pub value: &'i str,
    pub line: usize,
    pub column: usize,
}

impl<'i> Token<'i> {
    pub fn new(kind: TokenKind, value: &'i str, line: usize, column: usize) -> Token<'i> {
        Token {
            kind,
            value,
            line,
            column,
        }
    }

    pub fn is(&self, kind: TokenKind, value: &str) -> bool {
        self.kind == kind && self.value == value
    }
}

/// The parsed documentation comment at the top of a file.
#[derive(Eq, Debug, PartialEq)]
pub struct Header<'i> {
    pub authors: Vec<&'i str>,
    pub description: Vec<&'i str>,
    pub parameters: Vec<ParameterSpec<'i>>,
}

/// One enumerated entry of the `Parameter(s):` section. The `variable` and
/// `value` fields are empty until the parameter binding statement further
/// down the file has been validated.
#[derive(Eq, Debug, PartialEq)]
pub struct ParameterSpec<'i> {
    pub description: &'i str,
    pub types: Vec<&'i str>,
    pub documented: &'i str,
    pub variable: Option<&'i str>,
    pub value: Option<Expression<'i>>,
}

impl<'i> ParameterSpec<'i> {
    pub fn new(description: &'i str, types: Vec<&'i str>, documented: &'i str) -> Self {
        ParameterSpec {
            description,
            types,
            documented,
            variable: None,
            value: None,
        }
    }
}

// default values as written in code

#[derive(Eq, Debug, PartialEq)]
pub enum Expression<'i> {
    Number(&'i str),
    String(&'i str),
    Command(&'i str),
    Array(Vec<Expression<'i>>),
    Code(Vec<Token<'i>>),
    Unary(&'i str, Box<Expression<'i>>),
    Binary(Box<Expression<'i>>, &'i str, Box<Expression<'i>>),
}
