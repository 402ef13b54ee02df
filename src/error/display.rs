use std::{fmt, path::Path};

use owo_colors::OwoColorize;

use crate::language::LoadingError;

/// A structural or semantic violation of the header and parameter layout,
/// located at a 1-origin line and column within the given file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsingError<'i> {
    pub problem: String,
    pub details: String,
    pub filename: &'i Path,
    pub source: &'i str,
    pub line: usize,
    pub column: usize,
}

// Verbose detailed explanation
impl<'i> ParsingError<'i> {
    pub fn full_details(&self) -> String {
        let code = self
            .source
            .lines()
            .nth(
                self.line
                    .saturating_sub(1),
            )
            .unwrap_or("?");

        let line = self.line;
        let column = self
            .column
            .max(1);

        let width = line
            .to_string()
            .len();
        let width = 3.max(width);

        format!(
            r#"
{}: {}
{}:{}:{}

{:width$} {}
{:width$} {} {}
{:width$} {} {:>column$}

{}
            "#,
            "error".bright_red(),
            self.problem
                .bold(),
            self.filename
                .to_string_lossy(),
            line,
            column,
            ' ',
            '|'.bright_blue(),
            line.bright_blue(),
            '|'.bright_blue(),
            code,
            ' ',
            '|'.bright_blue(),
            '^'.bright_red(),
            self.details
        )
        .trim_ascii()
        .to_string()
    }
}

// Concise version for internal use
impl<'i> fmt::Display for ParsingError<'i> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error: {}:{}:{} {}",
            self.filename
                .to_string_lossy(),
            self.line,
            self.column,
            self.problem
        )
    }
}

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error<'i>(error: &LoadingError<'i>) -> String {
    format!(
        "{}: {}: {}",
        "error".bright_red(),
        error
            .filename
            .display(),
        error
            .to_string()
            .bold()
    )
}
