//! Decoding the documentation comment at the top of every file.
//!
//! The comment is expected to look like this:
//!
//! ```text
//! /*
//!     Arma At War
//!
//!     Author: NetFusion
//!
//!     Description:
//!     Does a thing.
//!
//!     Parameter(s):
//!     0: Target unit <Object> (Default: objNull)
//!
//! */
//! ```
//!
//! Each section is read by its own method over the lines of the comment.
//! The line number reported in an error is always the line on which the
//! offending section was expected, derived from the running position rather
//! than from fixed offsets.

use std::path::Path;

use crate::convention::Convention;
use crate::error::ParsingError;
use crate::language::{Header, ParameterSpec, Token};

const INDENT: &str = "    ";

/// Parse the block comment token into a Header.
pub fn parse_header<'i>(
    comment: &Token<'i>,
    convention: &Convention,
    filename: &'i Path,
    source: &'i str,
) -> Result<Header<'i>, ParsingError<'i>> {
    let mut input = HeaderParser::new(comment, convention, filename, source);

    input.read_title()?;
    let authors = input.read_authors()?;
    let description = input.read_description()?;
    let parameters = input.read_parameters()?;

    Ok(Header {
        authors,
        description,
        parameters,
    })
}

struct HeaderParser<'c, 'i> {
    lines: Vec<&'i str>,
    index: usize,
    start: usize,
    convention: &'c Convention,
    filename: &'i Path,
    source: &'i str,
}

impl<'c, 'i> HeaderParser<'c, 'i> {
    fn new(
        comment: &Token<'i>,
        convention: &'c Convention,
        filename: &'i Path,
        source: &'i str,
    ) -> HeaderParser<'c, 'i> {
        let lines = comment
            .value
            .split('\n')
            .map(|line| {
                line.strip_suffix('\r')
                    .unwrap_or(line)
            })
            .collect();

        HeaderParser {
            lines,
            index: 0,
            start: comment.line,
            convention,
            filename,
            source,
        }
    }

    /// Absolute line number of the current line.
    fn line(&self) -> usize {
        self.start + self.index
    }

    fn current(&self) -> Option<&'i str> {
        self.lines
            .get(self.index)
            .copied()
    }

    /// The current line with its four space indent removed.
    fn indented(&self) -> Option<&'i str> {
        self.current()
            .and_then(|line| line.strip_prefix(INDENT))
            .filter(|text| !text.starts_with(char::is_whitespace))
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    /// An empty line. A line holding only spaces is not empty, and the last
    /// line of the comment, which holds the closing delimiter, doesn't count.
    fn at_blank(&self) -> bool {
        self.index + 1
            < self
                .lines
                .len()
            && self.lines[self.index].is_empty()
    }

    /// Sections are conventionally separated by one empty line.
    fn skip_separator(&mut self) {
        if self.at_blank() {
            self.advance();
        }
    }

    fn problem(&self, line: usize, column: usize, problem: &str, details: String) -> ParsingError<'i> {
        ParsingError {
            problem: problem.to_string(),
            details,
            filename: self.filename,
            source: self.source,
            line,
            column,
        }
    }

    fn read_title(&mut self) -> Result<(), ParsingError<'i>> {
        // rest of the line with the opening delimiter must be empty
        let opening = self.current();
        self.advance();

        let line = self.line();
        let title = &self
            .convention
            .title;

        if opening == Some("") && self.indented() == Some(title.as_str()) {
            self.advance();
            Ok(())
        } else {
            Err(self.problem(
                line,
                1,
                "Invalid project title",
                format!(
                    "The header comment must begin on the line after the opening '/*' with the project title '{}', indented by four spaces.",
                    title
                ),
            ))
        }
    }

    fn read_authors(&mut self) -> Result<Vec<&'i str>, ParsingError<'i>> {
        self.skip_separator();
        let line = self.line();

        let authors: Option<Vec<&'i str>> = self
            .indented()
            .and_then(|text| text.strip_prefix("Author: "))
            .map(|names| {
                names
                    .split(", ")
                    .collect()
            });

        match authors {
            Some(names)
                if names
                    .iter()
                    .all(|name| self.convention.is_author(name)) =>
            {
                self.advance();
                Ok(names)
            }
            _ => Err(self.problem(
                line,
                1,
                "Invalid authors",
                format!(
                    "The author line reads 'Author: ' followed by one or more of {}, separated by a comma and a space.",
                    quoted(&self.convention.authors)
                ),
            )),
        }
    }

    fn read_description(&mut self) -> Result<Vec<&'i str>, ParsingError<'i>> {
        self.skip_separator();
        let line = self.line();

        let mut sentences = Vec::new();
        if self.indented() == Some("Description:") {
            self.advance();
            while let Some(text) = self
                .indented()
                .filter(|text| is_sentence(text))
            {
                sentences.push(text);
                self.advance();
            }
        }

        if sentences.is_empty() {
            return Err(self.problem(
                line,
                1,
                "Invalid description",
                r#"
A 'Description:' line must be followed by one or more indented lines of
prose. Each starts with a capitalized word, continues with words or quoted
"terms" separated by spaces or hyphens, and may end with a period.
                "#
                .trim_ascii()
                .to_string(),
            ));
        }

        Ok(sentences)
    }

    fn read_parameters(&mut self) -> Result<Vec<ParameterSpec<'i>>, ParsingError<'i>> {
        self.skip_separator();
        let line = self.line();

        if self.indented() != Some("Parameter(s):") {
            return Err(self.problem(
                line,
                1,
                "Missing parameters",
                "The header must have a 'Parameter(s):' section, listing 'None' if the file takes no parameters.".to_string(),
            ));
        }
        self.advance();

        let mut parameters = Vec::new();
        if self.indented() == Some("None") {
            self.advance();
            return Ok(parameters);
        }

        loop {
            let line = self.line();
            let parameter = self
                .indented()
                .and_then(|text| self.read_parameter_line(text, parameters.len()));

            match parameter {
                Some(parameter) => parameters.push(parameter),
                None => {
                    return Err(self.problem(
                        line,
                        5,
                        "Invalid parameter definition",
                        format!(
                            r#"
Parameters are numbered sequentially from 0 and written as

    {}: Description <Type> (Default: value)

with one or more types, separated by a comma and a space, drawn from
{}. The list ends with an empty line.
                            "#,
                            parameters.len(),
                            quoted(&self.convention.types)
                        )
                        .trim_ascii()
                        .to_string(),
                    ));
                }
            }
            self.advance();

            if self.at_blank() {
                return Ok(parameters);
            }
        }
    }

    /// A line of the form `N: Description words <Type, Type> (Default: text)`
    /// where `N` must be the expected ordinal.
    fn read_parameter_line(&self, text: &'i str, ordinal: usize) -> Option<ParameterSpec<'i>> {
        let re = regex!(r"^(\d+): ([A-Z]\w+(?:\s\w+)*) <([^<>]*)> \(Default: (.*)\)$");

        let cap = re.captures(text)?;

        let number: usize = cap
            .get(1)?
            .as_str()
            .parse()
            .ok()?;
        if number != ordinal {
            return None;
        }

        let description = cap
            .get(2)?
            .as_str();

        let types: Vec<&'i str> = cap
            .get(3)?
            .as_str()
            .split(", ")
            .collect();
        if !types
            .iter()
            .all(|t| self.convention.is_type(t))
        {
            return None;
        }

        let documented = cap
            .get(4)?
            .as_str();

        Some(ParameterSpec::new(description, types, documented))
    }
}

fn is_sentence(text: &str) -> bool {
    let re = regex!(r#"^[A-Z]\w+(?:(?:\.?\s|-)(?:\w+|"\w[\w/]+\w"))*\.?$"#);
    re.is_match(text)
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("'{}'", name))
        .collect::<Vec<_>>()
        .join(", ")
}
