//! Checking SQF files against the header and parameter layout convention

use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::convention::Convention;
use crate::error::ParsingError;
use crate::language::{Header, LoadingError, Token};

pub mod header;
pub mod layout;
pub mod lexer;
pub mod parser;

/// Read a file and return an owned String. We pass that ownership back to the
/// caller so that the tokens and errors borrowing from it can have the same
/// lifetime.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            Err(LoadingError::from_io(&error, filename))
        }
    }
}

/// What searching a path turned up: the files to check, and every directory
/// or entry that could not be read along the way.
#[derive(Debug, Default)]
pub struct Discovered {
    pub files: Vec<PathBuf>,
    pub unreadable: Vec<(PathBuf, io::Error)>,
}

/// Find every file with the given extension beneath the supplied path. A
/// path naming a file directly is always included.
pub fn discover<'a>(path: &'a Path, extension: &str) -> Result<Discovered, LoadingError<'a>> {
    let mut found = Discovered::default();

    if path.is_file() {
        found
            .files
            .push(path.to_path_buf());
        return Ok(found);
    }

    let entries = read_entries(path).map_err(|error| {
        debug!(?error);
        LoadingError::from_io(&error, path)
    })?;

    walk(path, entries, extension, &mut found);
    Ok(found)
}

fn read_entries(directory: &Path) -> io::Result<Vec<io::Result<PathBuf>>> {
    let entries = std::fs::read_dir(directory)?;
    Ok(entries
        .map(|entry| entry.map(|entry| entry.path()))
        .collect())
}

fn walk(
    directory: &Path,
    entries: Vec<io::Result<PathBuf>>,
    extension: &str,
    found: &mut Discovered,
) {
    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => paths.push(path),
            Err(error) => {
                warn!("Unreadable entry in {}: {}", directory.display(), error);
                found
                    .unreadable
                    .push((directory.to_path_buf(), error));
            }
        }
    }
    paths.sort();

    for path in paths {
        if path.is_dir() {
            match read_entries(&path) {
                Ok(entries) => walk(&path, entries, extension, found),
                Err(error) => {
                    warn!("Unreadable directory {}: {}", path.display(), error);
                    found
                        .unreadable
                        .push((path, error));
                }
            }
        } else if path
            .extension()
            .and_then(|s| s.to_str())
            == Some(extension)
        {
            found
                .files
                .push(path);
        }
    }
}

/// Split text into tokens, presenting any failure the same way as the
/// layout errors that follow.
pub fn lex<'i>(filename: &'i Path, content: &'i str) -> Result<Vec<Token<'i>>, ParsingError<'i>> {
    lexer::lex(content).map_err(|error| ParsingError {
        problem: error.problem,
        details: "The file could not be split into tokens, so its layout was not checked."
            .to_string(),
        filename,
        source: content,
        line: error.line,
        column: error.column,
    })
}

/// Check the tokens of one file, returning the header (with its parameters
/// bound to the variables found in code) or the first violation.
pub fn validate<'i>(
    tokens: Vec<Token<'i>>,
    filename: &'i Path,
    content: &'i str,
    convention: &Convention,
) -> Result<Header<'i>, ParsingError<'i>> {
    let mut checker = layout::LayoutChecker::new(tokens, filename, content, convention);
    checker.check()
}

/// Check one file, reporting the violation if there is one. Returns the
/// number of failures, which is 0 or 1.
pub fn check_layout<'i>(
    tokens: Vec<Token<'i>>,
    filename: &'i Path,
    content: &'i str,
    convention: &Convention,
) -> u32 {
    match validate(tokens, filename, content, convention) {
        Ok(header) => {
            debug!(
                "{}: {} parameter{} conformant",
                filename.display(),
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
            0
        }
        Err(error) => {
            eprintln!("{}\n", error.full_details());
            1
        }
    }
}
