use std::{fmt, path::Path};

/// Failure to read a source or configuration file from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingError<'i> {
    pub problem: String,
    pub details: String,
    pub filename: &'i Path,
}

impl<'i> fmt::Display for LoadingError<'i> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self
            .details
            .is_empty()
        {
            write!(f, "{}", self.problem)
        } else {
            write!(f, "{}: {}", self.problem, self.details)
        }
    }
}

impl<'i> LoadingError<'i> {
    /// Classify an I/O failure the same way for every kind of file we read.
    pub fn from_io(error: &std::io::Error, filename: &'i Path) -> LoadingError<'i> {
        match error.kind() {
            std::io::ErrorKind::NotFound => LoadingError {
                problem: "File not found".to_string(),
                details: String::new(),
                filename,
            },
            _ => LoadingError {
                problem: "Failed reading".to_string(),
                details: error
                    .kind()
                    .to_string(),
                filename,
            },
        }
    }
}
