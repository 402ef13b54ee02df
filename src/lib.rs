//! Validation of the documentation header and parameter declaration layout
//! of SQF source files.

#[macro_use]
mod regex;

pub mod convention;
pub mod error;
pub mod language;
pub mod parsing;
pub mod templating;
