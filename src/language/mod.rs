// Types representing SQF source files as seen by the layout checker

mod error;
mod types;

// Re-export all public symbols
pub use error::*;
pub use types::*;
