//! The opening lines of a new file: include, header comment, and the blank
//! line after it, for a file that takes no parameters.

use serde::Serialize;
use tinytemplate::TinyTemplate;
use tracing::debug;

use crate::convention::Convention;

static TEMPLATE: &str = r#"#include "{include}"
/*
    {title}

    Author: {author}

    Description:
    Does nothing yet.

    Parameter(s):
    None
*/

"#;

#[derive(Serialize)]
struct Context<'a> {
    include: &'a str,
    title: &'a str,
    author: &'a str,
}

/// Render the boilerplate for the given convention. Without an author the
/// first one the convention knows about is used.
pub fn skeleton(
    convention: &Convention,
    author: Option<&str>,
) -> Result<String, tinytemplate::error::Error> {
    let author = author
        .or(convention
            .authors
            .first()
            .map(String::as_str))
        .unwrap_or("");
    debug!(author);

    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template("skeleton", TEMPLATE)?;

    let context = Context {
        include: &convention.include,
        title: &convention.title,
        author,
    };

    tt.render("skeleton", &context)
}
