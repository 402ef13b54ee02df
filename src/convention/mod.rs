//! The tables describing what a conformant file looks like. Changing the
//! house style of a project means changing these values, nothing else.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::language::LoadingError;

/// The literal a type check must use to represent a declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sentinel {
    /// `[]`. Also demands an array size check after the type bracket.
    EmptyArray,
    /// `{}`
    EmptyCode,
    Command(String),
    Number(String),
    String(String),
}

impl Sentinel {
    /// How the sentinel reads in an error message.
    pub fn describe(&self) -> &str {
        match self {
            Sentinel::EmptyArray => "[]",
            Sentinel::EmptyCode => "{}",
            Sentinel::Command(name) => name.as_str(),
            Sentinel::Number(text) => text.as_str(),
            Sentinel::String(text) if text.is_empty() => "empty string",
            Sentinel::String(text) => text.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Convention {
    pub title: String,
    pub authors: Vec<String>,
    pub types: Vec<String>,
    pub include: String,
    pub parameters_command: String,
    pub sentinels: Vec<(String, Sentinel)>,
}

impl Default for Convention {
    fn default() -> Self {
        let command = |name: &str| Sentinel::Command(name.to_string());

        Convention {
            title: "Arma At War".to_string(),
            authors: ["BadGuy", "joko // Jonas", "NetFusion"]
                .iter()
                .map(|name| name.to_string())
                .collect(),
            types: [
                "Anything", "Array", "Bool", "Code", "Control", "Display", "Group", "Number",
                "Object", "Side", "String",
            ]
            .iter()
            .map(|name| name.to_string())
            .collect(),
            include: "macros.hpp".to_string(),
            parameters_command: "params".to_string(),
            sentinels: vec![
                ("Array".to_string(), Sentinel::EmptyArray),
                ("Bool".to_string(), command("true")),
                ("Code".to_string(), Sentinel::EmptyCode),
                ("Control".to_string(), command("controlNull")),
                ("Display".to_string(), command("displayNull")),
                ("Group".to_string(), command("grpNull")),
                ("Number".to_string(), Sentinel::Number("0".to_string())),
                ("Object".to_string(), command("objNull")),
                ("Side".to_string(), command("sideUnknown")),
                ("String".to_string(), Sentinel::String(String::new())),
            ],
        }
    }
}

impl Convention {
    /// Read a convention from a JSON file.
    pub fn load(filename: &Path) -> Result<Convention, LoadingError<'_>> {
        let content = std::fs::read_to_string(filename).map_err(|error| {
            debug!(?error);
            LoadingError::from_io(&error, filename)
        })?;

        serde_json::from_str(&content).map_err(|error| LoadingError {
            problem: "Invalid convention".to_string(),
            details: error.to_string(),
            filename,
        })
    }

    pub fn is_author(&self, name: &str) -> bool {
        self.authors
            .iter()
            .any(|author| author == name)
    }

    pub fn is_type(&self, name: &str) -> bool {
        self.types
            .iter()
            .any(|t| t == name)
    }

    /// `None` for types that are accepted in a header but carry no type
    /// check literal, such as `Anything`.
    pub fn sentinel(&self, name: &str) -> Option<&Sentinel> {
        self.sentinels
            .iter()
            .find(|(t, _)| t == name)
            .map(|(_, sentinel)| sentinel)
    }

    /// Whether any of the given types requires a size check following the
    /// type bracket.
    pub fn needs_size_check(&self, types: &[&str]) -> bool {
        types
            .iter()
            .any(|t| self.sentinel(t) == Some(&Sentinel::EmptyArray))
    }
}
