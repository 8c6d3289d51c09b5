//! Data model
//!
//! Value objects returned by session operations, plus the request-side
//! database selector.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A dictionary database hosted by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    /// Short identifier, unique per server (e.g. "wn", "gcide")
    pub name: String,

    /// Human-readable description
    pub description: String,
}

impl Database {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A matching strategy supported by the server (e.g. "exact", "prefix")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingStrategy {
    /// Short identifier
    pub name: String,

    /// Human-readable description
    pub description: String,
}

impl MatchingStrategy {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// One definition of a word, as produced by a single server data block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// The word that was queried
    pub word: String,

    /// Name of the concrete database that produced this definition.
    /// Always a real identifier, never the `*`/`!` selector the request used.
    pub database: String,

    /// Body lines in server emission order; empty lines are preserved
    pub body: Vec<String>,
}

impl Definition {
    pub fn new(word: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            database: database.into(),
            body: Vec::new(),
        }
    }

    pub(crate) fn push_line(&mut self, line: &str) {
        self.body.push(line.to_string());
    }

    /// The body as a single newline-joined string
    pub fn text(&self) -> String {
        self.body.join("\n")
    }
}

/// Database selector for DEFINE/MATCH requests
///
/// `All` and `First` are request-only identifiers; responses always name
/// the concrete database that matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictDatabase {
    /// Query every database (`*`)
    All,

    /// Stop at the first database with a hit (`!`)
    First,

    /// A specific database by name
    Named(String),
}

impl DictDatabase {
    /// The identifier transmitted on the wire
    pub fn as_arg(&self) -> &str {
        match self {
            DictDatabase::All => "*",
            DictDatabase::First => "!",
            DictDatabase::Named(name) => name,
        }
    }
}

impl From<&str> for DictDatabase {
    fn from(name: &str) -> Self {
        match name {
            "*" => DictDatabase::All,
            "!" => DictDatabase::First,
            _ => DictDatabase::Named(name.to_string()),
        }
    }
}

impl From<&Database> for DictDatabase {
    fn from(database: &Database) -> Self {
        DictDatabase::Named(database.name.clone())
    }
}

impl fmt::Display for DictDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}
