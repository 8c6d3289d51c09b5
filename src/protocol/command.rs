//! Command definitions
//!
//! Represents commands sent to the server, with wire serialization.

use crate::model::DictDatabase;

/// A command to send to the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch definitions of a word
    Define {
        database: DictDatabase,
        word: String,
    },

    /// Fetch words matching a pattern under a strategy
    Match {
        database: DictDatabase,
        strategy: String,
        word: String,
    },

    /// List databases hosted by the server
    ShowDatabases,

    /// List matching strategies supported by the server
    ShowStrategies,

    /// Terminate the session
    Quit,
}

impl Command {
    /// Serialize to the single wire line (without the terminator).
    ///
    /// The word argument is always quoted so that embedded whitespace
    /// travels as one protocol argument.
    pub fn serialize(&self) -> String {
        match self {
            Command::Define { database, word } => {
                format!("DEFINE {} {}", database.as_arg(), quote_word(word))
            }
            Command::Match {
                database,
                strategy,
                word,
            } => {
                format!(
                    "MATCH {} {} {}",
                    database.as_arg(),
                    strategy,
                    quote_word(word)
                )
            }
            Command::ShowDatabases => "SHOW DB".to_string(),
            Command::ShowStrategies => "SHOW STRATEGIES".to_string(),
            Command::Quit => "QUIT".to_string(),
        }
    }
}

/// Quote a word argument, escaping embedded quotes and backslashes
fn quote_word(word: &str) -> String {
    let mut quoted = String::with_capacity(word.len() + 2);
    quoted.push('"');
    for c in word.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
