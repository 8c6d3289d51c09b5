//! Reply parsing
//!
//! Per-command handlers fed by the session's generic reply loop. Each
//! handler consumes the raw lines between a header status and the reply
//! terminator and accumulates typed records.

use std::collections::HashSet;

use crate::error::{DictError, Result};
use crate::model::Definition;

use super::status::{StatusLine, DATABASES_PRESENT, DEFINITION_FOLLOWS, STRATEGIES_AVAILABLE};

/// Per-command strategy driven by the reply loop.
///
/// The loop offers every raw line to `take_block_line` first, so a handler
/// with an open data block can claim lines that would otherwise be
/// misread as status lines (a definition body line may start with three
/// digits). Unclaimed lines are parsed as statuses; intermediate (1xx)
/// statuses go to `handle_status`, and lines that are neither block data
/// nor status-shaped go to `handle_entry`.
pub trait ReplyHandler {
    /// Claim a line as data belonging to an open block. Returns true if
    /// the line was consumed.
    fn take_block_line(&mut self, line: &str) -> Result<bool> {
        let _ = line;
        Ok(false)
    }

    /// React to an intermediate (1xx) status line.
    fn handle_status(&mut self, status: &StatusLine) -> Result<()> {
        let _ = status;
        Ok(())
    }

    /// Consume a data line outside any block (listing entries).
    fn handle_entry(&mut self, line: &str) -> Result<()> {
        let _ = line;
        Ok(())
    }
}

/// Handler that discards everything; used for the greeting and QUIT.
pub struct NullHandler;

impl ReplyHandler for NullHandler {}

// =============================================================================
// DEFINE
// =============================================================================

/// Assembles Definition records from `151` blocks
pub struct DefineHandler {
    word: String,
    current: Option<Definition>,
    definitions: Vec<Definition>,
}

impl DefineHandler {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            current: None,
            definitions: Vec::new(),
        }
    }

    pub fn into_definitions(self) -> Vec<Definition> {
        self.definitions
    }
}

impl ReplyHandler for DefineHandler {
    fn take_block_line(&mut self, line: &str) -> Result<bool> {
        if self.current.is_none() {
            return Ok(false);
        }
        if line == "." {
            if let Some(definition) = self.current.take() {
                self.definitions.push(definition);
            }
        } else if let Some(definition) = self.current.as_mut() {
            // Verbatim, empty lines included: body formatting is the payload.
            definition.push_line(line);
        }
        Ok(true)
    }

    fn handle_status(&mut self, status: &StatusLine) -> Result<()> {
        if status.code == DEFINITION_FOLLOWS {
            // The header names the concrete database that matched; a
            // wildcard request must report that, not the selector it sent.
            let database = parse_definition_header(&status.message)?;
            self.current = Some(Definition::new(&self.word, database));
        }
        Ok(())
    }
}

/// Extract the database identifier from a `151` header.
///
/// Shape: `"word" database "description"`; the identifier is the token
/// following the quoted word.
fn parse_definition_header(message: &str) -> Result<String> {
    let rest = message.trim_start();
    let after_word = if let Some(stripped) = rest.strip_prefix('"') {
        match stripped.find('"') {
            Some(end) => &stripped[end + 1..],
            None => {
                return Err(DictError::MalformedResponse(format!(
                    "definition header missing closing quote: {}",
                    message
                )))
            }
        }
    } else {
        match rest.find(char::is_whitespace) {
            Some(end) => &rest[end..],
            None => "",
        }
    };

    after_word
        .split_whitespace()
        .next()
        .map(|name| name.to_string())
        .ok_or_else(|| {
            DictError::MalformedResponse(format!(
                "definition header missing database: {}",
                message
            ))
        })
}

// =============================================================================
// MATCH
// =============================================================================

/// Collects matched words, collapsing duplicates in first-seen order
pub struct MatchHandler {
    seen: HashSet<String>,
    words: Vec<String>,
}

impl MatchHandler {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
            words: Vec::new(),
        }
    }

    pub fn into_words(self) -> Vec<String> {
        self.words
    }
}

impl Default for MatchHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplyHandler for MatchHandler {
    fn handle_entry(&mut self, line: &str) -> Result<()> {
        if line == "." || line.is_empty() {
            return Ok(());
        }
        let Some(first) = line.find('"') else {
            // No quoted token on this line; nothing to collect.
            return Ok(());
        };
        let last = line.rfind('"').unwrap_or(first);
        if last == first {
            return Err(DictError::MalformedResponse(format!(
                "unterminated quote in match line: {}",
                line
            )));
        }

        let word = &line[first + 1..last];
        if self.seen.insert(word.to_string()) {
            self.words.push(word.to_string());
        }
        Ok(())
    }
}

// =============================================================================
// SHOW DB / SHOW STRATEGIES
// =============================================================================

/// Collects `<identifier> "<description>"` listing entries.
///
/// One handler serves both listings; only the header code differs (110
/// for databases, 111 for strategies). Entries run until the terminal
/// status, so status parsing stays active while collecting.
pub struct ShowHandler {
    header: u16,
    collecting: bool,
    entries: Vec<(String, String)>,
}

impl ShowHandler {
    /// Handler for a SHOW DB reply
    pub fn databases() -> Self {
        Self::new(DATABASES_PRESENT)
    }

    /// Handler for a SHOW STRATEGIES reply
    pub fn strategies() -> Self {
        Self::new(STRATEGIES_AVAILABLE)
    }

    fn new(header: u16) -> Self {
        Self {
            header,
            collecting: false,
            entries: Vec::new(),
        }
    }

    pub fn into_entries(self) -> Vec<(String, String)> {
        self.entries
    }
}

impl ReplyHandler for ShowHandler {
    fn handle_status(&mut self, status: &StatusLine) -> Result<()> {
        if status.code == self.header {
            self.collecting = true;
        }
        Ok(())
    }

    fn handle_entry(&mut self, line: &str) -> Result<()> {
        // Some servers emit a lone "." before the terminal status; the
        // listing itself ends on the status, so skip it.
        if !self.collecting || line == "." || line.is_empty() {
            return Ok(());
        }

        let quote = line.find('"').ok_or_else(|| {
            DictError::MalformedResponse(format!(
                "listing entry missing description quote: {}",
                line
            ))
        })?;

        let name = line[..quote].trim().to_string();
        let description = &line[quote + 1..];
        let description = description.strip_suffix('"').unwrap_or(description);

        self.entries.push((name, description.to_string()));
        Ok(())
    }
}
