//! Protocol Module
//!
//! Status classification, command serialization, and reply parsing for the
//! DICT wire protocol (RFC 2229).
//!
//! ## Wire Format
//!
//! One command per line, LF-terminated on write (CRLF tolerated on read).
//! Replies interleave status lines with data lines.
//!
//! ### Commands
//! ```text
//! DEFINE <db> "<word>"       definitions    250 done / 552 no match
//! MATCH <db> <strat> "<word>" match list    250 done / 552 no match
//! SHOW DB                    database list  250 done / 554 none present
//! SHOW STRATEGIES            strategy list  250 done / 555 none available
//! QUIT                       terminate      221 closing
//! ```
//!
//! ### Status lines
//! Three ASCII digits, a space, free text. `1xx` means more lines follow;
//! `250`/`220`/`221` terminate a reply successfully; `552`/`554`/`555`
//! terminate with a valid empty result; any other code is fatal.
//!
//! ### Data blocks
//! A `151` header opens one definition body, terminated by a lone `.` line.
//! `110`/`111` headers open listings of `<identifier> "<description>"`
//! lines that run until the terminal status.

mod command;
mod status;
mod reply;

pub use command::Command;
pub use status::{
    classify, Disposition, StatusLine, DATABASES_PRESENT, DEFINITION_FOLLOWS, MATCHES_FOLLOW,
    STRATEGIES_AVAILABLE,
};
pub use reply::{DefineHandler, MatchHandler, NullHandler, ReplyHandler, ShowHandler};
