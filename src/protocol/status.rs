//! Status lines and response classification
//!
//! Every server reply is driven by 3-digit status codes; classification
//! into four dispositions is what lets one read loop serve every command.

/// Header code opening one definition block (DEFINE)
pub const DEFINITION_FOLLOWS: u16 = 151;

/// Header code opening the match listing (MATCH)
pub const MATCHES_FOLLOW: u16 = 152;

/// Header code opening the database listing (SHOW DB)
pub const DATABASES_PRESENT: u16 = 110;

/// Header code opening the strategy listing (SHOW STRATEGIES)
pub const STRATEGIES_AVAILABLE: u16 = 111;

/// A parsed status line: 3-digit code plus trailing text
///
/// Ephemeral: produced per read iteration and not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// The 3-digit status code
    pub code: u16,

    /// Free text following the code
    pub message: String,
}

impl StatusLine {
    /// Try to interpret a reply line as a status line.
    ///
    /// Returns `None` for anything that is not status-shaped: fewer than
    /// 3 characters, a non-digit in the first 3 positions, or a 4th
    /// character that is not a space. Such lines are data, not statuses.
    pub fn parse(line: &str) -> Option<StatusLine> {
        let bytes = line.as_bytes();
        if bytes.len() < 3 {
            return None;
        }
        if !bytes[..3].iter().all(u8::is_ascii_digit) {
            return None;
        }
        if bytes.len() > 3 && bytes[3] != b' ' {
            return None;
        }

        let code = line[..3].parse().ok()?;
        let message = line.get(4..).unwrap_or("").to_string();

        Some(StatusLine { code, message })
    }
}

/// What the read loop does with a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// 1xx: more status/data lines follow for the current reply
    Continue,

    /// Terminal success: 250 command done, 220 greeting, 221 QUIT ack
    Complete,

    /// Terminal with a valid empty result: 552/554/555
    Empty,

    /// Terminal failure: the operation errors with the code and text
    Failed,
}

/// Classify a status code into the action the read loop takes.
///
/// 550 (invalid database) and 551 (invalid strategy) are failures, not
/// empty results: only the three "nothing found" codes end a reply with
/// an empty payload.
pub fn classify(code: u16) -> Disposition {
    match code {
        100..=199 => Disposition::Continue,
        220 | 221 | 250 => Disposition::Complete,
        552 | 554 | 555 => Disposition::Empty,
        _ => Disposition::Failed,
    }
}
