//! Protocol Tests
//!
//! Tests for status-line parsing, response classification, command
//! serialization, and the block handlers.

use lexiconn::model::DictDatabase;
use lexiconn::protocol::{
    classify, Command, DefineHandler, Disposition, MatchHandler, ReplyHandler, ShowHandler,
    StatusLine,
};

// =============================================================================
// Status Line Parsing Tests
// =============================================================================

#[test]
fn test_parse_status_with_message() {
    let status = StatusLine::parse("250 ok").unwrap();
    assert_eq!(status.code, 250);
    assert_eq!(status.message, "ok");
}

#[test]
fn test_parse_status_greeting() {
    let status = StatusLine::parse("220 dict.example.org dictd 1.12").unwrap();
    assert_eq!(status.code, 220);
    assert_eq!(status.message, "dict.example.org dictd 1.12");
}

#[test]
fn test_parse_status_bare_code() {
    let status = StatusLine::parse("552").unwrap();
    assert_eq!(status.code, 552);
    assert_eq!(status.message, "");
}

#[test]
fn test_parse_rejects_short_lines() {
    assert!(StatusLine::parse("").is_none());
    assert!(StatusLine::parse(".").is_none());
    assert!(StatusLine::parse("25").is_none());
}

#[test]
fn test_parse_rejects_non_digit_prefix() {
    assert!(StatusLine::parse("ok 250").is_none());
    assert!(StatusLine::parse("2x0 message").is_none());
    assert!(StatusLine::parse("bunny").is_none());
}

#[test]
fn test_parse_rejects_missing_separator() {
    // Four-plus characters with no space after the code is data, not a status
    assert!(StatusLine::parse("2500").is_none());
    assert!(StatusLine::parse("151definitions").is_none());
}

// =============================================================================
// Classification Tests
// =============================================================================

#[test]
fn test_classify_informational_codes_continue() {
    for code in [110, 111, 113, 150, 151, 152] {
        assert_eq!(classify(code), Disposition::Continue, "code {}", code);
    }
}

#[test]
fn test_classify_terminal_success() {
    assert_eq!(classify(250), Disposition::Complete);
    assert_eq!(classify(220), Disposition::Complete);
    assert_eq!(classify(221), Disposition::Complete);
}

#[test]
fn test_classify_empty_results() {
    assert_eq!(classify(552), Disposition::Empty);
    assert_eq!(classify(554), Disposition::Empty);
    assert_eq!(classify(555), Disposition::Empty);
}

#[test]
fn test_classify_failures() {
    for code in [420, 430, 500, 501, 502, 503, 530, 531, 532, 599] {
        assert_eq!(classify(code), Disposition::Failed, "code {}", code);
    }
}

#[test]
fn test_classify_invalid_database_and_strategy_are_failures() {
    // 550/551 are "invalid database/strategy", not empty results
    assert_eq!(classify(550), Disposition::Failed);
    assert_eq!(classify(551), Disposition::Failed);
}

// =============================================================================
// Command Serialization Tests
// =============================================================================

#[test]
fn test_serialize_define() {
    let cmd = Command::Define {
        database: DictDatabase::All,
        word: "bunny".to_string(),
    };
    assert_eq!(cmd.serialize(), "DEFINE * \"bunny\"");
}

#[test]
fn test_serialize_define_named_database() {
    let cmd = Command::Define {
        database: DictDatabase::Named("wn".to_string()),
        word: "bunny".to_string(),
    };
    assert_eq!(cmd.serialize(), "DEFINE wn \"bunny\"");
}

#[test]
fn test_serialize_define_first_match_database() {
    let cmd = Command::Define {
        database: DictDatabase::First,
        word: "bunny".to_string(),
    };
    assert_eq!(cmd.serialize(), "DEFINE ! \"bunny\"");
}

#[test]
fn test_serialize_word_with_whitespace() {
    let cmd = Command::Define {
        database: DictDatabase::All,
        word: "bunny hug".to_string(),
    };
    assert_eq!(cmd.serialize(), "DEFINE * \"bunny hug\"");
}

#[test]
fn test_serialize_word_with_quote_and_backslash() {
    let cmd = Command::Define {
        database: DictDatabase::All,
        word: "say \"hi\" \\ back".to_string(),
    };
    assert_eq!(cmd.serialize(), "DEFINE * \"say \\\"hi\\\" \\\\ back\"");
}

#[test]
fn test_serialize_match() {
    let cmd = Command::Match {
        database: DictDatabase::All,
        strategy: "prefix".to_string(),
        word: "bun".to_string(),
    };
    assert_eq!(cmd.serialize(), "MATCH * prefix \"bun\"");
}

#[test]
fn test_serialize_listing_commands() {
    assert_eq!(Command::ShowDatabases.serialize(), "SHOW DB");
    assert_eq!(Command::ShowStrategies.serialize(), "SHOW STRATEGIES");
    assert_eq!(Command::Quit.serialize(), "QUIT");
}

// =============================================================================
// Define Handler Tests
// =============================================================================

#[test]
fn test_define_handler_assembles_body() {
    let mut handler = DefineHandler::new("bunny");

    let header = StatusLine::parse("151 \"bunny\" wn \"WordNet (r) 3.0 (2006)\"").unwrap();
    handler.handle_status(&header).unwrap();

    assert!(handler.take_block_line("bunny").unwrap());
    assert!(handler.take_block_line("").unwrap());
    assert!(handler.take_block_line("    n 1: small mammal").unwrap());
    assert!(handler.take_block_line(".").unwrap());

    // Block closed: next line is no longer claimed
    assert!(!handler.take_block_line("stray").unwrap());

    let definitions = handler.into_definitions();
    assert_eq!(definitions.len(), 1);
    assert_eq!(definitions[0].word, "bunny");
    assert_eq!(definitions[0].database, "wn");
    assert_eq!(definitions[0].text(), "bunny\n\n    n 1: small mammal");
}

#[test]
fn test_define_handler_claims_digit_leading_body_lines() {
    let mut handler = DefineHandler::new("century");

    let header = StatusLine::parse("151 \"century\" gcide \"The Collaborative Dictionary\"").unwrap();
    handler.handle_status(&header).unwrap();

    // A body line that looks exactly like a status line must stay body
    assert!(handler.take_block_line("100 years make a century").unwrap());
    assert!(handler.take_block_line(".").unwrap());

    let definitions = handler.into_definitions();
    assert_eq!(definitions[0].body, vec!["100 years make a century"]);
}

#[test]
fn test_define_handler_rejects_header_without_database() {
    let mut handler = DefineHandler::new("bunny");
    let header = StatusLine::parse("151 \"bunny\"").unwrap();
    assert!(handler.handle_status(&header).is_err());
}

#[test]
fn test_define_handler_rejects_unterminated_header_quote() {
    let mut handler = DefineHandler::new("bunny");
    let header = StatusLine::parse("151 \"bunny wn").unwrap();
    assert!(handler.handle_status(&header).is_err());
}

// =============================================================================
// Match Handler Tests
// =============================================================================

#[test]
fn test_match_handler_collapses_duplicates_in_order() {
    let mut handler = MatchHandler::new();

    handler.handle_entry("wn \"bunny\"").unwrap();
    handler.handle_entry("gcide \"bunny\"").unwrap();
    handler.handle_entry("wn \"bunny hug\"").unwrap();
    handler.handle_entry("moby-thesaurus \"bunny\"").unwrap();

    assert_eq!(handler.into_words(), vec!["bunny", "bunny hug"]);
}

#[test]
fn test_match_handler_skips_unquoted_lines() {
    let mut handler = MatchHandler::new();
    handler.handle_entry("no quotes here").unwrap();
    assert!(handler.into_words().is_empty());
}

#[test]
fn test_match_handler_rejects_unterminated_quote() {
    let mut handler = MatchHandler::new();
    assert!(handler.handle_entry("wn \"bunny").is_err());
}

// =============================================================================
// Show Handler Tests
// =============================================================================

#[test]
fn test_show_handler_splits_entries_on_first_quote() {
    let mut handler = ShowHandler::databases();

    let header = StatusLine::parse("110 2 databases present").unwrap();
    handler.handle_status(&header).unwrap();

    handler.handle_entry("wn \"WordNet (r) 3.0 (2006)\"").unwrap();
    handler
        .handle_entry("gcide \"The Collaborative International Dictionary of English\"")
        .unwrap();

    let entries = handler.into_entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].0, "wn");
    assert_eq!(entries[0].1, "WordNet (r) 3.0 (2006)");
    assert_eq!(
        entries[1].1,
        "The Collaborative International Dictionary of English"
    );
}

#[test]
fn test_show_handler_ignores_entries_before_header() {
    let mut handler = ShowHandler::databases();
    handler.handle_entry("wn \"WordNet\"").unwrap();
    assert!(handler.into_entries().is_empty());
}

#[test]
fn test_show_handler_skips_terminator_dot() {
    let mut handler = ShowHandler::strategies();

    let header = StatusLine::parse("111 1 strategies available").unwrap();
    handler.handle_status(&header).unwrap();

    handler.handle_entry("exact \"Match headwords exactly\"").unwrap();
    handler.handle_entry(".").unwrap();

    assert_eq!(handler.into_entries().len(), 1);
}

#[test]
fn test_show_handler_rejects_entry_without_quote() {
    let mut handler = ShowHandler::databases();

    let header = StatusLine::parse("110 1 database present").unwrap();
    handler.handle_status(&header).unwrap();

    assert!(handler.handle_entry("wn WordNet without quotes").is_err());
}
