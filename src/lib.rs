//! # lexiconn
//!
//! A client for the DICT protocol (RFC 2229) with:
//! - A persistent, single-connection TCP session
//! - Word definitions, pattern matches, database and strategy listings
//! - One generic reply-draining loop shared by every command
//! - Pluggable transport for testing without a network
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Caller / CLI                           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Session                                │
//! │        (command write + generic reply drain loop)            │
//! └──────────┬──────────────────────────┬───────────────────────┘
//!            │                          │
//!            ▼                          ▼
//!     ┌─────────────┐           ┌──────────────┐
//!     │  Protocol   │           │  Transport   │
//!     │  (status /  │           │  (TCP line   │
//!     │  handlers)  │           │   stream)    │
//!     └─────────────┘           └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod model;
pub mod protocol;
pub mod transport;
pub mod session;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DictError, Result};
pub use config::Config;
pub use model::{Database, Definition, DictDatabase, MatchingStrategy};
pub use session::Session;
pub use transport::{TcpTransport, Transport};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of lexiconn
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default DICT server port (RFC 2229)
pub const DEFAULT_PORT: u16 = 2628;
