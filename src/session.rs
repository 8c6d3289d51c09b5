//! Session
//!
//! The protocol session: one connection, one in-flight command, and the
//! generic reply loop every operation shares.
//!
//! ## Concurrency Model
//!
//! The protocol carries no request identifiers, so two interleaved
//! commands would corrupt the shared line stream. Every public operation
//! takes `&self` and serializes through one interior mutex: lock, write
//! the command line, drain the reply to its terminal status, unlock.
//!
//! ## Connection State
//!
//! The transport lives inside an explicit `LinkState` enum. `close()`
//! moves it out exactly once; operations attempted afterwards fail fast
//! with a connection error instead of touching a dead stream.

use std::collections::BTreeMap;

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{DictError, Result};
use crate::model::{Database, Definition, DictDatabase, MatchingStrategy};
use crate::protocol::{
    classify, Command, DefineHandler, Disposition, MatchHandler, NullHandler, ReplyHandler,
    ShowHandler, StatusLine,
};
use crate::transport::{TcpTransport, Transport};

/// Terminal result of draining one reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// The command completed with whatever the handler accumulated
    Complete,

    /// The server reported a valid empty result (no match / no entries)
    Empty,
}

/// Connection state: the transport is owned here and released exactly once
#[derive(Debug)]
enum LinkState<T> {
    Open(T),
    Closed,
}

/// A DICT protocol session over one persistent connection
#[derive(Debug)]
pub struct Session<T: Transport = TcpTransport> {
    link: Mutex<LinkState<T>>,
}

impl Session<TcpTransport> {
    /// Connect to a server on the default DICT port and validate the greeting
    pub fn connect(host: impl Into<String>) -> Result<Self> {
        Self::connect_with(Config::builder().host(host).build())
    }

    /// Connect to an explicit host and port
    pub fn connect_to(host: impl Into<String>, port: u16) -> Result<Self> {
        Self::connect_with(Config::builder().host(host).port(port).build())
    }

    /// Connect using an explicit config
    pub fn connect_with(config: Config) -> Result<Self> {
        let transport = TcpTransport::connect(&config)?;
        Self::with_transport(transport)
    }
}

impl<T: Transport> Session<T> {
    /// Wrap an already-connected transport and validate the server greeting.
    ///
    /// A fatal greeting status or a transport failure aborts construction
    /// as a connection error; the transport is released on that path.
    pub fn with_transport(mut transport: T) -> Result<Self> {
        let mut handler = NullHandler;
        match drain_reply(&mut transport, &mut handler) {
            Ok(Outcome::Complete) => {}
            Ok(Outcome::Empty) => {
                let _ = transport.shutdown();
                return Err(DictError::Connection(
                    "unexpected greeting status".to_string(),
                ));
            }
            Err(e) => {
                let _ = transport.shutdown();
                return Err(match e {
                    DictError::Protocol { code, message } => DictError::Connection(format!(
                        "server refused session: {} {}",
                        code, message
                    )),
                    DictError::Io(io) => {
                        DictError::Connection(format!("greeting failed: {}", io))
                    }
                    other => other,
                });
            }
        }

        tracing::debug!("Session established");
        Ok(Self {
            link: Mutex::new(LinkState::Open(transport)),
        })
    }

    /// Fetch all definitions of `word` from the selected database.
    ///
    /// Each returned Definition names the concrete database that produced
    /// it, even when the request used `*` or `!`. A "no match" reply
    /// yields an empty Vec, not an error.
    pub fn define(&self, word: &str, database: &DictDatabase) -> Result<Vec<Definition>> {
        let mut handler = DefineHandler::new(word);
        self.exchange(
            &Command::Define {
                database: database.clone(),
                word: word.to_string(),
            },
            &mut handler,
        )?;
        Ok(handler.into_definitions())
    }

    /// Fetch words matching `word` under `strategy` in the selected database.
    ///
    /// Duplicates are collapsed; first-seen order is preserved.
    pub fn match_words(
        &self,
        word: &str,
        strategy: &str,
        database: &DictDatabase,
    ) -> Result<Vec<String>> {
        let mut handler = MatchHandler::new();
        self.exchange(
            &Command::Match {
                database: database.clone(),
                strategy: strategy.to_string(),
                word: word.to_string(),
            },
            &mut handler,
        )?;
        Ok(handler.into_words())
    }

    /// Fetch the databases hosted by the server, keyed by identifier
    pub fn databases(&self) -> Result<BTreeMap<String, Database>> {
        let mut handler = ShowHandler::databases();
        self.exchange(&Command::ShowDatabases, &mut handler)?;

        Ok(handler
            .into_entries()
            .into_iter()
            .map(|(name, description)| (name.clone(), Database::new(name, description)))
            .collect())
    }

    /// Fetch the matching strategies supported by the server
    pub fn strategies(&self) -> Result<Vec<MatchingStrategy>> {
        let mut handler = ShowHandler::strategies();
        self.exchange(&Command::ShowStrategies, &mut handler)?;

        let mut strategies: Vec<MatchingStrategy> = Vec::new();
        for (name, description) in handler.into_entries() {
            if strategies.iter().any(|s| s.name == name) {
                continue;
            }
            strategies.push(MatchingStrategy::new(name, description));
        }
        Ok(strategies)
    }

    /// Send QUIT and release the transport. Best-effort and idempotent:
    /// transport errors are logged, never propagated, and the transport
    /// is released on every path.
    pub fn close(&self) {
        let mut link = self.link.lock();
        let LinkState::Open(mut transport) = std::mem::replace(&mut *link, LinkState::Closed)
        else {
            return;
        };

        if let Err(e) = transport.write_line(&Command::Quit.serialize()) {
            tracing::debug!("QUIT write failed: {}", e);
        } else {
            let mut handler = NullHandler;
            match drain_reply(&mut transport, &mut handler) {
                Ok(_) => tracing::debug!("Server acknowledged QUIT"),
                Err(e) => tracing::debug!("QUIT acknowledgement not received: {}", e),
            }
        }

        if let Err(e) = transport.shutdown() {
            tracing::debug!("Transport shutdown failed: {}", e);
        }
    }

    /// Write one command and drain its reply under the session lock
    fn exchange<H: ReplyHandler>(&self, command: &Command, handler: &mut H) -> Result<Outcome> {
        let mut link = self.link.lock();
        let LinkState::Open(transport) = &mut *link else {
            return Err(DictError::Connection("session is closed".to_string()));
        };

        let line = command.serialize();
        tracing::debug!("-> {}", line);
        transport.write_line(&line)?;

        drain_reply(transport, handler)
    }
}

impl<T: Transport> Drop for Session<T> {
    fn drop(&mut self) {
        self.close();
    }
}

/// The generic reply driver.
///
/// Reads lines until a terminal status: each line is first offered to the
/// handler as block data (so definition bodies can claim digit-leading
/// lines), then parsed as a status and classified; lines that are neither
/// go to the handler as listing entries.
fn drain_reply<T, H>(transport: &mut T, handler: &mut H) -> Result<Outcome>
where
    T: Transport,
    H: ReplyHandler,
{
    loop {
        let line = transport.read_line()?;

        if handler.take_block_line(&line)? {
            continue;
        }

        match StatusLine::parse(&line) {
            Some(status) => {
                tracing::trace!("status {}: {}", status.code, status.message);
                match classify(status.code) {
                    Disposition::Continue => handler.handle_status(&status)?,
                    Disposition::Complete => return Ok(Outcome::Complete),
                    Disposition::Empty => return Ok(Outcome::Empty),
                    Disposition::Failed => {
                        return Err(DictError::protocol(status.code, status.message))
                    }
                }
            }
            None => handler.handle_entry(&line)?,
        }
    }
}
