//! Transport
//!
//! Line-stream abstraction over the server connection, plus the TCP
//! implementation used in production.

use std::io::{BufRead, BufReader, BufWriter, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::Config;
use crate::error::{DictError, Result};

/// A connected bidirectional line stream.
///
/// The session owns exactly one transport for its lifetime and is the
/// only caller; implementations need no internal locking.
pub trait Transport {
    /// Read one line, with the trailing LF (and CR, if any) stripped.
    ///
    /// End-of-stream is a connection error: the server always terminates
    /// a reply with a status line before closing.
    fn read_line(&mut self) -> Result<String>;

    /// Write one line; the terminator is appended and the stream flushed.
    fn write_line(&mut self, line: &str) -> Result<()>;

    /// Release the underlying stream.
    fn shutdown(&mut self) -> Result<()>;
}

/// TCP transport over a blocking stream
pub struct TcpTransport {
    /// Stream reader (buffered for line reads)
    reader: BufReader<TcpStream>,

    /// Stream writer (buffered, flushed per line)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,
}

impl TcpTransport {
    /// Connect to the configured server
    ///
    /// Sets up buffered I/O, disables Nagle's algorithm, and applies the
    /// configured timeouts.
    pub fn connect(config: &Config) -> Result<Self> {
        let stream = open_stream(config)?;

        // Get peer address for logging before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }
        if config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
        }

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        tracing::debug!("Connected to {}", peer_addr);

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
        })
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

/// Resolve and connect, honoring the connect timeout when one is set
fn open_stream(config: &Config) -> Result<TcpStream> {
    let target = (config.host.as_str(), config.port);

    if config.connect_timeout_ms == 0 {
        return TcpStream::connect(target).map_err(|e| {
            DictError::Connection(format!(
                "failed to connect to {}:{}: {}",
                config.host, config.port, e
            ))
        });
    }

    let timeout = Duration::from_millis(config.connect_timeout_ms);
    let addrs = target.to_socket_addrs().map_err(|e| {
        DictError::Connection(format!(
            "failed to resolve {}:{}: {}",
            config.host, config.port, e
        ))
    })?;

    let mut last_err = None;
    for addr in addrs {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_err = Some(e),
        }
    }

    Err(DictError::Connection(match last_err {
        Some(e) => format!("failed to connect to {}:{}: {}", config.host, config.port, e),
        None => format!("no addresses resolved for {}:{}", config.host, config.port),
    }))
}

impl Transport for TcpTransport {
    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let n = self.reader.read_line(&mut line)?;
        if n == 0 {
            return Err(DictError::Connection(format!(
                "connection closed by {}",
                self.peer_addr
            )));
        }

        if line.ends_with('\n') {
            line.pop();
        }
        if line.ends_with('\r') {
            line.pop();
        }

        tracing::trace!("<< {}", line);
        Ok(line)
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        tracing::trace!(">> {}", line);
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        tracing::debug!("Closing connection to {}", self.peer_addr);
        self.writer.get_ref().shutdown(Shutdown::Both)?;
        Ok(())
    }
}
