//! lexiconn CLI
//!
//! Command-line client for DICT servers.

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use lexiconn::{Config, DictDatabase, Session};

/// lexiconn CLI
#[derive(Parser, Debug)]
#[command(name = "lexiconn-cli")]
#[command(about = "DICT protocol (RFC 2229) client")]
#[command(version)]
struct Args {
    /// Server hostname
    #[arg(short, long, default_value = "dict.org")]
    server: String,

    /// Server port
    #[arg(short, long, default_value_t = lexiconn::DEFAULT_PORT)]
    port: u16,

    /// Emit results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up definitions of a word
    Define {
        /// The word to define
        word: String,

        /// Database to query ('*' for all, '!' for first match)
        #[arg(short, long, default_value = "*")]
        database: String,
    },

    /// List words matching a pattern
    Match {
        /// The pattern to match
        word: String,

        /// Matching strategy (e.g. exact, prefix)
        #[arg(long, default_value = "prefix")]
        strategy: String,

        /// Database to query ('*' for all, '!' for first match)
        #[arg(short, long, default_value = "*")]
        database: String,
    },

    /// List databases hosted by the server
    Databases,

    /// List matching strategies supported by the server
    Strategies,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,lexiconn=info"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> lexiconn::Result<()> {
    let config = Config::builder()
        .host(args.server.as_str())
        .port(args.port)
        .build();

    tracing::info!("Connecting to {}:{}", args.server, args.port);
    let session = Session::connect_with(config)?;

    match &args.command {
        Commands::Define { word, database } => {
            let definitions = session.define(word, &DictDatabase::from(database.as_str()))?;
            if args.json {
                print_json(&definitions);
            } else if definitions.is_empty() {
                println!("No definitions found for \"{}\"", word);
            } else {
                for definition in &definitions {
                    println!("From {}:", definition.database);
                    println!("{}", definition.text());
                    println!();
                }
            }
        }

        Commands::Match {
            word,
            strategy,
            database,
        } => {
            let words =
                session.match_words(word, strategy, &DictDatabase::from(database.as_str()))?;
            if args.json {
                print_json(&words);
            } else if words.is_empty() {
                println!("No matches found for \"{}\"", word);
            } else {
                for word in &words {
                    println!("{}", word);
                }
            }
        }

        Commands::Databases => {
            let databases = session.databases()?;
            if args.json {
                print_json(&databases);
            } else {
                for database in databases.values() {
                    println!("{:<16} {}", database.name, database.description);
                }
            }
        }

        Commands::Strategies => {
            let strategies = session.strategies()?;
            if args.json {
                print_json(&strategies);
            } else {
                for strategy in &strategies {
                    println!("{:<16} {}", strategy.name, strategy.description);
                }
            }
        }
    }

    session.close();
    Ok(())
}

/// Print a value as pretty JSON
fn print_json<V: Serialize>(value: &V) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!("Failed to serialize output: {}", e),
    }
}
