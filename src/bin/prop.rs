//! prop CLI
//!
//! Command-line interface for the prop property store.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use prop::config::{DEFAULT_NAMESPACE, DEFAULT_URL};
use prop::dispatch::{execute, Command, Status};
use prop::{construct_backend, PropError};
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable that disables colored output
const NO_COLOR_ENV: &str = "PROP_CLI_NO_COLOR";

/// prop CLI
#[derive(Parser, Debug)]
#[command(name = "prop")]
#[command(about = "Namespaced property store with Redis-like primitives")]
#[command(version)]
struct Args {
    /// Namespace to interact with
    #[arg(long, global = true, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// URL of the backend to read/write data to
    #[arg(long, global = true, default_value = DEFAULT_URL)]
    url: String,

    /// Disable colored output (PROP_CLI_NO_COLOR also works)
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get the value of a key
    Get {
        key: String,

        /// Returned when the key does not exist
        default_value: Option<String>,
    },

    /// Get all values in a namespace
    GetAll {
        /// Only keys starting with this prefix
        prefix: Option<String>,
    },

    /// Set the value of a key
    Set { key: String, value: String },

    /// Delete a key
    Del { key: String },

    /// Check whether a key exists
    Exists { key: String },

    /// Get an element from a list by its index
    Lindex {
        key: String,

        #[arg(allow_negative_numbers = true)]
        index: i64,
    },

    /// Check whether an element is in a list
    Lismember { key: String, element: String },

    /// Get the length of a list
    Llen { key: String },

    /// Get a range of elements from a list
    Lrange {
        key: String,

        #[arg(allow_negative_numbers = true)]
        start: Option<i64>,

        #[arg(allow_negative_numbers = true)]
        stop: Option<i64>,
    },

    /// Remove elements from a list
    Lrem {
        key: String,

        /// >0 from the head, <0 from the tail, 0 removes all
        #[arg(allow_negative_numbers = true)]
        count: i64,

        element: String,
    },

    /// Set the value of an element in a list by its index
    Lset {
        key: String,

        #[arg(allow_negative_numbers = true)]
        index: i64,

        element: String,
    },

    /// Append one or more elements to a list
    Rpush {
        key: String,

        #[arg(required = true)]
        elements: Vec<String>,
    },

    /// Add one or more members to a set
    Sadd {
        key: String,

        #[arg(required = true)]
        members: Vec<String>,
    },

    /// Check whether a member is in a set
    Sismember { key: String, member: String },

    /// Get all members of a set
    Smembers { key: String },

    /// Remove one or more members from a set
    Srem {
        key: String,

        #[arg(required = true)]
        members: Vec<String>,
    },

    /// Export, import or reset the backend
    #[command(subcommand)]
    Backend(BackendCommands),

    /// Inspect or clear namespaces
    #[command(subcommand)]
    Namespace(NamespaceCommands),
}

#[derive(Subcommand, Debug)]
enum BackendCommands {
    /// Export the namespace to a JSON file
    Export { path: PathBuf },

    /// Import a JSON file, merging unless --clear-backend is given
    Import {
        path: PathBuf,

        /// Remove every existing key first
        #[arg(long)]
        clear_backend: bool,
    },

    /// Remove every key in the namespace
    Reset,
}

#[derive(Subcommand, Debug)]
enum NamespaceCommands {
    /// Check whether a namespace exists
    Exists { namespace: String },

    /// Remove every key in a namespace
    Clear { namespace: String },
}

impl From<Commands> for Command {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Get { key, default_value } => Command::Get {
                key,
                default: default_value.unwrap_or_default(),
            },
            Commands::GetAll { prefix } => Command::GetAll { prefix },
            Commands::Set { key, value } => Command::Set { key, value },
            Commands::Del { key } => Command::Del { key },
            Commands::Exists { key } => Command::Exists { key },
            Commands::Lindex { key, index } => Command::Lindex { key, index },
            Commands::Lismember { key, element } => Command::Lismember { key, element },
            Commands::Llen { key } => Command::Llen { key },
            Commands::Lrange { key, start, stop } => Command::Lrange { key, start, stop },
            Commands::Lrem { key, count, element } => Command::Lrem { key, count, element },
            Commands::Lset { key, index, element } => Command::Lset { key, index, element },
            Commands::Rpush { key, elements } => Command::Rpush { key, elements },
            Commands::Sadd { key, members } => Command::Sadd { key, members },
            Commands::Sismember { key, member } => Command::Sismember { key, member },
            Commands::Smembers { key } => Command::Smembers { key },
            Commands::Srem { key, members } => Command::Srem { key, members },
            Commands::Backend(BackendCommands::Export { path }) => Command::BackendExport { path },
            Commands::Backend(BackendCommands::Import { path, clear_backend }) => Command::BackendImport {
                path,
                clear: clear_backend,
            },
            Commands::Backend(BackendCommands::Reset) => Command::BackendReset,
            Commands::Namespace(NamespaceCommands::Exists { namespace }) => Command::NamespaceExists { namespace },
            Commands::Namespace(NamespaceCommands::Clear { namespace }) => Command::NamespaceClear { namespace },
        }
    }
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only command output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.no_color || std::env::var_os(NO_COLOR_ENV).is_some() {
        colored::control::set_override(false);
    }

    tracing::debug!(url = %args.url, namespace = %args.namespace, "prop v{}", prop::VERSION);

    let backend = match construct_backend(&args.url, &args.namespace) {
        Ok(backend) => backend,
        Err(e) => return fail(&e),
    };

    match execute(backend.as_ref(), args.command.into()) {
        Ok(reply) => {
            for line in reply.lines() {
                println!("{}", line);
            }
            ExitCode::from(reply.status().code())
        }
        Err(e) => fail(&e),
    }
}

fn fail(error: &PropError) -> ExitCode {
    eprintln!("{} {}", "Error:".red().bold(), error);
    ExitCode::from(Status::Failure.code())
}
