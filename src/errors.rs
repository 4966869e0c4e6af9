//! Unified error type for the sales tracker.
//!
//! Every fallible operation in the crate returns [`Result`], so callers can
//! propagate with `?` and the presentation layer can surface a single message.

use std::fmt;
use thiserror::Error;

/// Which collection an unknown id was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Root of the hierarchy
    Client,
    /// Store (filial) owned by a client
    Store,
    /// Employee (funcionário) working in a store
    Employee,
    /// Discrete sale record
    Sale,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Client => "Client",
            Self::Store => "Store",
            Self::Employee => "Employee",
            Self::Sale => "Sale",
        };
        f.write_str(label)
    }
}

/// Errors produced by the sales tracker.
#[derive(Debug, Error)]
pub enum Error {
    /// Unknown id, dangling parent reference or invalid navigation target
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Collection that was searched
        kind: EntityKind,
        /// The id that could not be resolved
        id: String,
    },

    /// Input that could not be read as a monetary amount
    #[error("Invalid amount: {input:?}")]
    InvalidAmount {
        /// Raw input as received at the edit boundary
        input: String,
    },

    /// Advisory: the super goal sits below the goal
    #[error("Inconsistent goal for {id}: super goal {super_goal} is below goal {goal}")]
    InconsistentGoal {
        /// Entity carrying the goals
        id: String,
        /// Daily goal
        goal: f64,
        /// Daily super goal
        super_goal: f64,
    },

    /// A year/month/day triple that is not a calendar date
    #[error("Invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        /// Calendar year
        year: i32,
        /// Month (1-12)
        month: u32,
        /// Day of month
        day: u32,
    },

    /// Grid cell on a node whose value is a roll-up of its children
    #[error("Cell of {node} is a roll-up and cannot be edited")]
    RollupCell {
        /// Client or store the edit targeted
        node: String,
    },

    /// Configuration or seed data problem
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
    },

    /// I/O failure while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Date string that does not parse
    #[error("Date parse error: {0}")]
    DateParse(#[from] chrono::ParseError),
}

impl Error {
    /// Shorthand for building a [`Error::NotFound`].
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
