//! Reply definitions
//!
//! Represents the outcome of a command and how it maps to an exit status.

use std::collections::{BTreeMap, BTreeSet};

/// Process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    /// Success, or a true answer
    Ok = 0,
    /// Failure, not-found, or a false answer
    Failure = 1,
}

impl Status {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Result of a successfully executed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Completed with nothing to print
    Done,

    /// A yes/no answer, reported only through the exit status
    Bool(bool),

    /// A single value
    Value(String),

    /// A length or an added/removed count
    Count(usize),

    /// List elements or set members, one per line
    Values(Vec<String>),

    /// Key/value pairs
    Pairs(BTreeMap<String, String>),
}

impl Reply {
    pub fn status(&self) -> Status {
        match self {
            Reply::Bool(false) => Status::Failure,
            _ => Status::Ok,
        }
    }

    /// Lines to print on stdout
    pub fn lines(&self) -> Vec<String> {
        match self {
            Reply::Done | Reply::Bool(_) => Vec::new(),
            Reply::Value(value) => vec![value.clone()],
            Reply::Count(count) => vec![count.to_string()],
            Reply::Values(values) => values.clone(),
            Reply::Pairs(pairs) => format_pairs(pairs),
        }
    }
}

impl From<BTreeSet<String>> for Reply {
    fn from(members: BTreeSet<String>) -> Self {
        Reply::Values(members.into_iter().collect())
    }
}

/// `key | value` rows with the separator aligned
fn format_pairs(pairs: &BTreeMap<String, String>) -> Vec<String> {
    let width = pairs.keys().map(|key| key.chars().count()).max().unwrap_or(0);
    pairs
        .iter()
        .map(|(key, value)| format!("{:<width$} | {}", key, value, width = width))
        .collect()
}
