use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of a ledger operation.
///
/// `Exists` and `NotFound` describe ledger state, not failures. `Unknown` is
/// reserved for a client that could not complete the round trip; a store
/// never produces it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Success,
    Exists,
    NotFound,
    Unknown,
}

impl Status {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success => "Success",
            Self::Exists => "Exists",
            Self::NotFound => "NotFound",
            Self::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}
