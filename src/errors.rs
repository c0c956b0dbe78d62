use crate::models::HabitId;
use std::fmt;

/// Any failure of a remote call: network, timeout, non-2xx status or an
/// undecodable body. Callers never distinguish between these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    pub message: String,
}

impl TransportFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport failure: {}", self.message)
    }
}

impl std::error::Error for TransportFailure {}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitError {
    Transport(TransportFailure),
    InvalidHabitId(HabitId),
    NoSnapshot,
}

impl fmt::Display for HabitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => err.fmt(f),
            Self::InvalidHabitId(id) => write!(f, "habit {id} is not scheduled for this day"),
            Self::NoSnapshot => f.write_str("day has not been loaded"),
        }
    }
}

impl std::error::Error for HabitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TransportFailure> for HabitError {
    fn from(err: TransportFailure) -> Self {
        Self::Transport(err)
    }
}
