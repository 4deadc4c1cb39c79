use crate::UserId;
use thiserror::Error;

pub type Result<T, E = InfectionError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum InfectionError {
    /// A count or proportion outside of what the population allows.
    #[error("{what} is out of range: {value}")]
    InvalidRange { what: &'static str, value: String },

    /// Identifiers are unique across every graph sharing a registry.
    #[error("user {0} already exists, uids must be unique")]
    DuplicateIdentifier(UserId),

    #[error("user {0} does not exist")]
    UnknownUser(UserId),

    /// The component picked for splitting cannot supply the missing users.
    #[error("cannot infect {needed} users from a component of {available}")]
    UnreachableGoal { needed: usize, available: usize },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl InfectionError {
    pub(crate) fn invalid_range(what: &'static str, value: impl ToString) -> Self {
        Self::InvalidRange {
            what,
            value: value.to_string(),
        }
    }
}
