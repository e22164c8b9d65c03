use thiserror::Error;

/// Everything that can go wrong while talking to a [`super::DocumentStore`].
///
/// Failures of the backing SQLite engine are carried unmodified in
/// [`DocStoreError::Backing`]; the store never retries a statement.
#[derive(Debug, Error)]
pub enum DocStoreError {
    /// The value has no canonical serialization and no text form either.
    #[error("unencodable value: {0}")]
    Unencodable(String),

    /// A predicate used an operator symbol outside the allow-list.
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    /// An order clause used a direction other than ASC or DESC.
    #[error("unknown sort direction '{0}'")]
    UnknownDirection(String),

    /// The record handed in from outside is not a key/value mapping.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("could not open store at '{target}': {source}")]
    Open {
        target: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("could not close store: {0}")]
    Close(#[source] rusqlite::Error),

    #[error("could not write output: {0}")]
    Output(#[from] std::io::Error),

    #[error(transparent)]
    Backing(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, DocStoreError>;
