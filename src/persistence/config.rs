use std::{env, fmt::Display, path::PathBuf};

pub const DEFAULT_TABLE: &str = "dictlitestore";
pub const MEMORY_TARGET: &str = ":memory:";

/// Environment variable holding the database path (or `:memory:`).
pub const ENV_DB: &str = "DICTLITE_DB";
/// Environment variable holding the table name.
pub const ENV_TABLE: &str = "DICTLITE_TABLE";

/// Where the backing database lives.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Target {
    /// A private database that disappears with the store.
    #[default]
    Memory,
    File(PathBuf),
}

impl Target {
    pub fn parse(target: &str) -> Target {
        if target == MEMORY_TARGET {
            Target::Memory
        } else {
            Target::File(PathBuf::from(target))
        }
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Memory => write!(f, "{}", MEMORY_TARGET),
            Target::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Everything needed to open a [`super::DocumentStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub target: Target,
    pub table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::memory()
    }
}

impl StoreConfig {
    pub fn memory() -> StoreConfig {
        StoreConfig {
            target: Target::Memory,
            table: DEFAULT_TABLE.to_string(),
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> StoreConfig {
        StoreConfig {
            target: Target::File(path.into()),
            table: DEFAULT_TABLE.to_string(),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> StoreConfig {
        self.table = table.into();
        self
    }

    pub fn from_env() -> StoreConfig {
        //! Read `DICTLITE_DB` and `DICTLITE_TABLE`, using an in-memory
        //! database and the default table for whatever is unset.

        let target = env::var(ENV_DB)
            .map(|target| Target::parse(&target))
            .unwrap_or_default();
        let table = env::var(ENV_TABLE).unwrap_or_else(|_| DEFAULT_TABLE.to_string());

        StoreConfig { target, table }
    }
}
