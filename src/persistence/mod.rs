//! Persistence of schema-less records in a single relational table needs
//! the following components
//! - Value (the tagged value a record key maps to, plus the raw escape hatch)
//! - Codec (value to stored text and back, type preserving where possible)
//! - Identifier (record keys to injection-safe column identifiers)
//! - Schema (the monotonically growing column set of the table)
//! - Predicate (filters and orderings compiled to parameterized SQL)
//! - Row (records to cells and back, absent keys stay absent)
//! - Store (the facade that ties the above to a SQLite connection)
//!

//  All modules of this lib
mod codec;
mod config;
mod error;
mod identifier;
mod predicate;
mod row;
mod schema;
mod store;
mod value;

//  External API
pub use codec::{decode, encode, encode_strict};
pub use config::{DEFAULT_TABLE, ENV_DB, ENV_TABLE, MEMORY_TARGET, StoreConfig, Target};
pub use error::{DocStoreError, Result};
pub use identifier::{column_name, key_from_column, quote_identifier, quote_key};
pub use predicate::{Direction, Operator, Order, Predicate};
pub use row::record_from_json;
pub use store::DocumentStore;
pub use value::{Opaque, Record, Value};
