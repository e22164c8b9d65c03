//! The place where the command line and its arguments are defined, and
//! where their text is turned into records, predicates and orders.

use clap::{Args, Parser, Subcommand};

use crate::persistence::{
    Direction, DocStoreError, Order, Predicate, Record, Result, Value, record_from_json,
};

#[derive(Parser)]
#[command(name = "dictlite")]
#[command(about = "A schema-less dictionary store on top of SQLite", long_about = None)]
pub struct CliParser {
    /// Database file, or ':memory:'. Falls back to $DICTLITE_DB.
    #[arg(long)]
    pub db: Option<String>,

    /// Table holding the records. Falls back to $DICTLITE_TABLE.
    #[arg(long)]
    pub table: Option<String>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand)]
pub enum CliCommand {
    /// Store a JSON object as a new record.
    Store { record: String },

    /// Print matching records, one JSON object per line.
    Get {
        #[command(flatten)]
        filter: WhereArgs,

        /// KEY or KEY:ASC or KEY:DESC, repeat for tie-breakers.
        #[arg(long = "order")]
        order: Vec<String>,
    },

    /// Set the keys of a JSON object on every matching record.
    Update {
        values: String,

        /// Store the values as a new record when nothing matches.
        #[arg(long)]
        insert: bool,

        #[command(flatten)]
        filter: WhereArgs,
    },

    /// Delete matching records, or all of them.
    Delete {
        #[command(flatten)]
        filter: WhereArgs,
    },

    /// List the keys the table has columns for.
    Columns,
}

#[derive(Args)]
pub struct WhereArgs {
    /// Only touch records where KEY OP VALUE holds. VALUE is JSON, or plain
    /// text when it does not parse.
    #[arg(
        long = "where",
        num_args = 3,
        value_names = ["KEY", "OP", "VALUE"],
        allow_hyphen_values = true
    )]
    pub condition: Option<Vec<String>>,

    /// Compare VALUE verbatim against the stored text.
    #[arg(long, requires = "condition")]
    pub raw: bool,
}

impl WhereArgs {
    pub fn predicate(&self) -> Option<Predicate> {
        let condition = self.condition.as_ref()?;
        let [key, operator, value] = condition.as_slice() else {
            return None;
        };

        let value = if self.raw {
            Value::raw(value.as_str())
        } else {
            parse_value(value)
        };

        Some(Predicate::new(key.as_str(), operator.as_str(), value))
    }
}

pub fn parse_value(text: &str) -> Value {
    //! JSON text becomes the value it describes, anything else a string.

    serde_json::from_str::<serde_json::Value>(text)
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(text))
}

pub fn parse_record(text: &str) -> Result<Record> {
    let json = serde_json::from_str::<serde_json::Value>(text)
        .map_err(|error| DocStoreError::InvalidRecord(error.to_string()))?;

    record_from_json(json)
        .ok_or_else(|| DocStoreError::InvalidRecord(format!("not a JSON object: {}", text)))
}

pub fn parse_order(terms: &[String]) -> Order {
    //! Parse `KEY[:DIRECTION]` terms.
    //!
    //! A suffix that is not a direction is treated as part of the key, so
    //! keys containing ':' still work.

    if terms.is_empty() {
        return Order::Natural;
    }

    let keys = terms
        .iter()
        .map(|term| match term.rsplit_once(':') {
            Some((key, direction)) => match direction.parse::<Direction>() {
                Ok(direction) => (key.to_string(), direction),
                Err(_) => (term.clone(), Direction::Asc),
            },
            None => (term.clone(), Direction::Asc),
        })
        .collect();

    Order::Keys(keys)
}
