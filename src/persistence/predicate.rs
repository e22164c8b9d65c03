//! Filters and orderings, compiled to parameterized SQL fragments.
//!
//! A [`Predicate`] is a `(key, operator, value)` triple. The operator is
//! looked up in a closed allow-list before anything is built, the key goes
//! through the identifier quoter, and the value is encoded and bound as a
//! parameter, never spliced into the statement text.

use std::{fmt::Display, str::FromStr};

use log::trace;

use super::codec;
use super::error::{DocStoreError, Result};
use super::identifier::{ROW_ID_COLUMN, quote_identifier};
use super::schema::Schema;
use super::value::Value;

const OPERATORS: [(&str, Operator); 10] = [
    ("==", Operator::Eq),
    ("=", Operator::Eq),
    ("!=", Operator::NotEq),
    ("<>", Operator::NotEq),
    ("<", Operator::Lt),
    ("<=", Operator::LtEq),
    (">", Operator::Gt),
    (">=", Operator::GtEq),
    ("LIKE", Operator::Like),
    ("GLOB", Operator::Glob),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Like,
    Glob,
}

impl Operator {
    pub fn sql(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "!=",
            Operator::Lt => "<",
            Operator::LtEq => "<=",
            Operator::Gt => ">",
            Operator::GtEq => ">=",
            Operator::Like => "LIKE",
            Operator::Glob => "GLOB",
        }
    }
}

impl FromStr for Operator {
    type Err = DocStoreError;

    fn from_str(symbol: &str) -> Result<Self> {
        let upper = symbol.to_ascii_uppercase();

        OPERATORS
            .iter()
            .find(|(known, _)| *known == upper)
            .map(|(_, operator)| *operator)
            .ok_or_else(|| DocStoreError::UnknownOperator(symbol.to_string()))
    }
}

/// One `(key, operator, value)` filter.
#[derive(Clone, Debug, PartialEq)]
pub struct Predicate {
    pub key: String,
    pub operator: String,
    pub value: Value,
}

impl Predicate {
    pub fn new(key: impl Into<String>, operator: impl Into<String>, value: impl Into<Value>) -> Self {
        Predicate {
            key: key.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }
}

impl<K, O, V> From<(K, O, V)> for Predicate
where
    K: Into<String>,
    O: Into<String>,
    V: Into<Value>,
{
    fn from((key, operator, value): (K, O, V)) -> Self {
        Predicate::new(key, operator, value)
    }
}

/// A validated predicate: the operator is known and the value is encoded.
///
/// Compiling happens before the schema is touched, so a bad predicate
/// fails without side effects. The clause itself is rendered against the
/// schema later, once the columns are in place.
#[derive(Debug, PartialEq)]
pub(crate) struct Filter {
    condition: Option<Condition>,
}

#[derive(Debug, PartialEq)]
struct Condition {
    key: String,
    operator: Operator,
    param: String,
}

impl Filter {
    pub fn compile(predicate: Option<&Predicate>) -> Result<Filter> {
        let Some(predicate) = predicate else {
            return Ok(Filter { condition: None });
        };

        let operator: Operator = predicate.operator.parse()?;
        let param = codec::encode(&predicate.value)?;

        Ok(Filter {
            condition: Some(Condition {
                key: predicate.key.clone(),
                operator,
                param,
            }),
        })
    }

    pub fn clause(&self, schema: &Schema) -> String {
        self.clause_at(schema, 1)
    }

    pub fn clause_at(&self, schema: &Schema, index: usize) -> String {
        //! The `WHERE` clause with its value bound to parameter `?index`, or
        //! an empty string that matches every row.
        //!
        //! A key without a column compares `NULL` against the value, which
        //! matches nothing.

        let Some(condition) = &self.condition else {
            return String::new();
        };

        let column = schema.column(&condition.key).unwrap_or("NULL");
        trace!(
            "predicate {} {} bound to {}",
            column,
            condition.operator.sql(),
            condition.param
        );

        format!(" WHERE {} {} ?{}", column, condition.operator.sql(), index)
    }

    pub fn params(&self) -> Vec<&dyn rusqlite::ToSql> {
        self.condition
            .iter()
            .map(|condition| &condition.param as &dyn rusqlite::ToSql)
            .collect()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl FromStr for Direction {
    type Err = DocStoreError;

    fn from_str(direction: &str) -> Result<Self> {
        match direction.to_ascii_uppercase().as_str() {
            "ASC" => Ok(Direction::Asc),
            "DESC" => Ok(Direction::Desc),
            _ => Err(DocStoreError::UnknownDirection(direction.to_string())),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Asc => write!(f, "ASC"),
            Direction::Desc => write!(f, "DESC"),
        }
    }
}

/// How `get` sorts its rows. Ties always fall back to insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Order {
    /// Insertion order.
    #[default]
    Natural,

    /// Ascending by a single key.
    By(String),

    /// Several keys, each with its own direction, in priority order.
    Keys(Vec<(String, Direction)>),
}

impl Order {
    pub fn by(key: impl Into<String>) -> Order {
        Order::By(key.into())
    }

    pub fn keys<K, D>(keys: impl IntoIterator<Item = (K, D)>) -> Result<Order>
    where
        K: Into<String>,
        D: AsRef<str>,
    {
        //! Build a multi-key order from `(key, "ASC" | "DESC")` pairs.

        let keys = keys
            .into_iter()
            .map(|(key, direction)| -> Result<(String, Direction)> {
                Ok((key.into(), direction.as_ref().parse::<Direction>()?))
            })
            .collect::<Result<Vec<(String, Direction)>>>()?;

        Ok(Order::Keys(keys))
    }
}

pub(crate) fn compile_order(order: &Order, schema: &Schema) -> String {
    //! Build the `ORDER BY` clause. Keys without a column are skipped since
    //! every row would tie on them anyway.

    let mut terms: Vec<String> = match order {
        Order::Natural => Vec::new(),
        Order::By(key) => schema
            .column(key)
            .map(|column| format!("{} ASC", column))
            .into_iter()
            .collect(),
        Order::Keys(keys) => keys
            .iter()
            .filter_map(|(key, direction)| {
                schema
                    .column(key)
                    .map(|column| format!("{} {}", column, direction))
            })
            .collect(),
    };
    terms.push(format!("{} ASC", quote_identifier(ROW_ID_COLUMN)));

    format!(" ORDER BY {}", terms.join(", "))
}
