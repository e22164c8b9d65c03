//! Conversion between records and table rows.
//!
//! A row only carries the keys its record had. Columns added by other
//! records are left `NULL` in storage and skipped on the way back out, so
//! `NULL` always means "absent" and never "null" (which is stored as the
//! text `null`).

use super::codec;
use super::error::Result;
use super::schema::Schema;
use super::value::{Record, Value};

/// The encoded cells of one record, keyed by record key.
pub(crate) struct Row {
    keys: Vec<String>,
    cells: Vec<String>,
}

impl Row {
    pub fn encode(record: &Record) -> Result<Row> {
        //! Encode every present key of `record`.
        //!
        //! Runs before the schema is grown, so an unencodable value leaves
        //! the table untouched.

        let mut keys = Vec::with_capacity(record.len());
        let mut cells = Vec::with_capacity(record.len());

        for (key, value) in record.iter() {
            keys.push(key.clone());
            cells.push(codec::encode(value)?);
        }

        Ok(Row { keys, cells })
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn bind<'a>(&'a self, schema: &'a Schema) -> (Vec<&'a str>, Vec<&'a dyn rusqlite::ToSql>) {
        //! Pair each cell with its quoted column.
        //!
        //! Keys the schema has no column for are skipped, so callers grow
        //! the schema first.

        self.keys
            .iter()
            .zip(self.cells.iter())
            .filter_map(|(key, cell)| {
                schema
                    .column(key)
                    .map(|column| (column, cell as &dyn rusqlite::ToSql))
            })
            .unzip()
    }
}

pub(crate) fn to_record(keys: &[String], cells: Vec<Option<String>>) -> Record {
    //! Rebuild a record from the cells of one row, `keys[i]` naming
    //! `cells[i]`. Absent cells are dropped.

    keys.iter()
        .zip(cells)
        .filter_map(|(key, cell)| cell.map(|text| (key.clone(), codec::decode(&text))))
        .collect::<Record>()
}

pub fn record_from_json(json: serde_json::Value) -> Option<Record> {
    //! Convert a JSON object into a [`Record`]; any other JSON kind yields
    //! [`None`].

    Value::from(json).into_record()
}
