//! The table definition, grown one column at a time.
//!
//! Every key ever written gets its own `TEXT` column. Columns are never
//! dropped, so the known-columns cache only grows; it is refreshed from
//! the table itself whenever a key is missing, in case another handle on
//! the same file added it first.

use indexmap::IndexMap;
use log::debug;
use rusqlite::Connection;

use super::error::Result;
use super::identifier::{ROW_ID_COLUMN, column_name, key_from_column, quote_identifier};

pub(crate) struct Schema {
    table_name: String,
    table: String,
    columns: IndexMap<String, String>,
}

impl Schema {
    pub fn create(connection: &Connection, table_name: &str) -> Result<Schema> {
        //! Create the backing table if it does not exist yet and load the
        //! columns it already has.

        let table = quote_identifier(table_name);
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} ({} INTEGER PRIMARY KEY)",
            table,
            quote_identifier(ROW_ID_COLUMN)
        );
        debug!("{}", sql);
        connection.execute(&sql, [])?;

        let mut schema = Schema {
            table_name: table_name.to_string(),
            table,
            columns: IndexMap::new(),
        };
        schema.refresh(connection)?;

        Ok(schema)
    }

    pub fn refresh(&mut self, connection: &Connection) -> Result<()> {
        //! Re-read the column list from the table.

        let mut statement =
            connection.prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")?;
        let names = statement
            .query_map([&self.table_name], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        for name in names {
            if let Some(key) = key_from_column(&name) {
                self.columns
                    .entry(key)
                    .or_insert_with(|| quote_identifier(&name));
            }
        }

        Ok(())
    }

    pub fn ensure_columns<'a, I>(&mut self, connection: &Connection, keys: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a String>,
    {
        //! Add a column for every key not seen before.
        //!
        //! Idempotent; returns the number of columns actually added. A
        //! column added here stays even if the statement that needed it
        //! fails afterwards.

        let mut missing: Vec<&String> = keys
            .into_iter()
            .filter(|key| !self.columns.contains_key(*key))
            .collect();
        if missing.is_empty() {
            return Ok(0);
        }

        self.refresh(connection)?;
        missing.retain(|key| !self.columns.contains_key(*key));

        for key in missing.iter() {
            let column = quote_identifier(&column_name(key));
            let sql = format!("ALTER TABLE {} ADD COLUMN {} TEXT", self.table, column);
            debug!("{}", sql);
            connection.execute(&sql, [])?;
            self.columns.insert((*key).clone(), column);
        }

        Ok(missing.len())
    }

    pub fn table(&self) -> &str {
        //! The quoted table identifier.

        &self.table
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn column(&self, key: &str) -> Option<&str> {
        self.columns.get(key).map(String::as_str)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&String, &String)> {
        //! Known keys with their quoted columns, in creation order.

        self.columns.iter()
    }

    pub fn keys(&self) -> Vec<String> {
        self.columns.keys().cloned().collect()
    }
}
