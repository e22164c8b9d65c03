use log::{debug, info};
use rusqlite::Connection;

use super::config::{StoreConfig, Target};
use super::error::{DocStoreError, Result};
use super::predicate::{Filter, Order, Predicate, compile_order};
use super::row::{Row, to_record};
use super::schema::Schema;
use super::value::Record;

/// A schema-less record store backed by one SQLite table.
///
/// The [`DocumentStore`] owns its connection and a cache of the columns
/// the table has. Every key ever stored becomes a column the first time it
/// is seen, so records of any shape can share the table. Values are kept
/// as JSON text, which is what lets their types survive the trip.
///
/// Each operation is a short run of statements executed to completion:
/// grow the schema if needed, then touch the data. Every statement is
/// atomic on its own, the sequence is not; a column added for a write that
/// then fails stays in the table.
///
/// Dropping the store closes the connection. Use [`DocumentStore::close`]
/// or [`DocumentStore::scoped`] to see errors raised while closing.
///
/// # Issues
/// - Two stores on the same file that add the same new column at the same
/// time rely on SQLite's own locking; the loser gets a backing error.
pub struct DocumentStore {
    connection: Connection,
    schema: Schema,
    target: Target,
}

impl DocumentStore {
    pub fn open(config: &StoreConfig) -> Result<DocumentStore> {
        //! Open (or create) the database and table named by `config`.

        let connection = match &config.target {
            Target::Memory => Connection::open_in_memory(),
            Target::File(path) => Connection::open(path),
        }
        .map_err(|source| DocStoreError::Open {
            target: config.target.to_string(),
            source,
        })?;

        let schema = Schema::create(&connection, &config.table)?;
        info!(
            "opened table '{}' at {} with {} column(s)",
            config.table,
            config.target,
            schema.keys().len()
        );

        Ok(DocumentStore {
            connection,
            schema,
            target: config.target.clone(),
        })
    }

    pub fn memory() -> Result<DocumentStore> {
        //! A fresh in-memory store with the default table.

        DocumentStore::open(&StoreConfig::memory())
    }

    pub fn scoped<T, F>(config: &StoreConfig, body: F) -> Result<T>
    where
        F: FnOnce(&mut DocumentStore) -> Result<T>,
    {
        //! Open a store, run `body` with it and close it again, on the
        //! error path too.
        //!
        //! An error from `body` wins over an error from closing.

        let mut store = DocumentStore::open(config)?;
        let result = body(&mut store);
        let closed = store.close();

        let value = result?;
        closed?;
        Ok(value)
    }

    pub fn close(self) -> Result<()> {
        let DocumentStore {
            connection, target, ..
        } = self;

        connection
            .close()
            .map_err(|(_, error)| DocStoreError::Close(error))?;
        info!("closed {}", target);

        Ok(())
    }

    pub fn store(&mut self, record: &Record) -> Result<()> {
        //! Insert `record` as a new row, adding columns for new keys.

        let row = Row::encode(record)?;
        self.schema.ensure_columns(&self.connection, row.keys())?;
        self.insert(&row)
    }

    pub fn get(&mut self, predicate: Option<&Predicate>, order: &Order) -> Result<Vec<Record>> {
        //! Fetch every record matching `predicate` (all of them when
        //! [`None`]), sorted by `order`.
        //!
        //! The result is fully materialized.

        let filter = Filter::compile(predicate)?;
        self.schema.refresh(&self.connection)?;

        let (keys, columns): (Vec<String>, Vec<String>) = self
            .schema
            .columns()
            .map(|(key, column)| (key.clone(), column.clone()))
            .unzip();
        if columns.is_empty() {
            // Nothing was ever stored with a key, rows can only be empty.
            return self.count_matching(&filter).map(|n| vec![Record::new(); n]);
        }

        let sql = format!(
            "SELECT {} FROM {}{}{}",
            columns.join(", "),
            self.schema.table(),
            filter.clause(&self.schema),
            compile_order(order, &self.schema)
        );
        debug!("{}", sql);

        let mut statement = self.connection.prepare(&sql)?;
        let rows = statement.query_map(filter.params().as_slice(), |row| {
            (0..keys.len())
                .map(|index| row.get::<_, Option<String>>(index))
                .collect::<rusqlite::Result<Vec<Option<String>>>>()
        })?;

        let mut records = Vec::new();
        for cells in rows {
            records.push(to_record(&keys, cells?));
        }

        Ok(records)
    }

    pub fn get_all(&mut self) -> Result<Vec<Record>> {
        self.get(None, &Order::Natural)
    }

    pub fn update(
        &mut self,
        values: &Record,
        insert_if_missing: bool,
        predicate: Option<&Predicate>,
    ) -> Result<usize> {
        //! Set the keys in `values` on every row matching `predicate` (every
        //! row when [`None`]), leaving the other keys of those rows alone.
        //!
        //! When nothing matches and `insert_if_missing` is set, `values` is
        //! stored as a new row instead; the predicate does not contribute to
        //! it. Returns the number of rows written.

        let filter = Filter::compile(predicate)?;
        let row = Row::encode(values)?;
        self.schema.ensure_columns(&self.connection, row.keys())?;
        self.schema.refresh(&self.connection)?;

        let updated = if row.is_empty() {
            self.count_matching(&filter)?
        } else {
            let (columns, mut params) = row.bind(&self.schema);
            let assignments: Vec<String> = columns
                .iter()
                .enumerate()
                .map(|(index, column)| format!("{} = ?{}", column, index + 1))
                .collect();
            let sql = format!(
                "UPDATE {} SET {}{}",
                self.schema.table(),
                assignments.join(", "),
                filter.clause_at(&self.schema, columns.len() + 1)
            );
            debug!("{}", sql);

            params.extend(filter.params());
            self.connection.execute(&sql, params.as_slice())?
        };

        if updated > 0 || !insert_if_missing {
            return Ok(if row.is_empty() { 0 } else { updated });
        }

        debug!("no row matched, inserting the update payload instead");
        self.insert(&row)?;
        Ok(1)
    }

    pub fn delete(&mut self, predicate: Option<&Predicate>) -> Result<usize> {
        //! Remove every row matching `predicate`, or every row at all.
        //!
        //! Returns the number of rows removed.

        let filter = Filter::compile(predicate)?;
        self.schema.refresh(&self.connection)?;

        let sql = format!(
            "DELETE FROM {}{}",
            self.schema.table(),
            filter.clause(&self.schema)
        );
        debug!("{}", sql);

        Ok(self.connection.execute(&sql, filter.params().as_slice())?)
    }

    pub fn len(&self) -> Result<usize> {
        self.count_matching(&Filter::compile(None)?)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn columns(&mut self) -> Result<Vec<String>> {
        //! Every key the table has a column for, in the order they were
        //! first seen.

        self.schema.refresh(&self.connection)?;
        Ok(self.schema.keys())
    }

    pub fn table(&self) -> &str {
        self.schema.table_name()
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    fn insert(&self, row: &Row) -> Result<()> {
        let (columns, cells) = row.bind(&self.schema);

        let sql = if columns.is_empty() {
            format!("INSERT INTO {} DEFAULT VALUES", self.schema.table())
        } else {
            let placeholders: Vec<String> =
                (1..=columns.len()).map(|index| format!("?{}", index)).collect();
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                self.schema.table(),
                columns.join(", "),
                placeholders.join(", ")
            )
        };
        debug!("{}", sql);

        self.connection.execute(&sql, cells.as_slice())?;
        Ok(())
    }

    fn count_matching(&self, filter: &Filter) -> Result<usize> {
        let sql = format!(
            "SELECT COUNT(*) FROM {}{}",
            self.schema.table(),
            filter.clause(&self.schema)
        );
        debug!("{}", sql);

        let count: i64 = self
            .connection
            .query_row(&sql, filter.params().as_slice(), |row| row.get(0))?;
        Ok(count as usize)
    }
}
