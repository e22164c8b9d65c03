//! The command line front end: one subcommand per store operation, run
//! against a store that is opened for the command and closed right after.

use std::io::{self, Write};

use log::debug;

use crate::{
    cli::{
        messages::{highlight_argument, system_message},
        parsers::{CliCommand, CliParser, parse_order, parse_record},
    },
    persistence::{DocStoreError, DocumentStore, Record, Result, StoreConfig, Target},
};

mod colors;
pub mod messages;
pub mod parsers;

pub fn config_for(cli: &CliParser) -> StoreConfig {
    //! Command line flags win over the environment.

    let mut config = StoreConfig::from_env();
    if let Some(db) = &cli.db {
        config.target = Target::parse(db);
    }
    if let Some(table) = &cli.table {
        config.table = table.clone();
    }
    config
}

pub fn run(cli: CliParser) -> Result<()> {
    let config = config_for(&cli);
    debug!("running against {} table '{}'", config.target, config.table);

    DocumentStore::scoped(&config, |store| execute(store, &cli.command))
}

fn execute(store: &mut DocumentStore, command: &CliCommand) -> Result<()> {
    match command {
        CliCommand::Store { record } => {
            store.store(&parse_record(record)?)?;
            println!("{}", system_message("store", "1 record stored.".to_string()));
        }
        CliCommand::Get { filter, order } => {
            let records = store.get(filter.predicate().as_ref(), &parse_order(order))?;
            print_records(&records)?;
        }
        CliCommand::Update {
            values,
            insert,
            filter,
        } => {
            let n_rows = store.update(&parse_record(values)?, *insert, filter.predicate().as_ref())?;
            println!(
                "{}",
                system_message("store", format!("{} record(s) written.", n_rows))
            );
        }
        CliCommand::Delete { filter } => {
            let n_rows = store.delete(filter.predicate().as_ref())?;
            println!(
                "{}",
                system_message("store", format!("{} record(s) deleted.", n_rows))
            );
        }
        CliCommand::Columns => {
            let columns = store.columns()?;
            println!(
                "{}",
                system_message(
                    "store",
                    format!(
                        "table {} has {} key(s).",
                        highlight_argument(store.table()),
                        columns.len()
                    )
                )
            );
            for key in columns {
                println!("{}", key);
            }
        }
    }

    Ok(())
}

fn print_records(records: &[Record]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for record in records {
        let line = serde_json::to_string(record)
            .map_err(|error| DocStoreError::Unencodable(error.to_string()))?;
        writeln!(out, "{}", line)?;
    }

    Ok(())
}
