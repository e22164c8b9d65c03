//! A schema-less dictionary store: arbitrary key/value records kept in a
//! single SQLite table that grows a column for every new key.

pub mod cli;
pub mod persistence;
