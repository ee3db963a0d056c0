//! DDL statement rendering
//!
//! Every statement the tool dispatches to the engine is rendered here, as a
//! single line of SQL. The catalog name may contain a hyphen (it carries the
//! environment suffix) and is therefore always backtick-quoted.

use crate::catalog::{CreateDisposition, TableDef, ViewDef};

/// CREATE DATABASE IF NOT EXISTS for a tier database
pub fn create_database(catalog: &str, db: &str) -> String {
    format!("CREATE DATABASE IF NOT EXISTS `{catalog}`.{db}")
}

/// USE statement selecting a tier database
pub fn use_database(catalog: &str, db: &str) -> String {
    format!("USE `{catalog}`.{db}")
}

/// DROP DATABASE ... CASCADE for a tier database
pub fn drop_database(catalog: &str, db: &str) -> String {
    format!("DROP DATABASE `{catalog}`.{db} CASCADE")
}

/// SHOW DATABASES listing for the catalog
pub fn show_databases(catalog: &str) -> String {
    format!("SHOW DATABASES IN `{catalog}`")
}

/// SHOW TABLES listing for one database
pub fn show_tables(catalog: &str, db: &str) -> String {
    format!("SHOW TABLES IN `{catalog}`.{db}")
}

/// CREATE TABLE statement for a table definition
pub fn create_table(catalog: &str, table: &TableDef) -> String {
    let prefix = match table.disposition {
        CreateDisposition::IfNotExists => "CREATE TABLE IF NOT EXISTS",
        CreateDisposition::OrReplace => "CREATE OR REPLACE TABLE",
    };

    let columns: Vec<String> = table
        .schema()
        .columns()
        .iter()
        .map(|c| format!("{} {}", c.name, c.data_type))
        .collect();

    let mut sql = format!(
        "{} `{}`.{}.{} ({})",
        prefix,
        catalog,
        table.database_name(),
        table.name(),
        columns.join(", ")
    );

    if !table.partition_by.is_empty() {
        sql.push_str(&format!(" PARTITIONED BY ({})", table.partition_by.join(", ")));
    }

    sql
}

/// CREATE OR REPLACE VIEW statement for a view definition
pub fn create_view(catalog: &str, view: &ViewDef) -> String {
    format!(
        "CREATE OR REPLACE VIEW `{}`.`{}`.{} AS {}",
        catalog,
        view.database_name(),
        view.name,
        view.body
    )
}
