//! Schema definitions for PulseLake
//!
//! This module defines the declarative shape of every warehouse object:
//! columns, table schemas, and view definitions.

use super::types::{DataType, Tier};
use serde::{Deserialize, Serialize};

/// Column definition in a table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,
    /// Data type
    pub data_type: DataType,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Table schema - the ordered column list of a table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Create a new empty schema
    pub fn new() -> Self {
        Self { columns: Vec::new() }
    }

    /// Create a schema from a list of columns
    pub fn from_columns(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Add a column to the schema
    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// Get all columns in declaration order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Get column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// How an object creation behaves when the object already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreateDisposition {
    /// CREATE ... IF NOT EXISTS - an existing object is left untouched
    IfNotExists,
    /// CREATE OR REPLACE ... - an existing object is replaced
    OrReplace,
}

/// Table definition - full declarative table metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDef {
    /// Table name
    pub name: String,
    /// Medallion tier (selects the backing database)
    pub tier: Tier,
    /// Table schema
    pub schema: Schema,
    /// Partition column names, empty for unpartitioned tables
    pub partition_by: Vec<String>,
    /// Creation behavior for an existing table
    pub disposition: CreateDisposition,
}

impl TableDef {
    /// Get the table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the table schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The database this table lives in
    pub fn database_name(&self) -> &'static str {
        self.tier.database_name()
    }
}

/// View definition - name plus the SELECT body it is defined as
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewDef {
    /// View name
    pub name: String,
    /// Medallion tier (selects the backing database)
    pub tier: Tier,
    /// The SELECT statement the view wraps, without the CREATE prefix
    pub body: String,
}

impl ViewDef {
    /// Create a new view definition
    pub fn new(name: impl Into<String>, tier: Tier, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tier,
            body: body.into(),
        }
    }

    /// The database this view lives in
    pub fn database_name(&self) -> &'static str {
        self.tier.database_name()
    }
}

/// Builder for table definitions with a fluent API
pub struct TableBuilder {
    name: String,
    tier: Tier,
    columns: Vec<Column>,
    partition_by: Vec<String>,
    disposition: CreateDisposition,
}

impl TableBuilder {
    /// Start building a new table in the given tier
    pub fn new(name: impl Into<String>, tier: Tier) -> Self {
        Self {
            name: name.into(),
            tier,
            columns: Vec::new(),
            partition_by: Vec::new(),
            disposition: CreateDisposition::IfNotExists,
        }
    }

    /// Add a column
    pub fn column(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.columns.push(Column::new(name, data_type));
        self
    }

    /// Partition the table by the given columns
    pub fn partition_by(mut self, columns: &[&str]) -> Self {
        self.partition_by = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Replace the table on creation instead of skipping an existing one
    pub fn or_replace(mut self) -> Self {
        self.disposition = CreateDisposition::OrReplace;
        self
    }

    /// Build the table definition
    pub fn build(self) -> TableDef {
        TableDef {
            name: self.name,
            tier: self.tier,
            schema: Schema::from_columns(self.columns),
            partition_by: self.partition_by,
            disposition: self.disposition,
        }
    }
}
