//! Catalog module
//!
//! This module contains the warehouse schema definitions, data types, and the
//! fixed medallion layout.

pub mod schema;
pub mod types;
pub mod warehouse;

pub use schema::{Column, CreateDisposition, Schema, TableBuilder, TableDef, ViewDef};
pub use types::{DataType, Tier};
pub use warehouse::WarehouseLayout;
