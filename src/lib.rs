//! PulseLake - provisioning for a medallion fitness lakehouse
//!
//! This library sets up, validates, and tears down the bronze/silver/gold
//! warehouse backing the fitness data platform:
//! - Declarative schemas for every warehouse object
//! - DDL rendering for the external catalog engine
//! - A line/JSON TCP client for dispatching statements
//! - Provisioning orchestration (setup, validate, cleanup)

pub mod catalog;
pub mod config;
pub mod ddl;
pub mod engine;
pub mod error;
pub mod setup;
pub mod storage;

pub use error::{Error, Result};
