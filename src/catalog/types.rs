//! Data types for PulseLake
//!
//! This module defines the SQL data types understood by the warehouse engine,
//! plus the medallion tier each warehouse object belongs to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// SQL data types supported by the warehouse engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Boolean type
    Boolean,
    /// Integer (32-bit)
    Int,
    /// Big integer (64-bit)
    BigInt,
    /// Double-precision floating point
    Double,
    /// Variable-length character string
    String,
    /// Date (year, month, day)
    Date,
    /// Timestamp (date + time)
    Timestamp,
}

impl DataType {
    /// Check if this type is numeric
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Int | DataType::BigInt | DataType::Double)
    }

    /// Check if this type carries a point in time
    pub fn is_temporal(&self) -> bool {
        matches!(self, DataType::Date | DataType::Timestamp)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Boolean => write!(f, "BOOLEAN"),
            DataType::Int => write!(f, "INT"),
            DataType::BigInt => write!(f, "BIGINT"),
            DataType::Double => write!(f, "DOUBLE"),
            DataType::String => write!(f, "STRING"),
            DataType::Date => write!(f, "DATE"),
            DataType::Timestamp => write!(f, "TIMESTAMP"),
        }
    }
}

/// Medallion tier of a warehouse object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Raw ingested data
    Bronze,
    /// Cleansed and conformed data
    Silver,
    /// Aggregated, consumption-ready data
    Gold,
}

impl Tier {
    /// All tiers in provisioning order
    pub const ALL: [Tier; 3] = [Tier::Bronze, Tier::Silver, Tier::Gold];

    /// The database backing this tier
    pub fn database_name(&self) -> &'static str {
        match self {
            Tier::Bronze => "fitness_bronze",
            Tier::Silver => "fitness_silver",
            Tier::Gold => "fitness_gold",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Bronze => write!(f, "bronze"),
            Tier::Silver => write!(f, "silver"),
            Tier::Gold => write!(f, "gold"),
        }
    }
}
