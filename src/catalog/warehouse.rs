//! Warehouse layout for PulseLake
//!
//! This module declares every object of the fitness lakehouse: the bronze
//! landing tables, the silver cleansed tables, and the gold aggregates.
//! `WarehouseLayout` registers them in provisioning order, which is also the
//! order validation walks them in.

use super::schema::{TableBuilder, TableDef, ViewDef};
use super::types::{DataType, Tier};
use indexmap::IndexMap;

/// Raw device registrations as landed from the ingest job
pub fn registered_users() -> TableDef {
    TableBuilder::new("registered_users_bz", Tier::Bronze)
        .column("user_id", DataType::BigInt)
        .column("device_id", DataType::BigInt)
        .column("mac_address", DataType::String)
        .column("registration_timestamp", DataType::Double)
        .column("load_time", DataType::Timestamp)
        .column("source_file", DataType::String)
        .build()
}

/// Raw gym login/logout events; replaced wholesale on each provisioning run
pub fn gym_logins() -> TableDef {
    TableBuilder::new("gym_logins_bz", Tier::Bronze)
        .column("mac_address", DataType::String)
        .column("gym", DataType::BigInt)
        .column("login", DataType::Double)
        .column("logout", DataType::Double)
        .column("load_time", DataType::Timestamp)
        .column("source_file", DataType::String)
        .or_replace()
        .build()
}

/// Multiplexed event stream landing table, partitioned for pruning by
/// topic and week
pub fn kafka_multiplex() -> TableDef {
    TableBuilder::new("kafka_multiplex_bz", Tier::Bronze)
        .column("key", DataType::String)
        .column("value", DataType::String)
        .column("topic", DataType::String)
        .column("partition", DataType::BigInt)
        .column("offset", DataType::BigInt)
        .column("timestamp", DataType::BigInt)
        .column("date", DataType::Date)
        .column("week_part", DataType::String)
        .column("load_time", DataType::Timestamp)
        .column("source_file", DataType::String)
        .partition_by(&["topic", "week_part"])
        .build()
}

/// Cleansed user registry
pub fn users() -> TableDef {
    TableBuilder::new("users", Tier::Silver)
        .column("user_id", DataType::BigInt)
        .column("device_id", DataType::BigInt)
        .column("mac_address", DataType::String)
        .column("registration_timestamp", DataType::Timestamp)
        .or_replace()
        .build()
}

/// Cleansed gym visits with proper timestamps
pub fn gym_logs() -> TableDef {
    TableBuilder::new("gym_logs", Tier::Silver)
        .column("mac_address", DataType::String)
        .column("gym", DataType::BigInt)
        .column("login", DataType::Timestamp)
        .column("logout", DataType::Timestamp)
        .or_replace()
        .build()
}

/// Slowly-changing user profile attributes
pub fn user_profile() -> TableDef {
    TableBuilder::new("user_profile", Tier::Silver)
        .column("user_id", DataType::BigInt)
        .column("dob", DataType::Date)
        .column("sex", DataType::String)
        .column("gender", DataType::String)
        .column("first_name", DataType::String)
        .column("last_name", DataType::String)
        .column("street_address", DataType::String)
        .column("city", DataType::String)
        .column("state", DataType::String)
        .column("zip", DataType::Int)
        .column("updated", DataType::Timestamp)
        .build()
}

/// Per-device heart-rate readings
pub fn heart_rate() -> TableDef {
    TableBuilder::new("heart_rate", Tier::Silver)
        .column("device_id", DataType::BigInt)
        .column("time", DataType::Timestamp)
        .column("heartrate", DataType::Double)
        .column("valid", DataType::Boolean)
        .build()
}

/// Workout start/stop actions
pub fn workouts() -> TableDef {
    TableBuilder::new("workouts", Tier::Silver)
        .column("user_id", DataType::Int)
        .column("workout_id", DataType::Int)
        .column("time", DataType::Timestamp)
        .column("action", DataType::String)
        .column("session_id", DataType::Int)
        .build()
}

/// Workout sessions paired into start/end intervals
pub fn completed_workouts() -> TableDef {
    TableBuilder::new("completed_workouts", Tier::Silver)
        .column("user_id", DataType::Int)
        .column("workout_id", DataType::Int)
        .column("session_id", DataType::Int)
        .column("start_time", DataType::Timestamp)
        .column("end_time", DataType::Timestamp)
        .build()
}

/// Heart-rate readings joined onto the workout interval they fall into
pub fn workout_bpm() -> TableDef {
    TableBuilder::new("workout_bpm", Tier::Silver)
        .column("user_id", DataType::Int)
        .column("workout_id", DataType::Int)
        .column("session_id", DataType::Int)
        .column("start_time", DataType::Timestamp)
        .column("end_time", DataType::Timestamp)
        .column("time", DataType::Timestamp)
        .column("heartrate", DataType::Double)
        .build()
}

/// Users bucketed by demographic bins
pub fn user_bins() -> TableDef {
    TableBuilder::new("user_bins", Tier::Silver)
        .column("user_id", DataType::BigInt)
        .column("age", DataType::String)
        .column("gender", DataType::String)
        .column("city", DataType::String)
        .column("state", DataType::String)
        .build()
}

/// Calendar dimension used for week partitioning
pub fn date_lookup() -> TableDef {
    TableBuilder::new("date_lookup", Tier::Silver)
        .column("date", DataType::Date)
        .column("week", DataType::Int)
        .column("year", DataType::Int)
        .column("month", DataType::Int)
        .column("dayofweek", DataType::Int)
        .column("dayofmonth", DataType::Int)
        .column("dayofyear", DataType::Int)
        .column("week_part", DataType::String)
        .build()
}

/// Per-session heart-rate aggregates by demographic
pub fn workout_bpm_summary() -> TableDef {
    TableBuilder::new("workout_bpm_summary", Tier::Gold)
        .column("workout_id", DataType::Int)
        .column("session_id", DataType::Int)
        .column("user_id", DataType::BigInt)
        .column("age", DataType::String)
        .column("gender", DataType::String)
        .column("city", DataType::String)
        .column("state", DataType::String)
        .column("min_bpm", DataType::Double)
        .column("avg_bpm", DataType::Double)
        .column("max_bpm", DataType::Double)
        .column("num_recordings", DataType::BigInt)
        .build()
}

/// Gold view correlating gym visits with the workouts performed during them.
///
/// Joins silver gym logs against completed workouts (via the user registry
/// for the mac address) where the workout started inside the login window,
/// and reports minutes in the gym versus minutes exercising.
pub fn gym_summary(catalog: &str) -> ViewDef {
    let silver = Tier::Silver.database_name();
    let body = format!(
        "SELECT to_date(login::timestamp) date, gym, l.mac_address, workout_id, session_id, \
         round((logout::long - login::long)/60,2) minutes_in_gym, \
         round((end_time::long - start_time::long)/60,2) minutes_exercising \
         FROM `{catalog}`.`{silver}`.gym_logs l \
         JOIN (SELECT mac_address, workout_id, session_id, start_time, end_time \
         FROM `{catalog}`.`{silver}`.completed_workouts w \
         INNER JOIN `{catalog}`.`{silver}`.users u ON w.user_id = u.user_id) w \
         ON l.mac_address = w.mac_address AND w.start_time BETWEEN l.login AND l.logout \
         ORDER BY date, gym, l.mac_address, session_id"
    );
    ViewDef::new("gym_summary", Tier::Gold, body)
}

/// The full warehouse layout, bound to one catalog
#[derive(Debug, Clone)]
pub struct WarehouseLayout {
    catalog: String,
    /// Table definitions by name, in provisioning order
    tables: IndexMap<String, TableDef>,
    /// View definitions, in provisioning order
    views: Vec<ViewDef>,
}

impl WarehouseLayout {
    /// Build the standard fitness lakehouse layout for a catalog
    pub fn for_catalog(catalog: impl Into<String>) -> Self {
        let catalog = catalog.into();
        let mut tables = IndexMap::new();
        for table in [
            registered_users(),
            gym_logins(),
            kafka_multiplex(),
            users(),
            gym_logs(),
            user_profile(),
            heart_rate(),
            workouts(),
            completed_workouts(),
            workout_bpm(),
            user_bins(),
            date_lookup(),
            workout_bpm_summary(),
        ] {
            tables.insert(table.name.clone(), table);
        }
        let views = vec![gym_summary(&catalog)];
        Self {
            catalog,
            tables,
            views,
        }
    }

    /// The catalog this layout provisions into
    pub fn catalog(&self) -> &str {
        &self.catalog
    }

    /// All tables in provisioning order
    pub fn tables(&self) -> impl Iterator<Item = &TableDef> {
        self.tables.values()
    }

    /// Tables belonging to one tier, in provisioning order
    pub fn tables_in(&self, tier: Tier) -> impl Iterator<Item = &TableDef> {
        self.tables.values().filter(move |t| t.tier == tier)
    }

    /// All views in provisioning order
    pub fn views(&self) -> &[ViewDef] {
        &self.views
    }

    /// Views belonging to one tier
    pub fn views_in(&self, tier: Tier) -> impl Iterator<Item = &ViewDef> {
        self.views.iter().filter(move |v| v.tier == tier)
    }

    /// Get a table by name
    pub fn get_table(&self, name: &str) -> Option<&TableDef> {
        self.tables.get(name)
    }

    /// Names of every object (tables then views) in one tier
    pub fn object_names_in(&self, tier: Tier) -> Vec<&str> {
        self.tables_in(tier)
            .map(|t| t.name())
            .chain(self.views_in(tier).map(|v| v.name.as_str()))
            .collect()
    }

    /// Total number of objects in the layout
    pub fn object_count(&self) -> usize {
        self.tables.len() + self.views.len()
    }
}
