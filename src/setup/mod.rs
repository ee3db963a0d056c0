//! Warehouse provisioning
//!
//! `Provisioner` drives the external engine through the full lifecycle of the
//! medallion warehouse: create the tier databases and their objects in order,
//! validate that everything exists, and tear the whole warehouse down again.
//!
//! Table and view creation is gated on a readiness flag set by the first
//! successful database creation; creating an object without a current
//! database would land it in the engine's default database.

use std::io::{self, Write};
use std::time::Instant;

use crate::catalog::{TableDef, Tier, ViewDef, WarehouseLayout};
use crate::config::WarehouseConfig;
use crate::ddl;
use crate::engine::SqlEngine;
use crate::error::{Error, Result};
use crate::storage;

/// Orchestrates setup, validation, and teardown of the warehouse
pub struct Provisioner<E: SqlEngine> {
    engine: E,
    config: WarehouseConfig,
    layout: WarehouseLayout,
    catalog: String,
    initialized: bool,
}

impl<E: SqlEngine> Provisioner<E> {
    /// Create a provisioner for the configured catalog
    pub fn new(engine: E, config: WarehouseConfig) -> Self {
        let catalog = config.catalog_name();
        let layout = WarehouseLayout::for_catalog(catalog.as_str());
        Self {
            engine,
            config,
            layout,
            catalog,
            initialized: false,
        }
    }

    /// The layout being provisioned
    pub fn layout(&self) -> &WarehouseLayout {
        &self.layout
    }

    /// Whether a tier database has been created and selected
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Create a tier database and make it the session's current database
    pub fn create_database(&mut self, tier: Tier) -> Result<()> {
        let db = tier.database_name();
        print!("Creating the database {}.{}...", self.catalog, db);
        io::stdout().flush()?;

        self.engine
            .execute(&ddl::create_database(&self.catalog, db))?;
        self.engine.execute(&ddl::use_database(&self.catalog, db))?;
        self.initialized = true;

        println!("Done");
        Ok(())
    }

    /// Create one table
    pub fn create_table(&mut self, table: &TableDef) -> Result<()> {
        if !self.initialized {
            return Err(Error::DatabaseNotSelected(table.name().to_string()));
        }
        print!("Creating {} table...", table.name());
        io::stdout().flush()?;

        self.engine
            .execute(&ddl::create_table(&self.catalog, table))?;

        println!("Done");
        Ok(())
    }

    /// Create one view
    pub fn create_view(&mut self, view: &ViewDef) -> Result<()> {
        if !self.initialized {
            return Err(Error::DatabaseNotSelected(view.name.clone()));
        }
        print!("Creating {} view...", view.name);
        io::stdout().flush()?;

        self.engine.execute(&ddl::create_view(&self.catalog, view))?;

        println!("Done");
        Ok(())
    }

    /// Provision the entire warehouse, tier by tier
    pub fn setup(&mut self) -> Result<()> {
        let start = Instant::now();
        println!("\nStarting setup ...");

        for tier in Tier::ALL {
            self.create_database(tier)?;

            let tables: Vec<TableDef> = self.layout.tables_in(tier).cloned().collect();
            for table in &tables {
                self.create_table(table)?;
            }

            let views: Vec<ViewDef> = self.layout.views_in(tier).cloned().collect();
            for view in &views {
                self.create_view(view)?;
            }
        }

        println!("Setup completed in {} seconds", start.elapsed().as_secs());
        Ok(())
    }

    /// Check every database and object of the layout, failing on the first
    /// missing one
    pub fn validate(&mut self) -> Result<()> {
        let start = Instant::now();
        println!("\nStarting setup validation ...");

        for tier in Tier::ALL {
            self.assert_database(tier.database_name())?;
        }
        for tier in Tier::ALL {
            let names: Vec<String> = self
                .layout
                .object_names_in(tier)
                .iter()
                .map(|n| n.to_string())
                .collect();
            for name in names {
                self.assert_table(tier.database_name(), &name)?;
            }
        }

        println!(
            "Setup validation completed in {} seconds",
            start.elapsed().as_secs()
        );
        Ok(())
    }

    /// Drop every tier database that exists, then remove the storage zones
    pub fn cleanup(&mut self) -> Result<()> {
        for tier in Tier::ALL {
            let db = tier.database_name();
            if self.database_exists(db)? {
                print!("Dropping the database {}.{}...", self.catalog, db);
                io::stdout().flush()?;
                self.engine.execute(&ddl::drop_database(&self.catalog, db))?;
                println!("Done");
            }
        }
        // The session's current database is gone with its tier.
        self.initialized = false;

        for path in [self.config.landing_zone(), self.config.checkpoint_base()] {
            print!("Deleting {}...", path.display());
            io::stdout().flush()?;
            storage::remove_zone(&path)?;
            println!("Done");
        }
        Ok(())
    }

    /// Hand the engine back, ending the provisioning session
    pub fn into_engine(self) -> E {
        self.engine
    }

    fn database_exists(&mut self, db: &str) -> Result<bool> {
        let reply = self.engine.execute(&ddl::show_databases(&self.catalog))?;
        Ok(reply.contains("databaseName", db))
    }

    fn assert_database(&mut self, db: &str) -> Result<()> {
        if !self.database_exists(db)? {
            return Err(Error::DatabaseMissing(format!("{}.{}", self.catalog, db)));
        }
        println!("Found database {}.{}: Success", self.catalog, db);
        Ok(())
    }

    fn assert_table(&mut self, db: &str, name: &str) -> Result<()> {
        let reply = self.engine.execute(&ddl::show_tables(&self.catalog, db))?;
        if !reply.contains("tableName", name) {
            return Err(Error::TableMissing(name.to_string(), db.to_string()));
        }
        println!("Found {} table in {}.{}: Success", name, self.catalog, db);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::warehouse;
    use crate::engine::Reply;
    use std::collections::HashMap;

    /// Records dispatched statements and answers SHOW statements from
    /// canned catalog contents
    #[derive(Default)]
    struct FakeEngine {
        sent: Vec<String>,
        databases: Vec<String>,
        tables: HashMap<String, Vec<String>>,
    }

    impl FakeEngine {
        fn with_databases(databases: &[&str]) -> Self {
            Self {
                databases: databases.iter().map(|d| d.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    impl SqlEngine for FakeEngine {
        fn execute(&mut self, sql: &str) -> Result<Reply> {
            self.sent.push(sql.to_string());
            if sql.starts_with("SHOW DATABASES IN ") {
                return Ok(Reply {
                    columns: vec!["databaseName".to_string()],
                    rows: self
                        .databases
                        .iter()
                        .map(|d| vec![serde_json::Value::String(d.clone())])
                        .collect(),
                    ..Default::default()
                });
            }
            if let Some(rest) = sql.strip_prefix("SHOW TABLES IN ") {
                let db = rest.rsplit('.').next().unwrap_or("");
                let names = self.tables.get(db).cloned().unwrap_or_default();
                return Ok(Reply {
                    columns: vec!["tableName".to_string()],
                    rows: names
                        .into_iter()
                        .map(|n| vec![serde_json::Value::String(n)])
                        .collect(),
                    ..Default::default()
                });
            }
            Ok(Reply {
                status: Some("success".to_string()),
                message: Some("OK".to_string()),
                ..Default::default()
            })
        }
    }

    fn test_config() -> WarehouseConfig {
        WarehouseConfig::new("pulse://localhost:7171/warehouse", "/tmp/data", "/tmp/chk")
    }

    #[test]
    fn test_table_creation_requires_database() {
        let mut prov = Provisioner::new(FakeEngine::default(), test_config());
        let result = prov.create_table(&warehouse::users());
        assert!(matches!(result, Err(Error::DatabaseNotSelected(_))));
        assert!(!prov.is_initialized());
    }

    #[test]
    fn test_view_creation_requires_database() {
        let mut prov = Provisioner::new(FakeEngine::default(), test_config());
        let view = warehouse::gym_summary("fitness-dev");
        assert!(matches!(
            prov.create_view(&view),
            Err(Error::DatabaseNotSelected(_))
        ));
    }

    #[test]
    fn test_create_database_selects_it() {
        let mut prov = Provisioner::new(FakeEngine::default(), test_config());
        prov.create_database(Tier::Bronze).unwrap();
        assert!(prov.is_initialized());

        let engine = prov.into_engine();
        assert_eq!(
            engine.sent,
            vec![
                "CREATE DATABASE IF NOT EXISTS `fitness-dev`.fitness_bronze",
                "USE `fitness-dev`.fitness_bronze",
            ]
        );
    }

    #[test]
    fn test_setup_dispatches_in_order() {
        let mut prov = Provisioner::new(FakeEngine::default(), test_config());
        prov.setup().unwrap();

        let engine = prov.into_engine();
        // 3 tiers x (CREATE DATABASE + USE) + 13 tables + 1 view
        assert_eq!(engine.sent.len(), 20);
        assert_eq!(
            engine.sent[0],
            "CREATE DATABASE IF NOT EXISTS `fitness-dev`.fitness_bronze"
        );
        assert!(engine.sent[2].contains("registered_users_bz"));
        assert!(engine.sent[19].starts_with("CREATE OR REPLACE VIEW"));

        // Silver objects come after every bronze object
        let silver_db = engine
            .sent
            .iter()
            .position(|s| s.contains("fitness_silver"))
            .unwrap();
        assert!(engine.sent[..silver_db]
            .iter()
            .all(|s| !s.contains("fitness_gold")));
    }

    #[test]
    fn test_validate_reports_missing_database() {
        let engine = FakeEngine::with_databases(&["fitness_bronze", "fitness_silver"]);
        let mut prov = Provisioner::new(engine, test_config());
        let result = prov.validate();
        assert!(matches!(result, Err(Error::DatabaseMissing(db)) if db.contains("fitness_gold")));
    }

    #[test]
    fn test_validate_reports_missing_table() {
        let mut engine =
            FakeEngine::with_databases(&["fitness_bronze", "fitness_silver", "fitness_gold"]);
        engine.tables.insert(
            "fitness_bronze".to_string(),
            vec![
                "registered_users_bz".to_string(),
                "kafka_multiplex_bz".to_string(),
            ],
        );
        let mut prov = Provisioner::new(engine, test_config());
        let result = prov.validate();
        assert!(
            matches!(result, Err(Error::TableMissing(table, _)) if table == "gym_logins_bz")
        );
    }

    #[test]
    fn test_cleanup_drops_only_existing_databases() {
        let dir = tempfile::tempdir().unwrap();
        let config = WarehouseConfig::new(
            "pulse://localhost:7171/warehouse",
            dir.path().join("data").display().to_string(),
            dir.path().join("chk").display().to_string(),
        );
        let engine = FakeEngine::with_databases(&["fitness_bronze"]);
        let mut prov = Provisioner::new(engine, config);
        prov.cleanup().unwrap();

        let engine = prov.into_engine();
        let drops: Vec<&String> = engine
            .sent
            .iter()
            .filter(|s| s.starts_with("DROP DATABASE"))
            .collect();
        assert_eq!(
            drops,
            vec!["DROP DATABASE `fitness-dev`.fitness_bronze CASCADE"]
        );
    }
}
