//! Full provisioning lifecycle driven through the public API against an
//! in-memory stand-in for the external catalog engine.

use std::collections::BTreeMap;

use pulselake::config::WarehouseConfig;
use pulselake::engine::{Reply, SqlEngine};
use pulselake::error::Error;
use pulselake::setup::Provisioner;

/// Applies CREATE/DROP statements to a map and answers SHOW statements
/// from it, the way the real engine's catalog would.
#[derive(Default)]
struct InMemoryEngine {
    sent: Vec<String>,
    databases: BTreeMap<String, Vec<String>>,
}

/// Strip backticks and split a qualified `catalog`.db[.object] name,
/// dropping anything from the first '(' or ' AS ' onwards.
fn name_parts(rest: &str) -> Vec<String> {
    let prefix = rest
        .split(" (")
        .next()
        .unwrap()
        .split(" AS ")
        .next()
        .unwrap();
    prefix
        .split('.')
        .map(|p| p.trim_matches('`').to_string())
        .collect()
}

fn ok(message: &str) -> pulselake::Result<Reply> {
    Ok(Reply {
        status: Some("success".to_string()),
        message: Some(message.to_string()),
        ..Default::default()
    })
}

fn rowset(column: &str, values: Vec<String>) -> pulselake::Result<Reply> {
    Ok(Reply {
        columns: vec![column.to_string()],
        rows: values
            .into_iter()
            .map(|v| vec![serde_json::Value::String(v)])
            .collect(),
        ..Default::default()
    })
}

impl SqlEngine for InMemoryEngine {
    fn execute(&mut self, sql: &str) -> pulselake::Result<Reply> {
        self.sent.push(sql.to_string());

        if let Some(rest) = sql.strip_prefix("CREATE DATABASE IF NOT EXISTS ") {
            let parts = name_parts(rest);
            self.databases.entry(parts[1].clone()).or_default();
            return ok("Database created");
        }
        if sql.starts_with("USE ") {
            return ok("OK");
        }
        if let Some(rest) = sql
            .strip_prefix("CREATE TABLE IF NOT EXISTS ")
            .or_else(|| sql.strip_prefix("CREATE OR REPLACE TABLE "))
            .or_else(|| sql.strip_prefix("CREATE OR REPLACE VIEW "))
        {
            let parts = name_parts(rest);
            let (db, object) = (parts[1].clone(), parts[2].clone());
            let Some(objects) = self.databases.get_mut(&db) else {
                return Err(Error::Engine(format!("database '{}' not found", db)));
            };
            if !objects.contains(&object) {
                objects.push(object);
            }
            return ok("Created");
        }
        if let Some(rest) = sql.strip_prefix("DROP DATABASE ") {
            let rest = rest.strip_suffix(" CASCADE").unwrap_or(rest);
            let parts = name_parts(rest);
            if self.databases.remove(&parts[1]).is_none() {
                return Err(Error::Engine(format!("database '{}' not found", parts[1])));
            }
            return ok("Dropped");
        }
        if sql.starts_with("SHOW DATABASES IN ") {
            return rowset("databaseName", self.databases.keys().cloned().collect());
        }
        if let Some(rest) = sql.strip_prefix("SHOW TABLES IN ") {
            let parts = name_parts(rest);
            let objects = self.databases.get(&parts[1]).cloned().unwrap_or_default();
            return rowset("tableName", objects);
        }
        Err(Error::Engine(format!("unexpected statement: {}", sql)))
    }
}

fn config_in(dir: &tempfile::TempDir) -> WarehouseConfig {
    WarehouseConfig::new(
        "pulse://localhost:7171/warehouse",
        dir.path().join("data").display().to_string(),
        dir.path().join("meta").display().to_string(),
    )
}

#[test]
fn test_setup_then_validate() {
    let dir = tempfile::tempdir().unwrap();
    let mut prov = Provisioner::new(InMemoryEngine::default(), config_in(&dir));

    prov.setup().unwrap();
    prov.validate().unwrap();

    let engine = prov.into_engine();
    assert_eq!(
        engine.sent[0],
        "CREATE DATABASE IF NOT EXISTS `fitness-dev`.fitness_bronze"
    );
    // 3 tiers x (CREATE DATABASE + USE) + 13 tables + 1 view
    assert!(engine.sent[19].starts_with("CREATE OR REPLACE VIEW"));
    assert!(engine.sent[20].starts_with("SHOW DATABASES IN"));
    assert_eq!(engine.databases.len(), 3);
    assert_eq!(engine.databases["fitness_bronze"].len(), 3);
    assert_eq!(engine.databases["fitness_silver"].len(), 9);
    // Gold holds the summary table and the view
    assert_eq!(
        engine.databases["fitness_gold"],
        vec!["workout_bpm_summary", "gym_summary"]
    );
}

#[test]
fn test_setup_is_rerunnable() {
    let dir = tempfile::tempdir().unwrap();
    let mut prov = Provisioner::new(InMemoryEngine::default(), config_in(&dir));

    prov.setup().unwrap();
    prov.setup().unwrap();
    prov.validate().unwrap();
}

#[test]
fn test_validate_empty_engine_reports_bronze_first() {
    let dir = tempfile::tempdir().unwrap();
    let mut prov = Provisioner::new(InMemoryEngine::default(), config_in(&dir));

    let result = prov.validate();
    assert!(matches!(result, Err(Error::DatabaseMissing(db)) if db.contains("fitness_bronze")));
}

#[test]
fn test_table_creation_requires_database() {
    let dir = tempfile::tempdir().unwrap();
    let mut prov = Provisioner::new(InMemoryEngine::default(), config_in(&dir));

    let table = prov.layout().get_table("users").unwrap().clone();
    assert!(matches!(
        prov.create_table(&table),
        Err(Error::DatabaseNotSelected(_))
    ));
}

#[test]
fn test_cleanup_removes_databases_and_zones() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let landing_zone = config.landing_zone();
    let checkpoint_base = config.checkpoint_base();
    std::fs::create_dir_all(landing_zone.join("2025/07")).unwrap();
    std::fs::create_dir_all(&checkpoint_base).unwrap();

    let mut prov = Provisioner::new(InMemoryEngine::default(), config);
    prov.setup().unwrap();
    prov.cleanup().unwrap();

    assert!(!landing_zone.exists());
    assert!(!checkpoint_base.exists());

    let result = prov.validate();
    assert!(matches!(result, Err(Error::DatabaseMissing(_))));

    let engine = prov.into_engine();
    assert!(engine.databases.is_empty());
}

#[test]
fn test_cleanup_of_absent_warehouse_is_quiet() {
    let dir = tempfile::tempdir().unwrap();
    let mut prov = Provisioner::new(InMemoryEngine::default(), config_in(&dir));

    prov.cleanup().unwrap();

    let engine = prov.into_engine();
    assert!(engine.sent.iter().all(|s| !s.starts_with("DROP DATABASE")));
}
