//! Relational schema
//!
//! The schema is an ordered list of [`SchemaObject`]s, each carrying the DDL
//! that creates it and the DDL that removes it. Creation runs in declaration
//! order inside one transaction; dropping runs in reverse.

use crate::core::{Database, Result, TransactionGuard};

/// One table or view with its forward and backward DDL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaObject {
    name: &'static str,
    create_sql: &'static str,
    drop_sql: &'static str,
}

impl SchemaObject {
    const fn new(name: &'static str, create_sql: &'static str, drop_sql: &'static str) -> Self {
        Self {
            name,
            create_sql,
            drop_sql,
        }
    }

    /// Get the relation name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Get the CREATE statement
    pub fn create_sql(&self) -> &'static str {
        self.create_sql
    }

    /// Get the DROP statement
    pub fn drop_sql(&self) -> &'static str {
        self.drop_sql
    }
}

/// Every relation of the store, referenced objects before their dependents
pub const SCHEMA: &[SchemaObject] = &[
    SchemaObject::new(
        "Photos",
        "CREATE TABLE Photos (
            photo_id INTEGER PRIMARY KEY CHECK (photo_id > 0),
            description TEXT NOT NULL,
            size INTEGER NOT NULL CHECK (size >= 0)
        )",
        "DROP TABLE IF EXISTS Photos CASCADE",
    ),
    SchemaObject::new(
        "Disks",
        "CREATE TABLE Disks (
            disk_id INTEGER PRIMARY KEY CHECK (disk_id > 0),
            company TEXT NOT NULL,
            speed INTEGER NOT NULL CHECK (speed > 0),
            free_space INTEGER NOT NULL CHECK (free_space >= 0),
            cost INTEGER NOT NULL CHECK (cost > 0)
        )",
        "DROP TABLE IF EXISTS Disks CASCADE",
    ),
    SchemaObject::new(
        "RAMs",
        "CREATE TABLE RAMs (
            ram_id INTEGER PRIMARY KEY CHECK (ram_id > 0),
            company TEXT NOT NULL,
            size INTEGER NOT NULL CHECK (size > 0)
        )",
        "DROP TABLE IF EXISTS RAMs CASCADE",
    ),
    SchemaObject::new(
        "StoredOn",
        "CREATE TABLE StoredOn (
            photo_id INTEGER REFERENCES Photos ON DELETE CASCADE ON UPDATE CASCADE,
            disk_id INTEGER REFERENCES Disks ON DELETE CASCADE ON UPDATE CASCADE,
            PRIMARY KEY (photo_id, disk_id)
        )",
        "DROP TABLE IF EXISTS StoredOn CASCADE",
    ),
    SchemaObject::new(
        "PartOf",
        "CREATE TABLE PartOf (
            ram_id INTEGER REFERENCES RAMs ON DELETE CASCADE ON UPDATE CASCADE,
            disk_id INTEGER REFERENCES Disks ON DELETE CASCADE ON UPDATE CASCADE,
            PRIMARY KEY (ram_id, disk_id)
        )",
        "DROP TABLE IF EXISTS PartOf CASCADE",
    ),
    SchemaObject::new(
        "Photos_Stored_On_Disks",
        "CREATE VIEW Photos_Stored_On_Disks AS
            SELECT s.disk_id, s.photo_id, p.description, p.size
            FROM Photos p
            INNER JOIN StoredOn s ON p.photo_id = s.photo_id",
        "DROP VIEW IF EXISTS Photos_Stored_On_Disks",
    ),
    SchemaObject::new(
        "Rams_Part_Of_Disks",
        "CREATE VIEW Rams_Part_Of_Disks AS
            SELECT po.disk_id, po.ram_id, r.size, r.company
            FROM RAMs r
            INNER JOIN PartOf po ON r.ram_id = po.ram_id",
        "DROP VIEW IF EXISTS Rams_Part_Of_Disks",
    ),
];

/// Base tables emptied by [`clear_tables`]
const TABLES: &str = "Photos, Disks, RAMs, StoredOn, PartOf";

/// Create every relation in one transaction
pub async fn create_tables<D: Database>(db: &D) -> Result<()> {
    let tx = TransactionGuard::begin(db).await?;
    let result: Result<()> = async {
        for object in SCHEMA {
            tracing::debug!(relation = object.name(), "creating");
            tx.batch_execute(object.create_sql()).await?;
        }
        Ok(())
    }
    .await;
    tx.finish(result).await
}

/// Remove every row, keeping the relations
pub async fn clear_tables<D: Database>(db: &D) -> Result<()> {
    db.batch_execute(&format!("TRUNCATE TABLE {} CASCADE", TABLES))
        .await
}

/// Drop every relation, dependents first; missing objects are skipped
pub async fn drop_tables<D: Database>(db: &D) -> Result<()> {
    let tx = TransactionGuard::begin(db).await?;
    let result: Result<()> = async {
        for object in SCHEMA.iter().rev() {
            tracing::debug!(relation = object.name(), "dropping");
            tx.batch_execute(object.drop_sql()).await?;
        }
        Ok(())
    }
    .await;
    tx.finish(result).await
}
