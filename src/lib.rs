//! # Photo Disk System
//!
//! A PostgreSQL data-access layer for a small storage catalogue: photos,
//! disks, RAM modules, which photos are stored on which disks, and which RAM
//! modules are part of which disks.
//!
//! Every operation opens its own connection, runs parameterized SQL, and
//! translates constraint violations into a [`ReturnValue`] instead of
//! returning an error. Joins, aggregation and ranking all happen in SQL.
//!
//! ## Relations
//!
//! | Relation | Columns | Constraints |
//! |----------|---------|-------------|
//! | Photos | photo_id, description, size | id > 0, size >= 0 |
//! | Disks | disk_id, company, speed, free_space, cost | id, speed, cost > 0; free_space >= 0 |
//! | RAMs | ram_id, company, size | id > 0, size > 0 |
//! | StoredOn | photo_id, disk_id | cascades from Photos and Disks |
//! | PartOf | ram_id, disk_id | cascades from RAMs and Disks |
//!
//! ## Result codes
//!
//! | Failure | Code |
//! |---------|------|
//! | duplicate key | `ALREADY_EXISTS` |
//! | check constraint | `BAD_PARAMS` |
//! | missing row (delete, relationship insert) | `NOT_EXISTS` |
//! | anything else | `ERROR` |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use photo_disk_system::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let store = PhotoStore::from_env()?;
//!     store.create_tables().await?;
//!
//!     assert_eq!(store.add_disk(&Disk::new(1, "DELL", 10, 100, 2)).await, ReturnValue::Ok);
//!     assert_eq!(store.add_photo(&Photo::new(1, "Tree", 40)).await, ReturnValue::Ok);
//!
//!     let photo = Photo::new(1, "Tree", 40);
//!     assert_eq!(store.add_photo_to_disk(&photo, 1).await, ReturnValue::Ok);
//!     assert_eq!(store.add_photo_to_disk(&photo, 1).await, ReturnValue::AlreadyExists);
//!
//!     println!("average size: {}", store.average_photos_size_on_disk(1).await);
//!     store.drop_tables().await
//! }
//! ```

/// Core database system types and traits
pub mod core;

/// Database backend implementations
pub mod backends;

/// Photo, disk and RAM entities
pub mod business;

/// Table and view definitions
pub mod schema;

/// Data-access operations
pub mod store;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::business::{Disk, Photo, Ram};
    pub use crate::core::{
        ConnectionBuilder, Database, DatabaseError, DatabaseValue, Result, ReturnValue,
        Violation,
    };
    pub use crate::store::PhotoStore;
}

// Re-export at root level for convenience
pub use crate::backends::PostgresDatabase;
pub use crate::business::{Disk, Photo, Ram};
pub use crate::core::{
    ConnectionBuilder, Database, DatabaseError, DatabaseResult, DatabaseRow, DatabaseValue,
    Result, ReturnValue, TransactionGuard, Violation,
};
pub use crate::store::PhotoStore;
