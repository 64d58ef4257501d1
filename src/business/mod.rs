//! Business entities
//!
//! Plain value types mirroring the Photos, Disks and RAMs relations.

pub mod disk;
pub mod photo;
pub mod ram;

pub use disk::Disk;
pub use photo::Photo;
pub use ram::Ram;
