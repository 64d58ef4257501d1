//! Basic store usage example
//!
//! This example walks through the catalogue lifecycle:
//! - Creating the schema
//! - Adding photos, disks and RAM
//! - Placing photos on disks
//! - Running the aggregate queries
//! - Dropping the schema
//!
//! Run with: POSTGRES_URL=postgres://... cargo run --example basic_usage

use photo_disk_system::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Photo Disk System - Basic Usage Example ===\n");

    let store = PhotoStore::from_env()?;

    println!("1. Creating tables...");
    store.create_tables().await?;
    println!("   ✓ Tables created\n");

    println!("2. Adding disks, photos and RAM...");
    let disks = [
        Disk::new(1, "DELL", 7200, 100, 2),
        Disk::new(2, "HP", 5400, 60, 3),
    ];
    let photos = [
        Photo::new(1, "Tree", 30),
        Photo::new(2, "Tree", 20),
        Photo::new(3, "Lake", 50),
    ];
    for disk in &disks {
        println!("   {} -> {}", disk, store.add_disk(disk).await);
    }
    for photo in &photos {
        println!("   {} -> {}", photo, store.add_photo(photo).await);
    }
    let ram = Ram::new(1, "DELL", 64);
    println!("   {} -> {}", ram, store.add_ram(&ram).await);
    println!("   install RAM 1 in disk 1 -> {}\n", store.add_ram_to_disk(1, 1).await);

    println!("3. Result codes for rejected writes...");
    println!("   duplicate photo -> {}", store.add_photo(&photos[0]).await);
    println!("   negative size   -> {}", store.add_photo(&Photo::new(9, "Bad", -1)).await);
    println!("   missing disk    -> {}\n", store.add_photo_to_disk(&photos[0], 42).await);

    println!("4. Placing photos...");
    for (photo, disk_id) in [(&photos[0], 1), (&photos[1], 1), (&photos[0], 2)] {
        println!(
            "   photo {} on disk {} -> {}",
            photo.photo_id,
            disk_id,
            store.add_photo_to_disk(photo, disk_id).await
        );
    }
    println!("   photo 3 on disk 2 -> {}", store.add_photo_to_disk(&photos[2], 2).await);
    if let Some(disk) = store.get_disk_by_id(2).await {
        println!("   {}\n", disk);
    }

    println!("5. Aggregates...");
    println!("   average size on disk 1: {}", store.average_photos_size_on_disk(1).await);
    println!("   RAM on disk 1: {}", store.get_total_ram_on_disk(1).await);
    println!("   cost of 'Tree': {}", store.get_cost_for_description("Tree").await);
    println!("   fits disk 1: {:?}", store.get_photos_can_be_added_to_disk(1).await);
    println!(
        "   fits disk 1 and its RAM: {:?}",
        store.get_photos_can_be_added_to_disk_and_ram(1).await
    );
    println!("   disk 1 company exclusive: {}", store.is_company_exclusive(1).await);
    println!(
        "   disk with 2 'Tree' photos: {}",
        store.is_disk_containing_at_least_num_exists("Tree", 2).await
    );
    println!("   most data: {:?}", store.get_disks_containing_the_most_data().await);
    println!("   conflicting: {:?}", store.get_conflicting_disks().await);
    println!("   most available: {:?}", store.most_available_disks().await);
    println!("   close to photo 1: {:?}\n", store.get_close_photos(1).await);

    println!("6. Dropping tables...");
    store.drop_tables().await?;
    println!("   ✓ Tables dropped");

    println!("\n=== Example completed successfully ===");
    Ok(())
}
