use data_loader::{Catalog, DatasetRegistry, LoadStatus};
use std::path::PathBuf;
use std::time::Instant;

fn main() {
    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    println!("Loading datasets from {}...\n", data_dir.display());

    let start = Instant::now();
    let catalog = Catalog::load(&data_dir, &DatasetRegistry::default());
    let elapsed = start.elapsed();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    for status in catalog.report().statuses() {
        let marker = match status.status {
            LoadStatus::Ok => "+",
            LoadStatus::Warning => "?",
            LoadStatus::Error => "!",
        };
        println!("[{}] {}: {}", marker, status.key, status.detail);
    }
    match catalog.movies() {
        Some(movies) => println!("\nMovies: {}", movies.len()),
        None => println!("\nMovie table unavailable"),
    }
}
