//! Load-order example.
//!
//! Prints the order a bundler would emit modules in: every file after the
//! files it depends on.

use cartographer::{graph, Cartographer};

#[tokio::main]
async fn main() -> Result<(), cartographer::CartographerError> {
    let entry = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "./src/main.js".to_string());

    let root = Cartographer::new().analyze(&entry).await?;

    for (position, file) in graph::load_order(&root).iter().enumerate() {
        println!("{:>3}. {}", position + 1, file.path.display());
    }

    Ok(())
}
