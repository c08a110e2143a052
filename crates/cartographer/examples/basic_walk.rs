//! Basic analysis example.
//!
//! Analyzes the entry file given on the command line (default
//! `./src/main.js`) and prints every edge of its dependency tree.

use cartographer::{graph, Cartographer};

#[tokio::main]
async fn main() -> Result<(), cartographer::CartographerError> {
    let entry = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "./src/main.js".to_string());

    let cartographer = Cartographer::new();
    let root = cartographer.analyze(&entry).await?;

    for file in graph::files(&root) {
        println!("{}", file.path.display());
        for dep in file.dependencies().unwrap_or_default() {
            match (&dep.file, &dep.error) {
                (Some(resolved), _) => {
                    println!("  {} -> {}", dep.specifier, resolved.path.display())
                }
                (_, Some(error)) => println!("  {} !! {}", dep.specifier, error),
                _ => {}
            }
        }
    }

    println!("\n{}", graph::stats(&root));
    Ok(())
}
