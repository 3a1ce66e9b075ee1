//! Listing of configured input sources.

use crate::config::Config;

/// Prints the configured web and PDF sources as an aligned table.
pub fn list_sources(config: &Config) {
    let total = config.sources.web.len() + config.sources.pdfs.len();
    if total == 0 {
        println!("No sources configured");
        return;
    }

    println!("{:<6} SOURCE", "TYPE");
    for url in &config.sources.web {
        println!("{:<6} {}", "web", url);
    }
    for path in &config.sources.pdfs {
        println!("{:<6} {}", "pdf", path);
    }
    println!(
        "\n{} source(s): {} web, {} pdf",
        total,
        config.sources.web.len(),
        config.sources.pdfs.len()
    );
}
