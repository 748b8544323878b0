//! Banks command - list supported banks.

use console::style;
use retex_core::ExtractorManager;

pub async fn run() -> anyhow::Result<()> {
    let manager = ExtractorManager::new();

    println!("{}", style("Supported banks:").bold());
    for bank in manager.list_supported_banks() {
        println!("  - {}", bank);
    }
    println!("\nUnrecognized receipt layouts fall back to generic patterns.");

    Ok(())
}
