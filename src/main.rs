/*!
 * Virtual Memory Simulator - Main Entry Point
 *
 * Interactive shell over a 1000-unit address space with 100-unit pages:
 * - alloc / free under first, best or next fit
 * - FIFO swap-out when nothing fits
 * - block table and ASCII map views
 */

use anyhow::Context;
use std::io;
use tracing::info;

use vmem_sim::{init_tracing, MemoryManager, Shell, SimulatorConfig};

fn main() -> anyhow::Result<()> {
    // Initialize structured tracing
    init_tracing();

    let config = SimulatorConfig::default();
    let manager = MemoryManager::with_config(config).context("Invalid simulator configuration")?;

    info!(
        total = config.total_size,
        page_size = config.page_size,
        "Simulator ready"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(manager, stdin.lock(), stdout.lock());
    shell.run().context("Shell I/O failed")?;

    info!("Simulator exiting");
    Ok(())
}
