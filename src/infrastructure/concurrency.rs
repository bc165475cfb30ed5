/// Concurrency management for stackfold.
/// Trace preparation runs on the global rayon pool; the tree fold is serial.

use anyhow::Result;

/// Initialize the global rayon thread pool with controlled worker count.
/// Reserves ~50% of CPU capacity so the host stays responsive while a large
/// log is being folded.
pub fn init_thread_pool() -> Result<()> {
    let cores = num_cpus::get();
    let workers = std::cmp::max(1, cores / 2);

    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build_global()?;

    println!(
        "[stackfold] Initialized thread pool: {} workers (system has {} cores)",
        workers, cores
    );

    Ok(())
}
