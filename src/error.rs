use thiserror::Error;

/// Per-cycle failure, tagged by the domain it came from. Every variant is
/// handled the same way by the loop (log and wait out the interval); the
/// tag only sharpens the log line.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("billing query failed: {0:#}")]
    Billing(anyhow::Error),

    #[error("inventory query failed: {0:#}")]
    Inventory(anyhow::Error),

    #[error("frame rendering failed: {0:#}")]
    Render(anyhow::Error),

    #[error("panel I/O failed: {0:#}")]
    Screen(anyhow::Error),
}
