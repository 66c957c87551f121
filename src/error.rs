//! Engine error taxonomy.
//!
//! Running out of score is not an error: `purchase` reports it through
//! `PurchaseOutcome::applied`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// An upgrade id outside the catalog reached the engine.
    #[error("unknown upgrade id `{0}`")]
    InvalidUpgrade(String),

    /// A scenario id outside the catalog reached the engine.
    #[error("unknown scenario id `{0}`")]
    InvalidScenario(String),

    /// The persisted blob could not be parsed.
    #[error("malformed save data: {0}")]
    MalformedSaveData(#[from] serde_json::Error),

    /// The persisted blob predates the oldest layout we can still read.
    #[error("save version {saved} is older than the minimum compatible version {min}")]
    IncompatibleSaveVersion { saved: u32, min: u32 },

    /// The key-value store refused a write.
    #[error("storage error: {0}")]
    Storage(String),
}
