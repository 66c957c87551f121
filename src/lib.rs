//! GeoClicker: an incremental shape clicker.
//!
//! The engine is plain Rust driven by explicit timestamps: the browser shell
//! in `main.rs` owns the clock, the storage and the screen, and calls into
//! `Session` for every mutation.

pub mod accrual;
pub mod catalog;
pub mod config;
pub mod error;
pub mod purchase;
pub mod save;
pub mod scenario;
pub mod session;
pub mod state;
pub mod stats;
pub mod time;

pub use config::EngineConfig;
pub use error::EngineError;
pub use session::Session;
pub use state::{Boost, GameState, Timestamp};
