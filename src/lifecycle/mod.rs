//! Wiring and shutdown of the running system.
//!
//! # Main Components
//!
//! - [`AccountSystem`] - Spawns the store task and builds the dispatcher over it
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod account_system;
pub mod tracing;

pub use account_system::*;
pub use self::tracing::setup_tracing;
