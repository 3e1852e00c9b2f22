//! Background Tasks Module
//!
//! Contains background tasks that run periodically during service operation.
//!
//! # Tasks
//! - Cache sweep: evicts expired entries from both tiers at a fixed interval

mod sweep;

pub use sweep::spawn_sweep_task;
